pub mod day_repository;
pub mod session_repository;
pub mod settings_repository;
pub mod user_repository;
