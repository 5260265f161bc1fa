pub mod day;
pub mod settings;
pub mod sql;
pub mod user;
pub mod week;
