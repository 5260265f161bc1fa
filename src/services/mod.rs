pub mod auth_service;
pub mod calendar;
pub mod clock;
pub mod score_service;
pub mod settings_service;
pub mod sql_console;
