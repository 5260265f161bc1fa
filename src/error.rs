use thiserror::Error;
use tracing::{error, warn};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("database error: {message}")]
    Database { message: String },

    #[error("record not found")]
    NotFound,

    #[error("record conflict: {message}")]
    Conflict { message: String },

    #[error("validation failed: {message}")]
    Validation { message: String },

    #[error("unknown user identifier: {username}")]
    InvalidUser { username: String },

    #[error("invalid timezone: {timezone}")]
    InvalidTimezone { timezone: String },

    #[error("no timezone has been set")]
    TimezoneNotSet,

    #[error("user does not exist: {username}")]
    UserNotFound { username: String },

    #[error("password incorrect")]
    PasswordIncorrect,

    #[error("session token is missing or expired")]
    Unauthorized,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(target: "app::validation", %message, "validation error");
        AppError::Validation { message }
    }

    pub fn invalid_user(username: impl Into<String>) -> Self {
        let username = username.into();
        warn!(target: "app::auth", %username, "unrecognized user identifier");
        AppError::InvalidUser { username }
    }

    pub fn invalid_timezone(timezone: impl Into<String>) -> Self {
        let timezone = timezone.into();
        warn!(target: "app::settings", %timezone, "invalid timezone");
        AppError::InvalidTimezone { timezone }
    }

    pub fn timezone_not_set() -> Self {
        warn!(target: "app::settings", "today requested before timezone was configured");
        AppError::TimezoneNotSet
    }

    pub fn user_not_found(username: impl Into<String>) -> Self {
        let username = username.into();
        warn!(target: "app::auth", %username, "login for unknown user");
        AppError::UserNotFound { username }
    }

    pub fn password_incorrect() -> Self {
        warn!(target: "app::auth", "password mismatch");
        AppError::PasswordIncorrect
    }

    pub fn unauthorized() -> Self {
        warn!(target: "app::auth", "rejected session token");
        AppError::Unauthorized
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(target: "app::conflict", %message, "conflict error");
        AppError::Conflict { message }
    }

    pub fn not_found() -> Self {
        warn!(target: "app::database", "resource not found");
        AppError::NotFound
    }

    pub fn database(message: impl Into<String>) -> Self {
        let message = message.into();
        error!(target: "app::database", %message, "database error");
        AppError::Database { message }
    }

    pub fn other(message: impl Into<String>) -> Self {
        let message = message.into();
        error!(target: "app::other", %message, "other error");
        AppError::Other(message)
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(error: rusqlite::Error) -> Self {
        use rusqlite::Error::{QueryReturnedNoRows, SqliteFailure};
        use rusqlite::ErrorCode;

        match &error {
            QueryReturnedNoRows => AppError::not_found(),
            SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation => {
                AppError::conflict("unique or check constraint violated")
            }
            _ => {
                error!(target: "app::database", error = ?error, "sqlite error");
                AppError::database(error.to_string())
            }
        }
    }
}
