pub mod auth;
pub mod scores;
pub mod settings;
pub mod sql;

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{error, warn};

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::day;
use crate::services::auth_service::AuthService;
use crate::services::score_service::ScoreService;
use crate::services::settings_service::SettingsService;
use crate::services::sql_console::SqlConsole;

#[derive(Clone)]
pub struct AppState {
    score_service: Arc<ScoreService>,
    auth_service: Arc<AuthService>,
    settings_service: Arc<SettingsService>,
    sql_console: Arc<SqlConsole>,
}

impl AppState {
    pub fn new(db_pool: DbPool) -> Self {
        let score_service = Arc::new(ScoreService::new(db_pool.clone()));
        let auth_service = Arc::new(AuthService::new(db_pool.clone()));
        let settings_service = Arc::new(SettingsService::new(db_pool.clone()));
        let sql_console = Arc::new(SqlConsole::new(db_pool, Arc::clone(&auth_service)));

        Self {
            score_service,
            auth_service,
            settings_service,
            sql_console,
        }
    }

    pub fn scores(&self) -> Arc<ScoreService> {
        Arc::clone(&self.score_service)
    }

    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth_service)
    }

    pub fn settings(&self) -> Arc<SettingsService> {
        Arc::clone(&self.settings_service)
    }

    pub fn sql_console(&self) -> Arc<SqlConsole> {
        Arc::clone(&self.sql_console)
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<JsonValue>,
}

impl CommandError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Option<JsonValue>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details,
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for CommandError {}

impl From<AppError> for CommandError {
    fn from(error: AppError) -> Self {
        match error {
            AppError::Validation { message } => {
                CommandError::new("VALIDATION_ERROR", message, None)
            }
            AppError::NotFound => {
                CommandError::new("NOT_FOUND", "the requested record does not exist", None)
            }
            AppError::Conflict { message } => CommandError::new("CONFLICT", message, None),
            AppError::InvalidUser { username } => CommandError::new(
                "INVALID_USER",
                format!("unknown user identifier: {username}"),
                Some(serde_json::json!({ "username": username })),
            ),
            AppError::InvalidTimezone { timezone } => CommandError::new(
                "INVALID_TIMEZONE",
                format!("invalid timezone: {timezone}"),
                Some(serde_json::json!({ "timezone": timezone })),
            ),
            AppError::TimezoneNotSet => {
                CommandError::new("TIMEZONE_NOT_SET", "no timezone has been set", None)
            }
            AppError::UserNotFound { username } => CommandError::new(
                "USER_NOT_FOUND",
                "user does not exist",
                Some(serde_json::json!({ "username": username })),
            ),
            AppError::PasswordIncorrect => {
                CommandError::new("PASSWORD_INCORRECT", "password incorrect", None)
            }
            AppError::Unauthorized => {
                warn!(target: "app::command", "unauthorized command");
                CommandError::new("UNAUTHORIZED", "a valid session token is required", None)
            }
            AppError::Database { message } => {
                error!(target: "app::command", %message, "database error in command");
                CommandError::new("UNKNOWN", message, None)
            }
            AppError::Io(error) => {
                error!(target: "app::command", error = %error, "io error in command");
                CommandError::new("UNKNOWN", "file system access failed", None)
            }
            AppError::Other(message) => {
                error!(target: "app::command", %message, "unexpected error in command");
                CommandError::new("UNKNOWN", message, None)
            }
        }
    }
}

pub(crate) fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    day::parse_date(raw.trim()).ok_or_else(|| {
        AppError::validation(format!(
            "invalid date {raw:?}, expected YYYY-MM-DD with a year from {} to {}",
            day::YEAR_RANGE.start(),
            day::YEAR_RANGE.end()
        ))
    })
}

pub(crate) async fn run_blocking<T: Send + 'static>(
    task: impl FnOnce() -> Result<T, AppError> + Send + 'static,
) -> CommandResult<T> {
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| CommandError::new("UNKNOWN", format!("command task failed: {err}"), None))?
        .map_err(CommandError::from)
}
