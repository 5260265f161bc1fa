use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::commands::auth::{LoginPayload, RegisterPayload};
use crate::commands::scores::AddScorePayload;
use crate::commands::sql::SqlPayload;
use crate::commands::{self, AppState, CommandError, CommandResult};

#[derive(Parser)]
#[command(name = "scoreboard", version, about = "Two-player daily score tracker")]
pub struct Cli {
    /// SQLite database file
    #[arg(long, env = "SCOREBOARD_DB", default_value = "scoreboard.sqlite", global = true)]
    pub db: PathBuf,

    /// Also write daily-rolling log files into this directory
    #[arg(long, env = "SCOREBOARD_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the weekly calendar as JSON
    Weeks,
    /// Record a score for a user on a date
    Add {
        /// YYYY-MM-DD
        date: String,
        score: i64,
        #[arg(long)]
        user: String,
    },
    /// Show the stored record for a date
    Get { date: String },
    /// Delete the record for a date
    Delete { date: String },
    /// Delete every record
    Truncate {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Timezone configuration
    Timezone {
        #[command(subcommand)]
        action: TimezoneAction,
    },
    /// User accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Log in and print a session token
    Login {
        username: String,
        #[arg(long, env = "SCOREBOARD_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Invalidate a session token
    Logout { token: String },
    /// Run raw SQL against the database
    Sql {
        #[arg(long, env = "SCOREBOARD_TOKEN", hide_env_values = true)]
        token: String,
        /// Read the SQL from a file instead of the argument
        #[arg(long, conflicts_with = "sql")]
        file: Option<PathBuf>,
        sql: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum TimezoneAction {
    /// Print current settings
    Show,
    /// Set the IANA timezone, e.g. Europe/London
    Set { timezone: String },
    /// Forget the configured timezone
    Clear,
    /// Print today's date in the configured timezone
    Today,
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Register the account for player slot `a` or `b`
    Add {
        username: String,
        #[arg(long)]
        player: String,
        #[arg(long, env = "SCOREBOARD_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// List registered accounts
    List,
}

/// Runs one CLI command and renders its result as pretty JSON.
pub async fn dispatch(state: &AppState, command: Command) -> CommandResult<String> {
    match command {
        Command::Weeks => render(commands::scores::scores_fetch(state).await?),
        Command::Add { date, score, user } => render(
            commands::scores::scores_add(state, AddScorePayload { date, score, user }).await?,
        ),
        Command::Get { date } => render(commands::scores::scores_get(state, date).await?),
        Command::Delete { date } => {
            commands::scores::scores_delete(state, date.clone()).await?;
            render(serde_json::json!({ "deleted": date }))
        }
        Command::Truncate { yes } => {
            if !yes {
                return Err(CommandError::new(
                    "VALIDATION_ERROR",
                    "refusing to delete every record without --yes",
                    None,
                ));
            }
            render(commands::scores::scores_truncate(state).await?)
        }
        Command::Timezone { action } => match action {
            TimezoneAction::Show => render(commands::settings::settings_get(state).await?),
            TimezoneAction::Set { timezone } => {
                render(commands::settings::settings_set_timezone(state, timezone).await?)
            }
            TimezoneAction::Clear => render(commands::settings::settings_clear_timezone(state).await?),
            TimezoneAction::Today => render(commands::settings::settings_today(state).await?),
        },
        Command::User { action } => match action {
            UserAction::Add {
                username,
                player,
                password,
            } => render(
                commands::auth::auth_register(
                    state,
                    RegisterPayload {
                        username,
                        password,
                        player,
                    },
                )
                .await?,
            ),
            UserAction::List => render(commands::auth::users_list(state).await?),
        },
        Command::Login { username, password } => render(
            commands::auth::auth_login(state, LoginPayload { username, password }).await?,
        ),
        Command::Logout { token } => {
            commands::auth::auth_logout(state, token).await?;
            render(serde_json::json!({ "loggedOut": true }))
        }
        Command::Sql { token, file, sql } => {
            let sql = match (file, sql) {
                (Some(path), _) => std::fs::read_to_string(&path).map_err(|err| {
                    CommandError::new(
                        "VALIDATION_ERROR",
                        format!("cannot read {}: {err}", path.display()),
                        None,
                    )
                })?,
                (None, Some(sql)) => sql,
                (None, None) => {
                    return Err(CommandError::new(
                        "VALIDATION_ERROR",
                        "provide SQL as an argument or with --file",
                        None,
                    ))
                }
            };
            render(commands::sql::sql_execute(state, SqlPayload { token, sql }).await?)
        }
    }
}

fn render<T: Serialize>(value: T) -> CommandResult<String> {
    serde_json::to_string_pretty(&value)
        .map_err(|err| CommandError::new("UNKNOWN", format!("failed to render output: {err}"), None))
}
