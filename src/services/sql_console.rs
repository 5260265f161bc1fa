use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD as Base64, Engine as _};
use rusqlite::types::ValueRef;
use rusqlite::{Batch, Connection, Row, Statement};
use serde_json::{Map as JsonMap, Number as JsonNumber, Value as JsonValue};
use tracing::info;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::sql::SqlExecution;
use crate::services::auth_service::AuthService;

/// Maintenance console running raw SQL against the score database on behalf
/// of a logged-in user.
pub struct SqlConsole {
    db: DbPool,
    auth: Arc<AuthService>,
}

impl SqlConsole {
    pub fn new(db: DbPool, auth: Arc<AuthService>) -> Self {
        Self { db, auth }
    }

    /// Runs `sql` in a single transaction. Nothing is committed if any
    /// statement fails.
    pub fn execute_sql(&self, token: &str, sql: &str) -> AppResult<SqlExecution> {
        let account = self.auth.verify_token(token)?;

        let sql = sql.trim();
        if sql.is_empty() {
            return Err(AppError::validation("sql must not be empty"));
        }

        let outcome = self.db.with_transaction(|conn| run_sql(conn, sql))?;

        info!(
            target: "app::sql",
            username = %account.username,
            kind = outcome_kind(&outcome),
            "raw sql executed"
        );
        Ok(outcome)
    }
}

/// Runs every statement of `sql` in order, exactly as SQLite splits them, and
/// reports the outcome of the last one.
fn run_sql(conn: &Connection, sql: &str) -> AppResult<SqlExecution> {
    let mut batch = Batch::new(conn, sql);
    let mut last = None;

    while let Some(mut stmt) = batch.next()? {
        last = Some(run_statement(&mut stmt)?);
    }

    last.ok_or_else(|| AppError::validation("sql contains no statements"))
}

fn run_statement(stmt: &mut Statement<'_>) -> AppResult<SqlExecution> {
    if stmt.column_count() == 0 {
        let rows_affected = stmt.execute([])?;
        return Ok(SqlExecution::Statement { rows_affected });
    }

    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    let mut cursor = stmt.query([])?;
    while let Some(row) = cursor.next()? {
        rows.push(row_to_json(row, &columns)?);
    }

    Ok(SqlExecution::Rows { columns, rows })
}

fn row_to_json(row: &Row<'_>, columns: &[String]) -> AppResult<JsonMap<String, JsonValue>> {
    let mut object = JsonMap::with_capacity(columns.len());
    for (index, name) in columns.iter().enumerate() {
        let value = match row.get_ref(index)? {
            ValueRef::Null => JsonValue::Null,
            ValueRef::Integer(value) => JsonValue::from(value),
            ValueRef::Real(value) => JsonNumber::from_f64(value)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            ValueRef::Text(bytes) => JsonValue::String(String::from_utf8_lossy(bytes).into_owned()),
            ValueRef::Blob(bytes) => JsonValue::String(Base64.encode(bytes)),
        };
        object.insert(name.clone(), value);
    }
    Ok(object)
}

fn outcome_kind(outcome: &SqlExecution) -> &'static str {
    match outcome {
        SqlExecution::Rows { .. } => "rows",
        SqlExecution::Statement { .. } => "statement",
    }
}
