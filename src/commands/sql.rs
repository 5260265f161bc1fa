use serde::Deserialize;

use crate::models::sql::SqlExecution;

use super::{run_blocking, AppState, CommandResult};

pub async fn sql_execute(state: &AppState, payload: SqlPayload) -> CommandResult<SqlExecution> {
    let app_state = state.clone();
    run_blocking(move || {
        app_state
            .sql_console()
            .execute_sql(&payload.token, &payload.sql)
    })
    .await
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlPayload {
    pub token: String,
    pub sql: String,
}
