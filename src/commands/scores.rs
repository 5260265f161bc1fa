use serde::{Deserialize, Serialize};

use crate::models::day::{ScoreRecord, ScoreUpsert};
use crate::models::week::WeekBucket;

use super::{parse_date, run_blocking, AppState, CommandResult};

/// The weekly calendar as of today in the configured timezone.
pub async fn scores_fetch(state: &AppState) -> CommandResult<Vec<WeekBucket>> {
    let app_state = state.clone();
    run_blocking(move || {
        let today = app_state.settings().clock()?.today();
        app_state.scores().weekly_view(today)
    })
    .await
}

pub async fn scores_get(state: &AppState, date: String) -> CommandResult<Option<ScoreRecord>> {
    let app_state = state.clone();
    run_blocking(move || {
        let date = parse_date(&date)?;
        app_state.scores().get_by_date(&date)
    })
    .await
}

pub async fn scores_add(state: &AppState, payload: AddScorePayload) -> CommandResult<ScoreRecord> {
    let app_state = state.clone();
    run_blocking(move || {
        let date = parse_date(&payload.date)?;
        let player = app_state.auth().resolve_player(&payload.user)?;
        let today = app_state.settings().clock()?.today();
        app_state.scores().upsert_score(
            &ScoreUpsert {
                date,
                score: payload.score,
                player,
            },
            today,
        )
    })
    .await
}

pub async fn scores_delete(state: &AppState, date: String) -> CommandResult<()> {
    let app_state = state.clone();
    run_blocking(move || {
        let date = parse_date(&date)?;
        app_state.scores().delete_by_date(&date)
    })
    .await
}

pub async fn scores_truncate(state: &AppState) -> CommandResult<TruncateResult> {
    let app_state = state.clone();
    run_blocking(move || {
        let deleted = app_state.scores().delete_all()?;
        Ok(TruncateResult { deleted })
    })
    .await
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddScorePayload {
    pub date: String,
    pub score: i64,
    pub user: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TruncateResult {
    pub deleted: usize,
}
