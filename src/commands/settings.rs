use crate::models::day::format_date;
use crate::models::settings::AppSettings;

use super::{run_blocking, AppState, CommandResult};

pub async fn settings_get(state: &AppState) -> CommandResult<AppSettings> {
    let app_state = state.clone();
    run_blocking(move || app_state.settings().get()).await
}

pub async fn settings_set_timezone(
    state: &AppState,
    timezone: String,
) -> CommandResult<AppSettings> {
    let app_state = state.clone();
    run_blocking(move || app_state.settings().set_timezone(&timezone)).await
}

pub async fn settings_clear_timezone(state: &AppState) -> CommandResult<AppSettings> {
    let app_state = state.clone();
    run_blocking(move || app_state.settings().clear_timezone()).await
}

/// Today's date (`YYYY-MM-DD`) in the configured timezone.
pub async fn settings_today(state: &AppState) -> CommandResult<String> {
    let app_state = state.clone();
    run_blocking(move || {
        let today = app_state.settings().clock()?.today();
        Ok(format_date(&today))
    })
    .await
}
