use serde::Deserialize;

use crate::error::AppError;
use crate::models::day::Player;
use crate::models::user::{Session, UserProfile};

use super::{run_blocking, AppState, CommandResult};

pub async fn auth_register(
    state: &AppState,
    payload: RegisterPayload,
) -> CommandResult<UserProfile> {
    let app_state = state.clone();
    run_blocking(move || {
        let player = Player::try_from(payload.player.as_str()).map_err(AppError::validation)?;
        app_state
            .auth()
            .register_user(&payload.username, &payload.password, player)
    })
    .await
}

pub async fn auth_login(state: &AppState, payload: LoginPayload) -> CommandResult<Session> {
    let app_state = state.clone();
    run_blocking(move || app_state.auth().login(&payload.username, &payload.password)).await
}

pub async fn auth_logout(state: &AppState, token: String) -> CommandResult<()> {
    let app_state = state.clone();
    run_blocking(move || app_state.auth().logout(&token)).await
}

pub async fn users_list(state: &AppState) -> CommandResult<Vec<UserProfile>> {
    let app_state = state.clone();
    run_blocking(move || app_state.auth().list_users()).await
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    pub username: String,
    pub password: String,
    /// `a` or `b`.
    pub player: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
}
