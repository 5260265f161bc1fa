use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::repositories::session_repository::SessionRepository;
use crate::db::repositories::user_repository::UserRepository;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::day::Player;
use crate::models::user::{Session, UserAccount, UserProfile};
use crate::utils::password::{hash_password, needs_rehash, verify_password};

pub struct AuthService {
    db: DbPool,
}

impl AuthService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Creates the account for one player slot. Each slot and each username can
    /// be taken once.
    pub fn register_user(
        &self,
        username: &str,
        password: &str,
        player: Player,
    ) -> AppResult<UserProfile> {
        let username = normalize_username(username)?;
        if password.is_empty() {
            return Err(AppError::validation("password must not be empty"));
        }

        let account = UserAccount {
            username,
            player,
            password_hash: hash_password(password)?,
            created_at: Utc::now().to_rfc3339(),
        };

        self.db
            .with_transaction(|conn| UserRepository::insert(conn, &account))?;
        info!(target: "app::auth", username = %account.username, player = %player, "user registered");

        Ok(UserProfile::from(&account))
    }

    pub fn login(&self, username: &str, password: &str) -> AppResult<Session> {
        let username = username.trim();
        let account = self
            .db
            .with_connection(|conn| UserRepository::find_by_username(conn, username))?
            .ok_or_else(|| AppError::user_not_found(username))?;

        if !verify_password(password, &account.password_hash)? {
            return Err(AppError::password_incorrect());
        }

        let session = Session {
            token: Uuid::new_v4().to_string(),
            username: account.username.clone(),
            created_at: Utc::now().to_rfc3339(),
        };

        let upgraded_hash = if needs_rehash(&account.password_hash) {
            Some(hash_password(password)?)
        } else {
            None
        };

        self.db.with_transaction(|conn| {
            if let Some(hash) = &upgraded_hash {
                UserRepository::update_password_hash(conn, &account.username, hash)?;
            }
            SessionRepository::insert(conn, &session)
        })?;
        if upgraded_hash.is_some() {
            info!(target: "app::auth", username = %account.username, "password hash upgraded");
        }

        info!(target: "app::auth", username = %account.username, "login succeeded");
        Ok(session)
    }

    pub fn verify_token(&self, token: &str) -> AppResult<UserAccount> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::unauthorized());
        }

        self.db.with_connection(|conn| {
            let session = SessionRepository::find(conn, token)?
                .ok_or_else(AppError::unauthorized)?;
            UserRepository::find_by_username(conn, &session.username)?.ok_or_else(|| {
                warn!(target: "app::auth", username = %session.username, "session refers to missing user");
                AppError::unauthorized()
            })
        })
    }

    pub fn logout(&self, token: &str) -> AppResult<()> {
        let deleted = self
            .db
            .with_connection(|conn| SessionRepository::delete(conn, token.trim()))?;
        if deleted == 0 {
            return Err(AppError::unauthorized());
        }
        Ok(())
    }

    /// Maps a username onto its player slot. Unknown usernames never fall
    /// through to a silent no-op.
    pub fn resolve_player(&self, username: &str) -> AppResult<Player> {
        let username = username.trim();
        self.db
            .with_connection(|conn| UserRepository::find_by_username(conn, username))?
            .map(|account| account.player)
            .ok_or_else(|| AppError::invalid_user(username))
    }

    pub fn list_users(&self) -> AppResult<Vec<UserProfile>> {
        let accounts = self.db.with_connection(UserRepository::list)?;
        Ok(accounts.iter().map(UserProfile::from).collect())
    }
}

fn normalize_username(username: &str) -> AppResult<String> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("username must not be empty"));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(AppError::validation("username must not contain whitespace"));
    }
    Ok(trimmed.to_string())
}
