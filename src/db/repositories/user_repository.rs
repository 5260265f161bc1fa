use std::convert::TryFrom;

use rusqlite::{named_params, Connection, OptionalExtension, Row};

use crate::error::{AppError, AppResult};
use crate::models::day::Player;
use crate::models::user::UserAccount;

#[derive(Debug, Clone)]
pub struct UserRow {
    pub username: String,
    pub player: String,
    pub password_hash: String,
    pub created_at: String,
}

impl UserRow {
    pub fn into_account(self) -> AppResult<UserAccount> {
        let player = Player::try_from(self.player.as_str()).map_err(AppError::database)?;
        Ok(UserAccount {
            username: self.username,
            player,
            password_hash: self.password_hash,
            created_at: self.created_at,
        })
    }
}

impl TryFrom<&Row<'_>> for UserRow {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            username: row.get("username")?,
            player: row.get("player")?,
            password_hash: row.get("password_hash")?,
            created_at: row.get("created_at")?,
        })
    }
}

pub struct UserRepository;

impl UserRepository {
    pub fn find_by_username(conn: &Connection, username: &str) -> AppResult<Option<UserAccount>> {
        let mut stmt = conn.prepare(
            r#"
                SELECT username, player, password_hash, created_at
                FROM users
                WHERE username = :username
            "#,
        )?;

        let row = stmt
            .query_row(named_params! {":username": username}, |row| {
                UserRow::try_from(row)
            })
            .optional()?;

        row.map(|row| row.into_account()).transpose()
    }

    pub fn list(conn: &Connection) -> AppResult<Vec<UserAccount>> {
        let mut stmt = conn.prepare(
            "SELECT username, player, password_hash, created_at FROM users ORDER BY player ASC",
        )?;

        let rows = stmt
            .query_map([], |row| UserRow::try_from(row))?
            .map(|row| {
                row.map_err(AppError::from)
                    .and_then(|row| row.into_account())
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(rows)
    }

    pub fn insert(conn: &Connection, account: &UserAccount) -> AppResult<()> {
        conn.execute(
            r#"
                INSERT INTO users (username, player, password_hash, created_at)
                VALUES (:username, :player, :password_hash, :created_at)
            "#,
            named_params! {
                ":username": &account.username,
                ":player": account.player.as_str(),
                ":password_hash": &account.password_hash,
                ":created_at": &account.created_at,
            },
        )?;

        Ok(())
    }

    pub fn update_password_hash(
        conn: &Connection,
        username: &str,
        password_hash: &str,
    ) -> AppResult<()> {
        let updated = conn.execute(
            "UPDATE users SET password_hash = :password_hash WHERE username = :username",
            named_params! {":password_hash": password_hash, ":username": username},
        )?;

        if updated == 0 {
            return Err(AppError::not_found());
        }

        Ok(())
    }
}
