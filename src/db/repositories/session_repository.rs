use std::convert::TryFrom;

use rusqlite::{named_params, Connection, OptionalExtension, Row};

use crate::error::AppResult;
use crate::models::user::Session;

impl TryFrom<&Row<'_>> for Session {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            token: row.get("token")?,
            username: row.get("username")?,
            created_at: row.get("created_at")?,
        })
    }
}

pub struct SessionRepository;

impl SessionRepository {
    pub fn insert(conn: &Connection, session: &Session) -> AppResult<()> {
        conn.execute(
            r#"
                INSERT INTO sessions (token, username, created_at)
                VALUES (:token, :username, :created_at)
            "#,
            named_params! {
                ":token": &session.token,
                ":username": &session.username,
                ":created_at": &session.created_at,
            },
        )?;
        Ok(())
    }

    pub fn find(conn: &Connection, token: &str) -> AppResult<Option<Session>> {
        let mut stmt = conn
            .prepare("SELECT token, username, created_at FROM sessions WHERE token = :token")?;

        let session = stmt
            .query_row(named_params! {":token": token}, |row| Session::try_from(row))
            .optional()?;

        Ok(session)
    }

    pub fn delete(conn: &Connection, token: &str) -> AppResult<usize> {
        let deleted = conn.execute(
            "DELETE FROM sessions WHERE token = :token",
            named_params! {":token": token},
        )?;
        Ok(deleted)
    }
}
