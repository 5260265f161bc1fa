use std::convert::TryFrom;

use chrono::{NaiveDate, Utc};
use rusqlite::{named_params, Connection, OptionalExtension, Row};

use crate::error::{AppError, AppResult};
use crate::models::day::{format_date, parse_date, Player, ScoreRecord};

#[derive(Debug, Clone)]
pub struct DayRow {
    pub date: String,
    pub score_a: Option<i64>,
    pub score_b: Option<i64>,
    pub updated_at: Option<String>,
}

impl DayRow {
    pub fn into_record(self) -> AppResult<ScoreRecord> {
        let date = parse_date(&self.date).ok_or_else(|| {
            AppError::database(format!("stored day has malformed date {:?}", self.date))
        })?;
        Ok(ScoreRecord {
            date,
            score_a: self.score_a,
            score_b: self.score_b,
        })
    }
}

impl TryFrom<&Row<'_>> for DayRow {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            date: row.get("date")?,
            score_a: row.get("score_a")?,
            score_b: row.get("score_b")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

pub struct DayRepository;

impl DayRepository {
    pub fn find_by_date(conn: &Connection, date: &NaiveDate) -> AppResult<Option<ScoreRecord>> {
        let mut stmt = conn.prepare(
            r#"
                SELECT date, score_a, score_b, updated_at
                FROM days
                WHERE date = :date
            "#,
        )?;

        let row = stmt
            .query_row(named_params! {":date": format_date(date)}, |row| {
                DayRow::try_from(row)
            })
            .optional()?;

        row.map(|row| row.into_record()).transpose()
    }

    pub fn list_all(conn: &Connection) -> AppResult<Vec<ScoreRecord>> {
        let mut stmt = conn.prepare(
            r#"
                SELECT date, score_a, score_b, updated_at
                FROM days
                ORDER BY date ASC
            "#,
        )?;

        let rows = stmt
            .query_map([], |row| DayRow::try_from(row))?
            .map(|row| {
                row.map_err(AppError::from)
                    .and_then(|row| row.into_record())
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(rows)
    }

    pub fn insert(conn: &Connection, record: &ScoreRecord) -> AppResult<()> {
        conn.execute(
            r#"
                INSERT INTO days (date, score_a, score_b, updated_at)
                VALUES (:date, :score_a, :score_b, :updated_at)
            "#,
            named_params! {
                ":date": format_date(&record.date),
                ":score_a": record.score_a,
                ":score_b": record.score_b,
                ":updated_at": Utc::now().to_rfc3339(),
            },
        )?;

        Ok(())
    }

    /// Overwrites one player's column, leaving the other untouched.
    pub fn update_score(
        conn: &Connection,
        date: &NaiveDate,
        player: Player,
        score: Option<i64>,
    ) -> AppResult<usize> {
        let sql = match player {
            Player::UserA => {
                "UPDATE days SET score_a = :score, updated_at = :updated_at WHERE date = :date"
            }
            Player::UserB => {
                "UPDATE days SET score_b = :score, updated_at = :updated_at WHERE date = :date"
            }
        };

        let updated = conn.execute(
            sql,
            named_params! {
                ":score": score,
                ":updated_at": Utc::now().to_rfc3339(),
                ":date": format_date(date),
            },
        )?;

        Ok(updated)
    }

    pub fn delete_by_date(conn: &Connection, date: &NaiveDate) -> AppResult<usize> {
        let deleted = conn.execute(
            "DELETE FROM days WHERE date = :date",
            named_params! {":date": format_date(date)},
        )?;
        Ok(deleted)
    }

    pub fn delete_all(conn: &Connection) -> AppResult<usize> {
        let deleted = conn.execute("DELETE FROM days", [])?;
        Ok(deleted)
    }
}
