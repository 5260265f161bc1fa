use chrono::NaiveDate;
use tracing::{debug, info};

use crate::db::repositories::day_repository::DayRepository;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::day::{ScoreRecord, ScoreUpsert};
use crate::models::week::WeekBucket;
use crate::services::calendar::{build_weekly_view, DEFAULT_SCORE};

/// Per-date score records for the two players.
pub struct ScoreService {
    db: DbPool,
}

impl ScoreService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub fn get_by_date(&self, date: &NaiveDate) -> AppResult<Option<ScoreRecord>> {
        self.db
            .with_connection(|conn| DayRepository::find_by_date(conn, date))
    }

    pub fn list_all(&self) -> AppResult<Vec<ScoreRecord>> {
        self.db.with_connection(DayRepository::list_all)
    }

    /// Writes one player's score for a date.
    ///
    /// An existing record only has the acting player's field replaced. A new
    /// record gets the opponent's field defaulted, except on `today`, where the
    /// opponent has simply not scored yet and the field stays empty.
    pub fn upsert_score(&self, input: &ScoreUpsert, today: NaiveDate) -> AppResult<ScoreRecord> {
        let ScoreUpsert {
            date,
            score,
            player,
        } = *input;

        let record = self.db.with_transaction(|conn| {
            match DayRepository::find_by_date(conn, &date)? {
                Some(mut existing) => {
                    DayRepository::update_score(conn, &date, player, Some(score))?;
                    existing.set_score(player, Some(score));
                    Ok(existing)
                }
                None => {
                    let opponent_score = if date == today {
                        None
                    } else {
                        Some(DEFAULT_SCORE)
                    };
                    let mut record = ScoreRecord {
                        date,
                        score_a: None,
                        score_b: None,
                    };
                    record.set_score(player, Some(score));
                    record.set_score(player.opponent(), opponent_score);
                    DayRepository::insert(conn, &record)?;
                    Ok(record)
                }
            }
        })?;

        info!(
            target: "app::scores",
            date = %date,
            player = %player,
            score,
            "score recorded"
        );
        Ok(record)
    }

    pub fn delete_by_date(&self, date: &NaiveDate) -> AppResult<()> {
        let deleted = self
            .db
            .with_transaction(|conn| DayRepository::delete_by_date(conn, date))?;

        if deleted == 0 {
            return Err(AppError::not_found());
        }

        info!(target: "app::scores", date = %date, "day deleted");
        Ok(())
    }

    pub fn delete_all(&self) -> AppResult<usize> {
        let deleted = self.db.with_transaction(DayRepository::delete_all)?;
        info!(target: "app::scores", deleted, "all days deleted");
        Ok(deleted)
    }

    pub fn weekly_view(&self, today: NaiveDate) -> AppResult<Vec<WeekBucket>> {
        let records = self.list_all()?;
        let weeks = build_weekly_view(today, &records);
        debug!(
            target: "app::scores",
            today = %today,
            records = records.len(),
            weeks = weeks.len(),
            first_week = weeks.first().map(WeekBucket::first_date),
            "weekly view built"
        );
        Ok(weeks)
    }
}
