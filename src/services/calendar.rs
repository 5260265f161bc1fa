//! Weekly calendar view over the stored score records.
//!
//! The view starts at the Monday on or before the earliest stored date (or
//! today's Monday when nothing is stored) and keeps emitting whole Monday to
//! Sunday weeks while the week's Monday is not after today. The last week may
//! therefore run past today.
//!
//! Gap filling, per day `d`:
//! - `d >= today`: both scores are `None`, stored values included. Today is
//!   "not yet scored" rather than missed.
//! - `d < today`: a stored score wins, otherwise [`DEFAULT_SCORE`].

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::day::{format_date, ScoreRecord};
use crate::models::week::{WeekBucket, WeekRow, DAYS_PER_WEEK};

/// Score credited for a past day nobody recorded.
pub const DEFAULT_SCORE: i64 = 8;

pub fn build_weekly_view(today: NaiveDate, records: &[ScoreRecord]) -> Vec<WeekBucket> {
    let anchor = records
        .iter()
        .map(|record| record.date)
        .min()
        .unwrap_or(today);

    let by_date: HashMap<NaiveDate, &ScoreRecord> =
        records.iter().map(|record| (record.date, record)).collect();

    let mut weeks = Vec::new();
    let mut monday = week_start(anchor);
    while monday <= today {
        let days = std::array::from_fn(|offset| {
            let date = monday + Duration::days(offset as i64);
            fill_day(date, today, by_date.get(&date).copied())
        });
        weeks.push(WeekBucket { days });
        monday += Duration::days(DAYS_PER_WEEK as i64);
    }

    weeks
}

/// The Monday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

fn fill_day(date: NaiveDate, today: NaiveDate, stored: Option<&ScoreRecord>) -> WeekRow {
    let is_future = date >= today;
    let pick = |value: Option<i64>| {
        if is_future {
            None
        } else {
            value.or(Some(DEFAULT_SCORE))
        }
    };

    WeekRow {
        date: format_date(&date),
        score_a: pick(stored.and_then(|record| record.score_a)),
        score_b: pick(stored.and_then(|record| record.score_b)),
    }
}
