use std::fmt;
use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Years a score date may fall in. Keeps typos like `0024-03-01` out of the
/// store, where they would stretch the weekly view across millennia.
pub const YEAR_RANGE: RangeInclusive<i32> = 1900..=9999;

pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a zero-padded `YYYY-MM-DD` date inside [`YEAR_RANGE`].
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    if raw.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .filter(|date| YEAR_RANGE.contains(&date.year()))
}

/// One of the two competitors. Usernames are resolved to a `Player` once, at
/// the boundary, and everything below that works with the enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    UserA,
    UserB,
}

impl Player {
    pub fn as_str(self) -> &'static str {
        match self {
            Player::UserA => "a",
            Player::UserB => "b",
        }
    }

    pub fn opponent(self) -> Player {
        match self {
            Player::UserA => Player::UserB,
            Player::UserB => Player::UserA,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Player {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "a" | "user_a" | "usera" => Ok(Player::UserA),
            "b" | "user_b" | "userb" => Ok(Player::UserB),
            other => Err(format!("unknown player slot: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub date: NaiveDate,
    pub score_a: Option<i64>,
    pub score_b: Option<i64>,
}

impl ScoreRecord {
    pub fn set_score(&mut self, player: Player, score: Option<i64>) {
        match player {
            Player::UserA => self.score_a = score,
            Player::UserB => self.score_b = score,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreUpsert {
    pub date: NaiveDate,
    pub score: i64,
    pub player: Player,
}
