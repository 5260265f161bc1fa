use serde::{Deserialize, Serialize};

pub const DAYS_PER_WEEK: usize = 7;

/// A single day in the weekly view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "ScoreA")]
    pub score_a: Option<i64>,
    #[serde(rename = "ScoreB")]
    pub score_b: Option<i64>,
}

/// Monday through Sunday. Serialized as a bare 7-element array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekBucket {
    pub days: [WeekRow; DAYS_PER_WEEK],
}

impl WeekBucket {
    pub fn first_date(&self) -> &str {
        &self.days[0].date
    }

    pub fn rows(&self) -> &[WeekRow] {
        &self.days
    }
}
