use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::{AppError, AppResult};
use crate::models::settings::AppSettings;

/// Resolves "today" in the configured timezone.
///
/// Built from settings and handed to every call that needs the current date,
/// so nothing reads ambient timezone state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalClock {
    tz: Tz,
}

impl LocalClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn parse(timezone: &str) -> AppResult<Self> {
        parse_timezone(timezone).map(Self::new)
    }

    pub fn from_settings(settings: &AppSettings) -> AppResult<Self> {
        match settings.timezone.as_deref() {
            Some(timezone) => Self::parse(timezone),
            None => Err(AppError::timezone_not_set()),
        }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn today(&self) -> NaiveDate {
        self.date_at(Utc::now())
    }

    pub fn date_at(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.tz).date_naive()
    }
}

pub fn parse_timezone(timezone: &str) -> AppResult<Tz> {
    let trimmed = timezone.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_timezone(timezone));
    }
    trimmed
        .parse::<Tz>()
        .map_err(|_| AppError::invalid_timezone(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn date_follows_configured_zone() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 6, 23, 30, 0).unwrap();

        let london = LocalClock::parse("Europe/London").unwrap();
        let tokyo = LocalClock::parse("Asia/Tokyo").unwrap();
        let honolulu = LocalClock::parse("Pacific/Honolulu").unwrap();

        assert_eq!(london.date_at(instant).to_string(), "2024-03-06");
        assert_eq!(tokyo.date_at(instant).to_string(), "2024-03-07");
        assert_eq!(honolulu.date_at(instant).to_string(), "2024-03-06");
    }

    #[test]
    fn unknown_zone_is_rejected() {
        assert!(matches!(
            LocalClock::parse("Mars/Olympus_Mons"),
            Err(AppError::InvalidTimezone { .. })
        ));
        assert!(matches!(
            LocalClock::parse("   "),
            Err(AppError::InvalidTimezone { .. })
        ));
    }

    #[test]
    fn missing_zone_in_settings_is_reported() {
        let settings = AppSettings {
            timezone: None,
            updated_at: "2024-03-06T00:00:00Z".into(),
        };
        assert!(matches!(
            LocalClock::from_settings(&settings),
            Err(AppError::TimezoneNotSet)
        ));
    }
}
