use std::sync::RwLock;

use chrono::Utc;
use tracing::{info, warn};

use crate::db::repositories::settings_repository::SettingsRepository;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::settings::AppSettings;
use crate::services::clock::{parse_timezone, LocalClock};

const KEY_TIMEZONE: &str = "timezone";

pub struct SettingsService {
    db: DbPool,
    cache: RwLock<Option<AppSettings>>,
}

impl SettingsService {
    pub fn new(db: DbPool) -> Self {
        Self {
            db,
            cache: RwLock::new(None),
        }
    }

    pub fn get(&self) -> AppResult<AppSettings> {
        if let Ok(guard) = self.cache.read() {
            if let Some(settings) = guard.as_ref() {
                return Ok(settings.clone());
            }
        }

        let settings = self.load_settings_from_db()?;
        if let Ok(mut guard) = self.cache.write() {
            *guard = Some(settings.clone());
        }
        Ok(settings)
    }

    /// Validates and stores the timezone used to resolve "today".
    pub fn set_timezone(&self, timezone: &str) -> AppResult<AppSettings> {
        let tz = parse_timezone(timezone)?;
        let name = tz.name().to_string();

        self.db
            .with_connection(|conn| SettingsRepository::upsert(conn, KEY_TIMEZONE, &name))?;
        info!(target: "app::settings", timezone = %name, "timezone updated");

        let mut current = self.get()?;
        current.timezone = Some(name);
        current.updated_at = Utc::now().to_rfc3339();
        self.store_cache(&current);
        Ok(current)
    }

    pub fn clear_timezone(&self) -> AppResult<AppSettings> {
        self.db
            .with_connection(|conn| SettingsRepository::delete(conn, KEY_TIMEZONE))?;

        let mut current = self.get()?;
        current.timezone = None;
        current.updated_at = Utc::now().to_rfc3339();
        self.store_cache(&current);
        Ok(current)
    }

    /// Clock for the configured timezone; fails with `TimezoneNotSet` until one is stored.
    pub fn clock(&self) -> AppResult<LocalClock> {
        LocalClock::from_settings(&self.get()?)
    }

    fn store_cache(&self, settings: &AppSettings) {
        if let Ok(mut guard) = self.cache.write() {
            *guard = Some(settings.clone());
        }
    }

    fn load_settings_from_db(&self) -> AppResult<AppSettings> {
        self.db.with_connection(|conn| {
            let row = SettingsRepository::get(conn, KEY_TIMEZONE)?;

            let timezone = match row.as_ref() {
                Some(row) => match parse_timezone(&row.value) {
                    Ok(tz) => Some(tz.name().to_string()),
                    Err(err) => {
                        warn!(
                            target: "app::settings",
                            error = %err,
                            "stored timezone is invalid, treating as unset"
                        );
                        None
                    }
                },
                None => None,
            };

            let updated_at = row
                .map(|row| row.updated_at)
                .unwrap_or_else(|| Utc::now().to_rfc3339());

            Ok(AppSettings {
                timezone,
                updated_at,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use tempfile::TempDir;

    fn setup_service() -> (SettingsService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("settings.db");
        let pool = DbPool::new(&db_path).unwrap();
        (SettingsService::new(pool), temp_dir)
    }

    #[test]
    fn timezone_is_unset_by_default() {
        let (service, _guard) = setup_service();
        let settings = service.get().unwrap();

        assert!(settings.timezone.is_none());
        assert!(matches!(service.clock(), Err(AppError::TimezoneNotSet)));
    }

    #[test]
    fn set_timezone_persists_across_instances() {
        let (service, guard) = setup_service();
        let updated = service.set_timezone(" Europe/London ").unwrap();
        assert_eq!(updated.timezone.as_deref(), Some("Europe/London"));

        let pool = DbPool::new(guard.path().join("settings.db")).unwrap();
        let reloaded = SettingsService::new(pool);
        assert_eq!(
            reloaded.get().unwrap().timezone.as_deref(),
            Some("Europe/London")
        );
        assert_eq!(
            reloaded.clock().unwrap().timezone(),
            chrono_tz::Europe::London
        );
    }

    #[test]
    fn invalid_timezone_keeps_previous_value() {
        let (service, _guard) = setup_service();
        service.set_timezone("Asia/Tokyo").unwrap();

        let result = service.set_timezone("Not/AZone");
        assert!(matches!(result, Err(AppError::InvalidTimezone { .. })));
        assert_eq!(service.get().unwrap().timezone.as_deref(), Some("Asia/Tokyo"));
    }

    #[test]
    fn corrupt_stored_timezone_reads_as_unset() {
        let (service, _guard) = setup_service();
        service
            .db
            .with_connection(|conn| SettingsRepository::upsert(conn, KEY_TIMEZONE, "Bogus/Zone"))
            .unwrap();

        assert!(service.get().unwrap().timezone.is_none());
    }

    #[test]
    fn clear_timezone_unsets_clock() {
        let (service, _guard) = setup_service();
        service.set_timezone("UTC").unwrap();
        assert!(service.clock().is_ok());

        service.clear_timezone().unwrap();
        assert!(matches!(service.clock(), Err(AppError::TimezoneNotSet)));
    }
}
