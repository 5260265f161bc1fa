// Error handling and edge case tests

use chrono::NaiveDate;
use scoreboard_lib::db::DbPool;
use scoreboard_lib::error::AppError;
use scoreboard_lib::models::day::{Player, ScoreUpsert};
use scoreboard_lib::services::auth_service::AuthService;
use scoreboard_lib::services::score_service::ScoreService;
use scoreboard_lib::services::settings_service::SettingsService;
use tempfile::tempdir;

fn setup_test_environment() -> (DbPool, AuthService, ScoreService, SettingsService, tempfile::TempDir) {
    let dir = tempdir().expect("temp dir");
    let db_path = dir.path().join("test.sqlite");
    let pool = DbPool::new(db_path).expect("db pool");

    let auth = AuthService::new(pool.clone());
    let scores = ScoreService::new(pool.clone());
    let settings = SettingsService::new(pool.clone());

    (pool, auth, scores, settings, dir)
}

#[test]
fn test_unknown_user_never_writes() {
    let (_pool, auth, scores, _settings, _dir) = setup_test_environment();
    auth.register_user("wjrm500", "pw", Player::UserA).unwrap();

    let result = auth.resolve_player("someone-else");
    assert!(matches!(result, Err(AppError::InvalidUser { .. })));
    assert!(scores.list_all().unwrap().is_empty());
}

#[test]
fn test_today_requires_timezone() {
    let (_pool, _auth, _scores, settings, _dir) = setup_test_environment();

    assert!(matches!(settings.clock(), Err(AppError::TimezoneNotSet)));
    assert!(matches!(
        settings.set_timezone("Atlantis/Capital"),
        Err(AppError::InvalidTimezone { .. })
    ));
    assert!(matches!(settings.clock(), Err(AppError::TimezoneNotSet)));

    settings.set_timezone("America/New_York").unwrap();
    assert!(settings.clock().is_ok());
}

#[test]
fn test_login_failures_are_distinct() {
    let (_pool, auth, _scores, _settings, _dir) = setup_test_environment();
    auth.register_user("kjem500", "pw", Player::UserB).unwrap();

    assert!(matches!(
        auth.login("ghost", "pw"),
        Err(AppError::UserNotFound { .. })
    ));
    assert!(matches!(
        auth.login("kjem500", "nope"),
        Err(AppError::PasswordIncorrect)
    ));
}

#[test]
fn test_delete_missing_day() {
    let (_pool, _auth, scores, _settings, _dir) = setup_test_environment();
    let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

    assert!(matches!(
        scores.delete_by_date(&date),
        Err(AppError::NotFound)
    ));
}

#[test]
fn test_failed_upsert_leaves_prior_state() {
    let (pool, _auth, scores, _settings, _dir) = setup_test_environment();
    let today = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let fresh_date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();

    scores
        .upsert_score(
            &ScoreUpsert {
                date,
                score: 5,
                player: Player::UserA,
            },
            today,
        )
        .unwrap();

    pool.with_connection(|conn| {
        conn.execute_batch(
            r#"
            CREATE TRIGGER reject_large_update BEFORE UPDATE ON days
            WHEN NEW.score_a > 10 OR NEW.score_b > 10
            BEGIN
                SELECT RAISE(ABORT, 'score too large');
            END;
            CREATE TRIGGER reject_large_insert AFTER INSERT ON days
            WHEN NEW.score_a > 10 OR NEW.score_b > 10
            BEGIN
                SELECT RAISE(ABORT, 'score too large');
            END;
            "#,
        )?;
        Ok(())
    })
    .unwrap();

    let update = scores.upsert_score(
        &ScoreUpsert {
            date,
            score: 99,
            player: Player::UserB,
        },
        today,
    );
    assert!(update.is_err());

    let stored = scores.get_by_date(&date).unwrap().unwrap();
    assert_eq!((stored.score_a, stored.score_b), (Some(5), Some(8)));

    let insert = scores.upsert_score(
        &ScoreUpsert {
            date: fresh_date,
            score: 99,
            player: Player::UserA,
        },
        today,
    );
    assert!(insert.is_err());
    assert!(scores.get_by_date(&fresh_date).unwrap().is_none());
    assert_eq!(scores.list_all().unwrap().len(), 1);
}

#[test]
fn test_malformed_stored_date_is_reported() {
    let (pool, _auth, scores, _settings, _dir) = setup_test_environment();
    pool.with_connection(|conn| {
        conn.execute("INSERT INTO days (date, score_a) VALUES ('yesterday', 1)", [])?;
        Ok(())
    })
    .unwrap();

    assert!(matches!(
        scores.list_all(),
        Err(AppError::Database { .. })
    ));
}

#[test]
fn test_out_of_range_stored_year_is_reported() {
    let (pool, _auth, scores, _settings, _dir) = setup_test_environment();
    pool.with_connection(|conn| {
        conn.execute("INSERT INTO days (date, score_a) VALUES ('0024-03-01', 1)", [])?;
        Ok(())
    })
    .unwrap();

    let today = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
    assert!(matches!(
        scores.weekly_view(today),
        Err(AppError::Database { .. })
    ));
}
