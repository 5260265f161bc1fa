//! End-to-end flows over the score store and the weekly calendar view.
//!
//! "Today" is passed explicitly so the scenarios are reproducible.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use scoreboard_lib::db::DbPool;
use scoreboard_lib::models::day::{Player, ScoreUpsert};
use scoreboard_lib::models::week::WeekBucket;
use scoreboard_lib::services::auth_service::AuthService;
use scoreboard_lib::services::score_service::ScoreService;
use tempfile::{tempdir, TempDir};

fn setup_test_env() -> (ScoreService, AuthService, TempDir) {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("scoreboard.db");
    let db = DbPool::new(&db_path).expect("Failed to create test database");

    let auth = AuthService::new(db.clone());
    auth.register_user("wjrm500", "pw-a", Player::UserA)
        .expect("register user a");
    auth.register_user("kjem500", "pw-b", Player::UserB)
        .expect("register user b");

    (ScoreService::new(db), auth, temp_dir)
}

fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

fn find<'a>(weeks: &'a [WeekBucket], raw: &str) -> (Option<i64>, Option<i64>) {
    weeks
        .iter()
        .flat_map(|week| week.rows())
        .find(|row| row.date == raw)
        .map(|row| (row.score_a, row.score_b))
        .unwrap_or_else(|| panic!("missing row {raw}"))
}

#[test]
fn test_empty_store_single_week() {
    let (scores, _auth, _dir) = setup_test_env();
    let weeks = scores.weekly_view(date("2024-03-06")).unwrap();

    assert_eq!(weeks.len(), 1);
    let dates: Vec<&str> = weeks[0].rows().iter().map(|row| row.date.as_str()).collect();
    assert_eq!(
        dates,
        vec![
            "2024-03-04",
            "2024-03-05",
            "2024-03-06",
            "2024-03-07",
            "2024-03-08",
            "2024-03-09",
            "2024-03-10"
        ]
    );
    assert!(weeks[0]
        .rows()
        .iter()
        .all(|row| row.score_a.is_none() && row.score_b.is_none()));
}

#[test]
fn test_username_resolves_to_player_and_round_trips() {
    let (scores, auth, _dir) = setup_test_env();
    let today = date("2024-03-06");

    let player = auth.resolve_player("wjrm500").unwrap();
    scores
        .upsert_score(
            &ScoreUpsert {
                date: date("2024-03-01"),
                score: 5,
                player,
            },
            today,
        )
        .unwrap();

    let weeks = scores.weekly_view(today).unwrap();
    assert_eq!(weeks.len(), 2);
    assert_eq!(weeks[0].first_date(), "2024-02-26");
    assert_eq!(find(&weeks, "2024-03-01"), (Some(5), Some(8)));
    assert_eq!(find(&weeks, "2024-02-29"), (Some(8), Some(8)));
    assert_eq!(find(&weeks, "2024-03-06"), (None, None));
    assert_eq!(find(&weeks, "2024-03-10"), (None, None));

    let opponent = auth.resolve_player("kjem500").unwrap();
    scores
        .upsert_score(
            &ScoreUpsert {
                date: date("2024-03-01"),
                score: 3,
                player: opponent,
            },
            today,
        )
        .unwrap();

    let weeks = scores.weekly_view(today).unwrap();
    assert_eq!(find(&weeks, "2024-03-01"), (Some(5), Some(3)));
}

#[test]
fn test_today_entry_is_hidden_until_tomorrow() {
    let (scores, _auth, _dir) = setup_test_env();
    let today = date("2024-03-06");

    scores
        .upsert_score(
            &ScoreUpsert {
                date: today,
                score: 7,
                player: Player::UserB,
            },
            today,
        )
        .unwrap();

    let stored = scores.get_by_date(&today).unwrap().unwrap();
    assert_eq!((stored.score_a, stored.score_b), (None, Some(7)));

    let weeks = scores.weekly_view(today).unwrap();
    assert_eq!(find(&weeks, "2024-03-06"), (None, None));

    let tomorrow = today + Duration::days(1);
    let weeks = scores.weekly_view(tomorrow).unwrap();
    assert_eq!(find(&weeks, "2024-03-06"), (Some(8), Some(7)));
}

#[test]
fn test_view_spans_from_earliest_week_without_gaps() {
    let (scores, _auth, _dir) = setup_test_env();
    let today = date("2024-03-06");

    for (raw, player) in [
        ("2024-02-14", Player::UserA),
        ("2024-01-31", Player::UserB),
        ("2024-02-28", Player::UserA),
    ] {
        scores
            .upsert_score(
                &ScoreUpsert {
                    date: date(raw),
                    score: 4,
                    player,
                },
                today,
            )
            .unwrap();
    }

    let weeks = scores.weekly_view(today).unwrap();
    let first = date(weeks[0].first_date());
    assert_eq!(first.weekday(), Weekday::Mon);
    assert_eq!(first, date("2024-01-29"));

    let mut expected = first;
    for week in &weeks {
        assert_eq!(week.rows().len(), 7);
        for row in week.rows() {
            assert_eq!(row.date, expected.format("%Y-%m-%d").to_string());
            expected += Duration::days(1);
        }
    }
    assert_eq!(expected, date("2024-03-11"));
}

#[test]
fn test_delete_all_resets_view() {
    let (scores, _auth, _dir) = setup_test_env();
    let today = date("2024-03-06");

    scores
        .upsert_score(
            &ScoreUpsert {
                date: date("2024-01-02"),
                score: 9,
                player: Player::UserA,
            },
            today,
        )
        .unwrap();
    assert!(scores.weekly_view(today).unwrap().len() > 1);

    scores.delete_all().unwrap();

    let weeks = scores.weekly_view(today).unwrap();
    assert_eq!(weeks.len(), 1);
    assert_eq!(weeks[0].first_date(), "2024-03-04");
    assert!(weeks[0]
        .rows()
        .iter()
        .all(|row| row.score_a.is_none() && row.score_b.is_none()));
}
