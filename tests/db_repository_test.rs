//! Tests for database repository operations.

use diesel::Connection;
use diesel::SqliteConnection;
use diesel_migrations::MigrationHarness;
use std::time::Duration;
use tempfile::NamedTempFile;

use tictactoe::{
    GameMode, GameRepository, GameSummary, MIGRATIONS, NewGameRecord, StatsService, Streak,
};
use tictactoe_engine::{Board, Difficulty, Mark, evaluate};

/// Creates a temporary database file with schema applied, returns the file
/// handle (must stay in scope to keep the file alive) and a ready repository.
fn setup_test_db() -> (NamedTempFile, GameRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let mut conn = SqliteConnection::establish(&db_path).expect("Failed to connect");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Migrations failed");

    let repo = GameRepository::new(db_path).expect("Failed to create repository");
    (db_file, repo)
}

fn pvp(winner: Option<Mark>, secs: u64) -> NewGameRecord {
    NewGameRecord::new(winner, 7, secs, GameMode::Pvp, Difficulty::Medium, Mark::O)
}

#[test]
fn test_record_game() {
    let (_db, repo) = setup_test_db();
    let record = repo.record_game(pvp(Some(Mark::X), 12)).expect("Record failed");
    assert!(*record.id() > 0);
    assert_eq!(record.winner().as_deref(), Some("X"));
    assert_eq!(record.parse_winner().expect("Parse failed"), Some(Mark::X));
    assert_eq!(*record.duration_secs(), 12);
}

#[test]
fn test_recent_games_newest_first_and_limited() {
    let (_db, repo) = setup_test_db();
    for secs in 1..=12 {
        repo.record_game(pvp(None, secs)).expect("Record failed");
    }

    let recent = repo.recent_games(10).expect("Query failed");
    assert_eq!(recent.len(), 10);
    assert_eq!(*recent[0].duration_secs(), 12);
    assert_eq!(*recent[9].duration_secs(), 3);
}

#[test]
fn test_stats_empty() {
    let (_db, repo) = setup_test_db();
    let stats = repo.stats().expect("Stats failed");
    assert_eq!(*stats.total_games(), 0);
    assert_eq!(*stats.average_game_time(), 0);
    assert_eq!(*stats.current_streak(), None);
}

#[test]
fn test_stats_aggregate_in_play_order() {
    let (_db, repo) = setup_test_db();
    repo.record_game(pvp(Some(Mark::O), 20)).expect("Record failed");
    repo.record_game(pvp(Some(Mark::X), 10)).expect("Record failed");
    repo.record_game(pvp(Some(Mark::X), 15)).expect("Record failed");
    repo.record_game(NewGameRecord::new(
        Some(Mark::O),
        6,
        30,
        GameMode::Pvc,
        Difficulty::Hard,
        Mark::O,
    ))
    .expect("Record failed");
    repo.record_game(NewGameRecord::new(
        None,
        9,
        40,
        GameMode::Pvc,
        Difficulty::Hard,
        Mark::O,
    ))
    .expect("Record failed");

    let stats = repo.stats().expect("Stats failed");
    assert_eq!(*stats.total_games(), 5);
    assert_eq!(*stats.player_x_wins(), 2);
    assert_eq!(*stats.player_o_wins(), 2);
    assert_eq!(*stats.draws(), 1);
    assert_eq!(*stats.current_streak(), None);
    // (20 + 10 + 15 + 30 + 40) / 5 = 23
    assert_eq!(*stats.average_game_time(), 23);
    assert_eq!(*stats.games_vs_ai(), 2);
    assert_eq!(*stats.ai_wins(), 1);
    assert_eq!(*stats.player_wins(), 0);
    assert_eq!(stats.win_rate_vs_ai(), 0);
}

#[test]
fn test_streak_across_records() {
    let (_db, repo) = setup_test_db();
    repo.record_game(pvp(Some(Mark::O), 5)).expect("Record failed");
    repo.record_game(pvp(Some(Mark::X), 5)).expect("Record failed");
    repo.record_game(pvp(Some(Mark::X), 5)).expect("Record failed");

    let stats = repo.stats().expect("Stats failed");
    assert_eq!(
        *stats.current_streak(),
        Some(Streak {
            player: Mark::X,
            count: 2
        })
    );
}

#[test]
fn test_reset_clears_everything() {
    let (_db, repo) = setup_test_db();
    repo.record_game(pvp(Some(Mark::X), 5)).expect("Record failed");
    repo.record_game(pvp(None, 5)).expect("Record failed");

    assert_eq!(repo.reset().expect("Reset failed"), 2);
    assert!(repo.recent_games(10).expect("Query failed").is_empty());
    assert_eq!(*repo.stats().expect("Stats failed").total_games(), 0);
}

#[test]
fn test_open_runs_migrations() {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let repo = GameRepository::open(db_path.clone()).expect("Open failed");
    repo.record_game(pvp(None, 1)).expect("Record failed");
    // Reopening leaves existing rows alone.
    let again = GameRepository::open(db_path).expect("Reopen failed");
    assert_eq!(again.recent_games(10).expect("Query failed").len(), 1);
}

#[test]
fn test_stats_service_records_summary() {
    let (_db, repo) = setup_test_db();
    let service = StatsService::new(repo);
    let board: Board = "XOO.X...X".parse().expect("Parse failed");
    let summary = GameSummary::new(
        evaluate(&board),
        5,
        Duration::from_millis(8_900),
        GameMode::Pvc,
        Difficulty::Easy,
        Mark::O,
    );

    let record = service.record(&summary).expect("Record failed");
    assert_eq!(*record.duration_secs(), 8);
    assert_eq!(record.parse_mode().expect("Parse failed"), GameMode::Pvc);
    assert_eq!(record.parse_difficulty().expect("Parse failed"), Difficulty::Easy);

    let stats = service.stats().expect("Stats failed");
    assert_eq!(*stats.player_wins(), 1);
    assert_eq!(stats.win_rate_vs_ai(), 100);
    assert_eq!(service.history(10).expect("History failed").len(), 1);
}
