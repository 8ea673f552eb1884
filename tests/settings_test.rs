//! Tests for settings persistence.

use std::path::PathBuf;
use tempfile::TempDir;
use tictactoe::{GameMode, GameSettings, SETTINGS_FILE};
use tictactoe_engine::{Difficulty, Mark};

fn settings_path(dir: &TempDir) -> PathBuf {
    dir.path().join("nested").join(SETTINGS_FILE)
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let settings = GameSettings::load(settings_path(&dir)).expect("Load failed");
    assert_eq!(settings, GameSettings::default());
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = settings_path(&dir);
    let settings = GameSettings::default()
        .with_turn_time(25)
        .with_game_mode(GameMode::Pvc)
        .with_difficulty(Difficulty::Hard)
        .with_ai_mark(Mark::X)
        .with_ai_delay(false);

    settings.save(&path).expect("Save failed");
    let loaded = GameSettings::load(&path).expect("Load failed");
    assert_eq!(loaded, settings);
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join(SETTINGS_FILE);
    std::fs::write(&path, "game_mode = \"pvc\"\n").expect("Write failed");

    let loaded = GameSettings::load(&path).expect("Load failed");
    assert_eq!(*loaded.game_mode(), GameMode::Pvc);
    assert_eq!(*loaded.turn_time(), 15);
    assert_eq!(*loaded.difficulty(), Difficulty::Medium);
}

#[test]
fn test_out_of_range_turn_time_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join(SETTINGS_FILE);
    std::fs::write(&path, "turn_time = 60\n").expect("Write failed");

    let err = GameSettings::load(&path).unwrap_err();
    assert!(err.message.contains("turn_time"));
    assert!(GameSettings::default().with_turn_time(2).save(&path).is_err());
}

#[test]
fn test_malformed_file_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join(SETTINGS_FILE);
    std::fs::write(&path, "difficulty = \"impossible\"\n").expect("Write failed");
    assert!(GameSettings::load(&path).is_err());
}
