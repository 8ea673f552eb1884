//! tictactoe - command-line entry point.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::{Path, PathBuf};
use tictactoe::{
    GameRepository, GameSettings, SETTINGS_FILE, StatsService, resolve_data_dir, simulate,
    terminal,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

/// Default log filter when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "warn,tictactoe=info";
/// History database file name inside the data directory.
const DB_FILE: &str = "history.db";
/// Log file used by interactive play.
const LOG_FILE: &str = "tictactoe.log";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let data_dir = resolve_data_dir(cli.data_dir);

    match cli.command {
        Command::Play {
            mode,
            difficulty,
            turn_time,
            ai_mark,
            seed,
            no_record,
        } => {
            init_file_tracing(&data_dir)?;
            let mut settings = load_settings(&data_dir)?;
            if let Some(mode) = mode {
                settings = settings.with_game_mode(mode);
            }
            if let Some(difficulty) = difficulty {
                settings = settings.with_difficulty(difficulty);
            }
            if let Some(turn_time) = turn_time {
                settings = settings.with_turn_time(turn_time);
            }
            if let Some(ai_mark) = ai_mark {
                settings = settings.with_ai_mark(ai_mark);
            }
            settings.validate()?;

            let stats = if no_record {
                None
            } else {
                Some(open_stats(&data_dir)?)
            };
            terminal::play_session(settings, seed, stats).await
        }
        Command::Stats { history } => {
            init_stderr_tracing();
            let service = open_stats(&data_dir)?;
            let stats = service.stats()?;
            let recent = service.history(history)?;
            print!("{}", terminal::render_stats(&stats, &recent));
            Ok(())
        }
        Command::ResetStats => {
            init_stderr_tracing();
            let removed = open_stats(&data_dir)?.reset()?;
            println!("Removed {} recorded games.", removed);
            Ok(())
        }
        Command::Settings {
            turn_time,
            mode,
            difficulty,
            ai_mark,
            ai_delay,
            reset,
        } => {
            init_stderr_tracing();
            let mut settings = if reset {
                GameSettings::default()
            } else {
                load_settings(&data_dir)?
            };
            let changed = reset
                || turn_time.is_some()
                || mode.is_some()
                || difficulty.is_some()
                || ai_mark.is_some()
                || ai_delay.is_some();

            if let Some(turn_time) = turn_time {
                settings = settings.with_turn_time(turn_time);
            }
            if let Some(mode) = mode {
                settings = settings.with_game_mode(mode);
            }
            if let Some(difficulty) = difficulty {
                settings = settings.with_difficulty(difficulty);
            }
            if let Some(ai_mark) = ai_mark {
                settings = settings.with_ai_mark(ai_mark);
            }
            if let Some(ai_delay) = ai_delay {
                settings = settings.with_ai_delay(ai_delay);
            }

            if changed {
                settings.save(settings_path(&data_dir))?;
            }
            print!("{}", terminal::render_settings(&settings));
            Ok(())
        }
        Command::Simulate { x, o, games, seed } => {
            init_stderr_tracing();
            let result = simulate(x, o, games, seed)?;
            println!("X ({}) vs O ({}): {}", x, o, result);
            Ok(())
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Logs to stderr.
fn init_stderr_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Logs to a file so output does not interleave with the board.
fn init_file_tracing(data_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;
    let log_file = std::fs::File::create(data_dir.join(LOG_FILE))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SETTINGS_FILE)
}

fn load_settings(data_dir: &Path) -> Result<GameSettings> {
    Ok(GameSettings::load(settings_path(data_dir))?)
}

#[instrument(skip(data_dir), fields(data_dir = %data_dir.display()))]
fn open_stats(data_dir: &Path) -> Result<StatsService> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;
    let db_path = data_dir.join(DB_FILE);
    info!(db = %db_path.display(), "Opening history database");
    let repository = GameRepository::open(db_path.to_string_lossy().into_owned())?;
    Ok(StatsService::new(repository))
}
