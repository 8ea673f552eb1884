//! Timed tic-tac-toe with a computer opponent and persisted statistics.
//!
//! Board rules and the AI live in [`tictactoe_engine`]; this crate adds the
//! game session around them.
//!
//! # Architecture
//!
//! - **Game**: [`Game`] applies moves and turn skips on top of the engine board
//! - **Driver**: [`Orchestrator`] runs [`Player`]s against the turn timer and
//!   reports [`GameEvent`]s
//! - **Settings**: [`GameSettings`] stored as TOML
//! - **History**: [`GameRepository`] (SQLite) and [`StatsService`]
//!
//! # Example
//!
//! ```no_run
//! use tictactoe::{ComputerPlayer, GameSettings, Orchestrator};
//! use tictactoe_engine::{Difficulty, Mark};
//! use std::time::Duration;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let x = ComputerPlayer::new(Difficulty::Hard, Mark::X, Duration::ZERO, Some(1));
//! let o = ComputerPlayer::new(Difficulty::Hard, Mark::O, Duration::ZERO, Some(2));
//! let (event_tx, _events) = tokio::sync::mpsc::unbounded_channel();
//!
//! let mut orchestrator =
//!     Orchestrator::new(Box::new(x), Box::new(o), GameSettings::default(), event_tx);
//! let summary = orchestrator.run().await?;
//! assert_eq!(summary.winner(), None);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod db;
mod error;
mod game;
mod orchestrator;
mod players;
mod settings;
mod simulate;
mod stats_service;
pub mod terminal;

// Crate-level exports - Game model
pub use game::{Game, GameMode, Move, MoveError};

// Crate-level exports - Driver
pub use orchestrator::{GameEvent, GameSummary, Orchestrator};
pub use players::{ComputerPlayer, HumanPlayer, InputClosed, Player};

// Crate-level exports - Settings
pub use settings::{
    ConfigError, DATA_DIR_ENV, DEFAULT_DATA_DIR, GameSettings, MAX_TURN_TIME, MIN_TURN_TIME,
    SETTINGS_FILE, ai_delay_for, resolve_data_dir,
};

// Crate-level exports - Errors
pub use error::ErrorLocation;

// Crate-level exports - Persistence
pub use db::{DbError, GameRecord, GameRepository, GameStats, MIGRATIONS, NewGameRecord, Streak};
pub use stats_service::{HISTORY_LEN, StatsService};

// Crate-level exports - Tournaments
pub use simulate::{TournamentResult, play_out, simulate};
