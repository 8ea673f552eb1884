//! Command-line interface for tictactoe.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictactoe::GameMode;
use tictactoe_engine::{Difficulty, Mark};

/// Tic-tac-toe in the terminal, against a friend or the computer
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Timed tic-tac-toe with a minimax opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory for settings, game history and logs
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively (settings flags override the saved settings)
    Play {
        /// pvp or pvc
        #[arg(long)]
        mode: Option<GameMode>,

        /// easy, medium or hard
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// Seconds per human turn (5-30)
        #[arg(long)]
        turn_time: Option<u32>,

        /// Mark played by the computer
        #[arg(long)]
        ai_mark: Option<Mark>,

        /// Fix RNG seed for reproducible computer moves
        #[arg(long)]
        seed: Option<u64>,

        /// Do not save results to the history
        #[arg(long)]
        no_record: bool,
    },

    /// Show statistics and recent games
    Stats {
        /// Number of recent games to list
        #[arg(long, default_value_t = tictactoe::HISTORY_LEN)]
        history: i64,
    },

    /// Delete all statistics and history
    ResetStats,

    /// Show or change the saved settings
    Settings {
        /// Seconds per human turn (5-30)
        #[arg(long)]
        turn_time: Option<u32>,

        /// pvp or pvc
        #[arg(long)]
        mode: Option<GameMode>,

        /// easy, medium or hard
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// Mark played by the computer
        #[arg(long)]
        ai_mark: Option<Mark>,

        /// Pause before computer moves
        #[arg(long)]
        ai_delay: Option<bool>,

        /// Restore defaults before applying other flags
        #[arg(long)]
        reset: bool,
    },

    /// Pit two computer players against each other
    Simulate {
        /// Difficulty of X
        #[arg(long)]
        x: Difficulty,

        /// Difficulty of O
        #[arg(long)]
        o: Difficulty,

        /// Number of games
        #[arg(long, default_value_t = 100)]
        games: u32,

        /// Fix RNG seed for reproducible results
        #[arg(long)]
        seed: Option<u64>,
    },
}
