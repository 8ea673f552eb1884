//! Database models and domain types.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use diesel::prelude::*;
use std::str::FromStr;
use tictactoe_engine::{Difficulty, Mark};
use tracing::instrument;

use crate::db::{DbError, schema};
use crate::game::GameMode;

/// A finished game as stored in the database.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::game_records)]
pub struct GameRecord {
    id: i32,
    winner: Option<String>,
    moves: i32,
    duration_secs: i32,
    mode: String,
    difficulty: String,
    ai_mark: String,
    played_at: NaiveDateTime,
}

impl GameRecord {
    /// Parses the stored winner; `None` is a draw.
    pub fn parse_winner(&self) -> Result<Option<Mark>, DbError> {
        self.winner.as_deref().map(parse_column).transpose()
    }

    /// Parses the stored game mode.
    pub fn parse_mode(&self) -> Result<GameMode, DbError> {
        parse_column(&self.mode)
    }

    /// Parses the stored difficulty.
    pub fn parse_difficulty(&self) -> Result<Difficulty, DbError> {
        parse_column(&self.difficulty)
    }

    /// Parses the stored computer mark.
    pub fn parse_ai_mark(&self) -> Result<Mark, DbError> {
        parse_column(&self.ai_mark)
    }

    /// Mark the computer played, `None` in two-player games.
    pub fn computer_mark(&self) -> Result<Option<Mark>, DbError> {
        match self.parse_mode()? {
            GameMode::Pvc => Ok(Some(self.parse_ai_mark()?)),
            GameMode::Pvp => Ok(None),
        }
    }
}

#[track_caller]
fn parse_column<T: FromStr>(value: &str) -> Result<T, DbError> {
    value
        .parse()
        .map_err(|_| DbError::new(format!("Invalid stored value: '{}'", value)))
}

/// Insertable record of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Insertable, Getters)]
#[diesel(table_name = schema::game_records)]
pub struct NewGameRecord {
    winner: Option<String>,
    moves: i32,
    duration_secs: i32,
    mode: String,
    difficulty: String,
    ai_mark: String,
}

impl NewGameRecord {
    /// Creates a record from domain values.
    pub fn new(
        winner: Option<Mark>,
        moves: usize,
        duration_secs: u64,
        mode: GameMode,
        difficulty: Difficulty,
        ai_mark: Mark,
    ) -> Self {
        Self {
            winner: winner.map(|m| m.to_string()),
            moves: i32::try_from(moves).unwrap_or(i32::MAX),
            duration_secs: i32::try_from(duration_secs).unwrap_or(i32::MAX),
            mode: mode.to_string(),
            difficulty: difficulty.to_string(),
            ai_mark: ai_mark.to_string(),
        }
    }
}

/// Consecutive wins by the same mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Streak {
    /// Mark on the streak.
    pub player: Mark,
    /// Games won in a row.
    pub count: u32,
}

/// Aggregate statistics over the game history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct GameStats {
    total_games: u32,
    player_x_wins: u32,
    player_o_wins: u32,
    draws: u32,
    current_streak: Option<Streak>,
    /// Mean game length in whole seconds (rounded).
    average_game_time: u64,
    ai_wins: u32,
    player_wins: u32,
    games_vs_ai: u32,
    #[getter(skip)]
    total_time: u64,
}

impl GameStats {
    /// Folds records, oldest first, into statistics.
    #[instrument(skip(records), fields(count = records.len()))]
    pub fn from_records(records: &[GameRecord]) -> Result<Self, DbError> {
        let mut stats = Self::default();
        for record in records {
            stats.record(
                record.parse_winner()?,
                u64::try_from(record.duration_secs).unwrap_or(0),
                record.computer_mark()?,
            );
        }
        Ok(stats)
    }

    /// Adds one finished game. `computer` is the computer's mark in `pvc`.
    pub fn record(&mut self, winner: Option<Mark>, duration_secs: u64, computer: Option<Mark>) {
        self.total_games += 1;
        self.total_time += duration_secs;
        let total = u64::from(self.total_games);
        self.average_game_time = (self.total_time + total / 2) / total;

        match winner {
            Some(Mark::X) => self.player_x_wins += 1,
            Some(Mark::O) => self.player_o_wins += 1,
            None => self.draws += 1,
        }

        self.current_streak = match (winner, self.current_streak) {
            (None, _) => None,
            (Some(w), Some(streak)) if streak.player == w => Some(Streak {
                player: w,
                count: streak.count + 1,
            }),
            (Some(w), _) => Some(Streak { player: w, count: 1 }),
        };

        if let Some(ai) = computer {
            self.games_vs_ai += 1;
            match winner {
                Some(w) if w == ai => self.ai_wins += 1,
                Some(_) => self.player_wins += 1,
                None => {}
            }
        }
    }

    /// Human win percentage against the computer, rounded.
    pub fn win_rate_vs_ai(&self) -> u32 {
        if self.games_vs_ai == 0 {
            0
        } else {
            (self.player_wins * 100 + self.games_vs_ai / 2) / self.games_vs_ai
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streak_grows_resets_and_clears() {
        let mut stats = GameStats::default();
        stats.record(Some(Mark::X), 10, None);
        stats.record(Some(Mark::X), 10, None);
        assert_eq!(
            *stats.current_streak(),
            Some(Streak { player: Mark::X, count: 2 })
        );
        stats.record(Some(Mark::O), 10, None);
        assert_eq!(
            *stats.current_streak(),
            Some(Streak { player: Mark::O, count: 1 })
        );
        stats.record(None, 10, None);
        assert_eq!(*stats.current_streak(), None);
        assert_eq!(*stats.draws(), 1);
    }

    #[test]
    fn test_average_is_rounded_mean() {
        let mut stats = GameStats::default();
        stats.record(None, 10, None);
        stats.record(None, 11, None);
        // 10.5 rounds up.
        assert_eq!(*stats.average_game_time(), 11);
        stats.record(None, 10, None);
        // 31 / 3 = 10.33
        assert_eq!(*stats.average_game_time(), 10);
    }

    #[test]
    fn test_versus_ai_counts_only_pvc() {
        let mut stats = GameStats::default();
        stats.record(Some(Mark::O), 5, Some(Mark::O));
        stats.record(Some(Mark::X), 5, Some(Mark::O));
        stats.record(None, 5, Some(Mark::O));
        stats.record(Some(Mark::X), 5, None);
        assert_eq!(*stats.games_vs_ai(), 3);
        assert_eq!(*stats.ai_wins(), 1);
        assert_eq!(*stats.player_wins(), 1);
        assert_eq!(stats.win_rate_vs_ai(), 33);
        assert_eq!(*stats.total_games(), 4);
    }

    #[test]
    fn test_win_rate_without_games() {
        assert_eq!(GameStats::default().win_rate_vs_ai(), 0);
    }

    #[test]
    fn test_new_record_text_columns() {
        let record = NewGameRecord::new(
            Some(Mark::O),
            7,
            42,
            GameMode::Pvc,
            Difficulty::Hard,
            Mark::O,
        );
        assert_eq!(record.winner().as_deref(), Some("O"));
        assert_eq!(record.mode(), "pvc");
        assert_eq!(record.difficulty(), "hard");
        assert_eq!(*record.moves(), 7);
    }
}
