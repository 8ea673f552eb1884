//! Statistics business logic layer.

use tracing::{debug, info, instrument};

use crate::db::{DbError, GameRecord, GameRepository, GameStats, NewGameRecord};
use crate::orchestrator::GameSummary;

/// Number of games shown in the history view.
pub const HISTORY_LEN: i64 = 10;

/// Service layer between finished games and the history database.
#[derive(Debug, Clone)]
pub struct StatsService {
    repository: GameRepository,
}

impl StatsService {
    /// Creates a new stats service backed by the given repository.
    #[instrument(skip(repository))]
    pub fn new(repository: GameRepository) -> Self {
        info!("Creating StatsService");
        Self { repository }
    }

    /// Returns the underlying repository.
    pub fn repository(&self) -> &GameRepository {
        &self.repository
    }

    /// Converts a finished game into a stored record.
    ///
    /// Duration is stored in whole seconds, truncated.
    pub fn to_record(summary: &GameSummary) -> NewGameRecord {
        NewGameRecord::new(
            summary.winner(),
            *summary.moves(),
            summary.duration().as_secs(),
            *summary.mode(),
            *summary.difficulty(),
            *summary.ai_mark(),
        )
    }

    /// Records a finished game.
    #[instrument(skip(self, summary), fields(outcome = %summary.outcome()))]
    pub fn record(&self, summary: &GameSummary) -> Result<GameRecord, DbError> {
        debug!(moves = summary.moves(), mode = %summary.mode(), "Recording game");
        self.repository.record_game(Self::to_record(summary))
    }

    /// Aggregate statistics over all recorded games.
    #[instrument(skip(self))]
    pub fn stats(&self) -> Result<GameStats, DbError> {
        self.repository.stats()
    }

    /// The last `limit` games, newest first.
    #[instrument(skip(self))]
    pub fn history(&self, limit: i64) -> Result<Vec<GameRecord>, DbError> {
        self.repository.recent_games(limit)
    }

    /// Clears statistics and history.
    #[instrument(skip(self))]
    pub fn reset(&self) -> Result<usize, DbError> {
        self.repository.reset()
    }
}
