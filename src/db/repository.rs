//! Database repository for game history.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::{DbError, GameRecord, GameStats, NewGameRecord, schema};

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database repository for finished games.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Creates a new repository for the database at the given path.
    ///
    /// The schema is not touched; see [`GameRepository::open`].
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        info!(path = %db_path, "Creating GameRepository");
        Ok(Self { db_path })
    }

    /// Creates a repository and brings the schema up to date.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, DbError> {
        let repo = Self::new(db_path)?;
        repo.run_migrations()?;
        Ok(repo)
    }

    /// Applies pending migrations.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migrations failed: {}", e)))?;
        debug!(applied = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Records a finished game.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, record), fields(winner = ?record.winner(), mode = %record.mode()))]
    pub fn record_game(&self, record: NewGameRecord) -> Result<GameRecord, DbError> {
        debug!("Recording game result");
        let mut conn = self.connection()?;

        let stored = diesel::insert_into(schema::game_records::table)
            .values(&record)
            .returning(GameRecord::as_returning())
            .get_result(&mut conn)?;

        info!(record_id = stored.id(), winner = ?stored.winner(), "Game result recorded");
        Ok(stored)
    }

    /// Most recent games first, at most `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn recent_games(&self, limit: i64) -> Result<Vec<GameRecord>, DbError> {
        let mut conn = self.connection()?;

        let records = schema::game_records::table
            .select(GameRecord::as_select())
            .order(schema::game_records::id.desc())
            .limit(limit)
            .load(&mut conn)?;

        debug!(count = records.len(), "Recent games loaded");
        Ok(records)
    }

    /// Statistics over every recorded game.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs or a row holds an
    /// unknown value.
    #[instrument(skip(self))]
    pub fn stats(&self) -> Result<GameStats, DbError> {
        let mut conn = self.connection()?;

        let records = schema::game_records::table
            .select(GameRecord::as_select())
            .order(schema::game_records::id.asc())
            .load(&mut conn)?;

        let stats = GameStats::from_records(&records)?;
        info!(
            total = stats.total_games(),
            x_wins = stats.player_x_wins(),
            o_wins = stats.player_o_wins(),
            draws = stats.draws(),
            "Stats computed"
        );
        Ok(stats)
    }

    /// Deletes every recorded game. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn reset(&self) -> Result<usize, DbError> {
        let mut conn = self.connection()?;
        let removed = diesel::delete(schema::game_records::table).execute(&mut conn)?;
        info!(removed, "Game history cleared");
        Ok(removed)
    }
}
