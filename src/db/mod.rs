//! Game history persistence and statistics.

mod error;
mod models;
mod repository;
mod schema;

pub use error::DbError;
pub use models::{GameRecord, GameStats, NewGameRecord, Streak};
pub use repository::{GameRepository, MIGRATIONS};
