//! Player trait and implementations.

mod computer;
mod human;

pub use computer::ComputerPlayer;
pub use human::{HumanPlayer, InputClosed};

use anyhow::Result;
use tictactoe_engine::Board;

/// Trait for players that can make moves.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Gets a move from this player.
    ///
    /// Returns the board index (0-8) of an empty cell.
    async fn get_move(&mut self, board: &Board) -> Result<usize>;

    /// Returns the player's display name.
    fn name(&self) -> &str;

    /// Whether this player's turns run against the turn timer.
    fn is_timed(&self) -> bool;
}
