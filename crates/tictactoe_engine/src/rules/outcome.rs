//! Position classification.

use super::win::{WinningLine, find_winner};
use crate::types::{Board, Mark};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Result of evaluating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// A player completed a triple.
    Won {
        /// The winning mark.
        winner: Mark,
        /// The completed triple.
        line: WinningLine,
    },
    /// Board full, no triple.
    Draw,
    /// Moves remain and nobody has won.
    InProgress,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Won { winner, .. } => Some(*winner),
            _ => None,
        }
    }

    /// Returns the winning triple if there is one.
    pub fn winning_line(&self) -> Option<WinningLine> {
        match self {
            Outcome::Won { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }

    /// Returns true once no further moves may be made.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Won { winner, line } => write!(f, "Player {} wins ({})", winner, line),
            Outcome::Draw => write!(f, "Draw"),
            Outcome::InProgress => write!(f, "In progress"),
        }
    }
}

/// Classifies a board: win first, then draw, otherwise in progress.
#[instrument(level = "trace", skip(board), fields(board = %board))]
pub fn evaluate(board: &Board) -> Outcome {
    if let Some((winner, line)) = find_winner(board) {
        return Outcome::Won { winner, line };
    }
    if board.is_full() {
        return Outcome::Draw;
    }
    Outcome::InProgress
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_board_with_winner_is_not_draw() {
        // X wins the top row on the last move.
        let board: Board = "XXXOOXXOO".parse().unwrap();
        let outcome = evaluate(&board);
        assert_eq!(outcome.winner(), Some(Mark::X));
        assert!(!outcome.is_draw());
    }

    #[test]
    fn test_in_progress() {
        let board: Board = "X...O....".parse().unwrap();
        assert_eq!(evaluate(&board), Outcome::InProgress);
        assert!(!evaluate(&board).is_terminal());
    }

    #[test]
    fn test_display() {
        assert_eq!(Outcome::Draw.to_string(), "Draw");
        let board: Board = "OOO.XX.X.".parse().unwrap();
        assert_eq!(evaluate(&board).to_string(), "Player O wins (0-1-2)");
    }
}
