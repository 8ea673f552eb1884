//! Computer opponent.
//!
//! The engine is stateless between calls: every decision is a function of
//! the board passed in plus the injected random source. Difficulty selects
//! the policy:
//!
//! - **easy**: uniform random empty cell
//! - **medium**: heuristic ladder most of the time, random otherwise
//! - **hard**: minimax with alpha-beta pruning (never loses)

pub mod heuristic;
pub mod minimax;
pub mod random;

use crate::types::{Board, Difficulty, Mark};
use rand::Rng;
use tracing::{debug, instrument};

/// Computer player with a fixed difficulty and mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiPlayer {
    difficulty: Difficulty,
    mark: Mark,
    opponent: Mark,
}

impl AiPlayer {
    /// Creates an AI playing `mark` at the given difficulty.
    pub fn new(difficulty: Difficulty, mark: Mark) -> Self {
        Self {
            difficulty,
            mark,
            opponent: mark.opponent(),
        }
    }

    /// The difficulty tier.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// The AI's own mark.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// The mark the AI plays against.
    pub fn opponent(&self) -> Mark {
        self.opponent
    }

    /// Picks a cell for the AI's next move.
    ///
    /// Must only be called when it is the AI's turn. Returns `None` only when
    /// the board has no empty cell; otherwise the index of an empty cell.
    /// The hard tier is deterministic and ignores `rng`.
    #[instrument(skip(self, board, rng), fields(difficulty = %self.difficulty, mark = %self.mark, board = %board))]
    pub fn choose_move<R: Rng + ?Sized>(&self, board: &Board, rng: &mut R) -> Option<usize> {
        if board.is_full() {
            debug!("No empty cell, no move available");
            return None;
        }

        let choice = match self.difficulty {
            Difficulty::Easy => random::random_move(board, rng),
            Difficulty::Medium => heuristic::medium_move(board, self.mark, self.opponent, rng),
            // A board that is already won still has empty cells; fall back to
            // a random one so callers always get a legal index.
            Difficulty::Hard => minimax::best_move(board, self.mark)
                .or_else(|| random::random_move(board, rng)),
        };

        debug!(choice = ?choice, "AI chose move");
        choice
    }
}

/// Picks a move for `ai_mark` at the given difficulty.
pub fn choose_move<R: Rng + ?Sized>(
    board: &Board,
    difficulty: Difficulty,
    ai_mark: Mark,
    rng: &mut R,
) -> Option<usize> {
    AiPlayer::new(difficulty, ai_mark).choose_move(board, rng)
}
