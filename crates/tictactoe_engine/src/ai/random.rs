//! Uniform random move selection.

use crate::types::Board;
use rand::Rng;

/// Picks uniformly among the empty cells. `None` on a full board.
pub fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<usize> {
    let available: Vec<usize> = board.empty_cells().collect();
    if available.is_empty() {
        return None;
    }
    Some(available[rng.random_range(0..available.len())])
}
