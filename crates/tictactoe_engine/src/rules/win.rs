//! Win detection logic for tic-tac-toe.

use crate::types::{Board, Cell, Mark};
use serde::{Deserialize, Serialize};

/// One of the eight fixed triples that wins the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinningLine([usize; 3]);

impl WinningLine {
    /// Board indices of the triple, ascending.
    pub fn indices(&self) -> [usize; 3] {
        self.0
    }

    /// Returns true if `pos` is part of the triple.
    pub fn contains(&self, pos: usize) -> bool {
        self.0.contains(&pos)
    }
}

impl std::fmt::Display for WinningLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{}-{}-{}", a, b, c)
    }
}

/// Winning triples in scan order: rows, columns, diagonals.
pub const LINES: [WinningLine; 8] = [
    // Rows
    WinningLine([0, 1, 2]),
    WinningLine([3, 4, 5]),
    WinningLine([6, 7, 8]),
    // Columns
    WinningLine([0, 3, 6]),
    WinningLine([1, 4, 7]),
    WinningLine([2, 5, 8]),
    // Diagonals
    WinningLine([0, 4, 8]),
    WinningLine([2, 4, 6]),
];

/// Returns the winner and the first completed triple, if any.
///
/// Boards where both marks hold a triple cannot arise in play; for such
/// boards the first triple in scan order is reported.
pub fn find_winner(board: &Board) -> Option<(Mark, WinningLine)> {
    let cells = board.cells();
    for line in LINES {
        let [a, b, c] = line.0;
        if let Cell::Occupied(mark) = cells[a]
            && cells[a] == cells[b]
            && cells[a] == cells[c]
        {
            return Some((mark, line));
        }
    }

    None
}
