//! Draw detection logic for tic-tac-toe.

use crate::types::Board;

/// Returns true when every cell is occupied.
///
/// This does not look for a winner: a full board with a completed triple
/// also satisfies it. Use [`super::evaluate`] to classify a position.
pub fn is_draw(board: &Board) -> bool {
    board.is_full()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_not_draw() {
        assert!(!is_draw(&Board::new()));
    }

    #[test]
    fn test_partial_board_not_draw() {
        let board: Board = "XOXOXOXO.".parse().unwrap();
        assert!(!is_draw(&board));
    }

    #[test]
    fn test_full_board() {
        // X O X / O X X / O X O
        let board: Board = "XOXOXXOXO".parse().unwrap();
        assert!(is_draw(&board));
    }
}
