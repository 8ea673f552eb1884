//! Exhaustive minimax search with alpha-beta pruning.
//!
//! The searching side is always the maximizer: even plies from the root are
//! its moves, odd plies the opponent's. Scores are `10 - depth` for a win,
//! `depth - 10` for a loss and `0` for a draw, so faster wins and slower
//! losses are preferred. Every node works on its own copy of the board.

use crate::rules::find_winner;
use crate::types::{Board, Mark};

/// Base score of a decisive result before the depth adjustment.
pub const WIN_SCORE: i32 = 10;

/// Score and move found at a search node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scored {
    /// Minimax value of the node.
    pub score: i32,
    /// Move that achieves `score`; `None` at terminal nodes.
    pub index: Option<usize>,
}

/// Returns the optimal move for `maximizer`, who is to move on `board`.
///
/// Ties go to the lowest index. `None` when the position is already
/// decided or the board is full.
pub fn best_move(board: &Board, maximizer: Mark) -> Option<usize> {
    search(board, maximizer).index
}

/// Minimax value of `board` with `maximizer` to move.
///
/// Positive: `maximizer` can force a win. Negative: the opponent can.
/// Zero: best play draws.
pub fn position_score(board: &Board, maximizer: Mark) -> i32 {
    search(board, maximizer).score
}

/// Root search with an open window.
pub fn search(board: &Board, maximizer: Mark) -> Scored {
    minimax(
        *board,
        0,
        true,
        i32::MIN,
        i32::MAX,
        maximizer,
        maximizer.opponent(),
    )
}

fn minimax(
    board: Board,
    depth: i32,
    maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
    me: Mark,
    opponent: Mark,
) -> Scored {
    if let Some((winner, _)) = find_winner(&board) {
        let score = if winner == me {
            WIN_SCORE - depth
        } else {
            depth - WIN_SCORE
        };
        return Scored { score, index: None };
    }
    if board.is_full() {
        return Scored {
            score: 0,
            index: None,
        };
    }

    let mut best = Scored {
        score: if maximizing { i32::MIN } else { i32::MAX },
        index: None,
    };
    let mover = if maximizing { me } else { opponent };

    for pos in board.empty_cells() {
        let child = minimax(
            board.with_mark(pos, mover),
            depth + 1,
            !maximizing,
            alpha,
            beta,
            me,
            opponent,
        );

        if maximizing {
            if child.score > best.score {
                best = Scored {
                    score: child.score,
                    index: Some(pos),
                };
            }
            alpha = alpha.max(child.score);
        } else {
            if child.score < best.score {
                best = Scored {
                    score: child.score,
                    index: Some(pos),
                };
            }
            beta = beta.min(child.score);
        }

        if beta <= alpha {
            break;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_takes_immediate_win() {
        // O to move, 3-4-5 open at 5.
        let board: Board = "XX.OO.X..".parse().unwrap();
        let found = search(&board, Mark::O);
        assert_eq!(found.index, Some(5));
        assert_eq!(found.score, WIN_SCORE - 1);
    }

    #[test]
    fn test_prefers_faster_win() {
        // X wins at 2 now; other winning lines exist later.
        let board: Board = "XX.OO....".parse().unwrap();
        assert_eq!(best_move(&board, Mark::X), Some(2));
    }

    #[test]
    fn test_blocks_immediate_loss() {
        let board: Board = "XX..O....".parse().unwrap();
        assert_eq!(best_move(&board, Mark::O), Some(2));
    }

    #[test]
    fn test_empty_board_is_a_draw_and_picks_first_cell() {
        let found = search(&Board::new(), Mark::X);
        assert_eq!(found.score, 0);
        assert_eq!(found.index, Some(0));
    }

    #[test]
    fn test_lost_position_scores_loss_at_depth_two() {
        // X threatens both 1 and 5; O can block only one.
        let board: Board = "X.X.O.O.X".parse().unwrap();
        assert_eq!(position_score(&board, Mark::O), -(WIN_SCORE - 2));
        assert_eq!(position_score(&board.with_mark(1, Mark::O), Mark::X), WIN_SCORE - 1);
    }

    #[test]
    fn test_terminal_board_has_no_move() {
        let board: Board = "XXXOO....".parse().unwrap();
        let found = search(&board, Mark::O);
        assert_eq!(found.index, None);
        assert_eq!(found.score, -WIN_SCORE);
    }
}
