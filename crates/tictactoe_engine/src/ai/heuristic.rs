//! Rule-of-thumb play used by the medium tier.

use super::random::random_move;
use crate::position::Position;
use crate::rules::find_winner;
use crate::types::{Board, Mark};
use rand::Rng;

/// Chance that a medium move consults the heuristic ladder at all.
pub const STRATEGIC_PROBABILITY: f64 = 0.7;

/// Returns the lowest empty index that completes a triple for `mark`.
pub fn find_winning_move(board: &Board, mark: Mark) -> Option<usize> {
    board
        .empty_cells()
        .find(|&pos| matches!(find_winner(&board.with_mark(pos, mark)), Some((winner, _)) if winner == mark))
}

/// Applies the ladder: win now, block, center, random empty corner.
///
/// Returns `None` when no rung applies.
pub fn heuristic_move<R: Rng + ?Sized>(
    board: &Board,
    mark: Mark,
    opponent: Mark,
    rng: &mut R,
) -> Option<usize> {
    if let Some(pos) = find_winning_move(board, mark) {
        return Some(pos);
    }

    if let Some(pos) = find_winning_move(board, opponent) {
        return Some(pos);
    }

    let center = Position::Center.to_index();
    if board.is_empty(center) {
        return Some(center);
    }

    let corners: Vec<usize> = Position::CORNERS
        .iter()
        .map(|corner| corner.to_index())
        .filter(|&pos| board.is_empty(pos))
        .collect();
    if !corners.is_empty() {
        return Some(corners[rng.random_range(0..corners.len())]);
    }

    None
}

/// Medium tier: the ladder 70% of the time, otherwise (or when the ladder
/// has nothing to offer) a uniform random empty cell.
pub fn medium_move<R: Rng + ?Sized>(
    board: &Board,
    mark: Mark,
    opponent: Mark,
    rng: &mut R,
) -> Option<usize> {
    if rng.random_bool(STRATEGIC_PROBABILITY)
        && let Some(pos) = heuristic_move(board, mark, opponent, rng)
    {
        return Some(pos);
    }

    random_move(board, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_win_beats_block() {
        // O can win at 5; X threatens 2.
        let board: Board = "XX.OO..X.".parse().unwrap();
        let mut rng = SmallRng::seed_from_u64(3);
        assert_eq!(heuristic_move(&board, Mark::O, Mark::X, &mut rng), Some(5));
    }

    #[test]
    fn test_block_when_no_win() {
        let board: Board = "XX..O....".parse().unwrap();
        let mut rng = SmallRng::seed_from_u64(3);
        assert_eq!(heuristic_move(&board, Mark::O, Mark::X, &mut rng), Some(2));
    }

    #[test]
    fn test_center_when_quiet() {
        let board: Board = "X........".parse().unwrap();
        let mut rng = SmallRng::seed_from_u64(3);
        assert_eq!(heuristic_move(&board, Mark::O, Mark::X, &mut rng), Some(4));
    }

    #[test]
    fn test_corner_after_center_taken() {
        let board: Board = "....X....".parse().unwrap();
        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let pos = heuristic_move(&board, Mark::O, Mark::X, &mut rng).unwrap();
            assert!([0, 2, 6, 8].contains(&pos), "picked {pos}");
        }
    }

    #[test]
    fn test_ladder_exhausted_falls_back_to_random() {
        // Center and corners taken, no open threats: only edges 3 and 5 left.
        let board: Board = "XOX.X.OXO".parse().unwrap();
        let mut rng = SmallRng::seed_from_u64(3);
        assert_eq!(heuristic_move(&board, Mark::O, Mark::X, &mut rng), None);
        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let pos = medium_move(&board, Mark::O, Mark::X, &mut rng).unwrap();
            assert!(pos == 3 || pos == 5, "picked {pos}");
        }
    }

    #[test]
    fn test_winning_move_scans_ascending() {
        // X can complete both 0-1-2 (at 2) and 6-7-8 (at 8).
        let board: Board = "XX.OO.XX.".parse().unwrap();
        assert_eq!(find_winning_move(&board, Mark::X), Some(2));
    }
}
