//! Tic-tac-toe core: board evaluation and the computer opponent.
//!
//! # Architecture
//!
//! - **Types**: [`Board`], [`Cell`], [`Mark`], [`Difficulty`], [`Position`]
//! - **Rules**: [`find_winner`], [`is_draw`], [`evaluate`] → [`Outcome`]
//! - **AI**: [`AiPlayer`] / [`choose_move`] over random, heuristic and
//!   minimax policies
//!
//! Everything here is pure and synchronous. Randomness is always supplied
//! by the caller.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use tictactoe_engine::{Board, Difficulty, Mark, Outcome, choose_move, evaluate};
//!
//! let board: Board = "XX..O....".parse().unwrap();
//! assert_eq!(evaluate(&board), Outcome::InProgress);
//!
//! let mut rng = rand::rngs::SmallRng::seed_from_u64(7);
//! assert_eq!(choose_move(&board, Difficulty::Hard, Mark::O, &mut rng), Some(2));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod ai;
mod position;
mod rules;
mod types;

pub use ai::{AiPlayer, choose_move};
pub use position::Position;
pub use rules::{LINES, Outcome, WinningLine, evaluate, find_winner, is_draw};
pub use types::{BOARD_CELLS, Board, BoardError, Cell, Difficulty, Mark};
