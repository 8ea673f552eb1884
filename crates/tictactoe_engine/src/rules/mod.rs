//! Game rules for tic-tac-toe.
//!
//! Pure functions over a board snapshot. Rules are separated from board
//! storage so the search and the game driver share one definition of a
//! finished game.

mod draw;
mod outcome;
mod win;

pub use draw::is_draw;
pub use outcome::{Outcome, evaluate};
pub use win::{LINES, WinningLine, find_winner};
