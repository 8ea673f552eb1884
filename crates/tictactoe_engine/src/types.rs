//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Number of cells on the board.
pub const BOARD_CELLS: usize = 9;

/// A player's mark.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Mark {
    /// Mark X (always moves first).
    X,
    /// Mark O.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Single-character symbol used in the text board form.
    pub fn symbol(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Cell {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Cell marked by a player.
    Occupied(Mark),
}

impl Cell {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }
}

/// Errors from the fallible board entry points.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardError {
    /// Index is not in `0..9`.
    #[display("Position {} out of bounds (must be 0-8)", _0)]
    OutOfBounds(usize),

    /// Cell already carries a mark.
    #[display("Square {} is already occupied", _0)]
    Occupied(usize),

    /// Text form did not contain exactly nine cells.
    #[display("Board text must describe 9 cells, found {}", _0)]
    InvalidLength(usize),

    /// Text form contained an unknown symbol.
    #[display("Unknown board symbol '{}'", _0)]
    InvalidSymbol(char),
}

impl std::error::Error for BoardError {}

/// 3x3 board, cells in row-major order (0-8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Board {
    cells: [Cell; BOARD_CELLS],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board from explicit cells.
    ///
    /// No consistency checks are made; any arrangement of marks is accepted.
    pub fn from_cells(cells: [Cell; BOARD_CELLS]) -> Self {
        Self { cells }
    }

    /// Gets the cell at the given index.
    pub fn get(&self, pos: usize) -> Option<Cell> {
        self.cells.get(pos).copied()
    }

    /// Returns true if the index is on the board and unmarked.
    pub fn is_empty(&self, pos: usize) -> bool {
        matches!(self.get(pos), Some(Cell::Empty))
    }

    /// Marks an empty cell.
    ///
    /// Marked cells are never overwritten.
    #[instrument(skip(self))]
    pub fn place(&mut self, pos: usize, mark: Mark) -> Result<(), BoardError> {
        match self.get(pos) {
            None => Err(BoardError::OutOfBounds(pos)),
            Some(Cell::Occupied(_)) => Err(BoardError::Occupied(pos)),
            Some(Cell::Empty) => {
                self.cells[pos] = Cell::Occupied(mark);
                Ok(())
            }
        }
    }

    /// Returns a copy of this board with `mark` written at `pos`.
    ///
    /// Used by the search, which branches on board snapshots. The caller
    /// guarantees `pos` is an empty in-bounds cell.
    pub fn with_mark(&self, pos: usize, mark: Mark) -> Self {
        let mut next = *self;
        next.cells[pos] = Cell::Occupied(mark);
        next
    }

    /// All cells.
    pub fn cells(&self) -> &[Cell; BOARD_CELLS] {
        &self.cells
    }

    /// Indices of empty cells in ascending order.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(|(pos, _)| pos)
    }

    /// Returns true if no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| *cell != Cell::Empty)
    }

    /// Number of cells carrying `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .filter(|cell| **cell == Cell::Occupied(mark))
            .count()
    }

    /// Formats the board for humans: empty cells show their 1-based number.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.cells[pos] {
                    Cell::Empty => (pos + 1).to_string(),
                    Cell::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for cell in &self.cells {
            let symbol = match cell {
                Cell::Empty => '.',
                Cell::Occupied(mark) => mark.symbol(),
            };
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parses the compact form, e.g. `"XX..O...."`.
    ///
    /// `X`/`O` (any case) are marks; `.`, `-`, `_` and spaces are empty.
    /// Row separators `/` and `|` and line breaks are skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(BOARD_CELLS);
        for ch in s.chars() {
            let cell = match ch {
                'x' | 'X' => Cell::Occupied(Mark::X),
                'o' | 'O' => Cell::Occupied(Mark::O),
                '.' | '-' | '_' | ' ' => Cell::Empty,
                '/' | '|' | '\n' | '\r' => continue,
                other => return Err(BoardError::InvalidSymbol(other)),
            };
            cells.push(cell);
        }
        let cells: [Cell; BOARD_CELLS] = cells
            .try_into()
            .map_err(|cells: Vec<Cell>| BoardError::InvalidLength(cells.len()))?;
        Ok(Self { cells })
    }
}

/// AI difficulty tier, fixed for the duration of a game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Uniform random moves.
    Easy,
    /// Mostly-heuristic play with random slips.
    #[default]
    Medium,
    /// Perfect play via minimax.
    Hard,
}
