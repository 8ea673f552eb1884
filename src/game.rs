//! Game model: the authoritative board, turn order and move history.

use serde::{Deserialize, Serialize};
use tictactoe_engine::{Board, BoardError, Mark, Outcome, Position, WinningLine, evaluate};
use tracing::{debug, info, instrument};

/// Who sits on the other side of the board.
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
pub enum GameMode {
    /// Two humans share the board.
    #[default]
    Pvp,
    /// Human against the computer.
    Pvc,
}

/// A move in tic-tac-toe: a player placing their mark at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Mark,
    /// Board index (0-8).
    pub position: usize,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Mark, position: usize) -> Self {
        Self { player, position }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match Position::from_index(self.position) {
            Some(pos) => write!(f, "{} -> {}", self.player, pos.label()),
            None => write!(f, "{} -> {}", self.player, self.position),
        }
    }
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(usize),

    /// Position outside the board.
    #[display("Position {} out of bounds (must be 0-8)", _0)]
    OutOfBounds(usize),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// It's not this player's turn.
    #[display("It's not {}'s turn", _0)]
    WrongPlayer(Mark),
}

impl std::error::Error for MoveError {}

/// Tic-tac-toe game. X always moves first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    current_player: Mark,
    outcome: Outcome,
    history: Vec<Move>,
    skipped_turns: usize,
}

impl Game {
    /// Creates a new game.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Mark::X,
            outcome: Outcome::InProgress,
            history: Vec::new(),
            skipped_turns: 0,
        }
    }

    /// Rebuilds a game by playing `positions` in order from an empty board.
    #[instrument]
    pub fn replay(positions: &[usize]) -> Result<Self, MoveError> {
        let mut game = Self::new();
        for &pos in positions {
            game.make_move(pos)?;
        }
        Ok(game)
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    pub fn current_player(&self) -> Mark {
        self.current_player
    }

    /// Returns the latest evaluation of the board.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns the move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Number of marks placed.
    pub fn moves_played(&self) -> usize {
        self.history.len()
    }

    /// Number of turns lost to the timer.
    pub fn skipped_turns(&self) -> usize {
        self.skipped_turns
    }

    /// Returns true once the game has a winner or is drawn.
    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Returns the winner, if any.
    pub fn winner(&self) -> Option<Mark> {
        self.outcome.winner()
    }

    /// Returns the completed triple, if any.
    pub fn winning_line(&self) -> Option<WinningLine> {
        self.outcome.winning_line()
    }

    /// Places the current player's mark at `pos` (0-8).
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn make_move(&mut self, pos: usize) -> Result<Outcome, MoveError> {
        self.place(Move::new(self.current_player, pos))
    }

    /// Applies a move after checking it is legal.
    #[instrument(skip(self, mv), fields(mv = %mv))]
    pub fn place(&mut self, mv: Move) -> Result<Outcome, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if mv.player != self.current_player {
            return Err(MoveError::WrongPlayer(mv.player));
        }

        if let Err(err) = self.board.place(mv.position, mv.player) {
            return Err(match err {
                BoardError::Occupied(pos) => MoveError::SquareOccupied(pos),
                BoardError::OutOfBounds(pos) => MoveError::OutOfBounds(pos),
                // Only text parsing reports these.
                BoardError::InvalidLength(_) | BoardError::InvalidSymbol(_) => {
                    MoveError::OutOfBounds(mv.position)
                }
            });
        }
        self.history.push(mv);
        self.outcome = evaluate(&self.board);

        if !self.is_over() {
            self.current_player = mv.player.opponent();
        }

        debug!(outcome = %self.outcome, moves = self.history.len(), "Move applied");
        Ok(self.outcome)
    }

    /// Passes the turn without placing a mark (the turn timer ran out).
    ///
    /// Returns the player who moves next.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn skip_turn(&mut self) -> Result<Mark, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        self.current_player = self.current_player.opponent();
        self.skipped_turns += 1;
        info!(next = %self.current_player, "Turn skipped");
        Ok(self.current_player)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
