//! Human player fed by a channel of cell indices.

use super::Player;
use anyhow::Result;
use derive_more::{Display, Error};
use std::sync::Arc;
use tictactoe_engine::Board;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, instrument};

/// The input source closed before a move arrived (the user quit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Input channel closed")]
pub struct InputClosed;

/// Human player reading cell indices (0-8) from a channel.
///
/// Clones share the same receiver, so two humans can take turns at one
/// keyboard.
#[derive(Debug, Clone)]
pub struct HumanPlayer {
    name: String,
    input_rx: Arc<Mutex<mpsc::UnboundedReceiver<usize>>>,
}

impl HumanPlayer {
    /// Creates a new human player.
    pub fn new(name: impl Into<String>, input_rx: mpsc::UnboundedReceiver<usize>) -> Self {
        Self {
            name: name.into(),
            input_rx: Arc::new(Mutex::new(input_rx)),
        }
    }

    /// Another player reading from the same input.
    pub fn sharing_input(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            input_rx: Arc::clone(&self.input_rx),
        }
    }
}

#[async_trait::async_trait]
impl Player for HumanPlayer {
    #[instrument(skip(self, board), fields(player = %self.name))]
    async fn get_move(&mut self, board: &Board) -> Result<usize> {
        let mut input_rx = self.input_rx.lock().await;
        while let Some(pos) = input_rx.recv().await {
            if board.is_empty(pos) {
                return Ok(pos);
            }
            debug!(pos, "Ignoring input for unavailable cell");
        }

        Err(InputClosed.into())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_timed(&self) -> bool {
        true
    }
}
