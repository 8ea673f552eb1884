//! Computer player backed by the engine's AI.

use super::Player;
use anyhow::{Result, anyhow};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::time::Duration;
use tictactoe_engine::{AiPlayer, Board, Difficulty, Mark};
use tracing::{debug, instrument};

/// Computer opponent with its own random source and a thinking pause.
#[derive(Debug, Clone)]
pub struct ComputerPlayer {
    name: String,
    ai: AiPlayer,
    rng: SmallRng,
    pause: Duration,
}

impl ComputerPlayer {
    /// Creates a computer player. A seed makes its choices reproducible.
    pub fn new(difficulty: Difficulty, mark: Mark, pause: Duration, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => {
                let mut seed_rng = rand::rng();
                SmallRng::from_rng(&mut seed_rng)
            }
        };
        Self {
            name: format!("Computer ({})", difficulty),
            ai: AiPlayer::new(difficulty, mark),
            rng,
            pause,
        }
    }

    /// The underlying AI.
    pub fn ai(&self) -> &AiPlayer {
        &self.ai
    }
}

#[async_trait::async_trait]
impl Player for ComputerPlayer {
    #[instrument(skip(self, board), fields(player = %self.name, board = %board))]
    async fn get_move(&mut self, board: &Board) -> Result<usize> {
        if !self.pause.is_zero() {
            debug!(pause_ms = self.pause.as_millis() as u64, "Thinking");
            tokio::time::sleep(self.pause).await;
        }

        self.ai
            .choose_move(board, &mut self.rng)
            .ok_or_else(|| anyhow!("No empty cell left for {}", self.name))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_timed(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_pause_then_moves() {
        let mut cpu = ComputerPlayer::new(
            Difficulty::Hard,
            Mark::O,
            Duration::from_millis(1500),
            Some(1),
        );
        let board: Board = "XX..O....".parse().unwrap();
        let start = tokio::time::Instant::now();
        assert_eq!(cpu.get_move(&board).await.unwrap(), 2);
        assert!(start.elapsed() >= Duration::from_millis(1500));
        assert!(!cpu.is_timed());
    }

    #[tokio::test]
    async fn test_full_board_is_an_error() {
        let mut cpu = ComputerPlayer::new(Difficulty::Easy, Mark::O, Duration::ZERO, Some(1));
        let board: Board = "XOXOXXOXO".parse().unwrap();
        assert!(cpu.get_move(&board).await.is_err());
    }
}
