//! Game orchestration between players.

use crate::game::{Game, GameMode};
use crate::players::Player;
use crate::settings::GameSettings;
use anyhow::{Context, Result};
use derive_getters::Getters;
use derive_new::new;
use std::time::Duration;
use tictactoe_engine::{Board, Difficulty, Mark, Outcome};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, instrument};

/// Messages sent from orchestrator to UI.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A player is on the move.
    TurnStarted {
        /// Mark to move.
        player: Mark,
        /// Display name of the player.
        name: String,
        /// Whether the turn timer runs.
        timed: bool,
    },
    /// One second of a timed turn elapsed.
    Tick {
        /// Mark to move.
        player: Mark,
        /// Whole seconds remaining.
        seconds_left: u64,
    },
    /// The turn timer ran out and the turn passed on.
    TimedOut {
        /// Mark that lost its turn.
        player: Mark,
    },
    /// The computer is choosing a move.
    AiThinking {
        /// Mark the computer plays.
        player: Mark,
    },
    /// Move was made.
    MoveMade {
        /// Mark that moved.
        player: Mark,
        /// Board index.
        position: usize,
    },
    /// Board after a change.
    StateChanged(Board),
    /// Game ended.
    GameOver {
        /// Final result.
        outcome: Outcome,
        /// Marks placed.
        moves: usize,
        /// Wall time of the game.
        duration: Duration,
    },
}

/// Result of a finished game, ready to be recorded.
#[derive(Debug, Clone, PartialEq, Getters, new)]
pub struct GameSummary {
    /// Final result (never in progress).
    outcome: Outcome,
    /// Marks placed.
    moves: usize,
    /// Wall time of the game.
    duration: Duration,
    /// Who played.
    mode: GameMode,
    /// Computer strength, meaningful in `pvc`.
    difficulty: Difficulty,
    /// Mark the computer played, meaningful in `pvc`.
    ai_mark: Mark,
}

impl GameSummary {
    /// Winning mark, `None` for a draw.
    pub fn winner(&self) -> Option<Mark> {
        self.outcome.winner()
    }
}

/// Orchestrates gameplay between two players.
pub struct Orchestrator {
    game: Game,
    player_x: Box<dyn Player>,
    player_o: Box<dyn Player>,
    settings: GameSettings,
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl Orchestrator {
    /// Creates a new orchestrator.
    pub fn new(
        player_x: Box<dyn Player>,
        player_o: Box<dyn Player>,
        settings: GameSettings,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self {
            game: Game::new(),
            player_x,
            player_o,
            settings,
            event_tx,
        }
    }

    /// The game being played.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Runs the game loop until someone wins or the board fills.
    ///
    /// Errors when a player fails to produce a move (for example when a
    /// human quits) or proposes an illegal one.
    #[instrument(skip(self), fields(x = %self.player_x.name(), o = %self.player_o.name()))]
    pub async fn run(&mut self) -> Result<GameSummary> {
        info!("Starting game orchestration");
        let started = Instant::now();
        self.emit(GameEvent::StateChanged(*self.game.board()));

        while !self.game.is_over() {
            let mark = self.game.current_player();
            let turn = self.settings.turn_duration();
            let board = *self.game.board();

            let player = match mark {
                Mark::X => &mut self.player_x,
                Mark::O => &mut self.player_o,
            };
            let name = player.name().to_string();
            let timed = player.is_timed();

            emit(
                &self.event_tx,
                GameEvent::TurnStarted {
                    player: mark,
                    name: name.clone(),
                    timed,
                },
            );

            let choice = if timed {
                timed_move(&mut **player, &board, mark, turn, &self.event_tx).await?
            } else {
                emit(&self.event_tx, GameEvent::AiThinking { player: mark });
                Some(player.get_move(&board).await?)
            };

            match choice {
                Some(position) => {
                    self.game
                        .make_move(position)
                        .with_context(|| format!("{} proposed an illegal move", name))?;
                    debug!(player = %mark, position, "Move applied");
                    self.emit(GameEvent::MoveMade {
                        player: mark,
                        position,
                    });
                    self.emit(GameEvent::StateChanged(*self.game.board()));
                }
                None => {
                    info!(player = %mark, "Turn timed out");
                    self.game.skip_turn()?;
                    self.emit(GameEvent::TimedOut { player: mark });
                }
            }
        }

        let duration = started.elapsed();
        let outcome = self.game.outcome();
        let moves = self.game.moves_played();
        info!(outcome = %outcome, moves, duration_ms = duration.as_millis() as u64, "Game over");
        self.emit(GameEvent::GameOver {
            outcome,
            moves,
            duration,
        });

        Ok(GameSummary::new(
            outcome,
            moves,
            duration,
            *self.settings.game_mode(),
            *self.settings.difficulty(),
            *self.settings.ai_mark(),
        ))
    }

    fn emit(&self, event: GameEvent) {
        emit(&self.event_tx, event);
    }
}

fn emit(event_tx: &mpsc::UnboundedSender<GameEvent>, event: GameEvent) {
    if event_tx.send(event).is_err() {
        debug!("Event receiver dropped");
    }
}

/// Waits for a move until the turn runs out, ticking once per second.
///
/// `None` means the timer won.
async fn timed_move(
    player: &mut dyn Player,
    board: &Board,
    mark: Mark,
    turn: Duration,
    event_tx: &mpsc::UnboundedSender<GameEvent>,
) -> Result<Option<usize>> {
    let deadline = tokio::time::sleep(turn);
    tokio::pin!(deadline);

    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    // The first tick completes immediately.
    ticker.tick().await;
    let mut seconds_left = turn.as_secs();

    let pending = player.get_move(board);
    tokio::pin!(pending);

    loop {
        tokio::select! {
            biased;
            chosen = &mut pending => return chosen.map(Some),
            _ = &mut deadline => return Ok(None),
            _ = ticker.tick() => {
                seconds_left = seconds_left.saturating_sub(1);
                emit(event_tx, GameEvent::Tick { player: mark, seconds_left });
            }
        }
    }
}
