//! Line-oriented terminal front end.

use crate::db::{GameRecord, GameStats};
use crate::game::GameMode;
use crate::orchestrator::{GameEvent, GameSummary, Orchestrator};
use crate::players::{ComputerPlayer, HumanPlayer, Player};
use crate::settings::GameSettings;
use crate::stats_service::StatsService;
use anyhow::{Context, Result};
use std::io::BufRead;
use tictactoe_engine::{Mark, Outcome, Position};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// A line typed at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// A cell, already converted to a board index.
    Cell(usize),
    /// Leave the game.
    Quit,
    /// Anything else.
    Unknown,
}

/// Parses a prompt line: `1`-`9`, a position label, or `q`.
pub fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
        return Input::Quit;
    }
    match Position::from_label_or_number(line) {
        Some(pos) => Input::Cell(pos.to_index()),
        None => Input::Unknown,
    }
}

/// Reads stdin on a dedicated thread and forwards each line.
///
/// A detached thread keeps a blocked read from holding up shutdown.
pub fn spawn_line_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Builds the X and O players for the configured mode.
pub fn build_players(
    settings: &GameSettings,
    input_rx: mpsc::UnboundedReceiver<usize>,
    seed: Option<u64>,
) -> (Box<dyn Player>, Box<dyn Player>) {
    match settings.game_mode() {
        GameMode::Pvp => {
            let x = HumanPlayer::new("Player X", input_rx);
            let o = x.sharing_input("Player O");
            let players: (Box<dyn Player>, Box<dyn Player>) = (Box::new(x), Box::new(o));
            players
        }
        GameMode::Pvc => {
            let ai_mark = *settings.ai_mark();
            let human: Box<dyn Player> = Box::new(HumanPlayer::new(
                format!("You ({})", ai_mark.opponent()),
                input_rx,
            ));
            let computer: Box<dyn Player> = Box::new(ComputerPlayer::new(
                *settings.difficulty(),
                ai_mark,
                settings.ai_pause(),
                seed,
            ));
            match ai_mark {
                Mark::X => (computer, human),
                Mark::O => (human, computer),
            }
        }
    }
}

/// Interactive session: plays games until the user declines another.
#[instrument(skip(settings, stats), fields(mode = %settings.game_mode()))]
pub async fn play_session(
    settings: GameSettings,
    seed: Option<u64>,
    stats: Option<StatsService>,
) -> Result<()> {
    let mut lines = spawn_line_reader();
    let mut round: u64 = 0;

    loop {
        let round_seed = seed.map(|s| s.wrapping_add(round));
        round += 1;
        info!(round, "Starting game");

        let Some(summary) = play_one(&settings, round_seed, &mut lines).await? else {
            println!("Game abandoned.");
            return Ok(());
        };

        if let Some(service) = &stats {
            service
                .record(&summary)
                .context("Failed to record game result")?;
        }

        println!("Play again? [y/N]");
        match lines.recv().await {
            Some(answer) if answer.trim().eq_ignore_ascii_case("y") => continue,
            _ => return Ok(()),
        }
    }
}

/// Plays a single game. `None` when the user quits part way.
async fn play_one(
    settings: &GameSettings,
    seed: Option<u64>,
    lines: &mut mpsc::UnboundedReceiver<String>,
) -> Result<Option<GameSummary>> {
    let (cell_tx, cell_rx) = mpsc::unbounded_channel();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (player_x, player_o) = build_players(settings, cell_rx, seed);

    println!("{} (X) vs {} (O)", player_x.name(), player_o.name());
    println!("Enter 1-9 to place a mark, q to quit.");

    let mut orchestrator = Orchestrator::new(player_x, player_o, settings.clone(), event_tx);
    let result = drive_game(&mut orchestrator, &mut event_rx, lines, &cell_tx, |event| {
        render_event(event, settings)
    })
    .await;

    if let Err(err) = &result {
        warn!(error = %err, "Game ended early");
    }
    result
}

/// Tracks whether a human is on the move, so typed cells are only
/// delivered during that human's turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputGate {
    human_turn: Option<Mark>,
}

impl InputGate {
    /// Updates the gate from a driver event.
    pub fn observe(&mut self, event: &GameEvent) {
        match event {
            GameEvent::TurnStarted { player, timed, .. } => {
                self.human_turn = timed.then_some(*player);
            }
            GameEvent::AiThinking { .. }
            | GameEvent::MoveMade { .. }
            | GameEvent::TimedOut { .. }
            | GameEvent::GameOver { .. } => self.human_turn = None,
            GameEvent::Tick { .. } | GameEvent::StateChanged(_) => {}
        }
    }

    /// Mark of the human currently on the move.
    pub fn human_turn(&self) -> Option<Mark> {
        self.human_turn
    }

    /// True while typed cells should reach the game.
    pub fn is_open(&self) -> bool {
        self.human_turn.is_some()
    }
}

/// Runs one game, feeding typed lines to the human players.
///
/// Cells typed while no human is on the move are dropped. Returns `None`
/// when the user quits or input ends.
pub async fn drive_game(
    orchestrator: &mut Orchestrator,
    event_rx: &mut mpsc::UnboundedReceiver<GameEvent>,
    lines: &mut mpsc::UnboundedReceiver<String>,
    cell_tx: &mpsc::UnboundedSender<usize>,
    mut on_event: impl FnMut(&GameEvent),
) -> Result<Option<GameSummary>> {
    let mut gate = InputGate::default();
    let run = orchestrator.run();
    tokio::pin!(run);

    // Events are handled before lines so the gate reflects every turn
    // change the game has already made.
    let result = loop {
        tokio::select! {
            biased;
            result = &mut run => break result,
            Some(event) = event_rx.recv() => {
                gate.observe(&event);
                on_event(&event);
            }
            line = lines.recv() => match line.as_deref().map(parse_input) {
                Some(Input::Cell(pos)) if gate.is_open() => {
                    if cell_tx.send(pos).is_err() {
                        debug!("Game no longer reading input");
                    }
                }
                Some(Input::Cell(pos)) => {
                    debug!(pos, "Dropping input outside a human turn");
                    println!("Wait for your turn.");
                }
                Some(Input::Unknown) => println!("Enter a cell number 1-9, or q to quit."),
                Some(Input::Quit) | None => return Ok(None),
            },
        }
    };

    while let Ok(event) = event_rx.try_recv() {
        on_event(&event);
    }

    result.map(Some)
}

/// Prints one driver event.
pub fn render_event(event: &GameEvent, settings: &GameSettings) {
    match event {
        GameEvent::TurnStarted { player, name, timed } => {
            if *timed {
                println!("{} ({}) to move, {}s on the clock.", name, player, settings.turn_time());
            } else {
                println!("{} ({}) to move.", name, player);
            }
        }
        GameEvent::Tick {
            player,
            seconds_left,
        } => {
            if *seconds_left <= 5 {
                println!("  {}: {}s left", player, seconds_left);
            }
        }
        GameEvent::TimedOut { player } => {
            println!("Time's up! {} loses the turn.", player);
        }
        GameEvent::AiThinking { .. } => println!("Computer is thinking..."),
        GameEvent::MoveMade { player, position } => match Position::from_index(*position) {
            Some(pos) => println!("{} plays {}.", player, pos),
            None => println!("{} plays {}.", player, position),
        },
        GameEvent::StateChanged(board) => println!("\n{}", board.display()),
        GameEvent::GameOver {
            outcome,
            moves,
            duration,
        } => println!(
            "{} ({} moves, {}s)",
            outcome_message(outcome),
            moves,
            duration.as_secs()
        ),
    }
}

fn outcome_message(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Won { winner, line } => format!("{} wins along {}!", winner, line),
        Outcome::Draw => "It's a draw!".to_string(),
        Outcome::InProgress => "Game in progress".to_string(),
    }
}

/// Formats statistics and recent games for display.
pub fn render_stats(stats: &GameStats, history: &[GameRecord]) -> String {
    let mut out = String::new();
    out.push_str(&format!("Games played:      {}\n", stats.total_games()));
    out.push_str(&format!("X wins:            {}\n", stats.player_x_wins()));
    out.push_str(&format!("O wins:            {}\n", stats.player_o_wins()));
    out.push_str(&format!("Draws:             {}\n", stats.draws()));
    match stats.current_streak() {
        Some(streak) => out.push_str(&format!(
            "Current streak:    {} x{}\n",
            streak.player, streak.count
        )),
        None => out.push_str("Current streak:    none\n"),
    }
    out.push_str(&format!("Average game time: {}s\n", stats.average_game_time()));

    if *stats.games_vs_ai() > 0 {
        out.push_str(&format!(
            "Versus computer:   {} games, you won {}, computer won {} ({}% win rate)\n",
            stats.games_vs_ai(),
            stats.player_wins(),
            stats.ai_wins(),
            stats.win_rate_vs_ai()
        ));
    }

    if !history.is_empty() {
        out.push_str("\nRecent games:\n");
        for record in history {
            let winner = record.winner().as_deref().unwrap_or("draw");
            out.push_str(&format!(
                "  {}  {:<4} {:<6} winner: {:<4} moves: {} time: {}s\n",
                record.played_at().format("%Y-%m-%d %H:%M"),
                record.mode(),
                record.difficulty(),
                winner,
                record.moves(),
                record.duration_secs()
            ));
        }
    }
    out
}

/// Formats settings for display.
pub fn render_settings(settings: &GameSettings) -> String {
    format!(
        "turn_time:  {}s\ngame_mode:  {}\ndifficulty: {}\nai_mark:    {}\nai_delay:   {}\n",
        settings.turn_time(),
        settings.game_mode(),
        settings.difficulty(),
        settings.ai_mark(),
        settings.ai_delay()
    )
}
