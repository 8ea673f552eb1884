//! Computer-versus-computer tournaments.

use crate::game::{Game, MoveError};
use derive_getters::Getters;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tictactoe_engine::{AiPlayer, Difficulty, Mark};
use tracing::{debug, info, instrument};

/// Tally of a tournament.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters)]
pub struct TournamentResult {
    games: u32,
    x_wins: u32,
    o_wins: u32,
    draws: u32,
}

impl std::fmt::Display for TournamentResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} games: X won {}, O won {}, {} draws",
            self.games, self.x_wins, self.o_wins, self.draws
        )
    }
}

/// Plays one game between two AIs, X first.
pub fn play_out<R: Rng + ?Sized>(x: &AiPlayer, o: &AiPlayer, rng: &mut R) -> Result<Game, MoveError> {
    let mut game = Game::new();
    while !game.is_over() {
        let ai = match game.current_player() {
            Mark::X => x,
            Mark::O => o,
        };
        let Some(pos) = ai.choose_move(game.board(), rng) else {
            break;
        };
        game.make_move(pos)?;
    }
    Ok(game)
}

/// Plays `games` games between two difficulties.
#[instrument]
pub fn simulate(
    x: Difficulty,
    o: Difficulty,
    games: u32,
    seed: Option<u64>,
) -> Result<TournamentResult, MoveError> {
    let mut rng = match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    };
    let player_x = AiPlayer::new(x, Mark::X);
    let player_o = AiPlayer::new(o, Mark::O);

    let mut result = TournamentResult::default();
    for round in 0..games {
        let game = play_out(&player_x, &player_o, &mut rng)?;
        result.games += 1;
        match game.winner() {
            Some(Mark::X) => result.x_wins += 1,
            Some(Mark::O) => result.o_wins += 1,
            None => result.draws += 1,
        }
        debug!(round, winner = ?game.winner(), moves = game.moves_played(), "Round finished");
    }

    info!(%result, "Tournament finished");
    Ok(result)
}
