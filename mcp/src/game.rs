use tracing::{debug, info};
use tron::{visualize, GameState};

use crate::error::{error_chain, TurnViolation};
use crate::player::{CommandPlayer, Player, PlayerConfig};

#[derive(Debug)]
pub enum GameResult {
    WonByPlayer { player_idx: usize },
    Tie,
    IllegalMoveByPlayer { player_idx: usize, err: TurnViolation },
}

/// Lets the player move once from `state`, which is shown to them as is.
///
/// The outer error means the player could not be run, the inner one that
/// they forfeit.
pub fn take_turn<P: Player + ?Sized>(
    player: &mut P,
    state: &GameState,
) -> anyhow::Result<Result<GameState, TurnViolation>> {
    let answer = player.request_move(state)?;
    let next = match GameState::parse_bytes(state.grid(), &answer) {
        Ok(next) => next,
        Err(err) => return Ok(Err(TurnViolation::Malformed(err))),
    };
    Ok(state
        .validate_move(&next)
        .map(|()| next)
        .map_err(TurnViolation::Illegal))
}

/// Plays a game until a player is stuck or forfeits.
///
/// `state` is seen from the first player's perspective. The second player
/// gets a flipped board.
///
/// Returns an error only when a player could not be run, not when an
/// illegal move is played.
pub fn play_game(
    mut state: GameState,
    mut players: [&mut dyn Player; 2],
) -> anyhow::Result<GameResult> {
    let mut turn: usize = 0;
    loop {
        debug!("\n{}", visualize(&state));

        let can_move = [state.can_move(state.you()), state.can_move(state.opponent())];
        match can_move {
            [false, false] => return Ok(GameResult::Tie),
            [false, true] => return Ok(GameResult::WonByPlayer { player_idx: 1 }),
            [true, false] => return Ok(GameResult::WonByPlayer { player_idx: 0 }),
            [true, true] => {}
        }

        let player_idx = turn % 2;
        let player = &mut *players[player_idx];
        debug!(turn, player = player.name(), "Running turn");
        let outcome = if player_idx == 0 {
            take_turn(player, &state)?
        } else {
            take_turn(player, &state.flip())?.map(|next| next.flip())
        };

        match outcome {
            Ok(next) => state = next,
            Err(err) => {
                info!(
                    player = player.name(),
                    turn,
                    "Illegal move: {}",
                    error_chain(&err)
                );
                return Ok(GameResult::IllegalMoveByPlayer { player_idx, err });
            }
        }
        turn += 1;
    }
}

/// Plays a game between two bot commands.
pub fn run_local_match(
    initial: GameState,
    player_1: &PlayerConfig,
    player_2: &PlayerConfig,
) -> anyhow::Result<GameResult> {
    let mut player_1 = CommandPlayer::from_config(player_1)?;
    let mut player_2 = CommandPlayer::from_config(player_2)?;
    play_game(initial, [&mut player_1, &mut player_2])
}
