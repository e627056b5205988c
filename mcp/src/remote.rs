use anyhow::Context;
use tracing::{debug, info, warn};
use tron::{visualize, GameState, RemoteStatus, Submission, Winner};

use crate::error::{error_chain, NetworkFailure, TurnViolation};
use crate::game::take_turn;
use crate::player::{CommandPlayer, Player, PlayerConfig};
use crate::Config;

/// The server that owns the state of a remote match.
pub trait MatchAuthority {
    fn poll(&mut self) -> anyhow::Result<RemoteStatus>;
    fn submit(&mut self, game_state: &str) -> anyhow::Result<()>;
}

/// A match server reached over HTTP.
///
/// The status is fetched with a GET request returning JSON, and moves are sent
/// as a form-encoded POST to the same URL.
pub struct HttpAuthority {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpAuthority {
    pub fn new(url: &str) -> Self {
        Self {
            url: String::from(url),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl MatchAuthority for HttpAuthority {
    fn poll(&mut self) -> anyhow::Result<RemoteStatus> {
        let status = self
            .client
            .get(&self.url)
            .send()?
            .error_for_status()?
            .json::<RemoteStatus>()?;
        Ok(status)
    }

    fn submit(&mut self, game_state: &str) -> anyhow::Result<()> {
        let submission = Submission {
            game_state: String::from(game_state),
        };
        self.client
            .post(&self.url)
            .form(&submission)
            .send()?
            .error_for_status()?;
        Ok(())
    }
}

#[derive(Debug)]
pub enum RemoteResult {
    Finished {
        winners: Vec<Winner>,
        description: String,
    },
    /// Our own bot forfeited. Nothing was sent to the server.
    IllegalMove { err: TurnViolation },
}

/// Takes part in a remote match until it is over.
///
/// Failing to fetch the status is retried after `config.poll_interval`.
/// Failing to send a move is an error wrapping [`NetworkFailure::Submit`], and
/// so is a bot that could not be run. In both cases the server state was left
/// untouched and the match can be resumed.
pub fn play_remote_game<A: MatchAuthority, P: Player + ?Sized>(
    config: &Config,
    authority: &mut A,
    player: &mut P,
) -> anyhow::Result<RemoteResult> {
    loop {
        debug!("Fetching state from server");
        let status = match authority.poll() {
            Ok(status) => status,
            Err(err) => {
                warn!("{}", error_chain(&NetworkFailure::Poll(err)));
                std::thread::sleep(config.poll_interval);
                continue;
            }
        };

        if status.is_finished() {
            info!(winners = ?status.winners, "{}", status.description);
            return Ok(RemoteResult::Finished {
                winners: status.winners,
                description: status.description,
            });
        }

        let state = GameState::parse(config.grid, &status.game_state)
            .context("The server sent an invalid game state")?;
        debug!("\n{}", visualize(&state));
        debug!(description = %status.description, "Status");

        if !status.is_my_turn() {
            std::thread::sleep(config.poll_interval);
            continue;
        }

        info!(player = player.name(), "Running your bot");
        let next = match take_turn(player, &state)? {
            Ok(next) => next,
            Err(err) => {
                info!("Illegal move: {}", error_chain(&err));
                return Ok(RemoteResult::IllegalMove { err });
            }
        };
        authority
            .submit(&next.serialize())
            .map_err(NetworkFailure::Submit)?;
    }
}

/// Takes part in the remote match at `url` with a bot command.
pub fn run_remote_client(
    config: &Config,
    url: &str,
    player: &PlayerConfig,
) -> anyhow::Result<RemoteResult> {
    let mut authority = HttpAuthority::new(url);
    let mut player = CommandPlayer::from_config(player)?;
    play_remote_game(config, &mut authority, &mut player)
}
