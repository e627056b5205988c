use std::path::PathBuf;

use tron::{IllegalMove, MalformedState};

#[derive(Debug)]
/// Why a player forfeits the game after taking their turn.
pub enum TurnViolation {
    /// The player left something in the game state file that is not a game state.
    Malformed(MalformedState),
    /// The game state is well-formed, but does not follow from a legal move.
    Illegal(IllegalMove),
}

impl std::error::Error for TurnViolation {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TurnViolation::Malformed(err) => Some(err),
            TurnViolation::Illegal(err) => Some(err),
        }
    }
}

impl std::fmt::Display for TurnViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnViolation::Malformed(_) => write!(f, "The returned game state file is invalid"),
            TurnViolation::Illegal(_) => write!(f, "The returned game state is not a legal move"),
        }
    }
}

#[derive(Debug)]
/// A bot process could not be run.
pub enum ProcessFailure {
    StateFile(std::io::Error),
    Launch {
        command: String,
        source: std::io::Error,
    },
    ReadBack {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::error::Error for ProcessFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcessFailure::StateFile(source) => Some(source),
            ProcessFailure::Launch { source, .. } => Some(source),
            ProcessFailure::ReadBack { source, .. } => Some(source),
        }
    }
}

impl std::fmt::Display for ProcessFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessFailure::StateFile(_) => {
                write!(f, "Could not write the game state file for the bot")
            }
            ProcessFailure::Launch { command, .. } => {
                write!(f, "Could not run the bot command '{}'", command)
            }
            ProcessFailure::ReadBack { path, .. } => write!(
                f,
                "Could not read back the game state file '{}' after running the bot",
                path.display()
            ),
        }
    }
}

#[derive(Debug)]
/// Communication with the match server failed.
pub enum NetworkFailure {
    /// Fetching the match status failed. This is retried.
    Poll(anyhow::Error),
    /// Sending the move failed. The move is not resent.
    Submit(anyhow::Error),
}

impl std::error::Error for NetworkFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NetworkFailure::Poll(err) | NetworkFailure::Submit(err) => Some(&**err),
        }
    }
}

impl std::fmt::Display for NetworkFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkFailure::Poll(_) => write!(f, "Could not fetch the game state from the server"),
            NetworkFailure::Submit(_) => write!(f, "Could not send the new game state to the server"),
        }
    }
}

/// Joins an error and all its sources into one line.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut current = err;
    while let Some(source) = current.source() {
        message += ": ";
        message += &source.to_string();
        current = source;
    }
    message
}
