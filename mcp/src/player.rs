use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::process::Command;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use tron::GameState;

use crate::error::ProcessFailure;

/// The command run when a player has no config.
pub const DEFAULT_EXECUTABLE: &str = if cfg!(windows) {
    "start.bat"
} else {
    "./start.sh"
};

/// How to run a bot, as stored in a player config JSON file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub nick: String,
    /// The program followed by its arguments. The path of the game state
    /// file is appended as the last argument.
    pub cmd: Vec<String>,
}

impl PlayerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Could not open player config '{}'", path.display()))?;
        let config = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Invalid player config '{}'", path.display()))?;
        Ok(config)
    }

    pub fn with_default_command(nick: &str) -> Self {
        Self {
            nick: String::from(nick),
            cmd: vec![String::from(DEFAULT_EXECUTABLE)],
        }
    }
}

/// Something that plays a turn.
pub trait Player {
    fn name(&self) -> &str;

    /// Shows `state` to the player, who always sees themselves as `You`, and
    /// returns the raw contents of the game state file they answered with.
    ///
    /// Returns an error only if the player could not be asked at all. Whether
    /// the answer makes sense is up to the caller.
    fn request_move(&mut self, state: &GameState) -> anyhow::Result<Vec<u8>>;
}

/// A bot that is run as a new process for every turn.
pub struct CommandPlayer {
    pub name: String,
    program: String,
    args: Vec<String>,
}

impl CommandPlayer {
    pub fn new(name: &str, cmd: &[String]) -> anyhow::Result<Self> {
        let (program, args) = cmd
            .split_first()
            .with_context(|| format!("The command for player {} is empty", name))?;
        Ok(Self {
            name: String::from(name),
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    pub fn from_config(config: &PlayerConfig) -> anyhow::Result<Self> {
        Self::new(&config.nick, &config.cmd)
    }

    fn command_line(&self) -> String {
        std::iter::once(&self.program)
            .chain(&self.args)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Player for CommandPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn request_move(&mut self, state: &GameState) -> anyhow::Result<Vec<u8>> {
        // Deleted when dropped, whichever way this function is left.
        let mut state_file = tempfile::NamedTempFile::new().map_err(ProcessFailure::StateFile)?;
        state
            .write_to(state_file.as_file_mut())
            .map_err(ProcessFailure::StateFile)?;
        let path = state_file.path().to_path_buf();

        trace!(player = &self.name, path = %path.display(), "Running bot");
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(&path)
            .status()
            .map_err(|source| ProcessFailure::Launch {
                command: self.command_line(),
                source,
            })?;
        // Only the game state file counts, not the exit code.
        if !status.success() {
            debug!(player = &self.name, %status, "Bot exited unsuccessfully");
        }

        let answer = std::fs::read(&path)
            .map_err(|source| ProcessFailure::ReadBack { path, source })?;
        trace!(player = &self.name, bytes = answer.len(), "Read back game state");
        Ok(answer)
    }
}
