use serde::{Deserialize, Serialize};

/// The status of a remote match, as reported by the match server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteStatus {
    /// The player number assigned to the requesting client.
    pub player_num: u32,
    /// The player whose turn it is.
    pub current_player: u32,
    /// Empty while the match is running.
    #[serde(default)]
    pub winners: Vec<Winner>,
    /// The board in the game state file format, from the requesting client's perspective.
    pub game_state: String,
    /// Human-readable status.
    #[serde(default)]
    pub description: String,
}

impl RemoteStatus {
    pub fn is_finished(&self) -> bool {
        !self.winners.is_empty()
    }

    pub fn is_my_turn(&self) -> bool {
        self.current_player == self.player_num
    }
}

/// A winner of a remote match. Servers report either player numbers or names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Winner {
    Number(u32),
    Name(String),
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Winner::Number(num) => write!(f, "{}", num),
            Winner::Name(name) => write!(f, "{}", name),
        }
    }
}

/// The form body for submitting a move to the match server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Submission {
    pub game_state: String,
}
