use std::str::FromStr;

/// What occupies a cell, seen from the perspective of the player whose turn it is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CellState {
    Clear,
    Opponent,
    OpponentWall,
    You,
    YourWall,
}

impl CellState {
    pub const ALL: [CellState; 5] = [
        CellState::Clear,
        CellState::Opponent,
        CellState::OpponentWall,
        CellState::You,
        CellState::YourWall,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CellState::Clear => "Clear",
            CellState::Opponent => "Opponent",
            CellState::OpponentWall => "OpponentWall",
            CellState::You => "You",
            CellState::YourWall => "YourWall",
        }
    }

    /// The same cell as seen by the other player.
    pub fn flip(self) -> Self {
        match self {
            CellState::Clear => CellState::Clear,
            CellState::Opponent => CellState::You,
            CellState::OpponentWall => CellState::YourWall,
            CellState::You => CellState::Opponent,
            CellState::YourWall => CellState::OpponentWall,
        }
    }
}

impl std::fmt::Display for CellState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The error type for the [`FromStr`] instance of [`CellState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnknownCellState;

impl FromStr for CellState {
    type Err = UnknownCellState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CellState::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or(UnknownCellState)
    }
}
