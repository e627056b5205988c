use crate::{CellState, Pole, Position};

/// The error type for parsing a game state file.
///
/// Line numbers start at 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MalformedState {
    NotUtf8 {
        valid_up_to: usize,
    },
    WrongTokenCount {
        line: usize,
        content: String,
    },
    InvalidCoordinate {
        line: usize,
        content: String,
    },
    UnknownLabel {
        line: usize,
        label: String,
    },
    RepeatedCell {
        line: usize,
        pos: Position,
    },
    ConflictingPole {
        line: usize,
        pole: Pole,
        first: CellState,
        second: CellState,
    },
    WrongCellCount {
        expected: usize,
        found: usize,
    },
    HeadCount {
        state: CellState,
        count: usize,
    },
}

impl std::error::Error for MalformedState {}

impl std::fmt::Display for MalformedState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedState::NotUtf8 { valid_up_to } =>
                write!(f, "The game state is not valid UTF-8 after byte {}", valid_up_to),
            MalformedState::WrongTokenCount { line, content } =>
                write!(f, "Line {} does not have exactly three fields: {:?}", line, content),
            MalformedState::InvalidCoordinate { line, content } =>
                write!(f, "Line {} does not start with two integer coordinates: {:?}", line, content),
            MalformedState::UnknownLabel { line, label } =>
                write!(f, "Line {} has an unknown cell state {:?}, expected one of Clear, Opponent, OpponentWall, You, YourWall", line, label),
            MalformedState::RepeatedCell { line, pos } =>
                write!(f, "Line {} repeats the state for {}", line, pos),
            MalformedState::ConflictingPole { line, pole, first, second } =>
                write!(f, "Line {} gives {} the state {}, but it was already {}", line, Position::Pole(*pole), second, first),
            MalformedState::WrongCellCount { expected, found } =>
                write!(f, "The game state has {} distinct cells, expected {}", found, expected),
            MalformedState::HeadCount { state, count } =>
                write!(f, "The state {} must appear exactly once, but appears {} times", state, count),
        }
    }
}

/// Why a game state is not a legal successor of another.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    NewHeadNotClear {
        pos: Position,
        found: CellState,
    },
    OldHeadNotWall {
        pos: Position,
        found: CellState,
    },
    Unreachable {
        from: Position,
        to: Position,
    },
    TooManyChanges {
        count: usize,
    },
    InvalidChange {
        pos: Position,
        before: CellState,
        after: CellState,
    },
}

impl std::error::Error for IllegalMove {}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::NewHeadNotClear { pos, found } => write!(
                f,
                "The new position {} was not Clear, it was {}",
                pos, found
            ),
            IllegalMove::OldHeadNotWall { pos, found } => write!(
                f,
                "The old position {} did not become YourWall, it became {}",
                pos, found
            ),
            IllegalMove::Unreachable { from, to } => write!(
                f,
                "The new position {} can not be reached from the old position {}",
                to, from
            ),
            IllegalMove::TooManyChanges { count } => {
                write!(f, "{} cells changed, at most two may change", count)
            }
            IllegalMove::InvalidChange { pos, before, after } => write!(
                f,
                "Invalid state change at {} from {} to {}",
                pos, before, after
            ),
        }
    }
}

/// The error type for [`self_check()`](crate::self_check).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelfCheckFailed {
    RoundTrip(MalformedState),
    RoundTripChanged { num_cells: usize },
    FlipNotInvolution,
    Move(IllegalMove),
}

impl std::error::Error for SelfCheckFailed {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SelfCheckFailed::RoundTrip(err) => Some(err),
            SelfCheckFailed::Move(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for SelfCheckFailed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelfCheckFailed::RoundTrip(_) => {
                write!(f, "The serialized game state could not be parsed again")
            }
            SelfCheckFailed::RoundTripChanged { num_cells } => write!(
                f,
                "Serializing and parsing the game state changed {} cells",
                num_cells
            ),
            SelfCheckFailed::FlipNotInvolution => {
                write!(f, "Flipping the game state twice did not restore it")
            }
            SelfCheckFailed::Move(_) => write!(f, "A move to a Clear neighbour was rejected"),
        }
    }
}
