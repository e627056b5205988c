use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use rand::Rng;

use crate::{CellState, Grid, MalformedState, Position};

/// The full board as seen by the player whose turn it is.
///
/// A game state is never modified. Moving produces a new state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    grid: Grid,
    /// One entry per cell, indexed by [`Grid::index()`].
    cells: Vec<CellState>,
    /// Derived from `cells`, which contains exactly one `You`.
    you: Position,
    /// Derived from `cells`, which contains exactly one `Opponent`.
    opponent: Position,
}

impl GameState {
    /// Creates a game state from one entry per cell, in the order of [`Grid::positions()`].
    pub fn from_cells(grid: Grid, cells: Vec<CellState>) -> Result<Self, MalformedState> {
        if cells.len() != grid.num_cells() {
            return Err(MalformedState::WrongCellCount {
                expected: grid.num_cells(),
                found: cells.len(),
            });
        }
        let you = find_head(grid, &cells, CellState::You)?;
        let opponent = find_head(grid, &cells, CellState::Opponent)?;
        Ok(Self {
            grid,
            cells,
            you,
            opponent,
        })
    }

    /// Parses the line-based game state format.
    ///
    /// Every line is `<x> <y> <state>`. Coordinates are normalized, so a pole may
    /// (and usually will) be listed once per column, but all of its lines must agree.
    /// Blank lines are ignored.
    pub fn parse(grid: Grid, text: &str) -> Result<Self, MalformedState> {
        let mut slots: Vec<Option<CellState>> = vec![None; grid.num_cells()];

        for (line_idx, line) in text.lines().enumerate() {
            let line_no = line_idx + 1;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }
            let &[x, y, label] = tokens.as_slice() else {
                return Err(MalformedState::WrongTokenCount {
                    line: line_no,
                    content: String::from(line),
                });
            };
            let state: CellState = label.parse().map_err(|_| MalformedState::UnknownLabel {
                line: line_no,
                label: String::from(label),
            })?;
            let (Ok(x), Ok(y)) = (x.parse::<i32>(), y.parse::<i32>()) else {
                return Err(MalformedState::InvalidCoordinate {
                    line: line_no,
                    content: String::from(line),
                });
            };

            let pos = grid.normalize(x, y);
            let slot = &mut slots[grid.index(pos)];
            match (*slot, pos) {
                (None, _) => *slot = Some(state),
                (Some(first), Position::Pole(pole)) => {
                    if first != state {
                        return Err(MalformedState::ConflictingPole {
                            line: line_no,
                            pole,
                            first,
                            second: state,
                        });
                    }
                }
                (Some(_), Position::Cell(_)) => {
                    return Err(MalformedState::RepeatedCell { line: line_no, pos });
                }
            }
        }

        let found = slots.iter().filter(|slot| slot.is_some()).count();
        if found != grid.num_cells() {
            return Err(MalformedState::WrongCellCount {
                expected: grid.num_cells(),
                found,
            });
        }
        Self::from_cells(grid, slots.into_iter().flatten().collect())
    }

    /// Like [`Self::parse()`], for file contents that may not even be text.
    pub fn parse_bytes(grid: Grid, bytes: &[u8]) -> Result<Self, MalformedState> {
        let text = std::str::from_utf8(bytes).map_err(|err| MalformedState::NotUtf8 {
            valid_up_to: err.valid_up_to(),
        })?;
        Self::parse(grid, text)
    }

    pub fn load<R: Read>(grid: Grid, mut reader: R) -> anyhow::Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self::parse_bytes(grid, &bytes)?)
    }

    pub fn load_file(grid: Grid, path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Could not read game state file '{}'", path.display()))?;
        Ok(Self::parse_bytes(grid, &bytes)?)
    }

    /// An empty board with the two players in the same row, half a board apart.
    ///
    /// Panics if the grid is narrower than two columns.
    pub fn random_start<R: Rng>(grid: Grid, rng: &mut R) -> Self {
        assert!(grid.width() >= 2, "both players need a column of their own");
        let x = rng.gen_range(0..grid.width());
        let y = rng.gen_range(1..grid.height() - 1);
        let you = grid.normalize(x, y);
        let opponent = grid.normalize(x + grid.width() / 2, y);

        let mut cells = vec![CellState::Clear; grid.num_cells()];
        cells[grid.index(you)] = CellState::You;
        cells[grid.index(opponent)] = CellState::Opponent;
        Self {
            grid,
            cells,
            you,
            opponent,
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// The head of the player whose turn it is.
    pub fn you(&self) -> Position {
        self.you
    }

    pub fn opponent(&self) -> Position {
        self.opponent
    }

    pub fn get(&self, pos: Position) -> CellState {
        self.cells[self.grid.index(pos)]
    }

    /// All cells, in the order of [`Grid::positions()`].
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, CellState)> + '_ {
        self.grid.positions().zip(self.cells.iter().copied())
    }

    /// Writes one `<x> <y> <state>` line per cell, terminated by CRLF.
    ///
    /// A pole is written once for every column.
    pub fn serialize(&self) -> String {
        self.iter()
            .flat_map(|(pos, state)| {
                let (x, y) = self.grid.coords(pos);
                let columns = if pos.is_pole() {
                    0..self.grid.width()
                } else {
                    x..x + 1
                };
                columns.map(move |x| format!("{} {} {}\r\n", x, y, state))
            })
            .collect()
    }

    pub fn write_to<W: std::io::Write>(&self, mut writer: W) -> std::io::Result<()> {
        writer.write_all(self.serialize().as_bytes())?;
        writer.flush()
    }

    /// The neighbours of `pos` which are `Clear`.
    pub fn neighbours_clear(&self, pos: Position) -> Vec<Position> {
        self.grid
            .neighbours(pos)
            .into_iter()
            .filter(|&p| self.get(p) == CellState::Clear)
            .collect()
    }

    pub fn can_move(&self, pos: Position) -> bool {
        self.grid
            .neighbours(pos)
            .into_iter()
            .any(|p| self.get(p) == CellState::Clear)
    }

    /// Every cell whose state differs, mapped to `(state in self, state in other)`.
    ///
    /// Panics if the states are on different grids.
    pub fn difference(&self, other: &GameState) -> BTreeMap<Position, (CellState, CellState)> {
        assert_eq!(self.grid, other.grid, "comparing states of different grids");
        self.iter()
            .zip(other.cells.iter().copied())
            .filter(|&((_, before), after)| before != after)
            .map(|((pos, before), after)| (pos, (before, after)))
            .collect()
    }

    /// The same board from the opponent's perspective.
    pub fn flip(&self) -> Self {
        Self {
            grid: self.grid,
            cells: self.cells.iter().map(|state| state.flip()).collect(),
            you: self.opponent,
            opponent: self.you,
        }
    }

    /// The simplest successor: the head moves to `pos` and leaves a wall behind.
    ///
    /// Legality is not checked, see [`Self::validate_move()`]. Panics if `pos` is
    /// the opponent's head.
    pub fn move_to(&self, pos: Position) -> Self {
        assert_ne!(pos, self.opponent, "cannot move onto the opponent's head");
        let mut cells = self.cells.clone();
        cells[self.grid.index(self.you)] = CellState::YourWall;
        cells[self.grid.index(pos)] = CellState::You;
        Self {
            grid: self.grid,
            cells,
            you: pos,
            opponent: self.opponent,
        }
    }
}

fn find_head(grid: Grid, cells: &[CellState], head: CellState) -> Result<Position, MalformedState> {
    let mut found = grid
        .positions()
        .zip(cells)
        .filter(|&(_, &state)| state == head)
        .map(|(pos, _)| pos);
    let first = found.next();
    match (first, found.count()) {
        (Some(pos), 0) => Ok(pos),
        (first, rest) => Err(MalformedState::HeadCount {
            state: head,
            count: usize::from(first.is_some()) + rest,
        }),
    }
}
