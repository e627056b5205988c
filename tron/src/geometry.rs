use std::fmt;

/// One of the two board rows that collapse into a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pole {
    /// Row `0`.
    Top,
    /// Row `height - 1`.
    Bottom,
}

/// A cell of the board.
///
/// Positions are obtained from [`Grid::normalize()`] (or [`Grid::positions()`]),
/// so equal cells always compare equal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Position {
    Pole(Pole),
    Cell(Interior),
}

/// A cell strictly between the two pole rows, with its column already wrapped.
///
/// Only a [`Grid`] can build one, so a pole row can't pass for an interior cell:
///
/// ```compile_fail
/// use tron::{Interior, Position};
/// let bottom_row = Position::Cell(Interior { x: 0, y: 3 });
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interior {
    x: i32,
    y: i32,
}

impl Interior {
    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }
}

impl Position {
    pub fn is_pole(&self) -> bool {
        matches!(self, Position::Pole(_))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Pole(Pole::Top) => write!(f, "the top pole"),
            Position::Pole(Pole::Bottom) => write!(f, "the bottom pole"),
            Position::Cell(Interior { x, y }) => write!(f, "({}, {})", x, y),
        }
    }
}

/// The dimensions of a board, which wraps around horizontally and has a
/// pole at the top and bottom.
///
/// Walking off the top or bottom row bounces back: rows are folded by reflection,
/// so the row after `height - 1` is `height - 2`. Columns are a plain modulo.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    width: i32,
    height: i32,
}

impl Default for Grid {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl Grid {
    /// The 30 x 30 board used in matches.
    pub const STANDARD: Grid = Grid {
        width: 30,
        height: 30,
    };

    /// Panics if there is not at least one row between the poles, or no column,
    /// or if the cells can't be counted in an `i32`.
    pub fn new(width: i32, height: i32) -> Self {
        match Self::try_new(width, height) {
            Some(grid) => grid,
            None => panic!("invalid grid size {} x {}", width, height),
        }
    }

    /// Like [`Self::new()`], but returns `None` instead of panicking.
    pub fn try_new(width: i32, height: i32) -> Option<Self> {
        if width < 1 || height < 3 {
            return None;
        }
        // Dense indices are computed in i32
        width.checked_mul(height - 2)?.checked_add(2)?;
        Some(Self { width, height })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// The number of distinct cells, counting each pole once.
    pub fn num_cells(&self) -> usize {
        (self.width * (self.height - 2) + 2) as usize
    }

    /// Maps any coordinate pair onto the board.
    pub fn normalize(&self, x: i32, y: i32) -> Position {
        let period = self.height - 1;
        let folds = y.div_euclid(period);
        let rem = y.rem_euclid(period);
        let y = if folds.rem_euclid(2) == 0 {
            rem
        } else {
            period - rem
        };
        if y == 0 {
            Position::Pole(Pole::Top)
        } else if y == period {
            Position::Pole(Pole::Bottom)
        } else {
            Position::Cell(Interior {
                x: x.rem_euclid(self.width),
                y,
            })
        }
    }

    /// The coordinates under which a position is written. Poles report column 0.
    pub fn coords(&self, pos: Position) -> (i32, i32) {
        match pos {
            Position::Pole(Pole::Top) => (0, 0),
            Position::Pole(Pole::Bottom) => (0, self.height - 1),
            Position::Cell(Interior { x, y }) => (x, y),
        }
    }

    /// Dense index of a position, in the order of [`Self::positions()`].
    pub fn index(&self, pos: Position) -> usize {
        match pos {
            Position::Pole(Pole::Top) => 0,
            Position::Pole(Pole::Bottom) => self.num_cells() - 1,
            Position::Cell(Interior { x, y }) => {
                debug_assert!((0..self.width).contains(&x) && (1..self.height - 1).contains(&y));
                1 + (x * (self.height - 2) + (y - 1)) as usize
            }
        }
    }

    /// Every cell exactly once: the top pole, the interior column by column,
    /// then the bottom pole.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let Grid { width, height } = *self;
        let interior = (0..width)
            .flat_map(move |x| (1..height - 1).map(move |y| Position::Cell(Interior { x, y })));
        std::iter::once(Position::Pole(Pole::Top))
            .chain(interior)
            .chain(std::iter::once(Position::Pole(Pole::Bottom)))
    }

    /// The cells one step away from `pos`.
    ///
    /// A pole touches every cell of the adjacent row, so it has `width`
    /// neighbours. Other cells have up to four.
    pub fn neighbours(&self, pos: Position) -> Vec<Position> {
        match pos {
            Position::Pole(pole) => {
                let y = match pole {
                    Pole::Top => 1,
                    Pole::Bottom => self.height - 2,
                };
                (0..self.width).map(|x| self.normalize(x, y)).collect()
            }
            Position::Cell(Interior { x, y }) => {
                let mut neighbours = Vec::with_capacity(4);
                for (dx, dy) in [(0, 1), (1, 0), (-1, 0), (0, -1)] {
                    let p = self.normalize(x + dx, y + dy);
                    // Narrow boards wrap onto the same cell from both sides
                    if p != pos && !neighbours.contains(&p) {
                        neighbours.push(p);
                    }
                }
                neighbours
            }
        }
    }
}
