use quickcheck::{Arbitrary, Gen};

use crate::{CellState, GameState, Grid};

/// A valid game state on a small grid, with walls scattered at random.
///
/// The walls need not form trails, so these states are not necessarily reachable in a game.
#[derive(Clone, Debug)]
pub struct ArbitraryState(pub GameState);

impl Arbitrary for ArbitraryState {
    fn arbitrary(g: &mut Gen) -> Self {
        let width = (u8::arbitrary(g) % 8) as i32 + 1;
        let height = (u8::arbitrary(g) % 8) as i32 + 3;
        let grid = Grid::new(width, height);
        let num_cells = grid.num_cells();

        let mut cells: Vec<CellState> = (0..num_cells)
            .map(|_| {
                *g.choose(&[
                    CellState::Clear,
                    CellState::Clear,
                    CellState::Clear,
                    CellState::YourWall,
                    CellState::OpponentWall,
                ])
                .unwrap()
            })
            .collect();
        let you = usize::arbitrary(g) % num_cells;
        let opponent = (you + 1 + usize::arbitrary(g) % (num_cells - 1)) % num_cells;
        cells[you] = CellState::You;
        cells[opponent] = CellState::Opponent;

        ArbitraryState(GameState::from_cells(grid, cells).unwrap())
    }
}
