use std::path::Path;

use tron::{GameState, Grid, Position};

/// A trait to simplify writing bots.
pub trait Bot {
    /// Where to move the `You` head. Returning `None` leaves the board
    /// unchanged, which forfeits the game.
    fn play_turn(&mut self, state: &GameState) -> Option<Position>;

    /// Plays one turn on the game state file at `path`.
    ///
    /// The judge passes this path as the last command line argument, and reads
    /// the file back after the bot exits.
    fn run(&mut self, grid: Grid, path: &Path) -> anyhow::Result<()> {
        let state = GameState::load_file(grid, path)?;
        if let Some(to) = self.play_turn(&state) {
            let next = state.move_to(to);
            std::fs::write(path, next.serialize())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tron::Pole;

    use super::*;

    struct PoleSeeker;

    impl Bot for PoleSeeker {
        fn play_turn(&mut self, state: &GameState) -> Option<Position> {
            let clear = state.neighbours_clear(state.you());
            clear
                .iter()
                .copied()
                .find(Position::is_pole)
                .or_else(|| clear.first().copied())
        }
    }

    #[test]
    fn run_rewrites_the_state_file() {
        let grid = Grid::new(5, 3);
        let start = GameState::parse(
            grid,
            "0 0 Clear\n0 1 You\n1 1 Clear\n2 1 Opponent\n3 1 Clear\n4 1 Clear\n0 2 Clear\n",
        )
        .unwrap();
        let file = tempfile::NamedTempFile::new().unwrap();
        start.write_to(file.as_file()).unwrap();

        PoleSeeker.run(grid, file.path()).unwrap();

        let next = GameState::load_file(grid, file.path()).unwrap();
        assert_eq!(start.validate_move(&next), Ok(()));
        assert!(matches!(next.you(), Position::Pole(Pole::Bottom)));
    }
}
