use std::path::PathBuf;

use clap::Parser;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tron::{GameState, Grid, Position};
use tron_bot_utils::Bot;

/// A bot that moves to a random clear neighbour. Useful for testing.
#[derive(Parser)]
struct Args {
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Number of columns of the board
    #[arg(long, default_value_t = 30)]
    width: i32,

    /// Number of rows of the board, including the two poles
    #[arg(long, default_value_t = 30)]
    height: i32,

    /// The game state file, which is rewritten with the move
    game_state: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let rng = StdRng::seed_from_u64(seed);

    anyhow::ensure!(
        args.width >= 1 && args.height >= 3,
        "The board needs at least one column and three rows"
    );
    let grid = Grid::new(args.width, args.height);
    RandomBot { rng }.run(grid, &args.game_state)
}

struct RandomBot {
    rng: StdRng,
}

impl Bot for RandomBot {
    fn play_turn(&mut self, state: &GameState) -> Option<Position> {
        state
            .neighbours_clear(state.you())
            .choose(&mut self.rng)
            .copied()
    }
}
