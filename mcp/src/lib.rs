mod error;
mod game;
mod player;
mod remote;
pub use error::*;
pub use game::*;
pub use player::*;
pub use remote::*;

use std::time::Duration;

use tron::Grid;

pub struct Config {
    pub grid: Grid,
    /// How long to wait before asking the match server for news again.
    pub poll_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: Grid::STANDARD,
            poll_interval: Duration::from_secs(2),
        }
    }
}
