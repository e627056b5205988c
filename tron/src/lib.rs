pub use cell_state::*;
pub use errors::*;
pub use game_state::*;
pub use geometry::*;
pub use protocol::*;
pub use validation::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod cell_state;
mod errors;
mod game_state;
mod geometry;
mod protocol;
mod validation;
mod visualization;
