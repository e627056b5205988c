use crate::{CellState, GameState};

/// Draws the board with one character per column, including every column of
/// the pole rows.
///
/// `Y`/`O` are the heads, `y`/`o` their walls.
pub fn visualize(state: &GameState) -> String {
    let grid = state.grid();
    let border = format!("+{}+", "-".repeat(grid.width() as usize));

    let mut result = border.clone();
    for y in 0..grid.height() {
        result += "\n|";
        for x in 0..grid.width() {
            result.push(match state.get(grid.normalize(x, y)) {
                CellState::Clear => ' ',
                CellState::Opponent => 'O',
                CellState::OpponentWall => 'o',
                CellState::You => 'Y',
                CellState::YourWall => 'y',
            });
        }
        result += "|";
    }
    result += "\n";
    result += &border;
    result
}
