use crate::model::Grid;

/// Draws a board for terminal inspection, one line per row, with occupied
/// cells as `■` and empty cells as spaces.
pub fn render_board(grid: &Grid) -> String {
    let mut out = String::with_capacity(grid.height() * (grid.width() + 1));
    for row in grid.as_ndarray().rows().into_iter() {
        for &occupied in row {
            out.push(if occupied { '■' } else { ' ' });
        }
        out.push('\n');
    }
    out
}
