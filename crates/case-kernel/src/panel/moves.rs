//! Legal-move scanning for loss detection and hints.

use contracts::{Grid, GRID_COLS, GRID_ROWS};

use super::matches::find_matches;
use super::swap_cells;

/// Whether any single adjacent swap produces a match. Testing right and down
/// from every cell covers all four directions: a cell's left/up swap is some
/// other cell's right/down.
pub fn has_valid_moves(grid: &Grid) -> bool {
    find_valid_move(grid).is_some()
}

/// The first move (scan order) whose tentative swap yields at least one
/// match. Powers the hint feature.
pub fn find_valid_move(grid: &Grid) -> Option<((usize, usize), (usize, usize))> {
    for row in 0..GRID_ROWS {
        for col in 0..GRID_COLS {
            if grid[row][col].is_none() {
                continue;
            }
            if col + 1 < GRID_COLS && grid[row][col + 1].is_some() {
                let to = (row, col + 1);
                if swap_creates_match(grid, (row, col), to) {
                    return Some(((row, col), to));
                }
            }
            if row + 1 < GRID_ROWS && grid[row + 1][col].is_some() {
                let to = (row + 1, col);
                if swap_creates_match(grid, (row, col), to) {
                    return Some(((row, col), to));
                }
            }
        }
    }
    None
}

fn swap_creates_match(grid: &Grid, from: (usize, usize), to: (usize, usize)) -> bool {
    let mut scratch = grid.clone();
    swap_cells(&mut scratch, from, to);
    !find_matches(&scratch).is_empty()
}
