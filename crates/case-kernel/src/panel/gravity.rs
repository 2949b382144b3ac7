//! Gravity, refill, and the rising-rows mechanic.

use contracts::{GRID_COLS, GRID_ROWS, PLAYABLE_ROW_START};

use super::PanelPuzzle;

impl PanelPuzzle {
    /// Compacts every column downward, preserving relative order, then
    /// refills vacated cells, but only inside the playable band. Cells above
    /// row 6 stay empty; they exist solely to absorb rising rows.
    pub fn apply_gravity(&self) -> PanelPuzzle {
        let mut next = self.clone();
        for col in 0..GRID_COLS {
            let stack: Vec<_> = (0..GRID_ROWS)
                .filter_map(|row| self.grid[row][col].clone())
                .collect();

            let first_filled_row = GRID_ROWS - stack.len();
            for row in 0..first_filled_row {
                next.grid[row][col] = None;
            }
            for (offset, mut panel) in stack.into_iter().enumerate() {
                let row = first_filled_row + offset;
                panel.row = row;
                panel.col = col;
                next.grid[row][col] = Some(panel);
            }
            for row in PLAYABLE_ROW_START..first_filled_row {
                let panel = next.spawn_panel(row, col);
                next.grid[row][col] = Some(panel);
            }
        }
        next
    }

    /// Shifts the whole grid up one row and installs the incoming row at the
    /// bottom. The top row falls off the board. Implemented for the rising
    /// mechanic; the main game loop does not call this yet.
    pub fn rise(&self) -> PanelPuzzle {
        let mut next = self.clone();
        for row in 0..GRID_ROWS - 1 {
            for col in 0..GRID_COLS {
                let mut cell = self.grid[row + 1][col].clone();
                if let Some(panel) = cell.as_mut() {
                    panel.row = row;
                }
                next.grid[row][col] = cell;
            }
        }
        for (col, mut panel) in self.next_row.clone().into_iter().enumerate() {
            panel.row = GRID_ROWS - 1;
            panel.col = col;
            next.grid[GRID_ROWS - 1][col] = Some(panel);
        }
        next.next_row = next.generate_incoming_row();
        next
    }
}
