//! Match detection: maximal row/column runs and compound-shape classification.

use contracts::{Grid, PanelKind, GRID_COLS, GRID_ROWS};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MatchDirection {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MatchShape {
    Line,
    LShape,
    TShape,
}

/// One resolved match. For compound shapes the positions are the union of the
/// intersecting runs and `anchor` is the intersection cell; for lines the
/// anchor is the run's middle position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchGroup {
    pub kind: PanelKind,
    pub positions: Vec<(usize, usize)>,
    pub direction: MatchDirection,
    pub shape: MatchShape,
    pub anchor: (usize, usize),
}

#[derive(Debug, Clone)]
struct Run {
    kind: PanelKind,
    positions: Vec<(usize, usize)>,
}

impl Run {
    fn middle(&self) -> (usize, usize) {
        self.positions[self.positions.len() / 2]
    }

    fn contains(&self, position: (usize, usize)) -> bool {
        self.positions.contains(&position)
    }

    /// Strictly interior: not the run's first or last cell.
    fn is_interior(&self, position: (usize, usize)) -> bool {
        let last = self.positions.len() - 1;
        self.positions
            .iter()
            .position(|candidate| *candidate == position)
            .map(|index| index != 0 && index != last)
            .unwrap_or(false)
    }
}

/// Scans every row and column for maximal runs of three or more identical
/// panel kinds, merging row/column runs that share a cell into compound L or
/// T matches.
pub fn find_matches(grid: &Grid) -> Vec<MatchGroup> {
    let horizontal = scan_runs(grid, MatchDirection::Horizontal);
    let vertical = scan_runs(grid, MatchDirection::Vertical);

    let mut groups: Vec<MatchGroup> = Vec::new();
    let mut consumed_vertical = vec![false; vertical.len()];

    for h_run in &horizontal {
        let mut positions = h_run.positions.clone();
        let mut shape = MatchShape::Line;
        let mut anchor = h_run.middle();

        for (v_index, v_run) in vertical.iter().enumerate() {
            if consumed_vertical[v_index] {
                continue;
            }
            let intersection = h_run
                .positions
                .iter()
                .copied()
                .find(|position| v_run.contains(*position));
            let Some(cell) = intersection else {
                continue;
            };
            consumed_vertical[v_index] = true;
            if shape == MatchShape::Line {
                // First intersection fixes the classification and anchor.
                shape = if h_run.is_interior(cell) || v_run.is_interior(cell) {
                    MatchShape::TShape
                } else {
                    MatchShape::LShape
                };
                anchor = cell;
            }
            for position in &v_run.positions {
                if !positions.contains(position) {
                    positions.push(*position);
                }
            }
        }

        groups.push(MatchGroup {
            kind: h_run.kind,
            positions,
            direction: MatchDirection::Horizontal,
            shape,
            anchor,
        });
    }

    for (v_index, v_run) in vertical.iter().enumerate() {
        if consumed_vertical[v_index] {
            continue;
        }
        groups.push(MatchGroup {
            kind: v_run.kind,
            positions: v_run.positions.clone(),
            direction: MatchDirection::Vertical,
            shape: MatchShape::Line,
            anchor: v_run.middle(),
        });
    }

    groups
}

fn scan_runs(grid: &Grid, direction: MatchDirection) -> Vec<Run> {
    let (lanes, cells) = match direction {
        MatchDirection::Horizontal => (GRID_ROWS, GRID_COLS),
        MatchDirection::Vertical => (GRID_COLS, GRID_ROWS),
    };
    let kind_at = |lane: usize, cell: usize| -> Option<PanelKind> {
        let (row, col) = match direction {
            MatchDirection::Horizontal => (lane, cell),
            MatchDirection::Vertical => (cell, lane),
        };
        grid[row][col].as_ref().map(|panel| panel.kind)
    };
    let position_of = |lane: usize, cell: usize| -> (usize, usize) {
        match direction {
            MatchDirection::Horizontal => (lane, cell),
            MatchDirection::Vertical => (cell, lane),
        }
    };

    let mut runs = Vec::new();
    for lane in 0..lanes {
        let mut cell = 0;
        while cell < cells {
            let Some(kind) = kind_at(lane, cell) else {
                cell += 1;
                continue;
            };
            let start = cell;
            while cell < cells && kind_at(lane, cell) == Some(kind) {
                cell += 1;
            }
            if cell - start >= 3 {
                runs.push(Run {
                    kind,
                    positions: (start..cell).map(|c| position_of(lane, c)).collect(),
                });
            }
        }
    }
    runs
}
