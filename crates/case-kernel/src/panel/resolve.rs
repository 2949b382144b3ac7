//! Match resolution: clearing, chained bonus activation, bonus creation, and
//! scoring.

use std::collections::{BTreeSet, VecDeque};

use contracts::{BonusKind, Panel, GRID_COLS, GRID_ROWS};

use super::matches::{MatchDirection, MatchGroup, MatchShape};
use super::{has_valid_moves, PanelPuzzle};

impl PanelPuzzle {
    /// Resolves one wave of matches.
    ///
    /// An empty wave is the settle signal: the combo resets, animation stops,
    /// and the terminal conditions (target reached, or no legal move left)
    /// are evaluated. A non-empty wave clears the matched cells plus anything
    /// swept up by chained bonus activations, scores the wave, creates any
    /// earned bonus panels, and bumps the combo for the next wave.
    pub fn process_matches(&self, matches: &[MatchGroup]) -> PanelPuzzle {
        let mut next = self.clone();
        if matches.is_empty() {
            next.combo = 0;
            next.is_animating = false;
            if !next.is_game_over {
                if next.is_won() || !has_valid_moves(&next.grid) {
                    next.is_game_over = true;
                }
            }
            return next;
        }

        let base: u32 = matches
            .iter()
            .map(|group| group.positions.len() as u32 * 10)
            .sum();
        let multiplier = 1.0 + f64::from(self.combo) * 0.5;
        next.score = self.score + (f64::from(base) * multiplier).floor() as u32;
        next.combo = self.combo + 1;
        next.is_animating = true;

        // Breadth-first over positions to clear. A bonus caught in the sweep
        // activates once, enqueues its own region, and is remembered so a
        // crossing activation can never re-trigger it.
        let mut queue: VecDeque<(usize, usize)> = matches
            .iter()
            .flat_map(|group| group.positions.iter().copied())
            .collect();
        let mut cleared: BTreeSet<(usize, usize)> = BTreeSet::new();
        let mut activated: BTreeSet<(usize, usize)> = BTreeSet::new();
        while let Some(position) = queue.pop_front() {
            if !cleared.insert(position) {
                continue;
            }
            let Some(panel) = self.grid[position.0][position.1].as_ref() else {
                continue;
            };
            if let Some(bonus) = panel.bonus {
                if activated.insert(position) {
                    for cell in bonus_region(bonus, position) {
                        queue.push_back(cell);
                    }
                }
            }
        }

        for (row, col) in &cleared {
            next.grid[*row][*col] = None;
        }

        // Bonus creation uses each match's original shape and size, not the
        // combined clear region.
        for group in matches {
            if let Some(bonus) = created_bonus(group) {
                let (row, col) = group.anchor;
                let id = next.take_panel_id();
                next.grid[row][col] = Some(Panel {
                    id,
                    kind: group.kind,
                    bonus: Some(bonus),
                    row,
                    col,
                });
            }
        }

        next
    }
}

fn created_bonus(group: &MatchGroup) -> Option<BonusKind> {
    match group.shape {
        MatchShape::LShape | MatchShape::TShape => Some(BonusKind::Blast),
        MatchShape::Line => match group.positions.len() {
            length if length >= 5 => Some(BonusKind::Cross),
            4 => Some(match group.direction {
                MatchDirection::Horizontal => BonusKind::LineH,
                MatchDirection::Vertical => BonusKind::LineV,
            }),
            _ => None,
        },
    }
}

/// The cells a bonus sweeps when it activates.
pub(super) fn bonus_region(bonus: BonusKind, origin: (usize, usize)) -> Vec<(usize, usize)> {
    let (row, col) = origin;
    match bonus {
        BonusKind::LineH => (0..GRID_COLS).map(|c| (row, c)).collect(),
        BonusKind::LineV => (0..GRID_ROWS).map(|r| (r, col)).collect(),
        BonusKind::Cross => {
            let mut cells: Vec<(usize, usize)> = (0..GRID_COLS).map(|c| (row, c)).collect();
            cells.extend((0..GRID_ROWS).map(|r| (r, col)));
            cells
        }
        BonusKind::Blast => {
            let mut cells = Vec::new();
            for r in row.saturating_sub(1)..=(row + 1).min(GRID_ROWS - 1) {
                for c in col.saturating_sub(1)..=(col + 1).min(GRID_COLS - 1) {
                    cells.push((r, c));
                }
            }
            cells
        }
    }
}
