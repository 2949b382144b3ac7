//! Panel puzzle engine: a self-contained match-3 simulation.
//!
//! The engine has no dependency on case data. Every transition is a pure,
//! synchronous, total function from a state value to a new state value; the
//! host drives cascades by calling `find_matches` / `process_matches` /
//! `apply_gravity` until a settle pass finds nothing, and owns all pacing.
//! Invalid inputs (non-adjacent swaps, selecting an empty cell, interacting
//! while a resolution is in flight) are no-ops, never errors.

mod gravity;
mod matches;
mod moves;
mod resolve;

pub use matches::{find_matches, MatchDirection, MatchGroup, MatchShape};
pub use moves::{find_valid_move, has_valid_moves};

use contracts::{Grid, Panel, PanelKind, GRID_COLS, GRID_ROWS, PLAYABLE_ROW_START};
use serde::{Deserialize, Serialize};

use crate::rng::CaseRng;

pub const DEFAULT_TARGET_SCORE: u32 = 250;
pub const DEFAULT_TIME_LIMIT_SECONDS: f64 = 60.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PuzzleConfig {
    pub seed: String,
    pub target_score: u32,
    pub time_limit_seconds: f64,
}

impl PuzzleConfig {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            target_score: DEFAULT_TARGET_SCORE,
            time_limit_seconds: DEFAULT_TIME_LIMIT_SECONDS,
        }
    }
}

/// The whole puzzle state. Transitions clone and return; nothing mutates in
/// place, so a host can keep old states around for undo or replay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PanelPuzzle {
    pub grid: Grid,
    pub score: u32,
    pub combo: u32,
    pub target_score: u32,
    pub time_remaining: f64,
    pub is_animating: bool,
    pub is_game_over: bool,
    pub selection: Option<(usize, usize)>,
    /// The incoming row for the rising mechanic, kept generated even though
    /// the main game loop does not invoke rising yet.
    pub next_row: Vec<Panel>,
    rng: CaseRng,
    next_panel_id: u64,
}

impl PanelPuzzle {
    /// Builds a fresh board. The playable band (rows 6–11) starts full with
    /// no pre-existing matches; the top half of the grid starts empty.
    pub fn new(config: &PuzzleConfig) -> Self {
        let mut rng = CaseRng::new(&config.seed);
        let mut next_panel_id = 0_u64;
        let mut grid: Grid = vec![vec![None; GRID_COLS]; GRID_ROWS];
        for row in PLAYABLE_ROW_START..GRID_ROWS {
            for col in 0..GRID_COLS {
                let kind = pick_clean_kind(&grid, row, col, &mut rng);
                grid[row][col] = Some(Panel {
                    id: next_panel_id,
                    kind,
                    bonus: None,
                    row,
                    col,
                });
                next_panel_id += 1;
            }
        }

        let mut puzzle = Self {
            grid,
            score: 0,
            combo: 0,
            target_score: config.target_score,
            time_remaining: config.time_limit_seconds,
            is_animating: false,
            is_game_over: false,
            selection: None,
            next_row: Vec::new(),
            rng,
            next_panel_id,
        };
        puzzle.next_row = puzzle.generate_incoming_row();
        puzzle
    }

    /// Handles a click on a cell. First click selects, clicking the selection
    /// clears it, clicking an adjacent cell attempts the swap, clicking
    /// anywhere else moves the selection.
    pub fn select_panel(&self, row: usize, col: usize) -> PanelPuzzle {
        if self.is_animating || self.is_game_over {
            return self.clone();
        }
        let mut next = self.clone();
        if row >= GRID_ROWS || col >= GRID_COLS || self.grid[row][col].is_none() {
            next.selection = None;
            return next;
        }
        match self.selection {
            None => {
                next.selection = Some((row, col));
                next
            }
            Some(selected) if selected == (row, col) => {
                next.selection = None;
                next
            }
            Some(selected) if is_adjacent(selected, (row, col)) => {
                self.try_swap(selected, (row, col))
            }
            Some(_) => {
                next.selection = Some((row, col));
                next
            }
        }
    }

    /// Attempts to swap two adjacent cells. The swap commits only when the
    /// post-swap grid contains at least one match; otherwise the original
    /// grid is kept and only the selection is cleared.
    pub fn try_swap(&self, from: (usize, usize), to: (usize, usize)) -> PanelPuzzle {
        if self.is_animating || self.is_game_over {
            return self.clone();
        }
        let mut next = self.clone();
        next.selection = None;
        if !is_adjacent(from, to) {
            return next;
        }
        if !in_bounds(from) || !in_bounds(to) {
            return next;
        }
        if self.grid[from.0][from.1].is_none() || self.grid[to.0][to.1].is_none() {
            return next;
        }

        let mut swapped = self.grid.clone();
        swap_cells(&mut swapped, from, to);
        if find_matches(&swapped).is_empty() {
            return next;
        }
        next.grid = swapped;
        next.is_animating = true;
        next
    }

    /// Counts down the clock. Reaching zero ends the game.
    pub fn tick(&self, delta_seconds: f64) -> PanelPuzzle {
        if self.is_game_over {
            return self.clone();
        }
        let mut next = self.clone();
        next.time_remaining = (self.time_remaining - delta_seconds).max(0.0);
        if next.time_remaining <= 0.0 {
            next.time_remaining = 0.0;
            next.is_game_over = true;
        }
        next
    }

    pub fn is_won(&self) -> bool {
        self.score >= self.target_score
    }

    /// Runs full waves of match → clear → fall until the board settles.
    /// Convenience for hosts (and tests) that don't animate between waves.
    pub fn settle(&self) -> PanelPuzzle {
        let mut current = self.clone();
        loop {
            let matches = find_matches(&current.grid);
            let had_matches = !matches.is_empty();
            current = current.process_matches(&matches);
            if !had_matches {
                return current;
            }
            current = current.apply_gravity();
        }
    }

    pub(super) fn generate_incoming_row(&mut self) -> Vec<Panel> {
        (0..GRID_COLS)
            .map(|col| {
                let kind = *self.rng.pick(&PanelKind::ALL);
                let panel = Panel {
                    id: self.next_panel_id,
                    kind,
                    bonus: None,
                    row: GRID_ROWS - 1,
                    col,
                };
                self.next_panel_id += 1;
                panel
            })
            .collect()
    }

    pub(super) fn spawn_panel(&mut self, row: usize, col: usize) -> Panel {
        let kind = *self.rng.pick(&PanelKind::ALL);
        let panel = Panel {
            id: self.next_panel_id,
            kind,
            bonus: None,
            row,
            col,
        };
        self.next_panel_id += 1;
        panel
    }

    pub(super) fn take_panel_id(&mut self) -> u64 {
        let id = self.next_panel_id;
        self.next_panel_id += 1;
        id
    }
}

pub(super) fn in_bounds(position: (usize, usize)) -> bool {
    position.0 < GRID_ROWS && position.1 < GRID_COLS
}

pub(super) fn is_adjacent(a: (usize, usize), b: (usize, usize)) -> bool {
    let row_gap = a.0.abs_diff(b.0);
    let col_gap = a.1.abs_diff(b.1);
    row_gap + col_gap == 1
}

pub(super) fn swap_cells(grid: &mut Grid, a: (usize, usize), b: (usize, usize)) {
    let mut panel_a = grid[a.0][a.1].take();
    let mut panel_b = grid[b.0][b.1].take();
    if let Some(panel) = panel_a.as_mut() {
        panel.row = b.0;
        panel.col = b.1;
    }
    if let Some(panel) = panel_b.as_mut() {
        panel.row = a.0;
        panel.col = a.1;
    }
    grid[b.0][b.1] = panel_a;
    grid[a.0][a.1] = panel_b;
}

/// A kind that does not complete a run of three with the already-placed
/// neighbors to the left and above. With six kinds and at most two exclusions
/// the loop always terminates.
fn pick_clean_kind(grid: &Grid, row: usize, col: usize, rng: &mut CaseRng) -> PanelKind {
    loop {
        let kind = *rng.pick(&PanelKind::ALL);
        if would_complete_run(grid, row, col, kind) {
            continue;
        }
        return kind;
    }
}

fn would_complete_run(grid: &Grid, row: usize, col: usize, kind: PanelKind) -> bool {
    let same = |r: usize, c: usize| {
        grid[r][c]
            .as_ref()
            .map(|panel| panel.kind == kind)
            .unwrap_or(false)
    };
    if col >= 2 && same(row, col - 1) && same(row, col - 2) {
        return true;
    }
    if row >= 2 && same(row - 1, col) && same(row - 2, col) {
        return true;
    }
    false
}
