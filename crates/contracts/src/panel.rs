//! Panel grid contract types for the tile-matching mini-game.
//!
//! The grid is 12 rows by 6 columns. Only the bottom six rows are playable;
//! the top six exist to absorb rising rows and stay empty otherwise. A panel's
//! stored row/col always equals its position in the matrix; every transform
//! that moves a panel rewrites both.

use serde::{Deserialize, Serialize};

pub const GRID_ROWS: usize = 12;
pub const GRID_COLS: usize = 6;
pub const PLAYABLE_ROWS: usize = 6;
pub const PLAYABLE_ROW_START: usize = GRID_ROWS - PLAYABLE_ROWS;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    Amber,
    Cobalt,
    Jade,
    Onyx,
    Rose,
    Ivory,
}

impl PanelKind {
    pub const ALL: [PanelKind; 6] = [
        PanelKind::Amber,
        PanelKind::Cobalt,
        PanelKind::Jade,
        PanelKind::Onyx,
        PanelKind::Rose,
        PanelKind::Ivory,
    ];
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BonusKind {
    /// Clears the whole row when activated.
    LineH,
    /// Clears the whole column when activated.
    LineV,
    /// Clears the row and the column.
    Cross,
    /// Clears the 3×3 neighborhood.
    Blast,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Panel {
    pub id: u64,
    pub kind: PanelKind,
    pub bonus: Option<BonusKind>,
    pub row: usize,
    pub col: usize,
}

pub type Grid = Vec<Vec<Option<Panel>>>;
