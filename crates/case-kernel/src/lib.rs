//! Deterministic whodunit kernel: seeded case generation, testimony building,
//! the panel puzzle engine, and the pure game reducer.
//!
//! Every generator takes its random stream as an explicit parameter; nothing
//! here reads the clock or ambient entropy, so one seed string fixes the
//! entire case, its testimonies, and any puzzle board derived from it.

pub mod alibis;
pub mod casegen;
pub mod clues;
pub mod game;
pub mod inspect;
pub mod panel;
mod pools;
pub mod relationships;
pub mod rng;
pub mod statements;
pub mod suspects;

pub use casegen::{case_summary, generate_case, GenerationError};
pub use game::GameState;
pub use panel::{PanelPuzzle, PuzzleConfig};
pub use rng::CaseRng;
pub use statements::generate_testimonies;
