//! Game-facing contract types: phases, player actions, knowledge, and the
//! in-state event log.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::{ClueId, LocationId, StatementId, SuspectId};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Intro,
    Investigation,
    Accusation,
    Resolution,
}

/// Everything the player has uncovered so far. Ordered sets keep the
/// serialized shape stable across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerKnowledge {
    pub discovered_clues: BTreeSet<ClueId>,
    pub searched_locations: BTreeSet<LocationId>,
    pub interviewed: BTreeSet<SuspectId>,
    pub revealed_contradictions: BTreeSet<StatementId>,
}

/// Sub-state while questioning one suspect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InterrogationState {
    pub suspect_id: SuspectId,
    pub current_statement_index: usize,
    pub pressed: BTreeSet<StatementId>,
}

impl InterrogationState {
    pub fn new(suspect_id: SuspectId) -> Self {
        Self {
            suspect_id,
            current_statement_index: 0,
            pressed: BTreeSet::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameResult {
    pub won: bool,
    pub player_accused: SuspectId,
    pub correct_killer: SuspectId,
}

/// The closed action union the reducer consumes. Invalid actions for the
/// current phase are no-ops, never errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameAction {
    BeginInvestigation,
    SearchLocation { location_id: LocationId },
    StartInterrogation { suspect_id: SuspectId },
    AdvanceStatement,
    PressStatement,
    PresentClue { clue_id: ClueId },
    EndInterrogation,
    OpenAccusation,
    SelectAccused { suspect_id: SuspectId },
    ConfirmAccusation,
    CancelAccusation,
    PuzzleFinished { won: bool },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GameEventType {
    InvestigationStarted,
    LocationSearched,
    ClueDiscovered,
    InterrogationStarted,
    StatementPressed,
    ContradictionRevealed,
    MistakeMade,
    InterrogationEnded,
    AccusationConfirmed,
    PuzzleRewardGranted,
}

/// Append-only history entry. The sequence number orders events across the
/// whole session; `details` carries event-specific structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameEvent {
    pub sequence: u64,
    pub event_type: GameEventType,
    pub details: Value,
}
