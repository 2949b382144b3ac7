//! Interrogation statement and testimony contract types.

use serde::{Deserialize, Serialize};

use crate::ids::{ClueId, StatementId, SuspectId};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StatementTopic {
    Alibi,
    Victim,
    Relationships,
    Observations,
    #[serde(rename = "self")]
    SelfAccount,
}

/// One thing a suspect says under interrogation.
///
/// A lie with a non-empty `contradicted_by` list is a playable objection:
/// presenting any listed clue reveals the contradiction. Truthful statements
/// carry no `truth_reveal`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Statement {
    pub id: StatementId,
    pub suspect_id: SuspectId,
    pub topic: StatementTopic,
    pub text: String,
    pub press_response: String,
    pub is_lie: bool,
    pub contradicted_by: Vec<ClueId>,
    pub truth_reveal: Option<String>,
}

impl Statement {
    pub fn is_contradictable(&self) -> bool {
        self.is_lie && !self.contradicted_by.is_empty()
    }

    pub fn is_contradicted_by(&self, clue_id: &ClueId) -> bool {
        self.contradicted_by.iter().any(|id| id == clue_id)
    }
}

/// Ordered statements for one living suspect: alibi, victim relationship,
/// observation, self. The first two are skipped when no underlying data
/// exists, so the list holds 3 or 4 entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Testimony {
    pub suspect_id: SuspectId,
    pub statements: Vec<Statement>,
}

impl Testimony {
    pub fn statement(&self, index: usize) -> Option<&Statement> {
        self.statements.get(index)
    }

    pub fn lies(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter().filter(|statement| statement.is_lie)
    }
}
