//! Cross-boundary contract types for the case kernel, persistence, and front ends.
//!
//! Everything here is an immutable value object: once constructed, fields never
//! change. An "update" always builds a new value. Wire naming is snake_case
//! throughout so payloads stay stable across hosts.

use std::fmt;

use serde::{Deserialize, Serialize};

mod game;
mod ids;
mod panel;
mod save;
mod testimony;

pub use game::{
    GameAction, GameEvent, GameEventType, GamePhase, GameResult, InterrogationState,
    PlayerKnowledge,
};
pub use ids::{ClueId, LocationId, StatementId, SuspectId};
pub use panel::{
    BonusKind, Grid, Panel, PanelKind, GRID_COLS, GRID_ROWS, PLAYABLE_ROWS, PLAYABLE_ROW_START,
};
pub use save::{SavedGame, DEFAULT_SEARCH_TOKENS};
pub use testimony::{Statement, StatementTopic, Testimony};

pub const SCHEMA_VERSION_V1: &str = "1.0";

// ---------------------------------------------------------------------------
// Suspects
// ---------------------------------------------------------------------------

/// Four independent personality scalars in [0, 1].
///
/// Descriptive only for now: no generator or reducer logic consumes them,
/// but they are part of the case contract and must survive round trips.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PersonalityProfile {
    pub honesty: f64,
    pub composure: f64,
    pub aggression: f64,
    pub observance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Suspect {
    pub id: SuspectId,
    pub first_name: String,
    pub last_name: String,
    pub occupation: String,
    pub age: u32,
    pub description: String,
    pub traits: PersonalityProfile,
    pub is_victim: bool,
    pub is_killer: bool,
}

impl Suspect {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub description: String,
    pub is_public: bool,
    pub is_crime_scene: bool,
}

// ---------------------------------------------------------------------------
// Relationships
// ---------------------------------------------------------------------------

/// Directed relationship kinds. Edges are multi-edges: the same pair may carry
/// one edge in each direction and they are never deduplicated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    Spouse,
    ExSpouse,
    Lover,
    ExLover,
    Sibling,
    Parent,
    Child,
    Friend,
    Rival,
    BusinessPartner,
    Employer,
    Employee,
    Acquaintance,
    Neighbor,
}

impl RelationshipKind {
    pub const ALL: [RelationshipKind; 14] = [
        RelationshipKind::Spouse,
        RelationshipKind::ExSpouse,
        RelationshipKind::Lover,
        RelationshipKind::ExLover,
        RelationshipKind::Sibling,
        RelationshipKind::Parent,
        RelationshipKind::Child,
        RelationshipKind::Friend,
        RelationshipKind::Rival,
        RelationshipKind::BusinessPartner,
        RelationshipKind::Employer,
        RelationshipKind::Employee,
        RelationshipKind::Acquaintance,
        RelationshipKind::Neighbor,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RelationshipKind::Spouse => "spouse",
            RelationshipKind::ExSpouse => "ex-spouse",
            RelationshipKind::Lover => "lover",
            RelationshipKind::ExLover => "former lover",
            RelationshipKind::Sibling => "sibling",
            RelationshipKind::Parent => "parent",
            RelationshipKind::Child => "child",
            RelationshipKind::Friend => "friend",
            RelationshipKind::Rival => "rival",
            RelationshipKind::BusinessPartner => "business partner",
            RelationshipKind::Employer => "employer",
            RelationshipKind::Employee => "employee",
            RelationshipKind::Acquaintance => "acquaintance",
            RelationshipKind::Neighbor => "neighbor",
        }
    }
}

/// Directed edge `from` → `to` with a sentiment clamped to [-10, 10].
///
/// `secret_reason` is required whenever the edge is not public knowledge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Relationship {
    pub from: SuspectId,
    pub to: SuspectId,
    pub kind: RelationshipKind,
    pub sentiment: i64,
    pub is_public_knowledge: bool,
    pub secret_reason: Option<String>,
}

impl Relationship {
    pub fn new(
        from: SuspectId,
        to: SuspectId,
        kind: RelationshipKind,
        sentiment: i64,
        is_public_knowledge: bool,
        secret_reason: Option<String>,
    ) -> Self {
        Self {
            from,
            to,
            kind,
            sentiment: sentiment.clamp(-10, 10),
            is_public_knowledge,
            secret_reason,
        }
    }

    pub fn links(&self, a: &SuspectId, b: &SuspectId) -> bool {
        (&self.from == a && &self.to == b) || (&self.from == b && &self.to == a)
    }

    pub fn involves(&self, suspect: &SuspectId) -> bool {
        &self.from == suspect || &self.to == suspect
    }
}

// ---------------------------------------------------------------------------
// Alibis
// ---------------------------------------------------------------------------

/// Evening time slots. The murder happens in exactly one of them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum TimeSlot {
    SixPm,
    SevenPm,
    EightPm,
    NinePm,
    TenPm,
    ElevenPm,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 6] = [
        TimeSlot::SixPm,
        TimeSlot::SevenPm,
        TimeSlot::EightPm,
        TimeSlot::NinePm,
        TimeSlot::TenPm,
        TimeSlot::ElevenPm,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::SixPm => "6:00 PM",
            TimeSlot::SevenPm => "7:00 PM",
            TimeSlot::EightPm => "8:00 PM",
            TimeSlot::NinePm => "9:00 PM",
            TimeSlot::TenPm => "10:00 PM",
            TimeSlot::ElevenPm => "11:00 PM",
        }
    }
}

/// One alibi per living suspect.
///
/// Invariant: the killer's alibi always has `is_false = true` and
/// `is_verifiable = false`; every innocent's alibi is the reverse.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Alibi {
    pub suspect_id: SuspectId,
    pub time_slot: TimeSlot,
    pub location_id: LocationId,
    pub witnesses: Vec<SuspectId>,
    pub description: String,
    pub is_verifiable: bool,
    pub is_false: bool,
}

// ---------------------------------------------------------------------------
// Clues
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ClueKind {
    Physical,
    Testimonial,
    Documentary,
    Behavioral,
    Forensic,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    Minor,
    Normal,
    Critical,
}

/// A piece of evidence found at a location.
///
/// `points_to` carries both inculpatory and exonerating attribution; the clue
/// kind disambiguates (a testimonial clue pointing at an innocent clears them,
/// a physical clue pointing at the killer implicates them). `refuted_by` is
/// only meaningful on red herrings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Clue {
    pub id: ClueId,
    pub kind: ClueKind,
    pub name: String,
    pub description: String,
    pub found_at: LocationId,
    pub points_to: Option<SuspectId>,
    pub is_red_herring: bool,
    pub refuted_by: Option<ClueId>,
    pub significance: Significance,
}

impl Clue {
    /// Whether this clue genuinely implicates `suspect` (red herrings never do).
    pub fn implicates(&self, suspect: &SuspectId) -> bool {
        !self.is_red_herring && self.points_to.as_ref() == Some(suspect)
    }
}

// ---------------------------------------------------------------------------
// Motive and weapon
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Motive {
    Inheritance,
    Jealousy,
    Revenge,
    Blackmail,
    BusinessDispute,
    SecretAffair,
}

impl Motive {
    pub const ALL: [Motive; 6] = [
        Motive::Inheritance,
        Motive::Jealousy,
        Motive::Revenge,
        Motive::Blackmail,
        Motive::BusinessDispute,
        Motive::SecretAffair,
    ];

    /// Relationship kinds that plausibly carry this motive toward the victim.
    pub fn relationship_kinds(&self) -> &'static [RelationshipKind] {
        match self {
            Motive::Inheritance => &[
                RelationshipKind::Child,
                RelationshipKind::Sibling,
                RelationshipKind::Spouse,
            ],
            Motive::Jealousy => &[
                RelationshipKind::Spouse,
                RelationshipKind::Lover,
                RelationshipKind::ExLover,
            ],
            Motive::Revenge => &[
                RelationshipKind::Rival,
                RelationshipKind::ExSpouse,
                RelationshipKind::Employee,
            ],
            Motive::Blackmail => &[
                RelationshipKind::Acquaintance,
                RelationshipKind::BusinessPartner,
            ],
            Motive::BusinessDispute => &[
                RelationshipKind::BusinessPartner,
                RelationshipKind::Employer,
                RelationshipKind::Rival,
            ],
            Motive::SecretAffair => &[RelationshipKind::Lover, RelationshipKind::ExLover],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Motive::Inheritance => "inheritance",
            Motive::Jealousy => "jealousy",
            Motive::Revenge => "revenge",
            Motive::Blackmail => "blackmail",
            Motive::BusinessDispute => "business dispute",
            Motive::SecretAffair => "secret affair",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Weapon {
    Candlestick,
    LetterOpener,
    Revolver,
    Poison,
    Rope,
    FireplacePoker,
    Dagger,
    Garrote,
}

impl Weapon {
    pub const ALL: [Weapon; 8] = [
        Weapon::Candlestick,
        Weapon::LetterOpener,
        Weapon::Revolver,
        Weapon::Poison,
        Weapon::Rope,
        Weapon::FireplacePoker,
        Weapon::Dagger,
        Weapon::Garrote,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Weapon::Candlestick => "brass candlestick",
            Weapon::LetterOpener => "silver letter opener",
            Weapon::Revolver => "pocket revolver",
            Weapon::Poison => "arsenic",
            Weapon::Rope => "length of rope",
            Weapon::FireplacePoker => "fireplace poker",
            Weapon::Dagger => "ornamental dagger",
            Weapon::Garrote => "wire garrote",
        }
    }
}

// ---------------------------------------------------------------------------
// Case (aggregate root)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// How many red-herring clues to inject.
    pub fn red_herring_count(&self) -> usize {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    /// Minimum count of non-red-herring clues implicating the killer.
    pub fn implicating_clue_floor(&self) -> usize {
        match self {
            Difficulty::Easy => 5,
            Difficulty::Medium => 4,
            Difficulty::Hard => 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaseConfig {
    pub suspect_count: usize,
    pub difficulty: Difficulty,
}

impl Default for CaseConfig {
    fn default() -> Self {
        Self {
            suspect_count: 6,
            difficulty: Difficulty::Medium,
        }
    }
}

/// The aggregate root produced by one generation run.
///
/// Validated after assembly: at least one non-red-herring clue points at the
/// killer, exactly one suspect is the victim, exactly one is the killer, and
/// the two differ.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Case {
    pub schema_version: String,
    pub seed: String,
    pub suspects: Vec<Suspect>,
    pub locations: Vec<Location>,
    pub relationships: Vec<Relationship>,
    pub clues: Vec<Clue>,
    pub alibis: Vec<Alibi>,
    pub victim_id: SuspectId,
    pub killer_id: SuspectId,
    pub motive: Motive,
    pub weapon: Weapon,
    pub crime_scene_id: LocationId,
    pub time_of_death: TimeSlot,
}

impl Case {
    pub fn suspect(&self, id: &SuspectId) -> Option<&Suspect> {
        self.suspects.iter().find(|suspect| &suspect.id == id)
    }

    pub fn location(&self, id: &LocationId) -> Option<&Location> {
        self.locations.iter().find(|location| &location.id == id)
    }

    pub fn clue(&self, id: &ClueId) -> Option<&Clue> {
        self.clues.iter().find(|clue| &clue.id == id)
    }

    pub fn alibi_for(&self, suspect_id: &SuspectId) -> Option<&Alibi> {
        self.alibis
            .iter()
            .find(|alibi| &alibi.suspect_id == suspect_id)
    }

    /// Everyone except the victim, in case order.
    pub fn living_suspects(&self) -> impl Iterator<Item = &Suspect> {
        self.suspects.iter().filter(|suspect| !suspect.is_victim)
    }

    pub fn clues_at<'a>(&'a self, location_id: &'a LocationId) -> impl Iterator<Item = &'a Clue> {
        self.clues
            .iter()
            .filter(move |clue| &clue.found_at == location_id)
    }

    /// The solvability invariant: some genuine clue names the killer.
    pub fn is_solvable(&self) -> bool {
        self.clues
            .iter()
            .any(|clue| clue.implicates(&self.killer_id))
    }

    pub fn relationship_between(&self, a: &SuspectId, b: &SuspectId) -> Option<&Relationship> {
        self.relationships.iter().find(|edge| edge.links(a, b))
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "case seed={} suspects={} clues={} motive={} weapon={}",
            self.seed,
            self.suspects.len(),
            self.clues.len(),
            self.motive.label(),
            self.weapon.label()
        )
    }
}
