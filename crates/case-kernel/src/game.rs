//! The pure game reducer: a total transition function over the closed action
//! union.
//!
//! Actions that make no sense in the current phase return the state unchanged;
//! mistimed input is normal play, not an error. Presenting the wrong
//! evidence is also normal play: it costs a mistake, nothing else. Every
//! effectful transition appends to the in-state event history, which is the
//! kernel's observability surface.

use std::collections::BTreeMap;

use contracts::{
    Case, CaseConfig, ClueId, GameAction, GameEvent, GameEventType, GamePhase, GameResult,
    InterrogationState, LocationId, PlayerKnowledge, SavedGame, Statement, SuspectId, Testimony,
    DEFAULT_SEARCH_TOKENS, SCHEMA_VERSION_V1,
};
use serde_json::json;

use crate::casegen::{generate_case, GenerationError};
use crate::rng::CaseRng;
use crate::statements::generate_testimonies;

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub case: Case,
    pub testimonies: BTreeMap<SuspectId, Testimony>,
    pub phase: GamePhase,
    pub knowledge: PlayerKnowledge,
    pub interrogation: Option<InterrogationState>,
    pub accusation: Option<SuspectId>,
    pub result: Option<GameResult>,
    pub mistake_count: u32,
    pub search_tokens: u32,
    pub history: Vec<GameEvent>,
    next_event_sequence: u64,
}

impl GameState {
    /// Generates a case and its testimonies and opens the game at the intro.
    pub fn new_game(seed: &str, config: &CaseConfig) -> Result<Self, GenerationError> {
        let case = generate_case(seed, config)?;
        let mut testimony_rng = CaseRng::new(&case.seed);
        let testimonies = generate_testimonies(&case, &mut testimony_rng);
        Ok(Self {
            case,
            testimonies,
            phase: GamePhase::Intro,
            knowledge: PlayerKnowledge::default(),
            interrogation: None,
            accusation: None,
            result: None,
            mistake_count: 0,
            search_tokens: DEFAULT_SEARCH_TOKENS,
            history: Vec::new(),
            next_event_sequence: 0,
        })
    }

    /// The statement currently on the table during an interrogation.
    pub fn current_statement(&self) -> Option<&Statement> {
        let interrogation = self.interrogation.as_ref()?;
        self.testimonies
            .get(&interrogation.suspect_id)?
            .statement(interrogation.current_statement_index)
    }

    /// The single transition function. Always total: unknown or mistimed
    /// actions return the input state unchanged.
    pub fn reduce(&self, action: &GameAction) -> GameState {
        match action {
            GameAction::BeginInvestigation => self.begin_investigation(),
            GameAction::SearchLocation { location_id } => self.search_location(location_id),
            GameAction::StartInterrogation { suspect_id } => self.start_interrogation(suspect_id),
            GameAction::AdvanceStatement => self.advance_statement(),
            GameAction::PressStatement => self.press_statement(),
            GameAction::PresentClue { clue_id } => self.present_clue(clue_id),
            GameAction::EndInterrogation => self.end_interrogation(),
            GameAction::OpenAccusation => self.open_accusation(),
            GameAction::SelectAccused { suspect_id } => self.select_accused(suspect_id),
            GameAction::ConfirmAccusation => self.confirm_accusation(),
            GameAction::CancelAccusation => self.cancel_accusation(),
            GameAction::PuzzleFinished { won } => self.puzzle_finished(*won),
        }
    }

    fn begin_investigation(&self) -> GameState {
        if self.phase != GamePhase::Intro {
            return self.clone();
        }
        let mut next = self.clone();
        next.phase = GamePhase::Investigation;
        next.push_event(
            GameEventType::InvestigationStarted,
            json!({ "seed": &self.case.seed }),
        );
        next
    }

    fn search_location(&self, location_id: &LocationId) -> GameState {
        if self.phase != GamePhase::Investigation {
            return self.clone();
        }
        if self.case.location(location_id).is_none() {
            return self.clone();
        }
        if self.knowledge.searched_locations.contains(location_id) {
            return self.clone();
        }
        if self.search_tokens == 0 {
            return self.clone();
        }
        let mut next = self.clone();
        next.search_tokens -= 1;
        next.knowledge
            .searched_locations
            .insert(location_id.clone());
        next.push_event(
            GameEventType::LocationSearched,
            json!({ "location_id": location_id, "tokens_left": next.search_tokens }),
        );
        let found: Vec<ClueId> = self
            .case
            .clues_at(location_id)
            .map(|clue| clue.id.clone())
            .collect();
        for clue_id in found {
            if next.knowledge.discovered_clues.insert(clue_id.clone()) {
                next.push_event(GameEventType::ClueDiscovered, json!({ "clue_id": clue_id }));
            }
        }
        next
    }

    fn start_interrogation(&self, suspect_id: &SuspectId) -> GameState {
        if self.phase != GamePhase::Investigation {
            return self.clone();
        }
        if !self.testimonies.contains_key(suspect_id) {
            return self.clone();
        }
        let mut next = self.clone();
        next.interrogation = Some(InterrogationState::new(suspect_id.clone()));
        next.knowledge.interviewed.insert(suspect_id.clone());
        next.push_event(
            GameEventType::InterrogationStarted,
            json!({ "suspect_id": suspect_id }),
        );
        next
    }

    fn advance_statement(&self) -> GameState {
        let Some(interrogation) = self.interrogation.as_ref() else {
            return self.clone();
        };
        let Some(testimony) = self.testimonies.get(&interrogation.suspect_id) else {
            return self.clone();
        };
        let last_index = testimony.statements.len().saturating_sub(1);
        let mut next = self.clone();
        if let Some(active) = next.interrogation.as_mut() {
            active.current_statement_index =
                (interrogation.current_statement_index + 1).min(last_index);
        }
        next
    }

    fn press_statement(&self) -> GameState {
        let Some(statement) = self.current_statement() else {
            return self.clone();
        };
        let statement_id = statement.id.clone();
        let mut next = self.clone();
        let newly_pressed = next
            .interrogation
            .as_mut()
            .map(|active| active.pressed.insert(statement_id.clone()))
            .unwrap_or(false);
        if newly_pressed {
            next.push_event(
                GameEventType::StatementPressed,
                json!({ "statement_id": statement_id }),
            );
        }
        next
    }

    fn present_clue(&self, clue_id: &ClueId) -> GameState {
        let Some(statement) = self.current_statement() else {
            return self.clone();
        };
        let statement_id = statement.id.clone();
        let mut next = self.clone();
        if statement.is_contradicted_by(clue_id) {
            next.knowledge
                .revealed_contradictions
                .insert(statement_id.clone());
            next.push_event(
                GameEventType::ContradictionRevealed,
                json!({ "statement_id": statement_id, "clue_id": clue_id }),
            );
        } else {
            next.mistake_count += 1;
            next.push_event(
                GameEventType::MistakeMade,
                json!({ "statement_id": statement_id, "clue_id": clue_id }),
            );
        }
        next
    }

    fn end_interrogation(&self) -> GameState {
        let Some(interrogation) = self.interrogation.as_ref() else {
            return self.clone();
        };
        let suspect_id = interrogation.suspect_id.clone();
        let mut next = self.clone();
        next.interrogation = None;
        next.push_event(
            GameEventType::InterrogationEnded,
            json!({ "suspect_id": suspect_id }),
        );
        next
    }

    fn open_accusation(&self) -> GameState {
        if self.phase != GamePhase::Investigation {
            return self.clone();
        }
        let mut next = self.clone();
        next.phase = GamePhase::Accusation;
        next.interrogation = None;
        next
    }

    fn select_accused(&self, suspect_id: &SuspectId) -> GameState {
        if self.phase != GamePhase::Accusation {
            return self.clone();
        }
        let Some(suspect) = self.case.suspect(suspect_id) else {
            return self.clone();
        };
        if suspect.is_victim {
            return self.clone();
        }
        let mut next = self.clone();
        next.accusation = Some(suspect_id.clone());
        next
    }

    fn confirm_accusation(&self) -> GameState {
        if self.phase != GamePhase::Accusation {
            return self.clone();
        }
        let Some(accused) = self.accusation.as_ref() else {
            return self.clone();
        };
        let mut next = self.clone();
        let won = accused == &self.case.killer_id;
        next.result = Some(GameResult {
            won,
            player_accused: accused.clone(),
            correct_killer: self.case.killer_id.clone(),
        });
        next.phase = GamePhase::Resolution;
        next.push_event(
            GameEventType::AccusationConfirmed,
            json!({ "accused_id": accused, "won": won }),
        );
        next
    }

    fn cancel_accusation(&self) -> GameState {
        if self.phase != GamePhase::Accusation {
            return self.clone();
        }
        let mut next = self.clone();
        next.phase = GamePhase::Investigation;
        next.accusation = None;
        next
    }

    fn puzzle_finished(&self, won: bool) -> GameState {
        if self.phase != GamePhase::Investigation || !won {
            return self.clone();
        }
        let mut next = self.clone();
        next.search_tokens += 1;
        next.push_event(
            GameEventType::PuzzleRewardGranted,
            json!({ "tokens": next.search_tokens }),
        );
        next
    }

    fn push_event(&mut self, event_type: GameEventType, details: serde_json::Value) {
        self.history.push(GameEvent {
            sequence: self.next_event_sequence,
            event_type,
            details,
        });
        self.next_event_sequence += 1;
    }

    /// Flattens the state into the persisted payload. Testimonies and the
    /// event history stay out of the save; both are re-derivable.
    pub fn to_saved(&self) -> SavedGame {
        SavedGame {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            seed: self.case.seed.clone(),
            case: self.case.clone(),
            knowledge: self.knowledge.clone(),
            interrogation: self.interrogation.clone(),
            accusation: self.accusation.clone(),
            result: self.result.clone(),
            mistake_count: self.mistake_count,
            search_tokens: self.search_tokens,
        }
    }

    /// Rebuilds a running game from a saved payload. Testimonies are
    /// regenerated from the stored case's seed with a fresh stream, so the
    /// flavor text matches the session that was saved.
    pub fn from_saved(saved: SavedGame) -> Self {
        let mut testimony_rng = CaseRng::new(&saved.case.seed);
        let testimonies = generate_testimonies(&saved.case, &mut testimony_rng);
        let phase = if saved.result.is_some() {
            GamePhase::Resolution
        } else if saved.accusation.is_some() {
            GamePhase::Accusation
        } else {
            GamePhase::Investigation
        };
        Self {
            case: saved.case,
            testimonies,
            phase,
            knowledge: saved.knowledge,
            interrogation: saved.interrogation,
            accusation: saved.accusation,
            result: saved.result,
            mistake_count: saved.mistake_count,
            search_tokens: saved.search_tokens,
            history: Vec::new(),
            next_event_sequence: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(seed: &str) -> GameState {
        GameState::new_game(seed, &CaseConfig::default())
            .expect("generates")
            .reduce(&GameAction::BeginInvestigation)
    }

    #[test]
    fn searching_spends_tokens_and_reveals_local_clues() {
        let game = started("reducer-search");
        let location_id = game.case.locations[0].id.clone();
        let expected: Vec<ClueId> = game
            .case
            .clues_at(&location_id)
            .map(|clue| clue.id.clone())
            .collect();
        let searched = game.reduce(&GameAction::SearchLocation {
            location_id: location_id.clone(),
        });
        assert_eq!(searched.search_tokens, DEFAULT_SEARCH_TOKENS - 1);
        assert!(searched.knowledge.searched_locations.contains(&location_id));
        for clue_id in &expected {
            assert!(searched.knowledge.discovered_clues.contains(clue_id));
        }

        // A second search of the same room is free of charge because it is
        // simply refused.
        let again = searched.reduce(&GameAction::SearchLocation {
            location_id: location_id.clone(),
        });
        assert_eq!(again.search_tokens, searched.search_tokens);
    }

    #[test]
    fn searching_without_tokens_is_refused() {
        let mut game = started("reducer-tokens");
        game.search_tokens = 0;
        let location_id = game.case.locations[0].id.clone();
        let after = game.reduce(&GameAction::SearchLocation {
            location_id: location_id.clone(),
        });
        assert!(!after.knowledge.searched_locations.contains(&location_id));
    }

    #[test]
    fn puzzle_win_grants_a_token_and_loss_does_not() {
        let game = started("reducer-puzzle");
        let rewarded = game.reduce(&GameAction::PuzzleFinished { won: true });
        assert_eq!(rewarded.search_tokens, game.search_tokens + 1);
        let unrewarded = game.reduce(&GameAction::PuzzleFinished { won: false });
        assert_eq!(unrewarded.search_tokens, game.search_tokens);
    }

    #[test]
    fn actions_outside_their_phase_are_no_ops() {
        let fresh = GameState::new_game("reducer-phases", &CaseConfig::default())
            .expect("generates");
        assert_eq!(fresh.phase, GamePhase::Intro);
        let suspect_id = fresh.case.killer_id.clone();
        let unchanged = fresh.reduce(&GameAction::StartInterrogation {
            suspect_id: suspect_id.clone(),
        });
        assert_eq!(unchanged.interrogation, None);
        let unchanged = fresh.reduce(&GameAction::ConfirmAccusation);
        assert_eq!(unchanged.result, None);
        assert_eq!(unchanged.phase, GamePhase::Intro);
    }

    #[test]
    fn save_round_trip_preserves_progress_and_testimonies() {
        let game = started("reducer-save");
        let location_id = game.case.locations[1].id.clone();
        let suspect_id = game.case.killer_id.clone();
        let played = game
            .reduce(&GameAction::SearchLocation { location_id })
            .reduce(&GameAction::StartInterrogation { suspect_id });

        let restored = GameState::from_saved(played.to_saved());
        assert_eq!(restored.case, played.case);
        assert_eq!(restored.knowledge, played.knowledge);
        assert_eq!(restored.interrogation, played.interrogation);
        assert_eq!(restored.mistake_count, played.mistake_count);
        assert_eq!(restored.search_tokens, played.search_tokens);
        assert_eq!(restored.testimonies, played.testimonies);
        assert_eq!(restored.phase, GamePhase::Investigation);
    }
}
