//! Case orchestration: sequences the generators over one shared stream,
//! assembles the aggregate, validates solvability, and retries with a derived
//! seed when validation fails.
//!
//! The retry seed is `"{seed}-retry"`, not a fresh random seed, so a retried
//! generation stays deterministic and traceable. The clue skeleton makes the
//! solvability check structurally unfailable; the retry path exists as a
//! bounded safety net in case a future generator change breaks that.

use std::fmt;

use contracts::{Case, CaseConfig, Location, LocationId, Motive, TimeSlot, Weapon};
use serde_json::{json, Value};

use crate::alibis::generate_alibis;
use crate::clues::generate_clues;
use crate::pools::{LOCATIONS_PER_CASE, LOCATION_DEFS};
use crate::relationships::generate_relationships;
use crate::rng::CaseRng;
use crate::suspects::{assign_victim_and_killer, generate_suspects};

const MAX_GENERATION_ATTEMPTS: usize = 8;

/// Crimes of passion outnumber cold-blooded schemes. Indexed like `Motive::ALL`.
const MOTIVE_WEIGHTS: [f64; 6] = [2.0, 3.0, 3.0, 1.5, 2.0, 1.0];

#[derive(Debug)]
pub enum GenerationError {
    InvalidConfig { message: String },
    RetriesExhausted { seed: String, attempts: usize },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { message } => write!(f, "invalid case config: {message}"),
            Self::RetriesExhausted { seed, attempts } => write!(
                f,
                "no solvable case after {attempts} attempts from seed {seed}"
            ),
        }
    }
}

impl std::error::Error for GenerationError {}

/// Generates a complete, solvable case from a seed string.
///
/// Identical seed and config always produce the identical case: same killer,
/// victim, motive, weapon, and clue/relationship/alibi content.
pub fn generate_case(seed: &str, config: &CaseConfig) -> Result<Case, GenerationError> {
    if config.suspect_count < 3 {
        return Err(GenerationError::InvalidConfig {
            message: format!(
                "suspect_count {} is below the minimum of 3",
                config.suspect_count
            ),
        });
    }

    let mut current_seed = seed.to_string();
    for _ in 0..MAX_GENERATION_ATTEMPTS {
        let candidate = build_case(&current_seed, config);
        if candidate.is_solvable() {
            return Ok(candidate);
        }
        current_seed = format!("{current_seed}-retry");
    }
    Err(GenerationError::RetriesExhausted {
        seed: seed.to_string(),
        attempts: MAX_GENERATION_ATTEMPTS,
    })
}

fn build_case(seed: &str, config: &CaseConfig) -> Case {
    let mut rng = CaseRng::new(seed);

    let mut locations = generate_locations(&mut rng);
    let suspects = generate_suspects(config.suspect_count, &mut rng);
    let (suspects, victim_id, killer_id) = assign_victim_and_killer(suspects, &mut rng);

    let motive = *rng.weighted_pick(&Motive::ALL, &MOTIVE_WEIGHTS);
    let weapon = *rng.pick(&Weapon::ALL);
    let scene_index = rng.random_int(0, locations.len() as i64 - 1) as usize;
    locations[scene_index].is_crime_scene = true;
    let crime_scene_id = locations[scene_index].id.clone();
    let time_of_death = *rng.pick(&TimeSlot::ALL);

    let relationships =
        generate_relationships(&suspects, &victim_id, &killer_id, motive, &mut rng);
    let clues = generate_clues(
        &suspects,
        &locations,
        &relationships,
        &victim_id,
        &killer_id,
        motive,
        weapon,
        &crime_scene_id,
        time_of_death,
        config.difficulty,
        &mut rng,
    );
    let alibis = generate_alibis(
        &suspects,
        &locations,
        &victim_id,
        &killer_id,
        time_of_death,
        &mut rng,
    );

    Case {
        schema_version: contracts::SCHEMA_VERSION_V1.to_string(),
        seed: seed.to_string(),
        suspects,
        locations,
        relationships,
        clues,
        alibis,
        victim_id,
        killer_id,
        motive,
        weapon,
        crime_scene_id,
        time_of_death,
    }
}

/// Draws the case's locations from the template pool. The crime scene flag is
/// set afterwards by the orchestrator.
pub fn generate_locations(rng: &mut CaseRng) -> Vec<Location> {
    rng.shuffle(LOCATION_DEFS)
        .into_iter()
        .take(LOCATIONS_PER_CASE)
        .enumerate()
        .map(|(index, (name, description, is_public))| Location {
            id: LocationId::new(format!("location_{index:03}")),
            name: name.to_string(),
            description: description.to_string(),
            is_public,
            is_crime_scene: false,
        })
        .collect()
}

/// A compact digest of a case for CLI output and debugging.
pub fn case_summary(case: &Case) -> Value {
    let victim = case
        .suspect(&case.victim_id)
        .map(contracts::Suspect::full_name)
        .unwrap_or_else(|| case.victim_id.to_string());
    let killer = case
        .suspect(&case.killer_id)
        .map(contracts::Suspect::full_name)
        .unwrap_or_else(|| case.killer_id.to_string());
    let scene = case
        .location(&case.crime_scene_id)
        .map(|location| location.name.clone())
        .unwrap_or_else(|| case.crime_scene_id.to_string());
    json!({
        "seed": &case.seed,
        "victim": victim,
        "killer": killer,
        "motive": case.motive.label(),
        "weapon": case.weapon.label(),
        "crime_scene": scene,
        "time_of_death": case.time_of_death.label(),
        "suspect_count": case.suspects.len(),
        "location_count": case.locations.len(),
        "relationship_count": case.relationships.len(),
        "clue_count": case.clues.len(),
        "red_herring_count": case.clues.iter().filter(|c| c.is_red_herring).count(),
        "alibi_count": case.alibis.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::Difficulty;

    #[test]
    fn exactly_one_victim_one_killer_one_crime_scene() {
        let case = generate_case("orchestrator-flags", &CaseConfig::default()).expect("generates");
        assert_eq!(case.suspects.iter().filter(|s| s.is_victim).count(), 1);
        assert_eq!(case.suspects.iter().filter(|s| s.is_killer).count(), 1);
        assert_ne!(case.victim_id, case.killer_id);
        assert_eq!(
            case.locations.iter().filter(|l| l.is_crime_scene).count(),
            1
        );
    }

    #[test]
    fn generation_is_deterministic() {
        let config = CaseConfig::default();
        let a = generate_case("orchestrator-repeat", &config).expect("generates");
        let b = generate_case("orchestrator-repeat", &config).expect("generates");
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_undersized_casts() {
        let config = CaseConfig {
            suspect_count: 2,
            difficulty: Difficulty::Medium,
        };
        let error = generate_case("orchestrator-small", &config).expect_err("rejected");
        assert!(matches!(error, GenerationError::InvalidConfig { .. }));
    }

    #[test]
    fn summary_reports_the_case_shape() {
        let case = generate_case("orchestrator-summary", &CaseConfig::default()).expect("generates");
        let summary = case_summary(&case);
        assert_eq!(summary["suspect_count"], json!(case.suspects.len()));
        assert_eq!(summary["seed"], json!("orchestrator-summary"));
    }
}
