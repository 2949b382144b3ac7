//! Seed-quantified properties of the generation pipeline.

use case_kernel::{generate_case, generate_testimonies, CaseRng};
use contracts::{CaseConfig, Difficulty};
use proptest::prelude::*;

fn seed_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9][a-z0-9-]{0,22}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn generation_is_fully_deterministic(seed in seed_strategy()) {
        let config = CaseConfig::default();
        let first = generate_case(&seed, &config).expect("generates");
        let second = generate_case(&seed, &config).expect("generates");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn every_case_is_solvable(seed in seed_strategy()) {
        let case = generate_case(&seed, &CaseConfig::default()).expect("generates");
        prop_assert!(case.is_solvable());
    }

    #[test]
    fn exactly_one_victim_and_one_distinct_killer(seed in seed_strategy()) {
        let case = generate_case(&seed, &CaseConfig::default()).expect("generates");
        prop_assert_eq!(case.suspects.iter().filter(|s| s.is_victim).count(), 1);
        prop_assert_eq!(case.suspects.iter().filter(|s| s.is_killer).count(), 1);
        prop_assert_ne!(&case.victim_id, &case.killer_id);
        prop_assert_eq!(
            case.suspects.iter().find(|s| s.is_victim).map(|s| &s.id),
            Some(&case.victim_id)
        );
        prop_assert_eq!(
            case.suspects.iter().find(|s| s.is_killer).map(|s| &s.id),
            Some(&case.killer_id)
        );
    }

    #[test]
    fn alibi_invariants_hold(seed in seed_strategy()) {
        let case = generate_case(&seed, &CaseConfig::default()).expect("generates");
        prop_assert_eq!(case.alibis.len(), case.suspects.len() - 1);
        for alibi in &case.alibis {
            if alibi.suspect_id == case.killer_id {
                prop_assert!(alibi.is_false);
                prop_assert!(!alibi.is_verifiable);
            } else {
                prop_assert!(!alibi.is_false);
                prop_assert!(alibi.is_verifiable);
            }
        }
    }

    #[test]
    fn difficulty_tunes_herrings_and_the_implicating_floor(seed in seed_strategy()) {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let config = CaseConfig { suspect_count: 6, difficulty };
            let case = generate_case(&seed, &config).expect("generates");
            let herrings = case.clues.iter().filter(|c| c.is_red_herring).count();
            prop_assert_eq!(herrings, difficulty.red_herring_count());
            let implicating = case
                .clues
                .iter()
                .filter(|c| c.implicates(&case.killer_id))
                .count();
            prop_assert!(implicating >= difficulty.implicating_clue_floor());
        }
    }

    #[test]
    fn relationship_graph_is_well_formed(seed in seed_strategy()) {
        let case = generate_case(&seed, &CaseConfig::default()).expect("generates");
        prop_assert!(case
            .relationships
            .iter()
            .any(|edge| edge.from == case.killer_id && edge.to == case.victim_id));
        for edge in &case.relationships {
            prop_assert!((-10..=10).contains(&edge.sentiment));
            if !edge.is_public_knowledge {
                prop_assert!(edge.secret_reason.is_some());
            }
        }
    }

    #[test]
    fn exactly_one_crime_scene(seed in seed_strategy()) {
        let case = generate_case(&seed, &CaseConfig::default()).expect("generates");
        prop_assert_eq!(
            case.locations.iter().filter(|l| l.is_crime_scene).count(),
            1
        );
        prop_assert!(case.location(&case.crime_scene_id).is_some());
    }

    #[test]
    fn every_lie_in_every_testimony_is_contradictable(seed in seed_strategy()) {
        let case = generate_case(&seed, &CaseConfig::default()).expect("generates");
        let mut rng = CaseRng::new(&case.seed);
        let testimonies = generate_testimonies(&case, &mut rng);
        prop_assert_eq!(testimonies.len(), case.suspects.len() - 1);
        for testimony in testimonies.values() {
            prop_assert!((3..=4).contains(&testimony.statements.len()));
            for statement in testimony.lies() {
                prop_assert!(statement.is_contradictable());
                for clue_id in &statement.contradicted_by {
                    prop_assert!(case.clue(clue_id).is_some());
                }
            }
        }
    }
}
