//! Suspect generation: named cast, personality traits, victim/killer split.

use std::collections::BTreeSet;

use contracts::{PersonalityProfile, Suspect, SuspectId};

use crate::pools::{FIRST_NAMES, LAST_NAMES, OCCUPATIONS, SUSPECT_DESCRIPTIONS};
use crate::rng::CaseRng;

/// Draws `count` suspects from the shuffled name pools.
///
/// Pools are cycled with modulo, so large casts repeat occupations and
/// descriptions; only full names go through the collision set. Callers must
/// pass `count >= 3`; the victim/killer split needs at least one bystander.
pub fn generate_suspects(count: usize, rng: &mut CaseRng) -> Vec<Suspect> {
    assert!(count >= 3, "a case needs at least three suspects");

    let first_names = rng.shuffle(FIRST_NAMES);
    let last_names = rng.shuffle(LAST_NAMES);
    let occupations = rng.shuffle(OCCUPATIONS);
    let descriptions = rng.shuffle(SUSPECT_DESCRIPTIONS);

    let mut used_names: BTreeSet<String> = BTreeSet::new();
    let mut suspects = Vec::with_capacity(count);
    for index in 0..count {
        let first_name = first_names[index % first_names.len()];
        let last_name = last_names[index % last_names.len()];
        let mut full_name = format!("{first_name} {last_name}");
        if used_names.contains(&full_name) {
            let alternate = last_names[(index + 1) % last_names.len()];
            full_name = format!("{first_name} {alternate}");
        }
        used_names.insert(full_name);

        suspects.push(Suspect {
            id: SuspectId::new(format!("suspect_{index:03}")),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            occupation: occupations[index % occupations.len()].to_string(),
            age: rng.random_int(25, 72) as u32,
            description: descriptions[index % descriptions.len()].to_string(),
            traits: PersonalityProfile {
                honesty: rng.random(),
                composure: rng.random(),
                aggression: rng.random(),
                observance: rng.random(),
            },
            is_victim: false,
            is_killer: false,
        });
    }
    suspects
}

/// Flags one victim and one distinct killer at uniformly drawn indices, then
/// shuffles the whole list so array position carries no signal about guilt.
pub fn assign_victim_and_killer(
    suspects: Vec<Suspect>,
    rng: &mut CaseRng,
) -> (Vec<Suspect>, SuspectId, SuspectId) {
    assert!(suspects.len() >= 3, "victim/killer split needs three suspects");

    let victim_index = rng.random_int(0, suspects.len() as i64 - 1) as usize;
    let killer_index = loop {
        let candidate = rng.random_int(0, suspects.len() as i64 - 1) as usize;
        if candidate != victim_index {
            break candidate;
        }
    };

    let mut flagged = suspects;
    flagged[victim_index].is_victim = true;
    flagged[killer_index].is_killer = true;
    let victim_id = flagged[victim_index].id.clone();
    let killer_id = flagged[killer_index].id.clone();

    (rng.shuffle(&flagged), victim_id, killer_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_count_with_traits_in_range() {
        let mut rng = CaseRng::new("suspects-basic");
        let suspects = generate_suspects(6, &mut rng);
        assert_eq!(suspects.len(), 6);
        for suspect in &suspects {
            assert!((0.0..=1.0).contains(&suspect.traits.honesty));
            assert!((0.0..=1.0).contains(&suspect.traits.composure));
            assert!((0.0..=1.0).contains(&suspect.traits.aggression));
            assert!((0.0..=1.0).contains(&suspect.traits.observance));
            assert!(!suspect.is_victim && !suspect.is_killer);
        }
    }

    #[test]
    fn victim_and_killer_are_distinct_and_unique() {
        let mut rng = CaseRng::new("suspects-split");
        let suspects = generate_suspects(8, &mut rng);
        let (flagged, victim_id, killer_id) = assign_victim_and_killer(suspects, &mut rng);
        assert_ne!(victim_id, killer_id);
        assert_eq!(flagged.iter().filter(|s| s.is_victim).count(), 1);
        assert_eq!(flagged.iter().filter(|s| s.is_killer).count(), 1);
    }

    #[test]
    fn large_casts_cycle_the_smaller_pools() {
        let mut rng = CaseRng::new("suspects-cycling");
        let suspects = generate_suspects(20, &mut rng);
        assert_eq!(suspects.len(), 20);
        let distinct_occupations: std::collections::BTreeSet<_> =
            suspects.iter().map(|s| s.occupation.as_str()).collect();
        assert!(distinct_occupations.len() <= OCCUPATIONS.len());
    }

    #[test]
    #[should_panic(expected = "at least three")]
    fn rejects_degenerate_counts() {
        let mut rng = CaseRng::new("suspects-degenerate");
        let _ = generate_suspects(2, &mut rng);
    }
}
