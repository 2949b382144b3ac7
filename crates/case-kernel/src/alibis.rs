//! Alibi generation.
//!
//! Innocents get verifiable alibis (sometimes weak ones); the killer gets a
//! fabricated alibi built by one of four falseness strategies. Whatever the
//! strategy, the killer's alibi is always `is_false = true` and
//! `is_verifiable = false`. Even a named witness cannot actually corroborate
//! it. The finished list is shuffled so position carries no signal.

use contracts::{Alibi, Location, Suspect, SuspectId, TimeSlot};

use crate::rng::CaseRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FalsenessStrategy {
    NoWitnesses,
    UnreliableWitness,
    PartialAlibi,
    ConflictingTimes,
}

const STRATEGIES: [FalsenessStrategy; 4] = [
    FalsenessStrategy::NoWitnesses,
    FalsenessStrategy::UnreliableWitness,
    FalsenessStrategy::PartialAlibi,
    FalsenessStrategy::ConflictingTimes,
];

pub fn generate_alibis(
    suspects: &[Suspect],
    locations: &[Location],
    victim_id: &SuspectId,
    killer_id: &SuspectId,
    time_of_death: TimeSlot,
    rng: &mut CaseRng,
) -> Vec<Alibi> {
    let public_locations: Vec<&Location> =
        locations.iter().filter(|l| l.is_public).collect();
    assert!(
        !public_locations.is_empty(),
        "alibi generation needs a public location"
    );

    let mut alibis = Vec::new();
    for suspect in suspects {
        if &suspect.id == victim_id {
            continue;
        }
        if &suspect.id == killer_id {
            alibis.push(killer_alibi(
                suspects,
                locations,
                victim_id,
                killer_id,
                time_of_death,
                rng,
            ));
        } else {
            alibis.push(innocent_alibi(
                suspect,
                suspects,
                &public_locations,
                victim_id,
                time_of_death,
                rng,
            ));
        }
    }
    rng.shuffle(&alibis)
}

fn witness_pool(
    suspects: &[Suspect],
    exclude: &SuspectId,
    victim_id: &SuspectId,
) -> Vec<SuspectId> {
    suspects
        .iter()
        .filter(|s| &s.id != exclude && &s.id != victim_id)
        .map(|s| s.id.clone())
        .collect()
}

fn innocent_alibi(
    suspect: &Suspect,
    suspects: &[Suspect],
    public_locations: &[&Location],
    victim_id: &SuspectId,
    time_of_death: TimeSlot,
    rng: &mut CaseRng,
) -> Alibi {
    let location = *rng.pick(public_locations);
    let pool = witness_pool(suspects, &suspect.id, victim_id);
    let witness_count = rng.random_int(1, 2) as usize;
    let mut witnesses: Vec<SuspectId> = rng
        .shuffle(&pool)
        .into_iter()
        .take(witness_count.min(pool.len()))
        .collect();

    let weak = rng.chance(0.2);
    let description = if weak {
        witnesses.truncate(rng.random_int(0, 1) as usize);
        format!(
            "Thinks they were in the {} around {}, though the evening is hazy \
             and nobody paid much attention.",
            location.name,
            time_of_death.label()
        )
    } else {
        format!(
            "Was in the {} at {}, in plain view of the company there.",
            location.name,
            time_of_death.label()
        )
    };

    Alibi {
        suspect_id: suspect.id.clone(),
        time_slot: time_of_death,
        location_id: location.id.clone(),
        witnesses,
        description,
        is_verifiable: true,
        is_false: false,
    }
}

fn killer_alibi(
    suspects: &[Suspect],
    locations: &[Location],
    victim_id: &SuspectId,
    killer_id: &SuspectId,
    time_of_death: TimeSlot,
    rng: &mut CaseRng,
) -> Alibi {
    let strategy = *rng.pick(&STRATEGIES);
    let location = rng.pick(locations);
    let pool = witness_pool(suspects, killer_id, victim_id);

    let (time_slot, witnesses, description) = match strategy {
        FalsenessStrategy::NoWitnesses => (
            time_of_death,
            Vec::new(),
            format!(
                "Insists they were alone in the {} at {} with the door shut. \
                 No one can confirm it.",
                location.name,
                time_of_death.label()
            ),
        ),
        FalsenessStrategy::UnreliableWitness => {
            let witness = rng.pick(&pool).clone();
            (
                time_of_death,
                vec![witness],
                format!(
                    "Claims to have been in the {} at {} and names a witness, \
                     but the witness's account keeps shifting.",
                    location.name,
                    time_of_death.label()
                ),
            )
        }
        FalsenessStrategy::PartialAlibi => {
            let earlier = earlier_slot(time_of_death);
            let witness_count = rng.random_int(1, 2) as usize;
            let witnesses: Vec<SuspectId> = rng
                .shuffle(&pool)
                .into_iter()
                .take(witness_count.min(pool.len()))
                .collect();
            (
                earlier,
                witnesses,
                format!(
                    "Was certainly in the {} at {} — several people saw them — \
                     but nothing accounts for {} itself.",
                    location.name,
                    earlier.label(),
                    time_of_death.label()
                ),
            )
        }
        FalsenessStrategy::ConflictingTimes => {
            let first = earlier_slot(time_of_death);
            (
                time_of_death,
                Vec::new(),
                format!(
                    "First said they retired to the {} at {}, then later that it \
                     was {}. The two versions cannot both be true.",
                    location.name,
                    first.label(),
                    time_of_death.label()
                ),
            )
        }
    };

    Alibi {
        suspect_id: killer_id.clone(),
        time_slot,
        location_id: location.id.clone(),
        witnesses,
        description,
        is_verifiable: false,
        is_false: true,
    }
}

/// The slot before `slot`, or the earliest slot when already at the start.
fn earlier_slot(slot: TimeSlot) -> TimeSlot {
    let index = TimeSlot::ALL
        .iter()
        .position(|candidate| *candidate == slot)
        .unwrap_or(0);
    TimeSlot::ALL[index.saturating_sub(1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::casegen::generate_locations;
    use crate::suspects::{assign_victim_and_killer, generate_suspects};

    fn fixture(seed: &str) -> (Vec<Suspect>, Vec<Location>, SuspectId, SuspectId, CaseRng) {
        let mut rng = CaseRng::new(seed);
        let locations = generate_locations(&mut rng);
        let suspects = generate_suspects(6, &mut rng);
        let (suspects, victim_id, killer_id) = assign_victim_and_killer(suspects, &mut rng);
        (suspects, locations, victim_id, killer_id, rng)
    }

    #[test]
    fn killer_alibi_is_false_and_unverifiable() {
        for seed in ["alibi-a", "alibi-b", "alibi-c", "alibi-d", "alibi-e"] {
            let (suspects, locations, victim_id, killer_id, mut rng) = fixture(seed);
            let alibis = generate_alibis(
                &suspects,
                &locations,
                &victim_id,
                &killer_id,
                TimeSlot::TenPm,
                &mut rng,
            );
            let killer_alibi = alibis
                .iter()
                .find(|a| a.suspect_id == killer_id)
                .expect("killer has an alibi");
            assert!(killer_alibi.is_false);
            assert!(!killer_alibi.is_verifiable);
        }
    }

    #[test]
    fn innocents_are_verifiable_and_never_false() {
        let (suspects, locations, victim_id, killer_id, mut rng) = fixture("alibi-innocent");
        let alibis = generate_alibis(
            &suspects,
            &locations,
            &victim_id,
            &killer_id,
            TimeSlot::NinePm,
            &mut rng,
        );
        for alibi in alibis.iter().filter(|a| a.suspect_id != killer_id) {
            assert!(!alibi.is_false);
            assert!(alibi.is_verifiable);
            assert!(!alibi.witnesses.contains(&victim_id));
            assert!(!alibi.witnesses.contains(&alibi.suspect_id));
        }
    }

    #[test]
    fn one_alibi_per_living_suspect() {
        let (suspects, locations, victim_id, killer_id, mut rng) = fixture("alibi-count");
        let alibis = generate_alibis(
            &suspects,
            &locations,
            &victim_id,
            &killer_id,
            TimeSlot::EightPm,
            &mut rng,
        );
        assert_eq!(alibis.len(), suspects.len() - 1);
        assert!(alibis.iter().all(|a| a.suspect_id != victim_id));
    }
}
