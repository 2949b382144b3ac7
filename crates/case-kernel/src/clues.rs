//! Clue generation.
//!
//! A fixed skeleton of clue kinds is emitted for every case: weapon, motive,
//! opportunity, behavior, time of death, one clearing clue per innocent, the
//! difficulty's red herrings, and a hidden-correspondence clue when the case
//! carries a secret relationship. The list is shuffled before it is attached
//! so discovery order says nothing about importance. Solvability (at least
//! one genuine clue naming the killer) is guaranteed by the first skeleton
//! entry and re-validated by the orchestrator as a safety net.

use contracts::{
    Clue, ClueId, ClueKind, Difficulty, Location, LocationId, Motive, Relationship, Significance,
    Suspect, SuspectId, TimeSlot, Weapon,
};

use crate::rng::CaseRng;

#[allow(clippy::too_many_arguments)]
pub fn generate_clues(
    suspects: &[Suspect],
    locations: &[Location],
    relationships: &[Relationship],
    victim_id: &SuspectId,
    killer_id: &SuspectId,
    motive: Motive,
    weapon: Weapon,
    crime_scene_id: &LocationId,
    time_of_death: TimeSlot,
    difficulty: Difficulty,
    rng: &mut CaseRng,
) -> Vec<Clue> {
    let killer_name = suspect_name(suspects, killer_id);
    let victim_name = suspect_name(suspects, victim_id);
    let scene_name = location_name(locations, crime_scene_id);
    let innocents: Vec<&Suspect> = suspects
        .iter()
        .filter(|s| &s.id != victim_id && &s.id != killer_id)
        .collect();

    let mut next_index = 0_usize;
    let mut clues: Vec<Clue> = Vec::new();

    clues.push(Clue {
        id: next_clue_id(&mut next_index),
        kind: ClueKind::Physical,
        name: format!("The {}", weapon.label()),
        description: format!(
            "A {} hidden near the {}. A thread from {}'s evening clothes is \
             caught on it.",
            weapon.label(),
            scene_name,
            killer_name
        ),
        found_at: crime_scene_id.clone(),
        points_to: Some(killer_id.clone()),
        is_red_herring: false,
        refuted_by: None,
        significance: Significance::Critical,
    });

    let motive_location = pick_location(locations, rng, false);
    clues.push(Clue {
        id: next_clue_id(&mut next_index),
        kind: ClueKind::Documentary,
        name: "An unsent letter".to_string(),
        description: format!(
            "Drafted in {}'s hand and never posted. It lays out, in plain \
             terms, a matter of {} between them and {}.",
            killer_name,
            motive.label(),
            victim_name
        ),
        found_at: motive_location,
        points_to: Some(killer_id.clone()),
        is_red_herring: false,
        refuted_by: None,
        significance: Significance::Critical,
    });

    clues.push(Clue {
        id: next_clue_id(&mut next_index),
        kind: ClueKind::Testimonial,
        name: "A figure in the doorway".to_string(),
        description: format!(
            "A member of the household recalls seeing {} slip toward the {} \
             shortly before {}.",
            killer_name,
            scene_name,
            time_of_death.label()
        ),
        found_at: crime_scene_id.clone(),
        points_to: Some(killer_id.clone()),
        is_red_herring: false,
        refuted_by: None,
        significance: Significance::Normal,
    });

    clues.push(Clue {
        id: next_clue_id(&mut next_index),
        kind: ClueKind::Behavioral,
        name: "A change of manner".to_string(),
        description: format!(
            "{} has avoided every mention of the {} since that night, and \
             left the room when the subject arose.",
            killer_name, scene_name
        ),
        found_at: pick_location(locations, rng, true),
        points_to: Some(killer_id.clone()),
        is_red_herring: false,
        refuted_by: None,
        significance: Significance::Normal,
    });

    clues.push(Clue {
        id: next_clue_id(&mut next_index),
        kind: ClueKind::Forensic,
        name: "The hour of death".to_string(),
        description: format!(
            "The examination fixes the death at {}, within a quarter hour \
             either way.",
            time_of_death.label()
        ),
        found_at: crime_scene_id.clone(),
        points_to: None,
        is_red_herring: false,
        refuted_by: None,
        significance: Significance::Critical,
    });

    // Clearing testimony for each innocent. Exoneration is modeled as a clue
    // pointing at the cleared suspect; the testimonial kind marks it as
    // clearing rather than incriminating.
    let mut clearing_clue_ids: Vec<(SuspectId, ClueId)> = Vec::new();
    for innocent in &innocents {
        let id = next_clue_id(&mut next_index);
        clearing_clue_ids.push((innocent.id.clone(), id.clone()));
        clues.push(Clue {
            id,
            kind: ClueKind::Testimonial,
            name: format!("Corroboration for {}", suspect_name(suspects, &innocent.id)),
            description: format!(
                "Independent accounts place {} well away from the {} at {}.",
                suspect_name(suspects, &innocent.id),
                scene_name,
                time_of_death.label()
            ),
            found_at: pick_location(locations, rng, true),
            points_to: Some(innocent.id.clone()),
            is_red_herring: false,
            refuted_by: None,
            significance: Significance::Normal,
        });
    }

    for _ in 0..difficulty.red_herring_count() {
        if innocents.is_empty() {
            break;
        }
        let target = rng.pick(&innocents);
        let refuted_by = clearing_clue_ids
            .iter()
            .find(|(suspect_id, _)| suspect_id == &target.id)
            .map(|(_, clue_id)| clue_id.clone());
        clues.push(Clue {
            id: next_clue_id(&mut next_index),
            kind: ClueKind::Physical,
            name: "A misplaced belonging".to_string(),
            description: format!(
                "Something of {}'s, found where it has no business being. It \
                 looks damning until the owner's evening is accounted for.",
                suspect_name(suspects, &target.id)
            ),
            found_at: pick_location(locations, rng, true),
            points_to: Some(target.id.clone()),
            is_red_herring: true,
            refuted_by,
            significance: Significance::Normal,
        });
    }

    if relationships.iter().any(|edge| !edge.is_public_knowledge) {
        clues.push(Clue {
            id: next_clue_id(&mut next_index),
            kind: ClueKind::Documentary,
            name: "Hidden correspondence".to_string(),
            description: "A bundle of letters, tied with ribbon and kept out \
                          of sight. Two people in this house know each other \
                          far better than they admit."
                .to_string(),
            found_at: pick_location(locations, rng, false),
            points_to: None,
            is_red_herring: false,
            refuted_by: None,
            significance: Significance::Minor,
        });
    }

    // Difficulty floor: easier cases carry extra implicating evidence.
    let implicating = |clues: &[Clue]| {
        clues
            .iter()
            .filter(|clue| clue.implicates(killer_id))
            .count()
    };
    let supplements = [
        (
            ClueKind::Forensic,
            "Prints on the weapon",
            format!(
                "A partial print on the {} matches {}.",
                weapon.label(),
                killer_name
            ),
        ),
        (
            ClueKind::Testimonial,
            "A second account",
            format!(
                "Another guest, pressed on the point, also puts {} near the {} \
                 that night.",
                killer_name, scene_name
            ),
        ),
        (
            ClueKind::Documentary,
            "A torn page",
            format!(
                "A page torn from {}'s diary, half burned. What remains reads \
                 like a rehearsal of grievances against {}.",
                killer_name, victim_name
            ),
        ),
    ];
    let mut supplement_index = 0;
    while implicating(&clues) < difficulty.implicating_clue_floor()
        && supplement_index < supplements.len()
    {
        let (kind, name, description) = &supplements[supplement_index];
        supplement_index += 1;
        clues.push(Clue {
            id: next_clue_id(&mut next_index),
            kind: *kind,
            name: (*name).to_string(),
            description: description.clone(),
            found_at: pick_location(locations, rng, true),
            points_to: Some(killer_id.clone()),
            is_red_herring: false,
            refuted_by: None,
            significance: Significance::Normal,
        });
    }

    rng.shuffle(&clues)
}

fn next_clue_id(index: &mut usize) -> ClueId {
    let id = ClueId::new(format!("clue_{:03}", *index));
    *index += 1;
    id
}

fn suspect_name(suspects: &[Suspect], id: &SuspectId) -> String {
    suspects
        .iter()
        .find(|s| &s.id == id)
        .map(Suspect::full_name)
        .unwrap_or_else(|| id.to_string())
}

fn location_name(locations: &[Location], id: &LocationId) -> String {
    locations
        .iter()
        .find(|l| &l.id == id)
        .map(|l| l.name.clone())
        .unwrap_or_else(|| id.to_string())
}

/// A random location, preferring public or private rooms as requested and
/// falling back to the whole list when no room qualifies.
fn pick_location(locations: &[Location], rng: &mut CaseRng, public: bool) -> LocationId {
    let preferred: Vec<&Location> = locations
        .iter()
        .filter(|l| l.is_public == public)
        .collect();
    if preferred.is_empty() {
        rng.pick(locations).id.clone()
    } else {
        rng.pick(&preferred).id.clone()
    }
}
