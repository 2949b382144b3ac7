//! Relationship graph generation: the motive edge, red-herring hostility
//! toward the victim, a connectivity pass, and hidden edges.
//!
//! The graph is directed and multi-edge; opposite-direction edges between the
//! same pair are never deduplicated. Every draw comes from the one shared
//! stream in a fixed call order so identical seeds reproduce identical graphs.

use contracts::{Motive, Relationship, RelationshipKind, Suspect, SuspectId};

use crate::pools::SECRET_REASONS;
use crate::rng::CaseRng;

/// Minimum edges (in either direction) each suspect ends up with.
pub const MIN_CONNECTIONS_PER_PERSON: usize = 2;

const SECRET_EDGE_KINDS: [RelationshipKind; 3] = [
    RelationshipKind::Lover,
    RelationshipKind::ExLover,
    RelationshipKind::BusinessPartner,
];

pub fn generate_relationships(
    suspects: &[Suspect],
    victim_id: &SuspectId,
    killer_id: &SuspectId,
    motive: Motive,
    rng: &mut CaseRng,
) -> Vec<Relationship> {
    let mut edges: Vec<Relationship> = Vec::new();

    // The motive-bearing edge. A secret-affair motive is hidden by nature;
    // every other motive edge is common knowledge around the household.
    let motive_kind = *rng.pick(motive.relationship_kinds());
    let motive_is_public = motive != Motive::SecretAffair;
    let motive_secret = if motive_is_public {
        None
    } else {
        Some(rng.pick(SECRET_REASONS).to_string())
    };
    edges.push(Relationship::new(
        killer_id.clone(),
        victim_id.clone(),
        motive_kind,
        rng.random_int(-10, -6),
        motive_is_public,
        motive_secret,
    ));

    // Red-herring hostility: innocents with their own grudges against the
    // victim, so the killer's edge is not the only dark one.
    let others: Vec<&Suspect> = suspects
        .iter()
        .filter(|s| &s.id != victim_id && &s.id != killer_id)
        .collect();
    let herring_count = rng.random_int(2, 3) as usize;
    let herring_targets = rng.shuffle(&others);
    for other in herring_targets.iter().take(herring_count.min(others.len())) {
        let is_public = rng.chance(0.7);
        let secret_reason = if is_public {
            None
        } else {
            Some(rng.pick(SECRET_REASONS).to_string())
        };
        edges.push(Relationship::new(
            other.id.clone(),
            victim_id.clone(),
            *rng.pick(&RelationshipKind::ALL),
            rng.random_int(-8, -3),
            is_public,
            secret_reason,
        ));
    }

    // Connectivity pass: everyone, victim and killer included, ends up with
    // at least MIN_CONNECTIONS_PER_PERSON edges.
    for suspect in suspects {
        loop {
            let degree = edges
                .iter()
                .filter(|edge| edge.involves(&suspect.id))
                .count();
            if degree >= MIN_CONNECTIONS_PER_PERSON {
                break;
            }
            let candidates: Vec<&Suspect> = suspects
                .iter()
                .filter(|other| other.id != suspect.id)
                .filter(|other| {
                    !edges.iter().any(|edge| edge.links(&suspect.id, &other.id))
                })
                .collect();
            if candidates.is_empty() {
                break;
            }
            let partner = rng.pick(&candidates);
            edges.push(Relationship::new(
                suspect.id.clone(),
                partner.id.clone(),
                *rng.pick(&RelationshipKind::ALL),
                rng.random_int(-5, 8),
                true,
                None,
            ));
        }
    }

    // Hidden edges between pairs that have no relationship yet.
    let mut unlinked_pairs: Vec<(SuspectId, SuspectId)> = Vec::new();
    for (i, a) in suspects.iter().enumerate() {
        for b in suspects.iter().skip(i + 1) {
            if !edges.iter().any(|edge| edge.links(&a.id, &b.id)) {
                unlinked_pairs.push((a.id.clone(), b.id.clone()));
            }
        }
    }
    let secret_count = rng.random_int(1, 2) as usize;
    let shuffled_pairs = rng.shuffle(&unlinked_pairs);
    for (from, to) in shuffled_pairs.iter().take(secret_count.min(unlinked_pairs.len())) {
        edges.push(Relationship::new(
            from.clone(),
            to.clone(),
            *rng.pick(&SECRET_EDGE_KINDS),
            rng.random_int(-3, 8),
            false,
            Some(rng.pick(SECRET_REASONS).to_string()),
        ));
    }

    edges
}
