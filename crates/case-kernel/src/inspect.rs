//! Read-only JSON digests of case entities for the CLI and debugging.
//!
//! Everything here is derived, never stored: the digests walk the case and
//! (where relevant) the testimonies and report what a front end would render
//! on a dossier screen.

use std::collections::BTreeMap;

use contracts::{Case, LocationId, Suspect, SuspectId, Testimony};
use serde_json::{json, Value};

/// Full dossier for one suspect: identity, relationships as the household
/// knows them, the alibi on record, and how many statements they will give.
pub fn inspect_suspect(
    case: &Case,
    testimonies: &BTreeMap<SuspectId, Testimony>,
    suspect_id: &SuspectId,
) -> Option<Value> {
    let suspect = case.suspect(suspect_id)?;

    let relationships = case
        .relationships
        .iter()
        .filter(|edge| edge.involves(suspect_id))
        .map(|edge| {
            let other = if &edge.from == suspect_id {
                &edge.to
            } else {
                &edge.from
            };
            json!({
                "with": name_of(case, other),
                "kind": edge.kind.label(),
                "sentiment": edge.sentiment,
                "is_public_knowledge": edge.is_public_knowledge,
            })
        })
        .collect::<Vec<_>>();

    let alibi = case.alibi_for(suspect_id).map(|alibi| {
        json!({
            "time_slot": alibi.time_slot.label(),
            "location": case
                .location(&alibi.location_id)
                .map(|location| location.name.clone())
                .unwrap_or_else(|| alibi.location_id.to_string()),
            "witness_count": alibi.witnesses.len(),
            "is_verifiable": alibi.is_verifiable,
            "description": &alibi.description,
        })
    });

    Some(json!({
        "suspect_id": suspect_id,
        "name": suspect.full_name(),
        "occupation": &suspect.occupation,
        "age": suspect.age,
        "description": &suspect.description,
        "is_victim": suspect.is_victim,
        "relationships": relationships,
        "alibi": alibi,
        "statement_count": testimonies
            .get(suspect_id)
            .map(|testimony| testimony.statements.len())
            .unwrap_or(0),
    }))
}

/// What a search of one location would turn up, plus the room itself.
pub fn inspect_location(case: &Case, location_id: &LocationId) -> Option<Value> {
    let location = case.location(location_id)?;
    let clues = case
        .clues_at(location_id)
        .map(|clue| {
            json!({
                "clue_id": &clue.id,
                "kind": format!("{:?}", clue.kind).to_lowercase(),
                "name": &clue.name,
                "significance": format!("{:?}", clue.significance).to_lowercase(),
            })
        })
        .collect::<Vec<_>>();
    Some(json!({
        "location_id": location_id,
        "name": &location.name,
        "description": &location.description,
        "is_public": location.is_public,
        "is_crime_scene": location.is_crime_scene,
        "clues": clues,
    }))
}

/// The evidence board: every clue bucketed by who it points at, with red
/// herrings separated out once their refuting clue is known.
pub fn evidence_board(case: &Case) -> Value {
    let mut by_suspect: BTreeMap<String, Vec<Value>> = BTreeMap::new();
    let mut unattributed = Vec::new();
    let mut herrings = Vec::new();

    for clue in &case.clues {
        let entry = json!({
            "clue_id": &clue.id,
            "name": &clue.name,
            "kind": format!("{:?}", clue.kind).to_lowercase(),
            "found_at": &clue.found_at,
            "refuted_by": &clue.refuted_by,
        });
        if clue.is_red_herring {
            herrings.push(entry);
        } else {
            match clue.points_to.as_ref() {
                Some(suspect_id) => by_suspect
                    .entry(name_of(case, suspect_id))
                    .or_default()
                    .push(entry),
                None => unattributed.push(entry),
            }
        }
    }

    json!({
        "seed": &case.seed,
        "by_suspect": by_suspect,
        "unattributed": unattributed,
        "red_herrings": herrings,
    })
}

fn name_of(case: &Case, suspect_id: &SuspectId) -> String {
    case.suspect(suspect_id)
        .map(Suspect::full_name)
        .unwrap_or_else(|| suspect_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::casegen::generate_case;
    use crate::rng::CaseRng;
    use crate::statements::generate_testimonies;
    use contracts::CaseConfig;

    fn fixture(seed: &str) -> (Case, BTreeMap<SuspectId, Testimony>) {
        let case = generate_case(seed, &CaseConfig::default()).expect("generates");
        let mut rng = CaseRng::new(&case.seed);
        let testimonies = generate_testimonies(&case, &mut rng);
        (case, testimonies)
    }

    #[test]
    fn suspect_dossier_reports_relationships_and_alibi() {
        let (case, testimonies) = fixture("inspect-suspect");
        let dossier = inspect_suspect(&case, &testimonies, &case.killer_id)
            .expect("killer dossier exists");
        assert_eq!(dossier["is_victim"], json!(false));
        assert!(!dossier["relationships"]
            .as_array()
            .expect("relationship list")
            .is_empty());
        assert!(dossier["alibi"].is_object());
        assert_eq!(dossier["statement_count"], json!(4));
    }

    #[test]
    fn unknown_ids_inspect_to_none() {
        let (case, testimonies) = fixture("inspect-missing");
        assert!(inspect_suspect(&case, &testimonies, &SuspectId::new("suspect_999")).is_none());
        assert!(inspect_location(&case, &LocationId::new("location_999")).is_none());
    }

    #[test]
    fn location_digest_lists_the_clues_found_there() {
        let (case, _) = fixture("inspect-location");
        let digest =
            inspect_location(&case, &case.crime_scene_id).expect("crime scene digest exists");
        assert_eq!(digest["is_crime_scene"], json!(true));
        let listed = digest["clues"].as_array().expect("clue list").len();
        assert_eq!(listed, case.clues_at(&case.crime_scene_id).count());
    }

    #[test]
    fn evidence_board_buckets_every_clue_exactly_once() {
        let (case, _) = fixture("inspect-board");
        let board = evidence_board(&case);
        let bucketed: usize = board["by_suspect"]
            .as_object()
            .expect("suspect buckets")
            .values()
            .map(|entries| entries.as_array().map(Vec::len).unwrap_or(0))
            .sum::<usize>()
            + board["unattributed"].as_array().map(Vec::len).unwrap_or(0)
            + board["red_herrings"].as_array().map(Vec::len).unwrap_or(0);
        assert_eq!(bucketed, case.clues.len());
        let killer_name = case
            .suspect(&case.killer_id)
            .expect("killer exists")
            .full_name();
        assert!(board["by_suspect"][&killer_name]
            .as_array()
            .expect("killer bucket")
            .len()
            >= 2);
    }
}
