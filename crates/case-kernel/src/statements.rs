//! Testimony generation: per-suspect interrogation statements with lies wired
//! to the clues that refute them.
//!
//! Statement order is fixed: alibi, relationship to the victim, observation,
//! self. The first two are skipped when the suspect has no alibi or no edge
//! to the victim. Lies are confined to the killer, with one exception: an
//! innocent hiding a secret relationship to the victim lies about that
//! relationship and nothing else. Phrasing variants are cosmetic; the stream
//! draws vary the words between seeds, never the structure.

use std::collections::BTreeMap;

use contracts::{
    Alibi, Case, Clue, ClueId, ClueKind, Relationship, Significance, Statement, StatementId,
    StatementTopic, Suspect, SuspectId, Testimony,
};

use crate::rng::CaseRng;

/// Builds testimonies for every living suspect.
///
/// Callers wanting reload-stable flavor text must pass a fresh stream seeded
/// with the case's own seed; the structure is identical either way.
pub fn generate_testimonies(case: &Case, rng: &mut CaseRng) -> BTreeMap<SuspectId, Testimony> {
    let mut testimonies = BTreeMap::new();
    for suspect in case.living_suspects() {
        let mut statements = Vec::new();
        if let Some(alibi) = case.alibi_for(&suspect.id) {
            statements.push(alibi_statement(case, suspect, alibi, rng));
        }
        if let Some(edge) = case.relationship_between(&suspect.id, &case.victim_id) {
            statements.push(relationship_statement(case, suspect, edge, rng));
        }
        statements.push(observation_statement(case, suspect, rng));
        statements.push(self_statement(case, suspect, rng));

        testimonies.insert(
            suspect.id.clone(),
            Testimony {
                suspect_id: suspect.id.clone(),
                statements,
            },
        );
    }
    testimonies
}

fn statement_id(suspect_id: &SuspectId, topic: &str) -> StatementId {
    StatementId::new(format!("statement_{suspect_id}_{topic}"))
}

fn location_name(case: &Case, alibi: &Alibi) -> String {
    case.location(&alibi.location_id)
        .map(|location| location.name.clone())
        .unwrap_or_else(|| alibi.location_id.to_string())
}

fn victim_name(case: &Case) -> String {
    case.suspect(&case.victim_id)
        .map(Suspect::full_name)
        .unwrap_or_else(|| case.victim_id.to_string())
}

// Clue cross-referencing. Each lie topic is refuted by a distinct slice of
// the case's own evidence, resolved at generation time.

fn alibi_lie_contradictions(case: &Case, liar: &SuspectId) -> Vec<ClueId> {
    case.clues
        .iter()
        .filter(|clue| {
            matches!(clue.kind, ClueKind::Testimonial | ClueKind::Physical)
                && clue.implicates(liar)
        })
        .map(|clue| clue.id.clone())
        .collect()
}

fn observation_lie_contradictions(case: &Case) -> Vec<ClueId> {
    case.clues
        .iter()
        .filter(|clue| clue.kind == ClueKind::Testimonial && clue.implicates(&case.killer_id))
        .map(|clue| clue.id.clone())
        .collect()
}

fn motive_lie_contradictions(case: &Case) -> Vec<ClueId> {
    case.clues
        .iter()
        .filter(|clue| {
            clue.kind == ClueKind::Documentary
                && clue.significance == Significance::Critical
                && clue.implicates(&case.killer_id)
        })
        .map(|clue| clue.id.clone())
        .collect()
}

fn secret_lie_contradictions(case: &Case) -> Vec<ClueId> {
    case.clues
        .iter()
        .filter(|clue: &&Clue| {
            clue.kind == ClueKind::Documentary && clue.points_to.is_none() && !clue.is_red_herring
        })
        .map(|clue| clue.id.clone())
        .collect()
}

fn alibi_statement(case: &Case, suspect: &Suspect, alibi: &Alibi, rng: &mut CaseRng) -> Statement {
    let place = location_name(case, alibi);
    let when = alibi.time_slot.label();
    if suspect.is_killer {
        let text = match rng.random_int(0, 2) {
            0 => format!("I was in the {place} at {when}, exactly as I told the constable."),
            1 => format!("You will find I was in the {place} all evening. Ask anyone."),
            _ => format!("At {when}? The {place}. I had no reason to be anywhere else."),
        };
        let press_response = match rng.random_int(0, 1) {
            0 => "My account has not changed and it will not change now.".to_string(),
            _ => "I resent the implication. I have told you where I was.".to_string(),
        };
        let truth_reveal = match rng.random_int(0, 1) {
            0 => format!(
                "Very well. I was not in the {place}. But it is not what you think."
            ),
            _ => "All right — the account was invented. I panicked. Anyone would have."
                .to_string(),
        };
        Statement {
            id: statement_id(&suspect.id, "alibi"),
            suspect_id: suspect.id.clone(),
            topic: StatementTopic::Alibi,
            text,
            press_response,
            is_lie: true,
            contradicted_by: alibi_lie_contradictions(case, &suspect.id),
            truth_reveal: Some(truth_reveal),
        }
    } else {
        let text = match rng.random_int(0, 1) {
            0 => format!("I was in the {place} at {when}. {}", witness_phrase(alibi)),
            _ => format!("The {place}, at {when} — {}", witness_phrase(alibi)),
        };
        Statement {
            id: statement_id(&suspect.id, "alibi"),
            suspect_id: suspect.id.clone(),
            topic: StatementTopic::Alibi,
            text,
            press_response: "I can only tell you what I remember, and I remember the evening \
                             clearly enough."
                .to_string(),
            is_lie: false,
            contradicted_by: Vec::new(),
            truth_reveal: None,
        }
    }
}

fn witness_phrase(alibi: &Alibi) -> String {
    match alibi.witnesses.len() {
        0 => "though I admit no one was with me.".to_string(),
        1 => "one of the party can vouch for me.".to_string(),
        _ => "several of the party can vouch for me.".to_string(),
    }
}

fn relationship_statement(
    case: &Case,
    suspect: &Suspect,
    edge: &Relationship,
    rng: &mut CaseRng,
) -> Statement {
    let victim = victim_name(case);
    if suspect.is_killer {
        let text = match rng.random_int(0, 2) {
            0 => format!("{victim} and I were on perfectly good terms. Always were."),
            1 => format!("There was no bad blood between {victim} and myself. None."),
            _ => format!("I held {victim} in the highest regard, whatever you may have heard."),
        };
        Statement {
            id: statement_id(&suspect.id, "victim"),
            suspect_id: suspect.id.clone(),
            topic: StatementTopic::Victim,
            text,
            press_response: "People gossip. I am telling you how things actually stood."
                .to_string(),
            is_lie: true,
            contradicted_by: motive_lie_contradictions(case),
            truth_reveal: Some(format!(
                "Fine. Things between {victim} and myself were... not as I described."
            )),
        }
    } else if !edge.is_public_knowledge {
        let text = match rng.random_int(0, 1) {
            0 => format!("{victim}? We were barely acquainted, truth be told."),
            _ => format!("I knew {victim} to nod to in the hallway. Nothing more."),
        };
        Statement {
            id: statement_id(&suspect.id, "victim"),
            suspect_id: suspect.id.clone(),
            topic: StatementTopic::Victim,
            text,
            press_response: "I don't see what our acquaintance has to do with anything."
                .to_string(),
            is_lie: true,
            contradicted_by: secret_lie_contradictions(case),
            truth_reveal: Some(format!(
                "So you know. {victim} and I were closer than we let on. It was \
                 nobody's business but ours — and it had nothing to do with this."
            )),
        }
    } else {
        let text = format!(
            "{victim} was my {}. {}",
            edge.kind.label(),
            sentiment_phrase(edge.sentiment)
        );
        Statement {
            id: statement_id(&suspect.id, "victim"),
            suspect_id: suspect.id.clone(),
            topic: StatementTopic::Victim,
            text,
            press_response: "It was no secret. Anyone in the house could tell you the same."
                .to_string(),
            is_lie: false,
            contradicted_by: Vec::new(),
            truth_reveal: None,
        }
    }
}

fn sentiment_phrase(sentiment: i64) -> &'static str {
    if sentiment <= -6 {
        "We had quarreled badly, and I won't pretend otherwise."
    } else if sentiment < 0 {
        "We had our differences, as people do."
    } else if sentiment < 5 {
        "We got on well enough."
    } else {
        "We were close, and this has hit me hard."
    }
}

fn observation_statement(case: &Case, suspect: &Suspect, rng: &mut CaseRng) -> Statement {
    let scene = case
        .location(&case.crime_scene_id)
        .map(|location| location.name.clone())
        .unwrap_or_else(|| case.crime_scene_id.to_string());
    let when = case.time_of_death.label();
    if suspect.is_killer {
        let text = match rng.random_int(0, 2) {
            0 => format!(
                "I did see someone hurrying away from the {scene} around {when}. \
                 Too dark to say who."
            ),
            1 => "There was a stranger about the grounds that evening. I'd swear to it."
                .to_string(),
            _ => format!(
                "Now that you ask — I heard the service door near the {scene} go, \
                 sometime before {when}."
            ),
        };
        Statement {
            id: statement_id(&suspect.id, "observations"),
            suspect_id: suspect.id.clone(),
            topic: StatementTopic::Observations,
            text,
            press_response: "I know what I saw. Whether it suits your theory is another matter."
                .to_string(),
            is_lie: true,
            contradicted_by: observation_lie_contradictions(case),
            truth_reveal: Some(
                "There was no stranger. I needed you looking anywhere but at me."
                    .to_string(),
            ),
        }
    } else {
        let text = match rng.random_int(0, 2) {
            0 => "The evening seemed entirely ordinary to me, right up until the alarm."
                .to_string(),
            1 => format!("I heard nothing out of place, though the {scene} is far from my room."),
            _ => "People drifted between rooms all evening. I couldn't give you a full account \
                  of anyone."
                .to_string(),
        };
        Statement {
            id: statement_id(&suspect.id, "observations"),
            suspect_id: suspect.id.clone(),
            topic: StatementTopic::Observations,
            text,
            press_response: "I've told you everything I noticed. I wasn't keeping watch."
                .to_string(),
            is_lie: false,
            contradicted_by: Vec::new(),
            truth_reveal: None,
        }
    }
}

fn self_statement(case: &Case, suspect: &Suspect, rng: &mut CaseRng) -> Statement {
    let victim = victim_name(case);
    if suspect.is_killer {
        let text = match rng.random_int(0, 2) {
            0 => format!("I had no quarrel with {victim}. What could I possibly have gained?"),
            1 => "Look at me. Do I strike you as someone with anything to hide?".to_string(),
            _ => format!("My conscience is clear. I wished {victim} nothing but well."),
        };
        Statement {
            id: statement_id(&suspect.id, "self"),
            suspect_id: suspect.id.clone(),
            topic: StatementTopic::SelfAccount,
            text,
            press_response: "This is harassment. My affairs are in perfect order.".to_string(),
            is_lie: true,
            contradicted_by: motive_lie_contradictions(case),
            truth_reveal: Some(format!(
                "You have it in writing, then. Yes — there was a matter between \
                 {victim} and myself. I never meant for it to end this way."
            )),
        }
    } else {
        let text = match rng.random_int(0, 1) {
            0 => "I came for a quiet weekend and found myself in a nightmare. That is the \
                  whole of my involvement."
                .to_string(),
            _ => "I have nothing to hide. Ask your questions and let me be.".to_string(),
        };
        Statement {
            id: statement_id(&suspect.id, "self"),
            suspect_id: suspect.id.clone(),
            topic: StatementTopic::SelfAccount,
            text,
            press_response: "My answer is the same however many times you ask.".to_string(),
            is_lie: false,
            contradicted_by: Vec::new(),
            truth_reveal: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::casegen::generate_case;
    use contracts::CaseConfig;

    fn testimony_fixture(seed: &str) -> (Case, BTreeMap<SuspectId, Testimony>) {
        let case = generate_case(seed, &CaseConfig::default()).expect("generates");
        let mut rng = CaseRng::new(&case.seed);
        let testimonies = generate_testimonies(&case, &mut rng);
        (case, testimonies)
    }

    #[test]
    fn every_living_suspect_testifies_with_three_or_four_statements() {
        let (case, testimonies) = testimony_fixture("statements-shape");
        assert_eq!(testimonies.len(), case.suspects.len() - 1);
        for testimony in testimonies.values() {
            assert!((3..=4).contains(&testimony.statements.len()));
        }
    }

    #[test]
    fn every_lie_is_contradictable() {
        let (_, testimonies) = testimony_fixture("statements-lies");
        for testimony in testimonies.values() {
            for statement in testimony.lies() {
                assert!(
                    statement.is_contradictable(),
                    "lie {} has no refuting clue",
                    statement.id
                );
                assert!(statement.truth_reveal.is_some());
            }
        }
    }

    #[test]
    fn killer_lies_on_every_topic() {
        let (case, testimonies) = testimony_fixture("statements-killer");
        let killer_testimony = testimonies.get(&case.killer_id).expect("killer testifies");
        assert_eq!(killer_testimony.statements.len(), 4);
        assert!(killer_testimony.statements.iter().all(|s| s.is_lie));
    }

    #[test]
    fn innocents_lie_only_about_secret_relationships() {
        for seed in ["statements-innocent-a", "statements-innocent-b"] {
            let (case, testimonies) = testimony_fixture(seed);
            for (suspect_id, testimony) in &testimonies {
                if suspect_id == &case.killer_id {
                    continue;
                }
                for statement in testimony.lies() {
                    assert_eq!(statement.topic, StatementTopic::Victim);
                    let edge = case
                        .relationship_between(suspect_id, &case.victim_id)
                        .expect("lying innocent has an edge to the victim");
                    assert!(!edge.is_public_knowledge);
                }
            }
        }
    }

    #[test]
    fn truthful_statements_never_reveal() {
        let (_, testimonies) = testimony_fixture("statements-truths");
        for testimony in testimonies.values() {
            for statement in testimony.statements.iter().filter(|s| !s.is_lie) {
                assert!(statement.truth_reveal.is_none());
                assert!(statement.contradicted_by.is_empty());
            }
        }
    }

    #[test]
    fn structure_is_stable_across_streams() {
        let case = generate_case("statements-stable", &CaseConfig::default()).expect("generates");
        let mut rng_a = CaseRng::new("flavor-stream-one");
        let mut rng_b = CaseRng::new("flavor-stream-two");
        let a = generate_testimonies(&case, &mut rng_a);
        let b = generate_testimonies(&case, &mut rng_b);
        assert_eq!(a.len(), b.len());
        for (suspect_id, testimony_a) in &a {
            let testimony_b = &b[suspect_id];
            assert_eq!(testimony_a.statements.len(), testimony_b.statements.len());
            for (sa, sb) in testimony_a
                .statements
                .iter()
                .zip(testimony_b.statements.iter())
            {
                assert_eq!(sa.topic, sb.topic);
                assert_eq!(sa.is_lie, sb.is_lie);
                assert_eq!(sa.contradicted_by, sb.contradicted_by);
            }
        }
    }
}
