use std::env;

use case_kernel::inspect::{evidence_board, inspect_location, inspect_suspect};
use case_kernel::panel::find_valid_move;
use case_kernel::{case_summary, generate_case, generate_testimonies, CaseRng, GameState};
use case_kernel::{PanelPuzzle, PuzzleConfig};
use contracts::LocationId;
use case_store::SqliteSaveStore;
use contracts::{CaseConfig, Difficulty, GameAction, SuspectId};

fn print_usage() {
    println!("case-cli <command>");
    println!("commands:");
    println!("  generate <seed> [suspects] [difficulty]");
    println!("    prints the full case as JSON (difficulty: easy|medium|hard)");
    println!("  summary <seed>");
    println!("  inspect <seed> [suspect_id|location_id]");
    println!("    prints a dossier, a room digest, or the whole evidence board");
    println!("  testimony <seed> [suspect_id]");
    println!("  solve <seed>");
    println!("    plays the case to completion from its own evidence");
    println!("  puzzle <seed> [moves]");
    println!("    plays hint-driven swaps and prints the score (default 10 moves)");
    println!("  save <seed> <slot> [sqlite_path]");
    println!("  load <slot> [sqlite_path]");
    println!("    default sqlite path: case_saves.sqlite");
}

fn parse_difficulty(value: Option<&String>) -> Result<Difficulty, String> {
    match value.map(String::as_str) {
        None | Some("medium") => Ok(Difficulty::Medium),
        Some("easy") => Ok(Difficulty::Easy),
        Some("hard") => Ok(Difficulty::Hard),
        Some(other) => Err(format!("invalid difficulty: {other}")),
    }
}

fn parse_config(args: &[String]) -> Result<CaseConfig, String> {
    let suspect_count = args
        .get(3)
        .map(|value| {
            value
                .parse::<usize>()
                .map_err(|_| format!("invalid suspect count: {value}"))
        })
        .transpose()?
        .unwrap_or(CaseConfig::default().suspect_count);
    let difficulty = parse_difficulty(args.get(4))?;
    Ok(CaseConfig {
        suspect_count,
        difficulty,
    })
}

fn sqlite_path(value: Option<&String>) -> String {
    value
        .map(String::to_string)
        .filter(|path| !path.trim().is_empty())
        .unwrap_or_else(|| {
            env::var("CASE_SQLITE_PATH")
                .ok()
                .filter(|path| !path.trim().is_empty())
                .unwrap_or_else(|| "case_saves.sqlite".to_string())
        })
}

fn require_seed(args: &[String]) -> Result<&String, String> {
    args.get(2).ok_or_else(|| "missing seed".to_string())
}

fn run_generate(args: &[String]) -> Result<(), String> {
    let seed = require_seed(args)?;
    let config = parse_config(args)?;
    let case = generate_case(seed, &config).map_err(|err| err.to_string())?;
    let rendered =
        serde_json::to_string_pretty(&case).map_err(|err| err.to_string())?;
    println!("{rendered}");
    Ok(())
}

fn run_summary(args: &[String]) -> Result<(), String> {
    let seed = require_seed(args)?;
    let case = generate_case(seed, &CaseConfig::default()).map_err(|err| err.to_string())?;
    println!("{}", case_summary(&case));
    Ok(())
}

fn run_inspect(args: &[String]) -> Result<(), String> {
    let seed = require_seed(args)?;
    let case = generate_case(seed, &CaseConfig::default()).map_err(|err| err.to_string())?;
    let mut rng = CaseRng::new(&case.seed);
    let testimonies = generate_testimonies(&case, &mut rng);

    let digest = match args.get(3) {
        None => evidence_board(&case),
        Some(raw) if raw.starts_with("location_") => {
            inspect_location(&case, &LocationId::new(raw.clone()))
                .ok_or_else(|| format!("unknown location: {raw}"))?
        }
        Some(raw) => inspect_suspect(&case, &testimonies, &SuspectId::new(raw.clone()))
            .ok_or_else(|| format!("unknown suspect: {raw}"))?,
    };
    let rendered = serde_json::to_string_pretty(&digest).map_err(|err| err.to_string())?;
    println!("{rendered}");
    Ok(())
}

fn run_testimony(args: &[String]) -> Result<(), String> {
    let seed = require_seed(args)?;
    let case = generate_case(seed, &CaseConfig::default()).map_err(|err| err.to_string())?;
    let mut rng = CaseRng::new(&case.seed);
    let testimonies = generate_testimonies(&case, &mut rng);
    match args.get(3) {
        Some(raw) => {
            let suspect_id = SuspectId::new(raw.clone());
            let testimony = testimonies
                .get(&suspect_id)
                .ok_or_else(|| format!("no testimony for {raw}"))?;
            let rendered =
                serde_json::to_string_pretty(testimony).map_err(|err| err.to_string())?;
            println!("{rendered}");
        }
        None => {
            let rendered =
                serde_json::to_string_pretty(&testimonies).map_err(|err| err.to_string())?;
            println!("{rendered}");
        }
    }
    Ok(())
}

/// Searches every room (earning tokens back through puzzle wins as needed),
/// then accuses whoever the non-herring evidence points at repeatedly.
fn run_solve(args: &[String]) -> Result<(), String> {
    let seed = require_seed(args)?;
    let mut state = GameState::new_game(seed, &CaseConfig::default())
        .map_err(|err| err.to_string())?
        .reduce(&GameAction::BeginInvestigation);

    let location_ids: Vec<_> = state
        .case
        .locations
        .iter()
        .map(|location| location.id.clone())
        .collect();
    for location_id in location_ids {
        if state.search_tokens == 0 {
            state = state.reduce(&GameAction::PuzzleFinished { won: true });
        }
        state = state.reduce(&GameAction::SearchLocation { location_id });
    }

    let accused = state
        .case
        .clues
        .iter()
        .filter(|clue| !clue.is_red_herring)
        .filter_map(|clue| clue.points_to.as_ref())
        .find(|suspect_id| {
            state
                .case
                .clues
                .iter()
                .filter(|clue| !clue.is_red_herring)
                .filter(|clue| clue.points_to.as_ref() == Some(*suspect_id))
                .count()
                >= 2
        })
        .cloned()
        .ok_or_else(|| "evidence does not single anyone out".to_string())?;

    let resolved = state
        .reduce(&GameAction::OpenAccusation)
        .reduce(&GameAction::SelectAccused {
            suspect_id: accused.clone(),
        })
        .reduce(&GameAction::ConfirmAccusation);
    let result = resolved
        .result
        .ok_or_else(|| "accusation did not resolve".to_string())?;
    println!(
        "seed={} accused={} correct={} won={} clues_found={} events={}",
        seed,
        result.player_accused,
        result.correct_killer,
        result.won,
        resolved.knowledge.discovered_clues.len(),
        resolved.history.len()
    );
    Ok(())
}

fn run_puzzle(args: &[String]) -> Result<(), String> {
    let seed = require_seed(args)?;
    let moves = args
        .get(3)
        .map(|value| {
            value
                .parse::<usize>()
                .map_err(|_| format!("invalid move count: {value}"))
        })
        .transpose()?
        .unwrap_or(10);

    let mut puzzle = PanelPuzzle::new(&PuzzleConfig::new(seed.clone()));
    let mut played = 0_usize;
    for _ in 0..moves {
        if puzzle.is_game_over {
            break;
        }
        let Some((from, to)) = find_valid_move(&puzzle.grid) else {
            break;
        };
        puzzle = puzzle.try_swap(from, to).settle();
        played += 1;
    }
    println!(
        "seed={} moves={} score={} target={} won={}",
        seed,
        played,
        puzzle.score,
        puzzle.target_score,
        puzzle.is_won()
    );
    Ok(())
}

fn run_save(args: &[String]) -> Result<(), String> {
    let seed = require_seed(args)?;
    let slot = args.get(3).ok_or_else(|| "missing slot".to_string())?;
    let path = sqlite_path(args.get(4));
    let state = GameState::new_game(seed, &CaseConfig::default())
        .map_err(|err| err.to_string())?
        .reduce(&GameAction::BeginInvestigation);
    let mut store = SqliteSaveStore::open(&path).map_err(|err| err.to_string())?;
    store
        .save(slot, &state.to_saved())
        .map_err(|err| err.to_string())?;
    println!("saved seed={seed} slot={slot} sqlite={path}");
    Ok(())
}

fn run_load(args: &[String]) -> Result<(), String> {
    let slot = args.get(2).ok_or_else(|| "missing slot".to_string())?;
    let path = sqlite_path(args.get(3));
    let store = SqliteSaveStore::open(&path).map_err(|err| err.to_string())?;
    match store.load_or_fresh(slot) {
        Some(saved) => {
            let state = GameState::from_saved(saved);
            println!(
                "loaded slot={} seed={} phase={:?} clues_found={} tokens={}",
                slot,
                state.case.seed,
                state.phase,
                state.knowledge.discovered_clues.len(),
                state.search_tokens
            );
        }
        None => {
            println!("no saved game in slot={slot}; start fresh with a new seed");
        }
    }
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str);

    let outcome = match command {
        Some("generate") => run_generate(&args),
        Some("summary") => run_summary(&args),
        Some("inspect") => run_inspect(&args),
        Some("testimony") => run_testimony(&args),
        Some("solve") => run_solve(&args),
        Some("puzzle") => run_puzzle(&args),
        Some("save") => run_save(&args),
        Some("load") => run_load(&args),
        _ => {
            print_usage();
            return;
        }
    };

    if let Err(err) = outcome {
        eprintln!("error: {err}");
        print_usage();
        std::process::exit(2);
    }
}
