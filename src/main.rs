// Mahjong Score Ledger - CLI host
// Owns the storage medium (a JSON state file) and the user-facing
// warnings; the core ledger itself stays transport-agnostic.

use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use mahjong_ledger::{export_history_to_path, Ledger, SavedState, SEAT_COUNT, VERSION};

fn state_path() -> PathBuf {
    env::var_os("MAHJONG_LEDGER_STATE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("ledger-state.json"))
}

fn load_ledger() -> Result<Ledger> {
    let path = state_path();
    if !path.exists() {
        return Ok(Ledger::new());
    }

    let blob = fs::read_to_string(&path)
        .with_context(|| format!("failed to read state file: {:?}", path))?;

    // Report a bad file once, then recover field-by-field.
    if let Err(err) = SavedState::from_json_strict(&blob) {
        eprintln!("⚠️  {} (recovering what we can)", err);
    }
    Ok(Ledger::load_state(&blob))
}

fn save_ledger(ledger: &Ledger) -> Result<()> {
    let path = state_path();
    let blob = ledger.serialize_state()?;
    fs::write(&path, blob).with_context(|| format!("failed to write state file: {:?}", path))
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("show");

    match command {
        "show" => show(&load_ledger()?),
        "add" => {
            let name = arg(&args, 2, "player name")?;
            let mut ledger = load_ledger()?;
            ledger.add_player(&name)?;
            save_ledger(&ledger)?;
            println!("✓ Added player '{}'", name.trim());
        }
        "seat" => {
            let index = parse_seat(&arg(&args, 2, "seat index")?)?;
            let name = arg(&args, 3, "player name")?;
            let mut ledger = load_ledger()?;
            ledger.seat_player(index, &name)?;
            save_ledger(&ledger)?;
            println!("✓ Seated '{}' at seat {}", name, index);
        }
        "vacate" => {
            let index = parse_seat(&arg(&args, 2, "seat index")?)?;
            let mut ledger = load_ledger()?;
            ledger.vacate_seat(index);
            save_ledger(&ledger)?;
            println!("✓ Seat {} is now empty", index);
        }
        "settle" => {
            let from = arg(&args, 2, "paying player")?;
            let to = arg(&args, 3, "receiving player")?;
            let amount: i64 = arg(&args, 4, "amount")?
                .parse()
                .context("amount must be an integer")?;
            let mut ledger = load_ledger()?;
            ledger.propose_settlement(Some(&from), Some(&to), amount)?;
            save_ledger(&ledger)?;
            println!("✓ Settled: {} pays {} to {}", from, amount, to);
        }
        "undo" => {
            let mut ledger = load_ledger()?;
            let entry = ledger.undo_last()?;
            save_ledger(&ledger)?;
            for tx in &entry.transactions {
                println!("✓ Undid: {} pays {} to {}", tx.from, tx.amount, tx.to);
            }
        }
        "next" => {
            let mut ledger = load_ledger()?;
            if !ledger.current_round_settled() && !confirm("This round has no settlement yet. Advance anyway?")? {
                println!("Cancelled.");
                return Ok(());
            }
            ledger.advance_dealer();
            save_ledger(&ledger)?;
            println!(
                "✓ Round {}: dealer rotated to seat {}",
                ledger.rotation().round,
                ledger.rotation().dealer_seat
            );
        }
        "dealer" => {
            let seat = parse_seat(&arg(&args, 2, "seat index")?)?;
            let mut ledger = load_ledger()?;
            ledger.designate_dealer(seat);
            save_ledger(&ledger)?;
            println!(
                "✓ Dealer at seat {} (round {}, streak {})",
                ledger.rotation().dealer_seat,
                ledger.rotation().round,
                ledger.rotation().dealer_streak
            );
        }
        "origin" => {
            let name = arg(&args, 2, "player name")?;
            let value: i64 = arg(&args, 3, "origin value")?
                .parse()
                .context("origin must be an integer")?;
            let mut ledger = load_ledger()?;
            ledger.set_origin(&name, value)?;
            save_ledger(&ledger)?;
            println!("✓ Origin for '{}' set to {}", name, value);
        }
        "history" => {
            let ledger = load_ledger()?;
            if ledger.history().is_empty() {
                println!("No settlements recorded yet.");
            }
            for entry in ledger.history().entries() {
                for tx in &entry.transactions {
                    println!(
                        "{}  R{}  dealer s{}  {} → {}  {}",
                        entry.formatted_time(),
                        entry.round,
                        entry.dealer_index,
                        tx.from,
                        tx.to,
                        tx.amount
                    );
                }
            }
        }
        "timeline" => {
            let ledger = load_ledger()?;
            let timeline = ledger.reconstruct_timeline();
            for snapshot in &timeline.rounds {
                let label = if snapshot.round == 0 {
                    "start".to_string()
                } else {
                    format!("R{}", snapshot.round)
                };
                let scores: Vec<String> = snapshot
                    .scores
                    .iter()
                    .map(|(name, score)| format!("{}: {}", name, score))
                    .collect();
                println!("{:>6}  {}", label, scores.join("  "));
            }
        }
        "export" => {
            let path = arg(&args, 2, "output path")?;
            let ledger = load_ledger()?;
            export_history_to_path(&ledger, &path)?;
            println!("✓ History exported to {}", path);
        }
        "reset" => {
            if confirm("Clear all players, scores and history?")? {
                save_ledger(&Ledger::new())?;
                println!("✓ Ledger reset.");
            } else {
                println!("Cancelled.");
            }
        }
        "version" => println!("mahjong-ledger {}", VERSION),
        _ => usage(),
    }

    Ok(())
}

fn show(ledger: &Ledger) {
    println!("🀄 Mahjong Score Ledger");
    println!(
        "Round {} · dealer seat {} · streak {}",
        ledger.rotation().round,
        ledger.rotation().dealer_seat,
        ledger.rotation().dealer_streak
    );
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    for (i, slot) in ledger.seating().slots().iter().enumerate() {
        let marker = if i == ledger.rotation().dealer_seat {
            "庄"
        } else {
            "  "
        };
        match slot {
            Some(name) => println!(
                "{} seat {}: {:<12} {:>8}",
                marker,
                i,
                name,
                ledger.registry().display_score_or_zero(name)
            ),
            None => println!("{} seat {}: (empty)", marker, i),
        }
    }

    let benched = ledger.seating().unassigned_players(ledger.registry());
    if !benched.is_empty() {
        println!("waiting: {}", benched.join(", "));
    }
    println!("settlements recorded: {}", ledger.history().len());
}

fn arg(args: &[String], index: usize, what: &str) -> Result<String> {
    args.get(index)
        .cloned()
        .with_context(|| format!("missing argument: {}", what))
}

fn parse_seat(raw: &str) -> Result<usize> {
    let seat: usize = raw.parse().context("seat index must be a number")?;
    if seat >= SEAT_COUNT {
        bail!("seat index must be 0..{}", SEAT_COUNT - 1);
    }
    Ok(seat)
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

fn usage() {
    println!("mahjong-ledger {} - 4-seat score ledger", VERSION);
    println!();
    println!("Usage: mahjong-ledger <command> [args]");
    println!();
    println!("  show                       print the table (default)");
    println!("  add <name>                 register a player");
    println!("  seat <index> <name>        seat a player (0..3)");
    println!("  vacate <index>             empty a seat");
    println!("  settle <from> <to> <amt>   record a point transfer");
    println!("  undo                       undo the last settlement");
    println!("  next                       rotate dealer, next round");
    println!("  dealer <seat>              designate the dealer seat");
    println!("  origin <name> <value>      set a display baseline");
    println!("  history                    list settlements, newest first");
    println!("  timeline                   per-round balance snapshots");
    println!("  export <path>              write history as CSV");
    println!("  reset                      clear everything");
    println!();
    println!("State file: ./ledger-state.json (override with MAHJONG_LEDGER_STATE)");
}
