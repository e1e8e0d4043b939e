//! Stratagem - Entry Point
//!
//! Plays one sandbox skirmish against a scripted opponent, printing a line
//! per turn and a summary. Learning carries over between runs through the
//! state file.

use std::path::PathBuf;

use clap::Parser;
use stratagem::core::error::Result;
use stratagem::engine::{load_state_or_default, EngineState};
use stratagem::genome::GenomeParam;
use stratagem::sandbox::{run_skirmish, OpponentKind, Owner, Skirmish};
use stratagem::{AdaptiveEngine, EngineConfig};

/// Stratagem - adaptive strategy engine sandbox
#[derive(Parser, Debug)]
#[command(name = "stratagem")]
#[command(about = "Run an adaptive engine through a sandbox skirmish")]
struct Args {
    /// Number of turns to play
    #[arg(long, default_value_t = 20)]
    turns: u32,

    /// Random seed for reproducible runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Opponent style: rush, turtle, economic, expansionist, mixed
    #[arg(long, default_value = "mixed")]
    opponent: OpponentKind,

    /// Learning state file, loaded at start and saved at the end
    #[arg(long)]
    state: Option<PathBuf>,

    /// Ignore any existing state file
    #[arg(long, default_value_t = false)]
    fresh: bool,

    /// Engine config (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "stratagem=debug" } else { "stratagem=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    let state = match &args.state {
        Some(path) if !args.fresh => load_state_or_default(path).0,
        _ => EngineState::default(),
    };
    let prior_turns = state.ledger.len();

    let mut engine = AdaptiveEngine::with_state(config, state)?;
    let mut skirmish = Skirmish::new(args.opponent, args.seed);

    println!("\n=== STRATAGEM ===");
    println!(
        "Opponent: {}  Seed: {}  Turns: {}  Prior experience: {} turns",
        args.opponent, args.seed, args.turns, prior_turns
    );
    println!();

    let tally = run_skirmish(&mut engine, &mut skirmish, args.turns, |plan, outcome, effectiveness| {
        let novel = if plan.strategy.is_innovative() {
            format!("  novel: {}", plan.strategy.novel_elements.join(", "))
        } else {
            String::new()
        };
        println!(
            "Turn {:>3} [{:<5}] {:<26} vs {:<20} actions: {:>2}  wins: {}  eff: {:.1}{}",
            plan.turn,
            plan.factors.game_phase,
            plan.strategy.primary_focus,
            plan.factors.enemy_behavior_pattern,
            plan.actions.len(),
            outcome.military_victories,
            effectiveness,
            novel
        );
    })?;

    println!("\n--- Summary ---");
    println!("Turns played: {}", tally.turns);
    println!(
        "Successful turns: {} ({:.0}%)",
        tally.successes,
        100.0 * f64::from(tally.successes) / f64::from(tally.turns.max(1))
    );
    println!("Mean effectiveness: {:.2}", tally.mean_effectiveness());
    println!("Battles won: {}", tally.victories);
    println!("Innovative turns: {}", tally.innovative_turns);
    match tally.winner {
        Some(Owner::Own) => println!("Result: victory"),
        Some(Owner::Enemy) => println!("Result: defeat"),
        None => println!("Result: undecided"),
    }

    println!("\nFocus usage:");
    for (focus, count) in &tally.foci {
        println!("  {:<28} {}", focus, count);
    }

    println!("\nGenome:");
    for param in GenomeParam::ALL {
        println!("  {:<20} {:.3}", param.as_str(), engine.genome().get(param));
    }

    if let Some((signature, record)) = engine.patterns().strongest() {
        println!(
            "\nBest recalled: {} in {} (confidence {:.2}, mean eff {:.2})",
            record.focus, signature, record.confidence, record.mean_effectiveness
        );
    }

    if let Some(path) = &args.state {
        engine.save(path)?;
        println!("\nLearning state written to {}", path.display());
    }

    Ok(())
}
