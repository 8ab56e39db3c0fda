//! Colony Simulation Runner
//!
//! Drives the decision engine against the sandbox world for a number of
//! ticks, persisting the colony state and logging every tick's report.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use colony_core::config::DEFAULT_CONFIG_PATH;
use colony_core::{ColonyEngine, ColonyState, ColonyWorld, Config, EventLogger, Sandbox};

/// Command line arguments for the runner
#[derive(Parser, Debug)]
#[command(name = "colony_sim")]
#[command(about = "Runs the colony decision engine against a sandbox room")]
struct Args {
    /// Configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Number of ticks to run (overrides the config)
    #[arg(long)]
    ticks: Option<u64>,

    /// Random seed for pile selection (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Persisted colony state, loaded at start and saved at the end
    #[arg(long)]
    state: Option<PathBuf>,

    /// Write tick reports as JSON lines to this file
    #[arg(long)]
    events: Option<PathBuf>,

    /// Log every decision at debug level
    #[arg(long, short)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    let mut config = if args.config.exists() {
        match Config::load(&args.config) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("Could not load {}: {}", args.config.display(), e);
                std::process::exit(1);
            }
        }
    } else {
        tracing::warn!("{} not found, using defaults", args.config.display());
        Config::default()
    };
    if let Some(seed) = args.seed {
        config.engine.seed = seed;
    }
    let ticks = args.ticks.unwrap_or(config.engine.ticks);

    println!("Colony Decision Engine");
    println!("======================");
    println!("Seed: {}", config.engine.seed);
    println!("Ticks: {}", ticks);
    println!("Roster: {} workers", config.roster.len());
    println!();

    let mut state = match &args.state {
        Some(path) => match ColonyState::load_or_new(path) {
            Ok(state) => state,
            Err(e) => {
                tracing::error!("Could not load state {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => ColonyState::new(),
    };

    let mut logger = match &args.events {
        Some(path) => EventLogger::new(path).unwrap_or_else(|e| {
            eprintln!("Warning: Could not open {}: {}", path.display(), e);
            EventLogger::null()
        }),
        None => EventLogger::null(),
    };

    let mut engine = ColonyEngine::new(&config);
    let mut world = Sandbox::new(&config.scenario);
    let mut notifications = 0;

    for _ in 0..ticks {
        let outcome = world.step(&mut engine, state);
        state = outcome.state;
        world.clear_journal();
        notifications += outcome.report.notifications.len();

        if let Err(e) = logger.log(&outcome.report) {
            eprintln!("Warning: Could not log tick {}: {}", outcome.report.tick, e);
        }
        if outcome.report.tick > 0 && outcome.report.tick % 100 == 0 {
            println!(
                "Tick {} / {} ({} agents alive, {} idle)",
                outcome.report.tick,
                ticks,
                world.agents().len(),
                outcome.report.idle_count()
            );
        }
    }

    if let Err(e) = logger.flush() {
        eprintln!("Warning: Could not flush event log: {}", e);
    }
    if let Some(path) = &args.state {
        if let Err(e) = state.save(path) {
            tracing::error!("Could not save state {}: {}", path.display(), e);
        }
    }

    println!();
    println!("Run complete. Ran {} ticks.", ticks);
    if let Some(level) = state.controller_level() {
        println!("Controller level: {} ({} upgrades seen)", level, notifications);
    }
    println!("Logged {} report lines.", logger.line_count());
}
