//! Iterated Prisoner's Dilemma tournament runner
//!
//! Builds the agent population, drives the simulation engine, and hands the
//! results to the persistence and export sinks. Sink failures are warnings:
//! a computed ranking is never lost to a failed write.

mod export;
mod store;

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dilemma_engine::{
    named_roster, random_agent, rank_agents, run_tournament, strategy_showcase, Agent,
    EngineError, SeededRng, TournamentConfig,
};
use store::MatchStore;

#[derive(Parser, Debug)]
#[command(name = "dilemma")]
#[command(version)]
#[command(about = "Iterated Prisoner's Dilemma tournament simulator")]
struct Cli {
    /// Randomly synthesized agents added to the named roster
    #[arg(long, default_value_t = 100)]
    random_agents: usize,

    /// Minimum rounds per match
    #[arg(long, default_value_t = 150)]
    min_rounds: u32,

    /// Exclusive span above --min-rounds for the per-match round draw
    #[arg(long, default_value_t = 300)]
    max_rounds_span: u32,

    /// How many agents to list on the podium
    #[arg(long, default_value_t = 20)]
    show_results: usize,

    /// Complete round-robin passes to run
    #[arg(long, default_value_t = 5)]
    passes: u32,

    /// Run one zero-noise agent per catalog strategy instead of the roster;
    /// no random or repeated agents are created
    #[arg(long)]
    run_all_strategies: bool,

    /// Noise ceiling for synthesized agents, in [0, 1)
    #[arg(long, default_value_t = 0.5)]
    max_noise: f64,

    /// Seed for every random draw; omitted = derived from the clock
    #[arg(long)]
    seed: Option<u64>,

    /// Append-only match log store
    #[arg(long, default_value = "prisoners-dilemma.jsonl")]
    db_path: PathBuf,

    /// Directory for exported result files
    #[arg(long, default_value = "results")]
    results_dir: PathBuf,

    /// Drop non-positive averages from the podium
    #[arg(long)]
    positive_only: bool,
}

fn build_population(cli: &Cli, rng: &mut SeededRng) -> Vec<Agent> {
    if cli.run_all_strategies {
        info!("running every catalog strategy against each other; no random or repeated agents");
        return strategy_showcase();
    }

    let mut population = named_roster();
    for id in 1..=cli.random_agents {
        population.push(random_agent(id, cli.max_noise, rng));
    }
    population
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if !(0.0..1.0).contains(&cli.max_noise) {
        return Err(EngineError::InvalidNoise(cli.max_noise).into());
    }

    let seed = cli.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    });
    info!(seed, "seeding run");
    let mut rng = SeededRng::from_u64(seed, 0);

    let config = TournamentConfig {
        min_rounds: cli.min_rounds,
        max_rounds_span: cli.max_rounds_span,
        passes: cli.passes,
    };

    let mut population = build_population(&cli, &mut rng);
    let records = run_tournament(&mut population, &config, &mut rng)?;
    info!(
        matches = records.len(),
        agents = population.len(),
        "tournament complete"
    );

    let ranking = rank_agents(&population, cli.show_results, cli.positive_only);

    let match_store = MatchStore::new(&cli.db_path);
    if let Err(err) = match_store.append_run(&records) {
        warn!(error = %err, "failed to persist match log");
    }

    match export::write_results(&cli.results_dir, &ranking) {
        Ok(path) => info!(path = %path.display(), "results exported"),
        Err(err) => warn!(error = %err, "failed to export results"),
    }

    println!("--------------------------------------------");
    println!("End result:");
    println!("--------------------------------------------");
    for entry in &ranking {
        println!(
            "{}, {} error margin, score: {:.2}",
            entry.name, entry.noise_rate, entry.average_score
        );
    }

    Ok(())
}
