//! Tournament orchestration
//!
//! Round-robin over every unordered agent pair in index order, repeated for a
//! configured number of passes. Enumeration order is a contract: it fixes the
//! draw sequence from the shared RNG, and with it the whole run.

use tracing::info;

use crate::agent::Agent;
use crate::error::EngineError;
use crate::game::{simulate_match, MatchRecord};
use crate::random::SeededRng;

/// Tournament parameters consumed by the orchestrator
#[derive(Clone, Debug)]
pub struct TournamentConfig {
    /// Minimum rounds per match
    pub min_rounds: u32,
    /// Exclusive span above the minimum; per-pair counts land in
    /// [min_rounds, min_rounds + max_rounds_span)
    pub max_rounds_span: u32,
    /// How many complete round-robins to run
    pub passes: u32,
}

impl TournamentConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.min_rounds == 0 || self.max_rounds_span == 0 {
            return Err(EngineError::InvalidRounds {
                min_rounds: self.min_rounds,
                max_rounds_span: self.max_rounds_span,
            });
        }
        if self.passes == 0 {
            return Err(EngineError::InvalidPasses(self.passes));
        }
        Ok(())
    }
}

/// Run the full tournament over `population`
///
/// Each pass plays every unordered pair of distinct agents exactly once
/// (i < j, no self-play), drawing a fresh round count per pair. Scores and
/// round counts accumulate across passes; nothing is reset. Returns the
/// complete match log in play order.
pub fn run_tournament(
    population: &mut [Agent],
    config: &TournamentConfig,
    rng: &mut SeededRng,
) -> Result<Vec<MatchRecord>, EngineError> {
    config.validate()?;
    if population.is_empty() {
        return Err(EngineError::EmptyPopulation);
    }

    let pairs_per_pass = population.len() * population.len().saturating_sub(1) / 2;
    let mut records = Vec::with_capacity(pairs_per_pass * config.passes as usize);

    for pass in 1..=config.passes {
        info!(pass, total = config.passes, "starting round-robin pass");
        run_pass(population, config, rng, &mut records);
    }

    Ok(records)
}

/// One round-robin pass, accumulating into agent totals and the match log
fn run_pass(
    population: &mut [Agent],
    config: &TournamentConfig,
    rng: &mut SeededRng,
    records: &mut Vec<MatchRecord>,
) {
    for i in 0..population.len() {
        for j in (i + 1)..population.len() {
            let round_count = config.min_rounds + rng.next_range(config.max_rounds_span);

            // i < j, so splitting at j separates the two borrows
            let (left, right) = population.split_at_mut(j);
            let record = simulate_match(&mut left[i], &mut right[0], round_count, rng);
            records.push(record);
        }
    }
}
