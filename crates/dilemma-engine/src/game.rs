//! Match execution engine

use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::payoff;
use crate::random::SeededRng;
use crate::strategy::{execute_strategy, Move, ProbeGuard};

/// One completed round: both recorded moves and both payoffs
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub move_a: Move,
    pub move_b: Move,
    pub score_a: u8,
    pub score_b: u8,
}

/// One completed match, immutable once produced
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub agent_a: String,
    pub agent_b: String,
    /// Round-by-round recorded moves; this is the canonical history
    pub rounds: Vec<RoundOutcome>,
    pub total_score_a: u64,
    pub total_score_b: u64,
    pub round_count: u32,
}

/// Flip the move with probability `noise_rate`
///
/// Always consumes exactly one draw so the stream shape does not depend on
/// the rate.
fn apply_noise(mv: Move, noise_rate: f64, rng: &mut SeededRng) -> Move {
    if rng.next_f64() < noise_rate {
        mv.flipped()
    } else {
        mv
    }
}

/// Run a complete match between two agents
///
/// Per round, in fixed draw order (A decision, A noise, B decision, B noise):
/// evaluate each agent's real strategy against the opponent's history and
/// declared strategy, flip the raw move with that agent's noise rate, record
/// it, then score via the canonical payoff matrix. Both agents'
/// `cumulative_score` and `rounds_played` are advanced in place.
pub fn simulate_match(
    agent_a: &mut Agent,
    agent_b: &mut Agent,
    round_count: u32,
    rng: &mut SeededRng,
) -> MatchRecord {
    let mut history_a: Vec<Move> = Vec::with_capacity(round_count as usize);
    let mut history_b: Vec<Move> = Vec::with_capacity(round_count as usize);
    let mut rounds: Vec<RoundOutcome> = Vec::with_capacity(round_count as usize);
    let mut total_a = 0u64;
    let mut total_b = 0u64;

    for _ in 0..round_count {
        let raw_a = execute_strategy(
            agent_a.real,
            &history_b,
            &history_a,
            agent_b.declared,
            rng,
            ProbeGuard::default(),
        );
        let move_a = apply_noise(raw_a, agent_a.noise_rate, rng);

        let raw_b = execute_strategy(
            agent_b.real,
            &history_a,
            &history_b,
            agent_a.declared,
            rng,
            ProbeGuard::default(),
        );
        let move_b = apply_noise(raw_b, agent_b.noise_rate, rng);

        history_a.push(move_a);
        history_b.push(move_b);

        let (score_a, score_b) = payoff(move_a, move_b);
        total_a += score_a as u64;
        total_b += score_b as u64;

        agent_a.cumulative_score += score_a as u64;
        agent_b.cumulative_score += score_b as u64;
        agent_a.rounds_played += 1;
        agent_b.rounds_played += 1;

        rounds.push(RoundOutcome {
            move_a,
            move_b,
            score_a,
            score_b,
        });
    }

    MatchRecord {
        agent_a: agent_a.name.clone(),
        agent_b: agent_b.name.clone(),
        rounds,
        total_score_a: total_a,
        total_score_b: total_b,
        round_count,
    }
}
