//! Simulation engine for an Iterated Prisoner's Dilemma tournament.
//!
//! A population of [`Agent`]s plays round-robin matches; every decision,
//! noise flip, and round-count draw flows through one [`SeededRng`], so a
//! run is bit-for-bit reproducible from its seed. The crate performs no I/O;
//! rankings and match logs are handed to the caller as plain data.

mod agent;
mod error;
mod game;
mod random;
mod report;
mod strategy;
mod tournament;

pub use agent::{named_roster, random_agent, strategy_showcase, Agent};
pub use error::EngineError;
pub use game::{simulate_match, MatchRecord, RoundOutcome};
pub use random::SeededRng;
pub use report::{rank_agents, RankedAgent};
pub use strategy::{execute_strategy, Move, ProbeGuard, StrategyKind};
pub use tournament::{run_tournament, TournamentConfig};

/// Payoff matrix for the Prisoner's Dilemma
/// Returns (score_a, score_b)
pub fn payoff(a: Move, b: Move) -> (u8, u8) {
    match (a, b) {
        (Move::Cooperate, Move::Cooperate) => (3, 3),
        (Move::Cooperate, Move::Defect) => (0, 5),
        (Move::Defect, Move::Cooperate) => (5, 0),
        (Move::Defect, Move::Defect) => (1, 1),
    }
}
