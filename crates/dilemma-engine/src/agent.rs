//! Agent model and population construction

use serde::{Deserialize, Serialize};

use crate::random::SeededRng;
use crate::strategy::StrategyKind;

/// One tournament participant
///
/// `real` drives actual decisions; `declared` is what the agent claims to
/// play and is what introspective opponents get to consult. The simulator
/// mutates `cumulative_score` and `rounds_played` in place, round by round.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Agent {
    pub name: String,
    /// Probability in [0, 1) that a chosen move is flipped before recording
    pub noise_rate: f64,
    pub real: StrategyKind,
    pub declared: StrategyKind,
    pub cumulative_score: u64,
    /// Total rounds played across all matches; averaging denominator
    pub rounds_played: u64,
    pub description: String,
}

impl Agent {
    pub fn new(
        name: impl Into<String>,
        real: StrategyKind,
        declared: StrategyKind,
        noise_rate: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            noise_rate,
            real,
            declared,
            cumulative_score: 0,
            rounds_played: 0,
            description: description.into(),
        }
    }

    /// Average score per round played; 0 for agents that never played
    pub fn average_score(&self) -> f64 {
        if self.rounds_played == 0 {
            0.0
        } else {
            self.cumulative_score as f64 / self.rounds_played as f64
        }
    }
}

fn roster_agent(name: &str, strategy: StrategyKind, noise_rate: f64) -> Agent {
    Agent::new(name, strategy, strategy, noise_rate, strategy.describe())
}

/// The fixed named roster, each entry with its own small noise rate
pub fn named_roster() -> Vec<Agent> {
    vec![
        roster_agent("Tit for Tat", StrategyKind::TitForTat, 0.05),
        roster_agent("Always Cooperate", StrategyKind::AlwaysCooperate, 0.03),
        roster_agent("Always Defect", StrategyKind::AlwaysDefect, 0.1),
        roster_agent("Random", StrategyKind::Random, 0.15),
        roster_agent("Adaptive", StrategyKind::Adaptive, 0.07),
        roster_agent("Gradual Trust", StrategyKind::GradualTrust, 0.06),
        roster_agent("Advanced Mirror", StrategyKind::AdvancedMirror, 0.04),
        roster_agent(
            "Advanced Mirror - High error margin",
            StrategyKind::AdvancedMirror,
            0.2,
        ),
        roster_agent("Vengeful", StrategyKind::Vengeful, 0.08),
    ]
}

/// Synthesize one agent with a uniformly drawn strategy and a noise rate
/// drawn from [0, max_noise), rounded to one decimal
pub fn random_agent(id: usize, max_noise: f64, rng: &mut SeededRng) -> Agent {
    let pick = rng.next_range(StrategyKind::ALL.len() as u32) as usize;
    let strategy = StrategyKind::ALL[pick];
    let noise_rate = (rng.next_f64() * max_noise * 10.0).round() / 10.0;

    Agent::new(
        strategy.key(),
        strategy,
        strategy,
        noise_rate,
        format!(
            "Randomly generated prisoner of id {} with the {} strategy and a {} error margin.",
            id,
            strategy.key(),
            noise_rate
        ),
    )
}

/// One zero-noise agent per catalog strategy, no duplicates
pub fn strategy_showcase() -> Vec<Agent> {
    StrategyKind::ALL
        .iter()
        .map(|s| Agent::new(s.key(), *s, *s, 0.0, String::new()))
        .collect()
}
