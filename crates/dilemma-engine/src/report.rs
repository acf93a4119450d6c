//! Result aggregation and ranking
//!
//! Computes per-agent averages and the ranked leaderboard. No I/O here; the
//! caller hands the output to its sinks.

use serde::{Deserialize, Serialize};

use crate::agent::Agent;

/// One leaderboard entry, shaped for export
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RankedAgent {
    pub name: String,
    pub noise_rate: f64,
    /// Average score per round, rounded to two decimals
    pub average_score: f64,
}

/// Rank agents by average score per round, descending
///
/// Agents that never played report an average of 0. With `positive_only`,
/// entries with a non-positive average are dropped before truncation to
/// `top_k`.
pub fn rank_agents(agents: &[Agent], top_k: usize, positive_only: bool) -> Vec<RankedAgent> {
    let mut scored: Vec<(&Agent, f64)> = agents
        .iter()
        .map(|a| (a, a.average_score()))
        .filter(|(_, avg)| !positive_only || *avg > 0.0)
        .collect();

    // Averages are finite, so total_cmp gives a stable descending order
    scored.sort_by(|(_, x), (_, y)| y.total_cmp(x));

    scored
        .into_iter()
        .take(top_k)
        .map(|(agent, avg)| RankedAgent {
            name: agent.name.clone(),
            noise_rate: agent.noise_rate,
            average_score: (avg * 100.0).round() / 100.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::StrategyKind;

    fn agent_with(name: &str, score: u64, rounds: u64) -> Agent {
        let mut agent = Agent::new(
            name,
            StrategyKind::TitForTat,
            StrategyKind::TitForTat,
            0.0,
            "",
        );
        agent.cumulative_score = score;
        agent.rounds_played = rounds;
        agent
    }

    #[test]
    fn test_zero_round_agents_report_zero() {
        let agents = vec![agent_with("idle", 0, 0)];
        let ranked = rank_agents(&agents, 10, false);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].average_score, 0.0);
    }

    #[test]
    fn test_descending_order() {
        let agents = vec![
            agent_with("middle", 20, 10),
            agent_with("best", 50, 10),
            agent_with("worst", 5, 10),
        ];
        let ranked = rank_agents(&agents, 10, false);
        let names: Vec<_> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["best", "middle", "worst"]);
    }

    #[test]
    fn test_top_k_truncation() {
        let agents: Vec<Agent> = (0..10)
            .map(|i| agent_with(&format!("a{}", i), i * 10, 10))
            .collect();
        let ranked = rank_agents(&agents, 3, false);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].name, "a9");
    }

    #[test]
    fn test_positive_only_filter() {
        let agents = vec![agent_with("played", 30, 10), agent_with("idle", 0, 0)];

        let all = rank_agents(&agents, 10, false);
        assert_eq!(all.len(), 2);

        let positive = rank_agents(&agents, 10, true);
        assert_eq!(positive.len(), 1);
        assert_eq!(positive[0].name, "played");
    }

    #[test]
    fn test_two_decimal_rounding() {
        // 10 / 3 = 3.333... -> 3.33
        let agents = vec![agent_with("thirds", 10, 3)];
        let ranked = rank_agents(&agents, 1, false);
        assert_eq!(ranked[0].average_score, 3.33);
    }
}
