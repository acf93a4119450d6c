//! Strategy catalog and execution
//!
//! Strategies are pure functions of the two observed histories
//! (most-recent-last) plus the opponent's declared strategy. Dispatch is by
//! enum variant; each variant also carries a stable string key so agents and
//! serialized records can name the strategy they play.

use serde::{Deserialize, Serialize};

use crate::random::SeededRng;

/// A move in the Prisoner's Dilemma
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    Cooperate,
    Defect,
}

impl Move {
    /// The opposite move
    pub fn flipped(self) -> Self {
        match self {
            Move::Cooperate => Move::Defect,
            Move::Defect => Move::Cooperate,
        }
    }
}

/// Consecutive opponent cooperations GradualTrust requires before trusting.
const GRADUAL_TRUST_THRESHOLD: usize = 3;

/// Catalog of decision strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Always cooperate, ignores history.
    AlwaysCooperate,
    /// Always defect, ignores history.
    AlwaysDefect,
    /// Cooperate first, then mirror the opponent's last move.
    TitForTat,
    /// Uniform 50/50 draw each round.
    Random,
    /// Cooperate iff the opponent has cooperated more often than defected.
    Adaptive,
    /// Cooperate only after a streak of consecutive opponent cooperations.
    GradualTrust,
    /// Tit-for-Tat that forgives a defection with probability equal to the
    /// opponent's historical cooperation rate.
    AdvancedMirror,
    /// Cooperate until the opponent defects once, then defect forever.
    Vengeful,
    /// Probes the opponent's declared strategy to predict their move, then
    /// defects regardless. Reentrancy-guarded (see [`ProbeGuard`]).
    Mastermind,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 9] = [
        StrategyKind::AlwaysCooperate,
        StrategyKind::AlwaysDefect,
        StrategyKind::TitForTat,
        StrategyKind::Random,
        StrategyKind::Adaptive,
        StrategyKind::GradualTrust,
        StrategyKind::AdvancedMirror,
        StrategyKind::Vengeful,
        StrategyKind::Mastermind,
    ];

    /// Stable registry key for this strategy
    pub fn key(self) -> &'static str {
        match self {
            StrategyKind::AlwaysCooperate => "always-cooperate",
            StrategyKind::AlwaysDefect => "always-defect",
            StrategyKind::TitForTat => "tit-for-tat",
            StrategyKind::Random => "random",
            StrategyKind::Adaptive => "adaptive",
            StrategyKind::GradualTrust => "gradual-trust",
            StrategyKind::AdvancedMirror => "advanced-mirror",
            StrategyKind::Vengeful => "vengeful",
            StrategyKind::Mastermind => "mastermind",
        }
    }

    /// Look up a strategy by its registry key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.key() == key)
    }

    /// Human-readable description
    pub fn describe(self) -> &'static str {
        match self {
            StrategyKind::AlwaysCooperate => "Always cooperates.",
            StrategyKind::AlwaysDefect => "Always defects.",
            StrategyKind::TitForTat => "Starts nice, then follows the other prisoner.",
            StrategyKind::Random => {
                "Randomly cooperates and defects. Mostly used as a baseline."
            }
            StrategyKind::Adaptive => {
                "Adapts to the opponent's past behavior, favoring the most frequent action."
            }
            StrategyKind::GradualTrust => {
                "Starts defecting and cooperates once the opponent consistently cooperates."
            }
            StrategyKind::AdvancedMirror => {
                "Like Tit for Tat, but may forgive based on the opponent's cooperation rate."
            }
            StrategyKind::Vengeful => {
                "Cooperates until the opponent defects once, then always defects."
            }
            StrategyKind::Mastermind => {
                "Predicts the opponent's move from their declared strategy, then defects anyway."
            }
        }
    }
}

/// Token threaded through strategy evaluation to keep introspection bounded.
///
/// When Mastermind probes the opponent's declared strategy, it sets
/// `probing`; a probed Mastermind must not probe back, otherwise two agents
/// both declaring Mastermind would recurse forever.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProbeGuard {
    pub probing: bool,
}

impl ProbeGuard {
    /// Guard for a nested introspection call
    pub fn nested() -> Self {
        Self { probing: true }
    }
}

/// Execute a strategy for one round
///
/// # Arguments
/// * `kind` - The strategy to execute
/// * `opponent_history` - Opponent's recorded moves, most recent last
/// * `my_history` - Our recorded moves, most recent last
/// * `opponent_declared` - What the opponent claims to play
/// * `rng` - Shared random source for stochastic strategies
/// * `guard` - Reentrancy token for introspective strategies
pub fn execute_strategy(
    kind: StrategyKind,
    opponent_history: &[Move],
    my_history: &[Move],
    opponent_declared: StrategyKind,
    rng: &mut SeededRng,
    guard: ProbeGuard,
) -> Move {
    match kind {
        StrategyKind::AlwaysCooperate => Move::Cooperate,
        StrategyKind::AlwaysDefect => Move::Defect,
        StrategyKind::TitForTat => execute_tit_for_tat(opponent_history),
        StrategyKind::Random => execute_random(rng),
        StrategyKind::Adaptive => execute_adaptive(opponent_history),
        StrategyKind::GradualTrust => execute_gradual_trust(opponent_history),
        StrategyKind::AdvancedMirror => execute_advanced_mirror(opponent_history, rng),
        StrategyKind::Vengeful => execute_vengeful(opponent_history),
        StrategyKind::Mastermind => {
            execute_mastermind(opponent_history, my_history, opponent_declared, rng, guard)
        }
    }
}

/// Tit-for-Tat: copy the opponent's last move, start with cooperate
fn execute_tit_for_tat(opponent_history: &[Move]) -> Move {
    match opponent_history.last() {
        None => Move::Cooperate,
        Some(last) => *last,
    }
}

/// Random: uniform 50/50 each round
fn execute_random(rng: &mut SeededRng) -> Move {
    if rng.next_f64() < 0.5 {
        Move::Cooperate
    } else {
        Move::Defect
    }
}

/// Adaptive: cooperate iff cooperations outnumber defections; ties defect
fn execute_adaptive(opponent_history: &[Move]) -> Move {
    let cooperations = opponent_history
        .iter()
        .filter(|m| **m == Move::Cooperate)
        .count();
    let defections = opponent_history.len() - cooperations;

    if cooperations > defections {
        Move::Cooperate
    } else {
        Move::Defect
    }
}

/// Gradual Trust: require a trailing streak of opponent cooperations
///
/// Scans backward from the most recent round; any defection ends the streak.
fn execute_gradual_trust(opponent_history: &[Move]) -> Move {
    let streak = opponent_history
        .iter()
        .rev()
        .take_while(|m| **m == Move::Cooperate)
        .count();

    if streak >= GRADUAL_TRUST_THRESHOLD {
        Move::Cooperate
    } else {
        Move::Defect
    }
}

/// Advanced Mirror: Tit-for-Tat with forgiveness proportional to the
/// opponent's overall cooperation rate
fn execute_advanced_mirror(opponent_history: &[Move], rng: &mut SeededRng) -> Move {
    match opponent_history.last() {
        None | Some(Move::Cooperate) => Move::Cooperate,
        Some(Move::Defect) => {
            let cooperations = opponent_history
                .iter()
                .filter(|m| **m == Move::Cooperate)
                .count();
            let rate = cooperations as f64 / opponent_history.len() as f64;

            if rng.next_f64() < rate {
                Move::Cooperate
            } else {
                Move::Defect
            }
        }
    }
}

/// Vengeful: one observed defection triggers permanent defection
fn execute_vengeful(opponent_history: &[Move]) -> Move {
    if opponent_history.iter().any(|m| *m == Move::Defect) {
        Move::Defect
    } else {
        Move::Cooperate
    }
}

/// Mastermind: run the opponent's declared strategy with the histories
/// swapped to foresee their next move, then defect regardless.
fn execute_mastermind(
    opponent_history: &[Move],
    my_history: &[Move],
    opponent_declared: StrategyKind,
    rng: &mut SeededRng,
    guard: ProbeGuard,
) -> Move {
    if guard.probing {
        // Nested introspection suppressed; a probed Mastermind answers plainly.
        return Move::Defect;
    }

    // Prediction currently feeds no branch (the answer is always Defect),
    // but the probe must stay bounded for mutual Mastermind declarations.
    let _predicted = execute_strategy(
        opponent_declared,
        my_history,
        opponent_history,
        StrategyKind::Mastermind,
        rng,
        ProbeGuard::nested(),
    );

    Move::Defect
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_rng() -> SeededRng {
        SeededRng::new(&[42u8; 32], 0)
    }

    fn run(kind: StrategyKind, opponent: &[Move], own: &[Move]) -> Move {
        let mut rng = make_rng();
        execute_strategy(
            kind,
            opponent,
            own,
            StrategyKind::AlwaysCooperate,
            &mut rng,
            ProbeGuard::default(),
        )
    }

    #[test]
    fn test_keys_round_trip() {
        for kind in StrategyKind::ALL {
            assert_eq!(StrategyKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(StrategyKind::from_key("no-such-strategy"), None);
    }

    #[test]
    fn test_keys_unique() {
        for (i, a) in StrategyKind::ALL.iter().enumerate() {
            for b in &StrategyKind::ALL[i + 1..] {
                assert_ne!(a.key(), b.key());
            }
        }
    }

    #[test]
    fn test_constants_ignore_history() {
        let history = [Move::Defect, Move::Defect, Move::Cooperate];
        assert_eq!(run(StrategyKind::AlwaysCooperate, &history, &history), Move::Cooperate);
        assert_eq!(run(StrategyKind::AlwaysDefect, &[], &[]), Move::Defect);
    }

    #[test]
    fn test_tit_for_tat_first_move() {
        assert_eq!(run(StrategyKind::TitForTat, &[], &[]), Move::Cooperate);
    }

    #[test]
    fn test_tit_for_tat_copies() {
        let m = run(StrategyKind::TitForTat, &[Move::Cooperate], &[Move::Cooperate]);
        assert_eq!(m, Move::Cooperate);

        let m = run(StrategyKind::TitForTat, &[Move::Defect], &[Move::Cooperate]);
        assert_eq!(m, Move::Defect);
    }

    #[test]
    fn test_random_is_roughly_balanced() {
        let mut rng = make_rng();
        let n = 10_000;
        let cooperations = (0..n)
            .filter(|_| {
                execute_strategy(
                    StrategyKind::Random,
                    &[],
                    &[],
                    StrategyKind::AlwaysCooperate,
                    &mut rng,
                    ProbeGuard::default(),
                ) == Move::Cooperate
            })
            .count();
        assert!((4500..=5500).contains(&cooperations), "got {}", cooperations);
    }

    #[test]
    fn test_adaptive_majority() {
        let mostly_nice = [Move::Cooperate, Move::Cooperate, Move::Defect];
        assert_eq!(run(StrategyKind::Adaptive, &mostly_nice, &[]), Move::Cooperate);

        let mostly_mean = [Move::Defect, Move::Defect, Move::Cooperate];
        assert_eq!(run(StrategyKind::Adaptive, &mostly_mean, &[]), Move::Defect);
    }

    #[test]
    fn test_adaptive_tie_defects() {
        assert_eq!(run(StrategyKind::Adaptive, &[], &[]), Move::Defect);
        let tied = [Move::Cooperate, Move::Defect];
        assert_eq!(run(StrategyKind::Adaptive, &tied, &[]), Move::Defect);
    }

    #[test]
    fn test_gradual_trust_needs_streak() {
        assert_eq!(run(StrategyKind::GradualTrust, &[], &[]), Move::Defect);

        let two = [Move::Cooperate, Move::Cooperate];
        assert_eq!(run(StrategyKind::GradualTrust, &two, &[]), Move::Defect);

        let three = [Move::Cooperate, Move::Cooperate, Move::Cooperate];
        assert_eq!(run(StrategyKind::GradualTrust, &three, &[]), Move::Cooperate);
    }

    #[test]
    fn test_gradual_trust_streak_resets() {
        // Old cooperations don't count once a defection interrupts the tail
        let interrupted = [
            Move::Cooperate,
            Move::Cooperate,
            Move::Cooperate,
            Move::Defect,
            Move::Cooperate,
            Move::Cooperate,
        ];
        assert_eq!(run(StrategyKind::GradualTrust, &interrupted, &[]), Move::Defect);
    }

    #[test]
    fn test_advanced_mirror_mirrors_cooperation() {
        assert_eq!(run(StrategyKind::AdvancedMirror, &[], &[]), Move::Cooperate);
        assert_eq!(
            run(StrategyKind::AdvancedMirror, &[Move::Cooperate], &[]),
            Move::Cooperate
        );
    }

    #[test]
    fn test_advanced_mirror_never_forgives_pure_defector() {
        // Cooperation rate 0: forgiveness probability is 0
        let mut rng = make_rng();
        for _ in 0..50 {
            let m = execute_strategy(
                StrategyKind::AdvancedMirror,
                &[Move::Defect, Move::Defect],
                &[],
                StrategyKind::AlwaysDefect,
                &mut rng,
                ProbeGuard::default(),
            );
            assert_eq!(m, Move::Defect);
        }
    }

    #[test]
    fn test_vengeful_grudge_never_lifts() {
        assert_eq!(run(StrategyKind::Vengeful, &[], &[]), Move::Cooperate);
        assert_eq!(run(StrategyKind::Vengeful, &[Move::Cooperate], &[]), Move::Cooperate);

        // One defection long ago, cooperation ever since
        let history = [
            Move::Defect,
            Move::Cooperate,
            Move::Cooperate,
            Move::Cooperate,
        ];
        assert_eq!(run(StrategyKind::Vengeful, &history, &[]), Move::Defect);
    }

    #[test]
    fn test_vengeful_trajectory_around_single_defection() {
        // Opponent defects exactly at round k, cooperates otherwise: Vengeful
        // cooperates through round k and defects from k+1 on.
        let k = 4;
        let n = 10;
        let mut opponent_history = Vec::new();
        for round in 1..=n {
            let response = run(StrategyKind::Vengeful, &opponent_history, &[]);
            if round <= k {
                assert_eq!(response, Move::Cooperate, "round {}", round);
            } else {
                assert_eq!(response, Move::Defect, "round {}", round);
            }
            opponent_history.push(if round == k { Move::Defect } else { Move::Cooperate });
        }
    }

    #[test]
    fn test_mastermind_always_defects() {
        for declared in StrategyKind::ALL {
            let mut rng = make_rng();
            let m = execute_strategy(
                StrategyKind::Mastermind,
                &[Move::Cooperate],
                &[Move::Defect],
                declared,
                &mut rng,
                ProbeGuard::default(),
            );
            assert_eq!(m, Move::Defect);
        }
    }

    #[test]
    fn test_mastermind_mutual_introspection_terminates() {
        // Both sides declare Mastermind; without the guard this would recurse
        // until the stack blew.
        let mut rng = make_rng();
        let m = execute_strategy(
            StrategyKind::Mastermind,
            &[],
            &[],
            StrategyKind::Mastermind,
            &mut rng,
            ProbeGuard::default(),
        );
        assert_eq!(m, Move::Defect);
    }

    #[test]
    fn test_all_strategies_accept_empty_history() {
        for kind in StrategyKind::ALL {
            // Must not panic
            let _ = run(kind, &[], &[]);
        }
    }
}
