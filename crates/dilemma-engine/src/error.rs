//! Engine error taxonomy
//!
//! Every variant is fatal and raised before any match runs; the engine
//! performs no retries. Sink failures live with the caller, not here.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("invalid round bounds: min_rounds={min_rounds}, max_rounds_span={max_rounds_span} (both must be >= 1)")]
    InvalidRounds {
        min_rounds: u32,
        max_rounds_span: u32,
    },

    #[error("invalid pass count: {0} (must be >= 1)")]
    InvalidPasses(u32),

    #[error("noise rate {0} outside [0, 1)")]
    InvalidNoise(f64),

    #[error("agent population is empty")]
    EmptyPopulation,
}
