//! Numeric failures inside the scaling loop.

use super::error_code::{self, AlignErrorCode};

/// Errors raised when the fixed-point scheme hits a degenerate or
/// non-finite state. All of these abort the loop before any write-back.
#[derive(Debug, thiserror::Error)]
pub enum NumericError {
    /// The mass accumulated over all agents for one outcome collapsed to
    /// zero, leaving the column scaling coefficient undefined.
    #[error("Probability sum over agents collapsed to zero for outcome {choice}")]
    ZeroColumnSum { choice: usize },

    /// One agent's mass over all outcomes collapsed to zero, leaving the
    /// row scaling coefficient undefined.
    #[error("Probability sum over outcomes collapsed to zero for agent {agent}")]
    ZeroRowSum { agent: usize },

    /// A scalar that must be finite came out NaN or infinite.
    #[error("{name} is not finite: {value}")]
    NonFiniteValue { name: &'static str, value: f64 },

    /// A matrix entry turned NaN or infinite between iterations.
    #[error("Probability of agent {agent} for outcome {choice} is not finite: {value}")]
    NonFiniteEntry {
        agent: usize,
        choice: usize,
        value: f64,
    },
}

impl AlignErrorCode for NumericError {
    fn error_code(&self) -> &'static str {
        error_code::NUMERIC_ERROR
    }
}
