//! Input validation errors.

use super::error_code::{self, AlignErrorCode};

/// Errors raised by pre-flight validation of the target distribution,
/// run configuration, weights, and raw probability entries.
///
/// Each variant is a distinct reason code; validation stops at the first
/// violation.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("The number of outcomes must be at least 2, got {count}")]
    TooFewChoices { count: usize },

    #[error("Target share for outcome {choice} must lie in [0,1], got {value}")]
    ShareOutOfRange { choice: usize, value: f64 },

    #[error("Target shares must sum to at most 1, got {sum}")]
    ShareSumExceedsOne { sum: f64 },

    #[error("Weight of agent {agent} must be positive and finite, got {value}")]
    InvalidWeight { agent: usize, value: f64 },

    #[error("Probability of agent {agent} for outcome {choice} must lie in [0,1], got {value}")]
    ProbabilityOutOfRange {
        agent: usize,
        choice: usize,
        value: f64,
    },

    #[error("The scheme has to go through at least one iteration")]
    ZeroIterationCap,

    #[error("Precision must be positive and finite, got {value}")]
    InvalidPrecision { value: f64 },

    #[error("The filtered population is empty")]
    EmptyPopulation,

    #[error("{name} must be positive, got {value}")]
    NonPositiveQuantity { name: &'static str, value: f64 },
}

impl AlignErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        error_code::VALIDATION_ERROR
    }
}
