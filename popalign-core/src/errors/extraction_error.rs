//! Population extraction errors.

use super::error_code::{self, AlignErrorCode};

/// Errors raised while building the working population from the caller's
/// agent collection.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error(
        "Population mixes weighted and non-weighted agents; \
         agent {agent} disagrees with the agents before it"
    )]
    MixedWeighting { agent: usize },

    #[error(
        "Probability accessor returned {actual} values for agent {agent}, \
         expected {expected}"
    )]
    RowLengthMismatch {
        agent: usize,
        expected: usize,
        actual: usize,
    },
}

impl AlignErrorCode for ExtractionError {
    fn error_code(&self) -> &'static str {
        error_code::EXTRACTION_ERROR
    }
}
