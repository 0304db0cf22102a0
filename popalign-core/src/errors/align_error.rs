//! Top-level alignment errors.
//! Aggregates subsystem errors via `From` conversions.

use super::error_code::{self, AlignErrorCode};
use super::{ConfigError, ExtractionError, NumericError, ValidationError};

/// Errors that can occur during one `align` call.
#[derive(Debug, thiserror::Error)]
pub enum AlignError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Numeric error: {0}")]
    Numeric(#[from] NumericError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Raised only when convergence is configured as mandatory and the
    /// loop exhausted its iteration cap above the precision threshold.
    #[error(
        "Alignment did not converge: divergence {divergence} still above \
         precision {precision} after {iterations} iterations"
    )]
    NotConverged {
        divergence: f64,
        precision: f64,
        iterations: u32,
    },
}

impl AlignErrorCode for AlignError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.error_code(),
            Self::Extraction(e) => e.error_code(),
            Self::Numeric(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::NotConverged { .. } => error_code::NOT_CONVERGED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_delegate_to_subsystem() {
        let err: AlignError = ValidationError::EmptyPopulation.into();
        assert_eq!(err.error_code(), error_code::VALIDATION_ERROR);

        let err: AlignError = NumericError::ZeroColumnSum { choice: 3 }.into();
        assert_eq!(err.error_code(), error_code::NUMERIC_ERROR);

        let err = AlignError::NotConverged {
            divergence: 0.1,
            precision: 1e-15,
            iterations: 50,
        };
        assert_eq!(err.error_code(), error_code::NOT_CONVERGED);
    }

    #[test]
    fn test_messages_name_the_offender() {
        let err: AlignError = ExtractionError::MixedWeighting { agent: 7 }.into();
        assert!(err.to_string().contains("agent 7"));

        let err: AlignError = NumericError::ZeroColumnSum { choice: 2 }.into();
        assert!(err.to_string().contains("outcome 2"));
    }
}
