//! Pre-flight and post-hoc sanity checks.
//!
//! Everything here fails fast: the first violation aborts with a specific
//! reason, before any agent is mutated. The single deliberate exception is
//! the non-convergence policy, which can downgrade to a warning.

use popalign_core::config::AlignConfig;
use popalign_core::errors::{AlignError, NumericError, ValidationError};

use crate::kernel;
use crate::population::{ProbabilityMatrix, Weighting};
use crate::scaling::NonConvergenceWarning;

/// Validate the target distribution and run configuration.
///
/// Runs before any agent is read; a failure here proves no side effect
/// occurred anywhere.
pub fn validate_inputs(target_share: &[f64], config: &AlignConfig) -> Result<(), ValidationError> {
    if target_share.len() < 2 {
        return Err(ValidationError::TooFewChoices {
            count: target_share.len(),
        });
    }
    for (choice, &value) in target_share.iter().enumerate() {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::ShareOutOfRange { choice, value });
        }
    }
    let sum = kernel::sum(target_share);
    if sum > 1.0 {
        return Err(ValidationError::ShareSumExceedsOne { sum });
    }

    if config.effective_max_iterations() == 0 {
        return Err(ValidationError::ZeroIterationCap);
    }
    let precision = config.effective_precision();
    if !precision.is_finite() || precision <= 0.0 {
        return Err(ValidationError::InvalidPrecision { value: precision });
    }
    Ok(())
}

/// Every weight must be positive and finite. Unweighted populations pass
/// trivially.
pub fn validate_weights(weighting: &Weighting) -> Result<(), ValidationError> {
    if let Some(weights) = weighting.weights() {
        for (agent, &value) in weights.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(ValidationError::InvalidWeight { agent, value });
            }
        }
    }
    Ok(())
}

/// Every raw (pre-weighting) probability must be finite and in `[0,1]`.
pub fn validate_matrix(matrix: &ProbabilityMatrix) -> Result<(), ValidationError> {
    for agent in 0..matrix.agent_count() {
        for (choice, &value) in matrix.row(agent).iter().enumerate() {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::ProbabilityOutOfRange {
                    agent,
                    choice,
                    value,
                });
            }
        }
    }
    Ok(())
}

/// Post-loop sanity: the scalars the convergence verdict rests on must be
/// finite, and the threshold and total weight must be positive. The final
/// divergence may legitimately be zero (exact convergence), so it is only
/// checked for finiteness.
pub fn validate_numeric_state(
    final_divergence: f64,
    precision: f64,
    total_mass: f64,
) -> Result<(), AlignError> {
    for (name, value) in [
        ("final divergence", final_divergence),
        ("precision", precision),
        ("total weight", total_mass),
    ] {
        if value.is_nan() || value.is_infinite() {
            return Err(NumericError::NonFiniteValue { name, value }.into());
        }
    }
    for (name, value) in [("precision", precision), ("total weight", total_mass)] {
        if value <= 0.0 {
            return Err(ValidationError::NonPositiveQuantity { name, value }.into());
        }
    }
    Ok(())
}

/// Apply the non-convergence policy.
///
/// Converged runs pass silently. Otherwise: a hard error when convergence
/// is mandatory, a structured warning (logged and returned for the report)
/// when warnings are on, silence when they are off. Never blocks the
/// write-back except on the hard-error path.
pub fn check_convergence(
    final_divergence: f64,
    precision: f64,
    sample_size: usize,
    iterations_run: u32,
    config: &AlignConfig,
) -> Result<Option<NonConvergenceWarning>, AlignError> {
    if final_divergence <= precision {
        return Ok(None);
    }

    if config.effective_require_convergence() {
        return Err(AlignError::NotConverged {
            divergence: final_divergence,
            precision,
            iterations: iterations_run,
        });
    }

    if config.effective_warn_on_nonconvergence() {
        tracing::warn!(
            divergence = final_divergence,
            precision,
            sample_size,
            iterations = iterations_run,
            "alignment terminated above the precision threshold; results are best-effort"
        );
        return Ok(Some(NonConvergenceWarning {
            relative_error: final_divergence,
            sample_size,
            iterations: iterations_run,
        }));
    }

    Ok(None)
}
