//! Result types for one alignment run.

use serde::Serialize;

/// Non-fatal notice that the loop hit its iteration cap with the
/// divergence still above the precision threshold. The aligned (best
/// achieved) probabilities are written back regardless.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NonConvergenceWarning {
    /// Divergence between target and achieved shares at termination.
    pub relative_error: f64,
    /// Number of agents in the filtered subpopulation.
    pub sample_size: usize,
    /// Iterations actually run.
    pub iterations: u32,
}

/// Outcome of one `align` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentReport {
    /// Iterations actually run (1-based count, capped by configuration).
    pub iterations_run: u32,
    /// Divergence between target and achieved shares at termination.
    pub final_divergence: f64,
    /// Whether the divergence reached the precision threshold.
    pub converged: bool,
    /// Present when the run did not converge and warnings are enabled.
    pub warning: Option<NonConvergenceWarning>,
}
