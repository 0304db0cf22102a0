//! The alternating column/row rescaling fixed point.
//!
//! One iteration forces the per-outcome column sums onto the target masses
//! (gamma transform), then restores each agent's row mass (alpha
//! transform). The fixed point, when it exists, satisfies both constraint
//! sets simultaneously; the loop stops when the relative entropy between
//! target and achieved shares drops to the configured precision, or at the
//! iteration cap.

pub mod iterator;
pub mod types;

pub use iterator::{run, LoopOutcome};
pub use types::{AlignmentReport, NonConvergenceWarning};
