//! Working population — the call-scoped context the scaling loop runs on.
//!
//! Built fresh by the extractor for every `align` call and discarded after
//! write-back; nothing here outlives one call.

pub mod extractor;
pub mod types;

pub use extractor::extract;
pub use types::{Population, ProbabilityMatrix, Weighting};
