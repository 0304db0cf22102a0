//! popalign-engine: discrete multinomial probability alignment
//!
//! Given a population of agents, each holding a probability vector over a
//! fixed set of mutually exclusive outcomes, the engine rescales every
//! agent's vector so that the population-wide (optionally weighted) sum per
//! outcome matches an externally supplied target share, while every agent's
//! vector remains a valid distribution (or weighted mass). The scheme is an
//! alternating column/row rescaling fixed point minimizing relative entropy
//! against the unaligned distribution (logit scaling).
//!
//! Pipeline: validation → population extraction → scaling loop → write-back.
//! All state is call-scoped; the engine holds nothing between calls.
//!
//! Reference: Peter Stephensen, A General Method for Alignment in
//! Microsimulation models, International Journal of Microsimulation (2016)
//! 9(3) 89-102.

pub mod engine;
pub mod kernel;
pub mod population;
pub mod scaling;
pub mod validation;
pub mod writeback;

// Re-exports for convenience
pub use engine::Aligner;
pub use population::{Population, ProbabilityMatrix, Weighting};
pub use scaling::{AlignmentReport, NonConvergenceWarning};
