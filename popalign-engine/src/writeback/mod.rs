//! Result write-back: descale masses to probabilities, hand rows back.
//!
//! The only externally visible mutation of the whole pipeline lives here,
//! and it happens exactly once per surviving agent, strictly after the
//! loop has terminated.

use popalign_core::traits::AlignmentClosure;

use crate::population::{Population, Weighting};

/// Divide each row by its agent's weight, restoring a normalized
/// probability vector. Exact inverse of `Population::apply_weights`; no-op
/// for unweighted populations. Weights were validated positive, so no
/// division by zero can occur.
pub fn descale(pop: &mut Population) {
    if let Weighting::Weighted(weights) = &pop.weighting {
        for (agent, &w) in weights.iter().enumerate() {
            pop.matrix.divide_row(agent, w);
        }
    }
}

/// Pass each surviving agent's final row to the collaborator's write-back
/// operation, in extraction order.
pub fn write_back<A, C: AlignmentClosure<A>>(agents: &mut [A], pop: &Population, closure: &C) {
    for (row, &idx) in pop.indices.iter().enumerate() {
        closure.apply(&mut agents[idx], pop.matrix.row(row));
    }
}
