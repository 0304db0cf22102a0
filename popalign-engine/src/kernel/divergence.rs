//! Relative-entropy divergence (Kullback-Leibler).
//!
//! Used as the convergence criterion: how far the currently achieved
//! per-outcome shares sit from the target shares. Both arguments must be on
//! the same scale (shares, not masses); the caller renormalizes before
//! comparing.

/// Kullback-Leibler divergence `D(target || observed)`.
///
/// Terms with `target[i] == 0` contribute nothing (the `0 ln 0` convention).
/// A zero observed share under a positive target share yields
/// `f64::INFINITY`; NaN inputs propagate. The caller decides whether a
/// non-finite divergence is fatal.
///
/// Accumulated with compensated summation; individual terms can differ by
/// many orders of magnitude.
pub fn relative_entropy(target: &[f64], observed: &[f64]) -> f64 {
    debug_assert_eq!(target.len(), observed.len());

    let mut total = 0.0_f64;
    let mut compensation = 0.0_f64;
    for (&p, &q) in target.iter().zip(observed) {
        if p == 0.0 {
            continue;
        }
        if q == 0.0 {
            return f64::INFINITY;
        }
        let term = p * (p / q).ln();
        let t = total + term;
        if total.abs() >= term.abs() {
            compensation += (total - t) + term;
        } else {
            compensation += (term - t) + total;
        }
        total = t;
    }
    total + compensation
}
