//! The bounded fixed-point loop.

use popalign_core::errors::NumericError;

use crate::kernel::{self, relative_entropy};
use crate::population::Population;

/// What the loop achieved, fed to the post-loop checks.
#[derive(Debug, Clone, Copy)]
pub struct LoopOutcome {
    pub iterations_run: u32,
    pub final_divergence: f64,
}

/// Scratch vectors reused across iterations of one call. Never outlives
/// the call; concurrent `align` calls each build their own.
struct ScalingState {
    /// Per-outcome column scaling coefficients.
    gamma: Vec<f64>,
    /// Per-agent row scaling coefficients.
    alpha: Vec<f64>,
    /// Per-agent row sums after the gamma step.
    row_sums: Vec<f64>,
    /// Per-outcome column sums after the alpha step.
    col_sums: Vec<f64>,
    /// `col_sums` renormalized by total mass for the divergence test.
    shares: Vec<f64>,
}

impl ScalingState {
    fn new(agents: usize, choices: usize) -> Self {
        Self {
            gamma: vec![0.0; choices],
            alpha: vec![0.0; agents],
            row_sums: vec![0.0; agents],
            col_sums: vec![0.0; choices],
            shares: vec![0.0; choices],
        }
    }
}

/// Run the alternating rescaling loop on a weighted (mass) matrix until the
/// divergence between achieved and target shares drops to `precision`, or
/// `max_iterations` is reached.
///
/// The matrix is left in its final (still weighted) state in both cases;
/// descaling and write-back are the caller's next steps. A zero column or
/// row sum aborts immediately, as does a non-finite matrix entry at an
/// iteration boundary.
pub fn run(
    pop: &mut Population,
    target_share: &[f64],
    max_iterations: u32,
    precision: f64,
) -> Result<LoopOutcome, NumericError> {
    let total_mass = pop.total_mass();
    let target_mass: Vec<f64> = target_share.iter().map(|&s| s * total_mass).collect();

    let mut state = ScalingState::new(pop.agent_count(), target_share.len());
    let mut iterations_run = 0_u32;
    let mut divergence = f64::INFINITY;

    for iteration in 0..max_iterations {
        gamma_transform(pop, &target_mass, &mut state)?;
        alpha_transform(pop, &mut state)?;

        if let Some((agent, choice, value)) = pop.matrix.first_non_finite() {
            return Err(NumericError::NonFiniteEntry {
                agent,
                choice,
                value,
            });
        }

        for (share, &mass) in state.shares.iter_mut().zip(&state.col_sums) {
            *share = mass / total_mass;
        }
        divergence = relative_entropy(target_share, &state.shares);
        iterations_run = iteration + 1;

        tracing::debug!(
            iteration = iterations_run,
            divergence,
            "scaling cycle complete"
        );

        if divergence <= precision {
            break;
        }
    }

    Ok(LoopOutcome {
        iterations_run,
        final_divergence: divergence,
    })
}

/// Column scaling: force each outcome's mass sum onto its target mass.
///
/// Recomputes each agent's row sum afterwards; the alpha step consumes
/// them. A column whose mass collapsed to zero has no defined coefficient.
fn gamma_transform(
    pop: &mut Population,
    target_mass: &[f64],
    state: &mut ScalingState,
) -> Result<(), NumericError> {
    for (choice, gamma) in state.gamma.iter_mut().enumerate() {
        let column_sum = pop.matrix.column_sum(choice);
        *gamma = kernel::checked_ratio(target_mass[choice], column_sum)
            .ok_or(NumericError::ZeroColumnSum { choice })?;
    }

    for agent in 0..pop.agent_count() {
        let row = pop.matrix.row_mut(agent);
        for (v, &g) in row.iter_mut().zip(state.gamma.iter()) {
            *v *= g;
        }
        state.row_sums[agent] = kernel::sum(row);
    }
    Ok(())
}

/// Row scaling: restore each agent's row to its original mass (1, or its
/// weight). Recomputes the per-outcome column sums afterwards with
/// compensated summation; the convergence test consumes them.
fn alpha_transform(pop: &mut Population, state: &mut ScalingState) -> Result<(), NumericError> {
    for agent in 0..pop.agent_count() {
        state.alpha[agent] = kernel::checked_ratio(pop.mass_of(agent), state.row_sums[agent])
            .ok_or(NumericError::ZeroRowSum { agent })?;
    }
    for agent in 0..pop.agent_count() {
        pop.matrix.scale_row(agent, state.alpha[agent]);
    }

    for (choice, col_sum) in state.col_sums.iter_mut().enumerate() {
        *col_sum = pop.matrix.column_sum(choice);
    }
    Ok(())
}
