//! The public alignment engine.
//!
//! `Aligner` owns nothing but the run configuration; every `align` call
//! builds its state from scratch and discards it on return, so independent
//! calls on disjoint collections are safe to run concurrently.

use popalign_core::config::AlignConfig;
use popalign_core::errors::{AlignError, ValidationError};
use popalign_core::traits::AlignmentClosure;

use crate::population;
use crate::scaling::{self, AlignmentReport};
use crate::validation;
use crate::writeback;

/// Discrete multinomial probability alignment engine.
pub struct Aligner {
    config: AlignConfig,
}

impl Aligner {
    /// Engine with compiled default configuration (50 iterations, 1e-15
    /// precision, warnings on, convergence not mandatory).
    pub fn new() -> Self {
        Self {
            config: AlignConfig::default(),
        }
    }

    pub fn with_config(config: AlignConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AlignConfig {
        &self.config
    }

    /// Align the filtered subpopulation's outcome probabilities to the
    /// target shares.
    ///
    /// Pipeline: validate target and config, extract the population,
    /// validate weights and raw probabilities, convert to masses, run the
    /// scaling loop, apply the convergence policy, descale, write back.
    ///
    /// Every error aborts before any agent is mutated; the sole exception
    /// is the non-fatal non-convergence path, which still writes back the
    /// best achieved result and reports `converged = false`.
    pub fn align<A, C: AlignmentClosure<A>>(
        &self,
        agents: &mut [A],
        filter: Option<&dyn Fn(&A) -> bool>,
        closure: &C,
        target_share: &[f64],
    ) -> Result<AlignmentReport, AlignError> {
        validation::validate_inputs(target_share, &self.config)?;

        let mut pop = population::extract(&*agents, filter, closure, target_share.len())?;
        if pop.agent_count() == 0 {
            return Err(ValidationError::EmptyPopulation.into());
        }
        validation::validate_weights(&pop.weighting)?;
        validation::validate_matrix(&pop.matrix)?;
        pop.apply_weights();

        let total_mass = pop.total_mass();
        let precision = self.config.effective_precision();
        let max_iterations = self.config.effective_max_iterations();

        let outcome = scaling::run(&mut pop, target_share, max_iterations, precision)?;

        validation::validate_numeric_state(outcome.final_divergence, precision, total_mass)?;
        let warning = validation::check_convergence(
            outcome.final_divergence,
            precision,
            pop.agent_count(),
            outcome.iterations_run,
            &self.config,
        )?;
        let converged = outcome.final_divergence <= precision;

        writeback::descale(&mut pop);
        writeback::write_back(agents, &pop, closure);

        tracing::debug!(
            agents = pop.agent_count(),
            choices = target_share.len(),
            iterations = outcome.iterations_run,
            converged,
            "alignment complete"
        );

        Ok(AlignmentReport {
            iterations_run: outcome.iterations_run,
            final_divergence: outcome.final_divergence,
            converged,
            warning,
        })
    }

    /// Conventional binary alignment: the two-outcome case with the target
    /// given as the share of the first outcome.
    pub fn align_binary<A, C: AlignmentClosure<A>>(
        &self,
        agents: &mut [A],
        filter: Option<&dyn Fn(&A) -> bool>,
        closure: &C,
        share: f64,
    ) -> Result<AlignmentReport, AlignError> {
        self.align(agents, filter, closure, &[share, 1.0 - share])
    }
}

impl Default for Aligner {
    fn default() -> Self {
        Self::new()
    }
}
