//! Property tests for the alignment pipeline.

use popalign_core::traits::AlignmentClosure;
use popalign_engine::{Aligner, Population, ProbabilityMatrix, Weighting};
use proptest::prelude::*;

struct Agent {
    probs: Vec<f64>,
    weight: Option<f64>,
}

struct Closure;

impl AlignmentClosure<Agent> for Closure {
    fn probabilities(&self, agent: &Agent) -> Vec<f64> {
        agent.probs.clone()
    }

    fn apply(&self, agent: &mut Agent, aligned: &[f64]) {
        agent.probs = aligned.to_vec();
    }

    fn weight(&self, agent: &Agent) -> Option<f64> {
        agent.weight
    }
}

/// A population of strictly positive rows, each normalized to sum to 1.
fn positive_rows(agents: usize, choices: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
    prop::collection::vec(
        prop::collection::vec(0.05..1.0_f64, choices).prop_map(|row| {
            let total: f64 = row.iter().sum();
            row.into_iter().map(|v| v / total).collect::<Vec<f64>>()
        }),
        agents,
    )
}

/// A strictly positive target share vector summing to 1.
fn positive_shares(choices: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.05..1.0_f64, choices).prop_map(|raw| {
        let total: f64 = raw.iter().sum();
        raw.into_iter().map(|v| v / total).collect()
    })
}

proptest! {
    /// Each aligned row is still a probability distribution, and the
    /// population-wide mass is conserved.
    #[test]
    fn prop_rows_stay_distributions_and_mass_is_conserved(
        rows in positive_rows(6, 3),
        target in positive_shares(3),
    ) {
        let mut agents: Vec<Agent> = rows
            .iter()
            .map(|r| Agent { probs: r.clone(), weight: None })
            .collect();

        let report = Aligner::new()
            .align(&mut agents, None, &Closure, &target)
            .unwrap();

        let n = agents.len() as f64;
        let mut total = 0.0;
        for a in &agents {
            let row_sum: f64 = a.probs.iter().sum();
            prop_assert!((row_sum - 1.0).abs() < 1e-9);
            prop_assert!(a.probs.iter().all(|p| p.is_finite() && *p >= 0.0));
            total += row_sum;
        }
        prop_assert!((total - n).abs() < 1e-9);

        if report.converged {
            for (c, &share) in target.iter().enumerate() {
                let achieved: f64 =
                    agents.iter().map(|a| a.probs[c]).sum::<f64>() / n;
                prop_assert!((achieved - share).abs() < 1e-5);
            }
        }
    }

    /// Weighted alignment preserves each agent's unit row sum and the
    /// weighted column masses hit the targets on convergence.
    #[test]
    fn prop_weighted_alignment_conserves_weighted_mass(
        rows in positive_rows(5, 2),
        weights in prop::collection::vec(0.5..10.0_f64, 5),
        target in positive_shares(2),
    ) {
        let mut agents: Vec<Agent> = rows
            .iter()
            .zip(&weights)
            .map(|(r, &w)| Agent { probs: r.clone(), weight: Some(w) })
            .collect();

        let report = Aligner::new()
            .align(&mut agents, None, &Closure, &target)
            .unwrap();

        let total_weight: f64 = weights.iter().sum();
        for a in &agents {
            let row_sum: f64 = a.probs.iter().sum();
            prop_assert!((row_sum - 1.0).abs() < 1e-9);
        }

        if report.converged {
            for (c, &share) in target.iter().enumerate() {
                let mass: f64 = agents
                    .iter()
                    .map(|a| a.probs[c] * a.weight.unwrap())
                    .sum();
                prop_assert!((mass - share * total_weight).abs() < 1e-5 * total_weight);
            }
        }
    }

    /// Weight round-trip: applying weights and descaling restores the
    /// original matrix entry for entry.
    #[test]
    fn prop_weight_round_trip(
        rows in positive_rows(4, 3),
        weights in prop::collection::vec(0.1..100.0_f64, 4),
    ) {
        let mut matrix = ProbabilityMatrix::zeroed(4, 3);
        for (a, row) in rows.iter().enumerate() {
            matrix.row_mut(a).copy_from_slice(row);
        }
        let original = matrix.clone();

        let mut pop = Population {
            indices: (0..4).collect(),
            matrix,
            weighting: Weighting::Weighted(weights),
        };
        pop.apply_weights();
        popalign_engine::writeback::descale(&mut pop);

        for a in 0..4 {
            for c in 0..3 {
                prop_assert!(
                    (pop.matrix.get(a, c) - original.get(a, c)).abs()
                        <= 1e-12 * original.get(a, c).abs()
                );
            }
        }
    }
}
