//! Population extraction: filter, classify, build the probability matrix.

use popalign_core::errors::ExtractionError;
use popalign_core::traits::AlignmentClosure;

use super::types::{Population, ProbabilityMatrix, Weighting};

/// Build the working population for one `align` call.
///
/// Filters the caller's collection (insertion order preserved), classifies
/// it as weighted or unweighted, and reads each surviving agent's
/// probability vector into a matrix row. Reads each agent exactly once and
/// mutates nothing.
///
/// The matrix holds raw probabilities; the engine applies weights only
/// after they have been validated.
pub fn extract<A, C: AlignmentClosure<A>>(
    agents: &[A],
    filter: Option<&dyn Fn(&A) -> bool>,
    closure: &C,
    choice_count: usize,
) -> Result<Population, ExtractionError> {
    let indices: Vec<usize> = match filter {
        Some(pred) => agents
            .iter()
            .enumerate()
            .filter(|(_, a)| pred(a))
            .map(|(i, _)| i)
            .collect(),
        None => (0..agents.len()).collect(),
    };

    let weighting = classify(agents, &indices, closure)?;

    let mut matrix = ProbabilityMatrix::zeroed(indices.len(), choice_count);
    for (row, &idx) in indices.iter().enumerate() {
        let probs = closure.probabilities(&agents[idx]);
        if probs.len() != choice_count {
            return Err(ExtractionError::RowLengthMismatch {
                agent: row,
                expected: choice_count,
                actual: probs.len(),
            });
        }
        matrix.row_mut(row).copy_from_slice(&probs);
    }

    Ok(Population {
        indices,
        matrix,
        weighting,
    })
}

/// Classify the filtered population as weighted or unweighted.
///
/// The first agent sets the expectation; any later agent disagreeing makes
/// the population mixed, which is an error.
fn classify<A, C: AlignmentClosure<A>>(
    agents: &[A],
    indices: &[usize],
    closure: &C,
) -> Result<Weighting, ExtractionError> {
    let mut expected: Option<bool> = None;
    let mut weights = Vec::new();

    for (row, &idx) in indices.iter().enumerate() {
        let weight = closure.weight(&agents[idx]);
        match expected {
            None => expected = Some(weight.is_some()),
            Some(e) if e != weight.is_some() => {
                return Err(ExtractionError::MixedWeighting { agent: row });
            }
            Some(_) => {}
        }
        if let Some(w) = weight {
            weights.push(w);
        }
    }

    Ok(if expected == Some(true) {
        Weighting::Weighted(weights)
    } else {
        Weighting::Unweighted
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Agent {
        probs: Vec<f64>,
        weight: Option<f64>,
        group: u8,
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

    fn agent(probs: &[f64], weight: Option<f64>, group: u8) -> Agent {
        Agent {
            probs: probs.to_vec(),
            weight,
            group,
        }
    }

    #[test]
    fn test_no_filter_selects_all_in_order() {
        let agents = vec![
            agent(&[0.2, 0.8], None, 0),
            agent(&[0.4, 0.6], None, 1),
        ];
        let pop = extract(&agents, None, &Closure, 2).unwrap();
        assert_eq!(pop.indices, vec![0, 1]);
        assert_eq!(pop.matrix.row(0), &[0.2, 0.8]);
        assert_eq!(pop.matrix.row(1), &[0.4, 0.6]);
        assert_eq!(pop.weighting, Weighting::Unweighted);
    }

    #[test]
    fn test_filter_preserves_insertion_order() {
        let agents = vec![
            agent(&[0.1, 0.9], None, 1),
            agent(&[0.2, 0.8], None, 0),
            agent(&[0.3, 0.7], None, 1),
        ];
        let keep = |a: &Agent| a.group == 1;
        let pop = extract(&agents, Some(&keep), &Closure, 2).unwrap();
        assert_eq!(pop.indices, vec![0, 2]);
        assert_eq!(pop.matrix.row(1), &[0.3, 0.7]);
    }

    #[test]
    fn test_weighted_population_collects_weights() {
        let agents = vec![
            agent(&[0.5, 0.5], Some(2.0), 0),
            agent(&[0.5, 0.5], Some(3.0), 0),
        ];
        let pop = extract(&agents, None, &Closure, 2).unwrap();
        assert_eq!(pop.weighting, Weighting::Weighted(vec![2.0, 3.0]));
    }

    #[test]
    fn test_mixed_weighting_rejected() {
        let agents = vec![
            agent(&[0.5, 0.5], Some(2.0), 0),
            agent(&[0.5, 0.5], None, 0),
        ];
        let err = extract(&agents, None, &Closure, 2).unwrap_err();
        assert!(matches!(err, ExtractionError::MixedWeighting { agent: 1 }));
    }

    #[test]
    fn test_mixed_weighting_rejected_weighted_later() {
        let agents = vec![
            agent(&[0.5, 0.5], None, 0),
            agent(&[0.5, 0.5], Some(2.0), 0),
        ];
        let err = extract(&agents, None, &Closure, 2).unwrap_err();
        assert!(matches!(err, ExtractionError::MixedWeighting { agent: 1 }));
    }

    #[test]
    fn test_row_length_mismatch_rejected() {
        let agents = vec![agent(&[0.5, 0.3, 0.2], None, 0)];
        let err = extract(&agents, None, &Closure, 2).unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::RowLengthMismatch {
                agent: 0,
                expected: 2,
                actual: 3,
            }
        ));
    }
}
