//! AlignmentClosure trait — the engine's only view of an agent.
//!
//! The engine never inspects agent types directly; everything it needs
//! (unaligned probabilities, optional weight, write-back) goes through this
//! trait. Statically dispatched, no runtime type inspection.

/// Collaborator contract between the alignment engine and an agent model.
///
/// `probabilities` and `weight` must be pure: the extractor calls them once
/// per agent and assumes repeated calls would agree. `apply` is the only
/// mutation the engine ever performs, invoked exactly once per surviving
/// agent after the scaling loop has terminated.
pub trait AlignmentClosure<A> {
    /// The agent's current unaligned probability vector, one value per
    /// outcome. Must return a fresh vector each call.
    fn probabilities(&self, agent: &A) -> Vec<f64>;

    /// Overwrite the agent's probability vector with the aligned one.
    fn apply(&self, agent: &mut A, aligned: &[f64]);

    /// The agent's weight, if the model is weighted.
    ///
    /// Presence must be uniform across the filtered collection: all agents
    /// report `Some`, or all report `None`. The extractor rejects mixed
    /// populations. The default marks every agent as unweighted.
    fn weight(&self, agent: &A) -> Option<f64> {
        let _ = agent;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Person {
        probs: Vec<f64>,
    }

    struct PersonClosure;

    impl AlignmentClosure<Person> for PersonClosure {
        fn probabilities(&self, agent: &Person) -> Vec<f64> {
            agent.probs.clone()
        }

        fn apply(&self, agent: &mut Person, aligned: &[f64]) {
            agent.probs = aligned.to_vec();
        }
    }

    #[test]
    fn test_default_weight_is_none() {
        let person = Person {
            probs: vec![0.3, 0.7],
        };
        assert!(PersonClosure.weight(&person).is_none());
    }

    #[test]
    fn test_apply_overwrites() {
        let mut person = Person {
            probs: vec![0.3, 0.7],
        };
        PersonClosure.apply(&mut person, &[0.6, 0.4]);
        assert_eq!(person.probs, vec![0.6, 0.4]);
    }
}
