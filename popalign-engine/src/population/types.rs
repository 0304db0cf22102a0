//! Population types: dense probability matrix, weighting, call context.

use crate::kernel;

/// Dense row-major matrix of per-agent, per-outcome probability mass.
///
/// Rows are agents, columns are outcomes. Values are probabilities in
/// `[0,1]` until weights are applied, masses afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityMatrix {
    data: Vec<f64>,
    agents: usize,
    choices: usize,
}

impl ProbabilityMatrix {
    /// Create a matrix with every entry zero.
    pub fn zeroed(agents: usize, choices: usize) -> Self {
        Self {
            data: vec![0.0; agents * choices],
            agents,
            choices,
        }
    }

    pub fn agent_count(&self) -> usize {
        self.agents
    }

    pub fn choice_count(&self) -> usize {
        self.choices
    }

    pub fn row(&self, agent: usize) -> &[f64] {
        let start = agent * self.choices;
        &self.data[start..start + self.choices]
    }

    pub fn row_mut(&mut self, agent: usize) -> &mut [f64] {
        let start = agent * self.choices;
        &mut self.data[start..start + self.choices]
    }

    pub fn get(&self, agent: usize, choice: usize) -> f64 {
        self.data[agent * self.choices + choice]
    }

    /// Compensated sum of one agent's row.
    pub fn row_sum(&self, agent: usize) -> f64 {
        kernel::sum(self.row(agent))
    }

    /// Compensated sum of one outcome's column over all agents.
    pub fn column_sum(&self, choice: usize) -> f64 {
        kernel::sum_iter((0..self.agents).map(|a| self.data[a * self.choices + choice]))
    }

    /// Multiply every entry in one row by `factor`.
    pub fn scale_row(&mut self, agent: usize, factor: f64) {
        for v in self.row_mut(agent) {
            *v *= factor;
        }
    }

    /// Divide every entry in one row by `divisor`.
    pub fn divide_row(&mut self, agent: usize, divisor: f64) {
        for v in self.row_mut(agent) {
            *v /= divisor;
        }
    }

    /// Multiply every entry in one column by `factor`.
    pub fn scale_column(&mut self, choice: usize, factor: f64) {
        for a in 0..self.agents {
            self.data[a * self.choices + choice] *= factor;
        }
    }

    /// First NaN or infinite entry, if any, as `(agent, choice, value)`.
    pub fn first_non_finite(&self) -> Option<(usize, usize, f64)> {
        self.data.iter().enumerate().find_map(|(i, &v)| {
            if v.is_finite() {
                None
            } else {
                Some((i / self.choices, i % self.choices, v))
            }
        })
    }
}

/// Weight classification of the working population.
///
/// Absence of weights is its own variant, not a vector of ones: the
/// unweighted and all-weights-equal-one cases stay distinguishable.
#[derive(Debug, Clone, PartialEq)]
pub enum Weighting {
    Unweighted,
    Weighted(Vec<f64>),
}

impl Weighting {
    pub fn is_weighted(&self) -> bool {
        matches!(self, Self::Weighted(_))
    }

    pub fn weights(&self) -> Option<&[f64]> {
        match self {
            Self::Unweighted => None,
            Self::Weighted(w) => Some(w),
        }
    }
}

/// Call-scoped alignment context: the filtered subpopulation's positions in
/// the caller's slice, its probability matrix, and its weighting.
#[derive(Debug)]
pub struct Population {
    /// Positions of the surviving agents in the caller's collection,
    /// insertion order.
    pub indices: Vec<usize>,
    pub matrix: ProbabilityMatrix,
    pub weighting: Weighting,
}

impl Population {
    pub fn agent_count(&self) -> usize {
        self.indices.len()
    }

    /// The mass one agent's row must sum to: its weight, or 1.
    pub fn mass_of(&self, agent: usize) -> f64 {
        match &self.weighting {
            Weighting::Unweighted => 1.0,
            Weighting::Weighted(w) => w[agent],
        }
    }

    /// Total population mass: the agent count, or the weight sum.
    pub fn total_mass(&self) -> f64 {
        match &self.weighting {
            Weighting::Unweighted => self.indices.len() as f64,
            Weighting::Weighted(w) => kernel::sum(w),
        }
    }

    /// Convert each row from a probability vector to a mass vector by
    /// multiplying it by the agent's weight. The only place probabilities
    /// become masses. No-op for unweighted populations.
    pub fn apply_weights(&mut self) {
        if let Weighting::Weighted(weights) = &self.weighting {
            for (agent, &w) in weights.iter().enumerate() {
                self.matrix.scale_row(agent, w);
            }
        }
    }
}
