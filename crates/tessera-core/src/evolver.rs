//! Canonical-phase evolution from the uniform superposition.

use crate::amplitude::AmplitudeVector;
use crate::error::CoreResult;
use crate::problem::ProblemInstance;
use crate::rotation::RotationOperator;
use crate::schedule::PhasePair;

/// Applies canonical `(π, π)` rounds to `(√a, √(1−a))`.
#[derive(Debug, Clone, Copy)]
pub struct FixedScheduleEvolver {
    operator: RotationOperator,
}

impl FixedScheduleEvolver {
    /// Evolver for good-state ratio `a ∈ [0, 1]`.
    pub fn new(ratio: f64) -> CoreResult<Self> {
        Ok(Self {
            operator: RotationOperator::canonical(ratio)?,
        })
    }

    /// Evolver for a validated problem.
    pub fn for_problem(problem: &ProblemInstance) -> Self {
        Self {
            operator: RotationOperator::with_checked_ratio(problem.ratio(), PhasePair::CANONICAL),
        }
    }

    /// The starting vector `(√a, √(1−a))`.
    pub fn initial(&self) -> AmplitudeVector {
        AmplitudeVector::initial(self.operator.ratio())
    }

    /// State after `steps` canonical rounds.
    pub fn evolve(&self, steps: usize) -> AmplitudeVector {
        (0..steps).fold(self.initial(), |v, _| self.operator.apply(&v))
    }

    /// The vector entering the final round of a `k`-round schedule, i.e.
    /// after `k − 1` canonical rounds. `k = 1` yields the initial vector.
    pub fn pre_final(&self, iterations: usize) -> AmplitudeVector {
        self.evolve(iterations.saturating_sub(1))
    }

    /// Good-state probability after each of `0..=steps` rounds.
    pub fn trajectory(&self, steps: usize) -> Vec<f64> {
        let mut v = self.initial();
        let mut probabilities = Vec::with_capacity(steps + 1);
        probabilities.push(v.good_probability());
        for _ in 0..steps {
            v = self.operator.apply(&v);
            probabilities.push(v.good_probability());
        }
        probabilities
    }
}
