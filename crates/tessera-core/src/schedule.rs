//! Phase pairs and per-round phase schedules.

use std::f64::consts::{PI, TAU};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Oracle and diffusion phases for one amplification round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhasePair {
    /// Phase applied to the good component by the oracle.
    pub oracle: f64,
    /// Phase applied along the uniform superposition by the diffusion.
    pub diffusion: f64,
}

impl PhasePair {
    /// The standard sign-flip pair `(π, π)`.
    pub const CANONICAL: Self = Self {
        oracle: PI,
        diffusion: PI,
    };

    /// Create a phase pair.
    pub fn new(oracle: f64, diffusion: f64) -> Self {
        Self { oracle, diffusion }
    }

    /// Both phases reduced into `[0, 2π)`.
    #[must_use]
    pub fn wrapped(self) -> Self {
        Self {
            oracle: wrap_phase(self.oracle),
            diffusion: wrap_phase(self.diffusion),
        }
    }

    /// Both phases in degrees.
    pub fn to_degrees(self) -> (f64, f64) {
        (self.oracle.to_degrees(), self.diffusion.to_degrees())
    }
}

impl fmt::Display for PhasePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(φ_o = {:.12}, φ_d = {:.12})", self.oracle, self.diffusion)
    }
}

/// Reduce an angle into `[0, 2π)`.
pub fn wrap_phase(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// A `k`-round schedule: `k − 1` canonical rounds followed by one tuned round.
///
/// This is what a circuit builder consumes to realize the solved sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseSchedule {
    rounds: usize,
    last: PhasePair,
}

impl PhaseSchedule {
    /// Schedule whose final round uses `last`.
    pub fn new(rounds: usize, last: PhasePair) -> CoreResult<Self> {
        if rounds == 0 {
            return Err(CoreError::InvalidIterations(rounds));
        }
        Ok(Self { rounds, last })
    }

    /// Plain amplitude amplification with every round canonical.
    pub fn canonical(rounds: usize) -> CoreResult<Self> {
        Self::new(rounds, PhasePair::CANONICAL)
    }

    /// Total number of rounds.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Phases of the final round.
    pub fn last(&self) -> PhasePair {
        self.last
    }

    /// Phases used in round `index` (zero-based).
    pub fn phases(&self, index: usize) -> PhasePair {
        if index + 1 == self.rounds {
            self.last
        } else {
            PhasePair::CANONICAL
        }
    }

    /// Iterate over the phases of every round in order.
    pub fn iter(&self) -> impl Iterator<Item = PhasePair> + '_ {
        (0..self.rounds).map(|i| self.phases(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_phase() {
        assert_eq!(wrap_phase(0.0), 0.0);
        assert!((wrap_phase(-0.5) - (TAU - 0.5)).abs() < 1e-15);
        assert!((wrap_phase(TAU + 1.0) - 1.0).abs() < 1e-12);
        assert_eq!(wrap_phase(TAU), 0.0);
        assert!(wrap_phase(-1e-300) < TAU);
    }

    #[test]
    fn test_schedule_last_round_tuned() {
        let last = PhasePair::new(1.0, 2.0);
        let schedule = PhaseSchedule::new(3, last).unwrap();
        let phases: Vec<_> = schedule.iter().collect();
        assert_eq!(phases.len(), 3);
        assert_eq!(phases[0], PhasePair::CANONICAL);
        assert_eq!(phases[1], PhasePair::CANONICAL);
        assert_eq!(phases[2], last);
    }

    #[test]
    fn test_single_round_schedule() {
        let last = PhasePair::new(0.3, 0.4);
        let schedule = PhaseSchedule::new(1, last).unwrap();
        assert_eq!(schedule.phases(0), last);
        assert!(PhaseSchedule::canonical(0).is_err());
    }
}
