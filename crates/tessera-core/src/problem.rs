//! Problem instances and solver configuration.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// An immutable amplification problem: good-state ratio `a = M/N` and the
/// total number of rounds `k` the schedule must use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProblemInstance {
    ratio: f64,
    iterations: usize,
}

impl ProblemInstance {
    /// Validate and construct a problem.
    ///
    /// Rejects `ratio` outside the open interval (0, 1), including NaN and
    /// infinities, and `iterations == 0`.
    pub fn new(ratio: f64, iterations: usize) -> CoreResult<Self> {
        if !(ratio > 0.0 && ratio < 1.0) {
            return Err(CoreError::InvalidRatio(ratio));
        }
        if iterations == 0 {
            return Err(CoreError::InvalidIterations(iterations));
        }
        Ok(Self { ratio, iterations })
    }

    /// Construct from an enumeration result: `good` marked states out of
    /// `total`.
    pub fn from_counts(good: u64, total: u64, iterations: usize) -> CoreResult<Self> {
        if total == 0 {
            return Err(CoreError::InvalidRatio(f64::NAN));
        }
        Self::new(good as f64 / total as f64, iterations)
    }

    /// Good-state ratio `a`.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Total number of amplification rounds `k`.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Half-angle θ of the Grover rotation, `asin(√a)`.
    pub fn theta(&self) -> f64 {
        self.ratio.sqrt().asin()
    }
}

/// Numerical settings for [`LastStepOptimizer`](crate::LastStepOptimizer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Grid points per phase axis for the coarse scan.
    pub grid_steps: usize,
    /// Initial pattern-search step in radians.
    pub initial_step: f64,
    /// Maximum number of pattern-search rounds.
    pub max_rounds: usize,
    /// Pattern search stops once the step falls below this value.
    pub step_floor: f64,
    /// Residual above which a result is reported as inexact.
    pub residual_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            grid_steps: 360,
            initial_step: 0.05,
            max_rounds: 80,
            step_floor: 1e-12,
            residual_tolerance: 1e-6,
        }
    }
}

impl SolverConfig {
    /// Create a configuration with the reference settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grid resolution per axis.
    #[must_use]
    pub fn with_grid_steps(mut self, grid_steps: usize) -> Self {
        self.grid_steps = grid_steps;
        self
    }

    /// Set the initial pattern-search step.
    #[must_use]
    pub fn with_initial_step(mut self, initial_step: f64) -> Self {
        self.initial_step = initial_step;
        self
    }

    /// Set the pattern-search round budget.
    #[must_use]
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Set the minimum pattern-search step.
    #[must_use]
    pub fn with_step_floor(mut self, step_floor: f64) -> Self {
        self.step_floor = step_floor;
        self
    }

    /// Set the residual tolerance used to flag inexact results.
    #[must_use]
    pub fn with_residual_tolerance(mut self, residual_tolerance: f64) -> Self {
        self.residual_tolerance = residual_tolerance;
        self
    }

    /// Check that every field is usable.
    pub fn validate(&self) -> CoreResult<()> {
        if self.grid_steps == 0 {
            return Err(invalid("grid_steps", "must be at least 1"));
        }
        positive_finite("initial_step", self.initial_step)?;
        positive_finite("step_floor", self.step_floor)?;
        positive_finite("residual_tolerance", self.residual_tolerance)?;
        Ok(())
    }
}

fn positive_finite(field: &'static str, value: f64) -> CoreResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be positive and finite, got {value}")))
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> CoreError {
    CoreError::InvalidConfig {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_bounds() {
        assert!(ProblemInstance::new(0.5, 1).is_ok());
        assert!(matches!(
            ProblemInstance::new(0.0, 1),
            Err(CoreError::InvalidRatio(_))
        ));
        assert!(matches!(
            ProblemInstance::new(1.0, 1),
            Err(CoreError::InvalidRatio(_))
        ));
        assert!(matches!(
            ProblemInstance::new(-0.2, 3),
            Err(CoreError::InvalidRatio(_))
        ));
        assert!(matches!(
            ProblemInstance::new(f64::NAN, 3),
            Err(CoreError::InvalidRatio(_))
        ));
        assert!(matches!(
            ProblemInstance::new(f64::INFINITY, 3),
            Err(CoreError::InvalidRatio(_))
        ));
    }

    #[test]
    fn test_zero_iterations_rejected() {
        assert!(matches!(
            ProblemInstance::new(0.25, 0),
            Err(CoreError::InvalidIterations(0))
        ));
    }

    #[test]
    fn test_from_counts() {
        let p = ProblemInstance::from_counts(8, 4096, 18).unwrap();
        assert_eq!(p.ratio(), 8.0 / 4096.0);
        assert_eq!(p.iterations(), 18);
        assert!(ProblemInstance::from_counts(0, 0, 1).is_err());
        assert!(ProblemInstance::from_counts(4096, 4096, 1).is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = SolverConfig::default();
        assert_eq!(config.grid_steps, 360);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        assert!(SolverConfig::new().with_grid_steps(0).validate().is_err());
        assert!(SolverConfig::new().with_initial_step(0.0).validate().is_err());
        assert!(
            SolverConfig::new()
                .with_step_floor(f64::NAN)
                .validate()
                .is_err()
        );
        assert!(
            SolverConfig::new()
                .with_residual_tolerance(-1.0)
                .validate()
                .is_err()
        );
    }
}
