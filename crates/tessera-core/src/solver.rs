//! Solve entry points and the terminal result type.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::amplitude::AmplitudeVector;
use crate::error::CoreResult;
use crate::evolver::FixedScheduleEvolver;
use crate::optimizer::{LastStepOptimizer, SearchStats};
use crate::problem::{ProblemInstance, SolverConfig};
use crate::schedule::{PhasePair, PhaseSchedule};

/// Tuned final-round phases for a problem instance, with their theoretical
/// outcome in the exact two-dimensional model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverResult {
    /// Good-state ratio the instance was solved for.
    pub ratio: f64,
    /// Total rounds `k`.
    pub iterations: usize,
    /// Oracle phase of the final round, in `[0, 2π)`.
    pub phi_oracle: f64,
    /// Diffusion phase of the final round, in `[0, 2π)`.
    pub phi_diffusion: f64,
    /// Probability of measuring a good state after all `k` rounds.
    pub p_good_theory: f64,
    /// Magnitude of the remaining bad amplitude.
    pub residual_bad_theory: f64,
    /// Final state on the good/bad plane.
    pub vector: AmplitudeVector,
    /// Best grid point the refinement started from.
    pub seed: PhasePair,
    /// Residual at the grid seed.
    pub seed_residual: f64,
    /// Pattern-search step when the search stopped.
    pub final_step: f64,
    /// Evaluation counters.
    pub stats: SearchStats,
    /// Tolerance the residual was judged against.
    pub residual_tolerance: f64,
}

impl SolverResult {
    /// The tuned final-round phases.
    pub fn phases(&self) -> PhasePair {
        PhasePair::new(self.phi_oracle, self.phi_diffusion)
    }

    /// Whether the residual is at most `tol`.
    pub fn is_exact(&self, tol: f64) -> bool {
        self.residual_bad_theory <= tol
    }

    /// Whether the residual met the configured tolerance.
    ///
    /// A `false` here is informational: the search exhausted its budget
    /// and the caller decides whether the residual is acceptable.
    pub fn within_tolerance(&self) -> bool {
        self.is_exact(self.residual_tolerance)
    }

    /// The full `k`-round schedule to hand to a circuit builder.
    pub fn schedule(&self) -> CoreResult<PhaseSchedule> {
        PhaseSchedule::new(self.iterations, self.phases())
    }
}

/// Solve with an explicit configuration.
pub fn solve(problem: &ProblemInstance, config: &SolverConfig) -> CoreResult<SolverResult> {
    let optimizer = LastStepOptimizer::for_problem(problem, config.clone())?;
    let v_pre = FixedScheduleEvolver::for_problem(problem).pre_final(problem.iterations());
    let outcome = optimizer.optimize(&v_pre);
    let best = outcome.best;

    let result = SolverResult {
        ratio: problem.ratio(),
        iterations: problem.iterations(),
        phi_oracle: best.phases.oracle,
        phi_diffusion: best.phases.diffusion,
        p_good_theory: best.vector.good_probability(),
        residual_bad_theory: best.residual,
        vector: best.vector,
        seed: outcome.seed.phases,
        seed_residual: outcome.seed.residual,
        final_step: outcome.final_step,
        stats: outcome.stats,
        residual_tolerance: config.residual_tolerance,
    };

    if result.within_tolerance() {
        info!(
            ratio = result.ratio,
            k = result.iterations,
            phi_oracle = result.phi_oracle,
            phi_diffusion = result.phi_diffusion,
            p_good = result.p_good_theory,
            residual = result.residual_bad_theory,
            "solved last-step phases"
        );
    } else {
        warn!(
            ratio = result.ratio,
            k = result.iterations,
            residual = result.residual_bad_theory,
            tolerance = config.residual_tolerance,
            "search budget exhausted above residual tolerance"
        );
    }

    Ok(result)
}

/// Solve `(a, k)` with the reference configuration.
///
/// ```rust
/// use tessera_core::solve_last_step_phases;
///
/// let result = solve_last_step_phases(8.0 / 4096.0, 18).unwrap();
/// assert!(result.residual_bad_theory < 1e-6);
/// assert!(result.p_good_theory > 1.0 - 1e-6);
/// ```
pub fn solve_last_step_phases(ratio: f64, iterations: usize) -> CoreResult<SolverResult> {
    let problem = ProblemInstance::new(ratio, iterations)?;
    solve(&problem, &SolverConfig::default())
}

/// Closed-form round count for the first canonical maximum,
/// `⌊π / (4·asin√a) − ½⌋`. Returns 0 outside (0, 1).
pub fn suggested_iterations(ratio: f64) -> usize {
    if !(ratio > 0.0 && ratio < 1.0) {
        return 0;
    }
    let theta = ratio.sqrt().asin();
    let k = std::f64::consts::PI / (4.0 * theta) - 0.5;
    if k <= 0.0 { 0 } else { k.floor() as usize }
}

/// Success probability of `k` canonical rounds, `sin²((2k+1)·asin√a)`.
pub fn canonical_success_probability(ratio: f64, iterations: usize) -> f64 {
    let theta = ratio.sqrt().asin();
    ((2 * iterations + 1) as f64 * theta).sin().powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn test_suggested_iterations() {
        assert_eq!(suggested_iterations(8.0 / 4096.0), 17);
        assert_eq!(suggested_iterations(54.0 / 4096.0), 6);
        assert_eq!(suggested_iterations(0.5), 0);
        assert_eq!(suggested_iterations(0.0), 0);
        assert_eq!(suggested_iterations(f64::NAN), 0);
    }

    #[test]
    fn test_canonical_success_probability() {
        assert!((canonical_success_probability(0.25, 1) - 1.0).abs() < 1e-12);
        assert!((canonical_success_probability(0.1, 0) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let problem = ProblemInstance::new(0.1, 2).unwrap();
        let config = SolverConfig::new().with_grid_steps(0);
        assert!(matches!(
            solve(&problem, &config),
            Err(CoreError::InvalidConfig { field: "grid_steps", .. })
        ));
    }

    #[test]
    fn test_quarter_ratio_single_round_is_exact() {
        // a = 1/4 reaches certainty after one canonical round.
        let problem = ProblemInstance::new(0.25, 1).unwrap();
        let result = solve(&problem, &SolverConfig::new().with_grid_steps(4)).unwrap();
        assert!(result.residual_bad_theory < 1e-12);
        assert!(result.within_tolerance());
        assert_eq!(result.schedule().unwrap().rounds(), 1);
    }
}
