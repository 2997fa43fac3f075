//! `tessera-core`: exact last-step phases for fixed-length amplitude
//! amplification.
//!
//! Ordinary amplitude amplification with `(π, π)` phases only reaches
//! certainty when the round count happens to fit the rotation angle. For an
//! arbitrary fixed `k`, this crate runs `k − 1` canonical rounds and solves
//! for the oracle and diffusion phases of the last round that drive the
//! amplitude left in the bad subspace to (near) zero.
//!
//! Everything happens in the exact two-dimensional model: the state is an
//! [`AmplitudeVector`] on the good/bad plane and one round is the 2×2
//! unitary [`RotationOperator`].
//!
//! # Quick start
//!
//! ```rust
//! use tessera_core::{ProblemInstance, SolverConfig, solve};
//!
//! // 8 marked 12-bit strings, 18 rounds.
//! let problem = ProblemInstance::from_counts(8, 4096, 18).unwrap();
//! let result = solve(&problem, &SolverConfig::default()).unwrap();
//!
//! assert!(result.within_tolerance());
//! let schedule = result.schedule().unwrap();
//! assert_eq!(schedule.rounds(), 18);
//! ```

pub mod amplitude;
pub mod error;
pub mod evolver;
pub mod optimizer;
pub mod problem;
pub mod rotation;
pub mod schedule;
pub mod solver;

pub use amplitude::AmplitudeVector;
pub use error::{CoreError, CoreResult};
pub use evolver::FixedScheduleEvolver;
pub use optimizer::{LastStepOptimizer, LastStepOutcome, SearchState, SearchStats};
pub use problem::{ProblemInstance, SolverConfig};
pub use rotation::{Matrix2, RotationOperator};
pub use schedule::{PhasePair, PhaseSchedule, wrap_phase};
pub use solver::{
    SolverResult, canonical_success_probability, solve, solve_last_step_phases,
    suggested_iterations,
};
