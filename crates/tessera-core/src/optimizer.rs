//! Last-round phase search.
//!
//! Finds `(φ_o, φ_d)` minimizing `|bad component of Q(φ_o, φ_d)·v_pre|` on
//! the torus `[0, 2π)²` in two stages:
//!
//! 1. a coarse grid scan over `G × G` points, which lands in the basin of
//!    the global minimum (the landscape has several local minima);
//! 2. a derivative-free compass search that probes the 9 offsets
//!    `{0, +s, −s}²` around the incumbent, halving `s` after every round
//!    without improvement.
//!
//! Both stages are deterministic and bounded: `G²` evaluations for the scan
//! and at most `9 · max_rounds` for the refinement. The search never fails;
//! an unreachable target simply leaves a large residual.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::amplitude::AmplitudeVector;
use crate::error::CoreResult;
use crate::problem::{ProblemInstance, SolverConfig};
use crate::rotation::{RotationOperator, check_ratio};
use crate::schedule::{PhasePair, wrap_phase};

/// Per-axis offsets probed in each refinement round, in probe order.
const OFFSETS: [f64; 3] = [0.0, 1.0, -1.0];

/// Incumbent of the search: best phases found so far and what they produce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchState {
    /// Phases of the incumbent.
    pub phases: PhasePair,
    /// Residual bad amplitude at `phases`.
    pub residual: f64,
    /// State after the final round at `phases`.
    pub vector: AmplitudeVector,
}

impl SearchState {
    fn new(phases: PhasePair, vector: AmplitudeVector) -> Self {
        Self {
            phases,
            residual: vector.residual(),
            vector,
        }
    }

    /// Replace the incumbent if `candidate` is strictly better.
    ///
    /// Returns whether the replacement happened. A NaN residual never
    /// compares as an improvement, so the incumbent's residual is
    /// monotonically non-increasing.
    pub fn offer(&mut self, candidate: SearchState) -> bool {
        if candidate.residual < self.residual {
            *self = candidate;
            true
        } else {
            false
        }
    }
}

/// Work done by one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Residual evaluations in the grid scan.
    pub grid_evaluations: usize,
    /// Residual evaluations in the refinement.
    pub refine_evaluations: usize,
    /// Refinement rounds executed.
    pub rounds: usize,
    /// Rounds that improved the incumbent.
    pub improving_rounds: usize,
}

impl SearchStats {
    /// Total residual evaluations.
    pub fn evaluations(&self) -> usize {
        self.grid_evaluations + self.refine_evaluations
    }
}

/// What [`LastStepOptimizer::optimize`] found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LastStepOutcome {
    /// Best point after refinement.
    pub best: SearchState,
    /// Best grid point, where refinement started.
    pub seed: SearchState,
    /// Pattern-search step when the search stopped.
    pub final_step: f64,
    /// Evaluation counters.
    pub stats: SearchStats,
}

/// Two-stage search for the final round's phases.
#[derive(Debug, Clone)]
pub struct LastStepOptimizer {
    ratio: f64,
    config: SolverConfig,
}

impl LastStepOptimizer {
    /// Optimizer for good-state ratio `a ∈ [0, 1]` using `config`.
    ///
    /// Fails with [`CoreError::InvalidRatio`](crate::CoreError::InvalidRatio)
    /// or [`CoreError::InvalidConfig`](crate::CoreError::InvalidConfig).
    pub fn new(ratio: f64, config: SolverConfig) -> CoreResult<Self> {
        let ratio = check_ratio(ratio)?;
        config.validate()?;
        Ok(Self { ratio, config })
    }

    /// Optimizer for a validated problem.
    pub fn for_problem(problem: &ProblemInstance, config: SolverConfig) -> CoreResult<Self> {
        Self::new(problem.ratio(), config)
    }

    /// The configuration in use.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Apply one round with `phases` to `v_pre`.
    pub fn evaluate(&self, v_pre: &AmplitudeVector, phases: PhasePair) -> SearchState {
        let q = RotationOperator::with_checked_ratio(self.ratio, phases);
        SearchState::new(phases, q.apply(v_pre))
    }

    /// Residual bad amplitude after one round with `phases`.
    pub fn residual_at(&self, v_pre: &AmplitudeVector, phases: PhasePair) -> f64 {
        self.evaluate(v_pre, phases).residual
    }

    /// Coarse scan over the `G × G` grid.
    ///
    /// Points are visited in lexicographic `(φ_o, φ_d)` order and only a
    /// strictly smaller residual replaces the incumbent, so ties resolve to
    /// the first point visited.
    pub fn grid_scan(&self, v_pre: &AmplitudeVector) -> (SearchState, usize) {
        let g = self.config.grid_steps.max(1);
        let axis = |i: usize| TAU * i as f64 / g as f64;

        let mut best = self.evaluate(v_pre, PhasePair::new(axis(0), axis(0)));
        let mut evaluations = 1;
        for i in 0..g {
            for j in 0..g {
                if i == 0 && j == 0 {
                    continue;
                }
                best.offer(self.evaluate(v_pre, PhasePair::new(axis(i), axis(j))));
                evaluations += 1;
            }
        }

        debug!(
            grid_steps = g,
            evaluations,
            phi_oracle = best.phases.oracle,
            phi_diffusion = best.phases.diffusion,
            residual = best.residual,
            "grid scan finished"
        );
        (best, evaluations)
    }

    /// Compass search from `seed`.
    ///
    /// Each round probes the 9 offsets around the incumbent and adopts any
    /// strictly better point immediately, so later probes in the same round
    /// are taken around the new incumbent. A round without improvement
    /// halves the step; the search ends after `max_rounds` rounds or once
    /// the step drops below `step_floor`.
    pub fn refine(
        &self,
        v_pre: &AmplitudeVector,
        seed: SearchState,
    ) -> (SearchState, f64, SearchStats) {
        let mut best = seed;
        let mut step = self.config.initial_step;
        let mut stats = SearchStats::default();

        for round in 0..self.config.max_rounds {
            stats.rounds += 1;
            let mut improved = false;

            for d_oracle in OFFSETS {
                for d_diffusion in OFFSETS {
                    let phases = PhasePair::new(
                        wrap_phase(best.phases.oracle + d_oracle * step),
                        wrap_phase(best.phases.diffusion + d_diffusion * step),
                    );
                    stats.refine_evaluations += 1;
                    if best.offer(self.evaluate(v_pre, phases)) {
                        improved = true;
                    }
                }
            }

            trace!(round, step, residual = best.residual, improved, "refinement round");

            if improved {
                stats.improving_rounds += 1;
            } else {
                step *= 0.5;
                if step < self.config.step_floor {
                    break;
                }
            }
        }

        debug!(
            rounds = stats.rounds,
            improving_rounds = stats.improving_rounds,
            final_step = step,
            residual = best.residual,
            "pattern search finished"
        );
        (best, step, stats)
    }

    /// Run both stages from the pre-final vector `v_pre`.
    pub fn optimize(&self, v_pre: &AmplitudeVector) -> LastStepOutcome {
        let (seed, grid_evaluations) = self.grid_scan(v_pre);
        let (best, final_step, mut stats) = self.refine(v_pre, seed);
        stats.grid_evaluations = grid_evaluations;
        LastStepOutcome {
            best,
            seed,
            final_step,
            stats,
        }
    }
}
