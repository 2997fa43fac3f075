//! Tests for the last-step phase search.

use std::f64::consts::TAU;

use tessera_core::{
    CoreError, FixedScheduleEvolver, LastStepOptimizer, PhasePair, ProblemInstance,
    RotationOperator, SolverConfig, solve, solve_last_step_phases,
};

const RATIO: f64 = 8.0 / 4096.0;

// ---------------------------------------------------------------------------
// Known instances
// ---------------------------------------------------------------------------

#[test]
fn eighteen_rounds_reach_certainty() {
    let result = solve_last_step_phases(RATIO, 18).unwrap();
    assert!(
        result.residual_bad_theory < 1e-6,
        "residual {}",
        result.residual_bad_theory
    );
    assert!(result.p_good_theory > 1.0 - 1e-6);
    assert!(result.within_tolerance());
}

#[test]
fn seventeen_rounds_fall_short_of_eighteen() {
    let k17 = solve_last_step_phases(RATIO, 17).unwrap();
    let k18 = solve_last_step_phases(RATIO, 18).unwrap();
    assert!(
        k17.residual_bad_theory > 10.0 * k18.residual_bad_theory,
        "k=17 residual {} vs k=18 residual {}",
        k17.residual_bad_theory,
        k18.residual_bad_theory
    );
    assert!(!k17.within_tolerance());
}

#[test]
fn reported_values_agree_with_replayed_schedule() {
    let result = solve_last_step_phases(RATIO, 18).unwrap();
    let v_pre = FixedScheduleEvolver::new(RATIO).unwrap().pre_final(18);
    let v = RotationOperator::new(RATIO, result.phases())
        .unwrap()
        .apply(&v_pre);
    assert_eq!(v, result.vector);
    assert!((v.residual() - result.residual_bad_theory).abs() < 1e-15);
    assert!((v.good_probability() - result.p_good_theory).abs() < 1e-15);
}

#[test]
fn phases_lie_in_unit_torus() {
    for k in [1, 2, 5, 17, 18, 19] {
        let result = solve_last_step_phases(RATIO, k).unwrap();
        assert!((0.0..TAU).contains(&result.phi_oracle), "k = {k}");
        assert!((0.0..TAU).contains(&result.phi_diffusion), "k = {k}");
    }
}

#[test]
fn refinement_improves_on_grid_seed() {
    let result = solve_last_step_phases(RATIO, 18).unwrap();
    assert!(result.residual_bad_theory <= result.seed_residual);
    assert_eq!(result.stats.grid_evaluations, 360 * 360);
    assert!(result.stats.rounds <= 80);
}

// ---------------------------------------------------------------------------
// Determinism and budget
// ---------------------------------------------------------------------------

#[test]
fn identical_inputs_give_bit_identical_results() {
    let a = solve_last_step_phases(RATIO, 18).unwrap();
    let b = solve_last_step_phases(RATIO, 18).unwrap();
    assert_eq!(a.phi_oracle.to_bits(), b.phi_oracle.to_bits());
    assert_eq!(a.phi_diffusion.to_bits(), b.phi_diffusion.to_bits());
    assert_eq!(a.p_good_theory.to_bits(), b.p_good_theory.to_bits());
    assert_eq!(a.residual_bad_theory.to_bits(), b.residual_bad_theory.to_bits());
    assert_eq!(a, b);
}

#[test]
fn tiny_budget_still_terminates_with_best_effort() {
    let problem = ProblemInstance::new(RATIO, 18).unwrap();
    let config = SolverConfig::new().with_grid_steps(3).with_max_rounds(2);
    let result = solve(&problem, &config).unwrap();
    assert!(result.residual_bad_theory.is_finite());
    assert_eq!(result.stats.grid_evaluations, 9);
    assert_eq!(result.stats.rounds, 2);
    assert!(result.residual_bad_theory <= result.seed_residual);
}

#[test]
fn finer_grid_never_hurts_the_seed_on_shared_points() {
    // Every point of the 90-grid is on the 360-grid, so the finer seed is at
    // least as good.
    let v_pre = FixedScheduleEvolver::new(RATIO).unwrap().pre_final(18);
    let coarse = LastStepOptimizer::new(RATIO, SolverConfig::new().with_grid_steps(90)).unwrap();
    let fine = LastStepOptimizer::new(RATIO, SolverConfig::new().with_grid_steps(360)).unwrap();
    let (coarse_seed, _) = coarse.grid_scan(&v_pre);
    let (fine_seed, _) = fine.grid_scan(&v_pre);
    assert!(fine_seed.residual <= coarse_seed.residual);
}

#[test]
fn canonical_phases_are_a_grid_point() {
    // With G = 360 the grid contains (π, π), so the seed is never worse than
    // plain amplitude amplification.
    let v_pre = FixedScheduleEvolver::new(RATIO).unwrap().pre_final(17);
    let optimizer = LastStepOptimizer::new(RATIO, SolverConfig::default()).unwrap();
    let (seed, _) = optimizer.grid_scan(&v_pre);
    assert!(seed.residual <= optimizer.residual_at(&v_pre, PhasePair::CANONICAL) + 1e-15);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn invalid_ratio_rejected() {
    for a in [0.0, 1.0, -0.5, 2.0, f64::NAN] {
        assert!(
            matches!(solve_last_step_phases(a, 3), Err(CoreError::InvalidRatio(_))),
            "a = {a}"
        );
    }
}

#[test]
fn core_constructors_reject_ratio_outside_unit_interval() {
    for a in [1.5, -0.25, f64::NAN, f64::INFINITY] {
        assert!(
            matches!(
                RotationOperator::new(a, PhasePair::CANONICAL),
                Err(CoreError::InvalidRatio(_))
            ),
            "rotation, a = {a}"
        );
        assert!(
            matches!(FixedScheduleEvolver::new(a), Err(CoreError::InvalidRatio(_))),
            "evolver, a = {a}"
        );
        assert!(
            matches!(
                LastStepOptimizer::new(a, SolverConfig::new().with_grid_steps(4)),
                Err(CoreError::InvalidRatio(_))
            ),
            "optimizer, a = {a}"
        );
    }
}

#[test]
fn core_constructors_accept_closed_endpoints() {
    for a in [0.0, 1.0] {
        let optimizer = LastStepOptimizer::new(a, SolverConfig::new().with_grid_steps(4)).unwrap();
        let v_pre = FixedScheduleEvolver::new(a).unwrap().pre_final(2);
        let outcome = optimizer.optimize(&v_pre);
        assert!(outcome.best.residual.is_finite(), "a = {a}");
    }
}

#[test]
fn zero_iterations_rejected() {
    assert!(matches!(
        solve_last_step_phases(RATIO, 0),
        Err(CoreError::InvalidIterations(0))
    ));
}

#[test]
fn result_serializes_to_json() {
    let problem = ProblemInstance::new(0.25, 1).unwrap();
    let result = solve(&problem, &SolverConfig::new().with_grid_steps(8)).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["iterations"], 1);
    assert!(json["phi_oracle"].is_number());
    assert!(json["residual_bad_theory"].is_number());
}
