//! Executes lowered circuits on a small reference simulator and checks them
//! against the exact predicate-level simulation.

use num_complex::Complex64;
use proptest::prelude::*;
use tessera_circuit::{Circuit, GroverCircuitBuilder, InstructionKind, StandardGate};
use tessera_core::{PhasePair, PhaseSchedule, solve_last_step_phases};
use tessera_oracle::{OracleSpec, Sign, StateVectorSimulator, good_ratio};

/// Dense simulation of every gate; measurements and barriers are skipped.
fn execute(circuit: &Circuit) -> Vec<Complex64> {
    let n = circuit.num_qubits();
    let mut state = vec![Complex64::new(0.0, 0.0); 1 << n];
    state[0] = Complex64::new(1.0, 0.0);
    let h = std::f64::consts::FRAC_1_SQRT_2;

    for inst in circuit.instructions() {
        let InstructionKind::Gate(gate) = &inst.kind else {
            continue;
        };
        let qubits: Vec<usize> = inst.qubits.iter().map(|q| q.0 as usize).collect();
        let (&target, controls) = qubits.split_last().unwrap();
        let control_mask: usize = controls.iter().map(|&c| 1 << c).sum();
        let t = 1usize << target;

        match gate {
            StandardGate::H => {
                for i in (0..state.len()).filter(|i| i & t == 0) {
                    let (a, b) = (state[i], state[i | t]);
                    state[i] = (a + b) * h;
                    state[i | t] = (a - b) * h;
                }
            }
            StandardGate::X | StandardGate::CX | StandardGate::MCX { .. } => {
                for i in (0..state.len()).filter(|i| i & t == 0 && i & control_mask == control_mask)
                {
                    state.swap(i, i | t);
                }
            }
            StandardGate::MCP { angle, .. } => {
                let phase = Complex64::from_polar(1.0, *angle);
                let mask = control_mask | t;
                for (i, amp) in state.iter_mut().enumerate() {
                    if i & mask == mask {
                        *amp *= phase;
                    }
                }
            }
        }
    }
    state
}

/// Probability of a good data register with every helper qubit restored.
fn lowered_success(spec: &OracleSpec, schedule: PhaseSchedule) -> (f64, f64) {
    let (circuit, layout) = GroverCircuitBuilder::new(spec.clone(), schedule)
        .with_measurement(false)
        .build_with_layout()
        .unwrap();
    let state = execute(&circuit);

    let data_mask = (1usize << spec.width) - 1;
    let clean = 1usize << layout.phase.0;
    let mut p_good = 0.0;
    let mut p_clean = 0.0;
    for (i, amp) in state.iter().enumerate() {
        if i & !data_mask == clean {
            p_clean += amp.norm_sqr();
            if spec.is_good((i & data_mask) as u64) {
                p_good += amp.norm_sqr();
            }
        }
    }
    (p_good, p_clean)
}

fn exact_success(spec: &OracleSpec, schedule: &PhaseSchedule) -> f64 {
    StateVectorSimulator::new(spec).unwrap().run(schedule).p_good
}

fn mixed_spec() -> OracleSpec {
    OracleSpec::new("mixed", 4)
        .with_equal_group([0, 2])
        .with_block_weight(4, 2)
        .with_parity([0, 1], Sign::Plus)
}

fn triple_spec() -> OracleSpec {
    OracleSpec::new("triple", 3)
        .with_equal_group([0, 1, 2])
        .with_parity([0], Sign::Plus)
}

#[test]
fn test_canonical_rounds_match_exact_simulation() {
    for spec in [mixed_spec(), triple_spec()] {
        for k in 1..=3 {
            let schedule = PhaseSchedule::canonical(k).unwrap();
            let (p_good, p_clean) = lowered_success(&spec, schedule);
            assert!((p_clean - 1.0).abs() < 1e-9, "{} k={k}", spec.name);
            assert!((p_good - exact_success(&spec, &schedule)).abs() < 1e-9);
        }
    }
}

#[test]
fn test_solved_schedule_reaches_certainty() {
    let spec = mixed_spec();
    let ratio = good_ratio(&spec).unwrap();
    assert_eq!(ratio, 2.0 / 16.0);

    let result = solve_last_step_phases(ratio, 3).unwrap();
    let (p_good, _) = lowered_success(&spec, result.schedule().unwrap());
    assert!((p_good - result.p_good_theory).abs() < 1e-9);
    assert!(p_good > 1.0 - 1e-6);
}

#[test]
fn test_minus_parity_lowering() {
    let spec = OracleSpec::new("even", 3)
        .with_block_weight(3, 2)
        .with_parity([0, 1, 2], Sign::Minus);
    let schedule = PhaseSchedule::new(2, PhasePair::new(0.7, 2.1)).unwrap();
    let (p_good, p_clean) = lowered_success(&spec, schedule);
    assert!((p_clean - 1.0).abs() < 1e-9);
    assert!((p_good - exact_success(&spec, &schedule)).abs() < 1e-9);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_arbitrary_last_phases_match(
        oracle in 0.0..std::f64::consts::TAU,
        diffusion in 0.0..std::f64::consts::TAU,
        rounds in 1usize..3,
    ) {
        let spec = triple_spec();
        let schedule = PhaseSchedule::new(rounds, PhasePair::new(oracle, diffusion)).unwrap();
        let (p_good, p_clean) = lowered_success(&spec, schedule);
        prop_assert!((p_clean - 1.0).abs() < 1e-9);
        prop_assert!((p_good - exact_success(&spec, &schedule)).abs() < 1e-9);
    }
}
