//! Lowering of a predicate and a phase schedule to gates.
//!
//! Register layout:
//!
//! - `q`: the data bits, qubit `i` is predicate position `i`;
//! - `anc`: XOR ancillas, `len − 1` per equality group;
//! - `flag`: one per equality group, then one per weight block;
//! - `par`: the parity ancilla, when a parity constraint is present;
//! - `ph`: the phase qubit, held in `|1⟩`.
//!
//! A round computes every flag, kicks `e^{iφ_o}` onto the phase qubit when
//! all flags are set, uncomputes the flags, then applies the phased
//! diffusion `H X MCP(φ_d) X H` on the data register.

use tessera_core::{PhasePair, PhaseSchedule};
use tessera_oracle::{OracleSpec, Sign};
use tracing::debug;

use crate::circuit::Circuit;
use crate::error::IrResult;
use crate::gate::StandardGate;
use crate::instruction::Instruction;
use crate::qubit::{ClbitId, QubitId};

/// Qubits allocated for the predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleLayout {
    /// Data register.
    pub data: Vec<QubitId>,
    /// XOR ancillas.
    pub ancillas: Vec<QubitId>,
    /// Flag qubits, equality groups first.
    pub flags: Vec<QubitId>,
    /// Parity ancilla.
    pub parity: Option<QubitId>,
    /// Phase qubit.
    pub phase: QubitId,
    /// Classical bits receiving the data register.
    pub clbits: Vec<ClbitId>,
}

impl OracleLayout {
    /// Qubits that must all be `|1⟩` for the oracle phase to fire.
    pub fn phase_controls(&self) -> Vec<QubitId> {
        self.flags.iter().copied().chain(self.parity).collect()
    }
}

/// Builds the complete fixed-length circuit for a predicate.
#[derive(Debug, Clone)]
pub struct GroverCircuitBuilder {
    spec: OracleSpec,
    schedule: PhaseSchedule,
    measure: bool,
    barriers: bool,
}

impl GroverCircuitBuilder {
    /// Builder for `spec` under `schedule`. Measurement on, barriers off.
    pub fn new(spec: OracleSpec, schedule: PhaseSchedule) -> Self {
        Self {
            spec,
            schedule,
            measure: true,
            barriers: false,
        }
    }

    /// Measure the data register into `c` at the end.
    #[must_use]
    pub fn with_measurement(mut self, measure: bool) -> Self {
        self.measure = measure;
        self
    }

    /// Separate rounds with barriers.
    #[must_use]
    pub fn with_barriers(mut self, barriers: bool) -> Self {
        self.barriers = barriers;
        self
    }

    /// Lower to a circuit.
    pub fn build(&self) -> IrResult<Circuit> {
        Ok(self.build_with_layout()?.0)
    }

    /// Lower to a circuit, also returning where each role was allocated.
    pub fn build_with_layout(&self) -> IrResult<(Circuit, OracleLayout)> {
        self.spec.validate()?;

        let groups = self.equality_groups();
        let mut circuit = Circuit::new(format!("tessera_{}", self.spec.name));
        let layout = self.allocate(&mut circuit, &groups);
        let compute = self.flag_computation(&layout, &groups);

        circuit.each(StandardGate::H, &layout.data)?;
        circuit.x(layout.phase)?;

        for phases in self.schedule.iter() {
            self.round(&mut circuit, &layout, &compute, phases)?;
            if self.barriers {
                circuit.barrier((0..circuit.num_qubits() as u32).map(QubitId))?;
            }
        }

        if self.measure {
            for (&q, &c) in layout.data.iter().zip(&layout.clbits) {
                circuit.measure(q, c)?;
            }
        }

        debug!(
            circuit = circuit.name(),
            qubits = circuit.num_qubits(),
            instructions = circuit.instructions().len(),
            rounds = self.schedule.rounds(),
            "lowered phase schedule"
        );
        Ok((circuit, layout))
    }

    /// Equality groups with at least two distinct positions.
    fn equality_groups(&self) -> Vec<Vec<u32>> {
        self.spec
            .equal_groups
            .iter()
            .map(|g| distinct(g))
            .filter(|g| g.len() > 1)
            .collect()
    }

    fn allocate(&self, circuit: &mut Circuit, groups: &[Vec<u32>]) -> OracleLayout {
        let width = self.spec.width;
        let num_ancillas: usize = groups.iter().map(|g| g.len() - 1).sum();
        let num_flags = groups.len() as u32 + self.spec.num_blocks();

        let data = circuit.add_qreg("q", width);
        let ancillas = circuit.add_qreg("anc", num_ancillas as u32);
        let flags = circuit.add_qreg("flag", num_flags);
        let parity = circuit
            .add_qreg("par", u32::from(self.spec.parity.is_some()))
            .first()
            .copied();
        let phase = circuit.add_qreg("ph", 1)[0];
        let clbits = circuit.add_creg("c", width);

        OracleLayout {
            data,
            ancillas,
            flags,
            parity,
            phase,
            clbits,
        }
    }

    /// Self-inverse gate sequence setting every flag; reversed it uncomputes.
    fn flag_computation(&self, layout: &OracleLayout, groups: &[Vec<u32>]) -> Vec<Instruction> {
        let mut ops = Vec::new();
        let q = |p: u32| layout.data[p as usize];
        let mut ancillas = layout.ancillas.iter().copied();
        let mut flags = layout.flags.iter().copied();

        for group in groups {
            let anchor = q(group[0]);
            let xors: Vec<QubitId> = group[1..]
                .iter()
                .zip(ancillas.by_ref())
                .map(|(&p, anc)| {
                    ops.push(Instruction::gate(StandardGate::CX, [anchor, anc]));
                    ops.push(Instruction::gate(StandardGate::CX, [q(p), anc]));
                    anc
                })
                .collect();
            if let Some(flag) = flags.next() {
                // Flag is set when every XOR is zero.
                push_each(&mut ops, StandardGate::X, &xors);
                ops.push(mcx(&xors, flag));
                push_each(&mut ops, StandardGate::X, &xors);
            }
        }

        if let Some(block) = self.spec.block_weight {
            for b in 0..self.spec.num_blocks() {
                let Some(flag) = flags.next() else { break };
                let start = (b * block.block_size) as usize;
                let wires = &layout.data[start..start + block.block_size as usize];
                for pattern in (0u64..1 << block.block_size).filter(|x| x.count_ones() == block.weight)
                {
                    let zeros: Vec<QubitId> = wires
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| (pattern >> i) & 1 == 0)
                        .map(|(_, &w)| w)
                        .collect();
                    push_each(&mut ops, StandardGate::X, &zeros);
                    ops.push(mcx(wires, flag));
                    push_each(&mut ops, StandardGate::X, &zeros);
                }
            }
        }

        if let (Some(parity), Some(target)) = (&self.spec.parity, layout.parity) {
            for p in distinct(&parity.positions) {
                ops.push(Instruction::gate(StandardGate::CX, [q(p), target]));
            }
            if parity.sign == Sign::Minus {
                ops.push(Instruction::single_qubit_gate(StandardGate::X, target));
            }
        }

        ops
    }

    fn round(
        &self,
        circuit: &mut Circuit,
        layout: &OracleLayout,
        compute: &[Instruction],
        phases: PhasePair,
    ) -> IrResult<()> {
        circuit.extend(compute.iter().cloned())?;
        circuit.mcp(phases.oracle, &layout.phase_controls(), layout.phase)?;
        circuit.extend(compute.iter().rev().cloned())?;

        let (target, controls) = layout
            .data
            .split_last()
            .map_or((layout.phase, &[][..]), |(t, c)| (*t, c));
        circuit.each(StandardGate::H, &layout.data)?;
        circuit.each(StandardGate::X, &layout.data)?;
        circuit.mcp(phases.diffusion, controls, target)?;
        circuit.each(StandardGate::X, &layout.data)?;
        circuit.each(StandardGate::H, &layout.data)?;
        Ok(())
    }
}

fn distinct(positions: &[u32]) -> Vec<u32> {
    let mut out = positions.to_vec();
    out.sort_unstable();
    out.dedup();
    out
}

fn push_each(ops: &mut Vec<Instruction>, gate: StandardGate, qubits: &[QubitId]) {
    ops.extend(qubits.iter().map(|&q| Instruction::single_qubit_gate(gate, q)));
}

fn mcx(controls: &[QubitId], target: QubitId) -> Instruction {
    match controls {
        [] => Instruction::single_qubit_gate(StandardGate::X, target),
        [c] => Instruction::gate(StandardGate::CX, [*c, target]),
        _ => Instruction::controlled(
            StandardGate::MCX {
                controls: controls.len() as u32,
            },
            controls,
            target,
        ),
    }
}
