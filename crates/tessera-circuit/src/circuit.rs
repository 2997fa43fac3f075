//! Instruction-list circuit with a fluent builder API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{ClbitId, QubitId, Register, RegisterSlot};

/// A quantum circuit.
///
/// Qubits and classical bits are allocated in named registers; ids are
/// assigned in allocation order. Every applied instruction is validated
/// against the allocated bits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    name: String,
    qubits: Vec<RegisterSlot>,
    clbits: Vec<RegisterSlot>,
    qregs: Vec<Register>,
    cregs: Vec<Register>,
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            clbits: vec![],
            qregs: vec![],
            cregs: vec![],
            instructions: vec![],
        }
    }

    /// Add a quantum register. An empty register is not declared.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> Vec<QubitId> {
        let name = name.into();
        let start = self.qubits.len() as u32;
        if size > 0 {
            self.qregs.push(Register {
                name: name.clone(),
                size,
            });
        }
        (0..size)
            .map(|i| {
                self.qubits.push(RegisterSlot::new(&name, i));
                QubitId(start + i)
            })
            .collect()
    }

    /// Add a classical register. An empty register is not declared.
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> Vec<ClbitId> {
        let name = name.into();
        let start = self.clbits.len() as u32;
        if size > 0 {
            self.cregs.push(Register {
                name: name.clone(),
                size,
            });
        }
        (0..size)
            .map(|i| {
                self.clbits.push(RegisterSlot::new(&name, i));
                ClbitId(start + i)
            })
            .collect()
    }

    /// Validate and append an instruction.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.check(&instruction)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    /// Append several instructions.
    pub fn extend(
        &mut self,
        instructions: impl IntoIterator<Item = Instruction>,
    ) -> IrResult<&mut Self> {
        for instruction in instructions {
            self.apply(instruction)?;
        }
        Ok(self)
    }

    fn check(&self, instruction: &Instruction) -> IrResult<()> {
        let gate_name = instruction.name();
        if let InstructionKind::Gate(gate) = &instruction.kind {
            let got = instruction.qubits.len() as u32;
            if got != gate.num_qubits() {
                return Err(IrError::QubitCountMismatch {
                    gate_name,
                    expected: gate.num_qubits(),
                    got,
                });
            }
        }
        if matches!(instruction.kind, InstructionKind::Measure)
            && instruction.qubits.len() != instruction.clbits.len()
        {
            return Err(IrError::MeasureMismatch {
                qubits: instruction.qubits.len(),
                clbits: instruction.clbits.len(),
            });
        }

        let mut seen = vec![false; self.qubits.len()];
        for &qubit in &instruction.qubits {
            let slot = seen
                .get_mut(qubit.0 as usize)
                .ok_or(IrError::QubitNotFound { qubit, gate_name })?;
            if *slot {
                return Err(IrError::DuplicateQubit { qubit, gate_name });
            }
            *slot = true;
        }
        if let Some(&clbit) = instruction
            .clbits
            .iter()
            .find(|c| c.0 as usize >= self.clbits.len())
        {
            return Err(IrError::ClbitNotFound { clbit });
        }
        Ok(())
    }

    // =========================================================================
    // Gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::H, qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::X, qubit))
    }

    /// Apply CNOT gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::CX, [control, target]))
    }

    /// Apply multi-controlled X. Falls back to `x`/`cx` for fewer than two
    /// controls.
    pub fn mcx(&mut self, controls: &[QubitId], target: QubitId) -> IrResult<&mut Self> {
        match controls {
            [] => self.x(target),
            [control] => self.cx(*control, target),
            _ => self.apply(Instruction::controlled(
                StandardGate::MCX {
                    controls: controls.len() as u32,
                },
                controls,
                target,
            )),
        }
    }

    /// Apply multi-controlled phase.
    pub fn mcp(&mut self, angle: f64, controls: &[QubitId], target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::controlled(
            StandardGate::MCP {
                controls: controls.len() as u32,
                angle,
            },
            controls,
            target,
        ))
    }

    /// Apply `gate` to each qubit in turn.
    pub fn each(&mut self, gate: StandardGate, qubits: &[QubitId]) -> IrResult<&mut Self> {
        for &q in qubits {
            self.apply(Instruction::single_qubit_gate(gate, q))?;
        }
        Ok(self)
    }

    /// Measure a qubit into a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.apply(Instruction::measure(qubit, clbit))
    }

    /// Add a barrier.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.apply(Instruction::barrier(qubits))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.clbits.len()
    }

    /// Quantum registers in declaration order.
    pub fn qregs(&self) -> &[Register] {
        &self.qregs
    }

    /// Classical registers in declaration order.
    pub fn cregs(&self) -> &[Register] {
        &self.cregs
    }

    /// Register slot of a qubit.
    pub fn qubit_slot(&self, qubit: QubitId) -> Option<&RegisterSlot> {
        self.qubits.get(qubit.0 as usize)
    }

    /// Register slot of a classical bit.
    pub fn clbit_slot(&self, clbit: ClbitId) -> Option<&RegisterSlot> {
        self.clbits.get(clbit.0 as usize)
    }

    /// Instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Longest chain of non-barrier instructions sharing a qubit or bit.
    pub fn depth(&self) -> usize {
        let mut qubit_level = vec![0usize; self.qubits.len()];
        let mut clbit_level = vec![0usize; self.clbits.len()];
        let mut max_depth = 0;

        for inst in &self.instructions {
            let before = inst
                .qubits
                .iter()
                .map(|q| qubit_level[q.0 as usize])
                .chain(inst.clbits.iter().map(|c| clbit_level[c.0 as usize]))
                .max()
                .unwrap_or(0);
            let level = if inst.is_barrier() { before } else { before + 1 };
            for q in &inst.qubits {
                qubit_level[q.0 as usize] = level;
            }
            for c in &inst.clbits {
                clbit_level[c.0 as usize] = level;
            }
            max_depth = max_depth.max(level);
        }

        max_depth
    }

    /// Number of instructions per operation name, barriers excluded.
    pub fn gate_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for inst in self.instructions.iter().filter(|i| !i.is_barrier()) {
            *counts.entry(inst.name()).or_insert(0) += 1;
        }
        counts
    }
}
