//! OpenQASM 3 emitter.

use crate::circuit::Circuit;
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{ClbitId, QubitId};

/// Emit a circuit as OpenQASM 3 source code.
pub fn emit_qasm3(circuit: &Circuit) -> String {
    let mut emitter = Emitter::new(circuit);
    emitter.emit_circuit();
    emitter.output
}

struct Emitter<'a> {
    circuit: &'a Circuit,
    output: String,
}

impl<'a> Emitter<'a> {
    fn new(circuit: &'a Circuit) -> Self {
        Self {
            circuit,
            output: String::new(),
        }
    }

    fn emit_circuit(&mut self) {
        self.writeln("OPENQASM 3.0;");
        self.writeln("include \"stdgates.inc\";");
        self.writeln("");
        self.writeln(&format!("// {}", self.circuit.name()));

        for reg in self.circuit.qregs() {
            self.writeln(&format!("qubit[{}] {};", reg.size, reg.name));
        }
        for reg in self.circuit.cregs() {
            self.writeln(&format!("bit[{}] {};", reg.size, reg.name));
        }
        self.writeln("");

        for instruction in self.circuit.instructions() {
            self.emit_instruction(instruction);
        }
    }

    fn emit_instruction(&mut self, instruction: &Instruction) {
        let qubits = self.emit_qubits(&instruction.qubits);
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let head = gate_head(gate);
                self.writeln(&format!("{head} {qubits};"));
            }
            InstructionKind::Measure => {
                for (&q, &c) in instruction.qubits.iter().zip(&instruction.clbits) {
                    let line = format!("{} = measure {};", self.clbit(c), self.qubit(q));
                    self.writeln(&line);
                }
            }
            InstructionKind::Barrier => {
                if qubits.is_empty() {
                    self.writeln("barrier;");
                } else {
                    self.writeln(&format!("barrier {qubits};"));
                }
            }
        }
    }

    fn qubit(&self, q: QubitId) -> String {
        self.circuit
            .qubit_slot(q)
            .map_or_else(|| q.to_string(), ToString::to_string)
    }

    fn clbit(&self, c: ClbitId) -> String {
        self.circuit
            .clbit_slot(c)
            .map_or_else(|| c.to_string(), ToString::to_string)
    }

    fn emit_qubits(&self, qubits: &[QubitId]) -> String {
        qubits
            .iter()
            .map(|&q| self.qubit(q))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn writeln(&mut self, s: &str) {
        self.output.push_str(s);
        self.output.push('\n');
    }
}

/// Gate keyword with modifiers and parameters, e.g. `ctrl(3) @ p(0.5)`.
fn gate_head(gate: &StandardGate) -> String {
    match *gate {
        StandardGate::H => "h".into(),
        StandardGate::X => "x".into(),
        StandardGate::CX | StandardGate::MCX { controls: 1 } => "cx".into(),
        StandardGate::MCX { controls: 0 } => "x".into(),
        StandardGate::MCX { controls: 2 } => "ccx".into(),
        StandardGate::MCX { controls } => format!("ctrl({controls}) @ x"),
        StandardGate::MCP { controls: 0, angle } => format!("p({angle})"),
        StandardGate::MCP { controls: 1, angle } => format!("cp({angle})"),
        StandardGate::MCP { controls, angle } => format!("ctrl({controls}) @ p({angle})"),
    }
}
