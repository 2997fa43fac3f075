//! Gate set used by the lowering.
//!
//! Multi-controlled gates list their controls first and the target last.

use serde::{Deserialize, Serialize};

/// Standard gates with known semantics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Controlled-X (CNOT) gate.
    CX,
    /// X on the target when every control is `|1⟩`.
    MCX {
        /// Number of controls.
        controls: u32,
    },
    /// Phase `e^{iθ}` when every control and the target are `|1⟩`.
    ///
    /// With no controls this is the single-qubit phase gate.
    MCP {
        /// Number of controls.
        controls: u32,
        /// Phase angle in radians.
        angle: f64,
    },
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::H => "h",
            StandardGate::X => "x",
            StandardGate::CX => "cx",
            StandardGate::MCX { .. } => "mcx",
            StandardGate::MCP { .. } => "mcp",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::H | StandardGate::X => 1,
            StandardGate::CX => 2,
            StandardGate::MCX { controls } | StandardGate::MCP { controls, .. } => controls + 1,
        }
    }

    /// Phase angle, for parameterized gates.
    pub fn angle(&self) -> Option<f64> {
        match self {
            StandardGate::MCP { angle, .. } => Some(*angle),
            _ => None,
        }
    }

    /// Whether applying the gate twice is the identity.
    pub fn is_self_inverse(&self) -> bool {
        !matches!(self, StandardGate::MCP { .. })
    }
}
