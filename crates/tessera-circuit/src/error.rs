//! Error types for the circuit crate.

use thiserror::Error;

use crate::qubit::{ClbitId, QubitId};

/// Errors that can occur while building or lowering circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit not found in circuit.
    #[error("Qubit {qubit} not found in circuit (gate: {gate_name})")]
    QubitNotFound {
        /// The qubit that was not found.
        qubit: QubitId,
        /// Gate being applied.
        gate_name: &'static str,
    },

    /// Classical bit not found in circuit.
    #[error("Classical bit {clbit} not found in circuit")]
    ClbitNotFound {
        /// The classical bit that was not found.
        clbit: ClbitId,
    },

    /// Gate requires different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: &'static str,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Measurement operands do not pair up.
    #[error("Measurement of {qubits} qubits into {clbits} classical bits")]
    MeasureMismatch {
        /// Qubit operands.
        qubits: usize,
        /// Classical operands.
        clbits: usize,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in operation (gate: {gate_name})")]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Gate being applied.
        gate_name: &'static str,
    },

    /// The predicate could not be lowered.
    #[error(transparent)]
    Oracle(#[from] tessera_oracle::OracleError),
}

/// Result type for circuit operations.
pub type IrResult<T> = Result<T, IrError>;
