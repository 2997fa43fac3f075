//! `tessera-circuit`: gate-level lowering of fixed-length amplitude
//! amplification.
//!
//! A predicate from `tessera-oracle` and a [`PhaseSchedule`] from
//! `tessera-core` are lowered by [`GroverCircuitBuilder`] into a
//! [`Circuit`]: a validated instruction list over named registers using a
//! small gate set (`h`, `x`, `cx`, multi-controlled `x` and phase). The
//! result can be written out as OpenQASM 3 with [`emit_qasm3`].
//!
//! # Example
//!
//! ```rust
//! use tessera_circuit::{GroverCircuitBuilder, emit_qasm3};
//! use tessera_core::PhaseSchedule;
//! use tessera_oracle::Preset;
//!
//! let builder = GroverCircuitBuilder::new(
//!     Preset::Axes4Plus.spec(),
//!     PhaseSchedule::canonical(2).unwrap(),
//! );
//! let circuit = builder.build().unwrap();
//! let qasm = emit_qasm3(&circuit);
//!
//! assert!(qasm.starts_with("OPENQASM 3.0;"));
//! assert!(qasm.contains("c[11] = measure q[11];"));
//! ```
//!
//! [`PhaseSchedule`]: tessera_core::PhaseSchedule

pub mod builder;
pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qasm;
pub mod qubit;

pub use builder::{GroverCircuitBuilder, OracleLayout};
pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qasm::emit_qasm3;
pub use qubit::{ClbitId, QubitId, Register, RegisterSlot};
