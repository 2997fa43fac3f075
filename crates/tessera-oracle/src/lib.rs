//! `tessera-oracle`: coherence predicates for amplitude amplification.
//!
//! The predicate partitioning bit-strings into good and bad states is
//! described declaratively by an [`OracleSpec`]: which positions must be
//! equal, an optional per-block Hamming weight, and an optional global
//! parity. The same description drives:
//!
//! - exhaustive enumeration of the good states and the ratio `a = M/N`
//!   consumed by `tessera-core`;
//! - the exact [`StateVectorSimulator`] used to cross-check the
//!   two-dimensional model;
//! - circuit lowering in `tessera-circuit`.
//!
//! # Example
//!
//! ```rust
//! use tessera_oracle::{Preset, count_good, good_ratio};
//!
//! let spec = Preset::Axes4Plus.spec();
//! assert_eq!(count_good(&spec).unwrap(), 8);
//! assert_eq!(good_ratio(&spec).unwrap(), 8.0 / 4096.0);
//! ```

pub mod enumerate;
pub mod error;
pub mod presets;
pub mod spec;
pub mod statevector;

pub use enumerate::{
    count_good, good_ratio, good_states, is_good_measured, is_good_physical, parse_measured,
    parse_physical, to_measured, to_physical,
};
pub use error::{OracleError, OracleResult};
pub use presets::{PRESET_WIDTH, Preset, axis};
pub use spec::{BlockWeight, MAX_WIDTH, OracleSpec, ParityConstraint, Sign, position_mask};
pub use statevector::{SimulationReport, StateVectorSimulator};
