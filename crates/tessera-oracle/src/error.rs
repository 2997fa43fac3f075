//! Error types for the oracle crate.

use thiserror::Error;

/// Errors produced while describing or evaluating a coherence predicate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OracleError {
    /// Bit-string width is zero or too large to enumerate.
    #[error("bit-string width must be between 1 and {max}, got {width}")]
    InvalidWidth {
        /// Requested width.
        width: u32,
        /// Largest supported width.
        max: u32,
    },

    /// A constraint names a bit position outside the string.
    #[error("bit position {position} is out of range for width {width}")]
    PositionOutOfRange {
        /// The offending position.
        position: u32,
        /// Width of the bit-string.
        width: u32,
    },

    /// An equality group or parity constraint lists no positions.
    #[error("{0} lists no bit positions")]
    EmptyGroup(&'static str),

    /// Block-weight constraint does not tile the string.
    #[error("block size {block_size} with weight {weight} does not fit width {width}")]
    InvalidBlock {
        /// Size of each block.
        block_size: u32,
        /// Required Hamming weight per block.
        weight: u32,
        /// Width of the bit-string.
        width: u32,
    },

    /// A bit-string has the wrong length or a character other than 0/1.
    #[error("invalid bit-string '{value}': expected {width} characters of 0/1")]
    InvalidBitString {
        /// The rejected input.
        value: String,
        /// Expected length.
        width: u32,
    },

    /// No string satisfies the predicate, so amplification has nothing to find.
    #[error("predicate '{0}' marks no states")]
    NoGoodStates(String),

    /// Every string satisfies the predicate.
    #[error("predicate '{0}' marks every state")]
    AllGood(String),

    /// Unknown preset name.
    #[error("unknown preset '{0}' (available: {available})", available = crate::presets::Preset::NAMES.join(", "))]
    UnknownPreset(String),

    /// Schedule could not be built.
    #[error("schedule error: {0}")]
    Core(#[from] tessera_core::CoreError),
}

/// Result type for oracle operations.
pub type OracleResult<T> = Result<T, OracleError>;
