//! Declarative description of a coherence predicate.
//!
//! A predicate over `width`-bit strings is the conjunction of:
//!
//! - **equality groups**: every listed position carries the same bit
//!   (an "axis" such as `{0, 4, 8}`);
//! - an optional **block weight**: each contiguous block of `block_size`
//!   bits has Hamming weight exactly `weight`;
//! - an optional **parity** constraint: the XOR of the listed positions
//!   equals the value selected by [`Sign`].
//!
//! Position `i` is bit `i` of the basis index, i.e. qubit `i`.

use std::fmt;

use serde::{Deserialize, Serialize};
use tessera_core::ProblemInstance;

use crate::enumerate;
use crate::error::{OracleError, OracleResult};

/// Largest width the enumerator and simulator accept.
pub const MAX_WIDTH: u32 = 20;

/// Which parity the global constraint requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    /// Odd parity: XOR of the positions is 1.
    Plus,
    /// Even parity: XOR of the positions is 0.
    Minus,
}

impl Sign {
    /// Required XOR value.
    pub fn parity_bit(self) -> u32 {
        match self {
            Sign::Plus => 1,
            Sign::Minus => 0,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sign::Plus => write!(f, "+"),
            Sign::Minus => write!(f, "-"),
        }
    }
}

/// Every block of `block_size` consecutive bits must have `weight` ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockWeight {
    /// Bits per block; must divide the width.
    pub block_size: u32,
    /// Required Hamming weight of each block.
    pub weight: u32,
}

/// XOR of `positions` must equal `sign.parity_bit()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParityConstraint {
    /// Positions entering the XOR.
    pub positions: Vec<u32>,
    /// Required parity.
    pub sign: Sign,
}

/// A coherence predicate over fixed-width bit-strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleSpec {
    /// Human-readable name.
    pub name: String,
    /// Number of bits.
    pub width: u32,
    /// Groups of positions that must be pairwise equal.
    #[serde(default)]
    pub equal_groups: Vec<Vec<u32>>,
    /// Optional per-block Hamming-weight constraint.
    #[serde(default)]
    pub block_weight: Option<BlockWeight>,
    /// Optional global-parity constraint.
    #[serde(default)]
    pub parity: Option<ParityConstraint>,
}

impl OracleSpec {
    /// A predicate with no constraints (every string is good).
    pub fn new(name: impl Into<String>, width: u32) -> Self {
        Self {
            name: name.into(),
            width,
            equal_groups: vec![],
            block_weight: None,
            parity: None,
        }
    }

    /// Require the given positions to be equal.
    #[must_use]
    pub fn with_equal_group(mut self, positions: impl IntoIterator<Item = u32>) -> Self {
        self.equal_groups.push(positions.into_iter().collect());
        self
    }

    /// Require each `block_size`-bit block to have Hamming weight `weight`.
    #[must_use]
    pub fn with_block_weight(mut self, block_size: u32, weight: u32) -> Self {
        self.block_weight = Some(BlockWeight { block_size, weight });
        self
    }

    /// Require the XOR of `positions` to match `sign`.
    #[must_use]
    pub fn with_parity(mut self, positions: impl IntoIterator<Item = u32>, sign: Sign) -> Self {
        self.parity = Some(ParityConstraint {
            positions: positions.into_iter().collect(),
            sign,
        });
        self
    }

    /// Number of basis states, `2^width`.
    pub fn num_states(&self) -> u64 {
        1u64 << self.width
    }

    /// Number of contiguous blocks under the block-weight constraint.
    pub fn num_blocks(&self) -> u32 {
        self.block_weight
            .map_or(0, |b| self.width / b.block_size.max(1))
    }

    /// Check that the description is well formed.
    pub fn validate(&self) -> OracleResult<()> {
        if self.width == 0 || self.width > MAX_WIDTH {
            return Err(OracleError::InvalidWidth {
                width: self.width,
                max: MAX_WIDTH,
            });
        }
        for group in &self.equal_groups {
            if group.is_empty() {
                return Err(OracleError::EmptyGroup("equality group"));
            }
            self.check_positions(group)?;
        }
        if let Some(BlockWeight { block_size, weight }) = self.block_weight {
            if block_size == 0 || self.width % block_size != 0 || weight > block_size {
                return Err(OracleError::InvalidBlock {
                    block_size,
                    weight,
                    width: self.width,
                });
            }
        }
        if let Some(parity) = &self.parity {
            if parity.positions.is_empty() {
                return Err(OracleError::EmptyGroup("parity constraint"));
            }
            self.check_positions(&parity.positions)?;
        }
        Ok(())
    }

    fn check_positions(&self, positions: &[u32]) -> OracleResult<()> {
        match positions.iter().find(|&&p| p >= self.width) {
            Some(&position) => Err(OracleError::PositionOutOfRange {
                position,
                width: self.width,
            }),
            None => Ok(()),
        }
    }

    /// Evaluate the predicate on basis index `x`.
    ///
    /// Assumes a validated description.
    pub fn is_good(&self, x: u64) -> bool {
        let groups_ok = self.equal_groups.iter().all(|group| {
            let mask = position_mask(group);
            let bits = x & mask;
            bits == 0 || bits == mask
        });
        if !groups_ok {
            return false;
        }

        if let Some(BlockWeight { block_size, weight }) = self.block_weight {
            let block_mask = (1u64 << block_size) - 1;
            let blocks_ok = (0..self.num_blocks())
                .all(|b| ((x >> (b * block_size)) & block_mask).count_ones() == weight);
            if !blocks_ok {
                return false;
            }
        }

        match &self.parity {
            Some(parity) => {
                (x & position_mask(&parity.positions)).count_ones() % 2 == parity.sign.parity_bit()
            }
            None => true,
        }
    }

    /// Good-state ratio `M/N` as a validated problem with `iterations`
    /// rounds.
    pub fn problem(&self, iterations: usize) -> OracleResult<ProblemInstance> {
        let ratio = enumerate::good_ratio(self)?;
        Ok(ProblemInstance::new(ratio, iterations)?)
    }
}

impl fmt::Display for OracleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bits", self.name, self.width)?;
        for group in &self.equal_groups {
            let list: Vec<_> = group.iter().map(|p| format!("q{p}")).collect();
            write!(f, ", {}", list.join("=="))?;
        }
        if let Some(b) = self.block_weight {
            write!(f, ", wt{}={}", b.block_size, b.weight)?;
        }
        if let Some(p) = &self.parity {
            let list: Vec<_> = p.positions.iter().map(|q| format!("q{q}")).collect();
            write!(f, ", XOR({})={}", list.join(","), p.sign.parity_bit())?;
        }
        write!(f, ")")
    }
}

/// Bit mask with every listed position set.
pub fn position_mask(positions: &[u32]) -> u64 {
    positions.iter().fold(0u64, |mask, &p| mask | (1u64 << p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_group() {
        let spec = OracleSpec::new("eq", 3).with_equal_group([0, 2]);
        assert!(spec.is_good(0b000));
        assert!(spec.is_good(0b101));
        assert!(spec.is_good(0b010));
        assert!(!spec.is_good(0b001));
        assert!(!spec.is_good(0b100));
    }

    #[test]
    fn test_block_weight() {
        let spec = OracleSpec::new("wt", 4).with_block_weight(2, 1);
        assert!(spec.is_good(0b0101));
        assert!(spec.is_good(0b1010));
        assert!(!spec.is_good(0b0011));
        assert!(!spec.is_good(0b0000));
    }

    #[test]
    fn test_parity() {
        let plus = OracleSpec::new("p", 2).with_parity([0, 1], Sign::Plus);
        let minus = OracleSpec::new("m", 2).with_parity([0, 1], Sign::Minus);
        for x in 0..4u64 {
            assert_ne!(plus.is_good(x), minus.is_good(x));
        }
        assert!(plus.is_good(0b01));
        assert!(minus.is_good(0b11));
    }

    #[test]
    fn test_validation_errors() {
        assert!(matches!(
            OracleSpec::new("w", 0).validate(),
            Err(OracleError::InvalidWidth { .. })
        ));
        assert!(matches!(
            OracleSpec::new("w", 64).validate(),
            Err(OracleError::InvalidWidth { .. })
        ));
        assert!(matches!(
            OracleSpec::new("g", 4).with_equal_group([0, 4]).validate(),
            Err(OracleError::PositionOutOfRange { position: 4, .. })
        ));
        assert!(matches!(
            OracleSpec::new("g", 4).with_equal_group([]).validate(),
            Err(OracleError::EmptyGroup(_))
        ));
        assert!(matches!(
            OracleSpec::new("b", 6).with_block_weight(4, 2).validate(),
            Err(OracleError::InvalidBlock { .. })
        ));
        assert!(matches!(
            OracleSpec::new("p", 4).with_parity([], Sign::Plus).validate(),
            Err(OracleError::EmptyGroup(_))
        ));
    }

    #[test]
    fn test_display() {
        let spec = OracleSpec::new("demo", 4)
            .with_equal_group([0, 2])
            .with_parity([0, 1], Sign::Minus);
        assert_eq!(spec.to_string(), "demo (4 bits, q0==q2, XOR(q0,q1)=0)");
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{ "name": "bare", "width": 3 }"#;
        let spec: OracleSpec = serde_json::from_str(json).unwrap();
        assert!(spec.equal_groups.is_empty());
        assert!(spec.parity.is_none());
        assert_eq!(spec.num_states(), 8);
    }
}
