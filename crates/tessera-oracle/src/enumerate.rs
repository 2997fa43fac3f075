//! Exhaustive enumeration of good states and bit-string conversions.
//!
//! Two string orientations are in use:
//!
//! - **physical**: character `i` is qubit `i` (what the predicate is
//!   written against);
//! - **measured**: the order a sampler reports, qubit 0 rightmost. It is the
//!   physical string reversed.

use tracing::debug;

use crate::error::{OracleError, OracleResult};
use crate::spec::OracleSpec;

/// Number of basis states satisfying the predicate.
pub fn count_good(spec: &OracleSpec) -> OracleResult<u64> {
    spec.validate()?;
    let count = (0..spec.num_states()).filter(|&x| spec.is_good(x)).count() as u64;
    debug!(predicate = %spec.name, width = spec.width, good = count, "enumerated good states");
    Ok(count)
}

/// Basis indices satisfying the predicate, ascending.
pub fn good_states(spec: &OracleSpec) -> OracleResult<Vec<u64>> {
    spec.validate()?;
    Ok((0..spec.num_states()).filter(|&x| spec.is_good(x)).collect())
}

/// Good-state ratio `a = M/N`, required to lie strictly inside (0, 1).
pub fn good_ratio(spec: &OracleSpec) -> OracleResult<f64> {
    let good = count_good(spec)?;
    let total = spec.num_states();
    if good == 0 {
        return Err(OracleError::NoGoodStates(spec.name.clone()));
    }
    if good == total {
        return Err(OracleError::AllGood(spec.name.clone()));
    }
    Ok(good as f64 / total as f64)
}

/// Physical-order string of `x`: character `i` is bit `i`.
pub fn to_physical(x: u64, width: u32) -> String {
    (0..width)
        .map(|i| if (x >> i) & 1 == 1 { '1' } else { '0' })
        .collect()
}

/// Measured-order string of `x`: bit 0 is the last character.
pub fn to_measured(x: u64, width: u32) -> String {
    to_physical(x, width).chars().rev().collect()
}

/// Parse a physical-order string into a basis index.
pub fn parse_physical(value: &str, width: u32) -> OracleResult<u64> {
    let invalid = || OracleError::InvalidBitString {
        value: value.to_string(),
        width,
    };
    if value.chars().count() != width as usize {
        return Err(invalid());
    }
    value.chars().enumerate().try_fold(0u64, |x, (i, c)| match c {
        '0' => Ok(x),
        '1' => Ok(x | (1u64 << i)),
        _ => Err(invalid()),
    })
}

/// Parse a measured-order string into a basis index.
pub fn parse_measured(value: &str, width: u32) -> OracleResult<u64> {
    let physical: String = value.chars().rev().collect();
    parse_physical(&physical, width).map_err(|_| OracleError::InvalidBitString {
        value: value.to_string(),
        width,
    })
}

/// Evaluate the predicate on a physical-order string.
pub fn is_good_physical(spec: &OracleSpec, value: &str) -> OracleResult<bool> {
    Ok(spec.is_good(parse_physical(value, spec.width)?))
}

/// Evaluate the predicate on a measured-order string.
pub fn is_good_measured(spec: &OracleSpec, value: &str) -> OracleResult<bool> {
    Ok(spec.is_good(parse_measured(value, spec.width)?))
}
