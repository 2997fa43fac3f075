//! Named predicates over 12-bit strings.
//!
//! The string is read as three 4-bit planes `[0:4]`, `[4:8]`, `[8:12]`.
//! Axis `j` ties together position `j` of every plane: `{j, j+4, j+8}`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OracleError;
use crate::spec::{OracleSpec, Sign};

/// Width of every preset.
pub const PRESET_WIDTH: u32 = 12;

const PLANE: u32 = 4;

/// Built-in coherence predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Every plane has weight 2 and axis 0 is aligned.
    ///
    /// A reduced form of [`Preset::Axes2`] with a larger ratio (54/4096),
    /// useful for short schedules.
    Axis1,
    /// Every plane has weight 2 and axes 0-1 are aligned.
    Axes2,
    /// Every plane has weight 2 and axes 0-2 are aligned.
    Axes3,
    /// All four axes aligned, odd parity over the first plane.
    Axes4Plus,
    /// All four axes aligned, even parity over the first plane.
    Axes4Minus,
}

impl Preset {
    /// Every preset, in declaration order.
    pub const ALL: [Preset; 5] = [
        Preset::Axis1,
        Preset::Axes2,
        Preset::Axes3,
        Preset::Axes4Plus,
        Preset::Axes4Minus,
    ];

    /// Command-line names, matching [`Preset::ALL`].
    pub const NAMES: [&'static str; 5] = ["axis1", "axes2", "axes3", "axes4-plus", "axes4-minus"];

    /// Command-line name.
    pub fn name(self) -> &'static str {
        match self {
            Preset::Axis1 => Self::NAMES[0],
            Preset::Axes2 => Self::NAMES[1],
            Preset::Axes3 => Self::NAMES[2],
            Preset::Axes4Plus => Self::NAMES[3],
            Preset::Axes4Minus => Self::NAMES[4],
        }
    }

    /// The predicate description.
    pub fn spec(self) -> OracleSpec {
        match self {
            Preset::Axis1 => weighted_axes(self.name(), 1),
            Preset::Axes2 => weighted_axes(self.name(), 2),
            Preset::Axes3 => weighted_axes(self.name(), 3),
            Preset::Axes4Plus => signed_axes(self.name(), Sign::Plus),
            Preset::Axes4Minus => signed_axes(self.name(), Sign::Minus),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = OracleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Preset::ALL
            .into_iter()
            .find(|p| p.name() == lower)
            .ok_or_else(|| OracleError::UnknownPreset(s.to_string()))
    }
}

/// Positions `{j, j+4, j+8}` of axis `j`.
pub fn axis(j: u32) -> [u32; 3] {
    [j, j + PLANE, j + 2 * PLANE]
}

fn weighted_axes(name: &str, axes: u32) -> OracleSpec {
    (0..axes).fold(
        OracleSpec::new(name, PRESET_WIDTH).with_block_weight(PLANE, 2),
        |spec, j| spec.with_equal_group(axis(j)),
    )
}

fn signed_axes(name: &str, sign: Sign) -> OracleSpec {
    (0..PLANE)
        .fold(OracleSpec::new(name, PRESET_WIDTH), |spec, j| {
            spec.with_equal_group(axis(j))
        })
        .with_parity(0..PLANE, sign)
}
