//! Amplitudes on the good/bad plane.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// A state restricted to the two-dimensional good/bad subspace.
///
/// `good` is the amplitude along the normalized uniform superposition of
/// marked states, `bad` along its orthogonal complement. Vectors are values:
/// every transformation returns a new one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmplitudeVector {
    good: Complex64,
    bad: Complex64,
}

impl AmplitudeVector {
    /// Create a vector from its two components.
    pub fn new(good: Complex64, bad: Complex64) -> Self {
        Self { good, bad }
    }

    /// The uniform superposition `(√a, √(1−a))` for good-state ratio `a`.
    pub fn initial(ratio: f64) -> Self {
        Self {
            good: Complex64::new(ratio.sqrt(), 0.0),
            bad: Complex64::new((1.0 - ratio).sqrt(), 0.0),
        }
    }

    /// Amplitude on the good subspace.
    pub fn good(&self) -> Complex64 {
        self.good
    }

    /// Amplitude on the bad subspace.
    pub fn bad(&self) -> Complex64 {
        self.bad
    }

    /// Probability of measuring a good state, `|g|²`.
    pub fn good_probability(&self) -> f64 {
        self.good.norm_sqr()
    }

    /// Magnitude of the bad amplitude, `|b|`.
    pub fn residual(&self) -> f64 {
        self.bad.norm()
    }

    /// Euclidean norm `√(|g|² + |b|²)`.
    pub fn norm(&self) -> f64 {
        (self.good.norm_sqr() + self.bad.norm_sqr()).sqrt()
    }

    /// Whether the norm is within `tol` of one.
    pub fn is_normalized(&self, tol: f64) -> bool {
        (self.norm() - 1.0).abs() <= tol
    }

    /// Components as an array, good first.
    pub fn to_array(&self) -> [Complex64; 2] {
        [self.good, self.bad]
    }
}

impl From<[Complex64; 2]> for AmplitudeVector {
    fn from([good, bad]: [Complex64; 2]) -> Self {
        Self::new(good, bad)
    }
}
