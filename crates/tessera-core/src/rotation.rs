//! The 2×2 operator of one generalized amplification round.
//!
//! On the good/bad plane with `|s⟩ = (√a, √(1−a))`:
//!
//!   O(φ_o) = diag(e^{iφ_o}, 1)
//!   D(φ_d) = I + (e^{iφ_d} − 1)·|s⟩⟨s|
//!   Q      = D(φ_d) · O(φ_o)
//!
//! With `(π, π)` this is ordinary Grover iteration up to a global phase.
//! Both factors are unitary for real phases, so Q is unitary for every
//! parameter choice.

use num_complex::Complex64;

use crate::amplitude::AmplitudeVector;
use crate::error::{CoreError, CoreResult};
use crate::schedule::PhasePair;

/// A 2×2 complex matrix in row-major order.
pub type Matrix2 = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Norm drift tolerated by [`RotationOperator::apply`] in debug builds.
const NORM_TOLERANCE: f64 = 1e-9;

/// One amplification round `Q(φ_o, φ_d)` for a fixed good-state ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationOperator {
    ratio: f64,
    phases: PhasePair,
    matrix: Matrix2,
}

impl RotationOperator {
    /// Build the operator for ratio `a ∈ [0, 1]` and the given phases.
    ///
    /// The endpoints are accepted: `|s⟩` then lies on a coordinate axis and
    /// the diffusion acts as a phase on that axis alone. NaN, infinities and
    /// anything outside `[0, 1]` are rejected with
    /// [`CoreError::InvalidRatio`].
    pub fn new(ratio: f64, phases: PhasePair) -> CoreResult<Self> {
        Ok(Self::with_checked_ratio(check_ratio(ratio)?, phases))
    }

    /// The canonical `(π, π)` round.
    pub fn canonical(ratio: f64) -> CoreResult<Self> {
        Self::new(ratio, PhasePair::CANONICAL)
    }

    /// Build for a ratio already known to lie in `[0, 1]`.
    pub(crate) fn with_checked_ratio(ratio: f64, phases: PhasePair) -> Self {
        let s = [ratio.sqrt(), (1.0 - ratio).sqrt()];
        let oracle = oracle_matrix(phases.oracle);
        let diffusion = diffusion_matrix(s, phases.diffusion);
        Self {
            ratio,
            phases,
            matrix: mat_mul(&diffusion, &oracle),
        }
    }

    /// Good-state ratio the operator was built for.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Phases the operator was built from.
    pub fn phases(&self) -> PhasePair {
        self.phases
    }

    /// The matrix entries.
    pub fn matrix(&self) -> &Matrix2 {
        &self.matrix
    }

    /// Apply the operator, returning a new vector.
    pub fn apply(&self, v: &AmplitudeVector) -> AmplitudeVector {
        let [g, b] = v.to_array();
        let m = &self.matrix;
        let out = AmplitudeVector::new(m[0][0] * g + m[0][1] * b, m[1][0] * g + m[1][1] * b);
        debug_assert!(
            (out.norm() - v.norm()).abs() <= NORM_TOLERANCE * v.norm().max(1.0),
            "rotation changed the norm from {} to {}",
            v.norm(),
            out.norm()
        );
        out
    }

    /// Conjugate transpose `Q†`.
    pub fn adjoint(&self) -> Matrix2 {
        let m = &self.matrix;
        [
            [m[0][0].conj(), m[1][0].conj()],
            [m[0][1].conj(), m[1][1].conj()],
        ]
    }

    /// Largest entry-wise deviation of `Q†Q` from the identity.
    pub fn unitarity_error(&self) -> f64 {
        let product = mat_mul(&self.adjoint(), &self.matrix);
        let mut worst: f64 = 0.0;
        for (i, row) in product.iter().enumerate() {
            for (j, entry) in row.iter().enumerate() {
                let expected = if i == j { ONE } else { ZERO };
                worst = worst.max((entry - expected).norm());
            }
        }
        worst
    }

    /// Whether `Q†Q = I` within `tol`.
    pub fn is_unitary(&self, tol: f64) -> bool {
        self.unitarity_error() <= tol
    }
}

/// Accept a ratio in the closed interval `[0, 1]`.
pub(crate) fn check_ratio(ratio: f64) -> CoreResult<f64> {
    if (0.0..=1.0).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(CoreError::InvalidRatio(ratio))
    }
}

fn oracle_matrix(phi: f64) -> Matrix2 {
    [[Complex64::from_polar(1.0, phi), ZERO], [ZERO, ONE]]
}

fn diffusion_matrix(s: [f64; 2], phi: f64) -> Matrix2 {
    let lambda = Complex64::from_polar(1.0, phi) - ONE;
    [
        [ONE + lambda * (s[0] * s[0]), lambda * (s[0] * s[1])],
        [lambda * (s[1] * s[0]), ONE + lambda * (s[1] * s[1])],
    ]
}

/// Multiply two 2×2 matrices.
pub fn mat_mul(a: &Matrix2, b: &Matrix2) -> Matrix2 {
    [
        [
            a[0][0] * b[0][0] + a[0][1] * b[1][0],
            a[0][0] * b[0][1] + a[0][1] * b[1][1],
        ],
        [
            a[1][0] * b[0][0] + a[1][1] * b[1][0],
            a[1][0] * b[0][1] + a[1][1] * b[1][1],
        ],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_canonical_round_matches_grover_rotation() {
        // One canonical round rotates the good angle from θ to 3θ.
        let a: f64 = 0.1;
        let theta = a.sqrt().asin();
        let q = RotationOperator::canonical(a).unwrap();
        let v = q.apply(&AmplitudeVector::initial(a));
        let expected = (3.0 * theta).sin().powi(2);
        assert!((v.good_probability() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_zero_phases_are_identity() {
        let q = RotationOperator::new(0.3, PhasePair::new(0.0, 0.0)).unwrap();
        let m = q.matrix();
        assert!((m[0][0] - ONE).norm() < 1e-15);
        assert!((m[1][1] - ONE).norm() < 1e-15);
        assert!(m[0][1].norm() < 1e-15);
        assert!(m[1][0].norm() < 1e-15);
    }

    #[test]
    fn test_oracle_only_phases_good_component() {
        let q = RotationOperator::new(0.3, PhasePair::new(PI / 2.0, 0.0)).unwrap();
        let v = q.apply(&AmplitudeVector::initial(0.3));
        assert!((v.good() - Complex64::new(0.0, 0.3_f64.sqrt())).norm() < 1e-12);
        assert!((v.bad() - Complex64::new(0.7_f64.sqrt(), 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_degenerate_ratios_stay_unitary() {
        for &a in &[0.0, 1.0] {
            for &(po, pd) in &[(PI, PI), (0.3, 5.9), (2.0, 0.0)] {
                let q = RotationOperator::new(a, PhasePair::new(po, pd)).unwrap();
                assert!(q.is_unitary(1e-12), "a = {a}, phases = ({po}, {pd})");
            }
        }
    }

    #[test]
    fn test_rejects_ratio_outside_closed_interval() {
        for a in [1.5, -0.1, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(
                    RotationOperator::new(a, PhasePair::new(1.0, 2.0)),
                    Err(CoreError::InvalidRatio(_))
                ),
                "a = {a}"
            );
            assert!(RotationOperator::canonical(a).is_err(), "a = {a}");
        }
    }

    #[test]
    fn test_mat_mul_identity() {
        let id = [[ONE, ZERO], [ZERO, ONE]];
        let q = RotationOperator::new(0.2, PhasePair::new(1.0, 2.0)).unwrap();
        assert_eq!(mat_mul(&id, q.matrix()), *q.matrix());
    }
}
