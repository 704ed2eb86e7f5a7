// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Softened Newtonian gravity with an acceleration clamp
//!
//! # Physics Background
//!
//! Each body is pulled towards every other body with an acceleration
//! proportional to the other body's mass and inversely proportional to the
//! square of their separation:
//!
//! **a_i = G Σ_{j≠i} m_j (r_j − r_i) / |r_j − r_i|³**
//!
//! # Implementation Details
//!
//! ## Softening
//!
//! A softening length ε is added inside the distance term so that two bodies
//! passing through each other produce a large but finite acceleration:
//!
//! **a_i = G Σ_{j≠i} m_j (r_j − r_i) / (|r_j − r_i|² + ε²)^{3/2}**
//!
//! See Dehnen, W. (2001). "Towards optimal softening in three-dimensional
//! N-body codes" and Aarseth, S. J. (2003). "Gravitational N-Body Simulations".
//!
//! ## Acceleration Clamp
//!
//! After the pairwise sum, any body whose acceleration magnitude exceeds
//! `max_acceleration` has it rescaled to exactly that magnitude, keeping its
//! direction. The clamp is applied to the summed vector, never to individual
//! pairwise terms. It keeps the fixed-step integrator stable through close
//! encounters at the cost of physical exactness: while it is engaged,
//! Newton's third law no longer holds and total momentum drifts.

use ndarray::{Array2, ArrayView1, ArrayView2};

use crate::components::Vector2;
use crate::config::{DEFAULT_MAX_ACCELERATION, DEFAULT_SOFTENING, GRAVITATIONAL_CONSTANT};

/// Parameters of the softened gravity field
///
/// # Example
///
/// ```rust
/// use three_body::GravityField;
///
/// let mut field = GravityField::new(1.0);
/// field.set_softening(0.15);
/// field.set_max_acceleration(10.0);
/// assert_eq!(field.softening(), 0.15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityField {
    /// Gravitational constant (default: GRAVITATIONAL_CONSTANT)
    g_constant: f64,
    /// Softening length (default: DEFAULT_SOFTENING)
    softening: f64,
    /// Clamp on the summed acceleration (default: DEFAULT_MAX_ACCELERATION)
    max_acceleration: f64,
}

impl GravityField {
    /// Create a new gravity field with the given gravitational constant and
    /// default softening and clamp
    ///
    /// # Panics
    ///
    /// Panics if `g_constant` is negative or not finite.
    pub fn new(g_constant: f64) -> Self {
        assert!(
            g_constant >= 0.0 && g_constant.is_finite(),
            "Gravitational constant must be non-negative and finite"
        );

        GravityField {
            g_constant,
            softening: DEFAULT_SOFTENING,
            max_acceleration: DEFAULT_MAX_ACCELERATION,
        }
    }

    /// Get the gravitational constant
    pub fn g_constant(&self) -> f64 {
        self.g_constant
    }

    /// Set the softening length
    ///
    /// # Panics
    ///
    /// Panics if `softening` is negative or not finite.
    pub fn set_softening(&mut self, softening: f64) {
        assert!(
            softening >= 0.0 && softening.is_finite(),
            "Softening length must be non-negative and finite"
        );
        self.softening = softening;
    }

    /// Get the softening length
    pub fn softening(&self) -> f64 {
        self.softening
    }

    /// Set the clamp on summed accelerations
    ///
    /// # Panics
    ///
    /// Panics if `max_acceleration` is not positive or is NaN. Infinity is
    /// accepted and disables the clamp.
    pub fn set_max_acceleration(&mut self, max_acceleration: f64) {
        assert!(
            max_acceleration > 0.0,
            "Maximum acceleration must be positive"
        );
        self.max_acceleration = max_acceleration;
    }

    /// Get the clamp on summed accelerations
    pub fn max_acceleration(&self) -> f64 {
        self.max_acceleration
    }

    /// Acceleration exerted on a body at `target` by a mass `source_mass`
    /// at `source`, before clamping
    ///
    /// Returns the zero vector when the softened distance is exactly zero,
    /// which can only happen with zero softening and coincident bodies.
    pub fn pairwise_acceleration(&self, target: Vector2, source: Vector2, source_mass: f64) -> Vector2 {
        let delta = source - target;
        let softened_r_squared = delta.magnitude_squared() + self.softening * self.softening;

        if softened_r_squared == 0.0 {
            log::trace!("zero softened distance between coincident bodies, skipping pair");
            return Vector2::zero();
        }

        let inv_r_cubed = softened_r_squared.powf(-1.5);
        delta * source_mass * inv_r_cubed
    }

    /// Unclamped acceleration of body `index` summed over all other bodies
    pub fn summed_acceleration(
        &self,
        index: usize,
        positions: ArrayView2<'_, f64>,
        masses: ArrayView1<'_, f64>,
    ) -> Vector2 {
        let target = row(positions, index);
        let mut total = Vector2::zero();

        for (other, &mass) in masses.iter().enumerate() {
            // Self-interaction contributes nothing
            if other == index {
                continue;
            }
            total += self.pairwise_acceleration(target, row(positions, other), mass);
        }

        total * self.g_constant
    }
}

impl Default for GravityField {
    fn default() -> Self {
        GravityField::new(GRAVITATIONAL_CONSTANT)
    }
}

/// Rescale `v` to length `max` if it is longer, keeping its direction
pub fn clamp_magnitude(v: Vector2, max: f64) -> Vector2 {
    let magnitude = v.magnitude();
    if magnitude > max {
        v / magnitude * max
    } else {
        v
    }
}

/// Compute the clamped gravitational acceleration of every body
///
/// `positions` has shape `[n, 2]` and `masses` shape `[n]`; the result has
/// the same shape as `positions`. The computation never fails: softening
/// keeps coincident bodies finite and the clamp bounds every row.
pub fn compute_accelerations(
    positions: ArrayView2<'_, f64>,
    masses: ArrayView1<'_, f64>,
    field: &GravityField,
) -> Array2<f64> {
    let n = masses.len();
    let mut accelerations = Array2::zeros((n, 2));

    for i in 0..n {
        let summed = field.summed_acceleration(i, positions, masses);
        let clamped = clamp_magnitude(summed, field.max_acceleration);
        if clamped != summed {
            log::trace!(
                "clamped acceleration of body {} from {:.3e} to {:.3e}",
                i,
                summed.magnitude(),
                field.max_acceleration
            );
        }
        accelerations[[i, 0]] = clamped.x();
        accelerations[[i, 1]] = clamped.y();
    }

    accelerations
}

fn row(positions: ArrayView2<'_, f64>, index: usize) -> Vector2 {
    Vector2::new(positions[[index, 0]], positions[[index, 1]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1};

    fn unclamped_field(softening: f64) -> GravityField {
        let mut field = GravityField::new(1.0);
        field.set_softening(softening);
        field.set_max_acceleration(f64::INFINITY);
        field
    }

    #[test]
    fn test_field_creation() {
        let field = GravityField::default();
        assert_eq!(field.g_constant(), GRAVITATIONAL_CONSTANT);
        assert_eq!(field.softening(), DEFAULT_SOFTENING);
        assert_eq!(field.max_acceleration(), DEFAULT_MAX_ACCELERATION);
    }

    #[test]
    #[should_panic(expected = "Gravitational constant must be non-negative and finite")]
    fn test_negative_g_panics() {
        GravityField::new(-1.0);
    }

    #[test]
    #[should_panic(expected = "Softening length must be non-negative and finite")]
    fn test_negative_softening_panics() {
        let mut field = GravityField::default();
        field.set_softening(-1.0);
    }

    #[test]
    #[should_panic(expected = "Maximum acceleration must be positive")]
    fn test_zero_clamp_panics() {
        let mut field = GravityField::default();
        field.set_max_acceleration(0.0);
    }

    #[test]
    fn test_two_body_attraction() {
        let field = unclamped_field(0.0);
        let positions = array![[0.0, 0.0], [2.0, 0.0]];
        let masses = array![1.0, 3.0];

        let acc = compute_accelerations(positions.view(), masses.view(), &field);

        // a_0 = G m_1 / r² towards body 1, a_1 = G m_0 / r² towards body 0
        assert!((acc[[0, 0]] - 0.75).abs() < 1e-12);
        assert!((acc[[1, 0]] + 0.25).abs() < 1e-12);
        assert_eq!(acc[[0, 1]], 0.0);
        assert_eq!(acc[[1, 1]], 0.0);

        // Equal and opposite forces
        let net = masses[0] * acc[[0, 0]] + masses[1] * acc[[1, 0]];
        assert!(net.abs() < 1e-12);
    }

    #[test]
    fn test_softening_matches_formula() {
        let field = unclamped_field(0.5);
        let positions = array![[0.0, 0.0], [1.0, 0.0]];
        let masses = array![1.0, 2.0];

        let acc = compute_accelerations(positions.view(), masses.view(), &field);
        let expected = 2.0 * 1.0 / (1.0_f64 + 0.25).powf(1.5);
        assert!((acc[[0, 0]] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_single_body_has_no_self_interaction() {
        let field = GravityField::default();
        let positions = array![[1.0, -1.0]];
        let masses = array![5.0];

        let acc = compute_accelerations(positions.view(), masses.view(), &field);
        assert_eq!(acc, array![[0.0, 0.0]]);
    }

    #[test]
    fn test_coincident_bodies_stay_finite() {
        let field = GravityField::default();
        let positions = array![[0.5, 0.5], [0.5, 0.5], [2.0, -1.0]];
        let masses = array![1.0, 0.8, 1.2];

        let acc = compute_accelerations(positions.view(), masses.view(), &field);
        assert!(acc.iter().all(|a| a.is_finite()));
    }

    #[test]
    fn test_zero_softening_coincident_pair_is_skipped() {
        let field = unclamped_field(0.0);
        let positions = array![[0.0, 0.0], [0.0, 0.0]];
        let masses = array![1.0, 1.0];

        let acc = compute_accelerations(positions.view(), masses.view(), &field);
        assert_eq!(acc, Array2::<f64>::zeros((2, 2)));
    }

    #[test]
    fn test_clamp_applies_after_summation() {
        let mut field = GravityField::new(1.0);
        field.set_softening(0.0);
        field.set_max_acceleration(1.0);

        // Body 0 sits between two heavy bodies whose pulls nearly cancel;
        // each pairwise term exceeds the clamp, their sum does not.
        let positions = array![[0.0, 0.0], [-0.1, 0.0], [0.1, 0.0]];
        let masses = array![1.0, 1.0, 1.005];

        let acc = compute_accelerations(positions.view(), masses.view(), &field);
        let expected = (1.005 - 1.0) / 0.01;
        assert!((acc[[0, 0]] - expected).abs() < 1e-9);
        assert!(expected < 1.0);

        // The outer bodies are pulled hard and get clamped to exactly 1
        for i in 1..3 {
            let magnitude = acc[[i, 0]].hypot(acc[[i, 1]]);
            assert!((magnitude - 1.0).abs() < 1e-12);
        }
        assert!(acc[[1, 0]] > 0.0);
        assert!(acc[[2, 0]] < 0.0);
    }

    #[test]
    fn test_clamp_magnitude_keeps_direction() {
        let v = clamp_magnitude(Vector2::new(30.0, 40.0), 10.0);
        assert!((v.x() - 6.0).abs() < 1e-12);
        assert!((v.y() - 8.0).abs() < 1e-12);

        let short = Vector2::new(1.0, 1.0);
        assert_eq!(clamp_magnitude(short, 10.0), short);
    }

    #[test]
    fn test_zero_g_produces_no_acceleration() {
        let field = GravityField::new(0.0);
        let positions = array![[0.0, 2.0], [-2.0, -1.0], [2.0, -1.0]];
        let masses: Array1<f64> = array![1.0, 0.8, 1.2];

        let acc = compute_accelerations(positions.view(), masses.view(), &field);
        assert!(acc.iter().all(|&a| a == 0.0));
    }
}
