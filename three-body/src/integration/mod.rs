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
//! Numerical integration methods for the three-body simulation
//!
//! An integrator advances a [`PhaseState`] (positions, velocities and the
//! accelerations at those positions) by one fixed time step. States are
//! values: each step returns a new state and leaves its input untouched, so
//! the driver can record every snapshot without aliasing.
//!
//! # Integrators
//!
//! - **Velocity Verlet (leapfrog)**: Symplectic, second-order, one force
//!   evaluation per step
//!
//! # Timestep Guidelines
//!
//! - Too small: Numerical precision issues and wasted computation
//! - Too large: Instability and inaccuracy, especially in close encounters
//! - The default of 0.02 time units resolves encounters down to roughly the
//!   softening length

use ndarray::{Array1, Array2, ArrayView1};

use crate::components::{Body, Vector2};
use crate::forces::gravity::{compute_accelerations, GravityField};

mod diagnostics;
mod verlet;

pub use diagnostics::{kinetic_energy, potential_energy, total_energy, total_momentum};
pub use verlet::{leapfrog_step, VelocityVerletIntegrator};

/// Positions, velocities and accelerations of all bodies at one instant
///
/// Each array has shape `[n, 2]`; row `i` belongs to body `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseState {
    /// Body positions
    pub positions: Array2<f64>,
    /// Body velocities
    pub velocities: Array2<f64>,
    /// Accelerations evaluated at `positions`
    pub accelerations: Array2<f64>,
}

impl PhaseState {
    /// Build the starting state, evaluating the field once at the initial
    /// positions
    pub fn initial(
        positions: Array2<f64>,
        velocities: Array2<f64>,
        masses: ArrayView1<'_, f64>,
        field: &GravityField,
    ) -> Self {
        let accelerations = compute_accelerations(positions.view(), masses, field);
        PhaseState {
            positions,
            velocities,
            accelerations,
        }
    }

    /// Starting state for a set of bodies
    pub fn from_bodies(bodies: &[Body], field: &GravityField) -> Self {
        let positions = vectors_to_array(bodies.iter().map(|b| b.position));
        let velocities = vectors_to_array(bodies.iter().map(|b| b.velocity));
        let masses = masses_of(bodies);
        PhaseState::initial(positions, velocities, masses.view(), field)
    }

    /// Number of bodies in the state
    pub fn body_count(&self) -> usize {
        self.positions.nrows()
    }

    /// Position of body `index`
    pub fn position(&self, index: usize) -> Vector2 {
        Vector2::new(self.positions[[index, 0]], self.positions[[index, 1]])
    }

    /// Velocity of body `index`
    pub fn velocity(&self, index: usize) -> Vector2 {
        Vector2::new(self.velocities[[index, 0]], self.velocities[[index, 1]])
    }

    /// Check if every entry is finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.positions.iter().all(|v| v.is_finite())
            && self.velocities.iter().all(|v| v.is_finite())
            && self.accelerations.iter().all(|v| v.is_finite())
    }
}

/// Masses of `bodies` as a 1D array
pub fn masses_of(bodies: &[Body]) -> Array1<f64> {
    bodies.iter().map(|b| b.mass).collect()
}

fn vectors_to_array(vectors: impl ExactSizeIterator<Item = Vector2>) -> Array2<f64> {
    let mut out = Array2::zeros((vectors.len(), 2));
    for (i, v) in vectors.enumerate() {
        out[[i, 0]] = v.x();
        out[[i, 1]] = v.y();
    }
    out
}

/// Trait for fixed-step integration methods
///
/// Integrators hold only their timestep; the force field and masses are
/// passed to every step so a single integrator can drive any configuration.
pub trait Integrator: Send + Sync {
    /// Get the name of this integrator
    fn name(&self) -> &str;

    /// Get the timestep used by this integrator
    fn timestep(&self) -> f64;

    /// Set the timestep for this integrator
    ///
    /// # Panics
    ///
    /// Panics if timestep is non-positive, NaN, or infinite
    fn set_timestep(&mut self, dt: f64);

    /// Validate the timestep for stability
    ///
    /// Returns warnings if the timestep might cause numerical issues.
    /// Extremely small timesteps may lead to precision loss, while large
    /// timesteps may cause instability.
    fn validate_timestep(&self) -> Result<(), String> {
        let dt = self.timestep();

        if dt <= 0.0 || !dt.is_finite() {
            return Err(format!("Invalid timestep: {}. Must be positive and finite.", dt));
        }

        if dt < 1e-9 {
            return Err(format!(
                "Warning: Timestep {} is extremely small and may cause precision loss with f64. \
                Consider using larger timestep or higher precision types.",
                dt
            ));
        }

        if dt > 1.0 {
            return Err(format!(
                "Warning: Timestep {} is large and may cause instability. \
                Consider using smaller timesteps for better accuracy.",
                dt
            ));
        }

        Ok(())
    }

    /// Advance `state` by one timestep and return the new state
    fn step(&self, state: &PhaseState, masses: ArrayView1<'_, f64>, field: &GravityField) -> PhaseState;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::BodyMetadata;
    use ndarray::array;

    fn body(mass: f64, position: Vector2, velocity: Vector2) -> Body {
        Body {
            mass,
            radius: 0.1,
            position,
            velocity,
            metadata: BodyMetadata::default(),
        }
    }

    #[test]
    fn test_state_from_bodies() {
        let bodies = [
            body(1.0, Vector2::new(0.0, 2.0), Vector2::new(0.1, 0.0)),
            body(2.0, Vector2::new(1.0, 1.0), Vector2::new(0.0, -0.2)),
        ];
        let field = GravityField::default();
        let state = PhaseState::from_bodies(&bodies, &field);

        assert_eq!(state.body_count(), 2);
        assert_eq!(state.positions, array![[0.0, 2.0], [1.0, 1.0]]);
        assert_eq!(state.velocities, array![[0.1, 0.0], [0.0, -0.2]]);
        assert_eq!(state.position(1), Vector2::new(1.0, 1.0));
        assert_eq!(state.velocity(1), Vector2::new(0.0, -0.2));

        let masses = masses_of(&bodies);
        let expected = compute_accelerations(state.positions.view(), masses.view(), &field);
        assert_eq!(state.accelerations, expected);
        assert!(state.is_valid());
    }

    #[test]
    fn test_invalid_state_detected() {
        let state = PhaseState {
            positions: array![[f64::NAN, 0.0]],
            velocities: array![[0.0, 0.0]],
            accelerations: array![[0.0, 0.0]],
        };
        assert!(!state.is_valid());
    }
}
