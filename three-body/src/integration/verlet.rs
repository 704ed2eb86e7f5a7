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
//! Velocity Verlet (leapfrog) integrator implementation
//!
//! The velocity Verlet algorithm is a symplectic integrator: its energy
//! error stays bounded over long runs instead of growing steadily as it does
//! with explicit Euler. Three-body runs span many hundreds of steps, and the
//! trajectories only look plausible while energy stays bounded.
//!
//! # Algorithm
//!
//! Given the acceleration `a(t)` from the previous step (or the initial
//! evaluation), one step is a kick-drift-kick sequence:
//!
//! ```text
//! v(t + dt/2) = v(t) + 0.5*a(t)*dt
//! x(t + dt)   = x(t) + v(t + dt/2)*dt
//! a(t + dt)   = field(x(t + dt))
//! v(t + dt)   = v(t + dt/2) + 0.5*a(t + dt)*dt
//! ```
//!
//! # Properties
//!
//! - **Symplectic**: Preserves phase space volume (Liouville's theorem)
//! - **Time-reversible**: Running forward then backward returns to start
//! - **Momentum conserving**: Exactly, for pairwise-symmetric forces
//! - **Second-order accurate**: Local error O(dt³), global error O(dt²)
//!
//! # References
//!
//! - Hairer, E., Lubich, C., & Wanner, G. (2006). Geometric Numerical Integration:
//!   Structure-Preserving Algorithms for Ordinary Differential Equations (2nd ed.).
//!   Springer. Section II.3.
//! - Swope, W. C., Andersen, H. C., Berens, P. H., & Wilson, K. R. (1982).
//!   A computer simulation method for the calculation of equilibrium constants for the
//!   formation of physical clusters of molecules: Application to small water clusters.
//!   The Journal of Chemical Physics, 76(1), 637-649.
//! - Verlet, L. (1967). Computer "Experiments" on Classical Fluids. I. Thermodynamical
//!   Properties of Lennard-Jones Molecules. Physical Review, 159(1), 98-103.

use ndarray::ArrayView1;

use super::{Integrator, PhaseState};
use crate::forces::gravity::{compute_accelerations, GravityField};

/// Velocity Verlet integrator for the three-body simulation
///
/// # Example
///
/// ```
/// use three_body::{Integrator, VelocityVerletIntegrator};
///
/// let integrator = VelocityVerletIntegrator::new(0.02);
/// assert_eq!(integrator.timestep(), 0.02);
/// assert!(integrator.validate_timestep().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityVerletIntegrator {
    timestep: f64,
}

impl VelocityVerletIntegrator {
    /// Create a new velocity Verlet integrator with the given timestep
    ///
    /// # Panics
    ///
    /// Panics if timestep is non-positive, NaN, or infinite
    pub fn new(timestep: f64) -> Self {
        assert!(
            timestep > 0.0 && timestep.is_finite(),
            "Timestep must be positive and finite"
        );
        VelocityVerletIntegrator { timestep }
    }
}

impl Integrator for VelocityVerletIntegrator {
    fn name(&self) -> &str {
        "Velocity Verlet"
    }

    fn timestep(&self) -> f64 {
        self.timestep
    }

    fn set_timestep(&mut self, dt: f64) {
        assert!(
            dt > 0.0 && dt.is_finite(),
            "Timestep must be positive and finite"
        );
        self.timestep = dt;
    }

    fn step(&self, state: &PhaseState, masses: ArrayView1<'_, f64>, field: &GravityField) -> PhaseState {
        leapfrog_step(state, self.timestep, masses, field)
    }
}

/// One kick-drift-kick step with an arbitrary `dt`
///
/// Unlike [`VelocityVerletIntegrator`], the timestep is not checked; a
/// negative `dt` integrates backwards in time and a NaN propagates into the
/// returned state.
pub fn leapfrog_step(
    state: &PhaseState,
    dt: f64,
    masses: ArrayView1<'_, f64>,
    field: &GravityField,
) -> PhaseState {
    // Half-step kick
    let half_velocities = &state.velocities + &(&state.accelerations * 0.5 * dt);

    // Full-step drift
    let positions = &state.positions + &(&half_velocities * dt);

    // Forces at the new positions
    let accelerations = compute_accelerations(positions.view(), masses, field);

    // Completing half-step kick
    let velocities = &half_velocities + &(&accelerations * 0.5 * dt);

    PhaseState {
        positions,
        velocities,
        accelerations,
    }
}
