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
//! # Three-Body Simulator
//!
//! A planar gravitational three-body simulator intended for teaching the
//! qualitative behavior of chaotic dynamical systems.
//!
//! ## Features
//!
//! - **Body Factory**: Triangle initial conditions with tangential and radial
//!   velocity components, optionally perturbed by Gaussian noise drawn from a
//!   caller-supplied random source
//! - **Softened Gravity**: Pairwise Newtonian accelerations with a softening
//!   length and a post-summation magnitude clamp
//! - **Leapfrog Integration**: Symplectic velocity Verlet stepping with bounded
//!   long-run energy drift
//! - **Trajectory Tensor**: Dense `(steps, 3, 2)` position tensor paired with a
//!   uniform time axis, ready for an external renderer
//! - **Parallel Ensembles**: Optional Rayon integration for running many
//!   independently seeded simulations at once
//!
//! ## Example
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use three_body::simulate;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let (times, positions) = simulate(20.0, 0.02, None, None, false, &mut rng);
//!
//! assert_eq!(times.len(), 1000);
//! assert_eq!(positions.shape(), &[1000, 3, 2]);
//! assert_eq!(positions[[0, 0, 1]], 2.0);
//! ```

#![warn(missing_docs)]

/// Planar vectors and point-mass bodies
pub mod components;

/// Simulation parameters and their defaults
pub mod config;

/// Error types
pub mod error;

/// Initial condition generation
pub mod factory;

/// Force fields acting on the bodies
pub mod forces;

/// Numerical integration methods
pub mod integration;

/// Time loop and trajectory recording
pub mod simulation;

pub use components::{Body, BodyMetadata, Vector2};
pub use config::{BodyConfig, SimulationConfig};
pub use error::{Result, SimulationError};
pub use factory::{build_bodies, BodyFactory};
pub use forces::gravity::{compute_accelerations, GravityField};
pub use integration::{Integrator, PhaseState, VelocityVerletIntegrator};
pub use simulation::{simulate, simulate_ensemble, Simulation, Trajectory};
