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
//! Initial condition generation
//!
//! Bodies start on a fixed triangle chosen for readability: one apex above
//! the origin and two below. Each initial velocity mixes a tangential
//! direction, which sets the system rotating, with a smaller outward radial
//! direction:
//!
//! ```text
//! t = (-y, x) / |p|          tangential unit vector
//! r = (x, y) / |p|           radial unit vector
//! v = normalize(t + k r) * speed_scale * speed_factor
//! ```
//!
//! A body exactly at the origin has no defined direction; both unit vectors
//! collapse to zero and so does its velocity.
//!
//! Optional Gaussian noise on the positions is the only source of randomness
//! in the simulator. It is drawn from a caller-supplied [`rand::Rng`], so
//! runs are reproducible with a seeded generator.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::components::{Body, Vector2};
use crate::config::{BodyConfig, SimulationConfig, BODY_COUNT};

/// Builds the three bodies of a run from their configuration slots
#[derive(Debug, Clone, PartialEq)]
pub struct BodyFactory {
    slots: [BodyConfig; BODY_COUNT],
    speed_scale: f64,
    radial_component_ratio: f64,
    randomize: bool,
    randomization_amplitude: f64,
}

impl BodyFactory {
    /// Create a factory from a simulation configuration
    pub fn from_config(config: &SimulationConfig) -> Self {
        BodyFactory {
            slots: config.bodies.clone(),
            speed_scale: config.speed_scale,
            radial_component_ratio: config.radial_component_ratio,
            randomize: config.randomize,
            randomization_amplitude: config.randomization_amplitude,
        }
    }

    /// Whether built positions are perturbed by noise
    pub fn randomizes(&self) -> bool {
        self.randomize
    }

    /// Build the bodies, drawing position noise from `rng` if enabled
    ///
    /// With randomization disabled `rng` is never touched. Noise is drawn
    /// body by body, x before y.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> [Body; BODY_COUNT] {
        let mut positions: [Vector2; BODY_COUNT] =
            std::array::from_fn(|i| self.slots[i].base_position);

        if self.randomize {
            for position in positions.iter_mut() {
                let noise_x: f64 = StandardNormal.sample(rng);
                let noise_y: f64 = StandardNormal.sample(rng);
                *position += Vector2::new(noise_x, noise_y) * self.randomization_amplitude;
            }
        }

        std::array::from_fn(|i| {
            let slot = &self.slots[i];
            let speed = self.speed_scale * slot.speed_factor;
            Body {
                mass: slot.mass,
                radius: slot.radius,
                position: positions[i],
                velocity: initial_velocity(positions[i], self.radial_component_ratio, speed),
                metadata: slot.metadata.clone(),
            }
        })
    }
}

/// Initial velocity for a body at `position`
///
/// The direction is `normalize(tangential + radial_ratio * radial)`, scaled
/// to `speed`. Degenerate directions yield the zero vector.
pub fn initial_velocity(position: Vector2, radial_ratio: f64, speed: f64) -> Vector2 {
    let tangential = position.perpendicular().normalized_or_zero();
    let radial = position.normalized_or_zero();
    let direction = (tangential + radial * radial_ratio).normalized_or_zero();
    direction * speed
}

/// Build the default triangle of bodies with the given masses and radii
///
/// Positions, per-body speed factors and metadata come from the defaults in
/// [`crate::config`]. Inputs are not validated: a negative amplitude simply
/// mirrors the noise, NaN propagates into the positions.
///
/// # Example
///
/// ```rust
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use three_body::build_bodies;
///
/// let mut rng = StdRng::seed_from_u64(0);
/// let bodies = build_bodies([1.0, 0.8, 1.2], [0.1; 3], 0.2, false, 0.05, &mut rng);
/// assert_eq!(bodies[0].position.as_array(), [0.0, 2.0]);
/// ```
pub fn build_bodies<R: Rng + ?Sized>(
    masses: [f64; BODY_COUNT],
    radii: [f64; BODY_COUNT],
    speed_scale: f64,
    randomize: bool,
    randomization_amplitude: f64,
    rng: &mut R,
) -> [Body; BODY_COUNT] {
    let config = SimulationConfig::default()
        .with_masses(masses)
        .with_radii(radii)
        .with_speed_scale(speed_scale)
        .with_randomize(randomize)
        .with_randomization_amplitude(randomization_amplitude);
    BodyFactory::from_config(&config).build(rng)
}
