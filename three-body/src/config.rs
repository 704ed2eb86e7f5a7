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
//! Simulation parameters and their defaults
//!
//! All parameters are plain values fixed for the duration of one run.
//! [`SimulationConfig`] can be built in code through its `with_*` methods or
//! deserialized with serde; every missing field falls back to the defaults
//! below.
//!
//! ```json
//! {
//!   "softening_length": 0.15,
//!   "max_acceleration": 10.0,
//!   "total_time": 20.0,
//!   "time_step": 0.02,
//!   "randomize": true,
//!   "bodies": [
//!     { "mass": 1.0, "radius": 0.1, "base_position": [0.0, 2.0], "speed_factor": 0.3 },
//!     { "mass": 0.8, "radius": 0.1, "base_position": [-2.0, -1.0], "speed_factor": 0.5 },
//!     { "mass": 1.2, "radius": 0.1, "base_position": [2.0, -1.0], "speed_factor": 0.4 }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::components::{BodyMetadata, Vector2};
use crate::error::{Result, SimulationError};
use crate::forces::gravity::GravityField;

/// Number of bodies in every simulation
pub const BODY_COUNT: usize = 3;

/// Gravitational constant in normalized units
pub const GRAVITATIONAL_CONSTANT: f64 = 1.0;

/// Softening length preventing singular accelerations at small separations
pub const DEFAULT_SOFTENING: f64 = 0.15;

/// Upper bound on the magnitude of any body's acceleration
pub const DEFAULT_MAX_ACCELERATION: f64 = 10.0;

/// Asymmetric masses, which make the motion chaotic
pub const DEFAULT_MASSES: [f64; BODY_COUNT] = [1.0, 0.8, 1.2];

/// Drawing radii
pub const DEFAULT_RADII: [f64; BODY_COUNT] = [0.1, 0.1, 0.1];

/// Base triangle: one apex above, two below
pub const DEFAULT_POSITIONS: [[f64; 2]; BODY_COUNT] = [[0.0, 2.0], [-2.0, -1.0], [2.0, -1.0]];

/// Global scale applied to every initial speed
pub const DEFAULT_SPEED_SCALE: f64 = 0.2;

/// Per-body multipliers on the initial speed
pub const SPEED_FACTORS: [f64; BODY_COUNT] = [0.3, 0.5, 0.4];

/// Weight of the outward radial direction in the initial velocity
pub const RADIAL_COMPONENT_RATIO: f64 = 0.25;

/// Standard deviation of the optional position noise
pub const DEFAULT_RANDOMIZATION_AMPLITUDE: f64 = 0.05;

/// Simulated duration
pub const DEFAULT_TOTAL_TIME: f64 = 20.0;

/// Integration time step
pub const DEFAULT_TIME_STEP: f64 = 0.02;

/// Body colors
pub const DEFAULT_COLORS: [&str; BODY_COUNT] = ["#EA580C", "#DC2626", "#27ae60"];

/// Body labels
pub const DEFAULT_BODY_NAMES: [&str; BODY_COUNT] = ["Body 1", "Body 2", "Body 3"];

/// Largest number of frames an animation should draw from one trajectory
pub const MAX_ANIMATION_FRAMES: usize = 300;

/// Duration used when a run is meant for animation
pub const PLOT_TOTAL_TIME: f64 = 30.0;

/// Per-body configuration slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    /// Mass, copied verbatim into the built body
    pub mass: f64,
    /// Drawing radius
    pub radius: f64,
    /// Position before any noise is added
    pub base_position: Vector2,
    /// Multiplier applied on top of the global speed scale
    pub speed_factor: f64,
    /// Renderer metadata
    #[serde(flatten)]
    pub metadata: BodyMetadata,
}

impl BodyConfig {
    /// The three default body slots
    pub fn defaults() -> [BodyConfig; BODY_COUNT] {
        std::array::from_fn(|i| BodyConfig {
            mass: DEFAULT_MASSES[i],
            radius: DEFAULT_RADII[i],
            base_position: Vector2::from_array(DEFAULT_POSITIONS[i]),
            speed_factor: SPEED_FACTORS[i],
            metadata: BodyMetadata::new(DEFAULT_COLORS[i], DEFAULT_BODY_NAMES[i]),
        })
    }
}

/// Parameters for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Gravitational constant `G`
    pub gravitational_constant: f64,
    /// Softening length `ε`
    pub softening_length: f64,
    /// Acceleration clamp
    pub max_acceleration: f64,
    /// Simulated duration
    pub total_time: f64,
    /// Integration time step
    pub time_step: f64,
    /// Global initial speed scale
    pub speed_scale: f64,
    /// Whether to perturb the base positions with Gaussian noise
    pub randomize: bool,
    /// Standard deviation of the position noise
    pub randomization_amplitude: f64,
    /// Weight of the radial direction in the initial velocities
    pub radial_component_ratio: f64,
    /// Body slots, in output order
    pub bodies: [BodyConfig; BODY_COUNT],
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            softening_length: DEFAULT_SOFTENING,
            max_acceleration: DEFAULT_MAX_ACCELERATION,
            total_time: DEFAULT_TOTAL_TIME,
            time_step: DEFAULT_TIME_STEP,
            speed_scale: DEFAULT_SPEED_SCALE,
            randomize: false,
            randomization_amplitude: DEFAULT_RANDOMIZATION_AMPLITUDE,
            radial_component_ratio: RADIAL_COMPONENT_RATIO,
            bodies: BodyConfig::defaults(),
        }
    }
}

impl SimulationConfig {
    /// Replace the three body masses
    pub fn with_masses(mut self, masses: [f64; BODY_COUNT]) -> Self {
        for (body, mass) in self.bodies.iter_mut().zip(masses) {
            body.mass = mass;
        }
        self
    }

    /// Replace the three body radii
    pub fn with_radii(mut self, radii: [f64; BODY_COUNT]) -> Self {
        for (body, radius) in self.bodies.iter_mut().zip(radii) {
            body.radius = radius;
        }
        self
    }

    /// Replace the three base positions
    pub fn with_positions(mut self, positions: [Vector2; BODY_COUNT]) -> Self {
        for (body, position) in self.bodies.iter_mut().zip(positions) {
            body.base_position = position;
        }
        self
    }

    /// Set the simulated duration
    pub fn with_total_time(mut self, total_time: f64) -> Self {
        self.total_time = total_time;
        self
    }

    /// Set the integration time step
    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    /// Set the global initial speed scale
    pub fn with_speed_scale(mut self, speed_scale: f64) -> Self {
        self.speed_scale = speed_scale;
        self
    }

    /// Enable or disable position noise
    pub fn with_randomize(mut self, randomize: bool) -> Self {
        self.randomize = randomize;
        self
    }

    /// Set the standard deviation of the position noise
    pub fn with_randomization_amplitude(mut self, amplitude: f64) -> Self {
        self.randomization_amplitude = amplitude;
        self
    }

    /// Set the softening length
    pub fn with_softening(mut self, softening: f64) -> Self {
        self.softening_length = softening;
        self
    }

    /// Set the acceleration clamp
    pub fn with_max_acceleration(mut self, max_acceleration: f64) -> Self {
        self.max_acceleration = max_acceleration;
        self
    }

    /// Body masses in slot order
    pub fn masses(&self) -> [f64; BODY_COUNT] {
        std::array::from_fn(|i| self.bodies[i].mass)
    }

    /// Body radii in slot order
    pub fn radii(&self) -> [f64; BODY_COUNT] {
        std::array::from_fn(|i| self.bodies[i].radius)
    }

    /// Gravity field described by this configuration
    ///
    /// # Panics
    ///
    /// Panics if the gravitational constant, softening or clamp are negative
    /// or not finite. Call [`SimulationConfig::validate`] first when the
    /// configuration comes from outside the program.
    pub fn gravity_field(&self) -> GravityField {
        let mut field = GravityField::new(self.gravitational_constant);
        field.set_softening(self.softening_length);
        field.set_max_acceleration(self.max_acceleration);
        field
    }

    /// Check that every parameter is physically meaningful
    pub fn validate(&self) -> Result<()> {
        if !(self.gravitational_constant >= 0.0 && self.gravitational_constant.is_finite()) {
            return Err(SimulationError::InvalidGravitationalConstant(
                self.gravitational_constant,
            ));
        }
        if !(self.softening_length > 0.0 && self.softening_length.is_finite()) {
            return Err(SimulationError::InvalidSoftening(self.softening_length));
        }
        if !(self.max_acceleration > 0.0 && self.max_acceleration.is_finite()) {
            return Err(SimulationError::InvalidMaxAcceleration(self.max_acceleration));
        }
        if !(self.time_step > 0.0 && self.time_step.is_finite()) {
            return Err(SimulationError::InvalidTimeStep(self.time_step));
        }
        if !(self.total_time > 0.0 && self.total_time.is_finite()) {
            return Err(SimulationError::InvalidTotalTime(self.total_time));
        }
        if self.time_step >= self.total_time {
            return Err(SimulationError::TimeStepExceedsDuration {
                time_step: self.time_step,
                total_time: self.total_time,
            });
        }
        if !(self.randomization_amplitude >= 0.0 && self.randomization_amplitude.is_finite()) {
            return Err(SimulationError::InvalidNoise(self.randomization_amplitude));
        }
        for (index, body) in self.bodies.iter().enumerate() {
            if !(body.mass > 0.0 && body.mass.is_finite()) {
                return Err(SimulationError::InvalidMass {
                    index,
                    value: body.mass,
                });
            }
        }
        Ok(())
    }
}
