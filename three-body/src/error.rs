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
//! Error types for configuration validation
//!
//! The numerical core itself never fails: degenerate inputs to
//! [`crate::simulate`] yield NaN, infinities or empty tensors. Errors only
//! arise when a [`crate::SimulationConfig`] is checked up front, for example
//! by [`crate::Simulation::new`].

use thiserror::Error;

/// Reasons a simulation configuration is rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// A body mass is zero, negative or not finite
    #[error("mass of body {index} must be positive and finite, got {value}")]
    InvalidMass {
        /// Index of the offending body
        index: usize,
        /// The rejected mass
        value: f64,
    },

    /// The gravitational constant is negative or not finite
    #[error("gravitational constant must be non-negative and finite, got {0}")]
    InvalidGravitationalConstant(f64),

    /// The softening length is zero, negative or not finite
    #[error("softening length must be positive and finite, got {0}")]
    InvalidSoftening(f64),

    /// The acceleration clamp is zero, negative or not finite
    #[error("maximum acceleration must be positive and finite, got {0}")]
    InvalidMaxAcceleration(f64),

    /// The time step is zero, negative or not finite
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),

    /// The total simulated time is zero, negative or not finite
    #[error("total time must be positive and finite, got {0}")]
    InvalidTotalTime(f64),

    /// The time step does not fit inside the simulated duration
    #[error("time step {time_step} must be smaller than total time {total_time}")]
    TimeStepExceedsDuration {
        /// Configured time step
        time_step: f64,
        /// Configured total time
        total_time: f64,
    },

    /// The position noise amplitude is negative or not finite
    #[error("randomization amplitude must be non-negative and finite, got {0}")]
    InvalidNoise(f64),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SimulationError>;
