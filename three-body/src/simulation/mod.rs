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
//! Time loop and trajectory recording
//!
//! A run builds the bodies, evaluates the initial accelerations once, then
//! applies `steps - 1` leapfrog transitions, writing every position snapshot
//! into a tensor allocated up front:
//!
//! ```text
//! steps     = floor(total_time / dt)
//! times     = linspace(0, total_time, steps)
//! positions : (steps, 3, 2), positions[0] = initial positions
//! ```
//!
//! When `total_time / dt` is not an integer the last time sample lands
//! exactly on `total_time` anyway, so the effective spacing of `times` is
//! slightly wider than `dt`. Consumers rely on `steps` being derived this
//! way, so the rounding is kept as is.
//!
//! A run is synchronous and owns all of its allocations. There is no early
//! termination and no adaptive step control.

use ndarray::{s, Array1, Array3, ArrayView1};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::components::{Body, Vector2};
use crate::config::{SimulationConfig, BODY_COUNT, DEFAULT_RANDOMIZATION_AMPLITUDE, DEFAULT_SPEED_SCALE};
use crate::error::Result;
use crate::factory::{build_bodies, BodyFactory};
use crate::forces::gravity::GravityField;
use crate::integration::{leapfrog_step, masses_of, Integrator, PhaseState, VelocityVerletIntegrator};

mod ensemble;

pub use ensemble::simulate_ensemble;

/// Recorded output of one run
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    times: Array1<f64>,
    positions: Array3<f64>,
    bodies: [Body; BODY_COUNT],
}

impl Trajectory {
    /// Uniform time axis, one sample per step
    pub fn times(&self) -> &Array1<f64> {
        &self.times
    }

    /// Position tensor indexed by `(step, body, axis)`
    pub fn positions(&self) -> &Array3<f64> {
        &self.positions
    }

    /// The bodies whose initial state seeded the run
    pub fn bodies(&self) -> &[Body; BODY_COUNT] {
        &self.bodies
    }

    /// Number of recorded steps
    pub fn steps(&self) -> usize {
        self.times.len()
    }

    /// Positions of all bodies at `step`, if recorded
    pub fn snapshot(&self, step: usize) -> Option<[Vector2; BODY_COUNT]> {
        if step >= self.steps() {
            return None;
        }
        Some(std::array::from_fn(|body| {
            Vector2::new(self.positions[[step, body, 0]], self.positions[[step, body, 1]])
        }))
    }

    /// Evenly spaced step indices for an animation of at most `max_frames`
    /// frames; see [`frame_indices`]
    pub fn frame_indices(&self, max_frames: usize) -> Vec<usize> {
        frame_indices(self.steps(), max_frames)
    }

    /// Split into time axis, position tensor and bodies
    pub fn into_parts(self) -> (Array1<f64>, Array3<f64>, [Body; BODY_COUNT]) {
        (self.times, self.positions, self.bodies)
    }
}

/// Number of recorded steps for a run, `floor(total_time / dt)`
///
/// Returns 0 when the ratio is negative, NaN or infinite.
pub fn step_count(total_time: f64, dt: f64) -> usize {
    let ratio = total_time / dt;
    if ratio.is_finite() && ratio > 0.0 {
        ratio.floor() as usize
    } else {
        0
    }
}

/// Evenly spaced indices into `0..steps`, at most `max_frames` of them
///
/// The first index is always 0 and the last `steps - 1`. Intermediate
/// indices are truncated towards zero.
pub fn frame_indices(steps: usize, max_frames: usize) -> Vec<usize> {
    let count = max_frames.min(steps);
    match count {
        0 => Vec::new(),
        1 => vec![0],
        _ => {
            let last = (steps - 1) as f64;
            let spacing = last / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        steps - 1
                    } else {
                        (i as f64 * spacing) as usize
                    }
                })
                .collect()
        }
    }
}

fn record<F>(bodies: [Body; BODY_COUNT], total_time: f64, dt: f64, field: &GravityField, mut advance: F) -> Trajectory
where
    F: FnMut(&PhaseState, ArrayView1<'_, f64>) -> PhaseState,
{
    let steps = step_count(total_time, dt);
    let times = Array1::linspace(0.0, total_time, steps);
    let mut positions = Array3::zeros((steps, BODY_COUNT, 2));

    if steps == 0 {
        log::debug!("total time {} with dt {} yields no steps", total_time, dt);
        return Trajectory {
            times,
            positions,
            bodies,
        };
    }

    let masses = masses_of(&bodies);
    let mut state = PhaseState::from_bodies(&bodies, field);
    positions.slice_mut(s![0, .., ..]).assign(&state.positions);

    let mut reported_invalid = false;
    for step in 1..steps {
        state = advance(&state, masses.view());
        positions.slice_mut(s![step, .., ..]).assign(&state.positions);

        if !reported_invalid && !state.is_valid() {
            log::warn!("non-finite state at step {} of {}, continuing", step, steps);
            reported_invalid = true;
        }
    }

    Trajectory {
        times,
        positions,
        bodies,
    }
}

/// Run the default three-body configuration
///
/// Bodies are built on the default triangle with the given (or default)
/// masses and radii; `rng` is only used when `randomize` is set. Returns the
/// time axis of length `floor(total_time / dt)` and the position tensor of
/// shape `(steps, 3, 2)`.
///
/// Inputs are not validated. Zero or negative masses yield NaN or infinite
/// positions, a non-positive ratio `total_time / dt` yields empty arrays, and
/// a negative `dt` with a negative `total_time` integrates backwards.
pub fn simulate<R: Rng + ?Sized>(
    total_time: f64,
    dt: f64,
    masses: Option<[f64; BODY_COUNT]>,
    radii: Option<[f64; BODY_COUNT]>,
    randomize: bool,
    rng: &mut R,
) -> (Array1<f64>, Array3<f64>) {
    let defaults = SimulationConfig::default();
    let bodies = build_bodies(
        masses.unwrap_or_else(|| defaults.masses()),
        radii.unwrap_or_else(|| defaults.radii()),
        DEFAULT_SPEED_SCALE,
        randomize,
        DEFAULT_RANDOMIZATION_AMPLITUDE,
        rng,
    );
    let field = defaults.gravity_field();

    let (times, positions, _) =
        record(bodies, total_time, dt, &field, |state, masses| leapfrog_step(state, dt, masses, &field))
            .into_parts();
    (times, positions)
}

/// A validated, reusable simulation setup
///
/// # Example
///
/// ```rust
/// use three_body::{Simulation, SimulationConfig};
///
/// let simulation = Simulation::new(SimulationConfig::default().with_total_time(2.0)).unwrap();
/// let trajectory = simulation.run(&mut rand::rng());
/// assert_eq!(trajectory.steps(), 100);
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    factory: BodyFactory,
    field: GravityField,
    integrator: VelocityVerletIntegrator,
}

impl Simulation {
    /// Validate `config` and prepare a simulation
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let integrator = VelocityVerletIntegrator::new(config.time_step);
        if let Err(message) = integrator.validate_timestep() {
            log::warn!("{}", message);
        }

        Ok(Simulation {
            factory: BodyFactory::from_config(&config),
            field: config.gravity_field(),
            integrator,
            config,
        })
    }

    /// The configuration this simulation was built from
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The gravity field used for every step
    pub fn field(&self) -> &GravityField {
        &self.field
    }

    /// Number of steps each run records
    pub fn steps(&self) -> usize {
        step_count(self.config.total_time, self.config.time_step)
    }

    /// Build fresh bodies and integrate them for the configured duration
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Trajectory {
        let bodies = self.factory.build(rng);
        log::debug!(
            "running {} steps with {} (dt = {}, randomized = {})",
            self.steps(),
            self.integrator.name(),
            self.integrator.timestep(),
            self.factory.randomizes()
        );

        let trajectory = record(
            bodies,
            self.config.total_time,
            self.config.time_step,
            &self.field,
            |state, masses| self.integrator.step(state, masses, &self.field),
        );

        log::debug!("recorded {} snapshots", trajectory.steps());
        trajectory
    }

    /// Run with a generator seeded from `seed`
    pub fn run_seeded(&self, seed: u64) -> Trajectory {
        self.run(&mut StdRng::seed_from_u64(seed))
    }
}
