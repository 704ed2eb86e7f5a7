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
//! Independent seeded runs
//!
//! Each run owns its generator and output tensor, so runs share nothing but
//! the read-only [`Simulation`]. With the `parallel` feature the runs are
//! spread across the Rayon thread pool; the body-pair sum inside a run stays
//! sequential.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{Simulation, Trajectory};

/// Run `simulation` once per seed and return the trajectories in seed order
///
/// Only meaningful with randomization enabled; otherwise every run produces
/// the same trajectory.
pub fn simulate_ensemble(simulation: &Simulation, seeds: &[u64]) -> Vec<Trajectory> {
    log::debug!("running ensemble of {} simulations", seeds.len());

    #[cfg(feature = "parallel")]
    {
        seeds.par_iter().map(|&seed| simulation.run_seeded(seed)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        seeds.iter().map(|&seed| simulation.run_seeded(seed)).collect()
    }
}
