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
//! Conserved quantities used to judge integration quality
//!
//! Without the acceleration clamp, softened gravity is pairwise symmetric, so
//! total momentum is conserved to rounding and the softened total energy
//! oscillates around its initial value.

use ndarray::{ArrayView1, ArrayView2};

use super::PhaseState;
use crate::components::Vector2;
use crate::forces::gravity::GravityField;

/// Total linear momentum `Σ m_i v_i`
pub fn total_momentum(velocities: ArrayView2<'_, f64>, masses: ArrayView1<'_, f64>) -> Vector2 {
    let mut total = Vector2::zero();
    for (i, &mass) in masses.iter().enumerate() {
        total += Vector2::new(velocities[[i, 0]], velocities[[i, 1]]) * mass;
    }
    total
}

/// Total kinetic energy
///
/// KE = Σ 0.5 * m * v²
pub fn kinetic_energy(velocities: ArrayView2<'_, f64>, masses: ArrayView1<'_, f64>) -> f64 {
    masses
        .iter()
        .enumerate()
        .map(|(i, &mass)| {
            let v_sq = velocities[[i, 0]] * velocities[[i, 0]] + velocities[[i, 1]] * velocities[[i, 1]];
            0.5 * mass * v_sq
        })
        .sum()
}

/// Potential energy of the softened field
///
/// PE = -Σ_{i<j} G m_i m_j / sqrt(r² + ε²)
pub fn potential_energy(
    positions: ArrayView2<'_, f64>,
    masses: ArrayView1<'_, f64>,
    field: &GravityField,
) -> f64 {
    let n = masses.len();
    let eps_sq = field.softening() * field.softening();
    let mut total = 0.0;

    for i in 0..n {
        for j in (i + 1)..n {
            let dx = positions[[j, 0]] - positions[[i, 0]];
            let dy = positions[[j, 1]] - positions[[i, 1]];
            let softened = (dx * dx + dy * dy + eps_sq).sqrt();
            if softened > 0.0 {
                total -= field.g_constant() * masses[i] * masses[j] / softened;
            }
        }
    }

    total
}

/// Kinetic plus potential energy of `state`
pub fn total_energy(state: &PhaseState, masses: ArrayView1<'_, f64>, field: &GravityField) -> f64 {
    kinetic_energy(state.velocities.view(), masses) + potential_energy(state.positions.view(), masses, field)
}
