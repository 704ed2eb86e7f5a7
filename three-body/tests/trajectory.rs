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
//! Integration tests for the shape, ordering and determinism of recorded
//! trajectories

use rand::rngs::StdRng;
use rand::SeedableRng;
use three_body::config::{DEFAULT_MAX_ACCELERATION, DEFAULT_POSITIONS, MAX_ANIMATION_FRAMES};
use three_body::{compute_accelerations, simulate, simulate_ensemble, Simulation, SimulationConfig};

fn default_run() -> three_body::Trajectory {
    let simulation = Simulation::new(SimulationConfig::default()).unwrap();
    simulation.run(&mut StdRng::seed_from_u64(0))
}

#[test]
fn test_default_shape() {
    let mut rng = StdRng::seed_from_u64(0);
    let (times, positions) = simulate(20.0, 0.02, None, None, false, &mut rng);

    assert_eq!(times.len(), 1000);
    assert_eq!(positions.shape(), &[1000, 3, 2]);
    assert_eq!(times[0], 0.0);
    assert!((times[999] - 20.0).abs() < 1e-9);
}

#[test]
fn test_times_are_uniform_and_increasing() {
    let trajectory = default_run();
    let times = trajectory.times();
    let spacing = 20.0 / 999.0;

    for pair in times.as_slice().unwrap().windows(2) {
        assert!(pair[1] > pair[0]);
        assert!((pair[1] - pair[0] - spacing).abs() < 1e-9);
    }
}

#[test]
fn test_first_snapshot_is_initial_configuration() {
    let mut rng = StdRng::seed_from_u64(0);
    let (_, positions) = simulate(20.0, 0.02, None, None, false, &mut rng);

    // Body 0 starts at the apex of the triangle, exactly
    assert_eq!(positions[[0, 0, 0]], 0.0);
    assert_eq!(positions[[0, 0, 1]], 2.0);

    for (body, expected) in DEFAULT_POSITIONS.iter().enumerate() {
        assert_eq!(positions[[0, body, 0]], expected[0]);
        assert_eq!(positions[[0, body, 1]], expected[1]);
    }
}

#[test]
fn test_first_snapshot_matches_randomized_bodies() {
    let config = SimulationConfig::default().with_randomize(true);
    let simulation = Simulation::new(config).unwrap();

    for seed in 0..5 {
        let trajectory = simulation.run_seeded(seed);
        let first = trajectory.snapshot(0).unwrap();
        for (body, position) in trajectory.bodies().iter().zip(first.iter()) {
            assert_eq!(&body.position, position);
        }
    }
}

#[test]
fn test_bodies_move() {
    let trajectory = default_run();
    let last = trajectory.snapshot(trajectory.steps() - 1).unwrap();
    for (body, position) in trajectory.bodies().iter().zip(last.iter()) {
        assert_ne!(&body.position, position);
        assert!(position.is_valid());
    }
}

#[test]
fn test_deterministic_without_randomization() {
    let (times_a, positions_a) = simulate(20.0, 0.02, None, None, false, &mut StdRng::seed_from_u64(1));
    let (times_b, positions_b) = simulate(20.0, 0.02, None, None, false, &mut StdRng::seed_from_u64(2));

    // The generator is never consulted, so even different seeds agree bit for bit
    assert_eq!(times_a, times_b);
    assert_eq!(positions_a, positions_b);
}

#[test]
fn test_free_function_matches_simulation() {
    let (times, positions) = simulate(20.0, 0.02, None, None, false, &mut StdRng::seed_from_u64(0));
    let trajectory = default_run();

    assert_eq!(&times, trajectory.times());
    assert_eq!(&positions, trajectory.positions());
}

#[test]
fn test_deterministic_with_equal_seeds() {
    let simulation = Simulation::new(SimulationConfig::default().with_randomize(true)).unwrap();

    let a = simulation.run_seeded(11);
    let b = simulation.run_seeded(11);
    let c = simulation.run_seeded(12);

    assert_eq!(a, b);
    assert_ne!(a.positions(), c.positions());
}

#[test]
fn test_custom_masses_and_radii_pass_through() {
    let config = SimulationConfig::default()
        .with_masses([2.0, 1.0, 0.5])
        .with_radii([0.3, 0.2, 0.1]);
    let trajectory = Simulation::new(config).unwrap().run_seeded(0);

    let masses: Vec<f64> = trajectory.bodies().iter().map(|b| b.mass).collect();
    let radii: Vec<f64> = trajectory.bodies().iter().map(|b| b.radius).collect();
    assert_eq!(masses, vec![2.0, 1.0, 0.5]);
    assert_eq!(radii, vec![0.3, 0.2, 0.1]);
    assert_eq!(trajectory.bodies()[2].metadata.color, "#27ae60");
}

#[test]
fn test_acceleration_clamp_holds_along_trajectory() {
    let trajectory = default_run();
    let positions = trajectory.positions();
    let dt = 0.02;

    // Leapfrog satisfies x[k+1] - 2 x[k] + x[k-1] = a[k] dt², so second
    // differences recover the clamped accelerations up to rounding.
    for k in 1..trajectory.steps() - 1 {
        for body in 0..3 {
            let ax = (positions[[k + 1, body, 0]] - 2.0 * positions[[k, body, 0]]
                + positions[[k - 1, body, 0]])
                / (dt * dt);
            let ay = (positions[[k + 1, body, 1]] - 2.0 * positions[[k, body, 1]]
                + positions[[k - 1, body, 1]])
                / (dt * dt);
            let magnitude = ax.hypot(ay);
            assert!(
                magnitude <= DEFAULT_MAX_ACCELERATION + 1e-6,
                "step {} body {}: |a| = {}",
                k,
                body,
                magnitude
            );
        }
    }
}

#[test]
fn test_field_is_clamped_at_every_snapshot() {
    let trajectory = default_run();
    let simulation = Simulation::new(SimulationConfig::default()).unwrap();
    let masses = ndarray::array![1.0, 0.8, 1.2];

    let mut clamped_steps = 0;
    for step in trajectory.positions().outer_iter() {
        let acc = compute_accelerations(step, masses.view(), simulation.field());
        for row in acc.outer_iter() {
            let magnitude = row[0].hypot(row[1]);
            assert!(magnitude <= DEFAULT_MAX_ACCELERATION * (1.0 + 1e-12));
            if magnitude >= DEFAULT_MAX_ACCELERATION * (1.0 - 1e-12) {
                clamped_steps += 1;
            }
        }
    }

    // The default triangle collapses into close encounters that hit the clamp
    assert!(clamped_steps > 0);
}

#[test]
fn test_frame_sampling_for_animation() {
    let config = SimulationConfig::default().with_total_time(30.0);
    let trajectory = Simulation::new(config).unwrap().run_seeded(0);
    assert_eq!(trajectory.steps(), 1500);

    let frames = trajectory.frame_indices(MAX_ANIMATION_FRAMES);
    assert_eq!(frames.len(), MAX_ANIMATION_FRAMES);
    assert_eq!(frames.first(), Some(&0));
    assert_eq!(frames.last(), Some(&1499));
}

#[test]
fn test_ensemble_runs_are_independent() {
    let config = SimulationConfig::default()
        .with_total_time(2.0)
        .with_randomize(true);
    let simulation = Simulation::new(config).unwrap();
    let runs = simulate_ensemble(&simulation, &[1, 2, 3, 4]);

    assert_eq!(runs.len(), 4);
    for run in &runs {
        assert_eq!(run.positions().shape(), &[100, 3, 2]);
    }
    assert_ne!(runs[0].positions(), runs[1].positions());
    assert_eq!(runs[2], simulation.run_seeded(3));
}
