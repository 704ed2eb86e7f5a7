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
//! Three-body demonstration
//!
//! Runs the default triangle configuration and prints what an animation
//! would draw: evenly sampled frames of the trajectory, plus energy and
//! momentum diagnostics of the initial state.
//!
//! # Running
//!
//! ```bash
//! # Default deterministic run (30 time units, as used for animations)
//! cargo run --example three_body --release
//!
//! # Perturbed initial positions with a fixed seed
//! cargo run --example three_body --release -- --randomize --seed 7
//!
//! # Load parameters from a JSON file and show debug logging
//! RUST_LOG=debug cargo run --example three_body -- --config scenario.json
//!
//! # Compare final positions across a parallel ensemble of 8 perturbed runs
//! cargo run --example three_body --release -- --ensemble 8
//! ```

use rand::rngs::StdRng;
use rand::SeedableRng;
use three_body::config::{MAX_ANIMATION_FRAMES, PLOT_TOTAL_TIME};
use three_body::integration::{masses_of, total_energy, total_momentum};
use three_body::{simulate_ensemble, PhaseState, Simulation, SimulationConfig};

/// Number of sampled frames printed to the terminal
const PRINTED_FRAMES: usize = 12;

struct DemoOptions {
    config: SimulationConfig,
    seed: u64,
    ensemble: usize,
}

fn parse_args() -> DemoOptions {
    let mut options = DemoOptions {
        config: SimulationConfig::default().with_total_time(PLOT_TOTAL_TIME),
        seed: 0,
        ensemble: 0,
    };

    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--randomize" => {
                options.config.randomize = true;
            }
            "--seed" => {
                match args.get(i + 1).map(|s| s.parse::<u64>()) {
                    Some(Ok(seed)) => options.seed = seed,
                    _ => log::warn!("--seed requires an integer argument, using 0"),
                }
                i += 1;
            }
            "--time" => {
                match args.get(i + 1).map(|s| s.parse::<f64>()) {
                    Some(Ok(t)) => options.config.total_time = t,
                    _ => log::warn!("--time requires a numeric argument, using {}", PLOT_TOTAL_TIME),
                }
                i += 1;
            }
            "--ensemble" => {
                match args.get(i + 1).map(|s| s.parse::<usize>()) {
                    Some(Ok(n)) => options.ensemble = n,
                    _ => log::warn!("--ensemble requires an integer argument"),
                }
                i += 1;
            }
            "--config" => {
                match args.get(i + 1) {
                    Some(path) => match load_config(path) {
                        Ok(config) => options.config = config,
                        Err(e) => log::error!("could not load {}: {}", path, e),
                    },
                    None => log::error!("--config requires a path"),
                }
                i += 1;
            }
            other => log::warn!("ignoring unknown argument '{}'", other),
        }
        i += 1;
    }

    options
}

fn load_config(path: &str) -> Result<SimulationConfig, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn main() {
    env_logger::init();

    println!("==========================================================");
    println!("          Gravitational Three-Body Simulation");
    println!("==========================================================");
    println!();

    let options = parse_args();
    let simulation = match Simulation::new(options.config) {
        Ok(simulation) => simulation,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let config = simulation.config();

    println!("Configuration:");
    println!("  G = {}, softening = {}, clamp = {}", config.gravitational_constant, config.softening_length, config.max_acceleration);
    println!("  Duration: {} (dt = {}, {} steps)", config.total_time, config.time_step, simulation.steps());
    println!("  Randomized: {} (seed {})", config.randomize, options.seed);
    println!();

    let trajectory = simulation.run(&mut StdRng::seed_from_u64(options.seed));
    let bodies = trajectory.bodies();

    for body in bodies {
        println!(
            "{} ({}) - mass {:.2}, start {}, velocity {}",
            body.metadata.name, body.metadata.color, body.mass, body.position, body.velocity
        );
    }

    let masses = masses_of(bodies);
    let initial = PhaseState::from_bodies(bodies, simulation.field());
    println!();
    println!("Initial total energy:   {:.6}", total_energy(&initial, masses.view(), simulation.field()));
    println!("Initial total momentum: {}", total_momentum(initial.velocities.view(), masses.view()));
    println!();

    let frames = trajectory.frame_indices(MAX_ANIMATION_FRAMES);
    println!("{} animation frames from {} steps; printing {}:", frames.len(), trajectory.steps(), PRINTED_FRAMES);
    let stride = (frames.len() / PRINTED_FRAMES).max(1);
    for &step in frames.iter().step_by(stride) {
        if let Some(snapshot) = trajectory.snapshot(step) {
            println!(
                "  t = {:6.2}  {}  {}  {}",
                trajectory.times()[step],
                snapshot[0],
                snapshot[1],
                snapshot[2]
            );
        }
    }

    if options.ensemble > 0 {
        println!();
        println!("Ensemble of {} perturbed runs:", options.ensemble);
        let perturbed = Simulation::new(config.clone().with_randomize(true))
            .expect("configuration was already validated");
        let seeds: Vec<u64> = (0..options.ensemble as u64).map(|i| options.seed + i).collect();
        for (seed, run) in seeds.iter().zip(simulate_ensemble(&perturbed, &seeds)) {
            if let Some(last) = run.snapshot(run.steps() - 1) {
                println!("  seed {:3}: {}  {}  {}", seed, last[0], last[1], last[2]);
            }
        }
    }
}
