/*
 * Application Module
 *
 * This module defines the Model that owns the flock for the duration of a
 * run and the loop that drives it: step the population, then hand a
 * read-only snapshot to a FrameSink. The number of ticks is fixed up front.
 */

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::boid::Boid;
use crate::debug::DebugInfo;
use crate::error::ConfigError;
use crate::params::SimulationParams;
use crate::physics;

// Consumer of one frame per tick
pub trait FrameSink {
    // Returns the number of bytes emitted for the frame
    fn present(&mut self, tick: usize, boids: &[Boid], params: &SimulationParams) -> Result<usize>;
}

// Runs the simulation without drawing anything
#[derive(Debug, Default)]
pub struct HeadlessSink {
    pub frames: usize,
}

impl FrameSink for HeadlessSink {
    fn present(&mut self, _tick: usize, _boids: &[Boid], _params: &SimulationParams) -> Result<usize> {
        self.frames += 1;
        Ok(0)
    }
}

pub struct Model {
    boids: Vec<Boid>,
    params: SimulationParams,
    pub debug_info: DebugInfo,
}

impl Model {
    // Validate the parameters and spawn a random population
    pub fn new(params: SimulationParams) -> Result<Self, ConfigError> {
        let mut rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let boids = physics::spawn_population(&params, &mut rng)?;

        Ok(Self {
            boids,
            params,
            debug_info: DebugInfo::default(),
        })
    }

    // Start from a prepared population instead of a random one
    pub fn with_population(mut params: SimulationParams, boids: Vec<Boid>) -> Result<Self, ConfigError> {
        params.population = boids.len();
        params.validate()?;

        Ok(Self {
            boids,
            params,
            debug_info: DebugInfo::default(),
        })
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn snapshot(&self) -> &[Boid] {
        &self.boids
    }

    // Advance the flock by one tick
    pub fn update(&mut self) {
        let start = Instant::now();
        physics::step(&mut self.boids, &self.params);
        let elapsed = start.elapsed();

        self.debug_info.record_step(&self.boids, &self.params, elapsed);
        debug!(
            tick = self.debug_info.ticks,
            step_us = elapsed.as_micros() as u64,
            mean_speed = self.debug_info.mean_speed,
            out_of_bounds = self.debug_info.out_of_bounds,
            "step complete"
        );
    }
}

// Drive the model for the configured number of ticks
pub fn run<S: FrameSink>(model: &mut Model, sink: &mut S) -> Result<()> {
    let ticks = model.params.ticks;
    let delay = Duration::from_millis(model.params.frame_delay_ms);
    let started = Instant::now();

    for tick in 0..ticks {
        model.update();
        let bytes = sink.present(tick, &model.boids, &model.params)?;
        model.debug_info.last_frame_bytes = bytes;

        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }

    info!(
        ticks,
        elapsed_ms = started.elapsed().as_millis() as u64,
        mean_step_us = model.debug_info.mean_step_time().as_micros() as u64,
        "run finished"
    );
    Ok(())
}
