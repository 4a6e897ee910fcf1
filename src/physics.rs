/*
 * Physics Module
 *
 * This module handles the per-tick simulation of the flock:
 * - spawning the initial population
 * - the step that runs neighbour ranking, the three rules and the edge wrap
 *   for every boid
 *
 * Boids are updated one at a time in population order and mutated in place,
 * so later boids in a tick see the already-updated state of earlier ones.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::boid::Boid;
use crate::error::ConfigError;
use crate::neighbors::nearest_neighbours;
use crate::params::{SimulationParams, WrapMode};

// Create the initial population, rejecting parameters that cannot be sampled
pub fn spawn_population<R: Rng + ?Sized>(
    params: &SimulationParams,
    rng: &mut R,
) -> Result<Vec<Boid>, ConfigError> {
    params.validate()?;

    Ok((0..params.population)
        .map(|_| Boid::random(rng, params))
        .collect())
}

// Advance every boid by one tick
pub fn step(boids: &mut [Boid], params: &SimulationParams) {
    for i in 0..boids.len() {
        // Snapshot the neighbourhood before this boid moves
        let neighbours = nearest_neighbours(&boids[i], boids, params.neighbours);

        let boid = &mut boids[i];
        boid.separation(&neighbours, params.separation_distance);
        boid.alignment(&neighbours, params.arithmetic);
        boid.cohesion(&neighbours, params.cohesion_factor, params.arithmetic);

        stay_in_window(boid, params);
    }
}

// If a boid leaves the window it comes back on the other side
pub fn stay_in_window(boid: &mut Boid, params: &SimulationParams) {
    boid.position = wrap_position(
        boid.position,
        params.width_f32(),
        params.height_f32(),
        params.wrap_mode,
    );
}

pub fn wrap_position(position: Point2, width: f32, height: f32, mode: WrapMode) -> Point2 {
    pt2(
        wrap_axis(position.x, width, mode),
        wrap_axis(position.y, height, mode),
    )
}

// Positions inside [0, extent] are left untouched
#[inline]
pub fn wrap_axis(value: f32, extent: f32, mode: WrapMode) -> f32 {
    if (0.0..=extent).contains(&value) {
        return value;
    }

    match mode {
        WrapMode::Reflect => {
            if value < 0.0 {
                extent + value
            } else {
                extent - value
            }
        }
        WrapMode::Modulo => value.rem_euclid(extent),
    }
}

// True when the position lies in the closed viewport rectangle
pub fn in_viewport(position: Point2, width: f32, height: f32) -> bool {
    (0.0..=width).contains(&position.x) && (0.0..=height).contains(&position.y)
}
