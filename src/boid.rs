/*
 * Boid Module
 *
 * This module defines the Boid struct and the three classic flocking rules.
 * Every rule reads a snapshot of the agent's nearest neighbours and mutates
 * the agent's velocity and position in place:
 * 1. Separation: replace velocity with the push away from crowding neighbours
 * 2. Alignment: add the average neighbour velocity
 * 3. Cohesion: add a damped pull toward the neighbours' centroid
 */

use nannou::prelude::*;
use rand::Rng;

use crate::params::{ArithmeticMode, SimulationParams};

#[derive(Clone, Copy, Debug)]
pub struct Boid {
    pub position: Point2,
    // Displacement applied this tick, its length is the speed
    pub velocity: Vec2,
    radius: f32,
    color: Rgb<u8>,
}

impl Boid {
    pub fn new(position: Point2, velocity: Vec2, radius: f32, color: Rgb<u8>) -> Self {
        Self {
            position,
            velocity,
            radius,
            color,
        }
    }

    // Uniformly random position in the viewport, velocity components in [0, radius).
    // Callers go through physics::spawn_population, which validates the params first.
    pub(crate) fn random<R: Rng + ?Sized>(rng: &mut R, params: &SimulationParams) -> Self {
        let mode = params.arithmetic;
        let x = mode.quantize(rng.gen_range(0.0..params.width_f32()));
        let y = mode.quantize(rng.gen_range(0.0..params.height_f32()));
        let vx = mode.quantize(rng.gen_range(0.0..params.radius));
        let vy = mode.quantize(rng.gen_range(0.0..params.radius));

        Self::new(pt2(x, y), vec2(vx, vy), params.radius, params.color)
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn color(&self) -> Rgb<u8> {
        self.color
    }

    // Where the trailing edge of the drawn agent ends
    pub fn tail(&self) -> Point2 {
        self.position - self.velocity
    }

    #[inline]
    pub fn distance(&self, other: &Boid) -> f32 {
        self.position.distance(other.position)
    }

    // Steer to avoid crowding local boids
    pub fn separation(&mut self, neighbours: &[Boid], separation_distance: f32) {
        let mut push = Vec2::ZERO;

        for other in neighbours {
            if self.distance(other) < separation_distance {
                push += self.position - other.position;
            }
        }

        // Overwrites the previous heading
        self.velocity = push;
        self.position += push;
    }

    // Steer towards the average heading of local boids
    pub fn alignment(&mut self, neighbours: &[Boid], mode: ArithmeticMode) {
        if neighbours.is_empty() {
            return;
        }

        let heading = neighbours
            .iter()
            .fold(Vec2::ZERO, |acc, other| acc + other.velocity);
        let d = mode.divide(heading, neighbours.len() as f32);

        self.velocity += d;
        self.position += d;
    }

    // Steer to move toward the average position of local boids
    pub fn cohesion(&mut self, neighbours: &[Boid], cohesion_factor: f32, mode: ArithmeticMode) {
        if neighbours.is_empty() {
            return;
        }

        let total = neighbours
            .iter()
            .fold(Vec2::ZERO, |acc, other| acc + other.position);
        let centroid = mode.divide(total, neighbours.len() as f32);
        let d = mode.divide(centroid - self.position, cohesion_factor);

        self.velocity += d;
        self.position += d;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn boid(x: f32, y: f32, vx: f32, vy: f32) -> Boid {
        Boid::new(pt2(x, y), vec2(vx, vy), 3.0, rgb(200, 200, 100))
    }

    #[test]
    fn separation_sums_offsets_within_threshold() {
        let mut me = boid(10.0, 10.0, 4.0, 4.0);
        let neighbours = [
            me,
            boid(13.0, 10.0, 0.0, 0.0),
            boid(10.0, 6.0, 0.0, 0.0),
            boid(40.0, 10.0, 0.0, 0.0),
        ];

        me.separation(&neighbours, 15.0);

        assert_eq!(me.velocity, vec2(-3.0, 4.0));
        assert_eq!(me.position, pt2(7.0, 14.0));
    }

    #[test]
    fn separation_without_close_neighbours_zeroes_velocity() {
        let mut me = boid(100.0, 100.0, 5.0, -2.0);
        let neighbours = [me, boid(200.0, 100.0, 1.0, 1.0)];

        me.separation(&neighbours, 15.0);

        assert_eq!(me.velocity, Vec2::ZERO);
        assert_eq!(me.position, pt2(100.0, 100.0));
    }

    #[test]
    fn separation_threshold_is_strict() {
        let mut me = boid(0.0, 0.0, 0.0, 0.0);
        let neighbours = [me, boid(15.0, 0.0, 0.0, 0.0)];

        me.separation(&neighbours, 15.0);

        assert_eq!(me.velocity, Vec2::ZERO);
    }

    #[test]
    fn alignment_adds_truncated_average_velocity() {
        let mut me = boid(50.0, 50.0, 1.0, 1.0);
        let neighbours = [
            boid(50.0, 50.0, 0.0, 0.0),
            boid(52.0, 50.0, 3.0, -1.0),
            boid(48.0, 50.0, 2.0, -2.0),
        ];

        me.alignment(&neighbours, ArithmeticMode::Truncating);

        // (5, -3) / 3 truncates to (1, -1)
        assert_eq!(me.velocity, vec2(2.0, 0.0));
        assert_eq!(me.position, pt2(51.0, 49.0));
    }

    #[test]
    fn cohesion_pulls_toward_centroid() {
        let me = boid(0.0, 0.0, 0.0, 0.0);
        let neighbours = [me, boid(10.0, 0.0, 0.0, 0.0)];

        let mut real = me;
        real.cohesion(&neighbours, 2.0, ArithmeticMode::Real);
        assert_eq!(real.velocity, vec2(2.5, 0.0));
        assert_eq!(real.position, pt2(2.5, 0.0));

        let mut truncated = me;
        truncated.cohesion(&neighbours, 2.0, ArithmeticMode::Truncating);
        assert_eq!(truncated.velocity, vec2(2.0, 0.0));
        assert_eq!(truncated.position, pt2(2.0, 0.0));
    }

    #[test]
    fn rules_ignore_an_empty_neighbourhood() {
        let mut me = boid(5.0, 5.0, 1.0, 2.0);
        me.alignment(&[], ArithmeticMode::Truncating);
        me.cohesion(&[], 8.0, ArithmeticMode::Truncating);
        assert_eq!(me.velocity, vec2(1.0, 2.0));
        assert_eq!(me.position, pt2(5.0, 5.0));
    }

    #[test]
    fn random_boids_start_inside_the_viewport() {
        let params = SimulationParams::default();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let b = Boid::random(&mut rng, &params);
            assert!(b.position.x >= 0.0 && b.position.x < params.width_f32());
            assert!(b.position.y >= 0.0 && b.position.y < params.height_f32());
            assert!(b.velocity.x >= 0.0 && b.velocity.x < params.radius);
            assert!(b.velocity.y >= 0.0 && b.velocity.y < params.radius);
            assert_eq!(b.position.x, b.position.x.trunc());
            assert_eq!(b.radius(), params.radius);
        }
    }

    #[test]
    fn tail_trails_behind_the_velocity() {
        let b = boid(10.0, 10.0, 3.0, -2.0);
        assert_eq!(b.tail(), pt2(7.0, 12.0));
    }
}
