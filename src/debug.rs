/*
 * Debug Information Module
 *
 * Run statistics gathered after every tick and reported through tracing:
 * - ticks completed and time spent stepping
 * - mean boid speed
 * - boids left outside the viewport by the edge wrap
 * - size of the last frame handed to the display
 */

use std::time::Duration;

use crate::boid::Boid;
use crate::physics::in_viewport;
use crate::params::SimulationParams;

#[derive(Debug, Default, Clone)]
pub struct DebugInfo {
    pub ticks: usize,
    pub last_step_time: Duration,
    pub total_step_time: Duration,
    pub mean_speed: f32,
    pub out_of_bounds: usize,
    pub last_frame_bytes: usize,
}

impl DebugInfo {
    pub fn record_step(&mut self, boids: &[Boid], params: &SimulationParams, elapsed: Duration) {
        self.ticks += 1;
        self.last_step_time = elapsed;
        self.total_step_time += elapsed;

        self.mean_speed = if boids.is_empty() {
            0.0
        } else {
            boids.iter().map(|b| b.velocity.length()).sum::<f32>() / boids.len() as f32
        };

        let (width, height) = (params.width_f32(), params.height_f32());
        self.out_of_bounds = boids
            .iter()
            .filter(|b| !in_viewport(b.position, width, height))
            .count();
    }

    pub fn mean_step_time(&self) -> Duration {
        if self.ticks == 0 {
            Duration::ZERO
        } else {
            match u32::try_from(self.ticks) {
                Ok(ticks) => self.total_step_time / ticks,
                Err(_) => self.total_step_time.div_f64(self.ticks as f64),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nannou::prelude::{pt2, rgb, vec2};

    #[test]
    fn records_speed_and_escaped_boids() {
        let params = SimulationParams::default();
        let boids = [
            Boid::new(pt2(10.0, 10.0), vec2(3.0, 4.0), 3.0, rgb(0, 0, 0)),
            Boid::new(pt2(-10.0, 10.0), vec2(0.0, 1.0), 3.0, rgb(0, 0, 0)),
        ];
        let mut info = DebugInfo::default();

        info.record_step(&boids, &params, Duration::from_millis(4));
        info.record_step(&boids, &params, Duration::from_millis(2));

        assert_eq!(info.ticks, 2);
        assert_eq!(info.mean_speed, 3.0);
        assert_eq!(info.out_of_bounds, 1);
        assert_eq!(info.mean_step_time(), Duration::from_millis(3));
    }

    #[test]
    fn mean_step_time_survives_tick_counts_beyond_u32() {
        let info = DebugInfo {
            ticks: u32::MAX as usize + 1,
            total_step_time: Duration::from_secs(u32::MAX as u64 + 1),
            ..DebugInfo::default()
        };
        assert_eq!(info.mean_step_time(), Duration::from_secs(1));
        assert_eq!(DebugInfo::default().mean_step_time(), Duration::ZERO);
    }
}
