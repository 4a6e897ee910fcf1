/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that holds every constant
 * a run needs: viewport size, agent appearance, population size, tick count
 * and the tuning values of the three flocking rules. The values are fixed
 * for the duration of a run and are validated once before the first tick.
 */

use clap::ValueEnum;
use nannou::prelude::*;

use crate::error::ConfigError;
use crate::{GOID_SIZE, WINDOW_HEIGHT, WINDOW_WIDTH};

// How rule deltas are rounded
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum)]
pub enum ArithmeticMode {
    /// Integer-valued positions and velocities; every division truncates toward zero.
    #[default]
    Truncating,
    /// Unrounded floating point math. Smoother motion, different trajectories.
    Real,
}

impl ArithmeticMode {
    // Round a single scalar according to the mode
    #[inline]
    pub fn quantize(self, value: f32) -> f32 {
        match self {
            ArithmeticMode::Truncating => value.trunc(),
            ArithmeticMode::Real => value,
        }
    }

    // Divide a vector component-wise, truncating the quotient when required
    #[inline]
    pub fn divide(self, v: Vec2, divisor: f32) -> Vec2 {
        let q = v / divisor;
        vec2(self.quantize(q.x), self.quantize(q.y))
    }
}

// What happens to an agent that leaves the viewport
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum)]
pub enum WrapMode {
    /// `x < 0` becomes `extent + x`, `x > extent` becomes `extent - x`.
    /// Large overshoots can stay out of range.
    #[default]
    Reflect,
    /// True toroidal wrap, always lands in `[0, extent]`.
    Modulo,
}

#[derive(Clone, Debug)]
pub struct SimulationParams {
    pub width: u32,
    pub height: u32,
    pub radius: f32,
    pub color: Rgb<u8>,
    pub population: usize,
    pub ticks: usize,
    // Size of the nearest-neighbour prefix every rule looks at (self included)
    pub neighbours: usize,
    pub separation_distance: f32,
    // Divisor applied to the pull toward the local centroid
    pub cohesion_factor: f32,
    pub arithmetic: ArithmeticMode,
    pub wrap_mode: WrapMode,
    pub seed: Option<u64>,
    pub frame_delay_ms: u64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            radius: GOID_SIZE,
            color: rgb(200, 200, 100),
            population: 150,
            ticks: 100,
            neighbours: 7,
            separation_distance: GOID_SIZE * 5.0,
            cohesion_factor: 8.0,
            arithmetic: ArithmeticMode::default(),
            wrap_mode: WrapMode::default(),
            seed: None,
            frame_delay_ms: 0,
        }
    }
}

impl SimulationParams {
    // Check the parameter set once, before any agent is created
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyViewport {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ConfigError::InvalidRadius(self.radius));
        }
        if self.neighbours == 0 {
            return Err(ConfigError::NoNeighbours);
        }
        // An empty population never queries neighbours, so it is not an error
        if self.population > 0 && self.neighbours > self.population {
            return Err(ConfigError::TooManyNeighbours {
                neighbours: self.neighbours,
                population: self.population,
            });
        }
        if !(self.separation_distance.is_finite() && self.separation_distance >= 0.0) {
            return Err(ConfigError::InvalidSeparation(self.separation_distance));
        }
        if self.cohesion_factor == 0.0 || !self.cohesion_factor.is_finite() {
            return Err(ConfigError::InvalidCohesionFactor(self.cohesion_factor));
        }
        Ok(())
    }

    pub fn width_f32(&self) -> f32 {
        self.width as f32
    }

    pub fn height_f32(&self) -> f32 {
        self.height as f32
    }

    // Parameter ranges accepted on the command line
    pub fn get_population_range() -> std::ops::RangeInclusive<usize> {
        0..=10_000
    }

    pub fn get_neighbours_range() -> std::ops::RangeInclusive<usize> {
        1..=64
    }

    pub fn get_radius_range() -> std::ops::RangeInclusive<f32> {
        1.0..=20.0
    }
}

// Parse a command line value and reject it when it falls outside `range`
pub fn parse_in_range<T>(value: &str, range: std::ops::RangeInclusive<T>) -> Result<T, String>
where
    T: std::str::FromStr + PartialOrd + std::fmt::Display,
{
    let parsed: T = value
        .trim()
        .parse()
        .map_err(|_| format!("`{}` is not a valid number", value))?;
    if range.contains(&parsed) {
        Ok(parsed)
    } else {
        Err(format!(
            "{} is outside {}..={}",
            parsed,
            range.start(),
            range.end()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = SimulationParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.separation_distance, 15.0);
        assert_eq!(params.neighbours, 7);
        assert_eq!(params.cohesion_factor, 8.0);
    }

    #[test]
    fn rejects_more_neighbours_than_agents() {
        let params = SimulationParams {
            population: 5,
            neighbours: 6,
            ..SimulationParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(ConfigError::TooManyNeighbours {
                neighbours: 6,
                population: 5
            })
        );
    }

    #[test]
    fn rejects_zero_cohesion_factor() {
        let params = SimulationParams {
            cohesion_factor: 0.0,
            ..SimulationParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(ConfigError::InvalidCohesionFactor(0.0))
        );
    }

    #[test]
    fn empty_population_is_allowed() {
        let params = SimulationParams {
            population: 0,
            ..SimulationParams::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn rejects_zero_neighbours_and_empty_viewport() {
        let params = SimulationParams {
            neighbours: 0,
            ..SimulationParams::default()
        };
        assert_eq!(params.validate(), Err(ConfigError::NoNeighbours));

        let params = SimulationParams {
            height: 0,
            ..SimulationParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::EmptyViewport { height: 0, .. })
        ));
    }

    #[test]
    fn range_parser_accepts_bounds_and_rejects_outside_values() {
        let neighbours = SimulationParams::get_neighbours_range();
        assert_eq!(parse_in_range("1", neighbours.clone()), Ok(1));
        assert_eq!(parse_in_range("64", neighbours.clone()), Ok(64));
        assert!(parse_in_range("0", neighbours.clone()).is_err());
        assert!(parse_in_range("65", neighbours.clone()).is_err());
        assert!(parse_in_range("seven", neighbours).is_err());

        assert_eq!(parse_in_range("2.5", SimulationParams::get_radius_range()), Ok(2.5));
        assert!(parse_in_range("0.0", SimulationParams::get_radius_range()).is_err());
        assert!(parse_in_range("10001", SimulationParams::get_population_range()).is_err());
    }

    #[test]
    fn default_values_sit_inside_the_cli_ranges() {
        let params = SimulationParams::default();
        assert!(SimulationParams::get_population_range().contains(&params.population));
        assert!(SimulationParams::get_neighbours_range().contains(&params.neighbours));
        assert!(SimulationParams::get_radius_range().contains(&params.radius));
    }

    #[test]
    fn truncating_division_rounds_toward_zero() {
        let d = ArithmeticMode::Truncating.divide(vec2(-3.0, 7.0), 2.0);
        assert_eq!(d, vec2(-1.0, 3.0));
        let d = ArithmeticMode::Real.divide(vec2(-3.0, 7.0), 2.0);
        assert_eq!(d, vec2(-1.5, 3.5));
    }
}
