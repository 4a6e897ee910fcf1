/*
 * Error Module
 *
 * Configuration errors surfaced by SimulationParams::validate. The step
 * itself has no failure modes once the parameters have been accepted.
 */

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("viewport must be non-empty, got {width}x{height}")]
    EmptyViewport { width: u32, height: u32 },
    #[error("agent radius must be positive and finite, got {0}")]
    InvalidRadius(f32),
    #[error("neighbour count must be at least 1")]
    NoNeighbours,
    #[error("neighbour count {neighbours} exceeds population size {population}")]
    TooManyNeighbours { neighbours: usize, population: usize },
    #[error("separation distance must be finite and non-negative, got {0}")]
    InvalidSeparation(f32),
    #[error("cohesion factor must be finite and non-zero, got {0}")]
    InvalidCohesionFactor(f32),
}
