/*
 * Goid Flocking Simulation - Module Definitions
 *
 * This file defines the module structure for the terminal flocking
 * simulation. The simulation core (boid, neighbors, physics) has no I/O;
 * the renderer and terminal modules turn population snapshots into
 * inline images.
 */

// Re-export key components for easier access
pub use app::{run, FrameSink, HeadlessSink, Model};
pub use boid::Boid;
pub use debug::DebugInfo;
pub use error::ConfigError;
pub use params::{ArithmeticMode, SimulationParams, WrapMode};
pub use terminal::TerminalDisplay;

// Define modules
pub mod app;
pub mod boid;
pub mod debug;
pub mod error;
pub mod neighbors;
pub mod params;
pub mod physics;
pub mod renderer;
pub mod terminal;

// Constants
pub const GOID_SIZE: f32 = 3.0;
pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;
