/*
 * Goid Flocking Simulation
 *
 * This application simulates the flocking behavior of birds (goids) based on three main rules:
 * 1. Separation: Avoid crowding neighbors
 * 2. Alignment: Steer towards the average heading of neighbors
 * 3. Cohesion: Steer towards the average position of neighbors
 *
 * Every tick is rendered to an image and shown inline in the terminal
 * (iTerm2 inline image protocol). Logs go to stderr so they do not
 * interleave with the image stream on stdout.
 */

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use goids::params::parse_in_range;
use goids::{run, ArithmeticMode, HeadlessSink, Model, SimulationParams, TerminalDisplay, WrapMode};

#[derive(Parser, Debug)]
#[command(name = "goids", version, about = "Boid flocking rendered inline in the terminal")]
struct Cli {
    /// Viewport width in pixels.
    #[arg(long, default_value_t = SimulationParams::default().width)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = SimulationParams::default().height)]
    height: u32,

    /// Drawn radius of every goid, also bounds the initial velocity.
    #[arg(long, default_value_t = SimulationParams::default().radius, value_parser = parse_radius)]
    radius: f32,

    /// Number of goids.
    #[arg(long, default_value_t = SimulationParams::default().population, value_parser = parse_population)]
    population: usize,

    /// Number of ticks to simulate.
    #[arg(long, default_value_t = SimulationParams::default().ticks)]
    ticks: usize,

    /// Nearest neighbours considered by each rule, the goid itself included.
    #[arg(long, default_value_t = SimulationParams::default().neighbours, value_parser = parse_neighbours)]
    neighbours: usize,

    /// Distance under which neighbours push each other apart (defaults to 5 x radius).
    #[arg(long)]
    separation: Option<f32>,

    /// Divisor damping the pull toward the local centroid.
    #[arg(long, default_value_t = SimulationParams::default().cohesion_factor)]
    cohesion: f32,

    /// Rounding applied to rule deltas.
    #[arg(long, value_enum, default_value_t = ArithmeticMode::Truncating)]
    arithmetic: ArithmeticMode,

    /// Behaviour at the viewport edges.
    #[arg(long, value_enum, default_value_t = WrapMode::Reflect)]
    wrap: WrapMode,

    /// Seed for the initial population.
    #[arg(long)]
    seed: Option<u64>,

    /// Pause between frames in milliseconds.
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Run the simulation without drawing.
    #[arg(long)]
    headless: bool,
}

impl Cli {
    fn params(&self) -> SimulationParams {
        SimulationParams {
            width: self.width,
            height: self.height,
            radius: self.radius,
            population: self.population,
            ticks: self.ticks,
            neighbours: self.neighbours,
            separation_distance: self.separation.unwrap_or(self.radius * 5.0),
            cohesion_factor: self.cohesion,
            arithmetic: self.arithmetic,
            wrap_mode: self.wrap,
            seed: self.seed,
            frame_delay_ms: self.delay_ms,
            ..SimulationParams::default()
        }
    }
}

fn parse_radius(value: &str) -> Result<f32, String> {
    parse_in_range(value, SimulationParams::get_radius_range())
}

fn parse_population(value: &str) -> Result<usize, String> {
    parse_in_range(value, SimulationParams::get_population_range())
}

fn parse_neighbours(value: &str) -> Result<usize, String> {
    parse_in_range(value, SimulationParams::get_neighbours_range())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut model = Model::new(cli.params()).context("invalid simulation parameters")?;
    let params = model.params();
    info!(
        population = params.population,
        ticks = params.ticks,
        neighbours = params.neighbours,
        arithmetic = ?params.arithmetic,
        wrap = ?params.wrap_mode,
        seed = ?params.seed,
        "Starting goid simulation"
    );

    if cli.headless {
        let mut sink = HeadlessSink::default();
        run(&mut model, &mut sink)?;
    } else {
        let stdout = io::stdout();
        let mut display = TerminalDisplay::new(stdout.lock())?;
        run(&mut model, &mut display)?;
    }

    info!(
        mean_speed = model.debug_info.mean_speed,
        out_of_bounds = model.debug_info.out_of_bounds,
        "Final flock state"
    );
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
}
