use std::{
    fs,
    io::{stdout, Write},
};

use anyhow::{anyhow, Context, Result};
use clap::Parser;

pub use utils::Pos;
mod utils;

pub use world::{Cell, Faction, Grid};
pub mod world;

pub use error::ConfigurationError;
mod error;

mod pattern;

pub use init::initialize;
mod init;

pub use sim::{step, Frame, Sim, SimHandle};
mod sim;

pub use view::View;
mod view;

pub use config::Config;
mod config;

fn starting_grid(config: &Config) -> Result<Grid> {
    let Some(path) = &config.board else {
        let grid = initialize(
            config.rows,
            config.cols,
            config.initial_cells_a,
            config.initial_cells_b,
            &mut config.rng(),
        )?;
        return Ok(grid);
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("could not read board from {}", path.display()))?;
    Ok(Grid::deserialize(&content))
}

fn run_headless(grid: Grid, generations: usize) -> Result<()> {
    let last = sim::run(grid, generations);
    let mut out = stdout().lock();
    write!(out, "{last}")?;
    writeln!(
        out,
        "after {generations} generations: A={} B={}",
        last.population(Faction::A),
        last.population(Faction::B)
    )?;
    Ok(())
}

pub fn main() -> Result<()> {
    env_logger::init();
    let config = Config::parse();

    let grid = starting_grid(&config)?;
    log::info!(
        "starting {}x{} board with A={} B={}",
        grid.rows(),
        grid.cols(),
        grid.population(Faction::A),
        grid.population(Faction::B)
    );

    if config.headless {
        return run_headless(grid, config.generations);
    }

    let simulation = Sim::spawn(grid, config.generations, config.interval());
    let view = View::spawn(simulation.handle());

    view.join()?;
    simulation
        .join()
        .map_err(|_| anyhow!("simulation thread panicked"))?;
    Ok(())
}
