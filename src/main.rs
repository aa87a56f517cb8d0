mod config;
mod food;
mod game;
mod grid;
mod host;
mod render;
mod snake;
mod term;

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::EnvFilter;

use crate::config::Args;
use crate::game::{Exit, SnakeGame};
use crate::host::{CellSampler, TickClock};
use crate::term::{TermInput, TermRenderer, TermSession};

fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.game_config()?;

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "seeding food placement");
    let random = CellSampler::new(StdRng::seed_from_u64(seed), config.grid);

    term::check_fits(config.grid).context("Board does not fit in this terminal")?;

    // Dropping the session puts the terminal back, whichever way we leave.
    let session = TermSession::enter().context("Failed to set up the terminal")?;
    let renderer = TermRenderer::new(config.grid)?;
    let input = TermInput::new(&session);

    let mut game = SnakeGame::new(config, renderer, input, TickClock::new(), random);
    let exit = game.run()?;
    let length = game.state().snake().len();
    drop(session);

    if exit == Exit::BoardFull {
        println!("The board is full! Final length: {}/{}", length, config.grid.total_cells());
    }

    Ok(())
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
