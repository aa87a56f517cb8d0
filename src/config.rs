use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use crate::grid::Grid;

/// Snake on a wraparound board, played in the terminal.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Board width in screen units.
    #[arg(long, value_name = "PX", default_value_t = 640)]
    pub width: i32,
    /// Board height in screen units.
    #[arg(long, value_name = "PX", default_value_t = 480)]
    pub height: i32,
    /// Side length of one cell in screen units.
    #[arg(long, value_name = "PX", default_value_t = 20)]
    pub cell_size: i32,
    /// Steps per second.
    #[arg(
        long,
        value_name = "RATE",
        default_value_t = 10,
        value_parser = clap::value_parser!(u32).range(1..=1_000)
    )]
    pub speed: u32,
    /// Steps per second while Space is held.
    #[arg(
        long,
        value_name = "RATE",
        default_value_t = 20,
        value_parser = clap::value_parser!(u32).range(1..=1_000)
    )]
    pub boost_speed: u32,
    /// Seed for food placement. A random seed is used when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Write logs to this file. Nothing is logged otherwise.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub grid: Grid,
    pub speed: u32,
    pub boost_speed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig { grid: Grid::new(640, 480, 20), speed: 10, boost_speed: 20 }
    }
}

impl Args {
    pub fn game_config(&self) -> Result<GameConfig> {
        if self.cell_size <= 0 {
            bail!("Cell size must be positive, got {}", self.cell_size);
        }
        for (name, side) in [("width", self.width), ("height", self.height)] {
            if side <= 0 || side % self.cell_size != 0 {
                bail!(
                    "Board {} must be a positive multiple of the cell size {}, got {}",
                    name,
                    self.cell_size,
                    side
                );
            }
        }

        let grid = Grid::new(self.width, self.height, self.cell_size);
        if !grid.contains(grid.start_cell()) {
            bail!(
                "Board of {}x{} cells is too small, the snake starts at cell (5, 5)",
                grid.columns(),
                grid.rows()
            );
        }

        Ok(GameConfig { grid, speed: self.speed, boost_speed: self.boost_speed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("snake").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let args = parse(&[]);
        assert_eq!(args.seed, None);
        assert_eq!(args.log_file, None);
        assert_eq!(args.game_config().unwrap(), GameConfig::default());
    }

    #[test]
    fn custom_board() {
        let config = parse(&["--width", "300", "--height", "200", "--cell-size", "10", "--speed", "5"])
            .game_config()
            .unwrap();
        assert_eq!(config.grid.columns(), 30);
        assert_eq!(config.grid.rows(), 20);
        assert_eq!(config.speed, 5);
        assert_eq!(config.boost_speed, 20);
    }

    #[test]
    fn rejects_ragged_board() {
        let err = parse(&["--width", "650"]).game_config().unwrap_err();
        assert!(err.to_string().contains("width"));
        assert!(parse(&["--height", "0"]).game_config().is_err());
        assert!(parse(&["--cell-size", "0"]).game_config().is_err());
    }

    #[test]
    fn rejects_board_without_start_cell() {
        assert!(parse(&["--width", "100", "--height", "100"]).game_config().is_err());
        assert!(parse(&["--width", "120", "--height", "120"]).game_config().is_ok());
    }

    #[test]
    fn rejects_zero_rates() {
        assert!(Args::try_parse_from(["snake", "--speed", "0"]).is_err());
        assert!(Args::try_parse_from(["snake", "--boost-speed", "0"]).is_err());
    }
}
