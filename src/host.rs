//! The outside world as seen by the game: something to draw on, something to
//! read keys from, something to keep time and something to roll dice with.

use std::io;
use std::thread::sleep;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::grid::{Cell, Grid};
use crate::render::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Escape,
    Space,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
}

pub trait Renderer {
    fn clear(&mut self, color: Rgb) -> io::Result<()>;
    fn draw_cell(&mut self, cell: Cell, fill: Rgb, border: Rgb) -> io::Result<()>;
    fn present(&mut self) -> io::Result<()>;
}

pub trait InputSource {
    /// Everything that arrived since the last call.
    fn drain(&mut self) -> io::Result<Vec<InputEvent>>;

    /// Whether the boost key counts as held for the current tick.
    fn boost_held(&self) -> bool;
}

pub trait Clock {
    /// Blocks until the next tick boundary at `rate` ticks per second.
    fn tick_at(&mut self, rate: u32);
}

pub trait RandomSource {
    fn uniform_cell(&mut self) -> Cell;
}

/// Sleeps away whatever is left of the current tick, measured from the end
/// of the previous call.
pub struct TickClock {
    last_tick: Instant,
}

impl TickClock {
    pub fn new() -> Self {
        TickClock { last_tick: Instant::now() }
    }
}

impl Clock for TickClock {
    fn tick_at(&mut self, rate: u32) {
        let period = Duration::from_secs(1) / rate.max(1);
        let elapsed = self.last_tick.elapsed();
        if elapsed < period {
            sleep(period - elapsed);
        }
        self.last_tick = Instant::now();
    }
}

/// Uniform cells drawn from any `rand` generator.
pub struct CellSampler<R> {
    rng: R,
    grid: Grid,
}

impl<R: Rng> CellSampler<R> {
    pub fn new(rng: R, grid: Grid) -> Self {
        CellSampler { rng, grid }
    }
}

impl<R: Rng> RandomSource for CellSampler<R> {
    fn uniform_cell(&mut self) -> Cell {
        let column = self.rng.gen_range(0..self.grid.columns());
        let row = self.rng.gen_range(0..self.grid.rows());
        self.grid.cell_at(column, row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    #[test]
    fn sampler_covers_the_grid() {
        let grid = Grid::new(100, 60, 20);
        let mut sampler = CellSampler::new(StdRng::seed_from_u64(7), grid);

        let seen: HashSet<Cell> = (0..2_000).map(|_| sampler.uniform_cell()).collect();
        assert!(seen.iter().all(|&c| grid.contains(c)));
        assert_eq!(seen.len(), grid.total_cells());
    }

    #[test]
    fn sampler_is_reproducible() {
        let grid = Grid::new(640, 480, 20);
        let mut a = CellSampler::new(StdRng::seed_from_u64(42), grid);
        let mut b = CellSampler::new(StdRng::seed_from_u64(42), grid);
        for _ in 0..50 {
            assert_eq!(a.uniform_cell(), b.uniform_cell());
        }
    }

    #[test]
    fn clock_waits_out_the_tick() {
        let mut clock = TickClock::new();
        clock.tick_at(1_000);
        let start = Instant::now();
        clock.tick_at(50);
        assert!(start.elapsed() >= Duration::from_millis(15));
    }
}
