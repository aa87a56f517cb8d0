//! Toroidal grid geometry.
//!
//! Cells are addressed in screen units: a cell's coordinates are always a
//! multiple of the grid's `cell_size`, and stepping past one edge re-enters
//! at the opposite one.

use Direction::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector, with `y` growing downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cell_size: i32,
}

impl Grid {
    /// Builds a grid over a `width` x `height` screen. Callers are expected to
    /// have checked that both sides are positive multiples of `cell_size`.
    pub const fn new(width: i32, height: i32, cell_size: i32) -> Self {
        Grid { width, height, cell_size }
    }

    pub fn columns(&self) -> i32 {
        self.width / self.cell_size
    }

    pub fn rows(&self) -> i32 {
        self.height / self.cell_size
    }

    pub fn total_cells(&self) -> usize {
        (self.columns() * self.rows()) as usize
    }

    /// Where every snake starts, and restarts after biting itself.
    pub fn start_cell(&self) -> Cell {
        Cell::new(self.cell_size * 5, self.cell_size * 5)
    }

    /// The cell at lattice position (`column`, `row`).
    pub fn cell_at(&self, column: i32, row: i32) -> Cell {
        Cell::new(column * self.cell_size, row * self.cell_size)
    }

    pub fn column_row(&self, cell: Cell) -> (i32, i32) {
        (cell.x / self.cell_size, cell.y / self.cell_size)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.x)
            && (0..self.height).contains(&cell.y)
            && cell.x % self.cell_size == 0
            && cell.y % self.cell_size == 0
    }

    /// One cell over in `direction`, wrapping each axis independently.
    pub fn wrap_step(&self, cell: Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        Cell::new(
            (cell.x + dx * self.cell_size).rem_euclid(self.width),
            (cell.y + dy * self.cell_size).rem_euclid(self.height),
        )
    }

    /// Every cell of the lattice, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows()).flat_map(move |row| (0..self.columns()).map(move |col| self.cell_at(col, row)))
    }
}
