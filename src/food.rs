use std::collections::HashSet;

use crate::grid::{Cell, Grid};
use crate::host::RandomSource;
use crate::render::{Renderable, Sprite, FOOD_COLOR};

#[derive(Debug, Clone)]
pub struct Food {
    grid: Grid,
    position: Cell,
}

impl Food {
    /// Places the first piece of food somewhere outside `forbidden`.
    pub fn new<'a>(
        grid: Grid,
        forbidden: impl IntoIterator<Item = &'a Cell>,
        random: &mut impl RandomSource,
    ) -> Self {
        let mut food = Food { grid, position: Cell::new(0, 0) };
        food.relocate(forbidden, random);
        food
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    /// Moves the food to a random cell outside `forbidden` and returns it.
    ///
    /// Returns `None`, leaving the food where it was, when `forbidden` covers
    /// the whole board. Otherwise candidates are drawn uniformly until a free
    /// one comes up, which is guaranteed to happen eventually.
    pub fn relocate<'a>(
        &mut self,
        forbidden: impl IntoIterator<Item = &'a Cell>,
        random: &mut impl RandomSource,
    ) -> Option<Cell> {
        let forbidden: HashSet<Cell> = forbidden.into_iter().copied().collect();
        if self.grid.cells().all(|cell| forbidden.contains(&cell)) {
            return None;
        }

        let position = loop {
            let candidate = random.uniform_cell();
            if !forbidden.contains(&candidate) {
                break candidate;
            }
        };

        self.position = position;
        Some(position)
    }

    #[cfg(test)]
    pub fn place_at(&mut self, position: Cell) {
        self.position = position;
    }
}

impl Renderable for Food {
    fn sprites(&self) -> Vec<Sprite> {
        vec![Sprite::new(self.position, FOOD_COLOR)]
    }
}
