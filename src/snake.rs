use std::collections::VecDeque;

use crate::grid::{Cell, Direction::{self, *}, Grid};
use crate::render::{Renderable, Sprite, SNAKE_COLOR};

/// Result of a single step forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moved {
    pub new_head: Cell,
    pub old_tail: Option<Cell>,
}

impl Moved {
    /// Whether the step cost the snake its tail, i.e. it moved without growing.
    pub fn trimmed(&self) -> bool {
        self.old_tail.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct Snake {
    grid: Grid,
    body: VecDeque<Cell>,
    direction: Direction,
    pending: Option<Direction>,
    target_length: usize,
    last_dropped: Option<Cell>,
}

impl Snake {
    pub fn new(grid: Grid) -> Self {
        Snake {
            grid,
            body: VecDeque::from([grid.start_cell()]),
            direction: Right,
            pending: None,
            target_length: 1,
            last_dropped: None,
        }
    }

    /// Head first.
    pub fn positions(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending
    }

    pub fn target_length(&self) -> usize {
        self.target_length
    }

    pub fn last_dropped(&self) -> Option<Cell> {
        self.last_dropped
    }

    /// Queues a turn for the next tick. Turning straight back into the neck is
    /// silently refused.
    pub fn set_pending_direction(&mut self, new_direction: Direction) {
        match (&new_direction, &self.direction) {
            (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right) => {}
            _ => self.pending = Some(new_direction),
        };
    }

    pub fn commit_direction(&mut self) {
        if let Some(dir) = self.pending.take() {
            self.direction = dir;
        }
    }

    pub fn advance(&mut self) -> Moved {
        let new_head = self.grid.wrap_step(self.head(), self.direction);
        self.body.push_front(new_head);

        self.last_dropped = if self.body.len() > self.target_length {
            self.body.pop_back()
        } else {
            None
        };

        Moved { new_head, old_tail: self.last_dropped }
    }

    pub fn check_self_collision(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&pos| pos == head)
    }

    /// Raises the target length by one. A tail dropped by this tick's step is
    /// put back, so the body is one cell longer straight away.
    pub fn grow(&mut self) {
        self.target_length += 1;
        if let Some(tail) = self.last_dropped.take() {
            self.body.push_back(tail);
        }
    }

    pub fn reset(&mut self) {
        *self = Snake::new(self.grid);
    }
}

impl Renderable for Snake {
    fn sprites(&self) -> Vec<Sprite> {
        self.body.iter().map(|&cell| Sprite::new(cell, SNAKE_COLOR)).collect()
    }
}
