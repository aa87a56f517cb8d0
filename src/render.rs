//! Colours and the drawable capability shared by everything on the board.

use crate::grid::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BOARD_BACKGROUND_COLOR: Rgb = Rgb(0, 0, 0);
pub const BORDER_COLOR: Rgb = Rgb(93, 216, 228);
pub const FOOD_COLOR: Rgb = Rgb(255, 0, 0);
pub const SNAKE_COLOR: Rgb = Rgb(0, 255, 0);

/// One filled, outlined cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub cell: Cell,
    pub fill: Rgb,
    pub border: Rgb,
}

impl Sprite {
    pub fn new(cell: Cell, fill: Rgb) -> Self {
        Sprite { cell, fill, border: BORDER_COLOR }
    }
}

pub trait Renderable {
    fn sprites(&self) -> Vec<Sprite>;
}
