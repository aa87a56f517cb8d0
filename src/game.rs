use std::io;

use tracing::{debug, info, trace};

use crate::config::GameConfig;
use crate::food::Food;
use crate::grid::{Direction, Grid};
use crate::host::{Clock, InputEvent, InputSource, Key, RandomSource, Renderer};
use crate::render::{Renderable, BOARD_BACKGROUND_COLOR};
use crate::snake::Snake;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Quit,
    /// The snake covers every cell and there is nowhere left for food.
    BoardFull,
}

/// What a single step did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Moved,
    Ate,
    Crashed,
    BoardFull,
}

pub struct GameState {
    snake: Snake,
    food: Food,
    ticks: u64,
}

impl GameState {
    pub fn new(grid: Grid, random: &mut impl RandomSource) -> Self {
        let snake = Snake::new(grid);
        let food = Food::new(grid, snake.positions(), random);
        GameState { snake, food, ticks: 0 }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Commits the queued turn, moves the snake and resolves what it ran into.
    /// Food wins over collision, as it can never sit on the body.
    pub fn step(&mut self, random: &mut impl RandomSource) -> Outcome {
        self.ticks += 1;
        self.snake.commit_direction();
        let moved = self.snake.advance();
        trace!(
            tick = self.ticks,
            head = ?moved.new_head,
            trimmed = moved.trimmed(),
            dropped = ?self.snake.last_dropped(),
            target = self.snake.target_length(),
            "step"
        );

        if moved.new_head == self.food.position() {
            self.snake.grow();
            return match self.food.relocate(self.snake.positions(), random) {
                Some(cell) => {
                    debug!(length = self.snake.len(), food = ?cell, "ate food");
                    Outcome::Ate
                }
                None => {
                    info!(length = self.snake.len(), "board full");
                    Outcome::BoardFull
                }
            };
        }

        if self.snake.check_self_collision() {
            info!(length = self.snake.len(), tick = self.ticks, "snake bit itself, restarting");
            self.snake.reset();
            return Outcome::Crashed;
        }

        Outcome::Moved
    }

    pub fn render(&self, renderer: &mut impl Renderer) -> io::Result<()> {
        renderer.clear(BOARD_BACKGROUND_COLOR)?;
        for sprite in self.food.sprites().into_iter().chain(self.snake.sprites()) {
            renderer.draw_cell(sprite.cell, sprite.fill, sprite.border)?;
        }
        renderer.present()
    }
}

/// Maps a key press to a turn, refusing to reverse straight into the neck.
pub fn steer(key: Key, current: Direction) -> Option<Direction> {
    let wanted = match key {
        Key::Up => Direction::Up,
        Key::Down => Direction::Down,
        Key::Left => Direction::Left,
        Key::Right => Direction::Right,
        Key::Escape | Key::Space => return None,
    };

    if wanted == current.opposite() {
        None
    } else {
        Some(wanted)
    }
}

pub struct SnakeGame<R, I, C, S> {
    config: GameConfig,
    state: GameState,
    renderer: R,
    input: I,
    clock: C,
    random: S,
}

impl<R, I, C, S> SnakeGame<R, I, C, S>
where
    R: Renderer,
    I: InputSource,
    C: Clock,
    S: RandomSource,
{
    pub fn new(config: GameConfig, renderer: R, input: I, clock: C, mut random: S) -> Self {
        let state = GameState::new(config.grid, &mut random);
        SnakeGame { config, state, renderer, input, clock, random }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Ticks until the player quits or the board fills up.
    pub fn run(&mut self) -> io::Result<Exit> {
        let grid = self.config.grid;
        info!(
            columns = grid.columns(),
            rows = grid.rows(),
            speed = self.config.speed,
            boost_speed = self.config.boost_speed,
            "game started"
        );

        self.state.render(&mut self.renderer)?;

        loop {
            if let Some(exit) = self.tick()? {
                info!(
                    ?exit,
                    ticks = self.state.ticks(),
                    length = self.state.snake().len(),
                    food = ?self.state.food().position(),
                    "game over"
                );
                return Ok(exit);
            }
        }
    }

    /// One pass of input, update, render and wait.
    pub fn tick(&mut self) -> io::Result<Option<Exit>> {
        for event in self.input.drain()? {
            match event {
                InputEvent::Quit | InputEvent::KeyDown(Key::Escape) => return Ok(Some(Exit::Quit)),
                InputEvent::KeyDown(key) => {
                    if let Some(dir) = steer(key, self.state.snake.direction()) {
                        self.state.snake.set_pending_direction(dir);
                        trace!(pending = ?self.state.snake.pending_direction(), "turn queued");
                    }
                }
            }
        }

        let rate = if self.input.boost_held() { self.config.boost_speed } else { self.config.speed };

        let outcome = self.state.step(&mut self.random);
        self.state.render(&mut self.renderer)?;

        if outcome == Outcome::BoardFull {
            return Ok(Some(Exit::BoardFull));
        }

        self.clock.tick_at(rate);
        Ok(None)
    }
}
