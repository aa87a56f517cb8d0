use std::io::{self, stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{
    poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle};
use crossterm::{cursor, execute, queue};
use tracing::{debug, warn};

use crate::grid::{Cell, Grid};
use crate::host::{InputEvent, InputSource, Key, Renderer};
use crate::render::Rgb;

type TermInt = u16;
type Coords = (TermInt, TermInt);

/// Terminal columns per grid cell, so cells come out roughly square.
const CELL_COLUMNS: TermInt = 2;
const CELL_GLYPH: &str = "[]";
const HINT: &str = "Arrows/WASD steer · Space boost · Esc quit";

/// Raw mode, alternate screen and hidden cursor for as long as it lives.
pub struct TermSession {
    stdout: Stdout,
    enhanced_keys: bool,
}

impl TermSession {
    pub fn enter() -> io::Result<Self> {
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, SetTitle("Snake"))?;
        terminal::enable_raw_mode()?;
        execute!(stdout, cursor::Hide, cursor::DisableBlinking)?;

        // Key release reports are what make "Space is held" exact.
        let enhanced_keys = matches!(terminal::supports_keyboard_enhancement(), Ok(true));
        if enhanced_keys {
            execute!(stdout, PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))?;
        }
        debug!(enhanced_keys, "terminal ready");

        Ok(TermSession { stdout, enhanced_keys })
    }

    pub fn enhanced_keys(&self) -> bool {
        self.enhanced_keys
    }

    fn restore(&mut self) -> io::Result<()> {
        if self.enhanced_keys {
            execute!(self.stdout, PopKeyboardEnhancementFlags)?;
        }
        terminal::disable_raw_mode()?;
        execute!(self.stdout, ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }
}

impl Drop for TermSession {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("failed to restore terminal: {}", e);
        }
    }
}

/// Checks that a board of this size plus its frame and hint line fits the
/// current terminal.
pub fn check_fits(grid: Grid) -> io::Result<()> {
    let (width, height) = terminal::size()?;
    let (need_w, need_h) = required_size(grid);
    if (width as usize) < need_w || (height as usize) < need_h {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!(
                "terminal is {}x{}, the board needs at least {}x{}",
                width, height, need_w, need_h
            ),
        ));
    }
    Ok(())
}

fn required_size(grid: Grid) -> (usize, usize) {
    let w = grid.columns() as usize * CELL_COLUMNS as usize + 2;
    let h = grid.rows() as usize + 3;
    (w.max(HINT.chars().count()), h)
}

pub struct TermRenderer {
    stdout: Stdout,
    grid: Grid,
    /// Terminal position of the board's top-left cell.
    origin: Coords,
}

impl TermRenderer {
    /// Centres the board in the terminal and draws its frame and hint line.
    pub fn new(grid: Grid) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let board_w = grid.columns() as TermInt * CELL_COLUMNS;
        let board_h = grid.rows() as TermInt;
        let origin = (
            (width.saturating_sub(board_w + 2) / 2) + 1,
            (height.saturating_sub(board_h + 3) / 2) + 1,
        );

        let mut renderer = TermRenderer { stdout: stdout(), grid, origin };
        renderer.draw_borders()?;
        Ok(renderer)
    }

    fn draw_borders(&mut self) -> io::Result<()> {
        let width = self.grid.columns() as TermInt * CELL_COLUMNS + 2;
        let height = self.grid.rows() as TermInt + 2;
        let (left, top) = (self.origin.0 - 1, self.origin.1 - 1);
        let (end_x, end_y) = (left + width - 1, top + height - 1);

        queue!(self.stdout, terminal::Clear(ClearType::All), ResetColor)?;
        for x in left..=end_x {
            let ch = if x == left || x == end_x { '+' } else { '-' };
            self.print_at((x, top), ch)?;
            self.print_at((x, end_y), ch)?;
        }
        for y in top + 1..end_y {
            self.print_at((left, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }
        queue!(self.stdout, cursor::MoveTo(left, end_y + 1), Print(HINT))?;

        self.stdout.flush()
    }

    fn print_at(&mut self, pos: Coords, ch: char) -> io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), Print(ch))
    }

    fn screen_pos(&self, cell: Cell) -> Coords {
        let (col, row) = self.grid.column_row(cell);
        (
            self.origin.0 + col as TermInt * CELL_COLUMNS,
            self.origin.1 + row as TermInt,
        )
    }
}

impl Renderer for TermRenderer {
    fn clear(&mut self, color: Rgb) -> io::Result<()> {
        let blank = " ".repeat(self.grid.columns() as usize * CELL_COLUMNS as usize);
        queue!(self.stdout, SetBackgroundColor(to_color(color)))?;
        for row in 0..self.grid.rows() as TermInt {
            queue!(self.stdout, cursor::MoveTo(self.origin.0, self.origin.1 + row), Print(&blank))?;
        }
        queue!(self.stdout, ResetColor)
    }

    fn draw_cell(&mut self, cell: Cell, fill: Rgb, border: Rgb) -> io::Result<()> {
        let (x, y) = self.screen_pos(cell);
        queue!(
            self.stdout,
            cursor::MoveTo(x, y),
            SetBackgroundColor(to_color(fill)),
            SetForegroundColor(to_color(border)),
            Print(CELL_GLYPH),
            ResetColor
        )
    }

    fn present(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

fn to_color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb { r, g, b }
}

/// Keyboard input, polled without blocking.
pub struct TermInput {
    enhanced_keys: bool,
    space_held: bool,
}

impl TermInput {
    pub fn new(session: &TermSession) -> Self {
        TermInput { enhanced_keys: session.enhanced_keys(), space_held: false }
    }

    /// Updates the boost state from `ev` and translates it into a game event.
    fn handle_key(&mut self, ev: &KeyEvent) -> Option<InputEvent> {
        if ev.code == KeyCode::Char(' ') {
            self.space_held = ev.kind != KeyEventKind::Release;
        }
        if ev.kind == KeyEventKind::Release {
            return None;
        }
        map_key(ev)
    }
}

impl InputSource for TermInput {
    fn drain(&mut self) -> io::Result<Vec<InputEvent>> {
        // Without release reports Space only counts as held for the tick in
        // which a press or auto-repeat shows up.
        if !self.enhanced_keys {
            self.space_held = false;
        }

        let mut events = vec![];
        while poll(Duration::ZERO)? {
            if let Event::Key(ev) = read()? {
                events.extend(self.handle_key(&ev));
            }
        }
        Ok(events)
    }

    fn boost_held(&self) -> bool {
        self.space_held
    }
}

fn map_key(ev: &KeyEvent) -> Option<InputEvent> {
    if is_ctrl_c(ev) {
        return Some(InputEvent::Quit);
    }

    let key = match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Key::Up,
        KeyCode::Char('a') | KeyCode::Left => Key::Left,
        KeyCode::Char('s') | KeyCode::Down => Key::Down,
        KeyCode::Char('d') | KeyCode::Right => Key::Right,
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Esc => Key::Escape,
        KeyCode::Char('q') => return Some(InputEvent::Quit),
        _ => return None,
    };
    Some(InputEvent::KeyDown(key))
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
