use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions. `Up` points towards larger `y`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step on the grid for this direction.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, 1),
            Self::Down => (0, -1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// One reading of the horizontal and vertical input axes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisSample {
    pub horizontal: f32,
    pub vertical: f32,
}

impl AxisSample {
    #[must_use]
    pub fn new(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Resolves the sample to a single axis direction.
    ///
    /// A combined magnitude above one drops the vertical axis, so an exact
    /// diagonal moves horizontally. Each remaining component is rounded to
    /// -1, 0 or 1 and horizontal wins any leftover tie. Returns `None` when
    /// nothing survives.
    #[must_use]
    pub fn to_direction(self) -> Option<Direction> {
        let horizontal = self.horizontal;
        let mut vertical = self.vertical;

        if horizontal == 0.0 && vertical == 0.0 {
            return None;
        }

        if horizontal.hypot(vertical) > 1.0 {
            vertical = 0.0;
        }

        match (round_unit(horizontal), round_unit(vertical)) {
            (1, _) => Some(Direction::Right),
            (-1, _) => Some(Direction::Left),
            (0, 1) => Some(Direction::Up),
            (0, -1) => Some(Direction::Down),
            _ => None,
        }
    }
}

fn round_unit(value: f32) -> i32 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(-1.0, 1.0) as i32
}

/// High-level input events consumed by the frame loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameInput {
    Axis(AxisSample),
    Restart,
    Quit,
    /// A press of any key without its own binding.
    Other,
}

/// Maps one key press to a game input. Arrows and WASD drive the axes.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let axis = |horizontal, vertical| Some(GameInput::Axis(AxisSample::new(horizontal, vertical)));

    match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => axis(0.0, 1.0),
        KeyCode::Down | KeyCode::Char('s' | 'S') => axis(0.0, -1.0),
        KeyCode::Left | KeyCode::Char('a' | 'A') => axis(-1.0, 0.0),
        KeyCode::Right | KeyCode::Char('d' | 'D') => axis(1.0, 0.0),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(GameInput::Quit),
        KeyCode::Enter | KeyCode::Char(' ' | 'r' | 'R') => Some(GameInput::Restart),
        _ => Some(GameInput::Other),
    }
}

/// Non-blocking keyboard reader for the frame loop.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Waits up to `timeout` for the next mapped input.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => Ok(map_key(key)),
            _ => Ok(None),
        }
    }
}
