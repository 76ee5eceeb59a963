use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::config::{
    CELL_COLUMNS, GLYPH_DEBRIS, GLYPH_ITEM, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD, GLYPH_WALL,
    GridSize, PALETTE,
};
use crate::effect::CollisionEffect;
use crate::game::{GameState, GameStatus};
use crate::game_loop::{GameLoop, Presentation};
use crate::grid::SquareState;
use crate::snake::Position;
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_board_full_menu, render_game_over_menu};

/// Presentation state the terminal front end keeps between frames.
#[derive(Debug)]
pub struct SceneView {
    score: u32,
    effect: Option<CollisionEffect>,
    rng: StdRng,
}

impl SceneView {
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            score: 0,
            effect: None,
            rng,
        }
    }

    /// Runs the cosmetic animation clock.
    pub fn advance(&mut self, elapsed: Duration) {
        if let Some(effect) = self.effect.as_mut() {
            effect.advance(elapsed);
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn effect(&self) -> Option<&CollisionEffect> {
        self.effect.as_ref()
    }
}

impl Presentation for SceneView {
    fn on_reset(&mut self, _state: &GameState) {
        self.effect = None;
    }

    fn on_score(&mut self, score: u32) {
        self.score = score;
    }

    fn on_collision(&mut self, state: &GameState, force: f32) {
        self.effect = Some(CollisionEffect::new(
            state.snake.head(),
            state.snake.positions(),
            force,
            &mut self.rng,
        ));
    }
}

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, game_loop: &GameLoop, view: &SceneView) {
    let state = game_loop.state();
    let area = frame.area();
    let play_area = render_hud(frame, area, state, view.score());
    let board = board_rect(play_area, state.bounds());

    let exploded = view.effect().is_some();
    render_cells(frame, board, state, exploded);
    if let Some(effect) = view.effect() {
        render_debris(frame, board, state.bounds(), effect.positions());
    }

    match state.status {
        GameStatus::GameOver => {
            let remaining = game_loop.remaining_reset_delay().unwrap_or_default();
            render_game_over_menu(frame, board, view.score(), remaining);
        }
        GameStatus::BoardFull => render_board_full_menu(frame, board, view.score()),
        GameStatus::Running | GameStatus::Resetting => {}
    }
}

fn render_cells(frame: &mut Frame<'_>, board: Rect, state: &GameState, exploded: bool) {
    let head = state.snake.head();
    let bounds = state.bounds();
    let buffer = frame.buffer_mut();

    for (position, cell) in state.grid.cells() {
        let Some((x, y)) = cell_to_terminal(board, bounds, position) else {
            continue;
        };

        let (glyph, style) = match cell {
            SquareState::Free => continue,
            SquareState::Item => (GLYPH_ITEM, Style::new().fg(PALETTE.item)),
            SquareState::Blocked if state.grid.is_border(position) => {
                (GLYPH_WALL, Style::new().fg(PALETTE.wall))
            }
            SquareState::Blocked if exploded => continue,
            SquareState::Blocked if position == head => (
                GLYPH_SNAKE_HEAD,
                Style::new()
                    .fg(PALETTE.snake_head)
                    .add_modifier(Modifier::BOLD),
            ),
            SquareState::Blocked => (GLYPH_SNAKE_BODY, Style::new().fg(PALETTE.snake_body)),
        };

        buffer.set_string(x, y, glyph, style);
    }
}

fn render_debris(
    frame: &mut Frame<'_>,
    board: Rect,
    bounds: GridSize,
    debris: impl Iterator<Item = Position>,
) {
    let buffer = frame.buffer_mut();
    for position in debris {
        if let Some((x, y)) = cell_to_terminal(board, bounds, position) {
            buffer.set_string(x, y, GLYPH_DEBRIS, Style::new().fg(PALETTE.debris));
        }
    }
}

/// Centers the board inside `area`.
fn board_rect(area: Rect, bounds: GridSize) -> Rect {
    let width = bounds.width.saturating_mul(CELL_COLUMNS).min(area.width);
    let height = bounds.height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Maps a grid cell to its top-left terminal column and row. Grid `y` grows
/// upwards, terminal rows grow downwards.
fn cell_to_terminal(board: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let column = u16::try_from(position.x).ok()?.checked_mul(CELL_COLUMNS)?;
    let row = bounds.height - 1 - u16::try_from(position.y).ok()?;

    let x = board.x.saturating_add(column);
    let y = board.y.saturating_add(row);
    if x >= board.right() || y >= board.bottom() {
        return None;
    }

    Some((x, y))
}
