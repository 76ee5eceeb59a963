use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::PALETTE;
use crate::game::GameState;

const SEPARATOR: &str = " │ ";

/// Renders the one-line score bar and returns the area left above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState, score: u32) -> Rect {
    let [play_area, score_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(info_line(
            score,
            state.snake.len(),
            state.tick_count,
            state.bounds().width,
            state.bounds().height,
        ))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray)),
        score_area,
    );

    play_area
}

fn info_line(score: u32, length: usize, ticks: u64, width: u16, height: u16) -> Line<'static> {
    let score_style = Style::default()
        .fg(PALETTE.hud_score)
        .add_modifier(Modifier::BOLD);

    Line::from(vec![
        Span::raw("Score: "),
        Span::styled(score.to_string(), score_style),
        Span::raw(SEPARATOR),
        Span::raw(format!("Length: {length}")),
        Span::raw(SEPARATOR),
        Span::raw(format!("Ticks: {ticks}")),
        Span::raw(SEPARATOR),
        Span::raw(format!("{width}x{height}")),
    ])
}
