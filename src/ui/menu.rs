use std::time::Duration;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::config::PALETTE;

/// Draws the game-over overlay with the countdown to the next round.
pub fn render_game_over_menu(frame: &mut Frame<'_>, area: Rect, score: u32, remaining: Duration) {
    let seconds = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
    let lines = [
        "GAME OVER".to_owned(),
        String::new(),
        format!("Score: {score}"),
        format!("New round in {seconds}s"),
        String::new(),
        "[Q] Quit".to_owned(),
    ];

    render_popup(frame, area, " game over ", &lines);
}

/// Draws the overlay shown once no free cell is left for the item.
pub fn render_board_full_menu(frame: &mut Frame<'_>, area: Rect, score: u32) {
    let lines = [
        "BOARD FULL".to_owned(),
        String::new(),
        format!("Score: {score}"),
        String::new(),
        "Press any key to play again".to_owned(),
        "[Q] Quit".to_owned(),
    ];

    render_popup(frame, area, " you win ", &lines);
}

fn render_popup(frame: &mut Frame<'_>, area: Rect, title: &str, lines: &[String]) {
    let content_width = lines
        .iter()
        .map(|line| line.as_str().width())
        .chain(std::iter::once(title.width()))
        .max()
        .unwrap_or(0);
    let width = u16::try_from(content_width + 4).unwrap_or(u16::MAX);
    let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);
    let popup = centered_rect(area, width, height);
    frame.render_widget(Clear, popup);

    let mut text: Vec<Line<'_>> = lines.iter().map(|line| Line::from(line.as_str())).collect();
    if let Some(first) = text.first_mut() {
        *first = first.clone().style(
            Style::default()
                .fg(PALETTE.menu_title)
                .add_modifier(Modifier::BOLD),
        );
    }
    if let Some(last) = text.last_mut() {
        *last = last.clone().style(Style::default().fg(PALETTE.menu_footer));
    }

    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(title)),
        popup,
    );
}

/// Centers a `width` x `height` rect in `area`, clamped to fit.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::centered_rect;

    #[test]
    fn popup_is_centered() {
        let area = Rect::new(10, 4, 40, 20);
        assert_eq!(centered_rect(area, 20, 6), Rect::new(20, 11, 20, 6));
    }

    #[test]
    fn popup_is_clamped_to_area() {
        let area = Rect::new(0, 0, 10, 3);
        assert_eq!(centered_rect(area, 30, 9), area);
    }
}
