// Search input widget: the query line, with a cursor while editing.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use dreamteam_core::search::MIN_QUERY_CHARS;

use crate::tui::ViewState;

/// Render the search line into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (text, style) = if state.query.is_empty() && !state.search_mode {
        (
            "Press / to search players".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (state.query.clone(), Style::default().fg(Color::White))
    };

    let border_style = if state.search_mode {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title(state)),
    );
    frame.render_widget(paragraph, area);

    if state.search_mode && area.width > 2 && area.height > 2 {
        let typed = state.query.chars().count() as u16;
        let x = area.x + 1 + typed.min(area.width - 3);
        frame.set_cursor_position((x, area.y + 1));
    }
}

/// Box title; hints at the minimum length while the query is too short.
pub fn title(state: &ViewState) -> String {
    let typed = state.query.chars().count();
    if typed > 0 && typed < MIN_QUERY_CHARS {
        format!("Search (type at least {MIN_QUERY_CHARS} characters)")
    } else {
        "Search".to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
