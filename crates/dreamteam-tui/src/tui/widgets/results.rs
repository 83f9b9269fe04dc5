// Search results widget: players matching the query, not yet selected.
//
// Each row: "Name | Team A, Team B" plus the detail summary once known.
// The highlighted row follows the results cursor when the list has focus.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use dreamteam_app::protocol::PlayerRow;

use crate::tui::{Focus, ViewState};

/// Render the results list into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let focused = state.focus == Focus::Results;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_border(focused))
        .title(format!("Players ({})", state.results.len()));

    if state.results.is_empty() {
        let paragraph = Paragraph::new(format!("  {}", empty_message(state)))
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = state.results.iter().map(row_item).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style(focused));

    let mut list_state = ListState::default().with_selected(Some(state.results_cursor));
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Why the list is empty.
pub fn empty_message(state: &ViewState) -> &'static str {
    if !state.load.ready {
        "Loading rosters..."
    } else if state.query.is_empty() {
        "Press / and type a name."
    } else {
        "No matching players."
    }
}

/// Format a player row as plain text.
pub fn row_text(row: &PlayerRow) -> String {
    let mut text = row.name.clone();
    if !row.teams.is_empty() {
        text.push_str(" | ");
        text.push_str(&row.teams_label());
    }
    if let Some(detail) = &row.detail {
        text.push_str(" | ");
        text.push_str(detail);
    }
    text
}

pub(crate) fn row_item(row: &PlayerRow) -> ListItem<'static> {
    let mut spans = vec![Span::styled(
        format!(" {}", row.name),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )];
    if !row.teams.is_empty() {
        spans.push(Span::styled(
            format!("  {}", row.teams_label()),
            Style::default().fg(Color::Gray),
        ));
    }
    if let Some(detail) = &row.detail {
        spans.push(Span::styled(
            format!("  {}", detail),
            Style::default().fg(Color::Cyan),
        ));
    }
    ListItem::new(Line::from(spans))
}

pub(crate) fn focus_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

pub(crate) fn highlight_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else {
        Style::default().add_modifier(Modifier::UNDERLINED)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
