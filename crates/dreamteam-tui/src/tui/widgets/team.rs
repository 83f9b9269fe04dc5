// Team widget: the selection grouped by position, and the validation
// messages underneath.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use dreamteam_app::protocol::PlayerRow;

use super::results::{focus_border, highlight_style, row_item};
use crate::tui::{Focus, ViewState};

/// Section titles and their members, in the order of `team_members()`.
/// "Other" only appears when someone is in it.
fn sections(state: &ViewState) -> Vec<(&'static str, &[PlayerRow])> {
    let mut sections = vec![
        ("Forwards", state.team.forwards.as_slice()),
        ("Defensemen", state.team.defensemen.as_slice()),
        ("Goalies", state.team.goalies.as_slice()),
    ];
    if !state.other.is_empty() {
        sections.push(("Other", state.other.as_slice()));
    }
    sections
}

/// Render the grouped team into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let focused = state.focus == Focus::Team;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_border(focused))
        .title(format!("Dream Team ({})", state.selected));

    let mut items = Vec::new();
    let mut selected_item = None;
    let mut member = 0;

    for (title, rows) in sections(state) {
        items.push(ListItem::new(Line::from(Span::styled(
            format!("{} ({})", title, rows.len()),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ))));
        for row in rows {
            if member == state.team_cursor {
                selected_item = Some(items.len());
            }
            items.push(row_item(row));
            member += 1;
        }
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style(focused));
    let mut list_state = ListState::default().with_selected(selected_item);
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Render the validation messages into the given area.
pub fn render_errors(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default().borders(Borders::ALL).title("Checks");

    let paragraph = if state.errors.is_empty() {
        Paragraph::new(Line::from(Span::styled(
            " No conflicts.",
            Style::default().fg(Color::Green),
        )))
    } else {
        let lines: Vec<Line> = state
            .errors
            .iter()
            .map(|msg| {
                Line::from(Span::styled(
                    format!(" {}", msg),
                    Style::default().fg(Color::Red),
                ))
            })
            .collect();
        Paragraph::new(lines)
    };

    frame.render_widget(paragraph.wrap(Wrap { trim: false }).block(block), area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
