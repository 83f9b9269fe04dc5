// Status bar widget: season loading progress, index size, team size.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use dreamteam_app::protocol::LoadStatus;

use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [load indicator] [progress or player count] [failures] [team]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = Vec::new();

    let (dot, dot_color) = load_indicator(&state.load);
    spans.push(Span::styled(format!(" {} ", dot), Style::default().fg(dot_color)));
    spans.push(Span::styled(
        progress_text(&state.load),
        Style::default().fg(Color::White),
    ));

    if state.load.failed > 0 {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(
            format!("{} seasons failed", state.load.failed),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
    spans.push(Span::styled(
        team_text(state.selected, state.pending.len()),
        Style::default().fg(Color::White),
    ));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Dot character and color: yellow while loading, green once the index is
/// built, red if it was built with missing seasons.
pub fn load_indicator(load: &LoadStatus) -> (&'static str, Color) {
    match (load.ready, load.failed) {
        (false, _) => ("●", Color::Yellow),
        (true, 0) => ("●", Color::Green),
        (true, _) => ("●", Color::Red),
    }
}

pub fn progress_text(load: &LoadStatus) -> String {
    if load.ready {
        format!("{} players indexed", load.players)
    } else {
        format!("Loading seasons {}/{}", load.settled, load.total)
    }
}

pub fn team_text(selected: usize, pending: usize) -> String {
    if pending == 0 {
        format!("Team: {}", selected)
    } else {
        format!("Team: {} (+{} resolving)", selected, pending)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
