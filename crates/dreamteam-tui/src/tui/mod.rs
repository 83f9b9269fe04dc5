// TUI: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors the latest snapshot pushed by the
// app orchestrator, plus purely local state (search mode, focus, cursors).
// The search query is edited locally and forwarded as `SetSearchQuery`; the
// screen re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{info, warn};

use dreamteam_app::protocol::{AppSnapshot, LoadStatus, PlayerRow, UiUpdate, UserCommand};
use dreamteam_core::player::PlayerId;
use dreamteam_core::selection::TeamGroups;

use layout::{build_layout, AppLayout};

/// Which list the cursor keys move in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Results,
    Team,
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state that mirrors the application state for rendering.
#[derive(Debug, Default)]
pub struct ViewState {
    pub load: LoadStatus,
    /// Query as typed. Owned here so keystrokes never wait on the app.
    pub query: String,
    pub search_mode: bool,
    pub results: Vec<PlayerRow>,
    pub team: TeamGroups<PlayerRow>,
    /// Selected players outside the three position groups.
    pub other: Vec<PlayerRow>,
    pub selected: usize,
    pub errors: Vec<String>,
    pub pending: Vec<PlayerId>,
    pub focus: Focus,
    pub results_cursor: usize,
    /// Index into `team_members()`.
    pub team_cursor: usize,
}

impl ViewState {
    /// Apply a full snapshot from the app orchestrator. The local query and
    /// focus are left alone; cursors are clamped to the new list lengths.
    pub fn apply_snapshot(&mut self, snapshot: AppSnapshot) {
        self.load = snapshot.load;
        self.results = snapshot.results;
        self.team = snapshot.team;
        self.other = snapshot.other;
        self.selected = snapshot.selected;
        self.errors = snapshot.errors;
        self.pending = snapshot.pending;

        self.results_cursor = clamp_cursor(self.results_cursor, self.results.len());
        self.team_cursor = clamp_cursor(self.team_cursor, self.team_len());
    }

    /// Team members in display order: forwards, defensemen, goalies, other.
    pub fn team_members(&self) -> Vec<&PlayerRow> {
        self.team
            .forwards
            .iter()
            .chain(&self.team.defensemen)
            .chain(&self.team.goalies)
            .chain(&self.other)
            .collect()
    }

    pub fn team_len(&self) -> usize {
        self.team.len() + self.other.len()
    }

    pub fn highlighted_result(&self) -> Option<&PlayerRow> {
        self.results.get(self.results_cursor)
    }

    pub fn highlighted_member(&self) -> Option<&PlayerRow> {
        self.team_members().get(self.team_cursor).copied()
    }
}

fn clamp_cursor(cursor: usize, len: usize) -> usize {
    cursor.min(len.saturating_sub(1))
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Progress(status) => state.load = status,
        UiUpdate::Snapshot(snapshot) => state.apply_snapshot(*snapshot),
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::search_bar::render(frame, layout.search, state);
    widgets::results::render(frame, layout.results, state);
    widgets::team::render(frame, layout.team, state);
    widgets::team::render_errors(frame, layout.errors, state);
    render_help_bar(frame, &layout, state);
}

fn help_text(state: &ViewState) -> &'static str {
    if state.search_mode {
        " type:Search | Enter:Add first result | Esc:Done"
    } else {
        match state.focus {
            Focus::Results => " /:Search | j/k:Move | Tab:Team | a/Enter:Add | q:Quit",
            Focus::Team => " /:Search | j/k:Move | Tab:Results | d/x:Remove | q:Quit",
        }
    }
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        help_text(state),
        Style::default().fg(Color::White).add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop until the user quits or the app shuts down.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    // Restore the terminal before the default hook prints the panic.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => {
                        info!("UI channel closed, leaving TUI");
                        break Ok(());
                    }
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            if cmd_tx.send(cmd).await.is_err() {
                                warn!("command channel closed, leaving TUI");
                                break Ok(());
                            }
                            if quit {
                                break Ok(());
                            }
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => break Err(anyhow::Error::from(e).context("terminal input error")),
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(anyhow::Error::from(e).context("failed to draw frame"));
                }
            }
        }
    };

    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
