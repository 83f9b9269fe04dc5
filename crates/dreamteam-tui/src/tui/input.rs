// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the app
// orchestrator, or into local ViewState changes (search editing, focus,
// cursor movement).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use dreamteam_app::protocol::UserCommand;

use super::{Focus, ViewState};

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app orchestrator, `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Windows reports Release events too.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.search_mode {
        return handle_search_mode(key_event, view_state);
    }

    match key_event.code {
        KeyCode::Char('/') => {
            view_state.search_mode = true;
            view_state.focus = Focus::Results;
            None
        }
        KeyCode::Tab => {
            view_state.focus = match view_state.focus {
                Focus::Results => Focus::Team,
                Focus::Team => Focus::Results,
            };
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            move_cursor(view_state, -1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            move_cursor(view_state, 1);
            None
        }
        KeyCode::Char('a') | KeyCode::Enter => {
            if view_state.focus != Focus::Results {
                return None;
            }
            view_state
                .highlighted_result()
                .map(|row| UserCommand::AddPlayer(row.id))
        }
        KeyCode::Char('d') | KeyCode::Char('x') => {
            if view_state.focus != Focus::Team {
                return None;
            }
            view_state
                .highlighted_member()
                .map(|row| UserCommand::RemovePlayer(row.id))
        }
        KeyCode::Esc if !view_state.query.is_empty() => {
            view_state.query.clear();
            view_state.results_cursor = 0;
            Some(UserCommand::SetSearchQuery(String::new()))
        }
        KeyCode::Char('q') => Some(UserCommand::Quit),
        _ => None,
    }
}

/// Search mode: printable characters and Backspace edit the query, Enter
/// adds the first result, Esc returns to normal mode keeping the query.
fn handle_search_mode(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.search_mode = false;
            None
        }
        KeyCode::Enter => view_state
            .results
            .first()
            .map(|row| UserCommand::AddPlayer(row.id)),
        KeyCode::Backspace => {
            view_state.query.pop()?;
            Some(query_changed(view_state))
        }
        KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            view_state.query.push(c);
            Some(query_changed(view_state))
        }
        _ => None,
    }
}

fn query_changed(view_state: &mut ViewState) -> UserCommand {
    view_state.results_cursor = 0;
    UserCommand::SetSearchQuery(view_state.query.clone())
}

/// Move the cursor of the focused list, staying within its bounds.
fn move_cursor(view_state: &mut ViewState, delta: isize) {
    let (cursor, len) = match view_state.focus {
        Focus::Results => (&mut view_state.results_cursor, view_state.results.len()),
        Focus::Team => {
            let len = view_state.team_len();
            (&mut view_state.team_cursor, len)
        }
    };
    if len == 0 {
        *cursor = 0;
        return;
    }
    *cursor = cursor.saturating_add_signed(delta).min(len - 1);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
