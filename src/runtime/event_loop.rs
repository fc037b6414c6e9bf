use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use crate::config;
use crate::session::Session;
use crate::ui::{self, Modal};

/// State tracked by the event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    pub modal: Option<Modal>,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Main terminal event loop: drains engine events, draws, and handles
/// input. Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    session: &mut Session,
    state: &mut EventLoopState,
) -> anyhow::Result<()> {
    loop {
        if session.pump_events() {
            debug!(options = ?session.quality_options(), "quality menu updated");
        }

        terminal.draw(|f| ui::draw(f, session, state.modal, &settings.ui))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, session, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply one key press. Returns true when the app should quit.
pub(super) fn handle_key_event(key: KeyEvent, session: &mut Session, state: &mut EventLoopState) -> bool {
    if let Some(modal) = state.modal {
        state.modal = handle_modal_key(key, modal, session);
        return false;
    }

    if session.search_mode() {
        handle_search_key(key, session);
        return false;
    }

    let was_pending_gg = std::mem::take(&mut state.pending_gg);
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('/') => session.begin_search(),
        KeyCode::Char('g') => {
            if was_pending_gg {
                session.cursor_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => session.cursor_last(),
        KeyCode::Char('j') | KeyCode::Down => session.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => session.move_cursor(-1),
        KeyCode::Enter => session.select_cursor(),
        KeyCode::Char('t') => session.toggle_theme(),
        KeyCode::Char('v') => {
            let cursor = session
                .quality_options()
                .and_then(|q| {
                    let current = session.selected_quality()?;
                    q.options.iter().position(|&h| h == current)
                })
                .unwrap_or(0);
            state.modal = Some(Modal::Quality { cursor });
        }
        KeyCode::Char('?') => state.modal = Some(Modal::Help),
        _ => {}
    }

    false
}

fn handle_search_key(key: KeyEvent, session: &mut Session) {
    match key.code {
        KeyCode::Esc => session.cancel_search(),
        KeyCode::Enter => session.submit_search(),
        KeyCode::Backspace => session.pop_search_char(),
        KeyCode::Down => session.move_cursor(1),
        KeyCode::Up => session.move_cursor(-1),
        KeyCode::Char('j') if key.modifiers.contains(KeyModifiers::CONTROL) => session.move_cursor(1),
        KeyCode::Char('k') if key.modifiers.contains(KeyModifiers::CONTROL) => session.move_cursor(-1),
        KeyCode::Char(c) => {
            if !c.is_control() {
                session.push_search_char(c);
            }
        }
        _ => {}
    }
}

/// Returns the modal to keep open, if any.
fn handle_modal_key(key: KeyEvent, modal: Modal, session: &mut Session) -> Option<Modal> {
    match modal {
        Modal::Help => match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => None,
            _ => Some(modal),
        },
        Modal::Quality { cursor } => {
            let len = session.quality_options().map_or(0, |q| q.options.len());
            match key.code {
                KeyCode::Esc | KeyCode::Char('v') | KeyCode::Char('q') => None,
                KeyCode::Char('j') | KeyCode::Down if len > 0 => Some(Modal::Quality {
                    cursor: (cursor + 1) % len,
                }),
                KeyCode::Char('k') | KeyCode::Up if len > 0 => Some(Modal::Quality {
                    cursor: (cursor + len - 1) % len,
                }),
                KeyCode::Enter => {
                    let height = session
                        .quality_options()
                        .and_then(|q| q.options.get(cursor).copied());
                    if let Some(height) = height {
                        session.change_quality(height);
                    }
                    None
                }
                _ => Some(modal),
            }
        }
    }
}
