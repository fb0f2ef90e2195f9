//! TUI application - event handling and state management
//!
//! The App struct owns the AppState and handles all keyboard events.
//! It does not do any rendering - that's delegated to the views module.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, trace};

use super::state::{AppState, InteractionMode};
use crate::session::SessionLog;

/// TUI application
#[derive(Debug)]
pub struct App {
    /// Application state
    state: AppState,
}

impl App {
    /// Create a new application instance
    pub fn new(log: SessionLog) -> Self {
        debug!("App::new: called");
        Self {
            state: AppState::new(log),
        }
    }

    /// Get reference to state
    pub fn state(&self) -> &AppState {
        trace!("App::state: called");
        &self.state
    }

    /// Get mutable reference to state
    pub fn state_mut(&mut self) -> &mut AppState {
        trace!("App::state_mut: called");
        &mut self.state
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_key: called");
        // Ctrl+C always quits, regardless of mode
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            debug!("App::handle_key: Ctrl+C force quit");
            return true;
        }

        match self.state.interaction_mode {
            InteractionMode::Editing => {
                debug!("App::handle_key: Editing mode");
                self.handle_editing_key(key)
            }
            InteractionMode::Browsing => {
                debug!("App::handle_key: Browsing mode");
                self.handle_browsing_key(key)
            }
            InteractionMode::Logs => {
                debug!("App::handle_key: Logs mode");
                self.handle_logs_key(key)
            }
            InteractionMode::Help => {
                debug!("App::handle_key: Help mode");
                self.handle_help_key(key)
            }
        }
    }

    /// Handle key while the input buffer has focus
    fn handle_editing_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_editing_key: called");
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => {
                debug!("App::handle_editing_key: Esc - back to browsing");
                self.state.interaction_mode = InteractionMode::Browsing;
            }
            // Ctrl+S submits; plain Enter inserts a newline so the
            // brain dump can span lines
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
                debug!("App::handle_editing_key: Ctrl+S - submit");
                self.state.request_submit();
            }
            (KeyCode::Enter, _) => {
                debug!("App::handle_editing_key: Enter - newline");
                self.state.input.push('\n');
            }
            (KeyCode::Backspace, _) => {
                debug!("App::handle_editing_key: Backspace");
                self.state.input.pop();
            }
            (KeyCode::Tab, _) => {
                debug!("App::handle_editing_key: Tab - toggle mode");
                self.state.mode = self.state.mode.toggled();
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                debug!(%c, "App::handle_editing_key: Char");
                self.state.input.push(c);
            }
            _ => {
                debug!("App::handle_editing_key: unhandled key");
            }
        }

        false
    }

    /// Handle key while the plan view has focus
    fn handle_browsing_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_browsing_key: called");
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                debug!("App::handle_browsing_key: quit requested");
                self.state.should_quit = true;
            }
            KeyCode::Char('i') | KeyCode::Char('e') => {
                debug!("App::handle_browsing_key: entering editing mode");
                self.state.interaction_mode = InteractionMode::Editing;
            }
            KeyCode::Char('p') => {
                debug!("App::handle_browsing_key: p - submit");
                self.state.request_submit();
            }
            KeyCode::Char('m') => {
                debug!("App::handle_browsing_key: m - toggle mode");
                self.state.mode = self.state.mode.toggled();
                self.state
                    .log
                    .info(format!("Mode changed to {}", self.state.mode.label()));
            }
            KeyCode::Char(c @ ('1' | '2' | '3')) => {
                debug!(%c, "App::handle_browsing_key: granularity");
                if let Some(granularity) =
                    crate::prompts::Granularity::from_level(c as u8 - b'0')
                {
                    self.state.granularity = granularity;
                    self.state
                        .log
                        .info(format!("Granularity set to {}", granularity.name()));
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                debug!("App::handle_browsing_key: down/j navigation");
                self.state.move_cursor_down();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                debug!("App::handle_browsing_key: up/k navigation");
                self.state.move_cursor_up();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                debug!("App::handle_browsing_key: toggle at cursor");
                self.state.toggle_at_cursor();
            }
            KeyCode::Char('L') => {
                debug!("App::handle_browsing_key: showing logs");
                self.state.log_scroll = 0;
                self.state.interaction_mode = InteractionMode::Logs;
            }
            KeyCode::Char('?') | KeyCode::F(1) => {
                debug!("App::handle_browsing_key: showing help");
                self.state.interaction_mode = InteractionMode::Help;
            }
            _ => {
                debug!("App::handle_browsing_key: unhandled key");
            }
        }

        false
    }

    /// Handle key while the logs overlay is showing
    fn handle_logs_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_logs_key: called");
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('L') => {
                debug!("App::handle_logs_key: closing logs");
                self.state.interaction_mode = InteractionMode::Browsing;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                debug!("App::handle_logs_key: scroll down");
                self.state.log_scroll = self.state.log_scroll.saturating_add(1);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                debug!("App::handle_logs_key: scroll up");
                self.state.log_scroll = self.state.log_scroll.saturating_sub(1);
            }
            _ => {
                debug!("App::handle_logs_key: unhandled key");
            }
        }

        false
    }

    /// Handle key in help mode
    fn handle_help_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_help_key: called");
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                debug!("App::handle_help_key: closing help");
                self.state.interaction_mode = InteractionMode::Browsing;
            }
            _ => {
                debug!("App::handle_help_key: unhandled key");
            }
        }

        false
    }
}
