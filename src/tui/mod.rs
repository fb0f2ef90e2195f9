//! Terminal user interface
//!
//! Structure follows a strict split: `state` is pure data, `app`
//! handles keys and mutates state, `views` renders and never mutates,
//! `runner` owns the terminal and the background pipeline task.

pub mod app;
pub mod events;
pub mod runner;
pub mod state;
pub mod views;

pub use runner::TuiRunner;

/// Terminal handle
pub type Tui = ratatui::DefaultTerminal;

/// Enter raw mode + alternate screen (with panic hooks installed)
pub fn init() -> Tui {
    ratatui::init()
}

/// Restore the terminal to its original state
pub fn restore() {
    ratatui::restore();
}
