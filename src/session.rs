//! Rolling session log
//!
//! Append-only, timestamped, leveled entries recording every stage
//! transition for diagnostics. Lives for the session, is never parsed
//! back, and is shown verbatim in the TUI logs pane. Shared by handle
//! so the background pipeline task and the UI thread append to the
//! same log.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local};

/// Log entry level
///
/// Levels carried over from the stage names the pipeline reports:
/// Config for parameter selection, Api for request boundaries, Data
/// for raw-response previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Config,
    Api,
    Data,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Config => "CONFIG",
            Self::Api => "API",
            Self::Data => "DATA",
            Self::Success => "SUCCESS",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

/// One timestamped log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    /// Render as `[HH:MM:SS.mmm] [LEVEL] message`
    pub fn display(&self) -> String {
        format!(
            "[{}] [{}] {}",
            self.timestamp.format("%H:%M:%S%.3f"),
            self.level.name(),
            self.message
        )
    }
}

/// Shared append-only session log
#[derive(Debug, Clone, Default)]
pub struct SessionLog {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry; also mirrors to tracing for the log file
    pub fn push(&self, level: LogLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            LogLevel::Warning => tracing::warn!(target: "session", "{message}"),
            LogLevel::Error => tracing::error!(target: "session", "{message}"),
            _ => tracing::info!(target: "session", "{message}"),
        }
        let mut entries = self.entries.lock().expect("session log lock");
        entries.push(LogEntry {
            timestamp: Local::now(),
            level,
            message,
        });
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(LogLevel::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(LogLevel::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(LogLevel::Error, message);
    }

    /// Copy of all entries, oldest first
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.lock().expect("session log lock").clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("session log lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
