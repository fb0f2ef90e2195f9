//! TUI application state
//!
//! Pure data structures for the TUI. No rendering logic here.
//!
//! Interaction state is the only mutable, shared state in the system.
//! It is mutated exclusively by user-interaction handlers, never by
//! the parser or generator, and lives for the session.

use std::collections::HashMap;
use std::time::Instant;

use tracing::debug;

use crate::content;
use crate::pipeline::{EMPTY_INPUT_WARNING, ProcessOutcome};
use crate::plan::{Plan, PlanTask, SectionKind};
use crate::prompts::{Granularity, Mode};
use crate::session::SessionLog;

/// Spinner frames shown while a request is outstanding
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Which surface currently receives keys (modal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Typing into the brain-dump input
    #[default]
    Editing,
    /// Navigating the rendered plan
    Browsing,
    /// Logs overlay
    Logs,
    /// Help overlay
    Help,
}

/// Identity of one checkable step
///
/// Content-derived, not positional: regenerating a plan with
/// reordered or added tasks re-binds prior state to the same semantic
/// step instead of whatever now sits at that index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StepKey {
    /// Clean task title
    pub task: String,
    pub section: SectionKind,
    /// Step text exactly as rendered from the plan
    pub step: String,
}

impl StepKey {
    pub fn new(task: &PlanTask, section: SectionKind, step: &str) -> Self {
        Self {
            task: task.clean_title(),
            section,
            step: step.to_string(),
        }
    }
}

/// Session-scoped checkbox and expansion state
///
/// Entries are created lazily on first toggle, default false, and are
/// never deleted; stale keys from a previous plan are harmless
/// orphans.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    done: HashMap<StepKey, bool>,
    expanded: HashMap<String, bool>,
}

impl InteractionState {
    /// Whether a step is checked (unknown keys read as false)
    pub fn is_done(&self, key: &StepKey) -> bool {
        self.done.get(key).copied().unwrap_or(false)
    }

    /// Flip exactly one step's flag; returns the new value
    pub fn toggle_done(&mut self, key: StepKey) -> bool {
        let entry = self.done.entry(key).or_insert(false);
        *entry = !*entry;
        *entry
    }

    /// Whether a task unit is expanded (unknown titles read as collapsed)
    pub fn is_expanded(&self, task: &str) -> bool {
        self.expanded.get(task).copied().unwrap_or(false)
    }

    /// Flip one task's expansion flag; returns the new value
    pub fn toggle_expanded(&mut self, task: &str) -> bool {
        let entry = self.expanded.entry(task.to_string()).or_insert(false);
        *entry = !*entry;
        *entry
    }
}

/// One selectable row in the plan view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanRow {
    /// Task header (toggle = expand/collapse)
    Task(usize),
    /// A checkable step (toggle = done flag)
    Step {
        task: usize,
        section: SectionKind,
        step: usize,
    },
}

/// Flatten the plan into its currently selectable rows
///
/// Task headers always show; steps only when their task is expanded.
/// Row order matches render order, so a cursor over this list lines up
/// with what is on screen.
pub fn visible_rows(plan: &Plan, interaction: &InteractionState) -> Vec<PlanRow> {
    let mut rows = Vec::new();
    for (task_index, task) in plan.tasks.iter().enumerate() {
        rows.push(PlanRow::Task(task_index));
        if !interaction.is_expanded(&task.clean_title()) {
            continue;
        }
        for kind in [SectionKind::Robotic, SectionKind::Creative] {
            if let Some(section) = task.section(kind) {
                for step_index in 0..section.steps.len() {
                    rows.push(PlanRow::Step {
                        task: task_index,
                        section: kind,
                        step: step_index,
                    });
                }
            }
        }
    }
    rows
}

/// Application state
#[derive(Debug)]
pub struct AppState {
    /// Brain-dump input buffer
    pub input: String,
    /// Selected presentation mode
    pub mode: Mode,
    /// Selected granularity level
    pub granularity: Granularity,
    /// Which surface receives keys
    pub interaction_mode: InteractionMode,

    /// A request is outstanding; submissions are ignored until it
    /// returns
    pub busy: bool,
    /// When the outstanding request started
    pub busy_since: Option<Instant>,
    /// Spinner animation frame
    pub spinner_frame: usize,

    /// Last successfully parsed plan; parse failures leave it in place
    pub plan: Option<Plan>,
    /// Acknowledgment callout from the last action
    pub acknowledgment: Option<String>,
    /// Checkbox/expansion state, session lifetime
    pub interaction: InteractionState,
    /// Rolling session log
    pub log: SessionLog,

    /// Transient inline message (warnings, degraded errors)
    pub message: Option<String>,
    /// Ambient content, re-rolled per process action
    pub tip: &'static str,
    pub affirmation: &'static str,

    /// Cursor into [`visible_rows`]
    pub cursor: usize,
    /// Scroll offsets (computed during render)
    pub plan_scroll: u16,
    pub log_scroll: u16,

    /// Set by app when a submission should start
    pub pending_submit: bool,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(log: SessionLog) -> Self {
        Self {
            input: String::new(),
            mode: Mode::default(),
            granularity: Granularity::default(),
            interaction_mode: InteractionMode::default(),
            busy: false,
            busy_since: None,
            spinner_frame: 0,
            plan: None,
            acknowledgment: None,
            interaction: InteractionState::default(),
            log,
            message: None,
            tip: content::random_tip(),
            affirmation: content::random_affirmation(),
            cursor: 0,
            plan_scroll: 0,
            log_scroll: 0,
            pending_submit: false,
            should_quit: false,
        }
    }

    /// Rows currently selectable in the plan view
    pub fn rows(&self) -> Vec<PlanRow> {
        match &self.plan {
            Some(plan) => visible_rows(plan, &self.interaction),
            None => Vec::new(),
        }
    }

    pub fn move_cursor_down(&mut self) {
        let row_count = self.rows().len();
        if row_count > 0 && self.cursor + 1 < row_count {
            self.cursor += 1;
        }
    }

    pub fn move_cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Toggle the row under the cursor: expansion for a task header,
    /// the done flag for a step
    pub fn toggle_at_cursor(&mut self) {
        let Some(row) = self.rows().get(self.cursor).cloned() else {
            return;
        };
        let Some(plan) = &self.plan else { return };

        match row {
            PlanRow::Task(task_index) => {
                let title = plan.tasks[task_index].clean_title();
                let expanded = self.interaction.toggle_expanded(&title);
                self.log
                    .info(format!("Task '{title}' expanded state toggled to {expanded}"));
                // Collapsing can strand the cursor past the end
                let row_count = self.rows().len();
                if self.cursor >= row_count && row_count > 0 {
                    self.cursor = row_count - 1;
                }
            }
            PlanRow::Step { task, section, step } => {
                let task = &plan.tasks[task];
                let Some(section_data) = task.section(section) else {
                    return;
                };
                let key = StepKey::new(task, section, &section_data.steps[step]);
                let value = self.interaction.toggle_done(key);
                self.log.info(format!("Checkbox toggled to {value}"));
            }
        }
    }

    /// Request a submission; rejects empty input with the inline
    /// warning and makes no call of any kind
    pub fn request_submit(&mut self) {
        debug!(busy = self.busy, input_len = self.input.len(), "request_submit: called");
        if self.busy {
            return;
        }
        if self.input.trim().is_empty() {
            self.log.warning("No input provided");
            self.message = Some(EMPTY_INPUT_WARNING.to_string());
            return;
        }
        self.message = None;
        self.pending_submit = true;
    }

    /// Install the outcome of a finished pipeline run
    ///
    /// A parse failure leaves the previously displayed plan (and its
    /// interaction state) current; only the inline message changes.
    pub fn install_outcome(&mut self, outcome: ProcessOutcome) {
        debug!(ok = outcome.plan.is_ok(), "install_outcome: called");
        self.busy = false;
        self.busy_since = None;
        self.acknowledgment = outcome.acknowledgment;

        match outcome.plan {
            Ok(plan) => {
                self.message = None;
                self.cursor = 0;
                self.plan_scroll = 0;
                self.plan = Some(plan);
                self.interaction_mode = InteractionMode::Browsing;
            }
            Err(failure) => {
                self.message = Some(failure.to_string());
            }
        }
    }

    /// Elapsed seconds of the outstanding request, for the spinner
    pub fn busy_elapsed_secs(&self) -> f64 {
        self.busy_since.map(|t| t.elapsed().as_secs_f64()).unwrap_or(0.0)
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }
}
