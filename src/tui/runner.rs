//! TUI Runner - main loop that owns the terminal
//!
//! The TuiRunner is responsible for:
//! - Driving the draw/event loop
//! - Dispatching events to App for handling
//! - Spawning the background pipeline task when a submission is queued
//! - Installing pipeline outcomes back into the state

use std::sync::Arc;
use std::time::{Duration, Instant};

use eyre::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::content;
use crate::llm::LlmClient;
use crate::pipeline::{self, ProcessOutcome};
use crate::prompts::PromptLoader;
use crate::session::SessionLog;

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::views;

/// TUI Runner that manages the terminal and event loop
pub struct TuiRunner {
    /// Application state
    app: App,
    /// Terminal handle
    terminal: Tui,
    /// Event handler
    event_handler: EventHandler,

    /// Client handed to each pipeline run
    llm: Arc<dyn LlmClient>,
    /// Template loader, shared with pipeline runs
    prompts: Arc<PromptLoader>,
    /// Receiver for the in-flight pipeline outcome
    outcome_rx: Option<mpsc::Receiver<ProcessOutcome>>,
    /// Handle to the background pipeline task
    task: Option<JoinHandle<()>>,
}

impl TuiRunner {
    pub fn new(
        terminal: Tui,
        llm: Arc<dyn LlmClient>,
        prompts: Arc<PromptLoader>,
        log: SessionLog,
        tick_rate: Duration,
    ) -> Self {
        debug!(?tick_rate, "TuiRunner::new: called");
        Self {
            app: App::new(log),
            terminal,
            event_handler: EventHandler::new(tick_rate),
            llm,
            prompts,
            outcome_rx: None,
            task: None,
        }
    }

    /// Run the main loop until the user quits
    pub async fn run(&mut self) -> Result<()> {
        debug!("TuiRunner::run: called");
        loop {
            self.maybe_start_pipeline();

            self.terminal.draw(|frame| views::render(self.app.state_mut(), frame))?;

            tokio::select! {
                event = self.event_handler.next() => {
                    match event? {
                        Event::Tick => {
                            self.handle_tick();
                        }
                        Event::Key(key_event) => {
                            if self.app.handle_key(key_event) {
                                break;
                            }
                        }
                        Event::Resize(_, _) => {
                            // Redrawn on the next loop iteration
                        }
                    }
                }
                Some(outcome) = async {
                    if let Some(rx) = &mut self.outcome_rx {
                        rx.recv().await
                    } else {
                        std::future::pending::<Option<ProcessOutcome>>().await
                    }
                } => {
                    self.handle_outcome(outcome);
                }
            }

            if self.app.state().should_quit {
                debug!("TuiRunner::run: should_quit is true, breaking");
                break;
            }
        }

        if let Some(task) = self.task.take() {
            debug!("TuiRunner::run: aborting in-flight pipeline task");
            task.abort();
        }
        debug!("TuiRunner::run: exiting");
        Ok(())
    }

    /// Start a pipeline run if the app queued a submission
    fn maybe_start_pipeline(&mut self) {
        if !self.app.state().pending_submit {
            return;
        }
        let state = self.app.state_mut();
        state.pending_submit = false;
        if state.busy {
            return;
        }

        debug!("TuiRunner::maybe_start_pipeline: starting pipeline run");
        state.busy = true;
        state.busy_since = Some(Instant::now());
        state.tip = content::random_tip();
        state.affirmation = content::random_affirmation();
        state.log.info("Process button clicked");

        let input = state.input.clone();
        let mode = state.mode;
        let granularity = state.granularity;
        let log = state.log.clone();

        let llm = Arc::clone(&self.llm);
        let prompts = Arc::clone(&self.prompts);
        let (tx, rx) = mpsc::channel(1);
        self.outcome_rx = Some(rx);
        self.task = Some(tokio::spawn(async move {
            let outcome = pipeline::process(llm, prompts, log, input, mode, granularity).await;
            // Receiver dropped means the user quit mid-run
            let _ = tx.send(outcome).await;
        }));
    }

    /// Install a finished pipeline outcome
    fn handle_outcome(&mut self, outcome: ProcessOutcome) {
        debug!("TuiRunner::handle_outcome: called");
        info!(elapsed_ms = outcome.elapsed.as_millis() as u64, "pipeline run finished");
        self.outcome_rx = None;
        self.task = None;
        self.app.state_mut().install_outcome(outcome);
    }

    /// Advance animations on tick
    fn handle_tick(&mut self) {
        let state = self.app.state_mut();
        if state.busy {
            state.spinner_frame = state.spinner_frame.wrapping_add(1);
        }
    }
}
