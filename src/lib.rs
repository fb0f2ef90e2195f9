//! braindump - ADHD Brain Dump Organizer
//!
//! braindump takes an unstructured "everything on my mind" text dump and
//! turns it into a small, structured action plan using an external LLM.
//! Every task comes back in two flavors plus a micro-commitment:
//!
//! - **Robotic Mode**: numbered, zero-decision steps for executive paralysis
//! - **Creative Mode**: engaging alternative framings for low motivation
//! - **Activation Hack**: a 2-minute starter to break the inertia
//!
//! Before planning, a lightweight emotion pass classifies the dump and,
//! when it reads as emotionally loaded, emits a short coaching
//! acknowledgment alongside the plan.
//!
//! # Modules
//!
//! - [`llm`] - LLM client trait and OpenAI implementation
//! - [`prompts`] - Prompt templates, modes, and granularity levels
//! - [`plan`] - Plan data model and response parsing
//! - [`coach`] - Emotion classification and acknowledgments
//! - [`pipeline`] - The dump-to-plan orchestration
//! - [`tui`] - Interactive terminal interface
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod coach;
pub mod config;
pub mod content;
pub mod llm;
pub mod pipeline;
pub mod plan;
pub mod prompts;
pub mod render;
pub mod session;
pub mod tui;

// Re-export commonly used types
pub use config::{Config, LlmConfig};
pub use llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, OpenAIClient, create_client};
pub use pipeline::{PlanFailure, ProcessOutcome, process};
pub use plan::{ModeSection, ParseError, Plan, PlanTask, SectionKind, parse};
pub use prompts::{Granularity, Mode, PromptLoader};
pub use session::{LogLevel, SessionLog};
