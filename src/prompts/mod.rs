//! Prompt template system
//!
//! Loads and renders `.pmt` (prompt template) files for the breakdown
//! and acknowledgment calls.
//!
//! Template loading chain:
//! 1. `.braindump/prompts/{name}.pmt` (user override)
//! 2. `prompts/{name}.pmt` (repo default)
//! 3. Embedded fallback in code
//!
//! Templates use Handlebars syntax for variable substitution.

pub mod embedded;
mod loader;

pub use loader::{PromptContext, PromptLoader};

use serde::{Deserialize, Serialize};

/// Presentation mode for the plan request
///
/// The mode→temperature mapping is fixed policy: Robotic wants
/// deterministic, literal instructions; Creative wants varied
/// phrasing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum Mode {
    #[default]
    Robotic,
    Creative,
}

impl Mode {
    /// Label embedded into the user prompt
    pub fn label(&self) -> &'static str {
        match self {
            Self::Robotic => "🤖 Robotic",
            Self::Creative => "🎨 Creative",
        }
    }

    /// Human-readable description for the mode selector
    pub fn description(&self) -> &'static str {
        match self {
            Self::Robotic => "Hyper-specific, minimal decision making, lowest activation energy",
            Self::Creative => "Multiple approaches with visual aids and technology options",
        }
    }

    /// Sampling temperature for the plan-generation call
    pub fn temperature(&self) -> f32 {
        match self {
            Self::Robotic => 0.3,
            Self::Creative => 0.7,
        }
    }

    /// The other mode
    pub fn toggled(&self) -> Self {
        match self {
            Self::Robotic => Self::Creative,
            Self::Creative => Self::Robotic,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Requested step-count detail for the breakdown (1-3, default 2)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Granularity {
    /// 1-4 broad steps per task
    Minimal,
    /// 4-8 steps, one concrete action each
    #[default]
    Moderate,
    /// 8-15 micro-steps, no decisions left
    Detailed,
}

impl Granularity {
    /// Parse a 1-3 level
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Minimal),
            2 => Some(Self::Moderate),
            3 => Some(Self::Detailed),
            _ => None,
        }
    }

    /// The 1-3 level for display and CLI round-tripping
    pub fn level(&self) -> u8 {
        match self {
            Self::Minimal => 1,
            Self::Moderate => 2,
            Self::Detailed => 3,
        }
    }

    /// Requested steps-per-task range in the instruction block
    pub fn step_range(&self) -> (u8, u8) {
        match self {
            Self::Minimal => (1, 4),
            Self::Moderate => (4, 8),
            Self::Detailed => (8, 15),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Minimal => "Minimal",
            Self::Moderate => "Moderate",
            Self::Detailed => "Maximum detail",
        }
    }
}
