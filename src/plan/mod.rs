//! Structured action-plan model
//!
//! A [`Plan`] is the normalized form of the generator's JSON output:
//! ordered tasks, each with optional Robotic/Creative step lists and
//! an activation hack. Normalization happens once, at parse time; the
//! renderers never see raw generator keys.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

mod parser;

pub use parser::{ParseError, parse};

/// Matches a step that already carries an ordinal marker ("1. ...")
static ORDINAL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\d+\.").expect("ordinal regex"));

/// Matches a title wrapped in one layer of straight or curly quotes
static QUOTED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^["“”](.*)["“”]$"#).expect("quoted regex"));

/// Which mode section a step belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    /// Short, strictly ordered, low-decision sequence
    Robotic,
    /// Multiple unordered exploratory options
    Creative,
}

/// An ordered action plan extracted from one brain dump
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plan {
    /// Tasks in generator insertion order
    pub tasks: Vec<PlanTask>,
}

impl Plan {
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Serialize back to the generator's wire shape
    ///
    /// Round-trip invariant: `parse(to_json_value().to_string())`
    /// reproduces an equal plan, same tasks and steps in same order.
    pub fn to_json_value(&self) -> serde_json::Value {
        let mut root = serde_json::Map::new();
        for task in &self.tasks {
            let mut entry = serde_json::Map::new();
            if let Some(section) = &task.robotic {
                entry.insert(section.heading.clone(), serde_json::json!(section.steps));
            }
            if let Some(section) = &task.creative {
                entry.insert(section.heading.clone(), serde_json::json!(section.steps));
            }
            if let Some(hack) = &task.activation_hack {
                entry.insert("Activation Hack".to_string(), serde_json::json!(hack));
            }
            root.insert(task.title.clone(), serde_json::Value::Object(entry));
        }
        serde_json::Value::Object(root)
    }
}

/// One task within a plan
///
/// Any section may be absent; an absent section is omitted from
/// rendering rather than rendered empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanTask {
    /// Title exactly as the generator produced it
    pub title: String,
    /// Section whose key began with "Robotic Mode"
    pub robotic: Option<ModeSection>,
    /// Section whose key began with "Creative Mode"
    pub creative: Option<ModeSection>,
    /// The "Activation Hack" entry
    pub activation_hack: Option<String>,
}

impl PlanTask {
    /// Display title: strips a leading "Task:" label and one layer of
    /// surrounding quote characters
    pub fn clean_title(&self) -> String {
        clean_title(&self.title)
    }

    /// Activation hack with boilerplate label text stripped
    pub fn display_hack(&self) -> Option<String> {
        self.activation_hack.as_deref().map(clean_hack)
    }

    /// Steps for one section kind, if present
    pub fn section(&self, kind: SectionKind) -> Option<&ModeSection> {
        match kind {
            SectionKind::Robotic => self.robotic.as_ref(),
            SectionKind::Creative => self.creative.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.robotic.is_none() && self.creative.is_none() && self.activation_hack.is_none()
    }
}

/// A mode section: the generator's heading plus its ordered steps
///
/// Step order is significant and preserved exactly from generator
/// output to render. A section is only constructed with at least one
/// step.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeSection {
    /// Heading exactly as produced (variants like trailing colons and
    /// parenthetical subtitles are common)
    pub heading: String,
    /// Ordered step strings, never empty
    pub steps: Vec<String>,
}

impl ModeSection {
    /// Heading for display, without a trailing colon
    pub fn display_heading(&self) -> &str {
        self.heading.trim_end_matches(':')
    }
}

/// Strip a leading "Task:" label and one layer of surrounding quotes
pub fn clean_title(raw: &str) -> String {
    let mut title = raw.trim();
    if let Some(rest) = title.strip_prefix("Task:") {
        title = rest.trim();
    }
    if let Some(caps) = QUOTED_RE.captures(title) {
        return caps[1].to_string();
    }
    title.to_string()
}

/// Strip embedded boilerplate labels from an activation hack
pub fn clean_hack(raw: &str) -> String {
    raw.replace("⚡ **Activation Hack:**", "")
        .replace("**Activation Hack:**", "")
        .replace("Activation Hack:", "")
        .trim()
        .to_string()
}

/// Whether a step already begins with an explicit ordinal marker
pub fn has_ordinal(step: &str) -> bool {
    ORDINAL_RE.is_match(step)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_title_strips_prefix_and_quotes() {
        assert_eq!(clean_title("Task: \"Fix bike\""), "Fix bike");
        assert_eq!(clean_title("Task: Fix bike"), "Fix bike");
        assert_eq!(clean_title("\"Fix bike\""), "Fix bike");
        assert_eq!(clean_title("Fix bike"), "Fix bike");
    }

    #[test]
    fn test_clean_title_strips_one_quote_layer_only() {
        assert_eq!(clean_title("\"\"Fix bike\"\""), "\"Fix bike\"");
    }

    #[test]
    fn test_clean_title_curly_quotes() {
        assert_eq!(clean_title("Task: “Call mom”"), "Call mom");
    }

    #[test]
    fn test_clean_hack_strips_label() {
        assert_eq!(clean_hack("⚡ **Activation Hack:** \"Just touch the bike.\""), "\"Just touch the bike.\"");
        assert_eq!(clean_hack("\"Just touch the bike.\""), "\"Just touch the bike.\"");
    }

    #[test]
    fn test_has_ordinal() {
        assert!(has_ordinal("1. Find toolkit"));
        assert!(has_ordinal("  12. Later step"));
        assert!(!has_ordinal("Find toolkit"));
        assert!(!has_ordinal("1) Find toolkit"));
    }

    #[test]
    fn test_display_heading_trims_colon() {
        let section = ModeSection {
            heading: "Robotic Mode (For Paralysis):".to_string(),
            steps: vec!["1. Start".to_string()],
        };
        assert_eq!(section.display_heading(), "Robotic Mode (For Paralysis)");
    }
}
