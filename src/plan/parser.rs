//! Response parsing and recovery
//!
//! Primary path: the raw generator text is decoded directly as a JSON
//! object. Recovery path: the generator sometimes wraps its output in
//! explanatory prose or a code fence even when asked for constrained
//! JSON, so on a failed decode we scan for a fenced block and decode
//! its contents. Only when both fail does the caller see an error.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::{ModeSection, Plan, PlanTask};

/// Matches a triple-backtick fenced block, optionally tagged "json"
static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json)?\s*([\s\S]*?)\s*```").expect("fence regex"));

/// Response text that could not be interpreted as a plan
#[derive(Debug, Error)]
pub enum ParseError {
    /// Not valid JSON, and no recoverable fenced block either
    #[error("response wasn't in valid JSON format")]
    InvalidJson(#[source] serde_json::Error),

    /// Valid JSON, but not an object at the top level
    #[error("response was valid JSON but not an object")]
    NotAnObject,
}

/// Parse raw generator text into a [`Plan`]
pub fn parse(raw: &str) -> Result<Plan, ParseError> {
    debug!(raw_len = raw.len(), "parse: called");

    let primary_error = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => {
            let plan = normalize(map);
            debug!(tasks = plan.len(), "parse: primary decode succeeded");
            return Ok(plan);
        }
        Ok(_) => {
            warn!("parse: top level is not a JSON object");
            return recover(raw).ok_or(ParseError::NotAnObject);
        }
        Err(e) => e,
    };

    debug!(error = %primary_error, "parse: primary decode failed, trying fenced block");
    recover(raw).ok_or(ParseError::InvalidJson(primary_error))
}

/// Recovery path: decode JSON enclosed in a fenced code block
fn recover(raw: &str) -> Option<Plan> {
    let caps = FENCE_RE.captures(raw)?;
    match serde_json::from_str::<Value>(&caps[1]) {
        Ok(Value::Object(map)) => {
            let plan = normalize(map);
            debug!(tasks = plan.len(), "recover: fenced block decoded");
            Some(plan)
        }
        Ok(_) => {
            warn!("recover: fenced block is not a JSON object");
            None
        }
        Err(e) => {
            warn!(error = %e, "recover: fenced block is not valid JSON");
            None
        }
    }
}

/// Map arbitrary generator keys onto the closed section set
///
/// The generator's key wording varies (trailing colons, parenthetical
/// subtitles), so mode sections are matched by prefix. All fuzziness
/// is isolated here: downstream code only sees typed sections.
/// Deliberately permissive - unknown keys and non-string steps are
/// skipped, an empty step array means the section is absent, and a
/// non-object task value yields an empty entry.
fn normalize(map: serde_json::Map<String, Value>) -> Plan {
    let mut tasks = Vec::with_capacity(map.len());

    for (title, value) in map {
        let mut task = PlanTask {
            title,
            ..Default::default()
        };

        if let Value::Object(sections) = value {
            for (key, section_value) in sections {
                if key.starts_with("Robotic Mode") {
                    if task.robotic.is_none() {
                        task.robotic = mode_section(key, &section_value);
                    }
                } else if key.starts_with("Creative Mode") {
                    if task.creative.is_none() {
                        task.creative = mode_section(key, &section_value);
                    }
                } else if key == "Activation Hack" {
                    if let Value::String(hack) = section_value {
                        task.activation_hack = Some(hack);
                    }
                } else {
                    debug!(%key, "normalize: ignoring unknown section key");
                }
            }
        } else {
            debug!(title = %task.title, "normalize: task value is not an object, keeping empty entry");
        }

        tasks.push(task);
    }

    Plan { tasks }
}

fn mode_section(heading: String, value: &Value) -> Option<ModeSection> {
    let steps: Vec<String> = value
        .as_array()?
        .iter()
        .filter_map(|step| step.as_str().map(str::to_string))
        .collect();

    if steps.is_empty() {
        return None;
    }
    Some(ModeSection { heading, steps })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::SectionKind;

    #[test]
    fn test_parse_single_task() {
        let raw = r#"{"Task: \"Fix bike\"": {"Robotic Mode (For Paralysis)": ["1. Find toolkit"], "Activation Hack": "\"Just touch the bike.\""}}"#;

        let plan = parse(raw).expect("should parse");
        assert_eq!(plan.len(), 1);

        let task = &plan.tasks[0];
        assert_eq!(task.clean_title(), "Fix bike");
        assert_eq!(task.robotic.as_ref().unwrap().steps, vec!["1. Find toolkit"]);
        assert!(task.creative.is_none());
        assert_eq!(task.display_hack().as_deref(), Some("\"Just touch the bike.\""));
    }

    #[test]
    fn test_parse_preserves_task_and_step_order() {
        let raw = r#"{
            "Task: \"Zebra\"": {"Robotic Mode:": ["1. a", "2. b", "3. c"]},
            "Task: \"Apple\"": {"Creative Mode (Explore)": ["x", "y"]}
        }"#;

        let plan = parse(raw).expect("should parse");
        assert_eq!(plan.tasks[0].clean_title(), "Zebra");
        assert_eq!(plan.tasks[1].clean_title(), "Apple");
        assert_eq!(plan.tasks[0].robotic.as_ref().unwrap().steps, vec!["1. a", "2. b", "3. c"]);
        assert_eq!(plan.tasks[1].creative.as_ref().unwrap().steps, vec!["x", "y"]);
    }

    #[test]
    fn test_parse_prefix_matched_headings() {
        let raw = r#"{"T": {
            "Robotic Mode (For Overwhelm):": ["1. go"],
            "Creative Mode (Explore + Narrow Down)": ["🎲 roll a dice"]
        }}"#;

        let plan = parse(raw).expect("should parse");
        let task = &plan.tasks[0];
        assert_eq!(
            task.section(SectionKind::Robotic).unwrap().heading,
            "Robotic Mode (For Overwhelm):"
        );
        assert_eq!(
            task.section(SectionKind::Creative).unwrap().display_heading(),
            "Creative Mode (Explore + Narrow Down)"
        );
    }

    #[test]
    fn test_parse_recovers_fenced_block() {
        let raw = "Sure! Here's your plan:\n```json\n{\"Task: \\\"X\\\"\": {}}\n```";

        let plan = parse(raw).expect("should recover");
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.tasks[0].clean_title(), "X");
        assert!(plan.tasks[0].is_empty());
    }

    #[test]
    fn test_parse_recovers_untagged_fence() {
        let raw = "Here you go:\n```\n{\"T\": {\"Activation Hack\": \"start tiny\"}}\n```\nEnjoy!";

        let plan = parse(raw).expect("should recover");
        assert_eq!(plan.tasks[0].activation_hack.as_deref(), Some("start tiny"));
    }

    #[test]
    fn test_parse_rejects_plain_prose() {
        let err = parse("not json at all").expect_err("should fail");
        assert!(matches!(err, ParseError::InvalidJson(_)));
        assert_eq!(err.to_string(), "response wasn't in valid JSON format");
    }

    #[test]
    fn test_parse_rejects_non_object_top_level() {
        let err = parse("[1, 2, 3]").expect_err("should fail");
        assert!(matches!(err, ParseError::NotAnObject));
    }

    #[test]
    fn test_parse_rejects_invalid_fenced_block() {
        let err = parse("```json\nstill not json\n```").expect_err("should fail");
        assert!(matches!(err, ParseError::InvalidJson(_)));
    }

    #[test]
    fn test_empty_step_array_means_absent_section() {
        let raw = r#"{"T": {"Robotic Mode": [], "Creative Mode": ["one option"]}}"#;

        let plan = parse(raw).expect("should parse");
        assert!(plan.tasks[0].robotic.is_none());
        assert!(plan.tasks[0].creative.is_some());
    }

    #[test]
    fn test_non_string_steps_skipped() {
        let raw = r#"{"T": {"Robotic Mode": ["1. real step", 42, null]}}"#;

        let plan = parse(raw).expect("should parse");
        assert_eq!(plan.tasks[0].robotic.as_ref().unwrap().steps, vec!["1. real step"]);
    }

    #[test]
    fn test_non_object_task_value_keeps_empty_entry() {
        let raw = r#"{"T": "not an object"}"#;

        let plan = parse(raw).expect("should parse");
        assert_eq!(plan.len(), 1);
        assert!(plan.tasks[0].is_empty());
    }

    #[test]
    fn test_round_trip() {
        let raw = r#"{
            "Task: \"Buy Spectacles\"": {
                "Robotic Mode (For Paralysis)": ["1. Spend 2 mins: Google frames", "2. Tomorrow: ask a friend"],
                "Creative Mode (Explore Options)": ["🎥 Watch a styling video", "📱 Try a virtual try-on app"],
                "Activation Hack": "\"Just find 1 frame you hate—elimination is progress!\""
            },
            "Task: \"Do Personal Projects\"": {
                "Robotic Mode (For Overwhelm)": ["1. Dump all ideas", "2. Pick 1 easy win"]
            }
        }"#;

        let plan = parse(raw).expect("should parse");
        let reparsed = parse(&plan.to_json_value().to_string()).expect("round trip");
        assert_eq!(plan, reparsed);
    }
}
