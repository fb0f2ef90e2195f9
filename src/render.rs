//! Batch plan rendering
//!
//! Renders a plan as markdown-flavored text for the `run` subcommand.
//! The TUI has its own renderer; this one exists for piping a plan
//! into a file or another tool.

use colored::Colorize;

use crate::plan::{ModeSection, Plan, has_ordinal};

/// Render a whole plan, with an optional acknowledgment callout first
pub fn render_plan(plan: &Plan, acknowledgment: Option<&str>) -> String {
    let mut out = String::new();

    if let Some(ack) = acknowledgment {
        out.push_str(&format!("> {}\n\n", ack.italic()));
    }

    out.push_str(&format!(
        "{}\n\n",
        format!("Your Recommended AI-Generated Action Plan: ({} tasks)", plan.len()).bold()
    ));

    for (index, task) in plan.tasks.iter().enumerate() {
        out.push_str(&format!(
            "{}\n",
            format!("{}. {}", index + 1, task.clean_title()).bold().green()
        ));

        if let Some(section) = &task.robotic {
            out.push_str(&render_robotic(section));
        }
        if let Some(section) = &task.creative {
            out.push_str(&render_creative(section));
        }
        if let Some(hack) = task.display_hack() {
            out.push_str(&format!("\n  {} {}\n", "⚡ Activation Hack:".yellow().bold(), hack.italic()));
        }
        out.push('\n');
    }

    out
}

/// Ordered checklist; steps without an ordinal marker get one
/// synthesized from their position, steps that already carry one are
/// escaped so a markdown renderer does not renumber them
fn render_robotic(section: &ModeSection) -> String {
    let mut out = format!("\n  {}\n", format!("{}:", section.display_heading()).cyan());
    for (i, step) in section.steps.iter().enumerate() {
        let display = if has_ordinal(step) {
            escape_ordinal(step.trim())
        } else {
            format!("{}. {}", i + 1, step)
        };
        out.push_str(&format!("  - [ ] {display}\n"));
    }
    out
}

/// Bulleted checklist, no synthesized numbering
fn render_creative(section: &ModeSection) -> String {
    let mut out = format!("\n  {}\n", format!("{}:", section.display_heading()).cyan());
    for step in &section.steps {
        out.push_str(&format!("  - [ ] • {step}\n"));
    }
    out
}

/// Escape a leading ordinal marker ("1." → "1\.")
fn escape_ordinal(step: &str) -> String {
    match step.find('.') {
        Some(dot) if step[..dot].chars().all(|c| c.is_ascii_digit()) => {
            format!("{}\\.{}", &step[..dot], &step[dot + 1..])
        }
        _ => step.to_string(),
    }
}
