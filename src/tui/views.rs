//! TUI views and rendering
//!
//! All rendering logic is contained here. The views module is responsible
//! for drawing the UI based on AppState, but never modifies state beyond
//! scroll bookkeeping.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tracing::trace;

use super::state::{AppState, InteractionMode, PlanRow, visible_rows};
use crate::plan::SectionKind;

mod colors {
    use ratatui::style::Color;

    pub const HEADER: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const TASK: Color = Color::Rgb(50, 205, 50); // Lime green
    pub const DONE: Color = Color::DarkGray;
    pub const HACK: Color = Color::Rgb(255, 215, 0); // Gold
    pub const ACK: Color = Color::Rgb(100, 149, 237); // Cornflower blue
    pub const WARNING: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const SELECTED_BG: Color = Color::Rgb(40, 40, 40);
    pub const DIM: Color = Color::DarkGray;
}

/// Main render function
pub fn render(state: &mut AppState, frame: &mut Frame) {
    trace!(?state.interaction_mode, "render: called");
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(input_height(&state.input)),
            Constraint::Min(5),    // Plan output
            Constraint::Length(2), // Ambient strip
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    render_header(state, frame, chunks[0]);
    render_input(state, frame, chunks[1]);
    render_output(state, frame, chunks[2]);
    render_ambient(state, frame, chunks[3]);
    render_footer(state, frame, chunks[4]);

    match state.interaction_mode {
        InteractionMode::Logs => render_logs_overlay(state, frame, frame.area()),
        InteractionMode::Help => render_help_overlay(frame, frame.area()),
        _ => {}
    }
}

/// Input box height: grows with the brain dump, within reason
fn input_height(input: &str) -> u16 {
    let lines = input.split('\n').count().max(1) as u16;
    (lines + 2).clamp(3, 8)
}

fn render_header(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_header: called");
    let mut spans = vec![
        Span::styled(
            "🧠 ADHD Brain Dump Organizer",
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(state.mode.label(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!("  granularity: {}", state.granularity.name())),
    ];
    if state.busy {
        spans.push(Span::styled(
            format!(
                "  {} Processing your tasks... ({:.0}s)",
                state.spinner(),
                state.busy_elapsed_secs()
            ),
            Style::default().fg(colors::HACK),
        ));
    }

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_input(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_input: called");
    let editing = matches!(state.interaction_mode, InteractionMode::Editing);
    let border_style = if editing {
        Style::default().fg(colors::HEADER)
    } else {
        Style::default().fg(colors::DIM)
    };
    let title = if editing {
        " Brain dump (Ctrl+S to process, Esc to browse) "
    } else {
        " Brain dump (i to edit) "
    };

    let text = if state.input.is_empty() && !editing {
        Paragraph::new(Span::styled(
            "Dump everything on your mind...",
            Style::default().fg(colors::DIM),
        ))
    } else {
        Paragraph::new(state.input.as_str())
    };

    frame.render_widget(
        text.block(Block::default().borders(Borders::ALL).title(title).border_style(border_style))
            .wrap(Wrap { trim: false }),
        area,
    );

    if editing {
        // Cursor at the end of the last input line. split keeps the
        // empty segment after a trailing newline, lines() drops it.
        let last_line = state.input.split('\n').next_back().unwrap_or("");
        let row = state.input.split('\n').count().saturating_sub(1) as u16;
        let x = area.x + 1 + last_line.chars().count() as u16;
        let y = area.y + 1 + row;
        if x < area.right() && y < area.bottom() {
            frame.set_cursor_position((x, y));
        }
    }
}

fn render_output(state: &mut AppState, frame: &mut Frame, area: Rect) {
    trace!("render_output: called");
    let block = Block::default().borders(Borders::ALL).title(" Action Plan ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();

    if let Some(message) = &state.message {
        lines.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(colors::WARNING),
        )));
        lines.push(Line::from(""));
    }

    let acknowledgment = state.acknowledgment.clone();
    if let Some(ack) = &acknowledgment {
        let mut ack_text = tui_markdown::from_str(ack);
        for line in &mut ack_text.lines {
            line.style = line.style.patch(Style::default().fg(colors::ACK).add_modifier(Modifier::ITALIC));
        }
        lines.extend(ack_text.lines);
        lines.push(Line::from(""));
    }

    let Some(plan) = &state.plan else {
        if lines.is_empty() {
            lines.push(Line::from(Span::styled(
                "No plan yet. Dump your tasks above and press Ctrl+S.",
                Style::default().fg(colors::DIM),
            )));
        }
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
        return;
    };

    lines.push(Line::from(Span::styled(
        format!("Your Recommended AI-Generated Action Plan: ({} tasks)", plan.len()),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    let rows = visible_rows(plan, &state.interaction);
    let browsing = matches!(state.interaction_mode, InteractionMode::Browsing);
    let mut cursor_line = 0usize;

    // Hack callout for an expanded task, emitted when its rows end.
    // A task may carry a hack with no step sections at all.
    let hack_line = |task_index: usize| -> Option<Line<'static>> {
        let task_data = &plan.tasks[task_index];
        if !state.interaction.is_expanded(&task_data.clean_title()) {
            return None;
        }
        task_data.display_hack().map(|hack| {
            Line::from(Span::styled(
                format!("  ⚡ Activation Hack: {hack}"),
                Style::default().fg(colors::HACK),
            ))
        })
    };

    for (row_index, row) in rows.iter().enumerate() {
        let selected = browsing && row_index == state.cursor;
        let row_style = if selected {
            Style::default().bg(colors::SELECTED_BG)
        } else {
            Style::default()
        };

        match row {
            PlanRow::Task(task_index) => {
                let task = &plan.tasks[*task_index];
                let marker = if state.interaction.is_expanded(&task.clean_title()) {
                    "▾"
                } else {
                    "▸"
                };
                if *task_index > 0 {
                    if let Some(line) = hack_line(*task_index - 1) {
                        lines.push(line);
                    }
                    lines.push(Line::from(""));
                }
                lines.push(
                    Line::from(vec![
                        Span::raw(format!("{marker} ")),
                        Span::styled(
                            format!("{}. {}", task_index + 1, task.clean_title()),
                            Style::default().fg(colors::TASK).add_modifier(Modifier::BOLD),
                        ),
                    ])
                    .style(row_style),
                );
                if selected {
                    cursor_line = lines.len() - 1;
                }
            }
            PlanRow::Step { task, section, step } => {
                let task_data = &plan.tasks[*task];
                let Some(section_data) = task_data.section(*section) else {
                    continue;
                };
                let step_text = &section_data.steps[*step];

                // First step of a section gets the heading line above it
                if *step == 0 {
                    lines.push(Line::from(Span::styled(
                        format!("  {}", section_data.display_heading()),
                        Style::default().add_modifier(Modifier::BOLD),
                    )));
                }

                let key = super::state::StepKey::new(task_data, *section, step_text);
                let done = state.interaction.is_done(&key);
                lines.push(step_line(*section, *step, step_text, done).style(row_style));
                if selected {
                    cursor_line = lines.len() - 1;
                }
            }
        }
    }

    if let Some(last) = plan.tasks.len().checked_sub(1)
        && let Some(line) = hack_line(last)
    {
        lines.push(line);
    }

    // Keep the cursor row in view
    let height = inner.height as usize;
    if height > 0 {
        let max_scroll = lines.len().saturating_sub(height);
        if cursor_line >= state.plan_scroll as usize + height {
            state.plan_scroll = (cursor_line + 1 - height) as u16;
        } else if cursor_line < state.plan_scroll as usize {
            state.plan_scroll = cursor_line as u16;
        }
        state.plan_scroll = state.plan_scroll.min(max_scroll as u16);
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((state.plan_scroll, 0)),
        inner,
    );
}

/// One checkbox line for a step
fn step_line(section: SectionKind, step_index: usize, step_text: &str, done: bool) -> Line<'static> {
    trace!(?section, step_index, done, "step_line: called");
    let checkbox = if done { "[x]" } else { "[ ]" };
    let body = match section {
        // Robotic steps keep their numbering; synthesize one if missing
        SectionKind::Robotic => {
            if crate::plan::has_ordinal(step_text) {
                step_text.to_string()
            } else {
                format!("{}. {}", step_index + 1, step_text)
            }
        }
        SectionKind::Creative => format!("• {}", step_text.trim_start()),
    };
    let style = if done {
        Style::default().fg(colors::DONE).add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::raw(format!("    {checkbox} ")),
        Span::styled(body, style),
    ])
}

fn render_ambient(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_ambient: called");
    let lines = vec![
        Line::from(vec![
            Span::styled("💡 ", Style::default()),
            Span::styled(state.tip, Style::default().fg(colors::DIM)),
        ]),
        Line::from(Span::styled(
            state.affirmation,
            Style::default().fg(colors::ACK).add_modifier(Modifier::ITALIC),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_footer(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_footer: called");
    let bindings: &[(&str, &str)] = match state.interaction_mode {
        InteractionMode::Editing => &[
            ("Ctrl+S", "process"),
            ("Tab", "mode"),
            ("Esc", "browse"),
            ("Ctrl+C", "quit"),
        ],
        _ => &[
            ("i", "edit"),
            ("p", "process"),
            ("m", "mode"),
            ("1-3", "granularity"),
            ("Space", "toggle"),
            ("L", "logs"),
            ("?", "help"),
            ("q", "quit"),
        ],
    };

    let mut spans = Vec::new();
    for (key, desc) in bindings {
        spans.push(Span::styled(*key, Style::default().fg(colors::KEYBIND)));
        spans.push(Span::styled(format!(" {desc}  "), Style::default().fg(colors::DIM)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_logs_overlay(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_logs_overlay: called");
    let popup_area = centered_rect(80, 70, area);
    frame.render_widget(Clear, popup_area);

    let entries = state.log.snapshot();
    let lines: Vec<Line> = entries
        .iter()
        .map(|entry| {
            let color = match entry.level {
                crate::session::LogLevel::Error => colors::WARNING,
                crate::session::LogLevel::Warning => colors::HACK,
                crate::session::LogLevel::Success => colors::TASK,
                _ => Color::Gray,
            };
            Line::from(Span::styled(entry.display(), Style::default().fg(color)))
        })
        .collect();

    let logs = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Session Log ({} entries, Esc to close) ", entries.len()))
                .style(Style::default().bg(Color::Black)),
        )
        .wrap(Wrap { trim: false })
        .scroll((state.log_scroll, 0));
    frame.render_widget(logs, popup_area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    trace!("render_help_overlay: called");
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                .fg(colors::HEADER),
        )]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Editing",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        key_line("Ctrl+S", "Process the brain dump"),
        key_line("Tab", "Toggle Robotic/Creative mode"),
        key_line("Esc", "Switch to browsing"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Browsing",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        key_line("i / e", "Edit the brain dump"),
        key_line("p", "Process again"),
        key_line("m", "Toggle Robotic/Creative mode"),
        key_line("1/2/3", "Granularity (minimal/moderate/detailed)"),
        key_line("j/↓ k/↑", "Move between tasks and steps"),
        key_line("Space/Enter", "Expand task or check off step"),
        key_line("L", "Session log"),
        key_line("?", "Toggle help"),
        key_line("q", "Quit"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help (? to close) ")
                .style(Style::default().bg(Color::Black)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(help, popup_area);
}

/// Helper to create a key binding line
fn key_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<12}", key), Style::default().fg(colors::KEYBIND)),
        Span::raw(desc),
    ])
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    trace!(percent_x, percent_y, "centered_rect: called");
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_height_clamps() {
        assert_eq!(input_height(""), 3);
        assert_eq!(input_height("one\ntwo"), 4);
        assert_eq!(input_height(&"x\n".repeat(30)), 8);
    }

    #[test]
    fn test_input_height_counts_trailing_newline() {
        // Pressing Enter opens a new row even before anything is typed on it
        assert_eq!(input_height("one\n"), 4);
    }

    #[test]
    fn test_step_line_synthesizes_robotic_ordinal() {
        let line = step_line(SectionKind::Robotic, 2, "Pump tires", false);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "    [ ] 3. Pump tires");
    }

    #[test]
    fn test_step_line_keeps_model_ordinal() {
        let line = step_line(SectionKind::Robotic, 0, "1. Find toolkit", true);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "    [x] 1. Find toolkit");
    }

    #[test]
    fn test_step_line_creative_bullet() {
        let line = step_line(SectionKind::Creative, 0, "🎥 Watch a video", false);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "    [ ] • 🎥 Watch a video");
    }

    #[test]
    fn test_render_is_idempotent() {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        use crate::plan::parse;
        use crate::session::SessionLog;

        let mut state = AppState::new(SessionLog::new());
        state.plan = Some(
            parse(
                r#"{"Task: \"Fix bike\"": {
                    "Robotic Mode (For Paralysis)": ["1. Find toolkit", "Pump tires"],
                    "Creative Mode (Explore Options)": ["🎥 Watch a video"],
                    "Activation Hack": "\"Just touch the bike.\""
                }}"#,
            )
            .expect("plan"),
        );
        state.acknowledgment = Some("That's a lot. One step is enough.".to_string());
        state.interaction_mode = InteractionMode::Browsing;
        state.interaction.toggle_expanded("Fix bike");

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).expect("terminal");
        terminal.draw(|frame| render(&mut state, frame)).expect("first draw");
        let first = terminal.backend().buffer().clone();

        // Same state, no intervening toggles: pixel-identical
        terminal.draw(|frame| render(&mut state, frame)).expect("second draw");
        assert_eq!(terminal.backend().buffer(), &first);
    }

    fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_hack_renders_without_step_sections() {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        use crate::plan::parse;
        use crate::session::SessionLog;

        let mut state = AppState::new(SessionLog::new());
        state.plan = Some(
            parse(r#"{"Task: \"Fix bike\"": {"Activation Hack": "Just touch the bike."}}"#)
                .expect("plan"),
        );
        state.interaction_mode = InteractionMode::Browsing;
        state.interaction.toggle_expanded("Fix bike");

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        terminal.draw(|frame| render(&mut state, frame)).expect("draw");

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Just touch the bike."));
    }

    #[test]
    fn test_hack_renders_for_every_expanded_task() {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        use crate::plan::parse;
        use crate::session::SessionLog;

        let mut state = AppState::new(SessionLog::new());
        state.plan = Some(
            parse(
                r#"{
                    "Task: \"Fix bike\"": {
                        "Robotic Mode (For Paralysis)": ["1. Find toolkit"],
                        "Activation Hack": "Just touch the bike."
                    },
                    "Task: \"Call dentist\"": {
                        "Activation Hack": "Open the contacts app."
                    }
                }"#,
            )
            .expect("plan"),
        );
        state.interaction_mode = InteractionMode::Browsing;
        state.interaction.toggle_expanded("Fix bike");
        state.interaction.toggle_expanded("Call dentist");

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        terminal.draw(|frame| render(&mut state, frame)).expect("draw");

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Just touch the bike."));
        assert!(text.contains("Open the contacts app."));
    }

    #[test]
    fn test_editing_cursor_follows_trailing_newline() {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        use crate::session::SessionLog;

        let mut state = AppState::new(SessionLog::new());
        state.input = "abc".to_string();

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).expect("terminal");
        terminal.draw(|frame| render(&mut state, frame)).expect("draw");
        let before = terminal.get_cursor_position().expect("cursor");

        state.input.push('\n');
        terminal.draw(|frame| render(&mut state, frame)).expect("draw");
        let after = terminal.get_cursor_position().expect("cursor");

        // Enter moves the cursor to the start of a fresh row
        assert_eq!(after.y, before.y + 1);
        assert_eq!(after.x, before.x - 3);
    }
}
