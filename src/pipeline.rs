//! Processing pipeline
//!
//! One user action runs the whole sequence synchronously to
//! completion: classification → optional acknowledgment → prompt build
//! → generation → parse. The TUI runs this on a background task and
//! receives the outcome over a channel; there is never more than one
//! in flight per session.

use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info};

use crate::coach;
use crate::llm::{CompletionRequest, LlmClient, LlmError};
use crate::plan::{ParseError, Plan, parse};
use crate::prompts::{Granularity, Mode, PromptLoader};
use crate::session::{LogLevel, SessionLog};

/// Output cap for the plan-generation call
const PLAN_MAX_TOKENS: u32 = 2000;

/// Length of the raw-response preview written to the session log
const PREVIEW_LEN: usize = 100;

/// The inline warning for an empty submission
pub const EMPTY_INPUT_WARNING: &str = "Please enter some tasks!";

/// The one user-visible message for an unrecoverable parse failure
pub const PARSE_FAILURE_MESSAGE: &str = "The AI response wasn't in valid JSON format. Please try again.";

/// Why no new plan was produced
#[derive(Debug, Error)]
pub enum PlanFailure {
    /// The external call failed; rendered as a degraded inline message
    /// embedding the error text
    #[error("I couldn't process your request due to an error. Please try again. Error: {0}")]
    Generation(#[from] LlmError),

    /// The generator answered, but with unrecoverable non-JSON; the
    /// previously displayed plan stays current
    #[error("{PARSE_FAILURE_MESSAGE}")]
    Parse(#[from] ParseError),
}

/// Result of one process action
#[derive(Debug)]
pub struct ProcessOutcome {
    /// Zero or one acknowledgment callout
    pub acknowledgment: Option<String>,
    /// The new plan, or why there isn't one
    pub plan: Result<Plan, PlanFailure>,
    /// Raw generator text, when a response arrived at all
    pub raw_response: Option<String>,
    /// Wall-clock duration of the whole action
    pub elapsed: Duration,
}

/// Run the full pipeline for one non-empty submission
///
/// Callers reject empty input before this point; see
/// [`EMPTY_INPUT_WARNING`]. Per action this issues exactly one
/// classification call, at most one acknowledgment call (zero if
/// neutral), and exactly one task-generation call.
pub async fn process(
    client: Arc<dyn LlmClient>,
    prompts: Arc<PromptLoader>,
    log: SessionLog,
    input: String,
    mode: Mode,
    granularity: Granularity,
) -> ProcessOutcome {
    let started = Instant::now();
    log.info(format!(
        "Starting AI request process for input: '{input}' with mode: {}, granularity level: {}",
        mode.label(),
        granularity.level()
    ));

    // Non-critical; its failure has zero effect on plan generation
    let acknowledgment = coach::acknowledge(&client, &prompts, &log, &input).await;

    let (plan, raw_response) = generate_plan(&client, &prompts, &log, &input, mode, granularity).await;

    let elapsed = started.elapsed();
    debug!(elapsed_ms = elapsed.as_millis() as u64, ok = plan.is_ok(), "process: finished");
    ProcessOutcome {
        acknowledgment,
        plan,
        raw_response,
        elapsed,
    }
}

/// The task-generation leg: build prompts, call the service, parse
async fn generate_plan(
    client: &Arc<dyn LlmClient>,
    prompts: &PromptLoader,
    log: &SessionLog,
    input: &str,
    mode: Mode,
    granularity: Granularity,
) -> (Result<Plan, PlanFailure>, Option<String>) {
    let (system_prompt, user_prompt) = match prompts.build_plan_prompt(input, mode, granularity) {
        Ok(pair) => pair,
        Err(e) => {
            log.error(format!("Prompt build failed: {e}"));
            return (
                Err(PlanFailure::Generation(LlmError::InvalidResponse(e.to_string()))),
                None,
            );
        }
    };
    log.info("Prompts prepared with JSON example");

    log.push(LogLevel::Config, format!("Temperature: {}", mode.temperature()));
    log.push(LogLevel::Config, format!("Max tokens: {PLAN_MAX_TOKENS}"));

    let request = CompletionRequest {
        system_prompt,
        user_prompt,
        temperature: mode.temperature(),
        max_tokens: PLAN_MAX_TOKENS,
        json_object: true,
    };

    log.push(LogLevel::Api, "Sending request to generation API");
    let call_started = Instant::now();

    let raw = match client.complete(request).await {
        Ok(response) => match response.content {
            Some(content) => {
                log.push(
                    LogLevel::Success,
                    format!("Response received in {:.2} seconds", call_started.elapsed().as_secs_f64()),
                );
                content
            }
            None => {
                log.error("API returned an empty response");
                return (
                    Err(PlanFailure::Generation(LlmError::InvalidResponse(
                        "empty response".to_string(),
                    ))),
                    None,
                );
            }
        },
        Err(e) => {
            log.error(format!("API Error: {e}"));
            return (Err(PlanFailure::Generation(e)), None);
        }
    };

    let preview: String = raw.chars().take(PREVIEW_LEN).collect();
    log.push(LogLevel::Data, format!("Raw response: {preview}..."));

    match parse(&raw) {
        Ok(plan) => {
            info!(tasks = plan.len(), "generate_plan: parsed");
            log.info(format!("Successfully parsed JSON with {} tasks", plan.len()));
            (Ok(plan), Some(raw))
        }
        Err(e) => {
            log.error(format!("Error parsing JSON: {e}"));
            (Err(PlanFailure::Parse(e)), Some(raw))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::{MockLlmClient, MockResult};

    const PLAN_JSON: &str =
        r#"{"Task: \"Fix bike\"": {"Robotic Mode (For Paralysis)": ["1. Find toolkit"], "Activation Hack": "\"Just touch the bike.\""}}"#;

    fn setup(results: Vec<MockResult>) -> (Arc<MockLlmClient>, Arc<dyn LlmClient>, Arc<PromptLoader>, SessionLog) {
        let mock = Arc::new(MockLlmClient::new(results));
        let client: Arc<dyn LlmClient> = mock.clone();
        (mock, client, Arc::new(PromptLoader::embedded_only()), SessionLog::new())
    }

    #[tokio::test]
    async fn test_neutral_input_makes_exactly_two_calls() {
        let (mock, client, prompts, log) = setup(vec![MockResult::text("neutral"), MockResult::text(PLAN_JSON)]);

        let outcome = process(
            client,
            prompts,
            log,
            "fix bike".to_string(),
            Mode::Robotic,
            Granularity::Moderate,
        )
        .await;

        // One classification call, zero acknowledgment calls, one generation call
        assert_eq!(mock.call_count(), 2);
        assert!(outcome.acknowledgment.is_none());
        let plan = outcome.plan.expect("plan");
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.tasks[0].clean_title(), "Fix bike");
    }

    #[tokio::test]
    async fn test_emotional_input_makes_exactly_three_calls() {
        let (mock, client, prompts, log) = setup(vec![
            MockResult::text("negative"),
            MockResult::text("That's a lot to carry. One tiny step is enough."),
            MockResult::text(PLAN_JSON),
        ]);

        let outcome = process(
            client,
            prompts,
            log,
            "wah stress leh, need to fix bike".to_string(),
            Mode::Creative,
            Granularity::Minimal,
        )
        .await;

        assert_eq!(mock.call_count(), 3);
        assert!(outcome.acknowledgment.is_some());
        assert!(outcome.plan.is_ok());
    }

    #[tokio::test]
    async fn test_generation_failure_degrades_inline() {
        let (mock, client, prompts, log) = setup(vec![
            MockResult::text("neutral"),
            MockResult::ApiError {
                status: 401,
                message: "bad key".to_string(),
            },
        ]);

        let outcome = process(
            client,
            prompts,
            log.clone(),
            "fix bike".to_string(),
            Mode::Robotic,
            Granularity::Moderate,
        )
        .await;

        assert_eq!(mock.call_count(), 2);
        let err = outcome.plan.expect_err("should fail");
        assert!(matches!(err, PlanFailure::Generation(_)));
        // Degraded message embeds the error text
        assert!(err.to_string().contains("couldn't process your request"));
        assert!(err.to_string().contains("bad key"));
        assert!(outcome.raw_response.is_none());
        assert!(log.snapshot().iter().any(|e| e.message.starts_with("API Error:")));
    }

    #[tokio::test]
    async fn test_non_json_response_is_parse_failure() {
        let (mock, client, prompts, log) = setup(vec![
            MockResult::text("neutral"),
            MockResult::text("not json at all"),
        ]);

        let outcome = process(
            client,
            prompts,
            log,
            "fix bike".to_string(),
            Mode::Robotic,
            Granularity::Moderate,
        )
        .await;

        assert_eq!(mock.call_count(), 2);
        let err = outcome.plan.expect_err("should fail");
        assert!(matches!(err, PlanFailure::Parse(_)));
        assert_eq!(err.to_string(), PARSE_FAILURE_MESSAGE);
        // The raw text is still kept for the logs pane
        assert_eq!(outcome.raw_response.as_deref(), Some("not json at all"));
    }

    #[tokio::test]
    async fn test_fenced_response_recovers() {
        let raw = format!("Sure! Here's your plan:\n```json\n{PLAN_JSON}\n```");
        let (_, client, prompts, log) = setup(vec![MockResult::text("neutral"), MockResult::text(raw)]);

        let outcome = process(
            client,
            prompts,
            log,
            "fix bike".to_string(),
            Mode::Robotic,
            Granularity::Moderate,
        )
        .await;

        assert!(outcome.plan.is_ok());
    }

    #[tokio::test]
    async fn test_acknowledgment_failure_does_not_block_plan() {
        let (mock, client, prompts, log) = setup(vec![
            MockResult::Invalid("classifier down".to_string()),
            MockResult::text(PLAN_JSON),
        ]);

        let outcome = process(
            client,
            prompts,
            log,
            "fix bike".to_string(),
            Mode::Robotic,
            Granularity::Moderate,
        )
        .await;

        assert_eq!(mock.call_count(), 2);
        assert!(outcome.acknowledgment.is_none());
        assert!(outcome.plan.is_ok());
    }
}
