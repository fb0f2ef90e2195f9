//! Emotional-acknowledgment helper
//!
//! Two-stage, independent of task extraction: a constrained
//! classification call maps the input onto a fixed three-way taxonomy,
//! then (for emotional input only) a second call produces a short
//! validation message. Acknowledgment is a non-critical enhancement;
//! every failure here degrades to "no acknowledgment shown" and never
//! blocks plan generation.

use std::sync::Arc;

use tracing::debug;

use crate::llm::{CompletionRequest, LlmClient, LlmError};
use crate::prompts::PromptLoader;
use crate::session::{LogLevel, SessionLog};

/// Classification call parameters: near-deterministic, single-word cap
const CLASSIFY_TEMPERATURE: f32 = 0.1;
const CLASSIFY_MAX_TOKENS: u32 = 10;

/// Acknowledgment call parameters: expressive, short word budget
/// enforced by the instructions
const ACK_TEMPERATURE: f32 = 0.88;
const ACK_MAX_TOKENS: u32 = 555;

/// Detected emotional tone of the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emotion {
    Negative,
    Positive,
    Neutral,
}

impl Emotion {
    /// Map a classifier answer onto the taxonomy
    ///
    /// Substring match, since the generator pads its answer now and
    /// then. Anything unrecognized counts as neutral: a misdirected
    /// validation message is worse than none.
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("neutral") {
            Self::Neutral
        } else if label.contains("positive") {
            Self::Positive
        } else if label.contains("negative") {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

/// Classify the emotional tone of the input
pub async fn classify(
    client: &Arc<dyn LlmClient>,
    prompts: &PromptLoader,
    log: &SessionLog,
    input: &str,
) -> Result<Emotion, LlmError> {
    debug!(input_len = input.len(), "classify: called");
    let system_prompt = prompts
        .classify_prompt()
        .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

    let request = CompletionRequest {
        system_prompt,
        user_prompt: format!(
            "What type of emotion does this text convey? Is it neutral, positive, or negative? \
             Just use the words 'neutral', 'positive', or 'negative' to describe the emotion. '{input}'"
        ),
        temperature: CLASSIFY_TEMPERATURE,
        max_tokens: CLASSIFY_MAX_TOKENS,
        json_object: false,
    };

    let response = client.complete(request).await?;
    let label = response.content.unwrap_or_default();
    let emotion = Emotion::from_label(&label);
    log.info(format!("Emotion detected: {}", label.trim()));
    Ok(emotion)
}

/// Produce an optional acknowledgment message for the input
///
/// `None` means no acknowledgment is shown: the input was neutral, or
/// some stage failed. Failures are logged and swallowed here by
/// design.
pub async fn acknowledge(
    client: &Arc<dyn LlmClient>,
    prompts: &PromptLoader,
    log: &SessionLog,
    input: &str,
) -> Option<String> {
    debug!(input_len = input.len(), "acknowledge: called");

    let emotion = match classify(client, prompts, log, input).await {
        Ok(emotion) => emotion,
        Err(e) => {
            log.push(LogLevel::Error, format!("Error getting emotional validation: {e}"));
            return None;
        }
    };

    if emotion == Emotion::Neutral {
        log.info("Neutral emotion detected, skipping validation");
        return None;
    }

    let system_prompt = match prompts.acknowledgment_prompt(emotion == Emotion::Positive) {
        Ok(prompt) => prompt,
        Err(e) => {
            log.push(LogLevel::Error, format!("Error loading validation prompt: {e}"));
            return None;
        }
    };

    let request = CompletionRequest {
        system_prompt,
        user_prompt: format!("Respond to this statement with appropriate support: '{input}'"),
        temperature: ACK_TEMPERATURE,
        max_tokens: ACK_MAX_TOKENS,
        json_object: false,
    };

    match client.complete(request).await {
        Ok(response) => response.content,
        Err(e) => {
            log.push(LogLevel::Error, format!("Error getting emotional validation: {e}"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::{MockLlmClient, MockResult};

    fn setup(results: Vec<MockResult>) -> (Arc<MockLlmClient>, Arc<dyn LlmClient>, PromptLoader, SessionLog) {
        let mock = Arc::new(MockLlmClient::new(results));
        let client: Arc<dyn LlmClient> = mock.clone();
        (mock, client, PromptLoader::embedded_only(), SessionLog::new())
    }

    #[test]
    fn test_emotion_from_label() {
        assert_eq!(Emotion::from_label("Neutral."), Emotion::Neutral);
        assert_eq!(Emotion::from_label("positive"), Emotion::Positive);
        assert_eq!(Emotion::from_label("NEGATIVE (overwhelmed)"), Emotion::Negative);
        assert_eq!(Emotion::from_label("I cannot tell"), Emotion::Neutral);
        assert_eq!(Emotion::from_label(""), Emotion::Neutral);
    }

    #[tokio::test]
    async fn test_acknowledge_neutral_skips_second_call() {
        let (mock, client, prompts, log) = setup(vec![MockResult::text("neutral")]);

        let ack = acknowledge(&client, &prompts, &log, "buy milk, call dentist").await;
        assert!(ack.is_none());
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_acknowledge_negative_makes_second_call() {
        let (mock, client, prompts, log) = setup(vec![
            MockResult::text("negative"),
            MockResult::text("That sounds really hard. You're not alone."),
        ]);

        let ack = acknowledge(&client, &prompts, &log, "so overwhelmed with everything").await;
        assert_eq!(ack.as_deref(), Some("That sounds really hard. You're not alone."));
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_acknowledge_classify_failure_degrades_to_none() {
        let (mock, client, prompts, log) = setup(vec![MockResult::ApiError {
            status: 500,
            message: "boom".to_string(),
        }]);

        let ack = acknowledge(&client, &prompts, &log, "some input").await;
        assert!(ack.is_none());
        assert_eq!(mock.call_count(), 1);
        // The failure is logged, not surfaced
        assert!(log.snapshot().iter().any(|e| e.level == LogLevel::Error));
    }

    #[tokio::test]
    async fn test_acknowledge_second_call_failure_degrades_to_none() {
        let (mock, client, prompts, log) = setup(vec![
            MockResult::text("positive"),
            MockResult::Invalid("truncated".to_string()),
        ]);

        let ack = acknowledge(&client, &prompts, &log, "feeling great, let's go").await;
        assert!(ack.is_none());
        assert_eq!(mock.call_count(), 2);
    }
}
