//! Request/response types for the generation service

use serde::{Deserialize, Serialize};

/// A single generation request
///
/// Each call is independent; no conversation state is kept between
/// calls. The pipeline makes at most three of these per user action
/// (classify, acknowledge, generate) and each carries its own
/// temperature and output cap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// System instructions
    pub system_prompt: String,
    /// User message
    pub user_prompt: String,
    /// Sampling temperature (fixed policy per call site, not config)
    pub temperature: f32,
    /// Output token cap
    pub max_tokens: u32,
    /// Ask the service for a JSON-object-constrained response
    pub json_object: bool,
}

/// Response from a generation request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated text, if any
    pub content: Option<String>,
    /// Token accounting
    pub usage: TokenUsage,
}

impl CompletionResponse {
    /// Convenience constructor for tests and mocks
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            usage: TokenUsage::default(),
        }
    }
}

/// Token usage reported by the service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}
