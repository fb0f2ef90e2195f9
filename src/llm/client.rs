//! LlmClient trait definition

use async_trait::async_trait;

use super::{CompletionRequest, CompletionResponse, LlmError};

/// Stateless generation client - each call is independent
///
/// This is the only component that talks to the outside world and the
/// only unreliable/latent operation in the pipeline. Implementations
/// must never panic on a failed call; every failure comes back as an
/// [`LlmError`] for the caller to degrade gracefully.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single completion request (blocking until complete)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}
