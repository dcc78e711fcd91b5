//! Provider abstraction for streaming chat-completion backends.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use crate::error::GenerationError;

/// One incremental chunk of generated text. Always non-empty; ordering is
/// significant.
pub type TextFragment = String;

/// Lazy sequence of text fragments produced by a streaming completion call.
/// Dropping the stream releases the underlying connection.
pub type CompletionStream =
    Pin<Box<dyn Stream<Item = Result<TextFragment, GenerationError>> + Send>>;

/// Parameters for a single streaming completion call.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f32,
}

/// Reported provider health.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderHealth {
    Healthy,
    Unhealthy,
}

impl ProviderHealth {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderHealth::Healthy => "healthy",
            ProviderHealth::Unhealthy => "unhealthy",
        }
    }
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Opens a streaming completion call. A failure here is an initiation
    /// failure and may be retried by the caller; failures reported through
    /// the returned stream are terminal.
    async fn create_stream(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionStream, GenerationError>;

    /// Lightweight model-listing call used for health reporting.
    async fn list_models(&self) -> Result<Vec<String>, GenerationError>;
}
