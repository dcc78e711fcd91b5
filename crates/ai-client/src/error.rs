use thiserror::Error;

/// Errors surfaced by the generation client and provider implementations.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The provider signalled rate limiting at stream initiation.
    #[error("provider rate limit exceeded")]
    RateLimited,

    #[error("provider API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("stream decode error: {0}")]
    StreamDecode(String),
}

impl GenerationError {
    /// Whether a fresh stream initiation may succeed on retry. Only applies
    /// before any fragment has been delivered; mid-stream failures are
    /// terminal regardless.
    pub fn is_retryable(&self) -> bool {
        match self {
            GenerationError::RateLimited => true,
            GenerationError::Api { status, .. } => *status >= 500,
            GenerationError::Transport(_) => true,
            GenerationError::StreamDecode(_) => false,
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(error: reqwest::Error) -> Self {
        GenerationError::Transport(error.to_string())
    }
}
