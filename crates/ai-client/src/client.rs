//! Generation client: retrying stream initiation and health reporting.

use std::sync::Arc;
use std::time::Duration;

use contract_engine::BusinessDescription;
use tracing::{error, warn};

use crate::error::GenerationError;
use crate::prompt;
use crate::provider::{CompletionProvider, CompletionRequest, CompletionStream, ProviderHealth};

/// Client tunables, injected at construction.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub model: String,
    pub temperature: f32,
    /// Total attempts at opening a stream, including the first.
    pub max_attempts: u32,
    pub retry_base_secs: u64,
    pub retry_cap_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "openai/gpt-4o-mini".to_string(),
            temperature: 0.3,
            max_attempts: 3,
            retry_base_secs: 4,
            retry_cap_secs: 10,
        }
    }
}

pub struct GenerationClient {
    provider: Arc<dyn CompletionProvider>,
    config: GenerationConfig,
}

impl GenerationClient {
    pub fn new(provider: Arc<dyn CompletionProvider>, config: GenerationConfig) -> Self {
        Self { provider, config }
    }

    /// Identifier of the model used for generation.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Opens a completion stream for the given business description.
    ///
    /// Only stream initiation is retried. Once fragments are flowing a
    /// failure is terminal: retrying would duplicate content the caller has
    /// already forwarded downstream.
    pub async fn stream(
        &self,
        description: &BusinessDescription,
    ) -> Result<CompletionStream, GenerationError> {
        let request = CompletionRequest {
            model: self.config.model.clone(),
            system_prompt: prompt::SYSTEM_PROMPT.to_string(),
            user_prompt: prompt::base_prompt(description.as_str()),
            temperature: self.config.temperature,
        };

        let mut attempt = 1;
        loop {
            match self.provider.create_stream(request.clone()).await {
                Ok(stream) => return Ok(stream),
                Err(e) if e.is_retryable() && attempt < self.config.max_attempts => {
                    let delay = self.backoff(attempt);
                    warn!(
                        attempt,
                        delay_secs = delay.as_secs(),
                        error = %e,
                        "stream initiation failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    error!(error = %e, "stream initiation failed");
                    return Err(e);
                }
            }
        }
    }

    /// Exponential backoff: base doubled per attempt, capped.
    fn backoff(&self, attempt: u32) -> Duration {
        let shift = (attempt - 1).min(16);
        let secs = self.config.retry_base_secs.saturating_mul(1u64 << shift);
        Duration::from_secs(secs.min(self.config.retry_cap_secs))
    }

    /// Reports provider health without raising.
    pub async fn health_check(&self) -> ProviderHealth {
        match self.provider.list_models().await {
            Ok(_) => ProviderHealth::Healthy,
            Err(e) => {
                error!(error = %e, "provider health check failed");
                ProviderHealth::Unhealthy
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FlakyProvider {
        failures_left: AtomicU32,
        calls: AtomicU32,
        error_status: u16,
    }

    impl FlakyProvider {
        fn new(failures: u32) -> Self {
            Self {
                failures_left: AtomicU32::new(failures),
                calls: AtomicU32::new(0),
                error_status: 503,
            }
        }
    }

    #[async_trait]
    impl CompletionProvider for FlakyProvider {
        async fn create_stream(
            &self,
            _request: CompletionRequest,
        ) -> Result<CompletionStream, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failures_left.load(Ordering::SeqCst) > 0 {
                self.failures_left.fetch_sub(1, Ordering::SeqCst);
                if self.error_status == 429 {
                    return Err(GenerationError::RateLimited);
                }
                return Err(GenerationError::Api {
                    status: self.error_status,
                    message: "unavailable".to_string(),
                });
            }
            let fragments: Vec<Result<String, GenerationError>> =
                vec![Ok("Intro ".to_string()), Ok("text here.".to_string())];
            Ok(Box::pin(futures::stream::iter(fragments)))
        }

        async fn list_models(&self) -> Result<Vec<String>, GenerationError> {
            if self.failures_left.load(Ordering::SeqCst) > 0 {
                return Err(GenerationError::Transport("down".to_string()));
            }
            Ok(vec!["test-model".to_string()])
        }
    }

    fn test_config() -> GenerationConfig {
        GenerationConfig {
            retry_base_secs: 0,
            retry_cap_secs: 0,
            ..GenerationConfig::default()
        }
    }

    fn description() -> BusinessDescription {
        BusinessDescription::new("A SaaS company providing project management tools").unwrap()
    }

    #[tokio::test]
    async fn test_stream_succeeds_after_transient_failures() {
        use futures::StreamExt;

        let provider = Arc::new(FlakyProvider::new(2));
        let client = GenerationClient::new(provider.clone(), test_config());

        let stream = client.stream(&description()).await.unwrap();
        let fragments: Vec<String> = stream.map(|item| item.unwrap()).collect().await;

        assert_eq!(fragments.join(""), "Intro text here.");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_stream_gives_up_after_max_attempts() {
        let provider = Arc::new(FlakyProvider::new(10));
        let client = GenerationClient::new(provider.clone(), test_config());

        let result = client.stream(&description()).await;
        assert!(result.is_err());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_stream_does_not_retry_terminal_errors() {
        let provider = Arc::new(FlakyProvider {
            failures_left: AtomicU32::new(10),
            calls: AtomicU32::new(0),
            error_status: 401,
        });
        let client = GenerationClient::new(provider.clone(), test_config());

        let result = client.stream(&description()).await;
        assert!(result.is_err());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_health_check_reports_without_raising() {
        let healthy = GenerationClient::new(Arc::new(FlakyProvider::new(0)), test_config());
        assert_eq!(healthy.health_check().await, ProviderHealth::Healthy);

        let unhealthy = GenerationClient::new(Arc::new(FlakyProvider::new(1)), test_config());
        assert_eq!(unhealthy.health_check().await, ProviderHealth::Unhealthy);
    }

    #[test]
    fn test_backoff_schedule_is_capped() {
        let client = GenerationClient::new(
            Arc::new(FlakyProvider::new(0)),
            GenerationConfig::default(),
        );
        assert_eq!(client.backoff(1), Duration::from_secs(4));
        assert_eq!(client.backoff(2), Duration::from_secs(8));
        assert_eq!(client.backoff(3), Duration::from_secs(10));
        assert_eq!(client.backoff(9), Duration::from_secs(10));
    }
}
