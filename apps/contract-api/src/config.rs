//! Application configuration.
//!
//! Assembled from the environment once in `main` and passed into each
//! component explicitly; nothing else reads ambient process state.

use std::env;
use std::str::FromStr;

use ai_client::GenerationConfig;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub ai_api_key: String,
    pub ai_base_url: String,
    pub model: String,
    pub temperature: f32,
    pub retry_base_secs: u64,
    pub retry_cap_secs: u64,
    /// Bound on in-flight frames between the orchestrator and a client.
    pub stream_buffer: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env_parsed("PORT", 8000),
            database_url: env_or("DATABASE_URL", "sqlite:contracts.db?mode=rwc"),
            ai_api_key: env_or("OPENAI_API_KEY", "test-key"),
            ai_base_url: env_or("AI_BASE_URL", "https://openrouter.ai/api/v1"),
            model: env_or("DEFAULT_MODEL", "openai/gpt-4o-mini"),
            temperature: env_parsed("AI_TEMPERATURE", 0.3),
            retry_base_secs: env_parsed("AI_RETRY_BASE_SECS", 4),
            retry_cap_secs: env_parsed("AI_RETRY_CAP_SECS", 10),
            stream_buffer: env_parsed("STREAM_BUFFER", 16),
        }
    }

    /// The slice of configuration owned by the generation client.
    pub fn generation(&self) -> GenerationConfig {
        GenerationConfig {
            model: self.model.clone(),
            temperature: self.temperature,
            retry_base_secs: self.retry_base_secs,
            retry_cap_secs: self.retry_cap_secs,
            ..GenerationConfig::default()
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parsed<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_config_carries_model_and_retry_settings() {
        let config = AppConfig {
            port: 0,
            database_url: "sqlite::memory:".to_string(),
            ai_api_key: "k".to_string(),
            ai_base_url: "http://localhost".to_string(),
            model: "test-model".to_string(),
            temperature: 0.5,
            retry_base_secs: 1,
            retry_cap_secs: 2,
            stream_buffer: 4,
        };

        let generation = config.generation();
        assert_eq!(generation.model, "test-model");
        assert_eq!(generation.temperature, 0.5);
        assert_eq!(generation.max_attempts, 3);
        assert_eq!(generation.retry_base_secs, 1);
    }
}
