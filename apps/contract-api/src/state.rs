//! Application state for the contract API.

use std::sync::Arc;

use ai_client::{GenerationClient, OpenAiProvider};
use contract_engine::ContractEngine;

use crate::config::AppConfig;
use crate::storage::ContractStore;

pub struct AppState {
    pub config: AppConfig,
    pub store: ContractStore,
    pub engine: ContractEngine,
    pub client: GenerationClient,
}

impl AppState {
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        tracing::info!("Connecting to database: {}", config.database_url);
        let store = ContractStore::connect(&config.database_url).await?;

        let provider = Arc::new(OpenAiProvider::new(
            config.ai_base_url.clone(),
            config.ai_api_key.clone(),
        )?);
        let client = GenerationClient::new(provider, config.generation());

        Ok(Self {
            store,
            engine: ContractEngine::new(),
            client,
            config,
        })
    }

    /// Assembles state from externally constructed parts; tests substitute a
    /// scripted provider and an in-memory store here.
    pub fn with_parts(config: AppConfig, store: ContractStore, client: GenerationClient) -> Self {
        Self {
            config,
            store,
            engine: ContractEngine::new(),
            client,
        }
    }
}
