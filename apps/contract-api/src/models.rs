//! Request/response models for the contract API.

use chrono::{DateTime, Utc};
use contract_engine::{BusinessDescription, ContractType, Section};
use serde::{Deserialize, Serialize};

use crate::storage::ContractRecord;

/// Business context supplied with a generation request. The description
/// validates itself during deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessContext {
    pub description: BusinessDescription,
}

/// Request to generate a contract.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContractRequest {
    pub business_context: BusinessContext,
    pub contract_type: ContractType,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "en".to_string()
}

/// Request to retrieve or download an existing contract.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractRetrievalRequest {
    pub contract_id: String,
}

/// Query parameters for contract listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ListParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
    pub contract_type: Option<String>,
}

fn default_limit() -> i64 {
    50
}

/// A stored contract as returned by retrieval and listing endpoints.
/// Listing omits the section bodies.
#[derive(Debug, Serialize)]
pub struct ContractResponse {
    pub contract_id: String,
    pub contract_type: String,
    pub business_context: BusinessContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<Section>>,
    pub total_sections: i64,
    pub estimated_pages: i64,
    pub generation_time: f64,
    pub model_used: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContractResponse {
    pub fn from_record(
        record: ContractRecord,
        sections: Option<Vec<Section>>,
    ) -> Result<Self, serde_json::Error> {
        let business_context: BusinessContext = serde_json::from_str(&record.business_context)?;
        Ok(Self {
            contract_id: record.id,
            contract_type: record.contract_type,
            business_context,
            sections,
            total_sections: record.total_sections,
            estimated_pages: record.estimated_pages,
            generation_time: record.generation_time,
            model_used: record.model_used,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

/// Response for the listing endpoint.
#[derive(Debug, Serialize)]
pub struct ContractListResponse {
    pub contracts: Vec<ContractResponse>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Response for the contract-types endpoint.
#[derive(Debug, Serialize)]
pub struct ContractTypesResponse {
    pub contract_types: Vec<&'static str>,
}

/// Response for deletion.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
    pub contract_id: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub version: &'static str,
    pub services: ServicesHealth,
}

#[derive(Debug, Serialize)]
pub struct ServicesHealth {
    pub api: &'static str,
    pub ai_provider: &'static str,
}
