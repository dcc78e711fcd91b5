//! HTTP handlers for the contract API.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::Utc;
use contract_engine::{types, ContractType, ValidationError};

use crate::error::ApiError;
use crate::models::{
    ContractListResponse, ContractResponse, ContractRetrievalRequest, ContractTypesResponse,
    DeleteResponse, GenerateContractRequest, HealthCheckResponse, ListParams, ServicesHealth,
};
use crate::orchestrator;
use crate::state::AppState;
use crate::storage::ContractStats;

const API_VERSION: &str = env!("CARGO_PKG_VERSION");

const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<title>AI Contract Generator API</title>
<style>
  body { font-family: Arial, sans-serif; margin: 40px; }
  .container { max-width: 800px; margin: 0 auto; }
  .endpoint { background: #f5f5f5; padding: 15px; margin: 10px 0; border-radius: 5px; }
  .method { font-weight: bold; color: #007bff; }
</style>
</head>
<body>
<div class="container">
  <h1>AI Contract Generator API</h1>
  <p>This service generates professional legal contracts using AI.</p>

  <h2>Available Endpoints:</h2>
  <div class="endpoint"><span class="method">GET</span> <code>/health</code> - Health check</div>
  <div class="endpoint"><span class="method">GET</span> <code>/api/contract-types</code> - Available contract types</div>
  <div class="endpoint"><span class="method">POST</span> <code>/api/generate-contract</code> - Generate contract (streaming + save)</div>
  <div class="endpoint"><span class="method">POST</span> <code>/api/generate-contract-full</code> - Retrieve contract by ID</div>
  <div class="endpoint"><span class="method">POST</span> <code>/api/download-contract</code> - Download contract by ID</div>
  <div class="endpoint"><span class="method">GET</span> <code>/api/contracts</code> - List all contracts</div>
  <div class="endpoint"><span class="method">GET</span> <code>/api/contracts/stats</code> - Database statistics</div>
  <div class="endpoint"><span class="method">DELETE</span> <code>/api/contracts/{id}</code> - Delete contract by ID</div>

  <h2>Quick Start:</h2>
  <p>Send a POST request to <code>/api/generate-contract</code> with your business context to
  start generating contracts. The contract is saved and can be retrieved later using the
  returned contract ID.</p>
</div>
</body>
</html>
"#;

/// Root endpoint with API information.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

/// Health check endpoint; reports provider health without failing.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthCheckResponse> {
    let provider = state.client.health_check().await;
    Json(HealthCheckResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339(),
        version: API_VERSION,
        services: ServicesHealth {
            api: "healthy",
            ai_provider: provider.as_str(),
        },
    })
}

/// Available contract types.
pub async fn contract_types() -> Json<ContractTypesResponse> {
    Json(ContractTypesResponse {
        contract_types: ContractType::ALL.iter().map(|t| t.as_str()).collect(),
    })
}

/// Generate a contract with real-time streaming and save to database.
///
/// Streams `data:` frames as the model produces text, then a completion
/// sentinel carrying the contract id once the document has been processed.
pub async fn generate_contract(
    State(state): State<Arc<AppState>>,
    Json(mut request): Json<GenerateContractRequest>,
) -> Result<Response, ApiError> {
    if !types::is_valid_language_code(&request.language) {
        let error = ValidationError::InvalidLanguage(request.language.clone());
        return Err(ApiError::Validation(error.to_string()));
    }

    // Single supported deployment: terms of service in English.
    request.contract_type = ContractType::TermsOfService;
    request.language = "en".to_string();

    tracing::info!(
        "Starting contract generation for type: {}",
        request.contract_type
    );

    let (contract_id, body) = orchestrator::run(
        state,
        request.business_context,
        request.contract_type,
        request.language,
    );
    tracing::debug!("Allocated contract id {}", contract_id);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .header(header::CONNECTION, "keep-alive")
        .body(body)
        .map_err(|e| ApiError::Internal(e.into()))
}

/// Retrieve complete contract by ID.
pub async fn get_contract_full(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ContractRetrievalRequest>,
) -> Result<Json<ContractResponse>, ApiError> {
    tracing::info!("Retrieving contract with ID: {}", request.contract_id);

    let (record, sections) = state.store.get_contract(&request.contract_id).await?;
    let response = ContractResponse::from_record(record, Some(sections))
        .map_err(|e| ApiError::Internal(e.into()))?;
    Ok(Json(response))
}

/// Download contract by ID as an HTML file.
pub async fn download_contract(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ContractRetrievalRequest>,
) -> Result<Response, ApiError> {
    tracing::info!("Downloading contract with ID: {}", request.contract_id);

    let (record, _sections) = state.store.get_contract(&request.contract_id).await?;
    let short_id: String = record.id.chars().take(8).collect();
    let filename = format!("contract_{}_{}.html", record.contract_type, short_id);

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                "text/html; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", filename),
            ),
        ],
        record.html_content,
    )
        .into_response())
}

/// List generated contracts with pagination and optional type filtering,
/// newest first.
pub async fn list_contracts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<ContractListResponse>, ApiError> {
    tracing::info!(
        "Listing contracts (limit: {}, offset: {}, type: {:?})",
        params.limit,
        params.offset,
        params.contract_type
    );

    let (records, total) = state
        .store
        .list_contracts(params.limit, params.offset, params.contract_type.as_deref())
        .await?;

    let contracts = records
        .into_iter()
        .map(|record| ContractResponse::from_record(record, None))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ApiError::Internal(e.into()))?;

    Ok(Json(ContractListResponse {
        contracts,
        total,
        limit: params.limit,
        offset: params.offset,
    }))
}

/// Database statistics.
pub async fn contract_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ContractStats>, ApiError> {
    Ok(Json(state.store.stats().await?))
}

/// Delete a contract by ID, cascading to its sections.
pub async fn delete_contract(
    State(state): State<Arc<AppState>>,
    Path(contract_id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    tracing::info!("Deleting contract with ID: {}", contract_id);

    state.store.delete_contract(&contract_id).await?;
    Ok(Json(DeleteResponse {
        message: "Contract deleted successfully",
        contract_id,
    }))
}
