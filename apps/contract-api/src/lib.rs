//! AI Contract Generator API
//!
//! Streams AI-generated legal documents to clients while buffering them,
//! parses the finished text into numbered sections, renders a standalone
//! HTML artifact and persists everything for later retrieval, listing,
//! download and deletion.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod orchestrator;
pub mod state;
pub mod storage;

use state::AppState;

/// Builds the application router with all routes and middleware.
pub fn router(state: Arc<AppState>) -> Router {
    // CORS configuration for web clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/api/contract-types", get(handlers::contract_types))
        .route("/api/generate-contract", post(handlers::generate_contract))
        .route(
            "/api/generate-contract-full",
            post(handlers::get_contract_full),
        )
        .route("/api/download-contract", post(handlers::download_contract))
        .route("/api/contracts", get(handlers::list_contracts))
        .route("/api/contracts/stats", get(handlers::contract_stats))
        .route("/api/contracts/:id", delete(handlers::delete_contract))
        .layer(middleware::from_fn(process_time))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Adds a processing time header to every response.
async fn process_time(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let mut response = next.run(request).await;
    let elapsed = start.elapsed().as_secs_f64().to_string();
    if let Ok(value) = HeaderValue::from_str(&elapsed) {
        response.headers_mut().insert("x-process-time", value);
    }
    response
}
