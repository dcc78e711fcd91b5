//! Streaming generation orchestrator.
//!
//! Drives one generation request through its lifecycle: stream fragments
//! from the provider, forward each to the client while buffering, then
//! parse, render, estimate and persist exactly once when the stream ends.
//! The client going away is observed as a failed channel send, which stops
//! provider reads and suppresses all side effects.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use contract_engine::ContractType;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, info};
use uuid::Uuid;

use crate::models::BusinessContext;
use crate::state::AppState;
use crate::storage::NewContract;

/// Completion sentinel sent after a successful generation. Deployed clients
/// key on this exact byte sequence: no `data:` prefix, no closing bracket.
pub const END_OF_DOC_PREFIX: &str = "[END_OF_DOC=";

type Frame = Result<String, Infallible>;

/// Allocates a document id, spawns the generation task and returns the id
/// together with the response body streaming its frames.
pub fn run(
    state: Arc<AppState>,
    context: BusinessContext,
    contract_type: ContractType,
    language: String,
) -> (String, Body) {
    let contract_id = Uuid::new_v4().to_string();
    let (tx, rx) = mpsc::channel::<Frame>(state.config.stream_buffer.max(1));

    tokio::spawn(generate(
        state,
        tx,
        contract_id.clone(),
        context,
        contract_type,
        language,
    ));

    (contract_id, Body::from_stream(ReceiverStream::new(rx)))
}

async fn generate(
    state: Arc<AppState>,
    tx: mpsc::Sender<Frame>,
    contract_id: String,
    context: BusinessContext,
    contract_type: ContractType,
    language: String,
) {
    let started = Instant::now();

    let mut stream = match state.client.stream(&context.description).await {
        Ok(stream) => stream,
        Err(e) => {
            error!("Streaming error: {}", e);
            let _ = tx.send(Ok(format!("data: Error: {}\n\n", e))).await;
            return;
        }
    };

    let mut buffer = String::new();
    let mut fragment_count = 0usize;

    while let Some(item) = stream.next().await {
        match item {
            Ok(fragment) => {
                buffer.push_str(&fragment);
                fragment_count += 1;
                if tx.send(Ok(format!("data: {}\n\n", fragment))).await.is_err() {
                    info!("Client disconnected, aborting generation {}", contract_id);
                    return;
                }
            }
            Err(e) => {
                // Fragments already forwarded are not retracted; the error
                // rides the same channel because headers are committed.
                error!("Streaming error: {}", e);
                let _ = tx.send(Ok(format!("data: Error: {}\n\n", e))).await;
                return;
            }
        }
    }

    if fragment_count == 0 {
        error!("Generation {} produced no content", contract_id);
        let _ = tx
            .send(Ok("data: Error: generation produced no content\n\n".to_string()))
            .await;
        return;
    }

    let sections = state.engine.parse(&buffer);
    let html = state.engine.render(contract_type, &contract_id, &sections);
    let estimated_pages = state.engine.estimate_pages(&sections);
    let generation_time = started.elapsed().as_secs_f64();

    let snapshot = serde_json::to_string(&context).unwrap_or_else(|_| "{}".to_string());
    let record = NewContract {
        id: &contract_id,
        contract_type,
        business_context_json: snapshot,
        language: &language,
        html_content: &html,
        raw_content: &buffer,
        total_sections: sections.len() as u32,
        estimated_pages,
        generation_time,
        model_used: state.client.model(),
    };

    // A failed save is logged but does not suppress the completion marker:
    // the client already holds the generated text.
    if let Err(e) = state.store.save_contract(record, &sections).await {
        error!("Failed to save contract {}: {}", contract_id, e);
    }

    let _ = tx
        .send(Ok(format!("{}{}", END_OF_DOC_PREFIX, contract_id)))
        .await;
}
