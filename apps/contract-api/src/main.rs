//! Contract API server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use contract_api::config::AppConfig;
use contract_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("contract_api=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    info!("Initializing Contract Generator API...");
    let config = AppConfig::from_env();
    let port = config.port;
    let state = Arc::new(AppState::new(config).await?);

    let app = contract_api::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting Contract Generator API on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
