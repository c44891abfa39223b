//! Binary for the ChatX Genie webhook service.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use chatx_core::init_tracing;
use chatx_genie::GenieClient;
use chatx_webhook::{build_router, AppConfig, AppState, GenieDispatcher};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(config.log_file.as_deref())?;

    let client = GenieClient::new(
        config.databricks_host.clone(),
        config.databricks_token.clone(),
        config.genie_space_id.clone(),
    );
    let state = AppState {
        processor: Arc::new(GenieDispatcher::new(Arc::new(client))),
    };

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "chatx webhook listening");
    axum::serve(listener, build_router(state)).await?;

    Ok(())
}
