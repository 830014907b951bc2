//! Stand-in health server - the endpoint the load scenarios target
//!
//! Serves the same body as the multicloud application under test: GET `/`
//! returns `{ok, cloud, host, message}` with the cloud tag taken from
//! configuration. Also used by the integration tests as a live target.

use anyhow::{Context, Result};
use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Clone)]
struct HealthState {
    cloud: String,
}

/// Build the health router for a given cloud tag.
pub fn health_router(cloud: String) -> Router {
    Router::new()
        .route("/", get(health))
        .with_state(HealthState { cloud })
}

async fn health(State(state): State<HealthState>) -> Json<Value> {
    let host = sysinfo::System::host_name().unwrap_or_else(|| "unknown".to_string());
    Json(json!({
        "ok": true,
        "cloud": state.cloud,
        "host": host,
        "message": "hello from the multicloud app!",
    }))
}

/// Run the health server until Ctrl+C.
pub async fn run_server(port: u16, cloud: String) -> Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("Health server listening on http://{}", addr);
    tracing::info!("  Cloud tag: {}", cloud);
    tracing::info!("Server ready. Press Ctrl+C to stop.");

    axum::serve(listener, health_router(cloud))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Health server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
