//! Router construction and server startup.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::agent::post_agent;
use super::types::HealthResponse;
use crate::agent::Agent;
use crate::config::Config;
use crate::store::HotelStore;

/// Shared state for every handler.
pub struct AppState {
    pub config: Config,
    pub agent: Agent,
}

impl AppState {
    pub fn new(config: Config, agent: Agent) -> Self {
        Self { config, agent }
    }
}

/// Build the HTTP router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/agent", post(post_agent))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server and run until it stops.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let store = Arc::new(HotelStore::default());
    tracing::info!("Loaded hotel catalog with {} hotels", store.hotels().len());

    let agent = Agent::new(config.clone(), store)?;
    let addr = config.bind_addr();
    let state = Arc::new(AppState::new(config, agent));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// GET /api/health
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.config.default_model.clone(),
    })
}
