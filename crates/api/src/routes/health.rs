use axum::extract::State;
use axum::{routing::get, Json, Router};
use crewhub_core::recruitment::RecruitmentStore;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the store is reachable.
    pub db_healthy: bool,
}

/// GET /health -- returns service and store health.
async fn health_check<S: RecruitmentStore + 'static>(
    State(state): State<AppState<S>>,
) -> Json<HealthResponse> {
    let db_healthy = match state.service.store().health_check().await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Store health check failed");
            false
        }
    };

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router<S: RecruitmentStore + 'static>() -> Router<AppState<S>> {
    Router::new().route("/health", get(health_check::<S>))
}
