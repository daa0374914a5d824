//! Health check handlers

use axum::{Json, extract::State, http::StatusCode};
use infrastructure::{CapabilityReport, ProviderResolver};
use serde::Serialize;

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check - is the server running?
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub capabilities: CapabilityReport,
}

/// Readiness check - is a chat provider configured?
///
/// Reports configuration only; no vendor is contacted.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let config = state.config.load();
    let capabilities = ProviderResolver::new(&config).capabilities();
    let ready = capabilities.chat;

    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadinessResponse {
            ready,
            capabilities,
        }),
    )
}
