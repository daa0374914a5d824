//! ICE server handler

use axum::{
    Json,
    extract::State,
    http::header,
    response::IntoResponse,
};
use domain::IceServer;
use serde::Serialize;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// ICE server list
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IceServersResponse {
    pub ice_servers: Vec<IceServer>,
}

/// Issue short-lived ICE servers; the response must never be cached
#[instrument(skip(state))]
pub async fn ice_servers(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let service = state.ice_service()?;
    let ice_servers = service.ice_servers().await?;

    Ok((
        [(header::CACHE_CONTROL, "no-store")],
        Json(IceServersResponse { ice_servers }),
    ))
}
