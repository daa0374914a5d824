//! Realtime session handlers
//!
//! Both endpoints take JSON `{sdp, model?}` or a raw SDP body and answer
//! with the vendor's SDP, untouched, as `application/sdp`.

use ai_realtime::RealtimeVendor;
use application::OfferPayload;
use axum::{
    extract::State,
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Content type of SDP answers
pub const SDP_CONTENT_TYPE: &str = "application/sdp";

/// Negotiate an OpenAI Realtime session
pub async fn openai_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    negotiate(&state, RealtimeVendor::OpenAi, &headers, &body).await
}

/// Negotiate a session with the connect-style vendor
pub async fn connect_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    negotiate(&state, RealtimeVendor::Connect, &headers, &body).await
}

#[instrument(skip(state, headers, body), fields(vendor = %vendor, body_len = body.len()))]
async fn negotiate(
    state: &AppState,
    vendor: RealtimeVendor,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Response, ApiError> {
    let service = state.realtime_service(vendor)?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    let payload = OfferPayload::parse(content_type, body)?;

    let answer = service.negotiate(payload).await?;

    Ok(([(header::CONTENT_TYPE, SDP_CONTENT_TYPE)], answer.into_inner()).into_response())
}
