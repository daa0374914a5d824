//! Connect-style realtime provider
//!
//! The offer travels inside a JSON connect call. The vendor may answer with
//! raw SDP or with a JSON envelope carrying the answer in `sdp` (or
//! `answer`); either way the SDP text is returned unmodified.

use async_trait::async_trait;
use domain::{SdpAnswer, SdpOffer};
use reqwest::{Client, header::CONTENT_TYPE};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::answer_from_text;
use crate::config::{RealtimeProfile, RealtimeVendor};
use crate::error::RealtimeError;
use crate::ports::RealtimeProvider;

/// Realtime vendor reached through a `POST /connect` call
#[derive(Debug, Clone)]
pub struct ConnectRealtimeProvider {
    client: Client,
    profile: RealtimeProfile,
}

/// Connect call body
#[derive(Debug, Serialize)]
struct ConnectRequest<'a> {
    sdp: &'a str,
    model: &'a str,
}

impl ConnectRealtimeProvider {
    /// Create a provider for a resolved profile
    pub const fn new(client: Client, profile: RealtimeProfile) -> Self {
        Self { client, profile }
    }

    fn connect_url(&self) -> String {
        format!("{}/connect", self.profile.endpoint)
    }

    /// Pull the answer out of a JSON envelope
    fn answer_from_json(body: &str) -> Result<SdpAnswer, RealtimeError> {
        let envelope: Value = serde_json::from_str(body)
            .map_err(|_| RealtimeError::InvalidResponse(body.to_string()))?;

        envelope
            .get("sdp")
            .or_else(|| envelope.get("answer"))
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| RealtimeError::InvalidResponse(body.to_string()))
            .and_then(answer_from_text)
    }
}

#[async_trait]
impl RealtimeProvider for ConnectRealtimeProvider {
    #[instrument(skip(self, offer), fields(offer_len = offer.len(), model = %model))]
    async fn create_session(
        &self,
        offer: &SdpOffer,
        model: &str,
    ) -> Result<SdpAnswer, RealtimeError> {
        debug!("Forwarding SDP offer through connect call");

        let response = self
            .client
            .post(self.connect_url())
            .bearer_auth(self.profile.auth_secret.expose_secret())
            .json(&ConnectRequest {
                sdp: offer.as_str(),
                model,
            })
            .send()
            .await?;

        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("json"));
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = %status, "Connect call rejected the offer");
            return Err(RealtimeError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        debug!(answer_len = body.len(), is_json, "Connect answer received");

        if is_json {
            Self::answer_from_json(&body)
        } else {
            answer_from_text(body)
        }
    }

    fn vendor(&self) -> RealtimeVendor {
        RealtimeVendor::Connect
    }

    fn default_model(&self) -> &str {
        &self.profile.default_model
    }
}
