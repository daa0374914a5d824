//! OpenAI Realtime provider
//!
//! The offer is POSTed as the raw request body with `Content-Type:
//! application/sdp`; the response body is the SDP answer.

use async_trait::async_trait;
use domain::{SdpAnswer, SdpOffer};
use reqwest::{Client, header::CONTENT_TYPE};
use secrecy::ExposeSecret;
use tracing::{debug, instrument, warn};

use super::{SDP_CONTENT_TYPE, answer_from_text};
use crate::config::{RealtimeProfile, RealtimeVendor};
use crate::error::RealtimeError;
use crate::ports::RealtimeProvider;

/// OpenAI Realtime WebRTC session endpoint
#[derive(Debug, Clone)]
pub struct OpenAiRealtimeProvider {
    client: Client,
    profile: RealtimeProfile,
}

impl OpenAiRealtimeProvider {
    /// Create a provider for a resolved profile
    pub const fn new(client: Client, profile: RealtimeProfile) -> Self {
        Self { client, profile }
    }

    fn session_url(&self) -> String {
        format!("{}/realtime", self.profile.endpoint)
    }
}

#[async_trait]
impl RealtimeProvider for OpenAiRealtimeProvider {
    #[instrument(skip(self, offer), fields(offer_len = offer.len(), model = %model))]
    async fn create_session(
        &self,
        offer: &SdpOffer,
        model: &str,
    ) -> Result<SdpAnswer, RealtimeError> {
        debug!("Forwarding SDP offer to OpenAI Realtime");

        let response = self
            .client
            .post(self.session_url())
            .query(&[("model", model)])
            .bearer_auth(self.profile.auth_secret.expose_secret())
            .header(CONTENT_TYPE, SDP_CONTENT_TYPE)
            .body(offer.as_str().to_owned())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = %status, "OpenAI Realtime rejected the offer");
            return Err(RealtimeError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        debug!(answer_len = body.len(), "SDP answer received");
        answer_from_text(body)
    }

    fn vendor(&self) -> RealtimeVendor {
        RealtimeVendor::OpenAi
    }

    fn default_model(&self) -> &str {
        &self.profile.default_model
    }
}
