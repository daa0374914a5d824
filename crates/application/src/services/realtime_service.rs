//! Realtime service - SDP offer/answer negotiation with a voice vendor
//!
//! Each negotiation is a short state machine:
//!
//! ```text
//! AwaitingOffer -> ForwardingToVendor -> AwaitingAnswer -> Done
//!        \                 \                    \
//!         +-----------------+--------------------+--> Failed
//! ```
//!
//! SDP offers are single-use, so the vendor is called at most once.

use std::{fmt, sync::Arc};

use ai_realtime::{RealtimeError, RealtimeProvider};
use domain::{DomainError, SdpAnswer, SdpOffer};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::error::ApplicationError;

/// Progress of one negotiation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationState {
    /// Waiting for a usable offer
    AwaitingOffer,
    /// Offer accepted, vendor call being issued
    ForwardingToVendor,
    /// Vendor call sent, waiting for the answer
    AwaitingAnswer,
    /// Answer received
    Done,
    /// Negotiation aborted
    Failed,
}

impl NegotiationState {
    /// Whether moving to `next` is a legal transition
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::AwaitingOffer, Self::ForwardingToVendor)
                | (Self::ForwardingToVendor, Self::AwaitingAnswer)
                | (Self::AwaitingAnswer, Self::Done)
                | (
                    Self::AwaitingOffer | Self::ForwardingToVendor | Self::AwaitingAnswer,
                    Self::Failed
                )
        )
    }

    /// Whether the negotiation has finished
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Move to `next`, rejecting illegal transitions
    pub fn advance(&mut self, next: Self) -> Result<(), ApplicationError> {
        if !self.can_transition_to(next) {
            return Err(ApplicationError::Internal(format!(
                "illegal negotiation transition {self:?} -> {next:?}"
            )));
        }
        *self = next;
        Ok(())
    }
}

/// A client offer together with an optional model override
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferPayload {
    /// SDP offer, forwarded verbatim
    pub offer: SdpOffer,
    /// Model requested by the client
    pub model: Option<String>,
}

#[derive(Deserialize)]
struct JsonOffer {
    #[serde(default)]
    sdp: Option<String>,
    #[serde(default)]
    model: Option<String>,
}

impl OfferPayload {
    /// Read an offer from a request body
    ///
    /// JSON bodies carry `{sdp, model?}`; anything else is raw SDP text.
    pub fn parse(content_type: Option<&str>, body: &[u8]) -> Result<Self, ApplicationError> {
        let is_json = content_type.is_some_and(|ct| ct.to_ascii_lowercase().contains("json"));

        if is_json {
            let JsonOffer { sdp, model } =
                serde_json::from_slice(body).map_err(|_| DomainError::MissingSdpOffer)?;
            let offer = SdpOffer::new(sdp.unwrap_or_default())?;
            return Ok(Self {
                offer,
                model: model.filter(|m| !m.trim().is_empty()),
            });
        }

        let offer = SdpOffer::new(String::from_utf8_lossy(body).into_owned())?;
        Ok(Self { offer, model: None })
    }
}

/// Service negotiating realtime sessions with one vendor
pub struct RealtimeService {
    provider: Arc<dyn RealtimeProvider>,
}

impl fmt::Debug for RealtimeService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RealtimeService")
            .field("vendor", &self.provider.vendor())
            .finish()
    }
}

impl RealtimeService {
    /// Create a service backed by `provider`
    pub fn new(provider: Arc<dyn RealtimeProvider>) -> Self {
        Self { provider }
    }

    /// Forward the offer and return the vendor's answer verbatim
    #[instrument(
        skip(self, payload),
        fields(vendor = %self.provider.vendor(), offer_len = payload.offer.len())
    )]
    pub async fn negotiate(&self, payload: OfferPayload) -> Result<SdpAnswer, ApplicationError> {
        let mut state = NegotiationState::AwaitingOffer;

        let model = payload
            .model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
            .to_string();

        state.advance(NegotiationState::ForwardingToVendor)?;
        debug!(%model, "Forwarding offer");
        let call = self.provider.create_session(&payload.offer, &model);
        state.advance(NegotiationState::AwaitingAnswer)?;

        match call.await {
            Ok(answer) => {
                state.advance(NegotiationState::Done)?;
                debug!(answer_len = answer.as_str().len(), "Negotiation complete");
                Ok(answer)
            },
            Err(err) => {
                state.advance(NegotiationState::Failed)?;
                warn!(error = %err, "Negotiation failed");
                Err(self.vendor_error(&err))
            },
        }
    }

    fn vendor_error(&self, err: &RealtimeError) -> ApplicationError {
        ApplicationError::upstream(
            format!("{} request failed", self.provider.vendor()),
            err.diagnostics(),
        )
        .with_status(err.status())
    }
}
