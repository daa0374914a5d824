//! Realtime vendor implementations

pub mod connect;
pub mod openai;

pub use connect::ConnectRealtimeProvider;
pub use openai::OpenAiRealtimeProvider;

use domain::SdpAnswer;

use crate::error::RealtimeError;

pub(crate) const SDP_CONTENT_TYPE: &str = "application/sdp";

/// Reject empty answers; anything else is passed through untouched
pub(crate) fn answer_from_text(text: String) -> Result<SdpAnswer, RealtimeError> {
    if text.trim().is_empty() {
        return Err(RealtimeError::InvalidResponse(
            "Vendor returned an empty SDP answer".to_string(),
        ));
    }
    Ok(SdpAnswer::new(text))
}
