//! Session Description Protocol blobs
//!
//! Offers and answers are opaque: they are forwarded byte for byte and never
//! parsed or rewritten.

use crate::errors::DomainError;

/// SDP offer generated by the browser peer connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdpOffer(String);

impl SdpOffer {
    /// Wrap an offer, rejecting blank payloads
    pub fn new(sdp: impl Into<String>) -> Result<Self, DomainError> {
        let sdp = sdp.into();
        if sdp.trim().is_empty() {
            return Err(DomainError::MissingSdpOffer);
        }
        Ok(Self(sdp))
    }

    /// Borrow the raw offer text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Size of the offer in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed offer
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Take the raw offer text
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// SDP answer returned by the realtime vendor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdpAnswer(String);

impl SdpAnswer {
    /// Wrap a vendor answer unchanged
    pub fn new(sdp: impl Into<String>) -> Self {
        Self(sdp.into())
    }

    /// Borrow the raw answer text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the raw answer text
    pub fn into_inner(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_offer_is_rejected() {
        assert_eq!(SdpOffer::new(""), Err(DomainError::MissingSdpOffer));
        assert_eq!(SdpOffer::new(" \r\n"), Err(DomainError::MissingSdpOffer));
    }

    #[test]
    fn offer_is_kept_verbatim() {
        let raw = "v=0\r\no=- 46117317 2 IN IP4 127.0.0.1\r\n";
        let offer = SdpOffer::new(raw).unwrap();
        assert_eq!(offer.as_str(), raw);
        assert_eq!(offer.len(), raw.len());
    }

    #[test]
    fn answer_is_kept_verbatim() {
        let answer = SdpAnswer::new("v=0\r\ns=-\r\n");
        assert_eq!(answer.into_inner(), "v=0\r\ns=-\r\n");
    }
}
