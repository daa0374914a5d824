//! Port definitions for realtime negotiation and ICE credentials

use async_trait::async_trait;
use domain::{IceServer, SdpAnswer, SdpOffer};

use crate::{config::RealtimeVendor, error::RealtimeError};

/// Port for realtime voice session vendors
///
/// Implementations forward the offer exactly once; SDP offers are
/// single-use, so a failed call is never retried.
#[async_trait]
pub trait RealtimeProvider: Send + Sync {
    /// Forward `offer` and return the vendor's answer verbatim
    async fn create_session(
        &self,
        offer: &SdpOffer,
        model: &str,
    ) -> Result<SdpAnswer, RealtimeError>;

    /// Vendor behind this adapter
    fn vendor(&self) -> RealtimeVendor;

    /// Model used when the client does not override it
    fn default_model(&self) -> &str;
}

/// Port for short-lived ICE credential vendors
#[async_trait]
pub trait IceCredentialProvider: Send + Sync {
    /// Fetch a fresh set of ICE servers
    async fn fetch_ice_servers(&self) -> Result<Vec<IceServer>, RealtimeError>;

    /// Vendor name used in error messages
    fn vendor_name(&self) -> &'static str;
}
