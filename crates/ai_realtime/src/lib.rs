//! AI Realtime - WebRTC session negotiation and ICE credentials
//!
//! Provides traits and implementations for the two halves of a browser
//! voice session:
//! - `RealtimeProvider` - forward an SDP offer to a realtime voice API and
//!   hand back its SDP answer untouched
//! - `IceCredentialProvider` - trade a long-lived TURN secret for
//!   short-lived ICE server descriptors
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the traits (ports)
//! - `providers` and `ice` modules contain concrete implementations (adapters)
//!
//! # Supported Vendors
//!
//! - OpenAI Realtime (raw SDP body, `application/sdp`)
//! - Connect-style realtime endpoint (SDP embedded in a JSON connect call)
//! - Xirsys (ICE credentials)

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod ice;
pub mod ports;
pub mod providers;

pub use config::{IceProfile, RealtimeProfile, RealtimeVendor};
pub use error::RealtimeError;
pub use ice::{XIRSYS_VENDOR, XirsysIceProvider, parse_ice_servers};
pub use ports::{IceCredentialProvider, RealtimeProvider};
pub use providers::{ConnectRealtimeProvider, OpenAiRealtimeProvider};

/// Build the adapter matching a resolved realtime profile
pub fn build_realtime_provider(
    client: reqwest::Client,
    profile: RealtimeProfile,
) -> Arc<dyn RealtimeProvider> {
    match profile.vendor {
        RealtimeVendor::OpenAi => Arc::new(OpenAiRealtimeProvider::new(client, profile)),
        RealtimeVendor::Connect => Arc::new(ConnectRealtimeProvider::new(client, profile)),
    }
}
