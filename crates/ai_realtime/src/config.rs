//! Resolved realtime and ICE vendor profiles

use std::fmt;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Realtime voice vendors with a WebRTC session endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RealtimeVendor {
    /// OpenAI Realtime: raw SDP body
    #[serde(rename = "openai")]
    OpenAi,
    /// Connect-style endpoint: SDP embedded in a JSON call
    Connect,
}

impl RealtimeVendor {
    /// Human-readable vendor name used in error messages
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI Realtime",
            Self::Connect => "Realtime Connect",
        }
    }
}

impl fmt::Display for RealtimeVendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Everything needed to open one realtime session
#[derive(Debug, Clone)]
pub struct RealtimeProfile {
    /// Vendor that receives the offer
    pub vendor: RealtimeVendor,
    /// API base URL, without trailing slash
    pub endpoint: String,
    /// API key
    pub auth_secret: SecretString,
    /// Model used when the client does not override it
    pub default_model: String,
}

impl RealtimeProfile {
    /// Create a profile
    pub fn new(
        vendor: RealtimeVendor,
        endpoint: impl Into<String>,
        auth_secret: impl Into<String>,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            vendor,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            auth_secret: SecretString::from(auth_secret.into()),
            default_model: default_model.into(),
        }
    }
}

/// Credentials for the TURN credential vendor
#[derive(Debug, Clone)]
pub struct IceProfile {
    /// API base URL, without trailing slash
    pub endpoint: String,
    /// Channel (application path) the credentials are issued for
    pub channel: String,
    /// Account username for basic auth
    pub username: String,
    /// Shared secret for basic auth
    pub secret: SecretString,
}

impl IceProfile {
    /// Create a profile
    pub fn new(
        endpoint: impl Into<String>,
        channel: impl Into<String>,
        username: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            channel: channel.into(),
            username: username.into(),
            secret: SecretString::from(secret.into()),
        }
    }
}
