//! Realtime voice vendors and the ICE credential broker.

use secrecy::SecretString;
use serde::Deserialize;

use super::providers::default_openai_base_url;

/// Realtime vendor settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RealtimeConfig {
    /// OpenAI Realtime (raw SDP)
    #[serde(default)]
    pub openai: RealtimeOpenAiConfig,

    /// Connect-style vendor (SDP in JSON)
    #[serde(default)]
    pub connect: ConnectConfig,
}

/// OpenAI Realtime settings
#[derive(Debug, Clone, Deserialize)]
pub struct RealtimeOpenAiConfig {
    /// API key; falls back to `providers.openai.api_key`
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// API base URL
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Default realtime model
    #[serde(default = "default_openai_realtime_model")]
    pub model: String,
}

fn default_openai_realtime_model() -> String {
    "gpt-4o-realtime-preview".to_string()
}

impl Default for RealtimeOpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_base_url(),
            model: default_openai_realtime_model(),
        }
    }
}

/// Connect-style realtime vendor settings
///
/// There is no public default endpoint; both `api_key` and `base_url` must
/// be set.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectConfig {
    /// API key
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// API base URL
    #[serde(default)]
    pub base_url: Option<String>,

    /// Default realtime model
    #[serde(default = "default_connect_model")]
    pub model: String,
}

fn default_connect_model() -> String {
    "realtime".to_string()
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: default_connect_model(),
        }
    }
}

/// Xirsys TURN credential settings
#[derive(Debug, Clone, Deserialize)]
pub struct IceConfig {
    /// Channel (application path)
    #[serde(default)]
    pub channel: Option<String>,

    /// Account username
    #[serde(default)]
    pub username: Option<String>,

    /// Account secret
    #[serde(default)]
    pub secret: Option<SecretString>,

    /// API base URL
    #[serde(default = "default_ice_base_url")]
    pub base_url: String,
}

fn default_ice_base_url() -> String {
    "https://global.xirsys.net".to_string()
}

impl Default for IceConfig {
    fn default() -> Self {
        Self {
            channel: None,
            username: None,
            secret: None,
            base_url: default_ice_base_url(),
        }
    }
}
