//! Xirsys TURN credential broker
//!
//! `PUT /_turn/{channel}` with basic auth returns short-lived TURN
//! credentials. Depending on account settings and API version the server
//! list arrives nested (`{"v": {"iceServers": ...}, "s": "ok"}`) or flat
//! (`{"iceServers": ...}`), as a list or a single object, with `urls` as a
//! string or a list. All shapes normalize to `Vec<IceServer>`.

use async_trait::async_trait;
use domain::IceServer;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::{Value, json};
use tracing::{debug, instrument, warn};

use crate::config::IceProfile;
use crate::error::RealtimeError;
use crate::ports::IceCredentialProvider;

/// Vendor name used in error messages
pub const XIRSYS_VENDOR: &str = "Xirsys";

/// ICE credential provider backed by the Xirsys `_turn` API
#[derive(Debug, Clone)]
pub struct XirsysIceProvider {
    client: Client,
    profile: IceProfile,
}

impl XirsysIceProvider {
    /// Create a provider for a resolved profile
    pub const fn new(client: Client, profile: IceProfile) -> Self {
        Self { client, profile }
    }

    fn turn_url(&self) -> String {
        format!(
            "{}/_turn/{}",
            self.profile.endpoint,
            self.profile.channel.trim_matches('/')
        )
    }
}

#[async_trait]
impl IceCredentialProvider for XirsysIceProvider {
    #[instrument(skip(self), fields(channel = %self.profile.channel))]
    async fn fetch_ice_servers(&self) -> Result<Vec<IceServer>, RealtimeError> {
        debug!("Requesting TURN credentials");

        let response = self
            .client
            .put(self.turn_url())
            .basic_auth(
                &self.profile.username,
                Some(self.profile.secret.expose_secret()),
            )
            .json(&json!({ "format": "urls" }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = %status, "TURN credential request failed");
            return Err(RealtimeError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = serde_json::from_str(&body)
            .map_err(|_| RealtimeError::InvalidResponse(body.clone()))?;

        let servers =
            parse_ice_servers(&payload).ok_or(RealtimeError::InvalidResponse(body))?;

        debug!(count = servers.len(), "TURN credentials received");
        Ok(servers)
    }

    fn vendor_name(&self) -> &'static str {
        XIRSYS_VENDOR
    }
}

/// Normalize either vendor envelope into a server list
///
/// Returns `None` for an explicit error envelope (`"s": "error"`) or when no
/// usable server is present.
pub fn parse_ice_servers(payload: &Value) -> Option<Vec<IceServer>> {
    if payload.get("s").and_then(Value::as_str) == Some("error") {
        return None;
    }

    let list = payload
        .get("v")
        .and_then(|v| v.get("iceServers"))
        .or_else(|| payload.get("iceServers"))?;

    let servers: Vec<IceServer> = match list {
        Value::Array(entries) => entries.iter().filter_map(parse_server).collect(),
        entry @ Value::Object(_) => parse_server(entry).into_iter().collect(),
        _ => return None,
    };

    (!servers.is_empty()).then_some(servers)
}

fn parse_server(entry: &Value) -> Option<IceServer> {
    let urls: Vec<String> = match entry.get("urls").or_else(|| entry.get("url"))? {
        Value::String(url) => vec![url.clone()],
        Value::Array(urls) => urls
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect(),
        _ => return None,
    };

    if urls.is_empty() {
        return None;
    }

    Some(IceServer {
        urls,
        username: entry
            .get("username")
            .and_then(Value::as_str)
            .map(str::to_owned),
        credential: entry
            .get("credential")
            .and_then(Value::as_str)
            .map(str::to_owned),
    })
}
