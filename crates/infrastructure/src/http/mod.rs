//! Outbound HTTP client

use reqwest::Client;

/// User agent sent to every vendor
pub const USER_AGENT: &str = concat!("LearnGate/", env!("CARGO_PKG_VERSION"));

/// Build the shared client used for all vendor calls
///
/// Only transport defaults apply: no request deadline, no retries.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder().user_agent(USER_AGENT).build()
}
