//! ICE service - short-lived TURN credentials for the browser

use std::{fmt, sync::Arc};

use ai_realtime::IceCredentialProvider;
use domain::IceServer;
use tracing::{debug, instrument, warn};

use crate::error::ApplicationError;

/// Service brokering ICE server credentials
pub struct IceService {
    provider: Arc<dyn IceCredentialProvider>,
}

impl fmt::Debug for IceService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IceService")
            .field("vendor", &self.provider.vendor_name())
            .finish()
    }
}

impl IceService {
    /// Create a service backed by `provider`
    pub fn new(provider: Arc<dyn IceCredentialProvider>) -> Self {
        Self { provider }
    }

    /// Fetch a fresh server list; results are never cached
    #[instrument(skip(self), fields(vendor = self.provider.vendor_name()))]
    pub async fn ice_servers(&self) -> Result<Vec<IceServer>, ApplicationError> {
        let servers = self.provider.fetch_ice_servers().await.map_err(|err| {
            warn!(error = %err, "ICE credential request failed");
            ApplicationError::upstream(
                format!("{} request failed", self.provider.vendor_name()),
                err.diagnostics(),
            )
            .with_status(err.status())
        })?;

        debug!(count = servers.len(), "ICE servers issued");
        Ok(servers)
    }
}
