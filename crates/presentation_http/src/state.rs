//! Application state shared across handlers

use ai_core::build_chat_provider;
use ai_realtime::{RealtimeVendor, XirsysIceProvider, build_realtime_provider};
use application::{ApplicationError, ChatService, IceService, QuizService, RealtimeService};
use infrastructure::ProviderResolver;
use std::sync::Arc;

use crate::config_reload::ReloadableConfig;

/// Shared application state
///
/// Services are not held here: each request resolves its vendor against
/// the current configuration snapshot and builds the service it needs.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Hot-reloadable configuration
    pub config: ReloadableConfig,
    /// Outbound client shared by every vendor adapter
    pub http_client: reqwest::Client,
}

impl AppState {
    /// Create state from a configuration handle and HTTP client
    pub fn new(config: ReloadableConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Chat service for the configured chat provider
    pub fn chat_service(&self) -> Result<ChatService, ApplicationError> {
        let config = self.config.load();
        let profile = ProviderResolver::new(&config).chat().require()?;
        let provider = build_chat_provider(self.http_client.clone(), profile);
        Ok(ChatService::with_system_prompt(
            provider,
            config.system_prompt(),
        ))
    }

    /// Quiz service for the configured quiz provider
    pub fn quiz_service(&self) -> Result<QuizService, ApplicationError> {
        let config = self.config.load();
        let profile = ProviderResolver::new(&config).quiz().require()?;
        Ok(QuizService::new(build_chat_provider(
            self.http_client.clone(),
            profile,
        )))
    }

    /// Realtime service for one vendor
    pub fn realtime_service(
        &self,
        vendor: RealtimeVendor,
    ) -> Result<RealtimeService, ApplicationError> {
        let config = self.config.load();
        let profile = ProviderResolver::new(&config).realtime(vendor).require()?;
        Ok(RealtimeService::new(build_realtime_provider(
            self.http_client.clone(),
            profile,
        )))
    }

    /// ICE credential service
    pub fn ice_service(&self) -> Result<IceService, ApplicationError> {
        let config = self.config.load();
        let profile = ProviderResolver::new(&config).ice().require()?;
        Ok(IceService::new(Arc::new(XirsysIceProvider::new(
            self.http_client.clone(),
            profile,
        ))))
    }
}
