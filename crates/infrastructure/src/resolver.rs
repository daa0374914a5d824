//! Provider resolution
//!
//! Turns the current configuration snapshot into a ready-to-use vendor
//! profile for one capability. Missing credentials are not an error here:
//! they yield [`Resolution::Unconfigured`], which callers turn into a
//! configuration error before any network call is made.

use ai_core::{ProviderId, ProviderProfile};
use ai_realtime::{IceProfile, RealtimeProfile, RealtimeVendor, XIRSYS_VENDOR};
use application::ApplicationError;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::debug;

use crate::config::AppConfig;

/// Capabilities served by an upstream vendor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Tutor chat
    Chat,
    /// Quiz generation
    Quiz,
    /// Realtime voice session negotiation
    Realtime(RealtimeVendor),
    /// ICE credentials
    Ice,
}

/// Outcome of resolving one capability
#[derive(Debug, Clone)]
pub enum Resolution<T> {
    /// Credentials present; the profile is ready to use
    Ready(T),
    /// Credentials absent
    Unconfigured {
        /// Vendor that would have served the capability
        provider: &'static str,
        /// Message surfaced to the client
        reason: String,
    },
}

impl<T> Resolution<T> {
    fn unconfigured(provider: &'static str) -> Self {
        Self::Unconfigured {
            provider,
            reason: format!("{provider} not configured"),
        }
    }

    /// Whether a profile was resolved
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// The profile, or a configuration error
    pub fn require(self) -> Result<T, ApplicationError> {
        match self {
            Self::Ready(profile) => Ok(profile),
            Self::Unconfigured { reason, .. } => Err(ApplicationError::Configuration(reason)),
        }
    }
}

/// Which capabilities currently resolve to a configured vendor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityReport {
    pub chat: bool,
    pub quiz: bool,
    pub realtime_openai: bool,
    pub realtime_connect: bool,
    pub ice: bool,
}

/// Resolves vendor profiles from one configuration snapshot
#[derive(Debug, Clone, Copy)]
pub struct ProviderResolver<'a> {
    config: &'a AppConfig,
}

impl<'a> ProviderResolver<'a> {
    /// Create a resolver over `config`
    pub const fn new(config: &'a AppConfig) -> Self {
        Self { config }
    }

    /// Resolve any capability, discarding the profile
    pub fn is_configured(&self, capability: Capability) -> bool {
        match capability {
            Capability::Chat => self.chat().is_ready(),
            Capability::Quiz => self.quiz().is_ready(),
            Capability::Realtime(vendor) => self.realtime(vendor).is_ready(),
            Capability::Ice => self.ice().is_ready(),
        }
    }

    /// Summarize every capability
    pub fn capabilities(&self) -> CapabilityReport {
        CapabilityReport {
            chat: self.is_configured(Capability::Chat),
            quiz: self.is_configured(Capability::Quiz),
            realtime_openai: self.is_configured(Capability::Realtime(RealtimeVendor::OpenAi)),
            realtime_connect: self.is_configured(Capability::Realtime(RealtimeVendor::Connect)),
            ice: self.is_configured(Capability::Ice),
        }
    }

    /// Profile for tutor chat
    pub fn chat(&self) -> Resolution<ProviderProfile> {
        self.language_model(self.config.providers.chat, Capability::Chat)
    }

    /// Profile for quiz generation
    pub fn quiz(&self) -> Resolution<ProviderProfile> {
        let primary = self
            .config
            .providers
            .quiz
            .unwrap_or(self.config.providers.chat);
        self.language_model(primary, Capability::Quiz)
    }

    /// Primary provider if it has a key, else its fallback, else unconfigured
    fn language_model(
        &self,
        primary: ProviderId,
        capability: Capability,
    ) -> Resolution<ProviderProfile> {
        for candidate in [primary, primary.fallback()] {
            if let Some(profile) = self.language_model_profile(candidate, capability) {
                if candidate != primary {
                    debug!(
                        primary = %primary,
                        fallback = %candidate,
                        ?capability,
                        "Primary provider has no key, using fallback"
                    );
                }
                return Resolution::Ready(profile);
            }
        }
        Resolution::unconfigured(primary.display_name())
    }

    fn language_model_profile(
        &self,
        provider: ProviderId,
        capability: Capability,
    ) -> Option<ProviderProfile> {
        let providers = &self.config.providers;
        let (api_key, base_url, chat_model, quiz_model) = match provider {
            ProviderId::OpenAi => {
                let c = &providers.openai;
                (&c.api_key, &c.base_url, &c.chat_model, &c.quiz_model)
            },
            ProviderId::Gemini => {
                let c = &providers.gemini;
                (&c.api_key, &c.base_url, &c.chat_model, &c.quiz_model)
            },
        };

        let key = present(api_key.as_ref())?;
        let model: &str = match capability {
            Capability::Quiz => quiz_model.as_deref().unwrap_or(chat_model),
            _ => chat_model,
        };

        Some(
            ProviderProfile::new(provider, base_url, key, model)
                .with_temperature(providers.temperature)
                .with_max_tokens(providers.max_tokens),
        )
    }

    /// Profile for one realtime vendor
    pub fn realtime(&self, vendor: RealtimeVendor) -> Resolution<RealtimeProfile> {
        let realtime = &self.config.realtime;
        let profile = match vendor {
            RealtimeVendor::OpenAi => {
                let c = &realtime.openai;
                present(c.api_key.as_ref())
                    .or_else(|| present(self.config.providers.openai.api_key.as_ref()))
                    .map(|key| RealtimeProfile::new(vendor, &c.base_url, key, &c.model))
            },
            RealtimeVendor::Connect => {
                let c = &realtime.connect;
                present(c.api_key.as_ref())
                    .zip(non_blank(c.base_url.as_deref()))
                    .map(|(key, base_url)| RealtimeProfile::new(vendor, base_url, key, &c.model))
            },
        };

        profile.map_or_else(
            || Resolution::unconfigured(vendor.display_name()),
            Resolution::Ready,
        )
    }

    /// Profile for the ICE credential vendor
    pub fn ice(&self) -> Resolution<IceProfile> {
        let ice = &self.config.ice;
        let channel = non_blank(ice.channel.as_deref());
        let username = non_blank(ice.username.as_deref());
        let secret = present(ice.secret.as_ref());

        match (channel, username, secret) {
            (Some(channel), Some(username), Some(secret)) => Resolution::Ready(IceProfile::new(
                &ice.base_url,
                channel,
                username,
                secret,
            )),
            _ => Resolution::Unconfigured {
                provider: XIRSYS_VENDOR,
                reason: format!("{XIRSYS_VENDOR} env not configured"),
            },
        }
    }
}

/// Expose a secret unless it is blank
fn present(secret: Option<&SecretString>) -> Option<&str> {
    secret
        .map(ExposeSecret::expose_secret)
        .filter(|value| !value.trim().is_empty())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}
