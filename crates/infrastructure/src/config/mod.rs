//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `providers`: chat/quiz provider selection and credentials
//! - `realtime`: realtime voice vendors and the ICE credential broker
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `config.toml`, `LEARNGATE__`-prefixed environment variables (`__`
//! separates sections), then the conventional vendor variables such as
//! `OPENAI_API_KEY`.

mod providers;
mod realtime;
mod server;

use std::time::Duration;

use application::DEFAULT_SYSTEM_PROMPT;
use serde::Deserialize;

pub use ::config::ConfigError;
pub use providers::{ChatConfig, GeminiConfig, OpenAiConfig, ProvidersConfig};
pub use realtime::{ConnectConfig, IceConfig, RealtimeConfig, RealtimeOpenAiConfig};
pub use server::ServerConfig;

/// Prefix for structured environment overrides
pub const ENV_PREFIX: &str = "LEARNGATE";

/// Conventional vendor variables and the keys they override
const VENDOR_ENV: &[(&str, &str)] = &[
    ("OPENAI_API_KEY", "providers.openai.api_key"),
    ("OPENAI_MODEL", "providers.openai.chat_model"),
    ("GEMINI_API_KEY", "providers.gemini.api_key"),
    ("GEMINI_MODEL", "providers.gemini.chat_model"),
    ("AI_PROVIDER", "providers.chat"),
    ("QUIZ_PROVIDER", "providers.quiz"),
    ("AI_TEMPERATURE", "providers.temperature"),
    ("AI_MAX_TOKENS", "providers.max_tokens"),
    ("OPENAI_REALTIME_MODEL", "realtime.openai.model"),
    ("CONNECT_REALTIME_API_KEY", "realtime.connect.api_key"),
    ("CONNECT_REALTIME_URL", "realtime.connect.base_url"),
    ("CONNECT_REALTIME_MODEL", "realtime.connect.model"),
    ("XIRSYS_CHANNEL", "ice.channel"),
    ("XIRSYS_USERNAME", "ice.username"),
    ("XIRSYS_SECRET", "ice.secret"),
];

/// Variables naming a provider; matched case-insensitively
const PROVIDER_SELECTORS: &[&str] = &["AI_PROVIDER", "QUIZ_PROVIDER"];

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Tutor chat configuration
    #[serde(default)]
    pub chat: ChatConfig,

    /// Chat and quiz providers
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Realtime voice vendors
    #[serde(default)]
    pub realtime: RealtimeConfig,

    /// ICE credential broker
    #[serde(default)]
    pub ice: IceConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(
            config::File::with_name("config").required(false),
            |name| std::env::var(name).ok(),
        )
    }

    /// Load configuration from `file`, resolving vendor variables via `lookup`
    pub fn load_from<S>(
        file: S,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let mut builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .add_source(file)
            // e.g. LEARNGATE__SERVER__PORT=8080
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true),
            );

        for (name, key) in VENDOR_ENV {
            let value = lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .map(|value| {
                    if PROVIDER_SELECTORS.contains(name) {
                        value.to_lowercase()
                    } else {
                        value
                    }
                });
            builder = builder.set_override_option(*key, value)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Persona instruction for tutor chat
    pub fn system_prompt(&self) -> &str {
        self.chat
            .system_prompt
            .as_deref()
            .filter(|prompt| !prompt.trim().is_empty())
            .unwrap_or(DEFAULT_SYSTEM_PROMPT)
    }

    /// Graceful shutdown timeout
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.server.shutdown_timeout_secs.unwrap_or(30))
    }
}
