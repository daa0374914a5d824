//! Infrastructure layer - configuration, provider resolution and telemetry
//!
//! Reads layered configuration, turns it into vendor profiles per request
//! and sets up logging and the outbound HTTP client.

pub mod config;
pub mod http;
pub mod resolver;
pub mod telemetry;

pub use config::{AppConfig, ServerConfig};
pub use http::build_http_client;
pub use resolver::{Capability, CapabilityReport, ProviderResolver, Resolution};
pub use telemetry::{LogFormat, init_tracing};
