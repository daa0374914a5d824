//! LearnGate HTTP presentation layer
//!
//! Thin JSON/SDP endpoints in front of the chat, quiz, realtime and ICE
//! services. Vendor selection happens per request from the current
//! configuration snapshot.

pub mod config_reload;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config_reload::{
    CapabilityWatcher, ReloadableConfig, spawn_capability_watcher, spawn_config_reload_handler,
};
pub use error::ApiError;
pub use middleware::{RequestId, RequestIdLayer, ValidatedJson};
pub use routes::create_router;
pub use server::{ShutdownOutcome, serve_with_shutdown};
pub use state::AppState;
