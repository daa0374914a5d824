//! Domain layer for LearnGate
//!
//! Transient request/response records shared by the gateway: chat turns,
//! quiz sets, SDP blobs and ICE server descriptors. Nothing here is persisted.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
