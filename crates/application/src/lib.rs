//! Application layer - Use cases and orchestration
//!
//! Each service receives an already-resolved vendor adapter, runs one use
//! case against it and maps vendor errors onto [`ApplicationError`].
//! Choosing the adapter is the caller's job (see `infrastructure::resolver`).

pub mod error;
pub mod services;

pub use error::ApplicationError;
pub use services::*;
