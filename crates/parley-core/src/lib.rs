//! Parley Core - shared foundation for the elected-relay chat stack
//!
//! This crate provides the types every other Parley crate speaks in:
//! identifiers for views and requests, the unified error type, the relay
//! envelope/response pair, and the session event/output enums that bridge
//! the authoritative model and the per-client views.
//!
//! It contains no I/O and no runtime dependency; all side effects live in
//! the session, executor, and chat crates.

#![forbid(unsafe_code)]

/// View, request, and session identifiers
pub mod identifiers;

/// Unified error handling
pub mod errors;

/// Relay envelope and response wire types
pub mod relay;

/// Session event and output enums
pub mod events;

pub use errors::{ParleyError, Result};
pub use events::{SessionEvent, SessionOutput};
pub use identifiers::{RequestId, SessionId, ViewId};
pub use relay::{RelayEnvelope, RelayResponse};
