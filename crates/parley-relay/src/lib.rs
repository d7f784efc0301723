//! Parley Relay - the authoritative side of the elected-relay pattern
//!
//! This crate holds the replicated, deterministic state machines:
//!
//! - [`MembershipRoster`] tracks which views are connected.
//! - [`LeaderElector`] derives exactly one elected view from the roster.
//! - [`RelayCoordinator`] stores pending side-effect requests and routes
//!   each one to the currently elected view, re-routing on every election
//!   change and resolving each request at most once.
//! - [`RelayModel`] composes the three behind a single event interface.
//!
//! Everything here is a pure function of its inputs: no I/O, no clocks, no
//! randomness. All state mutation happens through serialized calls from the
//! session's single writer, so the same event sequence produces the same
//! state on every observer.

#![forbid(unsafe_code)]

pub mod coordinator;
pub mod elector;
pub mod membership;
pub mod model;

pub use coordinator::RelayCoordinator;
pub use elector::LeaderElector;
pub use membership::MembershipRoster;
pub use model::{RelayModel, RelayOutput};
