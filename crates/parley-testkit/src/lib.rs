//! Parley Testing Infrastructure
//!
//! Shared fixtures for exercising sessions, executors, and the chat model
//! without a network: scripted and gated assist handlers plus small async
//! helpers for waiting on authoritative state.
//!
//! Add to a crate's `Cargo.toml` dev-dependencies:
//! ```toml
//! [dev-dependencies]
//! parley-testkit = { path = "../parley-testkit" }
//! ```

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

pub mod assist;
pub mod fixtures;

pub use assist::{FailingAssist, GatedAssist, ScriptedAssist};
pub use fixtures::{test_view_id, wait_until};
