//! Parley Executor - runs side effects on the elected view
//!
//! Each client runs one executor. It watches the output bus for envelopes,
//! ignores those addressed elsewhere, performs the application side effect
//! through an [`AssistEffects`] handler, and reports the result back -
//! unless the election moved while the effect was in flight, in which case
//! the result is discarded and the new leader's attempt wins.
//!
//! A failed side effect still produces a response (the handler's fallback
//! text): the coordinator has no timeout of its own, so silence would
//! starve the request forever.

#![forbid(unsafe_code)]

pub mod effects;
pub mod executor;

pub use effects::AssistEffects;
pub use executor::{spawn_executor, RelayExecutor};
