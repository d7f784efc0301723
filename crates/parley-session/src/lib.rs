//! Parley Session - the single-writer harness for authoritative models
//!
//! The replicated-execution collaborator the relay core assumes is, in this
//! workspace, an in-process actor: one dedicated task owns the application
//! model and processes every event atomically, in one total order. Outputs
//! are fanned out to all views on a broadcast bus in publish order, and the
//! elected view id is mirrored into a watch channel so executors can check
//! it without a round trip through the queue.
//!
//! This is a stand-in for a real replication layer, not a consensus
//! implementation: determinism comes from the single writer, not from any
//! agreement protocol.

#![forbid(unsafe_code)]

pub mod session;

pub use session::{Outputs, Session, SessionHandle, SessionModel, ViewHandle};
