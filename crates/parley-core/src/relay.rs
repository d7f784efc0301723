//! Relay envelope and response wire types
//!
//! An envelope pairs a pending request with the view elected to execute it.
//! Envelopes are transient: they are re-derived from the pending table on
//! every routing event and never stored. A response answers exactly one
//! envelope's request id; later responses for the same id are stale.

use crate::identifiers::{RequestId, ViewId};
use serde::{Deserialize, Serialize};

/// A routed side-effect request, addressed to the currently elected view.
///
/// Delivery may be broadcast-and-filter or point-to-point; either way the
/// executor must ignore envelopes whose `elected` is not its own view id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayEnvelope<P> {
    /// The view elected to execute this request
    pub elected: ViewId,
    /// Identifier of the pending request being routed
    pub request_id: RequestId,
    /// Opaque application payload
    pub payload: P,
}

impl<P> RelayEnvelope<P> {
    /// Create an envelope routing `request_id` to `elected`.
    pub fn new(elected: ViewId, request_id: RequestId, payload: P) -> Self {
        Self {
            elected,
            request_id,
            payload,
        }
    }
}

/// The executor's answer to a routed request.
///
/// Consumed at most once by the coordinator; a response whose request id is
/// no longer pending has no effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayResponse {
    /// The request this response answers
    pub request_id: RequestId,
    /// Result text, or a fallback string if the side effect failed
    pub text: String,
}

impl RelayResponse {
    /// Create a response for `request_id`.
    pub fn new(request_id: RequestId, text: impl Into<String>) -> Self {
        Self {
            request_id,
            text: text.into(),
        }
    }
}
