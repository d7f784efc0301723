//! Relay coordinator
//!
//! Stores side-effect requests as pending and routes each one to the
//! currently elected view. Re-routes every pending request whenever the
//! elected view changes, and resolves each request at most once when a
//! matching response arrives.
//!
//! The coordinator never stores a callable: pending entries are payloads
//! keyed by `RequestId`, and resolution is returned to the caller, which
//! correlates it against its own request table. This keeps the replicated
//! state free of anything that cannot be re-derived deterministically.
//!
//! A request may legitimately be delivered to several views over its
//! lifetime (once per election change while pending); duplicate in-flight
//! execution is expected and handled by honoring only the first response
//! for a given id.

use parley_core::{RelayEnvelope, RelayResponse, RequestId, ViewId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Pending-request table plus the monotonically increasing id counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayCoordinator<P> {
    last_request_id: RequestId,
    pending: BTreeMap<RequestId, P>,
}

impl<P> Default for RelayCoordinator<P> {
    fn default() -> Self {
        Self {
            last_request_id: RequestId::ZERO,
            pending: BTreeMap::new(),
        }
    }
}

impl<P: Clone> RelayCoordinator<P> {
    /// Create a coordinator with no pending requests.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a new request.
    ///
    /// Allocates the next `RequestId` (starting at 1, never reused) and
    /// stores the payload as pending. If `elected` is present the request
    /// is routed immediately; otherwise it is held, unrouted, until an
    /// election change routes it.
    pub fn submit(
        &mut self,
        payload: P,
        elected: Option<ViewId>,
    ) -> (RequestId, Option<RelayEnvelope<P>>) {
        self.last_request_id = self.last_request_id.next();
        let request_id = self.last_request_id;
        self.pending.insert(request_id, payload.clone());

        match elected {
            Some(view) => {
                debug!(request = %request_id, elected = %view, "routing request");
                (request_id, Some(RelayEnvelope::new(view, request_id, payload)))
            }
            None => {
                debug!(request = %request_id, "no elected view, deferring request");
                (request_id, None)
            }
        }
    }

    /// React to an election change.
    ///
    /// Re-emits an envelope for every pending request - routed before or
    /// not - addressed to the new elected view, in `RequestId` order.
    /// With no new leader the requests simply stay queued.
    pub fn on_elected_changed(&self, elected: Option<ViewId>) -> Vec<RelayEnvelope<P>> {
        let Some(view) = elected else {
            return Vec::new();
        };
        self.pending
            .iter()
            .map(|(&request_id, payload)| {
                debug!(request = %request_id, elected = %view, "re-routing request");
                RelayEnvelope::new(view, request_id, payload.clone())
            })
            .collect()
    }

    /// Accept a response from an executor.
    ///
    /// If the request is still pending it is removed and its resolution
    /// returned - exactly once per request. Responses for unknown or
    /// already-resolved ids are discarded silently; they are expected
    /// under re-election races, not errors.
    pub fn on_response(&mut self, response: RelayResponse) -> Option<(RequestId, String)> {
        if self.pending.remove(&response.request_id).is_some() {
            Some((response.request_id, response.text))
        } else {
            debug!(request = %response.request_id, "stale response discarded");
            None
        }
    }

    /// Number of pending requests.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Whether `request_id` is still pending.
    pub fn is_pending(&self, request_id: RequestId) -> bool {
        self.pending.contains_key(&request_id)
    }
}
