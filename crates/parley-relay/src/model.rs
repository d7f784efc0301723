//! Composed relay model
//!
//! Glues the leader elector and the relay coordinator behind one event
//! interface, the shape the session drives directly. On a membership
//! change that moves the leadership, the election notice is emitted first
//! and the re-routed envelopes follow, so observers always learn about the
//! new leader before seeing traffic addressed to it.

use crate::{coordinator::RelayCoordinator, elector::LeaderElector};
use parley_core::{RelayEnvelope, RelayResponse, RequestId, ViewId};
use serde::{Deserialize, Serialize};

/// Output of a relay model step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutput<P> {
    /// The elected view changed (`None` when the session emptied out)
    ElectedChanged(Option<ViewId>),
    /// A pending request routed to the elected view
    Envelope(RelayEnvelope<P>),
}

/// Leader elector plus relay coordinator, driven by session events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayModel<P> {
    elector: LeaderElector,
    coordinator: RelayCoordinator<P>,
}

impl<P> Default for RelayModel<P> {
    fn default() -> Self {
        Self {
            elector: LeaderElector::default(),
            coordinator: RelayCoordinator::default(),
        }
    }
}

impl<P: Clone> RelayModel<P> {
    /// Create an empty relay model.
    pub fn new() -> Self {
        Self {
            elector: LeaderElector::new(),
            coordinator: RelayCoordinator::new(),
        }
    }

    /// The currently elected view, if any.
    pub fn elected(&self) -> Option<ViewId> {
        self.elector.elected()
    }

    /// The elector (roster access for callers that track users).
    pub fn elector(&self) -> &LeaderElector {
        &self.elector
    }

    /// Number of requests awaiting a response.
    pub fn pending_len(&self) -> usize {
        self.coordinator.pending_len()
    }

    /// Handle a view joining the session.
    pub fn handle_view_joined(&mut self, view: ViewId) -> Vec<RelayOutput<P>> {
        let change = self.elector.on_join(view);
        self.election_outputs(change)
    }

    /// Handle a view leaving the session.
    pub fn handle_view_exited(&mut self, view: ViewId) -> Vec<RelayOutput<P>> {
        let change = self.elector.on_leave(view);
        self.election_outputs(change)
    }

    /// Submit a new side-effect request.
    ///
    /// Routes immediately when a leader exists, otherwise holds the request
    /// until the next election.
    pub fn submit(&mut self, payload: P) -> (RequestId, Vec<RelayOutput<P>>) {
        let (request_id, envelope) = self.coordinator.submit(payload, self.elector.elected());
        let outputs = envelope.map(RelayOutput::Envelope).into_iter().collect();
        (request_id, outputs)
    }

    /// Handle an executor response; resolves the request at most once.
    pub fn handle_response(&mut self, response: RelayResponse) -> Option<(RequestId, String)> {
        self.coordinator.on_response(response)
    }

    fn election_outputs(&mut self, change: Option<Option<ViewId>>) -> Vec<RelayOutput<P>> {
        let Some(new_elected) = change else {
            return Vec::new();
        };
        let mut outputs = vec![RelayOutput::ElectedChanged(new_elected)];
        outputs.extend(
            self.coordinator
                .on_elected_changed(new_elected)
                .into_iter()
                .map(RelayOutput::Envelope),
        );
        outputs
    }
}
