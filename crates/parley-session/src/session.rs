//! Single-writer session loop, handles, and the output bus
//!
//! One task owns the model. Events arrive on an unbounded mpsc queue and
//! are handled to completion one at a time; the resulting outputs are
//! broadcast in publish order. Because the queue is the only way in, every
//! observer sees the same state transitions in the same order.

use parley_core::{
    ParleyError, RelayResponse, Result, SessionEvent, SessionId, SessionOutput, ViewId,
};
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tracing::{debug, warn};

/// Capacity of the broadcast bus; slow subscribers past this lag are
/// dropped behind and told so via `RecvError::Lagged`.
const BUS_CAPACITY: usize = 1024;

/// An application model driven by the session loop.
///
/// `handle` must be deterministic: no clocks, no randomness, no I/O. The
/// session guarantees it runs atomically per event, in one total order.
pub trait SessionModel: Send + 'static {
    /// Application input/command type
    type Input: Send + 'static;
    /// Relay payload type carried in envelopes
    type Payload: Clone + Send + 'static;
    /// Application view-delta type
    type Delta: Clone + Send + 'static;

    /// Apply one event and return the outputs to publish.
    fn handle(
        &mut self,
        event: SessionEvent<Self::Input>,
    ) -> Vec<SessionOutput<Self::Payload, Self::Delta>>;
}

/// Receiver half of the session's output bus.
pub type Outputs<M> =
    broadcast::Receiver<SessionOutput<<M as SessionModel>::Payload, <M as SessionModel>::Delta>>;

enum Command<M: SessionModel> {
    Event(SessionEvent<M::Input>),
    Inspect(Box<dyn FnOnce(&M) + Send>),
}

/// Entry point for spawning session loops.
pub struct Session;

impl Session {
    /// Spawn `model` on its own task and return a handle to it.
    ///
    /// The task runs until every handle (and thus every event sender) has
    /// been dropped.
    pub fn spawn<M: SessionModel>(model: M) -> SessionHandle<M> {
        let session_id = SessionId::new();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (bus_tx, _) = broadcast::channel(BUS_CAPACITY);
        let (elected_tx, elected_rx) = watch::channel(None);

        tokio::spawn(run_session(session_id, model, events_rx, bus_tx.clone(), elected_tx));
        debug!(session = %session_id, "session spawned");

        SessionHandle {
            session_id,
            events: events_tx,
            bus: bus_tx,
            elected: elected_rx,
        }
    }
}

async fn run_session<M: SessionModel>(
    session_id: SessionId,
    mut model: M,
    mut events: mpsc::UnboundedReceiver<Command<M>>,
    bus: broadcast::Sender<SessionOutput<M::Payload, M::Delta>>,
    elected: watch::Sender<Option<ViewId>>,
) {
    while let Some(command) = events.recv().await {
        match command {
            Command::Event(event) => {
                for output in model.handle(event) {
                    // Mirror election changes into the watch before the
                    // output (and any envelopes that follow it) hit the
                    // bus, so executors that re-check never read behind.
                    if let SessionOutput::ElectedChanged(view) = &output {
                        elected.send_replace(*view);
                    }
                    // A send error just means nobody is listening right now
                    let _ = bus.send(output);
                }
            }
            Command::Inspect(probe) => probe(&model),
        }
    }
    debug!(session = %session_id, "session loop finished");
}

/// Cloneable handle to a running session.
pub struct SessionHandle<M: SessionModel> {
    session_id: SessionId,
    events: mpsc::UnboundedSender<Command<M>>,
    bus: broadcast::Sender<SessionOutput<M::Payload, M::Delta>>,
    elected: watch::Receiver<Option<ViewId>>,
}

impl<M: SessionModel> Clone for SessionHandle<M> {
    fn clone(&self) -> Self {
        Self {
            session_id: self.session_id,
            events: self.events.clone(),
            bus: self.bus.clone(),
            elected: self.elected.clone(),
        }
    }
}

impl<M: SessionModel> SessionHandle<M> {
    /// Identifier of this session instance.
    pub fn id(&self) -> SessionId {
        self.session_id
    }

    /// Enqueue an event for the session loop.
    pub fn publish(&self, event: SessionEvent<M::Input>) -> Result<()> {
        self.events
            .send(Command::Event(event))
            .map_err(|_| ParleyError::session("session loop has shut down"))
    }

    /// Subscribe to the output bus from this point onward.
    pub fn subscribe(&self) -> Outputs<M> {
        self.bus.subscribe()
    }

    /// Watch the currently elected view id.
    pub fn elected(&self) -> watch::Receiver<Option<ViewId>> {
        self.elected.clone()
    }

    /// Run a read-only probe against the model on the session task.
    ///
    /// The probe runs after every previously enqueued event, which also
    /// makes this a convenient barrier in tests.
    pub async fn inspect<R, F>(&self, probe: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&M) -> R + Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.events
            .send(Command::Inspect(Box::new(move |model| {
                let _ = reply_tx.send(probe(model));
            })))
            .map_err(|_| ParleyError::session("session loop has shut down"))?;
        reply_rx
            .await
            .map_err(|_| ParleyError::session("session loop dropped the probe"))
    }

    /// Join the session as a new view.
    ///
    /// The returned handle's output subscription is created before the
    /// join event is published, so the view observes every output caused
    /// by its own join - including an election that routes held requests
    /// to it.
    pub fn join(&self, user_name: impl Into<String>) -> Result<ViewHandle<M>> {
        let view = ViewId::new();
        let user_name = user_name.into();
        let outputs = self.subscribe();
        self.publish(SessionEvent::ViewJoined {
            view,
            user_name: user_name.clone(),
        })?;
        debug!(view = %view, user = %user_name, "view joining");
        Ok(ViewHandle {
            view,
            user_name,
            session: self.clone(),
            outputs,
        })
    }
}

/// Per-client handle: publishes inputs and responses, receives outputs.
pub struct ViewHandle<M: SessionModel> {
    view: ViewId,
    user_name: String,
    session: SessionHandle<M>,
    outputs: Outputs<M>,
}

impl<M: SessionModel> ViewHandle<M> {
    /// This view's id.
    pub fn view_id(&self) -> ViewId {
        self.view
    }

    /// The display name supplied at join time.
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// The session this view belongs to.
    pub fn session(&self) -> &SessionHandle<M> {
        &self.session
    }

    /// Publish an application input.
    pub fn publish_input(&self, input: M::Input) -> Result<()> {
        self.session.publish(SessionEvent::Input(input))
    }

    /// Report an executor response back to the authoritative side.
    pub fn respond(&self, response: RelayResponse) -> Result<()> {
        self.session.publish(SessionEvent::Response(response))
    }

    /// Leave the session. The handle stays usable for receiving, matching
    /// a real client whose executor may still be finishing stale work.
    pub fn leave(&self) -> Result<()> {
        self.session.publish(SessionEvent::ViewExited { view: self.view })
    }

    /// Receive the next output from the bus.
    pub async fn recv(&mut self) -> Result<SessionOutput<M::Payload, M::Delta>> {
        loop {
            match self.outputs.recv().await {
                Ok(output) => return Ok(output),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(view = %self.view, skipped, "view lagged behind the bus");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    return Err(ParleyError::session("session loop has shut down"));
                }
            }
        }
    }

    /// Watch the currently elected view id.
    pub fn elected(&self) -> watch::Receiver<Option<ViewId>> {
        self.session.elected()
    }
}

impl<M: SessionModel> Clone for ViewHandle<M> {
    /// Clones observe outputs from the moment of cloning; the original
    /// keeps the subscription it was created with.
    fn clone(&self) -> Self {
        Self {
            view: self.view,
            user_name: self.user_name.clone(),
            session: self.session.clone(),
            outputs: self.outputs.resubscribe(),
        }
    }
}
