//! Relay executor and its session-driven loop
//!
//! `RelayExecutor` is the per-envelope logic: filter by target, perform,
//! re-check the election, report. `spawn_executor` wires it to a view's
//! output subscription, spawning one task per envelope so a slow or hung
//! side effect never blocks later attempts.

use crate::effects::AssistEffects;
use parley_core::{RelayEnvelope, RelayResponse, SessionOutput, ViewId};
use parley_session::{SessionModel, ViewHandle};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Executes routed side effects when the local view is elected.
pub struct RelayExecutor<E> {
    view: ViewId,
    effects: Arc<E>,
    elected: watch::Receiver<Option<ViewId>>,
}

impl<E> Clone for RelayExecutor<E> {
    fn clone(&self) -> Self {
        Self {
            view: self.view,
            effects: Arc::clone(&self.effects),
            elected: self.elected.clone(),
        }
    }
}

impl<E> RelayExecutor<E> {
    /// Create an executor for `view`, reading the elected id from `elected`.
    pub fn new(view: ViewId, effects: Arc<E>, elected: watch::Receiver<Option<ViewId>>) -> Self {
        Self {
            view,
            effects,
            elected,
        }
    }

    /// The view this executor runs on behalf of.
    pub fn view_id(&self) -> ViewId {
        self.view
    }

    /// Handle one routed envelope.
    ///
    /// Returns `None` when the envelope is addressed to another view, or
    /// when this view lost the election while the side effect was in
    /// flight - the coordinator has re-routed (or will re-route) the
    /// request to the new leader, so the stale result is dropped here.
    ///
    /// A failing side effect still yields a response carrying the
    /// handler's fallback text; the request must always terminate.
    pub async fn handle_envelope<P>(&self, envelope: RelayEnvelope<P>) -> Option<RelayResponse>
    where
        E: AssistEffects<P>,
        P: Send + Sync,
    {
        if envelope.elected != self.view {
            // Broadcast-and-filter delivery: not ours
            return None;
        }
        debug!(view = %self.view, request = %envelope.request_id, "executing relayed request");

        let text = match self.effects.perform(&envelope.payload).await {
            Ok(text) => text,
            Err(err) => {
                warn!(view = %self.view, request = %envelope.request_id, error = %err,
                    "side effect failed, reporting fallback");
                self.effects.fallback()
            }
        };

        if *self.elected.borrow() != Some(self.view) {
            debug!(view = %self.view, request = %envelope.request_id,
                "no longer elected, discarding result");
            return None;
        }

        Some(RelayResponse::new(envelope.request_id, text))
    }
}

/// Drive an executor from a view's output subscription.
///
/// Consumes the view handle so the executor keeps the subscription the
/// view was created with and misses nothing routed since its join. Each
/// envelope is handled on its own task; responses are published back
/// through the session. The loop ends when the session shuts down.
pub fn spawn_executor<M, E>(mut view: ViewHandle<M>, effects: Arc<E>) -> JoinHandle<()>
where
    M: SessionModel,
    M::Payload: Send + Sync + 'static,
    E: AssistEffects<M::Payload> + 'static,
{
    let executor = RelayExecutor::new(view.view_id(), effects, view.elected());
    tokio::spawn(async move {
        loop {
            match view.recv().await {
                Ok(SessionOutput::Envelope(envelope)) => {
                    let executor = executor.clone();
                    let session = view.session().clone();
                    tokio::spawn(async move {
                        if let Some(response) = executor.handle_envelope(envelope).await {
                            if session
                                .publish(parley_core::SessionEvent::Response(response))
                                .is_err()
                            {
                                warn!(view = %executor.view_id(), "session closed before response");
                            }
                        }
                    });
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parley_core::{ParleyError, RequestId, Result};
    use tokio::sync::Notify;

    struct FixedAssist(&'static str);

    #[async_trait]
    impl AssistEffects<String> for FixedAssist {
        async fn perform(&self, _payload: &String) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingAssist;

    #[async_trait]
    impl AssistEffects<String> for FailingAssist {
        async fn perform(&self, _payload: &String) -> Result<String> {
            Err(ParleyError::network("connection refused"))
        }
    }

    /// Blocks in `perform` until released, to stage mid-flight races.
    struct GatedAssist {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl AssistEffects<String> for GatedAssist {
        async fn perform(&self, _payload: &String) -> Result<String> {
            self.gate.notified().await;
            Ok("late answer".to_string())
        }
    }

    fn view(tag: u8) -> ViewId {
        ViewId::from_bytes([tag; 16])
    }

    fn envelope(to: ViewId, id: u64) -> RelayEnvelope<String> {
        RelayEnvelope::new(to, RequestId::new(id), "payload".to_string())
    }

    #[tokio::test]
    async fn ignores_envelopes_addressed_elsewhere() {
        let (_tx, rx) = watch::channel(Some(view(1)));
        let executor = RelayExecutor::new(view(1), Arc::new(FixedAssist("hi")), rx);
        assert!(executor.handle_envelope(envelope(view(2), 1)).await.is_none());
    }

    #[tokio::test]
    async fn reports_result_while_still_elected() {
        let (_tx, rx) = watch::channel(Some(view(1)));
        let executor = RelayExecutor::new(view(1), Arc::new(FixedAssist("hi")), rx);
        let response = executor
            .handle_envelope(envelope(view(1), 3))
            .await
            .expect("response");
        assert_eq!(response.request_id, RequestId::new(3));
        assert_eq!(response.text, "hi");
    }

    #[tokio::test]
    async fn failed_side_effect_reports_fallback() {
        let (_tx, rx) = watch::channel(Some(view(1)));
        let executor = RelayExecutor::new(view(1), Arc::new(FailingAssist), rx);
        let response = executor
            .handle_envelope(envelope(view(1), 1))
            .await
            .expect("fallback response");
        assert_eq!(response.text, "Sorry, I couldn't process that request.");
    }

    #[tokio::test]
    async fn discards_result_after_losing_election() {
        let gate = Arc::new(Notify::new());
        let (tx, rx) = watch::channel(Some(view(1)));
        let executor = RelayExecutor::new(view(1), Arc::new(GatedAssist { gate: gate.clone() }), rx);

        let task = tokio::spawn({
            let executor = executor.clone();
            async move { executor.handle_envelope(envelope(view(1), 1)).await }
        });

        // Leadership moves while the side effect is in flight
        tx.send_replace(Some(view(2)));
        gate.notify_one();

        assert!(task.await.expect("join").is_none());
    }
}
