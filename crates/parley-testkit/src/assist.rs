//! Scripted assist handlers
//!
//! Deterministic [`AssistEffects`] implementations for tests. All of them
//! ignore the payload, so they work with any payload type.

use async_trait::async_trait;
use parley_core::{ParleyError, Result};
use parley_executor::AssistEffects;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Replays a fixed list of responses in order.
///
/// Errors once the script runs out, which surfaces accidental extra
/// requests as fallback text in the transcript.
pub struct ScriptedAssist {
    responses: Mutex<VecDeque<String>>,
}

impl ScriptedAssist {
    /// Create a handler that answers with `responses`, in order.
    pub fn new<S: Into<String>>(responses: impl IntoIterator<Item = S>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
        })
    }

    /// Number of unconsumed scripted responses.
    pub fn remaining(&self) -> usize {
        self.responses.lock().map(|queue| queue.len()).unwrap_or(0)
    }
}

#[async_trait]
impl<P: Send + Sync> AssistEffects<P> for ScriptedAssist {
    async fn perform(&self, _payload: &P) -> Result<String> {
        let next = self
            .responses
            .lock()
            .map_err(|_| ParleyError::internal("script mutex poisoned"))?
            .pop_front();
        next.ok_or_else(|| ParleyError::internal("assist script exhausted"))
    }
}

/// Always fails, for exercising the fallback path.
pub struct FailingAssist;

impl FailingAssist {
    /// Create a failing handler.
    pub fn new() -> Arc<Self> {
        Arc::new(Self)
    }
}

#[async_trait]
impl<P: Send + Sync> AssistEffects<P> for FailingAssist {
    async fn perform(&self, _payload: &P) -> Result<String> {
        Err(ParleyError::network("scripted failure"))
    }
}

/// Holds every request until released, for staging mid-flight races.
pub struct GatedAssist {
    gate: Notify,
    text: String,
}

impl GatedAssist {
    /// Create a gated handler that eventually answers with `text`.
    pub fn new(text: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            gate: Notify::new(),
            text: text.into(),
        })
    }

    /// Release one held request.
    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl<P: Send + Sync> AssistEffects<P> for GatedAssist {
    async fn perform(&self, _payload: &P) -> Result<String> {
        self.gate.notified().await;
        Ok(self.text.clone())
    }
}
