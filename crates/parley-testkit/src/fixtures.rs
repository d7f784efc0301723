//! Session test helpers

use parley_core::{ParleyError, Result, ViewId};
use parley_session::{SessionHandle, SessionModel};
use std::time::Duration;

/// Deterministic view id from a single tag byte.
pub fn test_view_id(tag: u8) -> ViewId {
    ViewId::from_bytes([tag; 16])
}

/// Poll the session until `predicate` holds over the model, or time out.
///
/// The probe runs on the session task, so each check observes everything
/// enqueued before it.
pub async fn wait_until<M, F>(session: &SessionHandle<M>, predicate: F) -> Result<()>
where
    M: SessionModel,
    F: Fn(&M) -> bool + Clone + Send + 'static,
{
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        if session.inspect(predicate.clone()).await? {
            return Ok(());
        }
        if tokio::time::Instant::now() >= deadline {
            return Err(ParleyError::internal("wait_until timed out"));
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
