//! Side-effect trait for relayed requests
//!
//! The executor is parameterized over this trait; production code plugs in
//! an HTTP handler, tests plug in scripted or gated handlers.

use async_trait::async_trait;
use parley_core::Result;

/// Performs the application-defined side effect for a routed request.
///
/// `perform` is the only suspension point in the whole system and may take
/// arbitrarily long. It is allowed to fail; the executor then substitutes
/// [`fallback`](AssistEffects::fallback) so the request always terminates.
#[async_trait]
pub trait AssistEffects<P>: Send + Sync {
    /// Execute the side effect for `payload` and produce the result text.
    async fn perform(&self, payload: &P) -> Result<String>;

    /// Terminal result reported when `perform` fails.
    fn fallback(&self) -> String {
        "Sorry, I couldn't process that request.".to_string()
    }
}
