//! Session event and output enums
//!
//! `SessionEvent` is everything the authoritative model consumes; it arrives
//! on the session's single command queue and is processed atomically in one
//! total order. `SessionOutput` is everything the model publishes back to
//! views, delivered on the bus in publish order.

use crate::identifiers::ViewId;
use crate::relay::{RelayEnvelope, RelayResponse};

/// Inbound events consumed by the authoritative side.
///
/// `I` is the application's input/command type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent<I> {
    /// A view joined the session
    ViewJoined {
        /// The joining view
        view: ViewId,
        /// Display name supplied by the client at join time
        user_name: String,
    },
    /// A view left the session
    ViewExited {
        /// The departing view
        view: ViewId,
    },
    /// An application-level input published by some view
    Input(I),
    /// An executor reporting the result of a routed request
    Response(RelayResponse),
}

/// Outputs published by the authoritative side.
///
/// `P` is the relay payload type, `D` the application's view-delta type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutput<P, D> {
    /// The elected view changed (`None` when the session emptied out)
    ElectedChanged(Option<ViewId>),
    /// A pending request routed (or re-routed) to the elected view
    Envelope(RelayEnvelope<P>),
    /// Application-level view update
    Delta(D),
}
