//! Core identifier types used across the Parley stack
//!
//! Identifiers are small newtypes over `Uuid` (or `u64` for request
//! counters) so the compiler keeps views, sessions, and requests apart.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier for a connected view (one per client).
///
/// Assigned when a view joins a session and invalidated when it leaves.
/// The relay core only observes these ids; it never mints them itself.
///
/// `ViewId` derives `Ord`: the leader elector's replacement tie-break is
/// the natural byte order of the underlying UUID, which is identical on
/// every observer. Insertion order is deliberately not used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ViewId(pub Uuid);

impl ViewId {
    /// Create a new random view ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Create from raw bytes (deterministic, mainly for tests)
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Get the inner UUID
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ViewId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view-{}", self.0)
    }
}

impl From<Uuid> for ViewId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Identifier for a relayed side-effect request.
///
/// Monotonically increasing within a session, starting at 1, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl RequestId {
    /// The zero id; `next()` of this is the first id handed out.
    pub const ZERO: Self = Self(0);

    /// Create from a raw counter value
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the inner counter value
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Get the next id in sequence
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "request-{}", self.0)
    }
}

/// Identifier for a session instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_id_ordering_is_byte_order() {
        let low = ViewId::from_bytes([1u8; 16]);
        let high = ViewId::from_bytes([2u8; 16]);
        assert!(low < high);
    }

    #[test]
    fn test_request_id_sequence() {
        let first = RequestId::ZERO.next();
        assert_eq!(first.value(), 1);
        assert_eq!(first.next().value(), 2);
    }

    #[test]
    fn test_display_prefixes() {
        let view = ViewId::from_bytes([0u8; 16]);
        assert!(view.to_string().starts_with("view-"));
        assert_eq!(RequestId::new(7).to_string(), "request-7");
    }
}
