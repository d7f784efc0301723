//! Membership roster
//!
//! The sole source of truth for which views are currently connected.
//! Backed by a `BTreeSet` so iteration order is the natural `ViewId` order,
//! identical on every observer; the elector's tie-break depends on this.

use parley_core::ViewId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set of currently connected views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipRoster {
    views: BTreeSet<ViewId>,
}

impl MembershipRoster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a view joining. Returns whether the roster changed
    /// (idempotent: re-joining an existing member is a no-op).
    pub fn join(&mut self, view: ViewId) -> bool {
        self.views.insert(view)
    }

    /// Record a view leaving. Returns whether the roster changed
    /// (a leave for an absent view is a no-op).
    pub fn leave(&mut self, view: ViewId) -> bool {
        self.views.remove(&view)
    }

    /// Whether `view` is currently a member.
    pub fn contains(&self, view: ViewId) -> bool {
        self.views.contains(&view)
    }

    /// The smallest member id, if any.
    pub fn first(&self) -> Option<ViewId> {
        self.views.iter().next().copied()
    }

    /// Number of connected views.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Whether no views are connected.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Iterate members in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = ViewId> + '_ {
        self.views.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(tag: u8) -> ViewId {
        ViewId::from_bytes([tag; 16])
    }

    #[test]
    fn test_join_is_idempotent() {
        let mut roster = MembershipRoster::new();
        assert!(roster.join(view(1)));
        assert!(!roster.join(view(1)));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_leave_absent_is_noop() {
        let mut roster = MembershipRoster::new();
        assert!(!roster.leave(view(1)));
        roster.join(view(1));
        assert!(roster.leave(view(1)));
        assert!(roster.is_empty());
    }

    #[test]
    fn test_first_is_smallest_id() {
        let mut roster = MembershipRoster::new();
        roster.join(view(9));
        roster.join(view(3));
        roster.join(view(5));
        assert_eq!(roster.first(), Some(view(3)));
    }
}
