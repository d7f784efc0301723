//! Leader elector
//!
//! Derives exactly one elected view from the membership roster and
//! re-derives it on every membership change. Two logical states: no leader
//! (empty roster) and leader (non-empty roster).
//!
//! Stability rule: a sitting leader is never displaced by a join or by an
//! unrelated leave. When the leader does leave, the replacement is the
//! smallest remaining `ViewId` - a deterministic comparator rather than
//! insertion order, so every observer picks the same view.

use crate::membership::MembershipRoster;
use parley_core::ViewId;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Membership roster plus the derived elected view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderElector {
    roster: MembershipRoster,
    elected: Option<ViewId>,
}

impl LeaderElector {
    /// Create an elector with an empty roster and no leader.
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently elected view, if any.
    pub fn elected(&self) -> Option<ViewId> {
        self.elected
    }

    /// The underlying membership roster.
    pub fn roster(&self) -> &MembershipRoster {
        &self.roster
    }

    /// Apply a join, then re-derive the elected view.
    ///
    /// Returns `Some(new_elected)` only when the elected view changed
    /// (the very first join elects the joiner); `None` otherwise.
    pub fn on_join(&mut self, view: ViewId) -> Option<Option<ViewId>> {
        self.roster.join(view);
        self.reelect()
    }

    /// Apply a leave, then re-derive the elected view.
    ///
    /// Returns `Some(new_elected)` only when the elected view changed;
    /// `new_elected` is `None` when the last member left.
    pub fn on_leave(&mut self, view: ViewId) -> Option<Option<ViewId>> {
        self.roster.leave(view);
        self.reelect()
    }

    /// Re-derive the elected view from the roster.
    ///
    /// Invariants maintained:
    /// - elected is a member whenever the roster is non-empty
    /// - elected is `None` exactly when the roster is empty
    /// - a still-present leader keeps its seat
    fn reelect(&mut self) -> Option<Option<ViewId>> {
        let still_member = self.elected.is_some_and(|view| self.roster.contains(view));
        if still_member {
            return None;
        }

        let new_elected = self.roster.first();
        if new_elected == self.elected {
            // Roster emptied while already leaderless
            return None;
        }

        self.elected = new_elected;
        match new_elected {
            Some(view) => debug!(elected = %view, members = self.roster.len(), "view elected"),
            None => debug!("session empty, no elected view"),
        }
        Some(new_elected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(tag: u8) -> ViewId {
        ViewId::from_bytes([tag; 16])
    }

    #[test]
    fn test_first_join_elects() {
        let mut elector = LeaderElector::new();
        assert_eq!(elector.on_join(view(4)), Some(Some(view(4))));
        assert_eq!(elector.elected(), Some(view(4)));
    }

    #[test]
    fn test_later_join_never_displaces_leader() {
        let mut elector = LeaderElector::new();
        elector.on_join(view(4));
        // Smaller id joins; the sitting leader keeps its seat
        assert_eq!(elector.on_join(view(1)), None);
        assert_eq!(elector.elected(), Some(view(4)));
    }

    #[test]
    fn test_unrelated_leave_keeps_leader() {
        let mut elector = LeaderElector::new();
        elector.on_join(view(4));
        elector.on_join(view(7));
        assert_eq!(elector.on_leave(view(7)), None);
        assert_eq!(elector.elected(), Some(view(4)));
    }

    #[test]
    fn test_leader_leave_elects_smallest_remaining() {
        let mut elector = LeaderElector::new();
        elector.on_join(view(4));
        elector.on_join(view(9));
        elector.on_join(view(2));
        assert_eq!(elector.on_leave(view(4)), Some(Some(view(2))));
    }

    #[test]
    fn test_last_leave_clears_leader() {
        let mut elector = LeaderElector::new();
        elector.on_join(view(4));
        assert_eq!(elector.on_leave(view(4)), Some(None));
        assert_eq!(elector.elected(), None);
    }

    #[test]
    fn test_duplicate_join_is_silent() {
        let mut elector = LeaderElector::new();
        elector.on_join(view(4));
        assert_eq!(elector.on_join(view(4)), None);
    }

    #[test]
    fn test_leave_of_absent_view_is_silent() {
        let mut elector = LeaderElector::new();
        elector.on_join(view(4));
        assert_eq!(elector.on_leave(view(8)), None);
    }
}
