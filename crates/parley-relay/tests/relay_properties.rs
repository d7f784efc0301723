//! Property tests for the relay model.
//!
//! Drives the composed model with arbitrary join/leave/submit/response
//! sequences and checks the invariants that hold for every interleaving.

use parley_core::{RelayResponse, ViewId};
use parley_relay::{RelayModel, RelayOutput};
use proptest::prelude::*;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
enum Op {
    Join(u8),
    Leave(u8),
    Submit,
    Respond(u64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..8).prop_map(Op::Join),
        (0u8..8).prop_map(Op::Leave),
        Just(Op::Submit),
        (0u64..32).prop_map(Op::Respond),
    ]
}

fn view(tag: u8) -> ViewId {
    ViewId::from_bytes([tag.wrapping_add(1); 16])
}

proptest! {
    /// Elected is a member whenever the roster is non-empty, and unset
    /// exactly when it is empty.
    #[test]
    fn elected_is_always_a_member(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut model: RelayModel<u64> = RelayModel::new();
        let mut counter = 0u64;

        for op in ops {
            match op {
                Op::Join(tag) => { model.handle_view_joined(view(tag)); }
                Op::Leave(tag) => { model.handle_view_exited(view(tag)); }
                Op::Submit => { counter += 1; model.submit(counter); }
                Op::Respond(raw) => {
                    model.handle_response(RelayResponse::new(
                        parley_core::RequestId::new(raw),
                        "answer",
                    ));
                }
            }

            let roster = model.elector().roster();
            match model.elected() {
                Some(elected) => prop_assert!(roster.contains(elected)),
                None => prop_assert!(roster.is_empty()),
            }
        }
    }

    /// Each request resolves at most once, no matter how responses repeat
    /// or interleave with re-elections.
    #[test]
    fn requests_resolve_at_most_once(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut model: RelayModel<u64> = RelayModel::new();
        let mut counter = 0u64;
        let mut resolved = BTreeSet::new();

        for op in ops {
            match op {
                Op::Join(tag) => { model.handle_view_joined(view(tag)); }
                Op::Leave(tag) => { model.handle_view_exited(view(tag)); }
                Op::Submit => { counter += 1; model.submit(counter); }
                Op::Respond(raw) => {
                    let response = RelayResponse::new(parley_core::RequestId::new(raw), "answer");
                    if let Some((request_id, _)) = model.handle_response(response) {
                        prop_assert!(resolved.insert(request_id), "request resolved twice");
                    }
                }
            }
        }
    }

    /// A leader who never leaves is never displaced, regardless of churn
    /// around it.
    #[test]
    fn election_is_stable_while_leader_stays(
        ops in prop::collection::vec(op_strategy(), 1..64),
    ) {
        let mut model: RelayModel<u64> = RelayModel::new();
        let leader = view(200);
        model.handle_view_joined(leader);
        prop_assert_eq!(model.elected(), Some(leader));

        let mut counter = 0u64;
        for op in ops {
            match op {
                Op::Join(tag) => { model.handle_view_joined(view(tag)); }
                // Never remove the leader itself
                Op::Leave(tag) if view(tag) != leader => { model.handle_view_exited(view(tag)); }
                Op::Leave(_) => {}
                Op::Submit => { counter += 1; model.submit(counter); }
                Op::Respond(raw) => {
                    model.handle_response(RelayResponse::new(
                        parley_core::RequestId::new(raw),
                        "answer",
                    ));
                }
            }
            prop_assert_eq!(model.elected(), Some(leader));
        }
    }

    /// Every pending request is re-routed to the new leader on handover,
    /// in request-id order.
    #[test]
    fn handover_reroutes_every_pending_request(pending in 1usize..12) {
        let mut model: RelayModel<u64> = RelayModel::new();
        let old = view(1);
        let new = view(2);
        model.handle_view_joined(old);

        let mut submitted = Vec::new();
        for n in 0..pending {
            let (id, _) = model.submit(n as u64);
            submitted.push(id);
        }

        model.handle_view_exited(old);
        let outputs = model.handle_view_joined(new);

        prop_assert_eq!(&outputs[0], &RelayOutput::ElectedChanged(Some(new)));
        let routed: Vec<_> = outputs
            .iter()
            .skip(1)
            .filter_map(|output| match output {
                RelayOutput::Envelope(envelope) => Some(envelope.request_id),
                _ => None,
            })
            .collect();
        prop_assert_eq!(routed, submitted);
    }
}
