//! Replicated chat room model
//!
//! Tracks users and history, and turns posts into relayed AI requests.
//! Runs entirely inside the session's single writer: every method here is
//! deterministic, and all outputs flow through the session bus.
//!
//! Request correlation follows the coordinator's rule of never storing a
//! callable in replicated state: the model remembers submitted request ids
//! in its own table and resolves them when the relay hands back a result.

use crate::{escape::escape_html, prompt::AssistPrompt};
use parley_core::{RequestId, SessionEvent, SessionOutput, ViewId};
use parley_relay::{RelayModel, RelayOutput};
use parley_session::SessionModel;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Maximum number of history lines kept.
pub const HISTORY_CAP: usize = 100;

/// Number of trailing history lines sent to the AI with each post.
pub const PROMPT_WINDOW: usize = 20;

/// Inputs a view can publish into the room.
#[derive(Debug, Clone)]
pub enum ChatInput {
    /// Post a message (and solicit an AI reply)
    Post {
        /// The posting view
        view: ViewId,
        /// Raw message text
        text: String,
    },
    /// Clear the room history
    Reset {
        /// The view requesting the reset
        view: ViewId,
    },
}

/// View-level updates published by the chat model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatDelta {
    /// The transcript changed; views should re-render it
    HistoryChanged,
}

type ChatOutput = SessionOutput<AssistPrompt, ChatDelta>;

/// The replicated chat room.
#[derive(Debug, Default)]
pub struct ChatModel {
    users: BTreeMap<ViewId, String>,
    history: Vec<String>,
    relay: RelayModel<AssistPrompt>,
    awaiting: BTreeSet<RequestId>,
}

impl ChatModel {
    /// Create an empty room.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current transcript, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Connected users by view id.
    pub fn users(&self) -> &BTreeMap<ViewId, String> {
        &self.users
    }

    /// The view currently elected to run AI requests.
    pub fn elected(&self) -> Option<ViewId> {
        self.relay.elected()
    }

    /// Number of posts still waiting for an AI reply.
    pub fn awaiting_len(&self) -> usize {
        self.awaiting.len()
    }

    fn display_name(&self, view: ViewId) -> String {
        self.users
            .get(&view)
            .cloned()
            .unwrap_or_else(|| "someone".to_string())
    }

    fn add_to_history(&mut self, line: String) -> Vec<ChatOutput> {
        self.history.push(line);
        while self.history.len() > HISTORY_CAP {
            self.history.remove(0);
        }
        vec![SessionOutput::Delta(ChatDelta::HistoryChanged)]
    }

    fn post(&mut self, view: ViewId, text: String) -> Vec<ChatOutput> {
        let prompt = AssistPrompt {
            users: self.users.values().cloned().collect(),
            history: self
                .history
                .iter()
                .rev()
                .take(PROMPT_WINDOW)
                .rev()
                .cloned()
                .collect(),
            text: text.trim().to_string(),
        };

        let (request_id, relay_outputs) = self.relay.submit(prompt);
        self.awaiting.insert(request_id);
        debug!(request = %request_id, view = %view, "post relayed to AI");

        let name = self.display_name(view);
        let mut outputs = relay_to_session(relay_outputs);
        outputs.extend(self.add_to_history(format!("<b>{name}:</b> {}", escape_html(&text))));
        outputs
    }

    fn resolve(&mut self, request_id: RequestId, text: String) -> Vec<ChatOutput> {
        if !self.awaiting.remove(&request_id) {
            debug!(request = %request_id, "resolved request unknown to the room");
            return Vec::new();
        }
        self.add_to_history(format!("<b>AI:</b> {}", escape_html(&text)))
    }
}

fn relay_to_session(outputs: Vec<RelayOutput<AssistPrompt>>) -> Vec<ChatOutput> {
    outputs
        .into_iter()
        .map(|output| match output {
            RelayOutput::ElectedChanged(view) => SessionOutput::ElectedChanged(view),
            RelayOutput::Envelope(envelope) => SessionOutput::Envelope(envelope),
        })
        .collect()
}

impl SessionModel for ChatModel {
    type Input = ChatInput;
    type Payload = AssistPrompt;
    type Delta = ChatDelta;

    fn handle(&mut self, event: SessionEvent<ChatInput>) -> Vec<ChatOutput> {
        match event {
            SessionEvent::ViewJoined { view, user_name } => {
                let mut outputs = relay_to_session(self.relay.handle_view_joined(view));
                self.users.insert(view, user_name.clone());
                outputs.extend(self.add_to_history(format!(
                    "<i>{} has entered the room</i>",
                    escape_html(&user_name)
                )));
                outputs
            }
            SessionEvent::ViewExited { view } => {
                let name = self.display_name(view);
                self.users.remove(&view);
                let mut outputs = relay_to_session(self.relay.handle_view_exited(view));
                outputs.extend(self.add_to_history(format!("<i>{name} has exited the room</i>")));
                outputs
            }
            SessionEvent::Input(ChatInput::Post { view, text }) => self.post(view, text),
            SessionEvent::Input(ChatInput::Reset { view }) => {
                let name = self.display_name(view);
                self.history.clear();
                self.add_to_history(format!("<i>{name} has reset the room</i>"))
            }
            SessionEvent::Response(response) => match self.relay.handle_response(response) {
                Some((request_id, text)) => self.resolve(request_id, text),
                None => Vec::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::RelayResponse;

    fn view(tag: u8) -> ViewId {
        ViewId::from_bytes([tag; 16])
    }

    fn join(model: &mut ChatModel, tag: u8, name: &str) -> Vec<ChatOutput> {
        model.handle(SessionEvent::ViewJoined {
            view: view(tag),
            user_name: name.to_string(),
        })
    }

    fn post(model: &mut ChatModel, tag: u8, text: &str) -> Vec<ChatOutput> {
        model.handle(SessionEvent::Input(ChatInput::Post {
            view: view(tag),
            text: text.to_string(),
        }))
    }

    fn routed_prompt(outputs: &[ChatOutput]) -> &AssistPrompt {
        outputs
            .iter()
            .find_map(|output| match output {
                SessionOutput::Envelope(envelope) => Some(&envelope.payload),
                _ => None,
            })
            .expect("expected a routed envelope")
    }

    #[test]
    fn test_join_elects_and_announces() {
        let mut model = ChatModel::new();
        let outputs = join(&mut model, 1, "Saffron");
        assert!(outputs
            .iter()
            .any(|o| matches!(o, SessionOutput::ElectedChanged(Some(v)) if *v == view(1))));
        assert_eq!(model.history(), ["<i>Saffron has entered the room</i>"]);
    }

    #[test]
    fn test_post_appends_escaped_line_and_routes_prompt() {
        let mut model = ChatModel::new();
        join(&mut model, 1, "Saffron");
        let outputs = post(&mut model, 1, "  2 < 3 & 4  ");

        let prompt = routed_prompt(&outputs);
        assert_eq!(prompt.text, "2 < 3 & 4");
        assert_eq!(prompt.users, ["Saffron"]);
        // The prompt window reflects the room before the post itself
        assert_eq!(prompt.history, ["<i>Saffron has entered the room</i>"]);

        assert_eq!(
            model.history().last().map(String::as_str),
            Some("<b>Saffron:</b>   2 &lt; 3 &amp; 4  ")
        );
        assert_eq!(model.awaiting_len(), 1);
    }

    #[test]
    fn test_prompt_window_is_bounded() {
        let mut model = ChatModel::new();
        join(&mut model, 1, "Saffron");
        for n in 0..40 {
            post(&mut model, 1, &format!("message {n}"));
        }
        let outputs = post(&mut model, 1, "the latest");
        assert_eq!(routed_prompt(&outputs).history.len(), PROMPT_WINDOW);
    }

    #[test]
    fn test_history_is_capped() {
        let mut model = ChatModel::new();
        join(&mut model, 1, "Saffron");
        for n in 0..(HISTORY_CAP * 2) {
            post(&mut model, 1, &format!("message {n}"));
        }
        assert_eq!(model.history().len(), HISTORY_CAP);
        // Oldest lines were dropped
        assert!(model.history()[0].contains("message"));
    }

    #[test]
    fn test_response_resolves_into_ai_line_once() {
        let mut model = ChatModel::new();
        join(&mut model, 1, "Saffron");
        let outputs = post(&mut model, 1, "hello");
        let request_id = outputs
            .iter()
            .find_map(|output| match output {
                SessionOutput::Envelope(envelope) => Some(envelope.request_id),
                _ => None,
            })
            .expect("routed");

        let outputs =
            model.handle(SessionEvent::Response(RelayResponse::new(request_id, "<hi>")));
        assert_eq!(outputs, vec![SessionOutput::Delta(ChatDelta::HistoryChanged)]);
        assert_eq!(
            model.history().last().map(String::as_str),
            Some("<b>AI:</b> &lt;hi&gt;")
        );
        assert_eq!(model.awaiting_len(), 0);

        // A duplicate response changes nothing
        let outputs =
            model.handle(SessionEvent::Response(RelayResponse::new(request_id, "again")));
        assert!(outputs.is_empty());
        assert_eq!(model.history().len(), 3);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut model = ChatModel::new();
        join(&mut model, 1, "Saffron");
        post(&mut model, 1, "hello");
        model.handle(SessionEvent::Input(ChatInput::Reset { view: view(1) }));
        assert_eq!(model.history(), ["<i>Saffron has reset the room</i>"]);
    }

    #[test]
    fn test_exit_announces_and_reelects() {
        let mut model = ChatModel::new();
        join(&mut model, 1, "Saffron");
        join(&mut model, 2, "Wasabi");
        let outputs = model.handle(SessionEvent::ViewExited { view: view(1) });
        assert!(outputs
            .iter()
            .any(|o| matches!(o, SessionOutput::ElectedChanged(Some(v)) if *v == view(2))));
        assert_eq!(
            model.history().last().map(String::as_str),
            Some("<i>Saffron has exited the room</i>")
        );
        assert_eq!(model.users().len(), 1);
    }
}
