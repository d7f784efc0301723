//! Assist prompt payload
//!
//! The relayed request payload: enough room context for the AI to answer a
//! post. Built by the chat model at submission time, so it reflects the
//! room as of the post - the post itself is not yet in the history window.

use serde::{Deserialize, Serialize};

/// Model identifier sent to the assist endpoint.
pub const DEFAULT_ASSIST_MODEL: &str = "@cf/meta/llama-3.1-8b-instruct-fast";

/// Context-carrying request for one AI reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistPrompt {
    /// Display names of everyone currently in the room
    pub users: Vec<String>,
    /// The most recent history lines (a bounded window, not the full log)
    pub history: Vec<String>,
    /// The post being answered, trimmed
    pub text: String,
}

impl AssistPrompt {
    /// Render the system message describing the room to the AI.
    pub fn system_prompt(&self) -> String {
        format!(
            "You are \"AI\", a friendly participant in a multiuser chat room.\n\
            You are expected to respond to user messages in a helpful and engaging manner.\n\
            You should not respond to system messages or your own messages (from user name \"AI\").\n\
            You should not use any HTML formatting in your responses.\n\
            You should not use any special formatting in your responses.\n\
            You should not use any markdown formatting in your responses.\n\
            There is no direct messaging in this chat room.\n\
            The users in the chat room are: {}.\n\
            This is the latest chat history:\n{}",
            self.users.join(", "),
            self.history.join("\n"),
        )
    }
}
