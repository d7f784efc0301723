//! Parley Chat - a chat room with an AI participant
//!
//! The demonstration application for the elected-relay core. Every client
//! sees the same replicated room state: who is present, the message
//! history, and the AI's contributions. Posts are answered by an AI
//! endpoint, but only the one elected view actually talks to it; the
//! response is replicated back to everyone through the relay.

#![forbid(unsafe_code)]

pub mod assist_http;
pub mod escape;
pub mod model;
pub mod names;
pub mod prompt;

pub use assist_http::{HttpAssistHandler, DEFAULT_ASSIST_ENDPOINT};
pub use escape::escape_html;
pub use model::{ChatDelta, ChatInput, ChatModel, HISTORY_CAP, PROMPT_WINDOW};
pub use names::random_name;
pub use prompt::{AssistPrompt, DEFAULT_ASSIST_MODEL};
