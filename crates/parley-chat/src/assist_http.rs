//! HTTP assist handler
//!
//! Talks to the AI worker endpoint on behalf of the elected view. All
//! transport and protocol failures surface as `ParleyError`; the executor
//! turns them into the fallback reply, so a broken endpoint degrades to an
//! apologetic AI rather than a silent one.

use crate::prompt::{AssistPrompt, DEFAULT_ASSIST_MODEL};
use async_trait::async_trait;
use parley_core::{ParleyError, Result};
use parley_executor::AssistEffects;
use tracing::debug;

/// Default AI worker endpoint.
pub const DEFAULT_ASSIST_ENDPOINT: &str = "https://ai-worker.synq.workers.dev";

/// Reply used when the endpoint answers with a missing or empty response.
const EMPTY_RESPONSE_REPLY: &str = "Sorry, I didn't understand that.";

/// `AssistEffects` handler backed by an HTTP AI worker.
#[derive(Debug, Clone)]
pub struct HttpAssistHandler {
    endpoint: String,
    model: String,
    client: reqwest::Client,
}

impl HttpAssistHandler {
    /// Create a handler for `endpoint` with the default model.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: DEFAULT_ASSIST_MODEL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Override the model identifier sent with each request.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl Default for HttpAssistHandler {
    fn default() -> Self {
        Self::new(DEFAULT_ASSIST_ENDPOINT)
    }
}

#[async_trait]
impl AssistEffects<AssistPrompt> for HttpAssistHandler {
    async fn perform(&self, prompt: &AssistPrompt) -> Result<String> {
        let body = serde_json::json!({
            "run": {
                "model": self.model,
                "options": {
                    "messages": [
                        { "role": "system", "content": prompt.system_prompt() },
                        { "role": "user", "content": prompt.text },
                    ],
                },
            },
        });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|err| ParleyError::network(format!("assist request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ParleyError::network(format!(
                "assist endpoint returned {status}"
            )));
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|err| ParleyError::serialization(format!("invalid assist response: {err}")))?;
        debug!(endpoint = %self.endpoint, "received assist response");

        parse_assist_reply(&data)
    }
}

/// Interpret the endpoint's JSON reply body.
///
/// An `error` field counts only when it carries a meaningful value; null,
/// `false`, zero, and the empty string do not. A missing, non-string, or
/// empty `response` yields the canned not-understood reply, so the room
/// never shows a blank AI line.
fn parse_assist_reply(data: &serde_json::Value) -> Result<String> {
    if let Some(error) = data.get("error").filter(|value| is_meaningful(value)) {
        return Err(ParleyError::network(format!("assist error: {error}")));
    }

    Ok(data
        .get("response")
        .and_then(|value| value.as_str())
        .filter(|text| !text.is_empty())
        .unwrap_or(EMPTY_RESPONSE_REPLY)
        .to_string())
}

fn is_meaningful(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(flag) => *flag,
        serde_json::Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        serde_json::Value::String(text) => !text.is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reply_text_is_returned() {
        let reply = parse_assist_reply(&json!({ "response": "hello there" }));
        assert_eq!(reply.unwrap(), "hello there");
    }

    #[test]
    fn test_empty_response_gets_canned_reply() {
        let reply = parse_assist_reply(&json!({ "response": "" }));
        assert_eq!(reply.unwrap(), EMPTY_RESPONSE_REPLY);
    }

    #[test]
    fn test_missing_or_non_string_response_gets_canned_reply() {
        assert_eq!(parse_assist_reply(&json!({})).unwrap(), EMPTY_RESPONSE_REPLY);
        let reply = parse_assist_reply(&json!({ "response": 42 }));
        assert_eq!(reply.unwrap(), EMPTY_RESPONSE_REPLY);
    }

    #[test]
    fn test_error_field_is_reported() {
        let reply = parse_assist_reply(&json!({ "error": "model overloaded" }));
        let err = reply.unwrap_err();
        assert!(matches!(err, ParleyError::Network { .. }));
        assert!(err.to_string().contains("model overloaded"));
    }

    #[test]
    fn test_error_object_is_reported() {
        let reply = parse_assist_reply(&json!({ "error": { "code": 503 } }));
        assert!(reply.is_err());
    }

    #[test]
    fn test_empty_error_values_are_ignored() {
        for empty in [json!(null), json!(false), json!(0), json!("")] {
            let reply = parse_assist_reply(&json!({ "error": empty, "response": "ok" }));
            assert_eq!(reply.unwrap(), "ok");
        }
    }
}
