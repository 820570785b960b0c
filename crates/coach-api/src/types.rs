//! Wire types for the agent interaction endpoint

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Free-form key/value state passed through the wire unmodified
pub type StateMap = serde_json::Map<String, Value>;

/// Request body for `POST /agents/interact`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractRequest {
    /// Identity of the learner. Currently a fixed placeholder; the seam for
    /// future authentication integration.
    pub user_id: String,
    /// The message typed by the user
    pub message: String,
    /// Optional free-form context, forwarded verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<StateMap>,
}

impl InteractRequest {
    /// Create a request with no context
    pub fn new(user_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            message: message.into(),
            context: None,
        }
    }

    /// Attach a context map
    pub fn with_context(mut self, context: StateMap) -> Self {
        self.context = Some(context);
        self
    }
}

/// Response body for `POST /agents/interact`
///
/// `next_agent` and `current_state` are decoded but have no consumer in this
/// client; they exist so future orchestration-aware UIs can read them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractResponse {
    /// The coach's textual reply
    pub response: String,
    /// Which agent the service would hand off to next, if any
    #[serde(default)]
    pub next_agent: Option<String>,
    /// Snapshot of the service-side conversation state
    #[serde(default)]
    pub current_state: StateMap,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_omits_empty_context() {
        let req = InteractRequest::new("demo-user-123", "hello");
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({"user_id": "demo-user-123", "message": "hello"})
        );
    }

    #[test]
    fn test_request_serializes_context_when_present() {
        let mut context = StateMap::new();
        context.insert("module".to_string(), json!("pandas"));
        let req = InteractRequest::new("demo-user-123", "hello").with_context(context);
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["context"]["module"], "pandas");
    }

    #[test]
    fn test_response_with_null_next_agent() {
        let resp: InteractResponse = serde_json::from_value(json!({
            "response": "hi there",
            "next_agent": null,
            "current_state": {}
        }))
        .unwrap();
        assert_eq!(resp.response, "hi there");
        assert_eq!(resp.next_agent, None);
        assert!(resp.current_state.is_empty());
    }

    #[test]
    fn test_response_state_passes_through() {
        let resp: InteractResponse = serde_json::from_value(json!({
            "response": "ok",
            "next_agent": "evaluator",
            "current_state": {"user_id": "demo-user-123", "phase": 3}
        }))
        .unwrap();
        assert_eq!(resp.next_agent.as_deref(), Some("evaluator"));
        assert_eq!(resp.current_state["phase"], 3);
    }

    #[test]
    fn test_response_missing_optional_fields() {
        // A minimal body still decodes; the extension fields default.
        let resp: InteractResponse =
            serde_json::from_value(json!({"response": "ok"})).unwrap();
        assert_eq!(resp.next_agent, None);
        assert!(resp.current_state.is_empty());
    }

    #[test]
    fn test_response_rejects_missing_response_field() {
        let result = serde_json::from_value::<InteractResponse>(json!({
            "next_agent": null,
            "current_state": {}
        }));
        assert!(result.is_err());
    }
}
