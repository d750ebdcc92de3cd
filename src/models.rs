//! Frontend Models
//!
//! Data structures matching the poll service JSON.

use serde::{Deserialize, Serialize};

/// Poll ("sondage") as returned by the creation endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poll {
    pub id: u64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub closed_at: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
}

/// Error body of a refused creation request.
///
/// Validation failures come back as a list of messages; anything else is
/// kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiErrorPayload {
    Messages(Vec<String>),
    Detail(serde_json::Value),
}

impl ApiErrorPayload {
    /// Parse a response body; non-JSON bodies are kept as text
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body)
            .unwrap_or_else(|_| ApiErrorPayload::Detail(serde_json::Value::String(body.trim().to_string())))
    }

    /// One-line description for logs and the failure banner
    pub fn summary(&self) -> String {
        use serde_json::Value;

        let summary = match self {
            ApiErrorPayload::Messages(messages) => messages.join("; "),
            ApiErrorPayload::Detail(Value::String(text)) => text.clone(),
            ApiErrorPayload::Detail(Value::Object(fields)) => ["message", "error", "detail"]
                .iter()
                .find_map(|key| fields.get(*key).and_then(Value::as_str))
                .map(str::to_string)
                .unwrap_or_else(|| Value::Object(fields.clone()).to_string()),
            ApiErrorPayload::Detail(other) => other.to_string(),
        };
        if summary.is_empty() {
            "no details".to_string()
        } else {
            summary
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_from_creation_response() {
        let body = r#"{"id":7,"description":"d","question":"q?","createdAt":"t","closedAt":null,"createdBy":"u"}"#;
        let poll: Poll = serde_json::from_str(body).unwrap();
        assert_eq!(poll.id, 7);
        assert_eq!(poll.question, "q?");
        assert_eq!(poll.created_at.as_deref(), Some("t"));
        assert_eq!(poll.closed_at, None);
        assert_eq!(poll.created_by.as_deref(), Some("u"));
    }

    #[test]
    fn test_poll_only_needs_id() {
        let poll: Poll = serde_json::from_str(r#"{"id":3,"votes":[]}"#).unwrap();
        assert_eq!(poll.id, 3);
        assert!(poll.description.is_empty());
    }

    #[test]
    fn test_error_payload_variants() {
        let object = ApiErrorPayload::from_body(r#"{"message":"invalid"}"#);
        assert_eq!(object.summary(), "invalid");

        let list = ApiErrorPayload::from_body(r#"["too short","must be in the future"]"#);
        assert_eq!(list, ApiErrorPayload::Messages(vec!["too short".into(), "must be in the future".into()]));
        assert_eq!(list.summary(), "too short; must be in the future");

        let html = ApiErrorPayload::from_body("<h1>Bad Gateway</h1>\n");
        assert_eq!(html.summary(), "<h1>Bad Gateway</h1>");

        assert_eq!(ApiErrorPayload::from_body("").summary(), "no details");
        assert_eq!(ApiErrorPayload::from_body(r#"{"code":12}"#).summary(), r#"{"code":12}"#);
    }
}
