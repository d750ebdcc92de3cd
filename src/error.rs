//! Client Errors
//!
//! Every operation of the poll list controller returns `ClientResult`.

use wasm_bindgen::{JsCast, JsValue};

use crate::models::ApiErrorPayload;

/// Common result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Client-side failures
#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    /// A required element is not in the page (id or selector)
    MissingElement(String),
    /// The page indicator text is not a page number
    InvalidPage(String),
    /// The request never completed
    Transport(String),
    /// A fragment request answered with a non-success status
    Status { status: u16, url: String },
    /// The poll service refused a creation request
    Rejected { status: u16, payload: ApiErrorPayload },
    /// JSON could not be encoded or decoded
    Json(String),
    /// The fragment has no root element
    EmptyFragment,
    /// A DOM call failed
    Dom(String),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::MissingElement(what) => write!(f, "Missing element: {}", what),
            ClientError::InvalidPage(text) => write!(f, "Invalid page number: {:?}", text),
            ClientError::Transport(msg) => write!(f, "Request failed: {}", msg),
            ClientError::Status { status, url } => write!(f, "HTTP {} for {}", status, url),
            ClientError::Rejected { status, payload } => {
                write!(f, "Poll creation refused (HTTP {}): {}", status, payload.summary())
            }
            ClientError::Json(msg) => write!(f, "JSON error: {}", msg),
            ClientError::EmptyFragment => write!(f, "Fragment has no root element"),
            ClientError::Dom(msg) => write!(f, "DOM error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Json(err.to_string())
    }
}

/// Readable message from a thrown JS value
pub fn js_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{:?}", value)
}
