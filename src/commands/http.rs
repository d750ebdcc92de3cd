//! HTTP Transport
//!
//! Request/reply values and the `window.fetch` transport.

use async_trait::async_trait;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use crate::error::{js_message, ClientError, ClientResult};

// ========================
// Types
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post_json(url: impl Into<String>, body: String) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Some(body),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    /// Same range as `Response.ok`
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// ========================
// Transport
// ========================

/// Sends requests to the poll server
#[async_trait(?Send)]
pub trait PollTransport {
    /// Fails only when no reply arrives; any HTTP status is a reply
    async fn send(&self, request: HttpRequest) -> ClientResult<HttpReply>;
}

/// `window.fetch` transport, same-origin relative URLs
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl PollTransport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> ClientResult<HttpReply> {
        let window = web_sys::window().ok_or_else(|| ClientError::Transport("no window".to_string()))?;

        let init = RequestInit::new();
        init.set_method(request.method.as_str());
        if !request.headers.is_empty() {
            let headers = Headers::new().map_err(|e| ClientError::Transport(js_message(&e)))?;
            for (name, value) in &request.headers {
                headers.set(name, value).map_err(|e| ClientError::Transport(js_message(&e)))?;
            }
            init.set_headers(&headers);
        }
        if let Some(body) = &request.body {
            init.set_body(&JsValue::from_str(body));
        }

        let js_request = Request::new_with_str_and_init(&request.url, &init)
            .map_err(|e| ClientError::Transport(js_message(&e)))?;
        let js_response = JsFuture::from(window.fetch_with_request(&js_request))
            .await
            .map_err(|e| ClientError::Transport(js_message(&e)))?;
        let response: Response = js_response
            .dyn_into()
            .map_err(|e| ClientError::Transport(js_message(&e)))?;

        let text_promise = response.text().map_err(|e| ClientError::Transport(js_message(&e)))?;
        let text = JsFuture::from(text_promise)
            .await
            .map_err(|e| ClientError::Transport(js_message(&e)))?;

        Ok(HttpReply {
            status: response.status(),
            body: text.as_string().unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_json_sets_content_type() {
        let request = HttpRequest::post_json("/api/sondages", "{}".to_string());
        assert_eq!(request.method.as_str(), "POST");
        assert_eq!(request.headers, vec![("Content-Type".to_string(), "application/json".to_string())]);
        assert_eq!(request.body.as_deref(), Some("{}"));
    }

    #[test]
    fn test_reply_success_range() {
        let reply = |status| HttpReply { status, body: String::new() };
        assert!(reply(200).is_success());
        assert!(reply(201).is_success());
        assert!(!reply(302).is_success());
        assert!(!reply(400).is_success());
        assert!(!reply(500).is_success());
    }
}
