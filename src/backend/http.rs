//! `reqwest` implementation of [`ChatBackend`].

use std::time::Duration;

use reqwest::StatusCode;

use super::{ChatBackend, ChatRequest, DispatchError};

/// Longest slice of an error body echoed back to the user.
const MAX_ERROR_BODY: usize = 300;

/// Talks to `POST <base_url>/chat` over HTTP.
#[derive(Clone)]
pub struct HttpChatBackend {
    http: reqwest::Client,
    chat_url: String,
}

impl std::fmt::Debug for HttpChatBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpChatBackend")
            .field("chat_url", &self.chat_url)
            .finish_non_exhaustive()
    }
}

impl HttpChatBackend {
    /// Build a backend for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, http))
    }

    /// Build a backend around an existing client.
    #[must_use]
    pub fn with_client(base_url: &str, http: reqwest::Client) -> Self {
        Self {
            http,
            chat_url: chat_url(base_url),
        }
    }

    /// Full URL of the chat endpoint.
    #[must_use]
    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }
}

#[async_trait::async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send(&self, request: &ChatRequest) -> Result<serde_json::Value, DispatchError> {
        let resp = self
            .http
            .post(&self.chat_url)
            .json(request)
            .send()
            .await
            .map_err(|e| DispatchError::network(describe_transport_error(&e)))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| DispatchError::network(describe_transport_error(&e)))?;

        if !status.is_success() {
            return Err(DispatchError::Server {
                status: status.as_u16(),
                message: server_message(status, &body),
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| DispatchError::malformed(format!("body is not valid JSON ({e})")))
    }
}

fn chat_url(base_url: &str) -> String {
    format!("{}/chat", base_url.trim_end_matches('/'))
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        err.to_string()
    }
}

/// Pick the most useful message out of an error response.
///
/// The service answers bad requests with `{"error": "..."}`; anything else is
/// shown as trimmed text, falling back to the status reason.
fn server_message(status: StatusCode, body: &str) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = map.get("error").and_then(|v| v.as_str()) {
            return msg.to_string();
        }
    }

    let text = body.trim();
    if text.is_empty() {
        return status
            .canonical_reason()
            .map_or_else(|| format!("HTTP {}", status.as_u16()), ToString::to_string);
    }

    match text.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}
