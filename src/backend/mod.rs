//! Access to the external assistant service.
//!
//! The service does all the real work (intent classification, requirement
//! normalisation, test-case generation, ISO review). This side only knows one
//! contract: `POST <base>/chat` with `{"prompt": "..."}`, answered by a JSON
//! object.
//!
//! - [`ChatBackend`]: the seam the dispatcher talks to
//! - [`HttpChatBackend`]: `reqwest` implementation of it
//! - [`DispatchError`]: the three ways a dispatch can fail

mod http;

pub use http::HttpChatBackend;

use serde::{Deserialize, Serialize};

/// Wire body for `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Free text typed by the user. May be empty.
    pub prompt: String,
}

impl ChatRequest {
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// Why a dispatch produced no usable reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DispatchError {
    /// The request never got an HTTP answer (refused, DNS, timeout).
    #[error("could not reach the assistant service: {message}")]
    Network { message: String },

    /// The service answered with a non-success status.
    #[error("assistant service returned {status}: {message}")]
    Server { status: u16, message: String },

    /// The body was not JSON, or was JSON with nothing we know how to show.
    #[error("unexpected response from the assistant service: {message}")]
    MalformedResponse { message: String },
}

impl DispatchError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Stable machine-readable category.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network { .. } => "network",
            Self::Server { .. } => "server",
            Self::MalformedResponse { .. } => "malformed",
        }
    }

    /// Banner headline shown to the user.
    #[must_use]
    pub fn headline(&self) -> &'static str {
        match self {
            Self::Network { .. } => "Couldn't reach server",
            Self::Server { .. } => "Server returned an error",
            Self::MalformedResponse { .. } => "Unexpected response shape",
        }
    }
}

/// Anything that can answer a chat prompt with a raw JSON payload.
#[async_trait::async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one prompt and return the decoded JSON body.
    async fn send(&self, request: &ChatRequest) -> Result<serde_json::Value, DispatchError>;
}
