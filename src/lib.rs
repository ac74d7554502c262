//! Healthcare device assistant web client.
//!
//! A server-rendered front end for a conversational assistant that generates
//! requirements, test cases and ISO compliance findings for medical device
//! domains. Pages are Leptos SSR; interaction is plain HTML forms upgraded by
//! HTMX.
//!
//! # Architecture
//!
//! - **Server**: Axum routes that mutate a per-page view session and re-render it
//! - **Dispatcher**: one `POST <base>/chat` per submit, guarded by a generation counter
//! - **Reply model**: typed union over the assistant's JSON replies
//! - **UI**: Leptos SSR components, stacked or tabbed result layout
//!
//! # Modules
//!
//! - [`domain`]: the six selectable domains
//! - [`backend`]: wire types, error classification, HTTP client
//! - [`reply`]: reply classification
//! - [`session`]: view sessions and their store
//! - [`dispatch`]: submit flow
//! - [`ui`]: page rendering

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]

pub mod backend;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod reply;
pub mod server;
pub mod session;
pub mod telemetry;
pub mod ui;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::dispatch::Dispatcher;
use crate::session::SessionStore;

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Resolved configuration.
    pub config: Arc<AppConfig>,
    /// View sessions, one per open page.
    pub sessions: SessionStore,
    /// Sends prompts to the assistant service.
    pub dispatcher: Dispatcher,
}
