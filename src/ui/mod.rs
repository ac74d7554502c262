//! Server-rendered views.
//!
//! Leptos SSR components render the page; HTMX posts forms back to the server
//! and swaps the `#view` element with the returned fragment. Without
//! JavaScript the same forms fall back to full-page posts.
//!
//! # Structure
//!
//! - [`app`]: document shell and the `#view` root
//! - [`landing`]: domain selector cards
//! - [`chat`]: chat panel, prompt form, result area
//! - [`model`]: pure presentation model for results
//! - [`components`]: reusable building blocks

pub mod app;
pub mod chat;
pub mod components;
pub mod landing;
pub mod model;

use leptos::prelude::*;

use crate::config::{DisplayMode, UiConfig};
use crate::session::ViewState;

use app::{Page, ViewRoot};

/// Render a complete HTML document for a session.
#[must_use]
pub fn render_document(ui: &UiConfig, session_id: &str, state: &ViewState) -> String {
    let htmx_url = ui.htmx_url.clone();
    let session_id = session_id.to_string();
    let state = state.clone();
    let mode = ui.display_mode;
    let root = view! {
        <Page htmx_url=htmx_url>
            <ViewRoot session_id=session_id.clone() state=state.clone() mode=mode />
        </Page>
    };
    format!("<!DOCTYPE html>{}", root.to_html())
}

/// Render only the `#view` element, for HTMX swaps.
#[must_use]
pub fn render_view(mode: DisplayMode, session_id: &str, state: &ViewState) -> String {
    view! {
        <ViewRoot session_id=session_id.to_string() state=state.clone() mode=mode />
    }
    .to_html()
}

/// Form action for a session-scoped route.
pub(crate) fn session_action(session_id: &str, path: &str) -> String {
    format!("/sessions/{session_id}/{path}")
}
