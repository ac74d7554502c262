//! Document shell and the swappable view root.

use leptos::prelude::*;

use crate::config::DisplayMode;
use crate::session::{Screen, ViewState};
use crate::ui::chat::ChatPanel;
use crate::ui::landing::Landing;

/// Full HTML document around the view root.
#[component]
pub fn Page(
    /// Where the htmx script is loaded from.
    htmx_url: String,
    children: Children,
) -> impl IntoView {
    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <meta name="description" content="Healthcare test case generation assistant"/>

                <title>"Geminator Testcase Generator (GTG)"</title>

                <script src=htmx_url></script>
                <link rel="stylesheet" href="/static/app.css"/>
            </head>

            <body class="app-background">
                {children()}
            </body>
        </html>
    }
}

/// The `#view` element: landing cards or the chat panel.
///
/// HTMX requests replace this element wholesale.
#[component]
pub fn ViewRoot(session_id: String, state: ViewState, mode: DisplayMode) -> impl IntoView {
    let screen = state.screen;
    let body = match screen {
        Screen::Landing => view! { <Landing session_id=session_id.clone() /> }.into_any(),
        Screen::Chat(domain) => view! {
            <ChatPanel session_id=session_id.clone() domain=domain state=state mode=mode />
        }
        .into_any(),
    };
    let screen_name = match screen {
        Screen::Landing => "landing",
        Screen::Chat(_) => "chat",
    };

    view! {
        <div id="view" data-session-id=session_id data-screen=screen_name>
            {body}
        </div>
    }
}
