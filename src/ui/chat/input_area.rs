//! Prompt form.

use leptos::prelude::*;

use crate::ui::components::{Button, ButtonVariant, LoaderIcon};
use crate::ui::session_action;

const PLACEHOLDER: &str =
    "Hey 👋 I'm here for both brains & health. Wanna spin up a test case or just chat health stuff?";

/// Free-text prompt and the submit button.
///
/// Empty prompts are allowed through. While a request is in flight the
/// button is disabled; in the browser htmx also disables it for the duration
/// of the request and shows the indicator.
#[component]
pub fn PromptForm(session_id: String, prompt: String, submitting: bool) -> impl IntoView {
    let action = session_action(&session_id, "submit");
    let label = if submitting { "⏳ Processing..." } else { "Scan Me" };

    view! {
        <form
            class="prompt-form"
            method="post"
            action=action.clone()
            hx-post=action
            hx-target="#view"
            hx-swap="outerHTML"
            hx-disabled-elt="find button[type='submit']"
            hx-indicator="find .submit-indicator"
        >
            <textarea name="prompt" class="chat-input" placeholder=PLACEHOLDER>
                {prompt}
            </textarea>

            <Button variant=ButtonVariant::Primary disabled=submitting class="submit">
                {label}
            </Button>

            <span class="submit-indicator htmx-indicator">
                <LoaderIcon />
                " Processing..."
            </span>
        </form>
    }
}
