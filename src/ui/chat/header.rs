//! Back button and domain heading.

use leptos::prelude::*;

use crate::ui::components::{ArrowLeftIcon, Button, ButtonSize, ButtonVariant};
use crate::ui::session_action;

#[component]
pub fn ChatHeader(session_id: String, heading: String) -> impl IntoView {
    let action = session_action(&session_id, "back");

    view! {
        <header class="chat-header">
            <form
                method="post"
                action=action.clone()
                hx-post=action
                hx-target="#view"
                hx-swap="outerHTML"
            >
                <Button variant=ButtonVariant::Secondary size=ButtonSize::Sm class="back">
                    <ArrowLeftIcon />
                    " Back"
                </Button>
            </form>
            <h2>{heading}</h2>
        </header>
    }
}
