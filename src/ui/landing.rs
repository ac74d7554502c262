//! Landing view: pick one of the six domains.

use leptos::prelude::*;

use crate::domain::DomainTag;
use crate::ui::session_action;

/// Banner across the top of the landing view.
pub const POWERED_BY: &str = "Powered by Google Cloud • Gemini • Vertex AI • BigQuery";

#[component]
pub fn Landing(session_id: String) -> impl IntoView {
    let cards = DomainTag::ALL
        .into_iter()
        .map(|domain| view! { <DomainCard session_id=session_id.clone() domain=domain /> })
        .collect_view();

    view! {
        <div class="landing-page">
            <header>
                <div class="powered">{POWERED_BY}</div>
            </header>

            <main class="landing">
                <h1 class="title">"🚀 Geminator Testcase Generator (GTG)"</h1>
                <p>
                    "Select a domain below to chat with "
                    <span class="highlight">"MediAI"</span>
                    ", generate compliant test cases, validate against ISO, and track execution."
                </p>

                <div class="cards">{cards}</div>
            </main>
        </div>
    }
}

/// One selectable domain. Posting it switches to the chat view.
#[component]
fn DomainCard(session_id: String, domain: DomainTag) -> impl IntoView {
    let action = session_action(&session_id, &format!("domains/{}", domain.slug()));

    view! {
        <form
            method="post"
            action=action.clone()
            hx-post=action
            hx-target="#view"
            hx-swap="outerHTML"
            class="card-form"
        >
            <button type="submit" class="card" data-domain=domain.slug()>
                <div class="emoji">{domain.emoji()}</div>
                <h2>{domain.title()}</h2>
                <p>{domain.subtitle()}</p>
            </button>
        </form>
    }
}
