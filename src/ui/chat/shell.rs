//! Chat panel layout.

use leptos::prelude::*;

use super::{ChatHeader, PromptForm, ResultsView};
use crate::config::DisplayMode;
use crate::domain::DomainTag;
use crate::session::ViewState;
use crate::ui::model::ResultPanel;

/// Chat view for one domain:
/// - back button and heading
/// - prompt form
/// - result area, once something came back
#[component]
pub fn ChatPanel(
    session_id: String,
    domain: DomainTag,
    state: ViewState,
    mode: DisplayMode,
) -> impl IntoView {
    let panel = ResultPanel::build(&state, mode);
    let submitting = state.submitting;
    let results = panel.map(|panel| view! { <ResultsView session_id=session_id.clone() panel=panel /> });

    view! {
        <div class="chat-panel" data-domain=domain.slug()>
            <ChatHeader session_id=session_id.clone() heading=domain.heading() />

            <PromptForm session_id=session_id prompt=state.prompt submitting=submitting />

            {submitting.then(|| view! { <p class="processing">"Processing..."</p> })}

            {results}
        </div>
    }
}
