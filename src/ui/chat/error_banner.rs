//! User-visible failure banner.

use leptos::prelude::*;

use crate::ui::components::AlertIcon;
use crate::ui::model::ErrorBanner;

#[component]
pub fn ErrorBannerView(banner: ErrorBanner) -> impl IntoView {
    view! {
        <div class="error-banner" role="alert" data-error-kind=banner.kind>
            <AlertIcon />
            <strong>{banner.headline}</strong>
            <p class="error-detail">{banner.detail}</p>
            <p class="error-hint">"Press Scan Me to try again."</p>
        </div>
    }
}
