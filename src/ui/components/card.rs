//! Card container used for each result section.

use leptos::prelude::*;

/// Card container component.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <Card section="answer">
///         <CardHeader title="💡 Answer" />
///         <CardContent>
///             <p>"Hello"</p>
///         </CardContent>
///     </Card>
/// }
/// ```
#[component]
pub fn Card(
    /// Section name, exposed as `data-section`.
    section: &'static str,
    /// Card content.
    children: Children,
) -> impl IntoView {
    view! {
        <section class="card-panel" data-section=section>
            {children()}
        </section>
    }
}

/// Card heading.
#[component]
pub fn CardHeader(
    /// Heading text.
    title: &'static str,
) -> impl IntoView {
    view! {
        <h3 class="card-title">{title}</h3>
    }
}

/// Card body.
#[component]
pub fn CardContent(children: Children) -> impl IntoView {
    view! {
        <div class="card-body">
            {children()}
        </div>
    }
}
