//! Badge component for verdicts and status indicators.

use leptos::prelude::*;

/// Badge visual variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BadgeVariant {
    /// Neutral label.
    #[default]
    Neutral,
    /// ISO review found the test case compliant.
    Compliant,
    /// ISO review found gaps.
    NonCompliant,
    /// Test case marked as passed by the user.
    Passed,
}

impl BadgeVariant {
    /// Get CSS classes for this variant.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Neutral => "badge-neutral",
            Self::Compliant => "badge-compliant",
            Self::NonCompliant => "badge-non-compliant",
            Self::Passed => "badge-passed",
        }
    }

    #[must_use]
    pub fn for_compliance(compliant: bool) -> Self {
        if compliant {
            Self::Compliant
        } else {
            Self::NonCompliant
        }
    }
}

/// Inline pill.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <Badge variant=BadgeVariant::Compliant>"Compliant ✅"</Badge>
/// }
/// ```
#[component]
pub fn Badge(
    /// Badge variant.
    #[prop(default = BadgeVariant::Neutral)]
    variant: BadgeVariant,
    /// Additional CSS classes.
    #[prop(default = "")]
    class: &'static str,
    /// Badge content.
    children: Children,
) -> impl IntoView {
    let classes = format!("badge {} {}", variant.classes(), class);

    view! {
        <span class=classes>
            {children()}
        </span>
    }
}
