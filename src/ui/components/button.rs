//! Button component with variants and sizes.

use leptos::prelude::*;

/// Button visual variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Main call to action ("Scan Me").
    #[default]
    Primary,
    /// Navigation and secondary actions.
    Secondary,
    /// Tab in the result selector.
    Tab,
    /// Currently selected tab.
    TabActive,
}

impl ButtonVariant {
    /// Get CSS classes for this variant.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Primary => "btn-primary",
            Self::Secondary => "btn-secondary",
            Self::Tab => "btn-tab",
            Self::TabActive => "btn-tab btn-tab-active",
        }
    }
}

/// Button size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonSize {
    /// Compact button used inside result items.
    Sm,
    /// Regular button.
    #[default]
    Md,
}

impl ButtonSize {
    /// Get CSS classes for this size.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Sm => "btn-sm",
            Self::Md => "btn-md",
        }
    }
}

/// Button component.
///
/// Views post plain forms, so most buttons here are `type="submit"`.
#[component]
pub fn Button(
    /// Button variant.
    #[prop(default = ButtonVariant::Primary)]
    variant: ButtonVariant,
    /// Button size.
    #[prop(default = ButtonSize::Md)]
    size: ButtonSize,
    /// Whether the button is disabled.
    #[prop(default = false)]
    disabled: bool,
    /// Button type attribute.
    #[prop(default = "submit")]
    button_type: &'static str,
    /// Additional CSS classes.
    #[prop(default = "")]
    class: &'static str,
    /// Button content.
    children: Children,
) -> impl IntoView {
    let classes = format!("btn {} {} {}", variant.classes(), size.classes(), class);

    view! {
        <button type=button_type class=classes disabled=disabled>
            {children()}
        </button>
    }
}
