//! Presentation model for the result area.
//!
//! [`ResultPanel::build`] is a pure function of the view state and the display
//! mode; the Leptos components only walk what it produces.

use crate::backend::DispatchError;
use crate::config::DisplayMode;
use crate::reply::{ChatReply, IsoFinding, Listing, ReplyKind, TestCase, pretty};
use crate::session::{Outcome, ResultTab, ViewState};

/// Shown when a general reply carries no text.
pub const NO_ANSWER: &str = "No answer returned.";

/// Shown in a tab whose section the reply does not contain.
pub const EMPTY_SECTION: &str = "Nothing to show for this section.";

/// Everything the result area renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPanel {
    pub mode: DisplayMode,
    /// Empty in stacked mode and on failure.
    pub tabs: Vec<TabButton>,
    pub sections: Vec<Section>,
    pub error: Option<ErrorBanner>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabButton {
    pub tab: ResultTab,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Answer { text: String },
    Requirement { json: String },
    TestCases(ListingView<TestCaseRow>),
    Iso(ListingView<IsoFinding>),
    Empty { tab: ResultTab },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListingView<T> {
    Items(Vec<T>),
    /// Pretty-printed fallback for non-list values.
    Raw(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TestCaseRow {
    pub case: TestCase,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    pub kind: &'static str,
    pub headline: &'static str,
    pub detail: String,
}

impl From<&DispatchError> for ErrorBanner {
    fn from(err: &DispatchError) -> Self {
        let detail = match err {
            DispatchError::Network { message }
            | DispatchError::Server { message, .. }
            | DispatchError::MalformedResponse { message } => message.clone(),
        };
        let detail = match err {
            DispatchError::Server { status, .. } => format!("HTTP {status}: {detail}"),
            _ => detail,
        };
        Self {
            kind: err.kind(),
            headline: err.headline(),
            detail,
        }
    }
}

impl ResultPanel {
    /// Build the result area, or `None` when there is nothing to show yet.
    #[must_use]
    pub fn build(state: &ViewState, mode: DisplayMode) -> Option<Self> {
        match state.outcome.as_ref()? {
            Outcome::Failed(err) => Some(Self {
                mode,
                tabs: Vec::new(),
                sections: Vec::new(),
                error: Some(ErrorBanner::from(err)),
            }),
            Outcome::Reply(reply) => Some(match mode {
                DisplayMode::Stacked => Self {
                    mode,
                    tabs: Vec::new(),
                    sections: stacked_sections(reply, state),
                    error: None,
                },
                DisplayMode::Tabbed => {
                    let active = state
                        .active_tab
                        .unwrap_or_else(|| ResultTab::for_kind(reply.kind));
                    Self {
                        mode,
                        tabs: ResultTab::ALL
                            .into_iter()
                            .map(|tab| TabButton {
                                tab,
                                active: tab == active,
                            })
                            .collect(),
                        sections: vec![tab_section(reply, state, active)],
                        error: None,
                    }
                }
            }),
        }
    }
}

fn stacked_sections(reply: &ChatReply, state: &ViewState) -> Vec<Section> {
    let mut sections = Vec::new();
    if reply.kind == ReplyKind::General {
        sections.push(answer_section(reply));
    }
    if let Some(requirement) = &reply.requirement {
        sections.push(Section::Requirement {
            json: pretty(requirement),
        });
    }
    if let Some(cases) = &reply.test_cases {
        sections.push(Section::TestCases(test_case_view(cases, state)));
    }
    if let Some(findings) = &reply.iso_validation {
        sections.push(Section::Iso(iso_view(findings)));
    }
    sections
}

fn tab_section(reply: &ChatReply, state: &ViewState, tab: ResultTab) -> Section {
    let section = match tab {
        ResultTab::Answer => Some(answer_section(reply)),
        ResultTab::Requirement => reply.requirement.as_ref().map(|r| Section::Requirement {
            json: pretty(r),
        }),
        ResultTab::TestCases => reply
            .test_cases
            .as_ref()
            .map(|cases| Section::TestCases(test_case_view(cases, state))),
        ResultTab::Iso => reply
            .iso_validation
            .as_ref()
            .map(|findings| Section::Iso(iso_view(findings))),
    };
    section.unwrap_or(Section::Empty { tab })
}

fn answer_section(reply: &ChatReply) -> Section {
    Section::Answer {
        text: reply.answer.clone().unwrap_or_else(|| NO_ANSWER.to_string()),
    }
}

fn test_case_view(cases: &Listing<TestCase>, state: &ViewState) -> ListingView<TestCaseRow> {
    match cases {
        Listing::Items(items) => ListingView::Items(
            items
                .iter()
                .map(|case| TestCaseRow {
                    passed: state.passed.contains(&case.test_case_id),
                    case: case.clone(),
                })
                .collect(),
        ),
        Listing::Raw(value) => ListingView::Raw(pretty(value)),
    }
}

fn iso_view(findings: &Listing<IsoFinding>) -> ListingView<IsoFinding> {
    match findings {
        Listing::Items(items) => ListingView::Items(items.clone()),
        Listing::Raw(value) => ListingView::Raw(pretty(value)),
    }
}
