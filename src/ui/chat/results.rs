//! Result area: tabs, sections, error banner.

use leptos::prelude::*;

use super::ErrorBannerView;
use crate::reply::IsoFinding;
use crate::ui::components::{
    Badge, BadgeVariant, Button, ButtonSize, ButtonVariant, Card, CardContent, CardHeader,
};
use crate::ui::model::{EMPTY_SECTION, ListingView, ResultPanel, Section, TabButton, TestCaseRow};
use crate::ui::session_action;

#[component]
pub fn ResultsView(session_id: String, panel: ResultPanel) -> impl IntoView {
    let ResultPanel {
        mode,
        tabs,
        sections,
        error,
    } = panel;

    let banner = error.map(|banner| view! { <ErrorBannerView banner=banner /> });
    let tab_bar = (!tabs.is_empty()).then(|| {
        let buttons = tabs
            .into_iter()
            .map(|tab| view! { <TabSelector session_id=session_id.clone() tab=tab /> })
            .collect_view();
        view! { <nav class="tabs" role="tablist">{buttons}</nav> }
    });
    let body = sections
        .into_iter()
        .map(|section| section_view(&session_id, section))
        .collect_view();

    view! {
        <div class="results" data-display-mode=mode.as_str()>
            {banner}
            {tab_bar}
            {body}
        </div>
    }
}

#[component]
fn TabSelector(session_id: String, tab: TabButton) -> impl IntoView {
    let action = session_action(&session_id, &format!("tabs/{}", tab.tab.slug()));
    let variant = if tab.active {
        ButtonVariant::TabActive
    } else {
        ButtonVariant::Tab
    };

    view! {
        <form
            class="tab-form"
            method="post"
            action=action.clone()
            hx-post=action
            hx-target="#view"
            hx-swap="outerHTML"
            data-tab=tab.tab.slug()
            data-active=tab.active.to_string()
        >
            <Button variant=variant size=ButtonSize::Sm>
                {tab.tab.label()}
            </Button>
        </form>
    }
}

fn section_view(session_id: &str, section: Section) -> AnyView {
    match section {
        Section::Answer { text } => view! {
            <Card section="answer">
                <CardHeader title="💡 Answer" />
                <CardContent>
                    <p class="answer-text">{text}</p>
                </CardContent>
            </Card>
        }
        .into_any(),
        Section::Requirement { json } => view! {
            <Card section="requirement">
                <CardHeader title="📌 Requirement" />
                <CardContent>
                    <pre class="json">{json}</pre>
                </CardContent>
            </Card>
        }
        .into_any(),
        Section::TestCases(listing) => {
            let content = match listing {
                ListingView::Items(rows) if rows.is_empty() => {
                    view! { <p class="empty">"No test cases returned."</p> }.into_any()
                }
                ListingView::Items(rows) => {
                    let items = rows
                        .into_iter()
                        .map(|row| view! { <TestCaseItem session_id=session_id.to_string() row=row /> })
                        .collect_view();
                    view! { <ul class="test-cases">{items}</ul> }.into_any()
                }
                ListingView::Raw(json) => view! { <pre class="json">{json}</pre> }.into_any(),
            };
            view! {
                <Card section="test_cases">
                    <CardHeader title="🧪 Test Cases" />
                    <CardContent>{content}</CardContent>
                </Card>
            }
            .into_any()
        }
        Section::Iso(listing) => {
            let content = match listing {
                ListingView::Items(findings) if findings.is_empty() => {
                    view! { <p class="empty">"No ISO findings returned."</p> }.into_any()
                }
                ListingView::Items(findings) => {
                    let items = findings
                        .into_iter()
                        .map(|finding| view! { <IsoFindingItem finding=finding /> })
                        .collect_view();
                    view! { <ul class="iso-findings">{items}</ul> }.into_any()
                }
                ListingView::Raw(json) => view! { <pre class="json">{json}</pre> }.into_any(),
            };
            view! {
                <Card section="iso_validation">
                    <CardHeader title="✅ ISO Validation" />
                    <CardContent>{content}</CardContent>
                </Card>
            }
            .into_any()
        }
        Section::Empty { tab } => view! {
            <div class="card-panel" data-section="empty" data-tab=tab.slug()>
                <p class="empty">{EMPTY_SECTION}</p>
            </div>
        }
        .into_any(),
    }
}

#[component]
fn TestCaseItem(session_id: String, row: TestCaseRow) -> impl IntoView {
    let TestCaseRow { case, passed } = row;
    let test_case_id = case.test_case_id;
    let action = session_action(&session_id, "passed");
    let mark_label = if passed { "Passed ✔" } else { "✔ Mark as Passed" };
    let mark_variant = if passed {
        ButtonVariant::Secondary
    } else {
        ButtonVariant::Primary
    };

    let preconditions = (!case.preconditions.is_empty()).then(|| {
        let items = case
            .preconditions
            .iter()
            .map(|p| view! { <li>{p.clone()}</li> })
            .collect_view();
        view! {
            <div class="preconditions">
                <span class="label">"Preconditions"</span>
                <ul>{items}</ul>
            </div>
        }
    });
    let steps = (!case.steps.is_empty()).then(|| {
        let items = case
            .steps
            .iter()
            .map(|s| view! { <li>{s.clone()}</li> })
            .collect_view();
        view! {
            <div class="steps">
                <span class="label">"Steps"</span>
                <ol>{items}</ol>
            </div>
        }
    });
    let passed_badge = passed.then(|| view! { <Badge variant=BadgeVariant::Passed>"Passed"</Badge> });

    view! {
        <li class="test-case" data-test-case-id=test_case_id.clone() data-passed=passed.to_string()>
            <b>{test_case_id.clone()}":"</b>
            " "
            {case.title}
            {passed_badge}
            <br />
            <small class="expected">{case.expected_result}</small>
            {preconditions}
            {steps}
            <form
                class="mark-form"
                method="post"
                action=action.clone()
                hx-post=action
                hx-target="#view"
                hx-swap="outerHTML"
            >
                <input type="hidden" name="test_case_id" value=test_case_id.clone() />
                <Button variant=mark_variant size=ButtonSize::Sm>
                    {mark_label}
                </Button>
            </form>
        </li>
    }
}

#[component]
fn IsoFindingItem(finding: IsoFinding) -> impl IntoView {
    let verdict = finding.verdict();
    let variant = BadgeVariant::for_compliance(finding.compliant);
    let missing = (!finding.missing_elements.is_empty()).then(|| {
        let missing = finding.missing_elements.clone();
        view! { <p class="missing">"Missing: " {missing}</p> }
    });
    let req = (!finding.req_id.is_empty()).then(|| {
        let req_id = finding.req_id.clone();
        view! { <small class="req-id">"Requirement " {req_id}</small> }
    });

    view! {
        <li class="iso-finding" data-compliant=finding.compliant.to_string()>
            <b>{finding.test_case_id}</b>
            " – "
            <Badge variant=variant>{verdict}</Badge>
            {req}
            <br />
            <small class="iso-refs">{finding.related_iso_refs}</small>
            <br />
            <i class="suggestions">{finding.suggestions}</i>
            {missing}
        </li>
    }
}
