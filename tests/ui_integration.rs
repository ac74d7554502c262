//! End-to-end flows through the router with a scripted assistant.

use std::sync::{Arc, Mutex};

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use healthcare_assistant_ui::AppState;
use healthcare_assistant_ui::backend::{ChatBackend, ChatRequest, DispatchError};
use healthcare_assistant_ui::config::{
    AppConfig, BackendConfig, DisplayMode, LogConfig, LogFormat, ServerConfig, SessionConfig,
    UiConfig,
};
use healthcare_assistant_ui::dispatch::Dispatcher;
use healthcare_assistant_ui::domain::DomainTag;
use healthcare_assistant_ui::server::router;
use healthcare_assistant_ui::session::SessionStore;
use serde_json::{Value, json};

/// Replies keyed on the prompt text, recording every request.
#[derive(Default)]
struct ScriptedBackend {
    seen: Mutex<Vec<ChatRequest>>,
}

#[async_trait::async_trait]
impl ChatBackend for ScriptedBackend {
    async fn send(&self, request: &ChatRequest) -> Result<Value, DispatchError> {
        self.seen.lock().unwrap().push(request.clone());
        match request.prompt.as_str() {
            "offline" => Err(DispatchError::network("connection refused")),
            "boom" => Err(DispatchError::Server {
                status: 500,
                message: "upstream exploded".into(),
            }),
            "weird" => Ok(json!({"status": "ok"})),
            "cases" => Ok(json!({
                "test_cases": [{
                    "test_case_id": "TC1",
                    "title": "Bolus check",
                    "expected_result": "Delivers correct dose",
                    "steps": ["Program bolus", "Start delivery"]
                }]
            })),
            "iso" => Ok(json!({
                "iso_validation": [{
                    "test_case_id": "TC1",
                    "compliant": false,
                    "related_iso_refs": "IEC 62304 5.1",
                    "suggestions": "Add interlock"
                }]
            })),
            "bundle" => Ok(json!({
                "requirement": {"req_id": "REQ-7", "text": "Occlusion alarm within 5s"},
                "test_cases": [{"test_case_id": "TC9", "title": "Occlusion"}]
            })),
            _ => Ok(json!({"intent": "general", "answer": {"text": "Hello"}})),
        }
    }
}

struct Harness {
    server: TestServer,
    state: AppState,
    backend: Arc<ScriptedBackend>,
}

fn config(mode: DisplayMode) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            port: 0,
            host: "127.0.0.1".into(),
        },
        backend: BackendConfig {
            base_url: "http://127.0.0.1:9".into(),
            timeout_secs: 5,
        },
        ui: UiConfig {
            display_mode: mode,
            htmx_url: "/static/htmx.min.js".into(),
            static_dir: "static".into(),
        },
        sessions: SessionConfig {
            idle_timeout_secs: 60,
            sweep_interval_secs: 60,
        },
        log: LogConfig {
            format: LogFormat::Compact,
        },
    }
}

fn harness(mode: DisplayMode) -> Harness {
    let backend = Arc::new(ScriptedBackend::default());
    let state = AppState {
        config: Arc::new(config(mode)),
        sessions: SessionStore::new(),
        dispatcher: Dispatcher::new(backend.clone()),
    };
    let server = TestServer::new(router(state.clone())).expect("test server");
    Harness {
        server,
        state,
        backend,
    }
}

fn hx() -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("hx-request"),
        HeaderValue::from_static("true"),
    )
}

impl Harness {
    fn new_session(&self) -> String {
        self.state.sessions.create().id().to_string()
    }

    async fn post(&self, path: &str) -> axum_test::TestResponse {
        let (name, value) = hx();
        self.server.post(path).add_header(name, value).await
    }

    async fn enter(&self, id: &str, domain: DomainTag) -> String {
        let resp = self
            .post(&format!("/sessions/{id}/domains/{}", domain.slug()))
            .await;
        resp.assert_status_ok();
        resp.text()
    }

    async fn submit(&self, id: &str, prompt: &str) -> String {
        let (name, value) = hx();
        let resp = self
            .server
            .post(&format!("/sessions/{id}/submit"))
            .add_header(name, value)
            .form(&[("prompt", prompt)])
            .await;
        resp.assert_status_ok();
        resp.text()
    }
}

#[tokio::test]
async fn test_index_renders_landing_with_six_cards() {
    let h = harness(DisplayMode::Stacked);

    let resp = h.server.get("/").await;
    resp.assert_status_ok();
    let html = resp.text();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("data-screen=\"landing\""));
    assert!(html.contains("Geminator Testcase Generator (GTG)"));
    assert!(html.contains("Powered by Google Cloud"));
    assert!(!html.contains("Axum + Leptos"));
    assert_eq!(html.matches("class=\"card\"").count(), 6);
    for domain in DomainTag::ALL {
        assert!(html.contains(&format!("data-domain=\"{}\"", domain.slug())));
    }
    assert_eq!(h.state.sessions.len(), 1);
}

#[tokio::test]
async fn test_every_domain_opens_its_chat_and_back_clears_prompt() {
    let h = harness(DisplayMode::Stacked);
    let id = h.new_session();

    for domain in DomainTag::ALL {
        let html = h.enter(&id, domain).await;
        assert!(html.contains("data-screen=\"chat\""));
        assert!(html.contains(&domain.heading()));

        h.submit(&id, "remember me").await;
        let html = h.post(&format!("/sessions/{id}/back")).await.text();
        assert!(html.contains("data-screen=\"landing\""));
        assert!(!html.contains("remember me"));
    }

    // Re-entering starts from an empty prompt.
    let html = h.enter(&id, DomainTag::Insulin).await;
    assert!(!html.contains("remember me"));
    assert!(!html.contains("data-section="));
}

#[tokio::test]
async fn test_empty_prompt_is_posted() {
    let h = harness(DisplayMode::Stacked);
    let id = h.new_session();
    h.enter(&id, DomainTag::Samples).await;

    h.submit(&id, "").await;

    let seen = h.backend.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(serde_json::to_value(&seen[0]).unwrap(), json!({"prompt": ""}));
}

#[tokio::test]
async fn test_general_reply_shows_only_answer() {
    let h = harness(DisplayMode::Stacked);
    let id = h.new_session();
    h.enter(&id, DomainTag::Ventilator).await;

    let html = h.submit(&id, "Hi there").await;

    assert!(html.contains("data-section=\"answer\""));
    assert!(html.contains("Hello"));
    assert!(!html.contains("data-section=\"requirement\""));
    assert!(!html.contains("data-section=\"test_cases\""));
    assert!(!html.contains("data-section=\"iso_validation\""));
    assert!(html.contains("Hi there"));
    assert!(!html.contains("⏳"));
}

#[tokio::test]
async fn test_test_cases_render_and_can_be_marked_passed() {
    let h = harness(DisplayMode::Stacked);
    let id = h.new_session();
    h.enter(&id, DomainTag::Insulin).await;

    let html = h.submit(&id, "cases").await;
    assert!(html.contains("data-section=\"test_cases\""));
    assert!(html.contains("TC1"));
    assert!(html.contains("Bolus check"));
    assert!(html.contains("Delivers correct dose"));
    assert!(html.contains("Program bolus"));
    assert!(html.contains("data-passed=\"false\""));
    assert!(!html.contains("data-section=\"answer\""));

    let (name, value) = hx();
    let resp = h
        .server
        .post(&format!("/sessions/{id}/passed"))
        .add_header(name, value)
        .form(&[("test_case_id", "TC1")])
        .await;
    resp.assert_status_ok();
    let html = resp.text();
    assert!(html.contains("data-passed=\"true\""));
    assert!(html.contains("Passed ✔"));

    let (name, value) = hx();
    let resp = h
        .server
        .post(&format!("/sessions/{id}/passed"))
        .add_header(name, value)
        .form(&[("test_case_id", "TC404")])
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_iso_findings_show_verdict_and_suggestions() {
    let h = harness(DisplayMode::Stacked);
    let id = h.new_session();
    h.enter(&id, DomainTag::Iso).await;

    let html = h.submit(&id, "iso").await;

    assert!(html.contains("data-section=\"iso_validation\""));
    assert!(html.contains("Not Compliant"));
    assert!(html.contains("IEC 62304 5.1"));
    assert!(html.contains("Add interlock"));
}

#[tokio::test]
async fn test_network_failure_shows_banner_and_allows_retry() {
    let h = harness(DisplayMode::Stacked);
    let id = h.new_session();
    h.enter(&id, DomainTag::Cardio).await;

    let html = h.submit(&id, "offline").await;
    assert!(html.contains("role=\"alert\""));
    assert!(html.contains("data-error-kind=\"network\""));
    assert!(html.contains("connection refused"));
    assert!(!html.contains("⏳"));
    assert!(html.contains("Scan Me"));

    // Retry succeeds and replaces the banner.
    let html = h.submit(&id, "again").await;
    assert!(!html.contains("role=\"alert\""));
    assert!(html.contains("Hello"));
}

#[tokio::test]
async fn test_server_and_malformed_failures_are_distinguished() {
    let h = harness(DisplayMode::Stacked);
    let id = h.new_session();
    h.enter(&id, DomainTag::Ehr).await;

    let html = h.submit(&id, "boom").await;
    assert!(html.contains("data-error-kind=\"server\""));
    assert!(html.contains("HTTP 500: upstream exploded"));

    let html = h.submit(&id, "weird").await;
    assert!(html.contains("data-error-kind=\"malformed\""));
}

#[tokio::test]
async fn test_rendering_is_repeatable() {
    let h = harness(DisplayMode::Stacked);
    let id = h.new_session();
    h.enter(&id, DomainTag::Insulin).await;
    h.submit(&id, "bundle").await;

    let (name, value) = hx();
    let first = h
        .server
        .get(&format!("/sessions/{id}"))
        .add_header(name, value)
        .await
        .text();
    let (name, value) = hx();
    let second = h
        .server
        .get(&format!("/sessions/{id}"))
        .add_header(name, value)
        .await
        .text();

    assert_eq!(first, second);
    assert_eq!(h.backend.seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_tabbed_mode_switches_sections() {
    let h = harness(DisplayMode::Tabbed);
    let id = h.new_session();
    h.enter(&id, DomainTag::Insulin).await;

    let html = h.submit(&id, "bundle").await;
    assert!(html.contains("data-display-mode=\"tabbed\""));
    assert!(html.contains("data-section=\"requirement\""));
    assert!(html.contains("REQ-7"));
    assert!(!html.contains("data-section=\"test_cases\""));

    let html = h.post(&format!("/sessions/{id}/tabs/testcases")).await.text();
    assert!(html.contains("data-section=\"test_cases\""));
    assert!(html.contains("TC9"));
    assert!(!html.contains("data-section=\"requirement\""));

    let html = h.post(&format!("/sessions/{id}/tabs/iso")).await.text();
    assert!(html.contains("data-section=\"empty\""));

    h.post(&format!("/sessions/{id}/tabs/bogus"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_plain_form_posts_redirect_to_session_page() {
    let h = harness(DisplayMode::Stacked);
    let id = h.new_session();

    let resp = h.server.post(&format!("/sessions/{id}/domains/ehr")).await;
    resp.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(resp.header("location"), format!("/sessions/{id}"));

    let html = h.server.get(&format!("/sessions/{id}")).await.text();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("EHR/Clinical Software Assistant"));
}

#[tokio::test]
async fn test_submit_from_landing_conflicts() {
    let h = harness(DisplayMode::Stacked);
    let id = h.new_session();

    let (name, value) = hx();
    h.server
        .post(&format!("/sessions/{id}/submit"))
        .add_header(name, value)
        .form(&[("prompt", "hello")])
        .await
        .assert_status(StatusCode::CONFLICT);
    assert!(h.backend.seen.lock().unwrap().is_empty());

    let session = h.state.sessions.get(&id).unwrap();
    assert!(session.snapshot().prompt.is_empty());
}

#[tokio::test]
async fn test_unknown_session_and_domain_are_not_found() {
    let h = harness(DisplayMode::Stacked);

    h.server
        .get("/sessions/does-not-exist")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    h.post("/sessions/does-not-exist/back")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let id = h.new_session();
    h.post(&format!("/sessions/{id}/domains/dialysis"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_session_api_reports_state() {
    let h = harness(DisplayMode::Stacked);
    let id = h.new_session();
    h.enter(&id, DomainTag::Cardio).await;

    let resp = h.server.get(&format!("/api/sessions/{id}")).await;
    resp.assert_status_ok();
    let body: Value = resp.json();

    assert_eq!(body["id"], json!(id));
    assert_eq!(body["state"]["screen"], json!({"screen": "chat", "domain": "cardio"}));
    assert_eq!(body["state"]["submitting"], json!(false));

    h.server
        .get("/api/sessions/missing")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_healthz_and_static_assets() {
    let h = harness(DisplayMode::Stacked);

    let resp = h.server.get("/healthz").await;
    resp.assert_status_ok();
    resp.assert_json(&json!({"status": "ok"}));

    h.server.get("/static/app.css").await.assert_status_ok();
}
