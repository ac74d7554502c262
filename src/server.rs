use std::sync::Arc;
use std::time::Duration;

use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::AppState;
use crate::backend::HttpChatBackend;
use crate::config::AppConfig;
use crate::dispatch::Dispatcher;
use crate::domain::DomainTag;
use crate::session::{ResultTab, SessionStore, ViewSession, ViewState};
use crate::ui;

type HandlerError = (StatusCode, String);

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    info!(
        name: "backend.config.loaded",
        base_url = %config.backend.base_url,
        timeout_secs = config.backend.timeout_secs,
        display_mode = config.ui.display_mode.as_str(),
        "Assistant backend configured"
    );

    let backend = HttpChatBackend::new(&config.backend.base_url, config.backend.timeout())?;
    let sessions = SessionStore::new();

    spawn_session_sweeper(
        sessions.clone(),
        Duration::from_secs(config.sessions.idle_timeout_secs),
        Duration::from_secs(config.sessions.sweep_interval_secs.max(1)),
    );

    let state = AppState {
        config: Arc::clone(&config),
        sessions,
        dispatcher: Dispatcher::new(Arc::new(backend)),
    };

    let app = router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config.ui.static_dir);

    Router::new()
        .route("/", get(index_handler))
        .route("/healthz", get(healthz))
        .route("/sessions/{id}", get(view_handler))
        .route("/sessions/{id}/domains/{domain}", post(select_domain))
        .route("/sessions/{id}/back", post(go_back))
        .route("/sessions/{id}/submit", post(submit_prompt))
        .route("/sessions/{id}/tabs/{tab}", post(select_tab))
        .route("/sessions/{id}/passed", post(toggle_passed))
        .route("/api/sessions/{id}", get(api_get_session))
        .nest_service("/static", static_dir)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn spawn_session_sweeper(sessions: SessionStore, idle_timeout: Duration, every: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let removed = sessions.cleanup_expired_with_timeout(idle_timeout);
            if removed > 0 {
                debug!(name: "session.swept", removed, remaining = sessions.len(), "Expired view sessions removed");
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!(name: "server.stopping", "Shutdown signal received");
}

// ─────────────────────────────────────────────────────────────────────────────
// HTML Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET / - Fresh view session on the landing screen.
async fn index_handler(State(state): State<AppState>) -> Html<String> {
    let session = state.sessions.create();
    debug!(name: "session.created", session_id = %session.id(), "View session created");
    Html(ui::render_document(
        &state.config.ui,
        session.id(),
        &session.snapshot(),
    ))
}

/// GET /sessions/:id - Current view.
async fn view_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Html<String>, HandlerError> {
    let session = find_session(&state, &id)?;
    let snapshot = session.snapshot();
    Ok(Html(if is_htmx(&headers) {
        ui::render_view(state.config.ui.display_mode, session.id(), &snapshot)
    } else {
        ui::render_document(&state.config.ui, session.id(), &snapshot)
    }))
}

/// POST /sessions/:id/domains/:domain - Enter the chat view.
async fn select_domain(
    State(state): State<AppState>,
    Path((id, domain)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Response, HandlerError> {
    let session = find_session(&state, &id)?;
    let domain: DomainTag = domain
        .parse()
        .map_err(|e: crate::domain::UnknownDomain| (StatusCode::NOT_FOUND, e.to_string()))?;

    session.select_domain(domain);
    info!(name: "session.domain.selected", session_id = %id, domain = %domain, "Domain selected");
    Ok(after_action(&state, &headers, &session))
}

/// POST /sessions/:id/back - Return to landing, dropping the chat.
async fn go_back(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, HandlerError> {
    let session = find_session(&state, &id)?;
    session.back();
    Ok(after_action(&state, &headers, &session))
}

#[derive(Debug, Deserialize)]
struct SubmitForm {
    #[serde(default)]
    prompt: String,
}

/// POST /sessions/:id/submit - Send the prompt and render what came back.
async fn submit_prompt(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Form(form): Form<SubmitForm>,
) -> Result<Response, HandlerError> {
    let session = find_session(&state, &id)?;

    match state.dispatcher.submit(&session, form.prompt).await {
        Ok(_) => Ok(after_action(&state, &headers, &session)),
        Err(rejected) => {
            debug!(name: "chat.dispatch.rejected", session_id = %id, reason = %rejected, "Submit rejected");
            Err((StatusCode::CONFLICT, rejected.to_string()))
        }
    }
}

/// POST /sessions/:id/tabs/:tab - Switch result tab.
async fn select_tab(
    State(state): State<AppState>,
    Path((id, tab)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Response, HandlerError> {
    let session = find_session(&state, &id)?;
    let tab = ResultTab::from_slug(&tab)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("unknown tab `{tab}`")))?;
    session.select_tab(tab);
    Ok(after_action(&state, &headers, &session))
}

#[derive(Debug, Deserialize)]
struct PassedForm {
    test_case_id: String,
}

/// POST /sessions/:id/passed - Toggle a test case's passed mark.
async fn toggle_passed(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Form(form): Form<PassedForm>,
) -> Result<Response, HandlerError> {
    let session = find_session(&state, &id)?;
    let passed = session.toggle_passed(&form.test_case_id).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            format!("no test case `{}` in the current result", form.test_case_id),
        )
    })?;
    info!(
        name: "session.test_case.marked",
        session_id = %id,
        test_case_id = %form.test_case_id,
        passed,
        "Test case mark toggled"
    );
    Ok(after_action(&state, &headers, &session))
}

// ─────────────────────────────────────────────────────────────────────────────
// JSON Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET /healthz - Liveness probe.
async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Session DTO for API responses.
#[derive(Debug, Serialize)]
struct SessionDto {
    id: String,
    created_at: String,
    state: ViewState,
}

/// GET /api/sessions/:id - Current view state as JSON.
async fn api_get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionDto>, StatusCode> {
    let session = state.sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(SessionDto {
        id: session.id().to_string(),
        created_at: session.created_at().to_rfc3339(),
        state: session.snapshot(),
    }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn find_session(state: &AppState, id: &str) -> Result<ViewSession, HandlerError> {
    state.sessions.get(id).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            "Session expired. Reload the page to start again.".to_string(),
        )
    })
}

fn is_htmx(headers: &HeaderMap) -> bool {
    headers.contains_key("hx-request")
}

/// HTMX gets the swapped fragment; plain form posts are redirected back to
/// the session page.
fn after_action(state: &AppState, headers: &HeaderMap, session: &ViewSession) -> Response {
    if is_htmx(headers) {
        Html(ui::render_view(
            state.config.ui.display_mode,
            session.id(),
            &session.snapshot(),
        ))
        .into_response()
    } else {
        Redirect::to(&format!("/sessions/{}", session.id())).into_response()
    }
}
