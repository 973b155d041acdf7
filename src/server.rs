//! Axum router, page handlers and the HTMX fragment endpoints.

use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use leptos::prelude::*;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use tracing::{debug, info};

use crate::AppState;
use crate::backend::HttpBackend;
use crate::config::AppConfig;
use crate::session::{
    ChatController, ChatMessage, ControllerError, ReplyDelivery, SendOutcome, Session,
    SessionStore, ValidationOutcome,
};
use crate::ui::app::AppPage;
use crate::ui::chat::{EntryView, MessageView, PendingReplyView, ValidationView};
use crate::ui::render;

/// How often expired sessions are swept.
const SESSION_CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let backend = HttpBackend::new(&config.backend.base_url)?;
    info!(
        name: "backend.config.loaded",
        base_url = %backend.base_url(),
        "Report service configured"
    );

    let controller = Arc::new(ChatController::new(Arc::new(backend)));

    // Health check runs in the background; the page is usable either way.
    if config.backend.health_check {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move {
            controller.check_backend_health().await;
        });
    }

    // Session store
    let sessions = SessionStore::new();
    spawn_session_cleanup(sessions.clone());

    let state = AppState {
        sessions,
        controller,
        config: Arc::clone(&config),
    };

    let app = build_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let static_dir = state.config.ui.static_dir.clone();

    Router::new()
        // HTML pages
        .route("/", get(index_handler))
        .route("/sessions/{session_id}", get(session_page_handler))
        // HTMX fragment endpoints
        .route("/ui/sessions/{session_id}/messages", post(send_message))
        .route(
            "/ui/sessions/{session_id}/replies/{reply_id}",
            post(fetch_reply),
        )
        .route(
            "/ui/sessions/{session_id}/reports/{report_id}/validate",
            post(validate_report),
        )
        .route(
            "/ui/sessions/{session_id}/reports/{report_id}/download",
            post(download_report),
        )
        .route(
            "/ui/sessions/{session_id}/reports/{report_id}/details",
            post(view_report_details),
        )
        .route("/health", get(health))
        // Static assets
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn spawn_session_cleanup(sessions: SessionStore) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SESSION_CLEANUP_INTERVAL);
        loop {
            ticker.tick().await;
            let removed = sessions.cleanup_expired();
            if removed > 0 {
                debug!(
                    name: "session.cleanup",
                    removed,
                    remaining = sessions.len(),
                    "Expired sessions removed"
                );
            }
        }
    });
}

// ─────────────────────────────────────────────────────────────────────────────
// Page Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET / - Open a new chat session.
async fn index_handler(State(state): State<AppState>) -> Html<String> {
    let session = state.sessions.create();
    info!(
        name: "session.created",
        session_id = %session.id(),
        "Chat session created"
    );
    render_page(&state, &session)
}

/// GET /sessions/{session_id} - Re-render an existing session.
async fn session_page_handler(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Html<String>, (StatusCode, String)> {
    let session = find_session(&state, &session_id)?;
    debug!(
        session_id = %session.id(),
        created_at = %session.created_at(),
        entries = session.entry_count(),
        "Session page re-rendered"
    );
    Ok(render_page(&state, &session))
}

fn render_page(state: &AppState, session: &Session) -> Html<String> {
    let title = state.config.ui.title.clone();
    let session = session.clone();
    Html(render(move || view! { <AppPage title=title session=session /> }))
}

fn render_message(message: ChatMessage) -> Html<String> {
    Html(render(move || view! { <MessageView message=message /> }))
}

// ─────────────────────────────────────────────────────────────────────────────
// HTMX Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Form body posted by the message input.
#[derive(Debug, Deserialize)]
struct MessageForm {
    /// Absent when the input was disabled at submit time.
    #[serde(default)]
    message: String,
}

/// POST /ui/sessions/{session_id}/messages - Send a chat message.
///
/// Answers right away with the user's message and a placeholder that
/// fetches the reply.
async fn send_message(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Form(form): Form<MessageForm>,
) -> Result<Response, (StatusCode, String)> {
    let session = find_session(&state, &session_id)?;

    match state.controller.send_message(&session, &form.message) {
        SendOutcome::Ignored => Ok(StatusCode::NO_CONTENT.into_response()),
        SendOutcome::Pending { message, reply } => {
            let session_id = session.id().to_string();
            let html = render(move || {
                view! {
                    <MessageView message=message />
                    <PendingReplyView session_id=session_id reply=reply />
                }
            });
            Ok(Html(html).into_response())
        }
    }
}

/// POST /ui/sessions/{session_id}/replies/{reply_id} - Fetch the bot reply.
async fn fetch_reply(
    State(state): State<AppState>,
    Path((session_id, reply_id)): Path<(String, String)>,
) -> Result<Response, (StatusCode, String)> {
    let session = find_session(&state, &session_id)?;

    match state.controller.fetch_reply(&session, &reply_id).await {
        ReplyDelivery::Ignored => Ok(StatusCode::NO_CONTENT.into_response()),
        ReplyDelivery::Delivered(entry) => {
            let session_id = session.id().to_string();
            let html = render(move || view! { <EntryView session_id=session_id entry=entry /> });
            Ok(Html(html).into_response())
        }
    }
}

/// POST /ui/sessions/{session_id}/reports/{report_id}/validate
async fn validate_report(
    State(state): State<AppState>,
    Path((session_id, report_id)): Path<(String, String)>,
) -> Result<Response, (StatusCode, String)> {
    let session = find_session(&state, &session_id)?;

    let outcome = state
        .controller
        .validate_report(&session, &report_id)
        .await
        .map_err(controller_error)?;

    Ok(match outcome {
        ValidationOutcome::Ignored => StatusCode::NO_CONTENT.into_response(),
        ValidationOutcome::Displayed { result, .. } => {
            Html(render(move || view! { <ValidationView result=result /> })).into_response()
        }
        // The button targets the report's slot; error messages belong in
        // the transcript instead.
        ValidationOutcome::Failed(message) => (
            [("HX-Retarget", "#chat-messages"), ("HX-Reswap", "beforeend")],
            render_message(message),
        )
            .into_response(),
    })
}

/// POST /ui/sessions/{session_id}/reports/{report_id}/download
async fn download_report(
    State(state): State<AppState>,
    Path((session_id, report_id)): Path<(String, String)>,
) -> Result<Html<String>, (StatusCode, String)> {
    let session = find_session(&state, &session_id)?;
    let message = state
        .controller
        .download_report(&session, &report_id)
        .map_err(controller_error)?;
    Ok(render_message(message))
}

/// POST /ui/sessions/{session_id}/reports/{report_id}/details
async fn view_report_details(
    State(state): State<AppState>,
    Path((session_id, report_id)): Path<(String, String)>,
) -> Result<Html<String>, (StatusCode, String)> {
    let session = find_session(&state, &session_id)?;
    let message = state
        .controller
        .view_report_details(&session, &report_id)
        .map_err(controller_error)?;
    Ok(render_message(message))
}

/// GET /health - Liveness of the UI server itself.
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy", "service": "chat-ui" }))
}

fn find_session(state: &AppState, session_id: &str) -> Result<Session, (StatusCode, String)> {
    state
        .sessions
        .get(session_id)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Unknown session: {session_id}")))
}

fn controller_error(err: ControllerError) -> (StatusCode, String) {
    match err {
        ControllerError::UnknownReport(_) => (StatusCode::NOT_FOUND, err.to_string()),
    }
}
