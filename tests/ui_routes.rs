//! HTMX routes end to end, with a scripted backend behind the controller.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use sustain_chat::AppState;
use sustain_chat::backend::{
    BackendError, ChatBackend, ChatReply, ValidationRequest, ValidationResult,
};
use sustain_chat::config::{AppConfig, BackendConfig, ServerConfig, UiConfig};
use sustain_chat::server::build_router;
use sustain_chat::session::{
    CONNECTION_ERROR_MESSAGE, ChatController, DETAILS_PLACEHOLDER_MESSAGE,
    DOWNLOAD_PLACEHOLDER_MESSAGE, Entry, PROCESSING_ERROR_MESSAGE, Session, SessionStore,
    VALIDATION_ERROR_MESSAGE,
};

#[derive(Debug, Default)]
struct FakeBackend {
    chat_replies: Mutex<VecDeque<Result<ChatReply, BackendError>>>,
    validations: Mutex<VecDeque<Result<ValidationResult, BackendError>>>,
    chat_calls: AtomicUsize,
    validate_calls: AtomicUsize,
}

impl FakeBackend {
    fn reply(self, reply: Value) -> Self {
        let reply = serde_json::from_value(reply).expect("valid chat reply");
        self.chat_replies.lock().unwrap().push_back(Ok(reply));
        self
    }

    fn chat_failure(self) -> Self {
        self.chat_replies
            .lock()
            .unwrap()
            .push_back(Err(BackendError::Status(reqwest::StatusCode::BAD_GATEWAY)));
        self
    }

    fn validation(self, result: Value) -> Self {
        let result = serde_json::from_value(result).expect("valid validation result");
        self.validations.lock().unwrap().push_back(Ok(result));
        self
    }

    fn validation_failure(self) -> Self {
        self.validations
            .lock()
            .unwrap()
            .push_back(Err(BackendError::Status(
                reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            )));
        self
    }
}

#[async_trait]
impl ChatBackend for FakeBackend {
    async fn chat(&self, _message: &str) -> Result<ChatReply, BackendError> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        self.chat_replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected chat call")
    }

    async fn validate_report(
        &self,
        _request: &ValidationRequest,
    ) -> Result<ValidationResult, BackendError> {
        self.validate_calls.fetch_add(1, Ordering::SeqCst);
        self.validations
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected validation call")
    }

    async fn health(&self) -> Result<(), BackendError> {
        Ok(())
    }
}

struct Harness {
    server: TestServer,
    sessions: SessionStore,
    session: Session,
    backend: Arc<FakeBackend>,
}

fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            port: 0,
            host: "127.0.0.1".into(),
        },
        backend: BackendConfig {
            base_url: "http://localhost:5122".into(),
            health_check: false,
        },
        ui: UiConfig {
            title: "Sustainability Assistant".into(),
            static_dir: "static".into(),
        },
    }
}

fn harness(backend: FakeBackend) -> Harness {
    let backend = Arc::new(backend);
    let sessions = SessionStore::new();
    let session = sessions.create();
    let state = AppState {
        sessions: sessions.clone(),
        controller: Arc::new(ChatController::new(Arc::clone(&backend) as Arc<dyn ChatBackend>)),
        config: Arc::new(test_config()),
    };
    Harness {
        server: TestServer::new(build_router(state)).unwrap(),
        sessions,
        session,
        backend,
    }
}

impl Harness {
    fn messages_path(&self) -> String {
        format!("/ui/sessions/{}/messages", self.session.id())
    }

    fn reply_path(&self, reply_id: &str) -> String {
        format!("/ui/sessions/{}/replies/{reply_id}", self.session.id())
    }

    /// Submit `message`, then fetch its reply the way the placeholder does.
    ///
    /// Returns both fragments.
    async fn exchange(&self, message: &str) -> (String, String) {
        let sent = self
            .server
            .post(&self.messages_path())
            .form(&[("message", message)])
            .await;
        sent.assert_status_ok();

        let reply_id = self.session.pending_reply().expect("reply pending").id;
        let reply = self.server.post(&self.reply_path(&reply_id)).await;
        reply.assert_status_ok();

        (sent.text(), reply.text())
    }

    fn report_path(&self, report_id: &str, action: &str) -> String {
        format!(
            "/ui/sessions/{}/reports/{report_id}/{action}",
            self.session.id()
        )
    }

    fn only_report_id(&self) -> String {
        let ids: Vec<String> = self
            .session
            .entries()
            .into_iter()
            .filter_map(|entry| match entry {
                Entry::Report(report) => Some(report.id),
                Entry::Message(_) => None,
            })
            .collect();
        assert_eq!(ids.len(), 1);
        ids[0].clone()
    }
}

fn report_reply() -> Value {
    json!({
        "status": "success",
        "type": "report",
        "message": "Energy use is trending down.",
        "report_data": {
            "summary": {
                "sustainability_score": 78,
                "data_points_analyzed": 120,
                "key_recommendations": ["Install LED lighting", "Audit HVAC schedules"]
            },
            "generated_at": "2024-05-01T10:00:00"
        }
    })
}

#[tokio::test]
async fn test_index_creates_session() {
    let h = harness(FakeBackend::default());

    let response = h.server.get("/").await;
    response.assert_status_ok();

    let html = response.text();
    assert!(html.to_ascii_lowercase().starts_with("<!doctype html>"));
    assert!(html.contains("<title>Sustainability Assistant</title>"));
    assert!(html.contains(r#"id="chat-form""#));
    // The harness session plus the one just opened
    assert_eq!(h.sessions.len(), 2);
}

#[tokio::test]
async fn test_empty_input_is_ignored() {
    let h = harness(FakeBackend::default());

    for input in ["", "   ", "\n\t "] {
        let response = h
            .server
            .post(&h.messages_path())
            .form(&[("message", input)])
            .await;
        response.assert_status(StatusCode::NO_CONTENT);
    }

    assert_eq!(h.backend.chat_calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.session.entry_count(), 0);
}

#[tokio::test]
async fn test_message_text_is_escaped() {
    let h = harness(FakeBackend::default().reply(json!({
        "status": "success",
        "message": "<img src=x onerror=alert(1)>"
    })));

    let (sent, reply) = h.exchange("<script>alert('x')</script>").await;

    assert!(!sent.contains("<script>"));
    assert!(sent.contains("&lt;script&gt;alert('x')&lt;/script&gt;"));
    assert!(!reply.contains("<img"));
    assert!(reply.contains("&lt;img src=x onerror=alert(1)&gt;"));
}

#[tokio::test]
async fn test_user_message_is_shown_before_backend_call() {
    let h = harness(FakeBackend::default().reply(json!({
        "status": "success",
        "message": "Your water usage is below average."
    })));

    let sent = h
        .server
        .post(&h.messages_path())
        .form(&[("message", "  How is my water usage?  ")])
        .await;
    sent.assert_status_ok();
    let sent = sent.text();

    // The user's bubble comes back while the backend has not been asked yet
    assert_eq!(h.backend.chat_calls.load(Ordering::SeqCst), 0);
    assert_eq!(sent.matches("message user-message").count(), 1);
    assert_eq!(sent.matches("message bot-message").count(), 0);
    assert!(sent.contains("How is my water usage?"));
    let reply_id = h.session.pending_reply().expect("reply pending").id;
    assert!(sent.contains(&format!(r#"hx-post="{}""#, h.reply_path(&reply_id))));
    assert!(sent.contains(r#"hx-trigger="load""#));
    assert!(h.session.input_state().busy);
    assert!(!h.session.input_state().enabled);

    // Input stays locked until the reply is in
    h.server
        .post(&h.messages_path())
        .form(&[("message", "another")])
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert_eq!(h.session.entry_count(), 1);

    let reply = h.server.post(&h.reply_path(&reply_id)).await;
    reply.assert_status_ok();
    assert!(reply.text().contains("Your water usage is below average."));
    assert_eq!(h.backend.chat_calls.load(Ordering::SeqCst), 1);
    assert!(h.session.input_state().enabled);

    // A replayed placeholder request does not reach the backend again
    h.server
        .post(&h.reply_path(&reply_id))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert_eq!(h.backend.chat_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_text_reply_appends_user_and_bot_messages() {
    let h = harness(FakeBackend::default().reply(json!({
        "status": "success",
        "message": "Your water usage is below average."
    })));

    let (sent, reply) = h.exchange("How is my water usage?").await;

    assert_eq!(sent.matches("message user-message").count(), 1);
    assert_eq!(reply.matches("message bot-message").count(), 1);
    assert!(reply.contains("Your water usage is below average."));
    assert!(!reply.contains("report-message"));
    assert!(!reply.contains("pending-reply"));
    assert_eq!(h.session.entry_count(), 2);
    assert!(h.session.input_state().enabled);
}

#[tokio::test]
async fn test_report_reply_renders_one_block_and_one_button_set() {
    let h = harness(FakeBackend::default().reply(report_reply()));

    let (_, html) = h.exchange("Generate a report").await;

    assert_eq!(html.matches("report-message").count(), 1);
    assert_eq!(html.matches("download-btn").count(), 1);
    assert_eq!(html.matches("details-btn").count(), 1);
    assert_eq!(html.matches("validate-btn").count(), 1);
    assert!(html.contains("78/100"));
    assert!(html.contains("120 data points analyzed"));
    assert!(html.contains("<li>Install LED lighting</li>"));
    assert!(html.contains("Energy use is trending down."));

    let report_id = h.only_report_id();
    assert!(html.contains(&format!(r#"id="validation-{report_id}""#)));
}

#[tokio::test]
async fn test_non_success_status_shows_processing_error() {
    let h = harness(FakeBackend::default().reply(json!({
        "status": "error",
        "message": "internal details"
    })));

    let (_, html) = h.exchange("hello").await;

    assert_eq!(html.matches("message bot-message").count(), 1);
    assert!(html.contains(PROCESSING_ERROR_MESSAGE));
    assert!(!html.contains("internal details"));
    assert!(h.session.input_state().enabled);
}

#[tokio::test]
async fn test_transport_failure_shows_connection_error() {
    let h = harness(FakeBackend::default().chat_failure());

    let (_, html) = h.exchange("hello").await;

    assert_eq!(html.matches("message bot-message").count(), 1);
    assert!(html.contains(CONNECTION_ERROR_MESSAGE));
    assert!(h.session.input_state().enabled);
    assert!(!h.session.input_state().busy);
}

#[tokio::test]
async fn test_validating_twice_replaces_result() {
    let h = harness(
        FakeBackend::default()
            .reply(report_reply())
            .validation(json!({
                "overall_accuracy": 95,
                "total_facts": 4,
                "verified_facts": ["Score matches records"]
            }))
            .validation(json!({
                "overall_accuracy": 50,
                "total_facts": 6,
                "discrepancies": [{
                    "issue": "Energy mismatch",
                    "reported_value": "1200 kWh",
                    "actual_value": 1100
                }]
            })),
    );

    h.exchange("Generate a report").await;
    let report_id = h.only_report_id();

    let first = h.server.post(&h.report_path(&report_id, "validate")).await;
    first.assert_status_ok();
    let first = first.text();
    assert!(first.contains("Fact Validation Results"));
    assert!(first.contains(r#"<span class="text-success">95%</span>"#));
    assert!(first.contains("Facts Checked: 4"));

    let second = h.server.post(&h.report_path(&report_id, "validate")).await;
    second.assert_status_ok();
    let second = second.text();
    assert!(second.contains(r#"<span class="text-danger">50%</span>"#));
    assert!(second.contains("Energy mismatch (Reported: 1200 kWh, Actual: 1100)"));

    // Reloading the page shows only the latest result
    let page = h
        .server
        .get(&format!("/sessions/{}", h.session.id()))
        .await
        .text();
    assert_eq!(page.matches("Fact Validation Results").count(), 1);
    assert!(page.contains("Facts Checked: 6"));
    assert!(!page.contains("Facts Checked: 4"));
    assert_eq!(h.backend.validate_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_validation_failure_retargets_transcript() {
    let h = harness(
        FakeBackend::default()
            .reply(report_reply())
            .validation_failure(),
    );

    h.exchange("Generate a report").await;
    let report_id = h.only_report_id();

    let response = h.server.post(&h.report_path(&report_id, "validate")).await;
    response.assert_status_ok();
    assert_eq!(response.header("HX-Retarget"), "#chat-messages");
    assert_eq!(response.header("HX-Reswap"), "beforeend");
    assert!(response.text().contains(VALIDATION_ERROR_MESSAGE));

    let validating = h.session.is_validating(&report_id);
    assert!(!validating, "validate control is restored");
}

#[tokio::test]
async fn test_placeholder_actions() {
    let h = harness(FakeBackend::default().reply(report_reply()));

    h.exchange("Generate a report").await;
    let report_id = h.only_report_id();

    let download = h.server.post(&h.report_path(&report_id, "download")).await;
    download.assert_status_ok();
    assert!(download.text().contains(DOWNLOAD_PLACEHOLDER_MESSAGE));

    let details = h.server.post(&h.report_path(&report_id, "details")).await;
    details.assert_status_ok();
    assert!(details.text().contains(DETAILS_PLACEHOLDER_MESSAGE));

    // user, report, two placeholders
    assert_eq!(h.session.entry_count(), 4);
    assert_eq!(h.backend.chat_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unknown_ids_return_not_found() {
    let h = harness(FakeBackend::default());

    h.server
        .get("/sessions/does-not-exist")
        .await
        .assert_status_not_found();
    h.server
        .post("/ui/sessions/does-not-exist/messages")
        .form(&[("message", "hello")])
        .await
        .assert_status_not_found();
    h.server
        .post("/ui/sessions/does-not-exist/replies/any")
        .await
        .assert_status_not_found();
    h.server
        .post(&h.report_path("missing-report", "validate"))
        .await
        .assert_status_not_found();
    h.server
        .post(&h.report_path("missing-report", "download"))
        .await
        .assert_status_not_found();

    assert_eq!(h.backend.validate_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_health_endpoint() {
    let h = harness(FakeBackend::default());

    let response = h.server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "status": "healthy", "service": "chat-ui" })
    );
}
