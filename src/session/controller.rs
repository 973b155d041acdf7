//! Chat session controller.
//!
//! Every user action maps to exactly one backend request attempt. Whatever
//! the outcome, the session returns to an interactive state: the input and
//! validate guards restore it when they drop, including on early return or
//! when the request future is cancelled.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::backend::{ChatBackend, ReplyOutcome, ValidationRequest, ValidationResult};

use super::thread::{ChatMessage, Entry, PendingReply, ReportEntry, Session};

/// Shown when the backend answers without `status: "success"`.
pub const PROCESSING_ERROR_MESSAGE: &str =
    "Sorry, I encountered an error processing your request.";

/// Shown when the backend cannot be reached or answers with a non-2xx status.
pub const CONNECTION_ERROR_MESSAGE: &str = "Sorry, I'm having trouble connecting to the server. Please make sure the backend service is running.";

/// Shown when a validation request fails.
pub const VALIDATION_ERROR_MESSAGE: &str =
    "Sorry, I encountered an error while validating the report.";

pub const DOWNLOAD_PLACEHOLDER_MESSAGE: &str = "Download feature is not yet implemented.";

pub const DETAILS_PLACEHOLDER_MESSAGE: &str =
    "Detailed data view feature is not yet implemented.";

/// Errors surfaced by controller actions addressed at a specific report.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// No report with this identifier exists in the session.
    #[error("Report not found: {0}")]
    UnknownReport(String),
}

/// Result of [`ChatController::send_message`].
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Empty input, or a reply still pending: nothing happened.
    Ignored,
    /// The user message was appended; its reply is fetched separately.
    Pending {
        message: ChatMessage,
        reply: PendingReply,
    },
}

/// Result of [`ChatController::fetch_reply`].
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyDelivery {
    /// No pending reply with that identifier, or it was already requested.
    Ignored,
    /// The reply entry appended to the transcript.
    Delivered(Entry),
}

/// Result of [`ChatController::validate_report`].
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// A validation for this report is already in flight.
    Ignored,
    /// The result now shown on the report, replacing any previous one.
    Displayed {
        report_id: String,
        result: ValidationResult,
    },
    /// The request failed; this message was appended to the transcript.
    Failed(ChatMessage),
}

/// Drives a chat session against a [`ChatBackend`].
#[derive(Debug, Clone)]
pub struct ChatController {
    backend: Arc<dyn ChatBackend>,
}

impl ChatController {
    #[must_use]
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    /// Append the user's input to the transcript and mark a reply pending.
    ///
    /// Input is trimmed; empty input appends nothing. No backend request is
    /// made here, see [`ChatController::fetch_reply`].
    pub fn send_message(&self, session: &Session, input: &str) -> SendOutcome {
        let message = input.trim();
        if message.is_empty() {
            return SendOutcome::Ignored;
        }

        let Some(reply) = session.try_begin_send(message) else {
            debug!(session_id = %session.id(), "Send ignored, reply still pending");
            return SendOutcome::Ignored;
        };

        let user = ChatMessage::user(message);
        session.push(Entry::Message(user.clone()));

        info!(
            name: "chat.message.sent",
            session_id = %session.id(),
            reply_id = %reply.id,
            message_length = message.len(),
            "Chat message queued"
        );

        SendOutcome::Pending {
            message: user,
            reply,
        }
    }

    /// Forward a pending message to the backend and append its reply.
    ///
    /// Exactly one request is made per pending reply. The input is enabled
    /// again afterwards, whatever the outcome.
    pub async fn fetch_reply(&self, session: &Session, reply_id: &str) -> ReplyDelivery {
        let Some(input) = session.claim_reply(reply_id) else {
            debug!(session_id = %session.id(), reply_id = %reply_id, "No pending reply to fetch");
            return ReplyDelivery::Ignored;
        };

        let reply = match self.backend.chat(input.message()).await {
            Ok(reply) => {
                let status = reply.status.clone();
                match reply.into_outcome() {
                    ReplyOutcome::Text(text) => {
                        info!(name: "chat.reply.received", session_id = %session.id(), "Received text reply");
                        Entry::Message(ChatMessage::bot(text))
                    }
                    ReplyOutcome::Report { message, report } => {
                        let entry = ReportEntry::new(message, report);
                        info!(
                            name: "chat.report.received",
                            session_id = %session.id(),
                            report_id = %entry.id,
                            generated_at = ?entry.report.generated_at,
                            "Received report reply"
                        );
                        Entry::Report(entry)
                    }
                    ReplyOutcome::Failed => {
                        warn!(
                            name: "chat.reply.failed",
                            session_id = %session.id(),
                            status = %status,
                            "Backend did not report success"
                        );
                        Entry::Message(ChatMessage::bot(PROCESSING_ERROR_MESSAGE))
                    }
                }
            }
            Err(e) => {
                error!(
                    name: "chat.request.failed",
                    session_id = %session.id(),
                    error = %e,
                    "Chat request failed"
                );
                Entry::Message(ChatMessage::bot(CONNECTION_ERROR_MESSAGE))
            }
        };

        session.push(reply.clone());
        drop(input);
        ReplyDelivery::Delivered(reply)
    }

    /// Fact-check a rendered report and attach the result to it.
    pub async fn validate_report(
        &self,
        session: &Session,
        report_id: &str,
    ) -> Result<ValidationOutcome, ControllerError> {
        let entry = session
            .report(report_id)
            .ok_or_else(|| ControllerError::UnknownReport(report_id.to_string()))?;

        let Some(_validating) = session.try_begin_validation(report_id) else {
            debug!(report_id = %report_id, "Validation already in flight");
            return Ok(ValidationOutcome::Ignored);
        };

        let request = ValidationRequest {
            report_text: entry.message.text,
            report_data: entry.report,
        };

        match self.backend.validate_report(&request).await {
            Ok(result) => {
                info!(
                    name: "report.validation.received",
                    session_id = %session.id(),
                    report_id = %report_id,
                    accuracy = result.overall_accuracy,
                    total_facts = result.total_facts,
                    discrepancies = result.discrepancies.len(),
                    "Report validated"
                );
                if !session.attach_validation(report_id, result.clone()) {
                    return Err(ControllerError::UnknownReport(report_id.to_string()));
                }
                Ok(ValidationOutcome::Displayed {
                    report_id: report_id.to_string(),
                    result,
                })
            }
            Err(e) => {
                error!(
                    name: "report.validation.failed",
                    session_id = %session.id(),
                    report_id = %report_id,
                    error = %e,
                    "Validation request failed"
                );
                let message = ChatMessage::bot(VALIDATION_ERROR_MESSAGE);
                session.push(Entry::Message(message.clone()));
                Ok(ValidationOutcome::Failed(message))
            }
        }
    }

    /// Placeholder for report downloads.
    pub fn download_report(
        &self,
        session: &Session,
        report_id: &str,
    ) -> Result<ChatMessage, ControllerError> {
        self.placeholder(session, report_id, DOWNLOAD_PLACEHOLDER_MESSAGE)
    }

    /// Placeholder for the detailed data view.
    pub fn view_report_details(
        &self,
        session: &Session,
        report_id: &str,
    ) -> Result<ChatMessage, ControllerError> {
        self.placeholder(session, report_id, DETAILS_PLACEHOLDER_MESSAGE)
    }

    fn placeholder(
        &self,
        session: &Session,
        report_id: &str,
        text: &str,
    ) -> Result<ChatMessage, ControllerError> {
        let entry = session
            .report(report_id)
            .ok_or_else(|| ControllerError::UnknownReport(report_id.to_string()))?;

        debug!(
            report_id = %report_id,
            generated_at = ?entry.report.generated_at,
            "Report action not implemented"
        );

        let message = ChatMessage::bot(text);
        session.push(Entry::Message(message.clone()));
        Ok(message)
    }

    /// Check the backend's health endpoint. Only logs; never fails.
    pub async fn check_backend_health(&self) -> bool {
        match self.backend.health().await {
            Ok(()) => {
                info!(name: "backend.health.ok", "Backend service is healthy");
                true
            }
            Err(e) => {
                warn!(name: "backend.health.unavailable", error = %e, "Backend service is not available");
                false
            }
        }
    }
}
