//! URLs the chat views post to.
//!
//! The router registers the same shapes; keep both sides in sync.

/// Action available on a rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportAction {
    Validate,
    Download,
    Details,
}

impl ReportAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validate => "validate",
            Self::Download => "download",
            Self::Details => "details",
        }
    }
}

/// Page URL of an existing session.
#[must_use]
pub fn session_url(session_id: &str) -> String {
    format!("/sessions/{session_id}")
}

/// Endpoint the message form posts to.
#[must_use]
pub fn messages_url(session_id: &str) -> String {
    format!("/ui/sessions/{session_id}/messages")
}

/// Endpoint a pending reply placeholder posts to.
#[must_use]
pub fn reply_url(session_id: &str, reply_id: &str) -> String {
    format!("/ui/sessions/{session_id}/replies/{reply_id}")
}

/// Endpoint for an action on a report.
#[must_use]
pub fn report_action_url(session_id: &str, report_id: &str, action: ReportAction) -> String {
    format!(
        "/ui/sessions/{session_id}/reports/{report_id}/{}",
        action.as_str()
    )
}

/// Element id of the container holding a report's validation block.
#[must_use]
pub fn validation_slot_id(report_id: &str) -> String {
    format!("validation-{report_id}")
}
