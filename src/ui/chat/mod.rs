//! Chat-specific views.
//!
//! These render the transcript, report and validation blocks, and the
//! input form. Every interactive element is bound with HTMX attributes to a
//! per-session URL from [`routes`].

mod header;
mod input_area;
mod message;
mod report;
pub mod routes;
mod shell;
mod transcript;
mod validation;

pub use header::ChatHeader;
pub use input_area::{InputArea, TypingIndicator};
pub use message::{MessageText, MessageTime, MessageView};
pub use report::{ReportView, report_element_id};
pub use shell::ChatShell;
pub use transcript::{EntryView, PendingReplyView, TranscriptView, pending_element_id};
pub use validation::{ValidationView, tier_class};
