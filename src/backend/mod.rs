//! Chat backend collaborator.
//!
//! The widget talks to an external service over HTTP:
//!
//! - `POST /chat` for user messages
//! - `POST /validate-report` to fact-check a rendered report
//! - `GET /health` once at startup
//!
//! [`ChatBackend`] is the seam the controller depends on; [`HttpBackend`]
//! is the `reqwest` implementation used in production.

mod client;
mod error;
pub mod types;

pub use client::{ChatBackend, HttpBackend};
pub use error::BackendError;
pub use types::{
    AccuracyTier, ChatReply, ChatRequest, Discrepancy, Metric, ReplyOutcome, Report,
    ReportSummary, ValidationRequest, ValidationResult,
};
