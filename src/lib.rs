//! Sustainability chat assistant
//!
//! A server-rendered chat page for a sustainability report service. Users
//! send free-form messages; replies are plain text or generated reports
//! that can be fact-checked against the service's data.
//!
//! # Architecture
//!
//! - **Server**: Axum-based HTTP server returning HTMX fragments
//! - **Backend**: HTTP client for the report service (`/chat`, `/validate-report`, `/health`)
//! - **Sessions**: Per-page transcript and the controller that drives it
//! - **UI**: Leptos components rendered to HTML on the server, bound with HTMX attributes
//!
//! # Modules
//!
//! - [`backend`]: Report service client and wire types
//! - [`config`]: CLI and layered configuration
//! - [`session`]: Conversation state and the chat controller
//! - [`telemetry`]: Logging initialization
//! - [`ui`]: Pages, components and chat views

// Allow pedantic clippy warnings that don't add value for this codebase
#![recursion_limit = "256"]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::implicit_hasher)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]
// View components take their props by value
#![allow(clippy::needless_pass_by_value)]

pub mod backend;
pub mod config;
pub mod server;
pub mod session;
pub mod telemetry;
pub mod ui;

use crate::config::AppConfig;

use session::{ChatController, SessionStore};
use std::sync::Arc;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Session store for open chat pages.
    pub sessions: SessionStore,
    /// Controller turning UI events into backend calls.
    pub controller: Arc<ChatController>,
    /// Global Configuration
    pub config: Arc<AppConfig>,
}
