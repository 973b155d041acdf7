//! Chat sessions and the controller that drives them.
//!
//! A [`Session`] is one open chat page: its transcript, the enabled/busy
//! state of the input, and the reports currently being validated. The
//! [`ChatController`] turns UI events into backend calls and transcript
//! entries.
//!
//! # Architecture
//!
//! - [`Session`]: transcript and input state of a single chat page
//! - [`SessionStore`]: thread-safe store for all open sessions
//! - [`ChatController`]: send, reply, validate and placeholder actions
//!
//! # Example
//!
//! ```rust
//! use sustain_chat::session::{ChatMessage, Entry, SessionStore};
//!
//! let store = SessionStore::new();
//! let session = store.create();
//! session.push(Entry::Message(ChatMessage::user("Hello!")));
//!
//! assert_eq!(session.entry_count(), 1);
//! assert!(session.input_state().enabled);
//! ```

mod controller;
mod thread;

pub use controller::{
    CONNECTION_ERROR_MESSAGE, ChatController, ControllerError, DETAILS_PLACEHOLDER_MESSAGE,
    DOWNLOAD_PLACEHOLDER_MESSAGE, PROCESSING_ERROR_MESSAGE, ReplyDelivery, SendOutcome,
    VALIDATION_ERROR_MESSAGE, ValidationOutcome,
};
pub use thread::{
    ChatMessage, DEFAULT_SESSION_TIMEOUT, Entry, InputGuard, InputState, PendingReply, ReportEntry,
    Sender, Session, SessionStore, ValidationGuard,
};
