//! Chat transcript and session storage.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use uuid::Uuid;

use crate::backend::{Report, ValidationResult};

/// Default session timeout (30 minutes).
pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(30 * 60);

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// CSS modifier used by the message views.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
        }
    }
}

/// A rendered chat message. Immutable once appended.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub text: String,
    pub sender: Sender,
    pub sent_at: DateTime<Local>,
}

impl ChatMessage {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User)
    }

    #[must_use]
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Bot)
    }

    fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            text: text.into(),
            sender,
            sent_at: Local::now(),
        }
    }

    /// Local wall-clock time as `HH:MM`.
    #[must_use]
    pub fn display_time(&self) -> String {
        self.sent_at.format("%H:%M").to_string()
    }
}

/// A report reply together with the state attached to its element.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    /// Element identifier, unique per report.
    pub id: String,
    /// The analysis text, rendered as a bot message.
    pub message: ChatMessage,
    pub report: Report,
    /// The currently displayed validation, if any.
    pub validation: Option<ValidationResult>,
}

impl ReportEntry {
    #[must_use]
    pub fn new(message: impl Into<String>, report: Report) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            message: ChatMessage::bot(message),
            report,
            validation: None,
        }
    }
}

/// One item of the transcript.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Message(ChatMessage),
    Report(ReportEntry),
}

/// Enabled/busy state of the message input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputState {
    /// Whether the textarea and send button accept input.
    pub enabled: bool,
    /// Whether the typing indicator is shown.
    pub busy: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            enabled: true,
            busy: false,
        }
    }
}

/// A sent user message whose reply has not been appended yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    /// Identifier the reply placeholder posts back with.
    pub id: String,
    /// Trimmed text forwarded to the backend.
    pub message: String,
    /// Set once the placeholder has requested the reply.
    claimed: bool,
}

/// A single chat session: one browser page worth of transcript.
#[derive(Debug)]
pub struct Session {
    inner: Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    /// Unique session identifier.
    id: String,
    /// Session creation time.
    created_at: DateTime<Utc>,
    /// Last activity time.
    last_activity: RwLock<DateTime<Utc>>,
    /// Rendered transcript, in display order.
    entries: RwLock<Vec<Entry>>,
    /// Input stays disabled while a reply is pending.
    pending: RwLock<Option<PendingReply>>,
    /// Reports with a validation request in flight.
    validating: RwLock<HashSet<String>>,
}

impl Clone for Session {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Session {
    /// Create a new session with the given ID.
    fn new(id: String) -> Self {
        let now = Utc::now();
        Self {
            inner: Arc::new(SessionInner {
                id,
                created_at: now,
                last_activity: RwLock::new(now),
                entries: RwLock::new(Vec::new()),
                pending: RwLock::new(None),
                validating: RwLock::new(HashSet::new()),
            }),
        }
    }

    /// Get the session ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Append an entry to the transcript.
    pub fn push(&self, entry: Entry) {
        write(&self.inner.entries).push(entry);
        self.touch();
    }

    /// Snapshot of the transcript.
    #[must_use]
    pub fn entries(&self) -> Vec<Entry> {
        read(&self.inner.entries).clone()
    }

    #[must_use]
    pub fn entry_count(&self) -> usize {
        read(&self.inner.entries).len()
    }

    /// Look up a report element by its identifier.
    #[must_use]
    pub fn report(&self, report_id: &str) -> Option<ReportEntry> {
        read(&self.inner.entries).iter().find_map(|entry| match entry {
            Entry::Report(report) if report.id == report_id => Some(report.clone()),
            _ => None,
        })
    }

    /// Replace the validation shown on a report.
    ///
    /// Returns `false` if the report does not exist.
    pub fn attach_validation(&self, report_id: &str, result: ValidationResult) -> bool {
        let mut entries = write(&self.inner.entries);
        let found = entries.iter_mut().find_map(|entry| match entry {
            Entry::Report(report) if report.id == report_id => Some(report),
            _ => None,
        });
        match found {
            Some(report) => {
                report.validation = Some(result);
                drop(entries);
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Current input state.
    #[must_use]
    pub fn input_state(&self) -> InputState {
        if read(&self.inner.pending).is_some() {
            InputState {
                enabled: false,
                busy: true,
            }
        } else {
            InputState::default()
        }
    }

    /// The reply still owed for the last user message, if any.
    #[must_use]
    pub fn pending_reply(&self) -> Option<PendingReply> {
        read(&self.inner.pending).clone()
    }

    /// Record `message` as awaiting a reply, disabling the input.
    ///
    /// Returns `None` while an earlier reply is still pending.
    pub fn try_begin_send(&self, message: &str) -> Option<PendingReply> {
        let mut pending = write(&self.inner.pending);
        if pending.is_some() {
            return None;
        }
        let reply = PendingReply {
            id: Uuid::new_v4().to_string(),
            message: message.to_string(),
            claimed: false,
        };
        *pending = Some(reply.clone());
        drop(pending);
        self.touch();
        Some(reply)
    }

    /// Take ownership of the pending reply with this identifier.
    ///
    /// Only the first claim succeeds. The input is re-enabled when the
    /// returned guard drops.
    pub fn claim_reply(&self, reply_id: &str) -> Option<InputGuard> {
        let mut pending = write(&self.inner.pending);
        let reply = pending
            .as_mut()
            .filter(|reply| reply.id == reply_id && !reply.claimed)?;
        reply.claimed = true;
        let message = reply.message.clone();
        drop(pending);
        self.touch();
        Some(InputGuard {
            session: self.clone(),
            message,
        })
    }

    /// Mark a report as being validated until the guard drops.
    ///
    /// Returns `None` if that report already has a validation in flight.
    pub fn try_begin_validation(&self, report_id: &str) -> Option<ValidationGuard> {
        let inserted = write(&self.inner.validating).insert(report_id.to_string());
        inserted.then(|| ValidationGuard {
            session: self.clone(),
            report_id: report_id.to_string(),
        })
    }

    /// Whether a validation request is in flight for the report.
    #[must_use]
    pub fn is_validating(&self, report_id: &str) -> bool {
        read(&self.inner.validating).contains(report_id)
    }

    /// Update the last activity timestamp.
    fn touch(&self) {
        *write(&self.inner.last_activity) = Utc::now();
    }

    /// Check if the session has been idle longer than the timeout.
    #[must_use]
    pub fn is_expired_with_timeout(&self, timeout: Duration) -> bool {
        let last = *read(&self.inner.last_activity);
        match (Utc::now() - last).to_std() {
            Ok(idle) => idle > timeout,
            // Negative duration means clock skew.
            Err(_) => false,
        }
    }

    /// When the session was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }
}

/// Clears the pending reply, re-enabling the input, when dropped.
#[derive(Debug)]
#[must_use = "input is re-enabled as soon as the guard is dropped"]
pub struct InputGuard {
    session: Session,
    message: String,
}

impl InputGuard {
    /// The user message the reply answers.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Drop for InputGuard {
    fn drop(&mut self) {
        *write(&self.session.inner.pending) = None;
    }
}

/// Releases the per-report validation slot when dropped.
#[derive(Debug)]
#[must_use = "the validate control is restored as soon as the guard is dropped"]
pub struct ValidationGuard {
    session: Session,
    report_id: String,
}

impl Drop for ValidationGuard {
    fn drop(&mut self) {
        write(&self.session.inner.validating).remove(&self.report_id);
    }
}

/// Thread-safe store for sessions.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

#[derive(Debug)]
struct SessionStoreInner {
    sessions: RwLock<HashMap<String, Session>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Create a new session store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SessionStoreInner {
                sessions: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Create a new session and return it.
    #[must_use]
    pub fn create(&self) -> Session {
        let id = Uuid::new_v4().to_string();
        self.create_with_id(id)
    }

    /// Create a new session with a specific ID.
    #[must_use]
    pub fn create_with_id(&self, id: impl Into<String>) -> Session {
        let id = id.into();
        let session = Session::new(id.clone());
        write(&self.inner.sessions).insert(id, session.clone());
        session
    }

    /// Get a session by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Session> {
        read(&self.inner.sessions).get(id).cloned()
    }

    /// Get the number of active sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        read(&self.inner.sessions).len()
    }

    /// Check if there are no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all sessions idle for longer than [`DEFAULT_SESSION_TIMEOUT`].
    ///
    /// Returns the number of sessions removed.
    pub fn cleanup_expired(&self) -> usize {
        self.cleanup_expired_with_timeout(DEFAULT_SESSION_TIMEOUT)
    }

    /// Remove sessions that have been inactive longer than the timeout.
    pub fn cleanup_expired_with_timeout(&self, timeout: Duration) -> usize {
        let mut guard = write(&self.inner.sessions);
        let before = guard.len();
        guard.retain(|_, session| !session.is_expired_with_timeout(timeout));
        before - guard.len()
    }
}
