//! Chat transcript container.

use leptos::prelude::*;

use crate::session::{Entry, PendingReply, Session};

use super::message::MessageView;
use super::report::ReportView;
use super::routes::reply_url;

/// Element id of a pending reply placeholder.
#[must_use]
pub fn pending_element_id(reply_id: &str) -> String {
    format!("pending-{reply_id}")
}

/// A single transcript entry.
#[component]
pub fn EntryView(
    session_id: String,
    entry: Entry,
    /// Whether a validation is in flight for a report entry.
    #[prop(default = false)]
    validating: bool,
) -> impl IntoView {
    match entry {
        Entry::Message(message) => view! { <MessageView message=message /> }.into_any(),
        Entry::Report(report) => view! {
            <ReportView session_id=session_id entry=report validating=validating />
        }
        .into_any(),
    }
}

/// Invisible placeholder that fetches the bot reply as soon as it is
/// swapped in, then replaces itself with it.
///
/// While the reply is requested the input and send button are disabled and
/// the typing indicator is shown.
#[component]
pub fn PendingReplyView(session_id: String, reply: PendingReply) -> impl IntoView {
    let url = reply_url(&session_id, &reply.id);
    let element_id = pending_element_id(&reply.id);

    view! {
        <div
            id=element_id
            class="pending-reply"
            hx-post=url
            hx-trigger="load"
            hx-swap="outerHTML"
            hx-indicator="#typing-indicator"
            hx-disabled-elt="#messageInput, #sendBtn"
            hx-on--after-request="document.getElementById('messageInput')?.focus()"
        ></div>
    }
}

/// Container holding the whole transcript.
///
/// New fragments are swapped in at the end, after which the container
/// scrolls to the bottom. A reply still pending when the page is rendered
/// is requested again from here.
#[component]
pub fn TranscriptView(session: Session) -> impl IntoView {
    let session_id = session.id().to_string();

    let entries = session
        .entries()
        .into_iter()
        .map(|entry| {
            let validating = match &entry {
                Entry::Report(report) => session.is_validating(&report.id),
                Entry::Message(_) => false,
            };
            let session_id = session_id.clone();
            view! { <EntryView session_id=session_id entry=entry validating=validating /> }
        })
        .collect_view();

    let pending = session
        .pending_reply()
        .map(|reply| view! { <PendingReplyView session_id=session_id reply=reply /> });

    view! {
        <div
            id="chat-messages"
            class="chat-messages flex-1 overflow-y-auto"
            aria-live="polite"
            aria-label="Chat messages"
            hx-on--after-swap="this.scrollTop = this.scrollHeight"
        >
            {entries}
            {pending}
        </div>
    }
}
