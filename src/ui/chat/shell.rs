//! Chat shell layout component.

use leptos::prelude::*;

use crate::session::Session;

use super::{ChatHeader, InputArea, TranscriptView, TypingIndicator};

/// Main chat shell component.
///
/// Provides the complete chat interface layout with:
/// - Header with title
/// - Scrollable transcript
/// - Typing indicator
/// - Input area for new messages
#[component]
pub fn ChatShell(title: String, session: Session) -> impl IntoView {
    let input = session.input_state();
    let busy = input.busy;
    let session_id = session.id().to_string();
    let data_session_id = session_id.clone();

    view! {
        <div
            class="chat-shell flex flex-col h-[calc(100vh-6rem)] border border-panelBorder rounded-2xl overflow-hidden"
            data-session-id=data_session_id
        >
            <ChatHeader title=title />
            <TranscriptView session=session />
            <TypingIndicator busy=busy />
            <InputArea session_id=session_id input=input />
        </div>
    }
}
