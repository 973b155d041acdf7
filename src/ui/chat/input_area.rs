//! Chat input area component.

use leptos::prelude::*;

use crate::session::InputState;
use crate::ui::components::{Button, ButtonSize, ButtonVariant, LoaderIcon, SendIcon};

use super::routes::messages_url;

/// Typing indicator shown while a reply is being fetched.
///
/// HTMX toggles it through `hx-indicator`; `busy` covers a page reload
/// while a reply is still pending.
#[component]
pub fn TypingIndicator(#[prop(default = false)] busy: bool) -> impl IntoView {
    let classes = if busy {
        "typing-indicator htmx-indicator is-busy"
    } else {
        "typing-indicator htmx-indicator"
    };

    view! {
        <div id="typing-indicator" class=classes aria-live="polite">
            <LoaderIcon class="me-2" />
            "Assistant is typing..."
        </div>
    }
}

/// Message form with HTMX submission.
///
/// The field is cleared as soon as the message is submitted. The server
/// answers with the user's message and a placeholder that fetches the reply,
/// which keeps the input disabled until the reply arrives.
#[component]
pub fn InputArea(session_id: String, input: InputState) -> impl IntoView {
    let url = messages_url(&session_id);
    let disabled = !input.enabled;

    view! {
        <div class="chat-input-area border-t border-panelBorder p-4">
            <form
                id="chat-form"
                class="chat-input flex gap-2"
                hx-post=url
                hx-target="#chat-messages"
                hx-swap="beforeend"
                hx-disabled-elt="find input, find button"
                hx-on--before-request="this.reset()"
                hx-on--after-request="this.querySelector('input').focus()"
            >
                <input
                    type="text"
                    id="messageInput"
                    name="message"
                    placeholder="Ask about energy, water or carbon..."
                    autocomplete="off"
                    class="flex-1 px-4 py-3 rounded-xl border border-panelBorder bg-background"
                    autofocus
                    disabled=disabled
                />
                <Button
                    variant=ButtonVariant::Primary
                    size=ButtonSize::Icon
                    button_type="submit"
                    class="shrink-0 rounded-xl"
                    id="sendBtn"
                    label="Send"
                    disabled=disabled
                >
                    <SendIcon class="h-5 w-5" />
                </Button>
            </form>

            <p class="text-xs text-textMuted mt-2 text-center">"Press Enter to send"</p>
        </div>
    }
}
