//! Plain chat message view.

use leptos::prelude::*;

use crate::session::{ChatMessage, Sender};
use crate::ui::components::{BotIcon, UserIcon};

/// User or bot message bubble with its timestamp.
#[component]
pub fn MessageView(
    /// The message to render.
    message: ChatMessage,
) -> impl IntoView {
    let classes = format!("message {}-message", message.sender.as_str());
    let time = message.display_time();
    let ChatMessage { text, sender, .. } = message;

    let content = match sender {
        Sender::User => view! {
            <MessageText text=text />
            <UserIcon class="ms-2" />
        }
        .into_any(),
        Sender::Bot => view! {
            <BotIcon class="me-2" />
            <MessageText text=text />
        }
        .into_any(),
    };

    view! {
        <div class=classes>
            <div class="message-content">{content}</div>
            <MessageTime time=time />
        </div>
    }
}

/// Message text with its line breaks kept.
#[component]
pub fn MessageText(text: String) -> impl IntoView {
    let mut lines = text.split('\n').map(str::to_string);
    let first = lines.next().unwrap_or_default();
    let rest = lines
        .map(|line| view! { <br /> {line} })
        .collect_view();

    view! { {first} {rest} }
}

/// `HH:MM` footer of a message bubble.
#[component]
pub fn MessageTime(time: String) -> impl IntoView {
    view! { <small class="message-time">{time}</small> }
}
