//! Chat header component.

use leptos::prelude::*;

use crate::ui::components::BotIcon;

/// Chat header with the assistant title.
#[component]
pub fn ChatHeader(title: String) -> impl IntoView {
    view! {
        <header class="chat-header flex items-center gap-2 px-4 py-3 border-b border-panelBorder">
            <BotIcon class="h-5 w-5 text-primary" />
            <h2 class="font-semibold text-lg">{title}</h2>
        </header>
    }
}
