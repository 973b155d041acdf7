//! UI rendering.
//!
//! Leptos components rendered to HTML strings on the server. The page is
//! driven by HTMX: every interactive element posts to a fragment endpoint
//! and swaps the returned markup in place. Text content and attribute
//! values are escaped by leptos.
//!
//! # Structure
//!
//! - [`app`]: Full page document
//! - [`components`]: Reusable button/badge/icon components
//! - [`chat`]: Chat-specific views and the URLs they bind to

use leptos::prelude::*;
use leptos::tachys::view::RenderHtml;

pub mod app;
pub mod chat;
pub mod components;

/// Render a view to an HTML string.
///
/// The view is built inside a fresh reactive owner that is dropped once the
/// markup has been produced.
///
/// ```rust
/// use leptos::prelude::*;
/// use sustain_chat::ui::render;
///
/// let html = render(|| view! { <p class="note">"1 < 2"</p> });
/// assert!(html.starts_with(r#"<p class="note">"#));
/// assert!(html.contains("1 &lt; 2"));
/// ```
pub fn render<V>(view: impl FnOnce() -> V) -> String
where
    V: IntoView,
{
    let owner = Owner::new();
    owner.with(|| view().to_html())
}
