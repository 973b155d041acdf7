//! Full page document.

use leptos::prelude::*;

use crate::session::Session;
use crate::ui::chat::ChatShell;
use crate::ui::chat::routes::session_url;
use crate::ui::components::SparklesIcon;

/// Chat page for a session.
#[component]
pub fn AppPage(title: String, session: Session) -> impl IntoView {
    let page_title = title.clone();
    let header_title = title.clone();
    let session_id = session.id().to_string();

    view! {
        <!doctype html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <meta name="description" content="Sustainability reporting assistant"/>

                <title>{page_title}</title>

                // Local scripts only (no CDN)
                <script src="/static/vendor/htmx-2.0.8.min.js"></script>
                <link rel="stylesheet" href="/static/app.css"/>
            </head>

            <body class="min-h-screen bg-background text-textPrimary antialiased">
                <div id="app-shell" class="flex flex-col min-h-screen">
                    <Header title=header_title session_id=session_id />
                    <main id="app" class="flex-1 container mx-auto px-4 py-6 max-w-5xl">
                        <ChatShell title=title session=session />
                    </main>
                </div>
            </body>
        </html>
    }
}

/// Application header; the title links back to this session.
#[component]
fn Header(title: String, session_id: String) -> impl IntoView {
    let href = session_url(&session_id);

    view! {
        <header class="sticky top-0 z-50 w-full border-b border-panelBorder bg-background/95">
            <div class="container mx-auto flex h-14 items-center px-4 max-w-5xl">
                <a href=href class="flex items-center gap-2 font-semibold">
                    <SparklesIcon class="h-5 w-5 text-primary" />
                    <span class="text-lg">{title}</span>
                </a>
            </div>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStore;
    use crate::ui::render;

    #[test]
    fn test_page_binds_to_session() {
        let session = SessionStore::new().create();
        let id = session.id().to_string();
        let title = "Eco <Assistant>".to_string();
        let html = render(move || view! { <AppPage title=title session=session /> });

        assert!(html.to_ascii_lowercase().starts_with("<!doctype html>"));
        assert!(html.contains("<title>Eco &lt;Assistant&gt;</title>"));
        assert!(html.contains(&format!("/ui/sessions/{id}/messages")));
        assert!(html.contains(r#"id="typing-indicator""#));
        assert!(html.contains(r#"id="chat-messages""#));
        assert!(html.contains(&format!(r#"href="/sessions/{id}""#)));
        assert!(html.contains(r#"src="/static/vendor/htmx-2.0.8.min.js""#));
    }
}
