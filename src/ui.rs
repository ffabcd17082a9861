use crate::api::{Backend, HttpBackend};
use crate::config;
use crate::state::{View, Workspace};
use crate::timer;
use crate::views::{ChatPanel, ErrorDialog, PreviewPane, UploadView};
use crate::visibility::REPAIR_INTERVAL;
use dioxus::prelude::*;

const MAIN_CSS: Asset = asset!("/assets/main.css");

#[component]
pub fn App() -> Element {
    let config = config::get();
    let backend = use_context_provider(|| HttpBackend::new(config));
    let workspace = use_signal(|| Workspace::new(config.preview_pages));

    use_backend_health(workspace, backend);
    use_composer_repair(workspace);

    let view = workspace.read().view;

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        div {
            class: "app",
            // keep stray drops from navigating the page to the file
            ondragover: move |ev| ev.prevent_default(),
            ondrop: move |ev| ev.prevent_default(),
            AppHeader { workspace }
            match view {
                View::Upload => rsx! { UploadView { workspace } },
                View::Main => rsx! { MainContent { workspace } },
            }
            ErrorDialog { workspace }
        }
    }
}

/// Ask the backend once whether it is up, for the header indicator.
fn use_backend_health(workspace: Signal<Workspace>, backend: HttpBackend) {
    use_hook(move || {
        let mut workspace = workspace;
        spawn(async move {
            let online = match backend.health().await {
                Ok(status) => status.is_ok(),
                Err(err) => {
                    tracing::warn!(backend = %backend.base_url(), "health check failed: {err}");
                    false
                }
            };
            workspace.write().backend_online = Some(online);
        })
    });
}

/// Page-lifetime check that the chat composer is still usable.
fn use_composer_repair(workspace: Signal<Workspace>) {
    use_future(move || async move {
        let mut workspace = workspace;
        loop {
            timer::sleep(REPAIR_INTERVAL).await;
            if workspace.peek().needs_repair() {
                workspace.write().repair_composer();
            }
        }
    });
}

#[component]
fn AppHeader(workspace: Signal<Workspace>) -> Element {
    let mut workspace = workspace;
    let (has_document, online) = {
        let ws = workspace.read();
        (ws.document.is_some(), ws.backend_online)
    };
    let (status_class, status_label) = match online {
        Some(true) => ("status-dot connected", "Backend online"),
        Some(false) => ("status-dot disconnected", "Backend unreachable"),
        None => ("status-dot", "Checking backend…"),
    };

    rsx! {
        header { class: "header",
            div { class: "header-content",
                h1 { class: "brand", "📚 Chat with your PDF" }
                div { class: "header-actions",
                    span { class: "status", title: status_label,
                        span { class: status_class }
                        "{status_label}"
                    }
                    if has_document {
                        button {
                            class: "btn btn-ghost",
                            r#type: "button",
                            onclick: move |_| {
                                tracing::info!("starting over with a new document");
                                workspace.write().reset();
                            },
                            "New document"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn MainContent(workspace: Signal<Workspace>) -> Element {
    let (url, highlights) = {
        let ws = workspace.read();
        (
            ws.document
                .as_ref()
                .map(|doc| doc.preview_url.clone())
                .unwrap_or_default(),
            ws.highlights.clone(),
        )
    };

    rsx! {
        main { id: "mainContentRow", class: "main-content-row",
            PreviewPane { url, highlights }
            ChatPanel { workspace }
        }
    }
}
