use crate::preview::HighlightOverlay;
use dioxus::prelude::*;

/// The uploaded PDF in the browser's own viewer, with translucent bands
/// over the cited pages.
#[component]
pub fn PreviewPane(url: String, highlights: Vec<HighlightOverlay>) -> Element {
    let mut failed = use_signal(|| false);
    let show_fallback = url.trim().is_empty() || failed();

    rsx! {
        div { class: "pdf-panel",
            div { class: "panel-title", "Document preview" }
            div { id: "pdfViewerContainer", class: "pdf-viewer-container",
                if show_fallback {
                    PreviewFallback { url: url.clone() }
                } else {
                    iframe {
                        id: "pdfIframe",
                        class: "pdf-frame",
                        src: "{url}",
                        title: "PDF Preview",
                        onerror: move |_| {
                            tracing::warn!("pdf preview failed to load");
                            failed.set(true);
                        },
                    }
                    for (i, overlay) in highlights.iter().enumerate() {
                        div {
                            key: "{i}",
                            class: "pdf-highlight",
                            title: "Cited page {overlay.page}",
                            style: overlay.style(),
                        }
                    }
                }
            }
        }
    }
}

/// Target for the "open in new tab" link. Browsers refuse to navigate a
/// top-level page to a `data:` URL, so local previews get no link.
fn new_tab_href(url: &str) -> Option<&str> {
    let url = url.trim();
    if url.is_empty() || url.starts_with("data:") {
        None
    } else {
        Some(url)
    }
}

#[component]
fn PreviewFallback(url: String) -> Element {
    let href = new_tab_href(&url).map(str::to_string);
    rsx! {
        div { class: "pdf-fallback",
            h3 { "PDF Preview" }
            p { "Could not load PDF preview." }
            p { "You can still chat with your document!" }
            if let Some(href) = href {
                a { href: "{href}", target: "_blank", rel: "noopener noreferrer",
                    "Click here to view PDF in new tab"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tab_link_only_for_navigable_urls() {
        assert_eq!(
            new_tab_href(" http://localhost:5000/files/lease.pdf "),
            Some("http://localhost:5000/files/lease.pdf")
        );
        assert_eq!(new_tab_href("data:application/pdf;base64,JVBERi0="), None);
        assert_eq!(new_tab_href("   "), None);
    }
}
