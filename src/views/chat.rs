use crate::api::{Backend, HttpBackend};
use crate::chat::INPUT_PLACEHOLDER;
use crate::state::Workspace;
use crate::types::{ChatMessage, Sender, SourceCitation};
use crate::visibility::ComposerState;
use dioxus::events::Key;
use dioxus::prelude::*;
use std::rc::Rc;
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:zero]:[minute padding:zero] [period case:upper]");

/// Longest source snippet shown under a reply before it is cut.
const SNIPPET_CHARS: usize = 240;

fn format_message_timestamp(timestamp: Option<OffsetDateTime>) -> Option<String> {
    let mut datetime = timestamp?;
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime.format(MESSAGE_TIME_FORMAT).ok()
}

fn snippet(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= SNIPPET_CHARS {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(SNIPPET_CHARS).collect();
    format!("{}…", cut.trim_end())
}

/// The send button follows the composer alone. Blank drafts are refused by
/// `Conversation::begin`, so an empty input never disables it.
fn send_button_disabled(composer: &ComposerState) -> bool {
    composer.send_disabled
}

fn sender_class(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "user-message",
        Sender::Bot => "bot-message",
    }
}

#[component]
pub fn ChatPanel(workspace: Signal<Workspace>) -> Element {
    let mut workspace = workspace;
    let backend = use_context::<HttpBackend>();
    let mut draft = use_signal(String::new);
    let mut end_anchor = use_signal(|| Option::<Rc<MountedData>>::None);

    let send_message = use_callback(move |text: String| {
        let Some(request) = workspace.write().begin_send(&text) else {
            return;
        };
        draft.set(String::new());
        let backend = backend.clone();
        spawn(async move {
            let result = backend.chat(&request).await;
            workspace.write().complete_send(&request, result);
        });
    });

    let transcript_len = use_memo(move || {
        let ws = workspace.read();
        ws.chat.messages.len() + usize::from(ws.chat.typing)
    });
    use_effect(move || {
        let _ = transcript_len();
        if let Some(anchor) = end_anchor.peek().clone() {
            spawn(async move {
                let _ = anchor.scroll_to(ScrollBehavior::Smooth).await;
            });
        }
    });

    let (messages, typing, composer, sending, document_name) = {
        let ws = workspace.read();
        (
            ws.chat.messages.clone(),
            ws.chat.typing,
            ws.chat.composer,
            ws.chat.sending,
            ws.document.as_ref().map(|doc| doc.name.clone()).unwrap_or_default(),
        )
    };
    let container_style = if composer.container_hidden {
        "display: none;"
    } else {
        ""
    };

    rsx! {
        div { id: "chatSection", class: "chat-section",
            div { class: "panel-title",
                "Chat with "
                span { id: "documentName", class: "document-name", "{document_name}" }
            }
            div { id: "chatMessages", class: "chat-messages",
                for (i, msg) in messages.iter().enumerate() {
                    MessageRow { key: "{i}", message: msg.clone() }
                }
                if typing {
                    div { id: "typingIndicator", class: "message bot-message",
                        div { class: "avatar bot-avatar", "🤖" }
                        div { class: "typing-indicator",
                            div { class: "typing-dots",
                                div { class: "typing-dot" }
                                div { class: "typing-dot" }
                                div { class: "typing-dot" }
                            }
                        }
                    }
                }
                div { class: "chat-end", onmounted: move |ev| end_anchor.set(Some(ev.data())) }
            }

            form { class: "chat-input-container", style: container_style,
                onsubmit: move |ev| {
                    ev.prevent_default();
                    send_message.call(draft());
                },
                div { class: "chat-input-wrapper",
                    textarea {
                        id: "chatInput", rows: "1", placeholder: INPUT_PLACEHOLDER,
                        value: "{draft}", oninput: move |ev| draft.set(ev.value()),
                        onkeydown: move |ev| {
                            if ev.key() == Key::Enter && !ev.modifiers().shift() {
                                ev.prevent_default();
                                send_message.call(draft());
                            }
                        },
                        disabled: composer.input_disabled, autofocus: true,
                    }
                    button {
                        id: "sendBtn", class: "send-btn", r#type: "submit",
                        disabled: send_button_disabled(&composer),
                        if sending {
                            span { id: "loadingIcon", class: "spinner", aria_label: "Sending" }
                        } else {
                            span { id: "sendIcon", "➤" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn MessageRow(message: ChatMessage) -> Element {
    let is_bot = message.sender == Sender::Bot;
    let timestamp = format_message_timestamp(message.created_at);

    rsx! {
        div { class: format_args!("message {}", sender_class(message.sender)),
            if is_bot {
                div { class: "avatar bot-avatar", "🤖" }
            } else {
                div { class: "avatar user-avatar", "👤" }
            }
            div { class: "message-stack",
                div { class: "message-content",
                    p { "{message.text}" }
                }
                if !message.sources.is_empty() {
                    SourceList { sources: message.sources.clone() }
                }
                if let Some(ts) = timestamp {
                    div { class: "message-meta", span { class: "message-timestamp", "{ts}" } }
                }
            }
        }
    }
}

#[component]
fn SourceList(sources: Vec<SourceCitation>) -> Element {
    let count = sources.len();
    let items: Vec<(Option<u32>, String)> = sources
        .iter()
        .map(|source| (source.page, snippet(source.text.as_deref().unwrap_or_default())))
        .collect();
    rsx! {
        details { class: "message-sources",
            summary { "Sources ({count})" }
            ol {
                for (i, (page, text)) in items.into_iter().enumerate() {
                    li { key: "{i}",
                        if let Some(page) = page {
                            span { class: "source-page", "Page {page}" }
                        }
                        "{text}"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_snippets_are_cut() {
        let text = "word ".repeat(100);
        let cut = snippet(&text);
        assert!(cut.ends_with('…'));
        assert!(cut.chars().count() <= SNIPPET_CHARS + 1);
        assert_eq!(snippet("  short  "), "short");
    }

    fn loaded_workspace() -> Workspace {
        let mut workspace = Workspace::new(crate::preview::PREVIEW_PAGE_COUNT);
        workspace.admit_upload(
            &crate::upload::FileCandidate::new("lease.pdf", 10),
            16 * 1024 * 1024,
        );
        workspace.finish_upload(Ok(crate::types::Document {
            name: "lease.pdf".into(),
            collection_name: "doc_lease".into(),
            preview_url: "http://localhost:5000/files/lease.pdf".into(),
        }));
        workspace
    }

    #[test]
    fn send_button_is_enabled_once_a_send_settles() {
        let mut workspace = loaded_workspace();
        assert!(!send_button_disabled(&workspace.chat.composer));

        let request = workspace.begin_send("hi").unwrap();
        assert!(send_button_disabled(&workspace.chat.composer));

        workspace.complete_send(
            &request,
            Ok(crate::api::ChatReply {
                response: "hello".into(),
                sources: None,
                chat_history: None,
                thread_id: None,
            }),
        );
        assert!(!send_button_disabled(&workspace.chat.composer));

        let request = workspace.begin_send("again").unwrap();
        workspace.complete_send(&request, Err(crate::error::ApiError::Network("offline".into())));
        assert!(!send_button_disabled(&workspace.chat.composer));
    }

    #[test]
    fn timestamps_render_in_twelve_hour_time() {
        let ts = OffsetDateTime::from_unix_timestamp(0).unwrap();
        let formatted = format_message_timestamp(Some(ts)).unwrap();
        assert!(formatted.ends_with("AM") || formatted.ends_with("PM"));
        assert!(format_message_timestamp(None).is_none());
    }
}
