//! The UI state object. One `Workspace` lives in a Dioxus signal at the app
//! root and every handler goes through it.

use crate::api::{ChatReply, ChatRequest};
use crate::chat::{Conversation, send_failure_message};
use crate::error::{ApiResult, UploadError};
use crate::preview::{HighlightOverlay, highlight_overlays};
use crate::sources::parse_sources;
use crate::types::{Document, SessionId, SourceCitation};
use crate::upload::{FileCandidate, UploadPanel, validate_candidate};
use crate::visibility::{self, Repair};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Upload,
    /// Preview and chat side by side.
    Main,
}

/// Result of offering a file to the upload flow.
#[derive(Clone, Debug, PartialEq)]
pub enum Admission {
    /// The file may be read and sent; the upload guard is now held.
    Accepted,
    /// Another upload is in flight.
    Busy,
    Rejected(UploadError),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Workspace {
    pub session: SessionId,
    pub document: Option<Document>,
    pub view: View,
    pub upload: UploadPanel,
    uploading: bool,
    pub chat: Conversation,
    pub highlights: Vec<HighlightOverlay>,
    pub preview_pages: u32,
    /// Message of the modal error dialog, when open.
    pub error: Option<String>,
    pub backend_online: Option<bool>,
}

impl Workspace {
    pub fn new(preview_pages: u32) -> Self {
        Self {
            session: SessionId::generate(),
            document: None,
            view: View::Upload,
            upload: UploadPanel::default(),
            uploading: false,
            chat: Conversation::default(),
            highlights: Vec::new(),
            preview_pages,
            error: None,
            backend_online: None,
        }
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    /// Validate a picked or dropped file and take the upload guard.
    /// Only `Accepted` may lead to a request.
    pub fn admit_upload(&mut self, candidate: &FileCandidate, max_bytes: u64) -> Admission {
        if self.uploading {
            tracing::info!("Upload already in progress, ignoring duplicate request");
            return Admission::Busy;
        }
        if let Err(err) = validate_candidate(candidate, max_bytes) {
            tracing::info!(name = %candidate.name, "rejected file: {err}");
            self.upload.dragover = false;
            self.show_error(err.to_string());
            return Admission::Rejected(err);
        }
        self.uploading = true;
        self.upload.start();
        Admission::Accepted
    }

    /// The accepted file could not be read.
    pub fn abort_upload(&mut self, err: UploadError) {
        tracing::error!("Upload error: {err}");
        self.show_error(format!("Failed to upload document: {err}"));
        self.upload.reset();
        self.uploading = false;
    }

    pub fn set_upload_progress(&mut self, percent: f64) {
        if self.uploading {
            self.upload.progress = percent;
        }
    }

    /// Releases the upload guard. On success the document replaces any
    /// previous one and the transcript starts over.
    pub fn finish_upload(&mut self, result: ApiResult<Document>) -> bool {
        self.uploading = false;
        match result {
            Ok(document) => {
                tracing::info!(
                    name = %document.name,
                    collection = %document.collection_name,
                    "document processed"
                );
                self.upload.complete();
                self.document = Some(document);
                self.chat = Conversation::default();
                self.highlights.clear();
                true
            }
            Err(err) => {
                tracing::error!("Upload error: {err}");
                self.show_error(format!("Failed to upload document: {err}"));
                self.upload.reset();
                false
            }
        }
    }

    /// Swap to preview + chat. No-op without a document.
    pub fn show_main(&mut self) {
        if self.document.is_some() {
            self.view = View::Main;
        }
    }

    pub fn begin_send(&mut self, input: &str) -> Option<ChatRequest> {
        let collection_name = self.document.as_ref()?.collection_name.clone();
        let query = self.chat.begin(input)?;
        tracing::info!(session = %self.session, "sending chat message");
        Some(ChatRequest {
            query,
            session_id: self.session.clone(),
            collection_name,
        })
    }

    /// Apply the outcome of `request`. A result for a session that has since
    /// been reset is dropped, so it cannot land in another document's chat.
    pub fn complete_send(&mut self, request: &ChatRequest, result: ApiResult<ChatReply>) {
        if request.session_id != self.session {
            tracing::info!(
                stale = %request.session_id,
                session = %self.session,
                "dropping chat result from a previous session"
            );
            return;
        }
        match result {
            Ok(reply) => {
                if let Some(history) = &reply.chat_history {
                    tracing::debug!(%history, "chat history");
                }
                self.render_bot_reply(&reply);
            }
            Err(err) => {
                tracing::error!("Chat error: {err}");
                self.chat.push_apology();
                self.highlight(&[]);
                self.show_error(send_failure_message(&err));
            }
        }
        self.chat.settle();
    }

    /// Append the bot's answer, then highlight the pages it cites.
    pub fn render_bot_reply(&mut self, reply: &ChatReply) {
        self.chat.push_bot(reply);
        let sources = parse_sources(reply);
        tracing::info!(sources = sources.len(), "bot reply received");
        self.highlight(&sources);
    }

    /// Replace the current overlays.
    pub fn highlight(&mut self, sources: &[SourceCitation]) {
        self.highlights = highlight_overlays(sources, self.preview_pages);
    }

    pub fn needs_repair(&self) -> bool {
        self.view == View::Main && visibility::needs_repair(&self.chat.composer, self.chat.sending)
    }

    pub fn repair_composer(&mut self) -> Vec<Repair> {
        if self.view != View::Main {
            return Vec::new();
        }
        visibility::repair(&mut self.chat.composer, self.chat.sending)
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Drop the document and start a fresh session.
    pub fn reset(&mut self) {
        let preview_pages = self.preview_pages;
        let backend_online = self.backend_online;
        let mut upload = std::mem::take(&mut self.upload);
        upload.reset();
        *self = Self {
            upload,
            backend_online,
            ..Self::new(preview_pages)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::preview::PREVIEW_PAGE_COUNT;
    use crate::upload::{COMPLETE_STATUS, UploadPhase};

    const LIMIT: u64 = 16 * 1024 * 1024;

    fn document() -> Document {
        Document {
            name: "lease.pdf".into(),
            collection_name: "doc_lease_1a2b".into(),
            preview_url: "http://localhost:5000/files/lease.pdf".into(),
        }
    }

    fn loaded() -> Workspace {
        let mut workspace = Workspace::new(PREVIEW_PAGE_COUNT);
        assert_eq!(
            workspace.admit_upload(&FileCandidate::new("lease.pdf", 1024), LIMIT),
            Admission::Accepted
        );
        assert!(workspace.finish_upload(Ok(document())));
        workspace.show_main();
        workspace
    }

    #[test]
    fn duplicate_upload_is_ignored() {
        let mut workspace = Workspace::new(PREVIEW_PAGE_COUNT);
        let file = FileCandidate::new("a.pdf", 10);
        assert_eq!(workspace.admit_upload(&file, LIMIT), Admission::Accepted);
        assert_eq!(workspace.admit_upload(&file, LIMIT), Admission::Busy);
        assert!(workspace.error.is_none());
    }

    #[test]
    fn rejected_file_opens_dialog_and_keeps_guard_free() {
        let mut workspace = Workspace::new(PREVIEW_PAGE_COUNT);
        let admission = workspace.admit_upload(&FileCandidate::new("a.png", 10), LIMIT);
        assert_eq!(admission, Admission::Rejected(UploadError::NotPdf));
        assert_eq!(workspace.error.as_deref(), Some("Please select a PDF file."));
        assert!(!workspace.is_uploading());
        assert_eq!(workspace.upload.phase, UploadPhase::Idle);
    }

    #[test]
    fn successful_upload_loads_one_document_and_shows_main() {
        let workspace = loaded();
        assert_eq!(workspace.document, Some(document()));
        assert_eq!(workspace.view, View::Main);
        assert_eq!(workspace.upload.status, COMPLETE_STATUS);
        assert!(!workspace.is_uploading());
    }

    #[test]
    fn failed_upload_resets_the_section() {
        let mut workspace = Workspace::new(PREVIEW_PAGE_COUNT);
        workspace.admit_upload(&FileCandidate::new("a.pdf", 10), LIMIT);
        workspace.set_upload_progress(42.0);
        let failed = workspace.finish_upload(Err(ApiError::Backend {
            status: 500,
            message: "Text extraction failed".into(),
        }));
        assert!(!failed);
        assert_eq!(
            workspace.error.as_deref(),
            Some("Failed to upload document: Text extraction failed")
        );
        assert_eq!(workspace.upload.phase, UploadPhase::Idle);
        assert_eq!(workspace.upload.progress, 0.0);
        assert!(workspace.document.is_none());
        workspace.show_main();
        assert_eq!(workspace.view, View::Upload);
    }

    #[test]
    fn chat_needs_a_document() {
        let mut workspace = Workspace::new(PREVIEW_PAGE_COUNT);
        assert!(workspace.begin_send("hello").is_none());
        assert_eq!(workspace.chat.messages.len(), 1);
    }

    #[test]
    fn chat_request_carries_session_and_collection() {
        let mut workspace = loaded();
        let request = workspace.begin_send(" What is the rent? ").unwrap();
        assert_eq!(request.query, "What is the rent?");
        assert_eq!(request.session_id, workspace.session);
        assert_eq!(request.collection_name, "doc_lease_1a2b");
    }

    #[test]
    fn failed_send_clears_highlights() {
        let mut workspace = loaded();
        workspace.highlight(&[SourceCitation::page(1)]);
        let request = workspace.begin_send("q").unwrap();
        workspace.complete_send(&request, Err(ApiError::Network("offline".into())));
        assert!(workspace.highlights.is_empty());
        assert_eq!(
            workspace.error.as_deref(),
            Some("Failed to send message: offline")
        );
    }

    #[test]
    fn reply_from_before_a_reset_is_dropped() {
        let mut workspace = loaded();
        let request = workspace.begin_send("q").unwrap();
        workspace.reset();
        workspace.admit_upload(&FileCandidate::new("deed.pdf", 10), LIMIT);
        workspace.finish_upload(Ok(Document {
            name: "deed.pdf".into(),
            collection_name: "doc_deed".into(),
            preview_url: "http://localhost:5000/files/deed.pdf".into(),
        }));

        workspace.complete_send(
            &request,
            Ok(ChatReply {
                response: "answer about lease.pdf".into(),
                sources: Some(vec![SourceCitation::page(2)]),
                chat_history: None,
                thread_id: None,
            }),
        );

        assert_eq!(workspace.chat.messages.len(), 1);
        assert_eq!(workspace.chat.messages[0].text, crate::chat::WELCOME_MESSAGE);
        assert!(workspace.highlights.is_empty());
        assert!(!workspace.chat.sending);
    }

    #[test]
    fn repairs_only_apply_in_main_view() {
        let mut workspace = Workspace::new(PREVIEW_PAGE_COUNT);
        workspace.chat.composer.input_disabled = true;
        assert!(!workspace.needs_repair());
        assert!(workspace.repair_composer().is_empty());

        let mut workspace = loaded();
        workspace.chat.composer.container_hidden = true;
        assert!(workspace.needs_repair());
        assert_eq!(workspace.repair_composer(), vec![Repair::ContainerShown]);
    }

    #[test]
    fn reset_starts_a_new_session_without_a_document() {
        let mut workspace = loaded();
        workspace.backend_online = Some(true);
        let old_session = workspace.session.clone();
        let old_generation = workspace.upload.picker_generation;
        workspace.reset();
        assert_ne!(workspace.session, old_session);
        assert!(workspace.document.is_none());
        assert_eq!(workspace.view, View::Upload);
        assert_eq!(workspace.chat.messages.len(), 1);
        assert_eq!(workspace.chat.messages[0].text, crate::chat::WELCOME_MESSAGE);
        assert_eq!(workspace.upload.picker_generation, old_generation + 1);
        assert_eq!(workspace.backend_online, Some(true));
    }
}
