//! Upload flow: file validation, the cosmetic progress bar, and the
//! `/upload` round-trip that yields the workspace's document.

use crate::api::{Backend, UploadFile};
use crate::error::{ApiResult, UploadError};
use crate::types::Document;
use base64::prelude::*;
use rand::Rng;
use std::path::Path;
use std::time::Duration;

pub const PROGRESS_TICK: Duration = Duration::from_millis(200);
/// The bar never passes this while the request is outstanding.
pub const PROGRESS_CAP: f64 = 90.0;
const PROGRESS_MAX_STEP: f64 = 15.0;
/// Pause on "Processing complete!" before the main view appears.
pub const MAIN_VIEW_DELAY: Duration = Duration::from_secs(1);

pub const COMPLETE_STATUS: &str = "Processing complete!";
pub const PROCESSING_STATUS: &str = "Uploading and processing your document...";

/// What the picker or drop zone told us about a file before reading it.
#[derive(Clone, Debug, PartialEq)]
pub struct FileCandidate {
    pub name: String,
    pub mime: String,
    pub size: u64,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        let name = name.into();
        let mime = guess_mime(&name).to_string();
        Self { name, mime, size }
    }
}

/// MIME type from the file extension. The Dioxus file engine only exposes
/// names and sizes.
pub fn guess_mime(name: &str) -> &'static str {
    let extension = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("html" | "htm") => "text/html",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

pub fn validate_candidate(candidate: &FileCandidate, max_bytes: u64) -> Result<(), UploadError> {
    if !candidate.mime.contains("pdf") {
        return Err(UploadError::NotPdf);
    }
    if candidate.size > max_bytes {
        return Err(UploadError::TooLarge {
            size: candidate.size,
            limit: max_bytes,
        });
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UploadPhase {
    #[default]
    Idle,
    InProgress,
    Complete,
}

/// Visual state of the upload section.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UploadPanel {
    pub phase: UploadPhase,
    /// Bar width in percent.
    pub progress: f64,
    pub status: String,
    pub dragover: bool,
    /// Bumped on reset so the file input is re-created empty and the same
    /// file can be picked again.
    pub picker_generation: u32,
}

impl UploadPanel {
    pub fn start(&mut self) {
        self.phase = UploadPhase::InProgress;
        self.progress = 0.0;
        self.status = PROCESSING_STATUS.to_string();
        self.dragover = false;
    }

    pub fn complete(&mut self) {
        self.phase = UploadPhase::Complete;
        self.progress = 100.0;
        self.status = COMPLETE_STATUS.to_string();
    }

    pub fn reset(&mut self) {
        self.phase = UploadPhase::Idle;
        self.progress = 0.0;
        self.status.clear();
        self.dragover = false;
        self.picker_generation = self.picker_generation.wrapping_add(1);
    }
}

/// Random-walk progress that stalls at [`PROGRESS_CAP`]. It says nothing
/// about bytes on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UploadProgress {
    percent: f64,
}

impl UploadProgress {
    pub fn percent(&self) -> f64 {
        self.percent
    }

    pub fn advance(&mut self, rng: &mut impl Rng) -> f64 {
        self.percent = (self.percent + rng.gen_range(0.0..PROGRESS_MAX_STEP)).min(PROGRESS_CAP);
        self.percent
    }
}

/// Preview URL for when the backend does not serve the PDF back.
pub fn local_preview_url(bytes: &[u8]) -> String {
    format!("data:application/pdf;base64,{}", BASE64_STANDARD.encode(bytes))
}

/// POST the file and build the document record from the response.
pub async fn send_file<B: Backend + ?Sized>(backend: &B, file: UploadFile) -> ApiResult<Document> {
    let response = backend.upload(&file).await?;
    if let Some(message) = &response.message {
        tracing::info!(collection = %response.collection_name, "{message}");
    }
    let preview_url = response
        .pdf_url
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| local_preview_url(&file.bytes));
    Ok(Document {
        name: file.name,
        collection_name: response.collection_name,
        preview_url,
    })
}
