/// HTTP contract of the document backend.
///
/// The backend ingests an uploaded PDF into a collection and answers
/// questions about it:
///
/// - `POST /upload` (multipart `file`) → `{collection_name, pdf_url?}`
/// - `POST /chat` (JSON `{query, session_id, collection_name}`) →
///   `{response, sources?, chat_history?}`
/// - `GET /` → `{message, status}`
///
/// Any non-OK status carries `{error}`.
mod client;
mod wire;

use crate::error::ApiResult;
use async_trait::async_trait;

pub use client::HttpBackend;
pub use wire::{ChatReply, ChatRequest, HealthStatus, UploadFile, UploadResponse};

/// The calls the UI makes against the backend. Futures are not `Send`
/// because the browser fetch API is single-threaded.
#[async_trait(?Send)]
pub trait Backend {
    async fn upload(&self, file: &UploadFile) -> ApiResult<UploadResponse>;
    async fn chat(&self, request: &ChatRequest) -> ApiResult<ChatReply>;
    async fn health(&self) -> ApiResult<HealthStatus>;
}
