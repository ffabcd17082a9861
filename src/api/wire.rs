use crate::types::{SessionId, SourceCitation};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UploadResponse {
    pub collection_name: String,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatRequest {
    pub query: String,
    pub session_id: SessionId,
    pub collection_name: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ChatReply {
    pub response: String,
    /// `None` when the backend sent no structured sources; the reply text is
    /// then scanned for a `Sources:` line instead.
    #[serde(default)]
    pub sources: Option<Vec<SourceCitation>>,
    #[serde(default)]
    pub chat_history: Option<serde_json::Value>,
    #[serde(default)]
    pub thread_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub message: Option<String>,
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

#[derive(Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// A file ready to send to `/upload`.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}
