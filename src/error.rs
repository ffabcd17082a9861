use thiserror::Error;

/// Client-side rejection of a picked or dropped file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Please select a PDF file.")]
    NotPdf,
    #[error("File size must be less than {}MB.", limit / (1024 * 1024))]
    TooLarge { size: u64, limit: u64 },
    #[error("Could not read {0}.")]
    Unreadable(String),
}

/// Failure talking to the document backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{0}")]
    Network(String),
    /// Non-OK status; `message` is the body's `error` field when present.
    #[error("{message}")]
    Backend { status: u16, message: String },
    #[error("invalid response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
