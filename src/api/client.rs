use super::Backend;
use super::wire::{ChatReply, ChatRequest, ErrorBody, HealthStatus, UploadFile, UploadResponse};
use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

/// reqwest-backed client for the document backend.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &Config) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = match config.request_timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };
        let client = builder.build().unwrap_or_else(|err| {
            tracing::warn!("falling back to default http client: {err}");
            Client::new()
        });
        Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Decode a JSON body, turning non-OK statuses into `ApiError::Backend`
/// carrying the body's `error` field (or `fallback` when it has none).
async fn decode<T: DeserializeOwned>(response: reqwest::Response, fallback: &str) -> ApiResult<T> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        return Ok(serde_json::from_str(&body)?);
    }
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|parsed| parsed.error)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());
    Err(ApiError::Backend {
        status: status.as_u16(),
        message,
    })
}

#[async_trait(?Send)]
impl Backend for HttpBackend {
    async fn upload(&self, file: &UploadFile) -> ApiResult<UploadResponse> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime)?;
        let form = Form::new().part("file", part);

        tracing::info!(name = %file.name, bytes = file.bytes.len(), "uploading document");
        let response = self
            .client
            .post(self.url("upload"))
            .multipart(form)
            .send()
            .await?;
        decode(response, "Upload failed").await
    }

    async fn chat(&self, request: &ChatRequest) -> ApiResult<ChatReply> {
        let response = self
            .client
            .post(self.url("chat"))
            .json(request)
            .send()
            .await?;
        decode(response, "Chat failed").await
    }

    async fn health(&self) -> ApiResult<HealthStatus> {
        let response = self.client.get(self.url("")).send().await?;
        decode(response, "Backend unavailable").await
    }
}
