//! HTTP client for the chat backend.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::error::BackendError;
use super::types::{ChatReply, ChatRequest, ValidationRequest, ValidationResult};

/// Trait for the remote collaborator behind the chat widget.
///
/// Each call is a single attempt: no retry, no backoff, no timeout.
#[async_trait]
pub trait ChatBackend: Send + Sync + std::fmt::Debug {
    /// `POST /chat` with the user's message.
    async fn chat(&self, message: &str) -> Result<ChatReply, BackendError>;

    /// `POST /validate-report` for a previously rendered report.
    async fn validate_report(
        &self,
        request: &ValidationRequest,
    ) -> Result<ValidationResult, BackendError>;

    /// `GET /health`; any 2xx counts as healthy.
    async fn health(&self) -> Result<(), BackendError>;
}

/// [`ChatBackend`] over HTTP with `reqwest`.
#[derive(Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: Url,
}

impl std::fmt::Debug for HttpBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBackend")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl HttpBackend {
    /// Create a client for the backend at `base_url` (e.g. `http://localhost:5122`).
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing `reqwest` client.
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self, BackendError> {
        let mut base_url = Url::parse(base_url.trim())?;
        // Url::join drops the last path segment unless it ends with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { http, base_url })
    }

    /// Normalized base URL, always ending with `/`.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        Ok(self.base_url.join(path)?)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, BackendError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        tracing::debug!(url = %url, "Backend POST");

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(BackendError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(BackendError::Status(status));
        }

        resp.json::<T>().await.map_err(BackendError::Decode)
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn chat(&self, message: &str) -> Result<ChatReply, BackendError> {
        let body = ChatRequest {
            message: message.to_string(),
        };
        self.post_json("chat", &body).await
    }

    async fn validate_report(
        &self,
        request: &ValidationRequest,
    ) -> Result<ValidationResult, BackendError> {
        self.post_json("validate-report", request).await
    }

    async fn health(&self) -> Result<(), BackendError> {
        let url = self.endpoint("health")?;
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(BackendError::Transport)?;

        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(BackendError::Status(status))
        }
    }
}
