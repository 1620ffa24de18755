use async_trait::async_trait;
use reqwest::multipart;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Ways a call to the analysis backend can go wrong.
#[derive(Debug, Error, Clone)]
pub enum BackendError {
    /// Non-success status; the message comes from the backend's JSON
    /// `error` field when it sent one.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The backend could not be reached at all.
    #[error("{0}")]
    Unreachable(String),

    /// Success status but a body that is not JSON.
    #[error("{0}")]
    Malformed(String),
}

/// The two calls the dashboard makes against the analysis service.
/// Kept behind a trait so tests can swap in a stub.
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    /// Forwards an uploaded CSV and returns the backend's raw response.
    async fn analyze(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Value, BackendError>;

    /// Fetches the canned sample analysis.
    async fn sample(&self) -> Result<Value, BackendError>;
}

/// Talks to the real backend over HTTP.
pub struct HttpAnalysisApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAnalysisApi {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    async fn into_payload(
        response: reqwest::Response,
        fallback: &str,
    ) -> Result<Value, BackendError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| BackendError::Malformed(e.to_string()));
        }

        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| fallback.to_string());
        Err(BackendError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl AnalysisApi for HttpAnalysisApi {
    async fn analyze(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Value, BackendError> {
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| BackendError::Unreachable(e.to_string()))?;
        let form = multipart::Form::new().part("file", part);

        debug!(file = %file_name, "posting CSV to analysis backend");
        let response = self
            .client
            .post(format!("{}/api/upload", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| BackendError::Unreachable(e.to_string()))?;
        Self::into_payload(response, "Analysis failed").await
    }

    async fn sample(&self) -> Result<Value, BackendError> {
        debug!("fetching sample analysis from backend");
        let response = self
            .client
            .get(format!("{}/api/sample", self.base_url))
            .send()
            .await
            .map_err(|e| BackendError::Unreachable(e.to_string()))?;
        Self::into_payload(response, "Failed to load sample data").await
    }
}
