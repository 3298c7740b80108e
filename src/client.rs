//! Caller side of the analysis endpoint.
//!
//! `POST {base_url}/api/analyze-case` with an `AnalysisRequest`; non-2xx
//! answers carry `{ "error": string }`, which becomes the user-facing message.

use serde::Deserialize;
use thiserror::Error;

use crate::models::{AnalysisRequest, AnalysisResult, Case};

pub const ANALYZE_PATH: &str = "/api/analyze-case";
pub const FALLBACK_MESSAGE: &str = "Failed to analyze case";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Request rejected (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Unreadable response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Text shown to the user in an error notice.
    pub fn user_message(&self) -> &str {
        match self {
            ClientError::Rejected { message, .. } => message,
            ClientError::Transport(_) | ClientError::Decode(_) => FALLBACK_MESSAGE,
        }
    }
}

#[derive(Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AnalysisClient {
    base_url: String,
    http: reqwest::Client,
}

impl AnalysisClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: &str, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{ANALYZE_PATH}", self.base_url)
    }

    pub async fn analyze(
        &self,
        query: &str,
        case: Option<&Case>,
    ) -> Result<AnalysisResult, ClientError> {
        let request = AnalysisRequest::new(query, case);
        let response = self
            .http
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error)
                .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());
            tracing::warn!(status = status.as_u16(), %message, "Analysis request rejected");
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}
