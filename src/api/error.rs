//! API error types with `{ "error": string }` JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::analysis::AnalysisError;

pub const RATE_LIMITED_MESSAGE: &str = "Rate limit exceeded. Please try again later.";
pub const QUOTA_EXHAUSTED_MESSAGE: &str = "AI credits exhausted. Please add credits to continue.";
pub const GENERIC_MESSAGE: &str = "Failed to analyze case";
pub const BAD_REQUEST_MESSAGE: &str = "Invalid request body";

/// Error body returned to the UI.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Analysis(AnalysisError::RateLimited) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Analysis(AnalysisError::QuotaExhausted) => StatusCode::PAYMENT_REQUIRED,
            ApiError::Analysis(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Analysis(AnalysisError::RateLimited) => {
                tracing::warn!("Upstream rate limit hit");
                RATE_LIMITED_MESSAGE
            }
            ApiError::Analysis(AnalysisError::QuotaExhausted) => {
                tracing::warn!("Upstream credits exhausted");
                QUOTA_EXHAUSTED_MESSAGE
            }
            ApiError::Analysis(AnalysisError::Upstream { status, body }) => {
                tracing::error!(upstream_status = status, body = %body, "AI gateway error");
                GENERIC_MESSAGE
            }
            ApiError::Analysis(AnalysisError::Configuration) => {
                tracing::error!("AI gateway credential is not configured");
                GENERIC_MESSAGE
            }
            ApiError::Analysis(err) => {
                tracing::error!(error = %err, "Case analysis failed");
                GENERIC_MESSAGE
            }
            ApiError::BadRequest(detail) => {
                tracing::warn!(%detail, "Rejected analysis request");
                BAD_REQUEST_MESSAGE
            }
        };

        (
            status,
            Json(ErrorBody {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
