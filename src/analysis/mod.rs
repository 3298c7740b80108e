//! Case analysis: prompt construction and the request handler core.

pub mod handler;
pub mod prompt;

pub use handler::CaseAnalyzer;
pub use prompt::*;

use thiserror::Error;

use crate::gateway::{DecodeError, GatewayError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("AI gateway credential is not configured")]
    Configuration,

    #[error("AI gateway rate limit exceeded")]
    RateLimited,

    #[error("AI gateway credits exhausted")]
    QuotaExhausted,

    #[error("AI gateway error (status {status})")]
    Upstream { status: u16, body: String },

    #[error("AI gateway transport error: {0}")]
    Transport(String),

    #[error("Failed to decode AI response: {0}")]
    Decode(#[from] DecodeError),
}

impl From<GatewayError> for AnalysisError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Transport(msg) | GatewayError::Client(msg) => {
                AnalysisError::Transport(msg)
            }
        }
    }
}
