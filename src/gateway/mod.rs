//! Outbound chat-completion gateway.
//!
//! The gateway layer is transport only: it sends a prepared
//! `ChatCompletionRequest` and hands back the raw status and body.
//! Status classification and payload decoding belong to the analyzer,
//! so fakes only have to script an HTTP status and a body.

pub mod http;
pub mod mock;
pub mod schema;
pub mod types;

use std::future::Future;

use thiserror::Error;

pub use self::http::HttpGateway;
pub use mock::MockGateway;
pub use schema::*;
pub use types::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Gateway unreachable: {0}")]
    Transport(String),

    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Raw upstream answer, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Chat-completion transport abstraction (allows mocking).
pub trait CompletionGateway: Send + Sync + 'static {
    fn complete(
        &self,
        request: &ChatCompletionRequest,
        api_key: &str,
    ) -> impl Future<Output = Result<RawResponse, GatewayError>> + Send;
}
