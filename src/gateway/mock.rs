use std::sync::Mutex;

use super::types::ChatCompletionRequest;
use super::{CompletionGateway, GatewayError, RawResponse};

/// A call observed by `MockGateway`.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub request: ChatCompletionRequest,
    pub api_key: String,
}

/// Mock gateway for testing: replays a scripted outcome and records calls.
pub struct MockGateway {
    outcome: Result<RawResponse, GatewayError>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockGateway {
    pub fn replying(status: u16, body: impl Into<String>) -> Self {
        Self {
            outcome: Ok(RawResponse::new(status, body)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: GatewayError) -> Self {
        Self {
            outcome: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }
}

impl CompletionGateway for MockGateway {
    async fn complete(
        &self,
        request: &ChatCompletionRequest,
        api_key: &str,
    ) -> Result<RawResponse, GatewayError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedCall {
                request: request.clone(),
                api_key: api_key.to_string(),
            });
        self.outcome.clone()
    }
}
