use std::time::Duration;

use super::types::ChatCompletionRequest;
use super::{CompletionGateway, GatewayError, RawResponse};
use crate::config::GatewayConfig;

/// reqwest-backed chat-completion client.
///
/// Only a connect timeout is set; the analysis call itself relies on the
/// transport defaults.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(endpoint: &str, connect_timeout_secs: u64) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .build()
            .map_err(|e| GatewayError::Client(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &GatewayConfig) -> Result<Self, GatewayError> {
        Self::new(&config.endpoint, config.connect_timeout_secs)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl CompletionGateway for HttpGateway {
    async fn complete(
        &self,
        request: &ChatCompletionRequest,
        api_key: &str,
    ) -> Result<RawResponse, GatewayError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    GatewayError::Transport(format!("cannot connect to {}", self.endpoint))
                } else if e.is_timeout() {
                    GatewayError::Transport("request timed out".into())
                } else {
                    GatewayError::Transport(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(format!("failed to read body: {e}")))?;

        Ok(RawResponse { status, body })
    }
}
