use tracing::Instrument;
use uuid::Uuid;

use super::prompt::{build_context, build_user_prompt, SYSTEM_PROMPT};
use super::AnalysisError;
use crate::config::GatewayConfig;
use crate::gateway::{
    analysis_tool, decode_analysis, forced_analysis_choice, ChatCompletionRequest, ChatMessage,
    CompletionGateway, RawResponse,
};
use crate::models::{AnalysisRequest, AnalysisResult};

/// Turns an `AnalysisRequest` into one forced-function-call round trip
/// and normalizes the answer.
///
/// Stateless between calls: no retry, no cache.
pub struct CaseAnalyzer<G> {
    gateway: G,
    config: GatewayConfig,
}

impl<G: CompletionGateway> CaseAnalyzer<G> {
    pub fn new(gateway: G, config: GatewayConfig) -> Self {
        Self { gateway, config }
    }

    pub fn is_configured(&self) -> bool {
        self.config.has_credential()
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn build_completion_request(&self, request: &AnalysisRequest) -> ChatCompletionRequest {
        let context = build_context(request.case_data.as_ref());
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(build_user_prompt(&context, &request.query)),
            ],
            tools: vec![analysis_tool()],
            tool_choice: forced_analysis_choice(),
        }
    }

    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let analysis_id = Uuid::new_v4();
        let span = tracing::info_span!("analyze_case", %analysis_id);
        self.analyze_inner(request).instrument(span).await
    }

    async fn analyze_inner(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, AnalysisError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(AnalysisError::Configuration)?;

        let images = request
            .case_data
            .as_ref()
            .map(|c| c.image_count())
            .unwrap_or(0);
        tracing::info!(
            query_len = request.query.len(),
            images,
            model = %self.config.model,
            "Analyzing case"
        );

        let completion = self.build_completion_request(request);
        let raw = self.gateway.complete(&completion, api_key).await?;
        tracing::debug!(status = raw.status, "Gateway responded");

        let body = classify_response(raw)?;
        let payload = decode_analysis(&body)?;
        let result = AnalysisResult::from_payload(request.query.clone(), payload);

        tracing::info!(
            diagnoses = result.diagnoses.len(),
            confidence = result.confidence,
            "Analysis complete"
        );
        Ok(result)
    }
}

/// Map the upstream status to an outcome. 429 and 402 are distinguished;
/// every other non-2xx status is a generic upstream error.
pub fn classify_response(raw: RawResponse) -> Result<String, AnalysisError> {
    if raw.is_success() {
        return Ok(raw.body);
    }
    match raw.status {
        429 => Err(AnalysisError::RateLimited),
        402 => Err(AnalysisError::QuotaExhausted),
        status => Err(AnalysisError::Upstream {
            status,
            body: raw.body,
        }),
    }
}
