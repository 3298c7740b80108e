//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;
use crate::gateway::CompletionGateway;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub gateway_configured: bool,
}

/// `GET /api/health`: liveness plus whether a gateway credential is set.
pub async fn check<G: CompletionGateway>(
    State(ctx): State<ApiContext<G>>,
) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
        gateway_configured: ctx.analyzer.is_configured(),
    })
}
