//! Case analysis endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::gateway::CompletionGateway;
use crate::models::{AnalysisRequest, AnalysisResult};

/// `POST /api/analyze-case`: one forced-function-call round trip.
///
/// The query is forwarded as-is; emptiness is checked by the caller.
pub async fn analyze<G: CompletionGateway>(
    State(ctx): State<ApiContext<G>>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let result = ctx.analyzer.analyze(&request).await?;
    Ok(Json(result))
}
