//! Analysis API router.
//!
//! Returns a composable `Router`. Routes are nested under `/api/`.
//!
//! Layer stack (outermost → innermost):
//! 1. CORS (answers preflight) → 2. `Cache-Control: no-store` → 3. Access log

use std::sync::Arc;

use axum::http::header::{AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::analysis::CaseAnalyzer;
use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::gateway::CompletionGateway;

/// Browser clients may send these on the analysis call.
pub const ALLOWED_HEADERS: [&str; 4] = ["authorization", "x-client-info", "apikey", "content-type"];

/// Build the analysis API router around a shared analyzer.
pub fn analysis_api_router<G: CompletionGateway>(analyzer: Arc<CaseAnalyzer<G>>) -> Router {
    let ctx = ApiContext::new(analyzer);

    let api = Router::new()
        .route("/analyze-case", post(endpoints::analyze::analyze::<G>))
        .route("/health", get(endpoints::health::check::<G>))
        .with_state(ctx);

    Router::new()
        .nest("/api", api)
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(cors_layer())
}

/// Any origin; fixed header allow-list; POST/GET/OPTIONS.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            CONTENT_TYPE,
        ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::config::GatewayConfig;
    use crate::gateway::MockGateway;

    fn configured() -> GatewayConfig {
        GatewayConfig {
            api_key: Some("test-key".into()),
            ..GatewayConfig::default()
        }
    }

    fn completion(arguments: serde_json::Value) -> String {
        json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "tool_calls": [{
                        "type": "function",
                        "function": {
                            "name": "provide_medical_analysis",
                            "arguments": arguments.to_string()
                        }
                    }]
                }
            }]
        })
        .to_string()
    }

    fn app_with(gateway: MockGateway, config: GatewayConfig) -> (Router, Arc<CaseAnalyzer<MockGateway>>) {
        let analyzer = Arc::new(CaseAnalyzer::new(gateway, config));
        (analysis_api_router(Arc::clone(&analyzer)), analyzer)
    }

    fn post_json(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/analyze-case")
            .header("Content-Type", "application/json")
            .header("Origin", "http://localhost:5173")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: axum::response::Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn fever_request() -> serde_json::Value {
        json!({
            "query": "What tests should I run?",
            "caseData": { "notes": "fever, cough", "images": [] }
        })
    }

    #[tokio::test]
    async fn analyze_returns_normalized_result() {
        let upstream = completion(json!({
            "diagnoses": [{ "condition": "Pneumonia", "confidence": 72, "reasoning": "Fever with cough" }],
            "suggestedTests": ["Chest X-ray", "CBC"],
            "recommendations": ["Hydration", "Follow up in 48h"]
        }));
        let (app, _) = app_with(MockGateway::replying(200, upstream), configured());

        let response = app.oneshot(post_json(fever_request())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
        assert_eq!(response.headers().get("cache-control").unwrap(), "no-store");

        let json = read_json(response).await;
        assert_eq!(json["query"], "What tests should I run?");
        assert_eq!(json["confidence"], json!(72));
        assert_eq!(json["suggestedTests"], json!(["Chest X-ray", "CBC"]));
        assert_eq!(json["recommendations"], json!(["Hydration", "Follow up in 48h"]));
    }

    #[tokio::test]
    async fn upstream_429_maps_to_429() {
        let (app, _) = app_with(MockGateway::replying(429, "too many"), configured());
        let response = app.oneshot(post_json(fever_request())).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            read_json(response).await,
            json!({ "error": "Rate limit exceeded. Please try again later." })
        );
    }

    #[tokio::test]
    async fn upstream_402_maps_to_402() {
        let (app, _) = app_with(MockGateway::replying(402, "pay up"), configured());
        let response = app.oneshot(post_json(fever_request())).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
        assert_eq!(
            read_json(response).await,
            json!({ "error": "AI credits exhausted. Please add credits to continue." })
        );
    }

    #[tokio::test]
    async fn missing_tool_call_returns_generic_500() {
        let body = json!({ "choices": [{ "message": { "content": "free text" } }] }).to_string();
        let (app, _) = app_with(MockGateway::replying(200, body), configured());
        let response = app.oneshot(post_json(fever_request())).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = read_json(response).await;
        assert_eq!(json, json!({ "error": "Failed to analyze case" }));
        assert!(json.get("diagnoses").is_none());
    }

    #[tokio::test]
    async fn malformed_arguments_return_500() {
        let body = json!({
            "choices": [{ "message": { "tool_calls": [{
                "function": { "name": "provide_medical_analysis", "arguments": "{\"diagnoses\": [" }
            }] } }]
        })
        .to_string();
        let (app, _) = app_with(MockGateway::replying(200, body), configured());
        let response = app.oneshot(post_json(fever_request())).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn missing_credential_returns_500_without_calling_gateway() {
        let (app, analyzer) = app_with(MockGateway::replying(200, "{}"), GatewayConfig::default());
        let response = app.oneshot(post_json(fever_request())).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(read_json(response).await["error"], "Failed to analyze case");
        assert_eq!(analyzer.gateway().call_count(), 0);
    }

    #[tokio::test]
    async fn null_case_data_is_accepted() {
        let upstream = completion(json!({ "diagnoses": [], "suggestedTests": [], "recommendations": [] }));
        let (app, analyzer) = app_with(MockGateway::replying(200, upstream), configured());
        let response = app
            .oneshot(post_json(json!({ "query": "General question", "caseData": null })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["confidence"], json!(0));

        let call = analyzer.gateway().last_call().unwrap();
        assert!(call.request.messages[1].content.starts_with("Query: General question"));
    }

    #[tokio::test]
    async fn invalid_json_returns_400_with_error_body() {
        let (app, _) = app_with(MockGateway::replying(200, "{}"), configured());
        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze-case")
            .header("Content-Type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["error"], "Invalid request body");
    }

    #[tokio::test]
    async fn preflight_is_answered_with_cors_headers() {
        let (app, analyzer) = app_with(MockGateway::replying(200, "{}"), configured());
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/analyze-case")
            .header("Origin", "https://app.example.org")
            .header("Access-Control-Request-Method", "POST")
            .header("Access-Control-Request-Headers", "content-type, apikey")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert!(response.status().is_success());
        let headers = response.headers();
        assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");

        let allowed = headers
            .get("access-control-allow-headers")
            .unwrap()
            .to_str()
            .unwrap()
            .to_ascii_lowercase();
        for header in ALLOWED_HEADERS {
            assert!(allowed.contains(header), "missing {header} in {allowed}");
        }

        let methods = headers
            .get("access-control-allow-methods")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(methods.contains("POST"));
        assert!(methods.contains("OPTIONS"));
        assert_eq!(analyzer.gateway().call_count(), 0);
    }

    #[tokio::test]
    async fn health_reports_configuration() {
        let (app, _) = app_with(MockGateway::replying(200, "{}"), GatewayConfig::default());
        let request = Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["gateway_configured"], false);
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let (app, _) = app_with(MockGateway::replying(200, "{}"), configured());
        let request = Request::builder()
            .uri("/nonexistent")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
