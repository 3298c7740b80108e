//! HTTP surface of the analysis service.
//!
//! Exposes `POST /api/analyze-case` and `GET /api/health` under a
//! permissive CORS layer so the browser UI can call it from any origin.
//!
//! The router is composable: `analysis_api_router()` returns a `Router`
//! that can be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::analysis_api_router;
pub use server::{start_api_server, ApiServer, ApiSession, ServerError};
pub use types::ApiContext;
