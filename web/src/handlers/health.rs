//! Health check endpoint.
//!
//! Used by load balancers and monitoring systems to verify service health.

use crate::WebResult;
use crate::state::AppState;
use axum::{Json, extract::State};
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: &'static str,
    /// Service version
    pub version: &'static str,
    /// Number of live todos
    pub todos: usize,
}

/// Liveness check that also proves the store is readable.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {"status":"ok","version":"0.1.0","todos":3}
/// ```
///
/// # Errors
///
/// 500 if the store is unusable.
#[allow(clippy::unused_async)]
pub async fn health_check(State(state): State<AppState>) -> WebResult<Json<HealthResponse>> {
    let todos = state.service().repository().len()?;
    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        todos,
    }))
}
