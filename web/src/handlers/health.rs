//! Health check endpoint.
//!
//! Used by load balancers and orchestrators for liveness probing.

use axum::{Json, http::StatusCode};

/// Simple health check endpoint (for basic liveness).
///
/// Returns 200 OK to indicate the service is running.
/// This endpoint does NOT touch the ticket store.
///
/// # Endpoint
///
/// ```text
/// GET /healthz
/// ```
///
/// # Response
///
/// ```json
/// "OK"
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, Json<&'static str>) {
    (StatusCode::OK, Json("OK"))
}
