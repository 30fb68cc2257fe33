//! Router configuration.
//!
//! Builds the complete Axum router with all endpoints and middleware.

use crate::handlers::{health_check, tickets};
use crate::state::AppState;
use axum::{
    Router,
    http::HeaderValue,
    routing::{delete, get, put},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

/// CORS policy for the moderator front end.
///
/// Only `origin` is allowed. Methods and headers are mirrored from the
/// preflight request and credentials are allowed.
///
/// # Errors
///
/// Returns an error if `origin` is not a valid header value.
pub fn cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
    let origin = HeaderValue::from_str(origin)?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::exact(origin))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

/// Build the complete Axum router.
///
/// Routes:
/// - `GET /healthz`
/// - `GET /tickets`
/// - `PUT /tickets/resolve`
/// - `DELETE /tickets/delete`
/// - `GET /tickets/get_messages`
///
/// Every response carries an `x-request-id` header and is traced.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/tickets", get(tickets::list_tickets))
        .route("/tickets/resolve", put(tickets::resolve_ticket))
        .route("/tickets/delete", delete(tickets::remove_ticket))
        .route("/tickets/get_messages", get(tickets::get_messages))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors),
        )
}
