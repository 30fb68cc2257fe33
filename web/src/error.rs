//! Error types for web handlers.
//!
//! This module bridges store errors and HTTP responses by implementing
//! Axum's `IntoResponse` trait. Every error body has the shape
//! `{"detail": "..."}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;
use ticket_desk_core::StoreError;

/// Detail returned for every rejected ticket lookup or transition.
pub const TICKET_NOT_FOUND: &str = "Ticket not found";

/// Application error type for web handlers.
///
/// # Examples
///
/// ```ignore
/// async fn handler(State(state): State<AppState>) -> Result<Json<Ticket>, AppError> {
///     let ticket = state.repository.resolve_ticket(&id).await?;
///     Ok(Json(ticket))
/// }
/// ```
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Error detail (user-facing)
    detail: String,
    /// Internal error (for logging, not exposed to client)
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, detail: String) -> Self {
        Self {
            status,
            detail,
            source: None,
        }
    }

    /// Create a new error with a source error.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Create a 400 Bad Request error.
    #[must_use]
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail.into())
    }

    /// Create a 404 Not Found error.
    #[must_use]
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, detail.into())
    }

    /// Create a 500 Internal Server Error.
    #[must_use]
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, detail.into())
    }

    /// HTTP status of the response this error renders to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// User-facing detail.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status.as_u16(), self.detail)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Error response body (JSON).
#[derive(Debug, Serialize)]
struct ErrorResponse {
    /// Human-readable error detail.
    detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            if let Some(source) = &self.source {
                tracing::error!(
                    status = %self.status,
                    detail = %self.detail,
                    error = %source,
                    "Internal server error"
                );
            } else {
                tracing::error!(
                    status = %self.status,
                    detail = %self.detail,
                    "Internal server error"
                );
            }
        }

        let body = ErrorResponse {
            detail: self.detail,
        };

        (self.status, Json(body)).into_response()
    }
}

/// Missing tickets and tickets in the wrong state both answer 404 with the
/// same detail; everything else is a server error.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        if err.is_rejection() {
            tracing::debug!(error = %err, "Ticket request rejected");
            Self::not_found(TICKET_NOT_FOUND)
        } else {
            Self::internal("An internal error occurred").with_source(err.into())
        }
    }
}
