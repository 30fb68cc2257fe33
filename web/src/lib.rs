//! Axum HTTP API for Ticket Desk.
//!
//! A thin shell over [`ticket_desk_core::TicketRepository`]: handlers bind
//! query parameters, make one repository call, and serialize the result.
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives at an Axum handler
//! 2. **Extract** query parameters (`limit`, `ticket_id`)
//! 3. **Call** the repository
//! 4. **Map** store rejections to `404 {"detail":"Ticket not found"}`
//! 5. **Return** JSON with 200
//!
//! # Example
//!
//! ```no_run
//! use ticket_desk_core::{JsonDocumentFile, TicketEnvironment, TicketRepository};
//! use ticket_desk_web::{AppState, build_router, cors_layer};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let file = JsonDocumentFile::new("tickets.json");
//! let repository = TicketRepository::open(file, TicketEnvironment::default(), false).await?;
//! let app = build_router(AppState::new(repository), cors_layer("http://localhost:3000")?);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5001").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export key types for convenience
pub use config::Config;
pub use error::AppError;
pub use routes::{build_router, cors_layer};
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
