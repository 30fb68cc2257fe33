//! Ticket Desk HTTP server.
//!
//! Loads the ticket document once, then serves the moderation API until
//! Ctrl+C or SIGTERM.

use anyhow::Context;
use std::sync::Arc;
use ticket_desk_core::{JsonDocumentFile, SystemClock, TicketEnvironment, TicketRepository};
use ticket_desk_web::{AppState, Config, build_router, cors_layer};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.server.log_level).unwrap_or_else(|_| {
                "ticket_desk_core=info,ticket_desk_web=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Ticket Desk HTTP Server");
    info!(
        tickets_file = %config.tickets.file.display(),
        persist = config.tickets.persist,
        cors_origin = %config.cors.allowed_origin,
        "Configuration loaded"
    );

    // Load the ticket document
    let env = TicketEnvironment::new(Arc::new(SystemClock), config.tickets.moderator_id.clone());
    let file = JsonDocumentFile::new(&config.tickets.file);
    let repository = TicketRepository::open(file, env, config.tickets.persist)
        .await
        .with_context(|| {
            format!(
                "failed to load ticket document {}",
                config.tickets.file.display()
            )
        })?;

    let (tickets, messages) = repository
        .state(|store| (store.ticket_count(), store.message_count()))
        .await;
    info!(tickets, messages, "Ticket store ready");

    // Build router
    let state = AppState::new(repository).with_default_limit(config.tickets.default_limit);
    let app = build_router(state, cors_layer(&config.cors.allowed_origin)?);

    // Create TCP listener
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on {}", addr);

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Graceful shutdown signal handler.
///
/// Waits for:
/// - Ctrl+C (SIGINT)
/// - SIGTERM (in production environments)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
