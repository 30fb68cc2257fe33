//! Application state for Axum handlers.

use ticket_desk_core::TicketRepository;

/// Application state shared across all HTTP handlers.
///
/// Cloned for each request; the repository is an `Arc`-backed handle.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Ticket repository
    pub repository: TicketRepository,
    /// Page size of `GET /tickets` when no `limit` is given
    pub default_limit: usize,
}

impl AppState {
    /// Default page size of `GET /tickets`.
    pub const DEFAULT_LIMIT: usize = 20;

    /// Create a new application state.
    #[must_use]
    pub const fn new(repository: TicketRepository) -> Self {
        Self {
            repository,
            default_limit: Self::DEFAULT_LIMIT,
        }
    }

    /// Override the default page size.
    #[must_use]
    pub const fn with_default_limit(mut self, default_limit: usize) -> Self {
        self.default_limit = default_limit;
        self
    }
}
