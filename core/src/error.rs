//! Errors raised by the ticket store and its document file.

use crate::types::TicketStatus;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, querying or mutating tickets.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No ticket with the given id exists
    #[error("Ticket not found: {ticket_id}")]
    TicketNotFound {
        /// Requested ticket id
        ticket_id: String,
    },

    /// The ticket exists but its status does not allow the transition
    #[error("Ticket {ticket_id} is {status}, expected open")]
    InvalidState {
        /// Requested ticket id
        ticket_id: String,
        /// Status the ticket is currently in
        status: TicketStatus,
    },

    /// The document contains the same ticket id twice
    #[error("Duplicate ticket id in document: {ticket_id}")]
    DuplicateTicket {
        /// The repeated id
        ticket_id: String,
    },

    /// Reading or writing the document file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Document path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The document file is not a valid ticket document
    #[error("Invalid ticket document {}: {source}", .path.display())]
    Parse {
        /// Document path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory document could not be serialized
    #[error("Failed to serialize ticket document: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl StoreError {
    /// Shorthand for [`StoreError::TicketNotFound`].
    #[must_use]
    pub fn not_found(ticket_id: impl Into<String>) -> Self {
        Self::TicketNotFound {
            ticket_id: ticket_id.into(),
        }
    }

    /// Returns `true` when the request named a ticket that cannot be acted on,
    /// either because it is missing or because it is in the wrong state.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::TicketNotFound { .. } | Self::InvalidState { .. }
        )
    }
}
