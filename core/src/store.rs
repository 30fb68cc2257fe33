//! In-memory ticket store.
//!
//! [`TicketStore`] owns the loaded [`TicketDocument`] and serves every
//! lookup and mutation by ticket id. It is synchronous and unguarded; share
//! it through [`crate::repository::TicketRepository`].

use crate::environment::TicketEnvironment;
use crate::error::StoreError;
use crate::types::{Message, Ticket, TicketDocument, TicketView};
use std::collections::HashSet;

/// Tickets and messages held in load order.
#[derive(Debug)]
pub struct TicketStore {
    document: TicketDocument,
    env: TicketEnvironment,
}

impl TicketStore {
    /// Creates a store over `document`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateTicket`] if two tickets share an id.
    pub fn new(document: TicketDocument, env: TicketEnvironment) -> Result<Self, StoreError> {
        let mut seen = HashSet::with_capacity(document.tickets.len());
        for ticket in &document.tickets {
            if !seen.insert(ticket.id.as_str()) {
                return Err(StoreError::DuplicateTicket {
                    ticket_id: ticket.id.clone(),
                });
            }
        }

        tracing::debug!(
            tickets = document.tickets.len(),
            messages = document.messages.len(),
            "Ticket store initialized"
        );

        Ok(Self { document, env })
    }

    /// The underlying document, as it would be written back.
    #[must_use]
    pub const fn document(&self) -> &TicketDocument {
        &self.document
    }

    /// Returns the number of tickets
    #[must_use]
    pub fn ticket_count(&self) -> usize {
        self.document.tickets.len()
    }

    /// Returns the number of messages
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.document.messages.len()
    }

    /// Returns a ticket by ID
    #[must_use]
    pub fn get_ticket(&self, ticket_id: &str) -> Option<&Ticket> {
        self.document.tickets.iter().find(|t| t.id == ticket_id)
    }

    fn position(&self, ticket_id: &str) -> Option<usize> {
        self.document.tickets.iter().position(|t| t.id == ticket_id)
    }

    /// Copy of a ticket and its position, taken before a mutation.
    pub(crate) fn snapshot(&self, ticket_id: &str) -> Option<(usize, Ticket)> {
        let index = self.position(ticket_id)?;
        self.document
            .tickets
            .get(index)
            .cloned()
            .map(|ticket| (index, ticket))
    }

    /// Puts a [`Self::snapshot`] back.
    ///
    /// A ticket with the same id is overwritten; otherwise the ticket is
    /// reinserted at `index`.
    pub(crate) fn restore(&mut self, index: usize, ticket: Ticket) {
        if let Some(slot) = self.document.tickets.iter_mut().find(|t| t.id == ticket.id) {
            *slot = ticket;
        } else {
            let index = index.min(self.document.tickets.len());
            self.document.tickets.insert(index, ticket);
        }
    }

    fn message(&self, msg_id: &str) -> Option<&Message> {
        self.document.messages.iter().find(|m| m.id == msg_id)
    }

    /// Originating message of a ticket.
    ///
    /// Absent when either the ticket or its message is missing.
    #[must_use]
    pub fn find_message_for_ticket(&self, ticket_id: &str) -> Option<&Message> {
        self.get_ticket(ticket_id)
            .and_then(|ticket| self.message(&ticket.msg_id))
    }

    /// Tickets in store order, each joined with its originating message.
    ///
    /// `limit` keeps at most that many tickets from the front.
    #[must_use]
    pub fn list_tickets(&self, limit: Option<usize>) -> Vec<TicketView> {
        let limit = limit.unwrap_or(usize::MAX);

        self.document
            .tickets
            .iter()
            .take(limit)
            .map(|ticket| TicketView {
                ticket: ticket.clone(),
                msg: self.message(&ticket.msg_id).cloned(),
            })
            .collect()
    }

    /// Resolves an open ticket and returns its new state.
    ///
    /// # Errors
    ///
    /// - [`StoreError::TicketNotFound`] if no ticket has this id
    /// - [`StoreError::InvalidState`] if the ticket is not open
    pub fn resolve_ticket(&mut self, ticket_id: &str) -> Result<Ticket, StoreError> {
        let changed_at = self.env.status_change_timestamp();
        let moderator_id = self.env.moderator_id.clone();

        let ticket = self
            .document
            .tickets
            .iter_mut()
            .find(|t| t.id == ticket_id)
            .ok_or_else(|| StoreError::not_found(ticket_id))?;

        if !ticket.is_open() {
            return Err(StoreError::InvalidState {
                ticket_id: ticket_id.to_string(),
                status: ticket.status,
            });
        }

        ticket.resolve(moderator_id, changed_at);
        tracing::info!(
            ticket_id,
            resolved_by = ticket.resolved_by.as_deref(),
            "Ticket resolved"
        );

        Ok(ticket.clone())
    }

    /// Removes a ticket and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TicketNotFound`] if no ticket has this id.
    pub fn remove_ticket(&mut self, ticket_id: &str) -> Result<Ticket, StoreError> {
        let index = self
            .position(ticket_id)
            .ok_or_else(|| StoreError::not_found(ticket_id))?;

        let ticket = self.document.tickets.remove(index);
        tracing::info!(ticket_id, "Ticket removed");

        Ok(ticket)
    }

    /// Messages listed in a ticket's `context_messages`, in store order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TicketNotFound`] if no ticket has this id.
    pub fn context_messages(&self, ticket_id: &str) -> Result<Vec<Message>, StoreError> {
        let ticket = self
            .get_ticket(ticket_id)
            .ok_or_else(|| StoreError::not_found(ticket_id))?;

        let wanted: HashSet<&str> = ticket.context_messages.iter().map(String::as_str).collect();

        Ok(self
            .document
            .messages
            .iter()
            .filter(|m| wanted.contains(m.id.as_str()))
            .cloned()
            .collect())
    }
}
