//! Ticket endpoints.
//!
//! Each handler binds its query parameters, makes one repository call and
//! returns the result as JSON. Store rejections become
//! `404 {"detail":"Ticket not found"}` through [`AppError`].

use crate::error::AppError;
use crate::state::AppState;
use crate::WebResult;
use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use ticket_desk_core::{Message, Ticket, TicketView};

/// Query parameters of `GET /tickets`.
#[derive(Debug, Default, Deserialize)]
pub struct ListTicketsQuery {
    /// Maximum number of tickets to return
    pub limit: Option<usize>,
}

/// Query parameters of the single-ticket endpoints.
#[derive(Debug, Deserialize)]
pub struct TicketIdQuery {
    /// Ticket to act on
    pub ticket_id: String,
}

/// List tickets with their originating message.
///
/// # Endpoint
///
/// ```text
/// GET /tickets?limit=20
/// ```
///
/// # Errors
///
/// Returns 400 if `limit` is zero.
pub async fn list_tickets(
    State(state): State<AppState>,
    Query(query): Query<ListTicketsQuery>,
) -> WebResult<Json<Vec<TicketView>>> {
    let limit = query.limit.unwrap_or(state.default_limit);
    if limit == 0 {
        return Err(AppError::bad_request("limit must be a positive integer"));
    }

    let tickets = state.repository.list_tickets(Some(limit)).await;
    tracing::debug!(limit, returned = tickets.len(), "Listed tickets");

    Ok(Json(tickets))
}

/// Mark an open ticket as resolved.
///
/// # Endpoint
///
/// ```text
/// PUT /tickets/resolve?ticket_id=t1
/// ```
///
/// # Errors
///
/// Returns 404 if the ticket does not exist or is not open.
pub async fn resolve_ticket(
    State(state): State<AppState>,
    Query(query): Query<TicketIdQuery>,
) -> WebResult<Json<Ticket>> {
    let ticket = state.repository.resolve_ticket(&query.ticket_id).await?;
    Ok(Json(ticket))
}

/// Remove a ticket.
///
/// # Endpoint
///
/// ```text
/// DELETE /tickets/delete?ticket_id=t1
/// ```
///
/// # Errors
///
/// Returns 404 if the ticket does not exist.
pub async fn remove_ticket(
    State(state): State<AppState>,
    Query(query): Query<TicketIdQuery>,
) -> WebResult<Json<Ticket>> {
    let ticket = state.repository.remove_ticket(&query.ticket_id).await?;
    Ok(Json(ticket))
}

/// Messages that give context to a ticket.
///
/// # Endpoint
///
/// ```text
/// GET /tickets/get_messages?ticket_id=t1
/// ```
///
/// # Errors
///
/// Returns 404 if the ticket does not exist.
pub async fn get_messages(
    State(state): State<AppState>,
    Query(query): Query<TicketIdQuery>,
) -> WebResult<Json<Vec<Message>>> {
    let messages = state.repository.context_messages(&query.ticket_id).await?;
    Ok(Json(messages))
}
