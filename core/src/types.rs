//! Domain types for tickets and the messages they point at.
//!
//! The shapes here mirror the JSON document the store is loaded from, so
//! serde attributes double as the on-disk format. Timestamps are kept as the
//! strings found in the document and are never reparsed. Keys the types do
//! not model are kept in `extra` and written back unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Lifecycle status of a ticket.
///
/// Tickets only ever move from [`TicketStatus::Open`] to
/// [`TicketStatus::Resolved`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    /// Awaiting a moderator
    Open,
    /// Closed by a moderator
    Resolved,
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Resolved => write!(f, "resolved"),
        }
    }
}

/// A support request raised from a chat message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique identifier
    pub id: String,
    /// Identifier of the originating message
    pub msg_id: String,
    /// Current status
    pub status: TicketStatus,
    /// Moderator who resolved the ticket
    #[serde(default)]
    pub resolved_by: Option<String>,
    /// When the status last changed (`YYYY-MM-DD HH:MM:SS.ffffff`)
    #[serde(default)]
    pub ts_last_status_change: Option<String>,
    /// Creation time, as stored in the document
    pub timestamp: String,
    /// Ids of messages that make up the discussion around the ticket
    #[serde(default)]
    pub context_messages: Vec<String>,
    /// Keys not modelled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Ticket {
    /// Returns `true` while the ticket can still be resolved.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == TicketStatus::Open
    }

    /// Marks the ticket as resolved by `moderator_id` at `changed_at`.
    pub fn resolve(&mut self, moderator_id: impl Into<String>, changed_at: impl Into<String>) {
        self.status = TicketStatus::Resolved;
        self.resolved_by = Some(moderator_id.into());
        self.ts_last_status_change = Some(changed_at.into());
    }
}

/// Profile of a message author.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Unique identifier
    pub id: String,
    /// Account name
    pub name: String,
    /// Server-specific nickname
    #[serde(default)]
    pub nickname: Option<String>,
    /// Display color
    #[serde(default)]
    pub color: Option<String>,
    /// Legacy discriminator
    #[serde(default)]
    pub discriminator: Option<String>,
    /// Avatar image URL
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Whether the author is a bot account
    #[serde(default)]
    pub is_bot: bool,
    /// When the author record was captured
    #[serde(default)]
    pub timestamp_insert: Option<String>,
    /// Keys not modelled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A chat message. Messages are never modified by the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier
    pub id: String,
    /// Channel the message was posted in
    pub channel_id: String,
    /// Parent channel for thread messages
    #[serde(default)]
    pub parent_channel_id: Option<String>,
    /// Community server the channel belongs to
    pub community_server_id: String,
    /// When the message was posted
    pub timestamp: String,
    /// Whether the message carries an attachment
    #[serde(default)]
    pub has_attachment: bool,
    /// Message this one replies to
    #[serde(default)]
    pub reference_msg_id: Option<String>,
    /// When the message was captured
    pub timestamp_insert: String,
    /// Discussion the message belongs to
    pub discussion_id: String,
    /// Author identifier
    pub author_id: String,
    /// Text body
    pub content: String,
    /// Link back to the message
    pub msg_url: String,
    /// Author profile
    pub author: Author,
    /// Keys not modelled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A ticket joined with its originating message.
///
/// Built on every read; the stored [`Ticket`] is never modified to carry the
/// message. Serializes flat, as the ticket fields plus a `msg` key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketView {
    /// The stored ticket
    #[serde(flatten)]
    pub ticket: Ticket,
    /// Originating message, if it exists in the store
    pub msg: Option<Message>,
}

/// The JSON document the store is loaded from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketDocument {
    /// Tickets in load order
    #[serde(default)]
    pub tickets: Vec<Ticket>,
    /// Messages in load order
    #[serde(default)]
    pub messages: Vec<Message>,
}
