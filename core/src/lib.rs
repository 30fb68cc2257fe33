//! # Ticket Desk Core
//!
//! Ticket and message store behind the Ticket Desk moderation API.
//!
//! The whole ticket collection is loaded once from a JSON document and kept
//! in memory for the life of the process. Moderators list tickets, resolve
//! open ones, remove them, and read the messages that give them context.
//!
//! ## Layers
//!
//! - [`types`]: tickets, messages, and the document they are loaded from
//! - [`store::TicketStore`]: synchronous lookups and mutations by ticket id
//! - [`repository::TicketRepository`]: shared handle that serializes
//!   mutations behind one lock and optionally writes the document back
//! - [`environment`]: injected clock and moderator identity
//!
//! ## Example
//!
//! ```no_run
//! use ticket_desk_core::{JsonDocumentFile, TicketEnvironment, TicketRepository};
//!
//! # async fn run() -> Result<(), ticket_desk_core::StoreError> {
//! let file = JsonDocumentFile::new("../data/awesome_tickets.json");
//! let repository = TicketRepository::open(file, TicketEnvironment::default(), false).await?;
//!
//! for view in repository.list_tickets(Some(20)).await {
//!     println!("{} {}", view.ticket.id, view.ticket.status);
//! }
//!
//! let resolved = repository.resolve_ticket("t1").await?;
//! assert_eq!(resolved.resolved_by.as_deref(), Some("moderator_id"));
//! # Ok(())
//! # }
//! ```

pub mod environment;
pub mod error;
pub mod persistence;
pub mod repository;
pub mod store;
pub mod types;

pub use environment::{Clock, SystemClock, TicketEnvironment};
pub use error::StoreError;
pub use persistence::JsonDocumentFile;
pub use repository::TicketRepository;
pub use store::TicketStore;
pub use types::{Author, Message, Ticket, TicketDocument, TicketStatus, TicketView};
