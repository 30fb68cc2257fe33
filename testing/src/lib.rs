//! # Ticket Desk Testing
//!
//! Testing utilities and fixtures for Ticket Desk.
//!
//! This crate provides:
//! - A fixed clock and environment for deterministic timestamps
//! - Builders for tickets and messages
//! - The canonical sample document used across the workspace tests
//!
//! ## Example
//!
//! ```
//! use ticket_desk_testing::{sample_document, store_with, FIXED_STATUS_CHANGE};
//!
//! let mut store = store_with(sample_document());
//! let ticket = store.resolve_ticket("t1").unwrap();
//! assert_eq!(ticket.ts_last_status_change.as_deref(), Some(FIXED_STATUS_CHANGE));
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;
use ticket_desk_core::environment::{Clock, DEFAULT_MODERATOR_ID};
use ticket_desk_core::{
    Author, Message, Ticket, TicketDocument, TicketEnvironment, TicketRepository, TicketStatus,
    TicketStore,
};

/// `ts_last_status_change` produced by [`test_environment`].
pub const FIXED_STATUS_CHANGE: &str = "2025-01-01 00:00:00.000000";

/// Mock implementations of environment traits.
pub mod mocks {
    use super::{Clock, NaiveDate, NaiveDateTime};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDateTime;
    /// use ticket_desk_core::environment::Clock;
    /// use ticket_desk_testing::mocks::FixedClock;
    ///
    /// let clock = FixedClock::new(NaiveDateTime::default());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: NaiveDateTime,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: NaiveDateTime) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> NaiveDateTime {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        let time = NaiveDate::from_ymd_opt(2025, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default();
        FixedClock::new(time)
    }
}

/// Builders for domain values.
pub mod fixtures {
    use super::{Author, Message, Ticket, TicketStatus};
    use serde_json::Map;

    /// A message in channel `c1` by author `u1`, with content derived from `id`.
    #[must_use]
    pub fn message(id: &str) -> Message {
        Message {
            id: id.to_string(),
            channel_id: "c1".to_string(),
            parent_channel_id: None,
            community_server_id: "s1".to_string(),
            timestamp: "2023-11-09 10:00:00.000000+00:00".to_string(),
            has_attachment: false,
            reference_msg_id: None,
            timestamp_insert: "2023-11-09 10:00:01.000000+00:00".to_string(),
            discussion_id: "d1".to_string(),
            author_id: "u1".to_string(),
            content: format!("message {id}"),
            msg_url: format!("https://discord.com/channels/s1/c1/{id}"),
            author: author("u1"),
            extra: Map::new(),
        }
    }

    /// A human author named after `id`.
    #[must_use]
    pub fn author(id: &str) -> Author {
        Author {
            id: id.to_string(),
            name: format!("user-{id}"),
            nickname: None,
            color: Some("#ffffff".to_string()),
            discriminator: Some("0".to_string()),
            avatar_url: None,
            is_bot: false,
            timestamp_insert: None,
            extra: Map::new(),
        }
    }

    /// Builder for [`Ticket`] values, open by default.
    #[derive(Debug, Clone)]
    pub struct TicketBuilder {
        ticket: Ticket,
    }

    impl TicketBuilder {
        /// Starts an open ticket raised from `msg_id`.
        #[must_use]
        pub fn new(id: &str, msg_id: &str) -> Self {
            Self {
                ticket: Ticket {
                    id: id.to_string(),
                    msg_id: msg_id.to_string(),
                    status: TicketStatus::Open,
                    resolved_by: None,
                    ts_last_status_change: None,
                    timestamp: "2023-11-09 10:00:00.000000+00:00".to_string(),
                    context_messages: Vec::new(),
                    extra: Map::new(),
                },
            }
        }

        /// Sets the context message ids.
        #[must_use]
        pub fn context<I, S>(mut self, ids: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            self.ticket.context_messages = ids.into_iter().map(Into::into).collect();
            self
        }

        /// Marks the ticket as already resolved.
        #[must_use]
        pub fn resolved(mut self, moderator_id: &str, changed_at: &str) -> Self {
            self.ticket.resolve(moderator_id, changed_at);
            self
        }

        /// Finishes the ticket.
        #[must_use]
        pub fn build(self) -> Ticket {
            self.ticket
        }
    }
}

/// Environment with [`mocks::test_clock`] and the placeholder moderator.
#[must_use]
pub fn test_environment() -> TicketEnvironment {
    TicketEnvironment::new(Arc::new(mocks::test_clock()), DEFAULT_MODERATOR_ID)
}

/// One open ticket `t1` raised from `m1` with context `[m1, m2]`, and
/// messages `m1`, `m2`, `m3`.
#[must_use]
pub fn sample_document() -> TicketDocument {
    TicketDocument {
        tickets: vec![
            fixtures::TicketBuilder::new("t1", "m1")
                .context(["m1", "m2"])
                .build(),
        ],
        messages: vec![
            fixtures::message("m1"),
            fixtures::message("m2"),
            fixtures::message("m3"),
        ],
    }
}

/// Three open tickets covering the lookup edge cases:
/// - `t1` raised from `m1`, context `[m2, m1]`
/// - `t2` whose originating message is missing
/// - `t3` raised from `m3`, context `[m3, nope]`
///
/// Messages `m1`, `m2`, `m3`.
#[must_use]
pub fn moderation_queue() -> TicketDocument {
    TicketDocument {
        tickets: vec![
            fixtures::TicketBuilder::new("t1", "m1")
                .context(["m2", "m1"])
                .build(),
            fixtures::TicketBuilder::new("t2", "missing").build(),
            fixtures::TicketBuilder::new("t3", "m3")
                .context(["m3", "nope"])
                .build(),
        ],
        messages: vec![
            fixtures::message("m1"),
            fixtures::message("m2"),
            fixtures::message("m3"),
        ],
    }
}

/// Store over `document` with [`test_environment`].
///
/// # Panics
///
/// Panics if `document` contains duplicate ticket ids.
#[must_use]
#[allow(clippy::expect_used)]
pub fn store_with(document: TicketDocument) -> TicketStore {
    TicketStore::new(document, test_environment()).expect("fixture documents have unique ticket ids")
}

/// In-memory repository over [`sample_document`].
#[must_use]
pub fn sample_repository() -> TicketRepository {
    TicketRepository::new(store_with(sample_document()))
}

// Re-export commonly used items
pub use fixtures::{TicketBuilder, message};
pub use mocks::{FixedClock, test_clock};
