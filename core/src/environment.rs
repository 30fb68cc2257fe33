//! Injected dependencies for the ticket store.
//!
//! Time and the acting moderator are provided through [`TicketEnvironment`]
//! so tests can pin both.

use chrono::{Local, NaiveDateTime};
use std::fmt;
use std::sync::Arc;

/// Moderator recorded on resolution until real caller identity exists.
pub const DEFAULT_MODERATOR_ID: &str = "moderator_id";

/// Format of `ts_last_status_change`, e.g. `2023-11-09 14:03:07.512345`.
pub const STATUS_CHANGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Clock trait - abstracts time operations for testability
///
/// Returns local wall-clock time; status-change timestamps carry no
/// timezone.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDateTime;
/// use ticket_desk_core::environment::Clock;
///
/// struct Epoch;
/// impl Clock for Epoch {
///     fn now(&self) -> NaiveDateTime {
///         NaiveDateTime::default()
///     }
/// }
///
/// assert_eq!(Epoch.now(), NaiveDateTime::default());
/// ```
pub trait Clock: Send + Sync {
    /// Get the current local time
    fn now(&self) -> NaiveDateTime;
}

/// Production clock backed by the process's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Environment dependencies for the ticket store
#[derive(Clone)]
pub struct TicketEnvironment {
    /// Clock for status-change timestamps
    pub clock: Arc<dyn Clock>,
    /// Identity recorded in `resolved_by`
    pub moderator_id: String,
}

impl TicketEnvironment {
    /// Creates a new `TicketEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, moderator_id: impl Into<String>) -> Self {
        Self {
            clock,
            moderator_id: moderator_id.into(),
        }
    }

    /// Current time rendered with [`STATUS_CHANGE_FORMAT`].
    #[must_use]
    pub fn status_change_timestamp(&self) -> String {
        self.clock.now().format(STATUS_CHANGE_FORMAT).to_string()
    }
}

impl Default for TicketEnvironment {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), DEFAULT_MODERATOR_ID)
    }
}

impl fmt::Debug for TicketEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TicketEnvironment")
            .field("moderator_id", &self.moderator_id)
            .finish_non_exhaustive()
    }
}
