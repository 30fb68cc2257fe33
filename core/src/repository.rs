//! Shared, lock-guarded access to the ticket store.
//!
//! [`TicketRepository`] is the handle the API layer holds. Reads share a
//! read lock; resolve and remove run their whole read-modify-write (and the
//! optional write-back) under the write lock, so concurrent requests cannot
//! interleave on the same ticket.

use crate::environment::TicketEnvironment;
use crate::error::StoreError;
use crate::persistence::JsonDocumentFile;
use crate::store::TicketStore;
use crate::types::{Message, Ticket, TicketView};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Cloneable handle to a [`TicketStore`].
#[derive(Clone, Debug)]
pub struct TicketRepository {
    store: Arc<RwLock<TicketStore>>,
    write_back: Option<Arc<JsonDocumentFile>>,
}

impl TicketRepository {
    /// Wraps an in-memory store. Mutations are not persisted.
    #[must_use]
    pub fn new(store: TicketStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            write_back: None,
        }
    }

    /// Writes the whole document to `file` after every successful mutation.
    #[must_use]
    pub fn with_write_back(mut self, file: JsonDocumentFile) -> Self {
        self.write_back = Some(Arc::new(file));
        self
    }

    /// Loads `file` into a new repository.
    ///
    /// When `write_back` is set, mutations are persisted to the same file.
    ///
    /// # Errors
    ///
    /// Returns any error from [`JsonDocumentFile::load`] or
    /// [`TicketStore::new`].
    pub async fn open(
        file: JsonDocumentFile,
        env: TicketEnvironment,
        write_back: bool,
    ) -> Result<Self, StoreError> {
        let document = file.load().await?;
        let repository = Self::new(TicketStore::new(document, env)?);

        Ok(if write_back {
            repository.with_write_back(file)
        } else {
            repository
        })
    }

    /// Whether mutations are written back to disk.
    #[must_use]
    pub const fn persists_mutations(&self) -> bool {
        self.write_back.is_some()
    }

    /// Runs `f` against the store under the read lock.
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&TicketStore) -> T,
    {
        let store = self.store.read().await;
        f(&*store)
    }

    /// See [`TicketStore::list_tickets`].
    pub async fn list_tickets(&self, limit: Option<usize>) -> Vec<TicketView> {
        self.state(|store| store.list_tickets(limit)).await
    }

    /// See [`TicketStore::find_message_for_ticket`].
    pub async fn find_message_for_ticket(&self, ticket_id: &str) -> Option<Message> {
        self.state(|store| store.find_message_for_ticket(ticket_id).cloned())
            .await
    }

    /// See [`TicketStore::context_messages`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TicketNotFound`] if no ticket has this id.
    pub async fn context_messages(&self, ticket_id: &str) -> Result<Vec<Message>, StoreError> {
        self.state(|store| store.context_messages(ticket_id)).await
    }

    /// See [`TicketStore::resolve_ticket`].
    ///
    /// # Errors
    ///
    /// Returns the store's rejection, or a write-back failure. On write-back
    /// failure the ticket is restored, so the store is unchanged.
    pub async fn resolve_ticket(&self, ticket_id: &str) -> Result<Ticket, StoreError> {
        let mut store = self.store.write().await;
        let snapshot = self.snapshot(&store, ticket_id);
        let ticket = store.resolve_ticket(ticket_id)?;
        self.persist(&mut store, snapshot).await?;
        Ok(ticket)
    }

    /// See [`TicketStore::remove_ticket`].
    ///
    /// # Errors
    ///
    /// Returns the store's rejection, or a write-back failure. On write-back
    /// failure the ticket is put back at its old position.
    pub async fn remove_ticket(&self, ticket_id: &str) -> Result<Ticket, StoreError> {
        let mut store = self.store.write().await;
        let snapshot = self.snapshot(&store, ticket_id);
        let ticket = store.remove_ticket(ticket_id)?;
        self.persist(&mut store, snapshot).await?;
        Ok(ticket)
    }

    fn snapshot(&self, store: &TicketStore, ticket_id: &str) -> Option<(usize, Ticket)> {
        self.write_back
            .as_ref()
            .and_then(|_| store.snapshot(ticket_id))
    }

    async fn persist(
        &self,
        store: &mut TicketStore,
        snapshot: Option<(usize, Ticket)>,
    ) -> Result<(), StoreError> {
        let Some(file) = &self.write_back else {
            return Ok(());
        };

        if let Err(error) = file.save(store.document()).await {
            tracing::error!(
                path = %file.path().display(),
                error = %error,
                "Ticket write-back failed; change rolled back"
            );
            if let Some((index, ticket)) = snapshot {
                store.restore(index, ticket);
            }
            return Err(error);
        }

        Ok(())
    }
}
