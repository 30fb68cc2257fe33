//! Loading and writing the ticket document file.

use crate::error::StoreError;
use crate::types::TicketDocument;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// A ticket document stored as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonDocumentFile {
    path: PathBuf,
}

impl JsonDocumentFile {
    /// Points at the document at `path`. Nothing is read until [`Self::load`].
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the document.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Io`] if the file cannot be read
    /// - [`StoreError::Parse`] if it is not a ticket document
    pub async fn load(&self) -> Result<TicketDocument, StoreError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })?;

        let document: TicketDocument =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;

        tracing::info!(
            path = %self.path.display(),
            tickets = document.tickets.len(),
            messages = document.messages.len(),
            "Ticket document loaded"
        );

        Ok(document)
    }

    /// Replaces the file with `document`.
    ///
    /// The JSON is written next to the target and renamed over it, so readers
    /// never see a partial file.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Serialize`] if the document cannot be encoded
    /// - [`StoreError::Io`] if the write or rename fails
    pub async fn save(&self, document: &TicketDocument) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(document).map_err(StoreError::Serialize)?;
        let staging = self.staging_path();

        tokio::fs::write(&staging, &bytes)
            .await
            .map_err(|source| StoreError::Io {
                path: staging.clone(),
                source,
            })?;
        if let Err(source) = tokio::fs::rename(&staging, &self.path).await {
            if let Err(error) = tokio::fs::remove_file(&staging).await {
                tracing::warn!(path = %staging.display(), error = %error, "Staging file left behind");
            }
            return Err(StoreError::Io {
                path: self.path.clone(),
                source,
            });
        }

        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "Ticket document written");
        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let mut name: OsString = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}
