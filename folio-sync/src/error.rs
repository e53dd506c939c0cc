//! Error types for folio-sync.

use std::path::PathBuf;

use thiserror::Error;

use folio_core::{CoreError, EntryId};
use folio_source::SourceError;

/// All errors that can arise from build operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An entry reached the materializer without a body.
    #[error("entry {id} has no body to materialize")]
    MissingBody { id: EntryId },

    /// The manifest exists but is not a JSON array of manifest entries.
    #[error("corrupt manifest at {path}: {source}")]
    CorruptManifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Any other filesystem failure, with annotated path for context.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An error from the content source, passed through unchanged.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// Category lookup or configuration error.
    #[error("{0}")]
    Core(#[from] CoreError),

    /// JSON serialization error (manifest / video map output).
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience constructor for [`SyncError::Storage`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Storage {
        path: path.into(),
        source,
    }
}
