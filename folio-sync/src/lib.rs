//! # folio-sync
//!
//! Manifest reconciliation and materialization.
//!
//! Call [`build_literature`] to mirror a literature collection into a build
//! directory (manifest + one `<id>.mdhtml` per entry), or [`build_manifest`]
//! with your own [`EntryHandler`] to drive other side effects from the
//! added / updated / deleted classification.

pub mod diff;
pub mod error;
pub mod literature;
pub mod manifest_store;
pub mod pipeline;
pub mod reconcile;
pub mod videos;
pub mod writer;

pub use diff::{diff_manifest, ManifestDiff};
pub use error::SyncError;
pub use literature::{fit_title, LiteratureHandler};
pub use manifest_store::ManifestState;
pub use pipeline::{build_literature, build_manifest, BuildOptions, BuildReport};
pub use reconcile::{classify, reconcile, ChangeSet, EntryHandler, FnHandler, NoopHandler};
pub use videos::{build_video_map, VideoEntry, VideoMap};
pub use writer::WriteResult;
