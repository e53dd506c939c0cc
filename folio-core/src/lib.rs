//! Folio core library: entry model, category table, build configuration, errors.
//!
//! Public API surface:
//! - [`types`]: entry identifiers, remote/manifest entries, CMS queries
//! - [`categories`]: immutable category-code table
//! - [`config`]: `folio.yaml` load / validate
//! - [`error`]: [`CoreError`]

pub mod categories;
pub mod config;
pub mod error;
pub mod types;

pub use categories::CategoryMap;
pub use config::{ApiConfig, FolioConfig, TargetConfig, TargetKind};
pub use error::CoreError;
pub use types::{CmsQuery, EntryId, Manifest, ManifestEntry, RemoteEntry, StoryVersion};
