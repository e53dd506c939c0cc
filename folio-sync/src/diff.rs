//! Dry-run manifest diff support for `folio diff`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use similar::TextDiff;

use folio_source::ContentSource;

use crate::{
    error::io_err,
    manifest_store::{self, ManifestState},
    pipeline::BuildOptions,
    reconcile::{self, ChangeSet},
    SyncError,
};

/// What a build would change, without changing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestDiff {
    pub manifest_path: PathBuf,
    pub changes: ChangeSet,
    /// Unified diff of the manifest file; `None` when it would not change.
    pub unified_diff: Option<String>,
}

/// Fetch the collection and compare the manifest a build would write to the
/// one on disk.
///
/// No files are written and no handlers run.
pub fn diff_manifest<S>(options: &BuildOptions, source: &S) -> Result<ManifestDiff, SyncError>
where
    S: ContentSource + ?Sized,
{
    let manifest_path = options.manifest_path()?;
    let latest = source.fetch_entries(&options.query)?;

    let (bootstrapped, changes) = match manifest_store::load(&manifest_path)? {
        ManifestState::Bootstrap => (true, reconcile::classify(&[], &latest).change_set()),
        ManifestState::Loaded(old) => (false, reconcile::classify(&old, &latest).change_set()),
    };

    // Mirrors the manifest write rule in `build_manifest`.
    if !bootstrapped && !changes.has_changes() {
        return Ok(ManifestDiff {
            manifest_path,
            changes,
            unified_diff: None,
        });
    }

    let rendered = manifest_store::render(&latest)?;
    let existing = read_existing_or_empty(&manifest_path)?;
    let unified_diff = (existing != rendered).then(|| {
        let name = manifest_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        TextDiff::from_lines(&existing, &rendered)
            .unified_diff()
            .header(&format!("a/{name}"), &format!("b/{name}"))
            .context_radius(3)
            .to_string()
    });

    Ok(ManifestDiff {
        manifest_path,
        changes,
        unified_diff,
    })
}

fn read_existing_or_empty(path: &Path) -> Result<String, SyncError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(io_err(path, err)),
    }
}
