//! Build orchestration: fetch → load or bootstrap → reconcile → persist.
//!
//! The manifest is rewritten at most once per build and only after every
//! handler call succeeded, so a failed build leaves the previous manifest in
//! place. A build that finds nothing to change does not touch the manifest.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};

use folio_core::{config::normalize, CmsQuery, TargetConfig};
use folio_source::ContentSource;

use crate::error::{io_err, SyncError};
use crate::literature::LiteratureHandler;
use crate::manifest_store::{self, ManifestState};
use crate::reconcile::{self, ChangeSet, EntryHandler};

/// Manifest name used when the build directory has no base name (e.g. `/`).
const FALLBACK_MANIFEST_NAME: &str = "manifest";

/// Inputs for a single build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub query: CmsQuery,
    /// Build directory; relative paths resolve against the current directory.
    pub build_path: PathBuf,
    /// Manifest file stem; defaults to the build directory's base name.
    pub manifest_name: Option<String>,
    /// Classify only: no handler calls, no writes.
    pub dry_run: bool,
}

impl BuildOptions {
    pub fn new(query: CmsQuery, build_path: impl Into<PathBuf>) -> Self {
        Self {
            query,
            build_path: build_path.into(),
            manifest_name: None,
            dry_run: false,
        }
    }

    pub fn from_target(target: &TargetConfig, dry_run: bool) -> Self {
        Self {
            query: target.query(),
            build_path: target.build_path.clone(),
            manifest_name: target.manifest_name.clone(),
            dry_run,
        }
    }

    /// Absolute, lexically normalized build directory.
    pub fn build_dir(&self) -> Result<PathBuf, SyncError> {
        resolve_build_dir(&self.build_path)
    }

    /// Resolved manifest location.
    pub fn manifest_path(&self) -> Result<PathBuf, SyncError> {
        let dir = self.build_dir()?;
        let name = manifest_name(&dir, self.manifest_name.as_deref());
        Ok(manifest_store::manifest_path(&dir, &name))
    }
}

/// Outcome of a build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub manifest_path: PathBuf,
    /// No manifest existed before this build.
    pub bootstrapped: bool,
    pub changes: ChangeSet,
    pub manifest_written: bool,
    /// Number of entries the source returned.
    pub entry_count: usize,
    pub synced_at: DateTime<Utc>,
    pub duration_ms: u128,
}

/// Resolve `path` to an absolute, lexically normalized directory.
pub fn resolve_build_dir(path: &Path) -> Result<PathBuf, SyncError> {
    if path.is_absolute() {
        return Ok(normalize(path));
    }
    let cwd = std::env::current_dir().map_err(|e| io_err(path, e))?;
    Ok(normalize(&cwd.join(path)))
}

/// `override_name`, else the base name of `dir`.
pub fn manifest_name(dir: &Path, override_name: Option<&str>) -> String {
    match override_name {
        Some(name) => name.to_string(),
        None => dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| FALLBACK_MANIFEST_NAME.to_string()),
    }
}

/// Run one build, invoking `handler` for every classified entry.
///
/// On bootstrap every fetched entry goes through `on_add` and the manifest
/// is always written. Otherwise the manifest is written iff the change set is
/// non-empty.
pub fn build_manifest<S, H>(
    options: &BuildOptions,
    source: &S,
    handler: &mut H,
) -> Result<BuildReport, SyncError>
where
    S: ContentSource + ?Sized,
    H: EntryHandler + ?Sized,
{
    let started = Instant::now();
    let synced_at = Utc::now();

    let build_dir = options.build_dir()?;
    let name = manifest_name(&build_dir, options.manifest_name.as_deref());
    let path = manifest_store::manifest_path(&build_dir, &name);

    let latest = source.fetch_entries(&options.query)?;
    let state = manifest_store::load(&path)?;

    let (bootstrapped, changes) = match state {
        ManifestState::Bootstrap => {
            tracing::info!("no manifest at {}; bootstrapping", path.display());
            let changes = if options.dry_run {
                reconcile::classify(&[], &latest).change_set()
            } else {
                std::fs::create_dir_all(&build_dir).map_err(|e| io_err(&build_dir, e))?;
                reconcile::reconcile(&[], &latest, handler)?
            };
            (true, changes)
        }
        ManifestState::Loaded(old) => {
            let changes = if options.dry_run {
                reconcile::classify(&old, &latest).change_set()
            } else {
                reconcile::reconcile(&old, &latest, handler)?
            };
            (false, changes)
        }
    };

    let manifest_written = !options.dry_run && (bootstrapped || changes.has_changes());
    if manifest_written {
        manifest_store::save(&path, &latest)?;
        tracing::info!("wrote manifest {} ({} entries)", path.display(), latest.len());
    } else if options.dry_run {
        tracing::info!("[dry-run] manifest {} not written", path.display());
    } else {
        tracing::debug!("unchanged: {}", path.display());
    }

    Ok(BuildReport {
        manifest_path: path,
        bootstrapped,
        changes,
        manifest_written,
        entry_count: latest.len(),
        synced_at,
        duration_ms: started.elapsed().as_millis(),
    })
}

/// Mirror a literature collection: manifest plus one `<id>.mdhtml` per entry,
/// both inside the build directory.
pub fn build_literature<S>(options: &BuildOptions, source: &S) -> Result<BuildReport, SyncError>
where
    S: ContentSource + ?Sized,
{
    let mut handler = LiteratureHandler::new(options.build_dir()?);
    build_manifest(options, source, &mut handler)
}
