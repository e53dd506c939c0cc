//! Manifest store: the persisted record of the last synchronized entries.
//!
//! Persists a JSON array of [`ManifestEntry`] at `<build_dir>/<name>.json`.
//! A missing file is [`ManifestState::Bootstrap`], never an error; a file that
//! exists but does not parse is [`SyncError::CorruptManifest`] and is never
//! silently replaced. Writes use the atomic `.tmp` + rename pattern.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use folio_core::{Manifest, ManifestEntry, RemoteEntry};

use crate::error::{io_err, SyncError};
use crate::writer::write_atomic;

/// Result of loading a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestState {
    /// No manifest yet: first build against this directory.
    Bootstrap,
    Loaded(Manifest),
}

/// Path to the manifest for `name` inside `build_dir`.
///
/// `<build_dir>/<name>.json`
pub fn manifest_path(build_dir: &Path, name: &str) -> PathBuf {
    build_dir.join(format!("{name}.json"))
}

/// Load the manifest at `path`.
pub fn load(path: &Path) -> Result<ManifestState, SyncError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(ManifestState::Bootstrap),
        Err(err) => return Err(io_err(path, err)),
    };
    let manifest: Manifest =
        serde_json::from_slice(&bytes).map_err(|e| SyncError::CorruptManifest {
            path: path.to_path_buf(),
            source: e,
        })?;
    Ok(ManifestState::Loaded(manifest))
}

/// Serialize the manifest projection of `entries` as written to disk.
pub fn render(entries: &[RemoteEntry]) -> Result<String, SyncError> {
    let manifest: Manifest = entries.iter().map(ManifestEntry::from).collect();
    let mut json = serde_json::to_string_pretty(&manifest)?;
    json.push('\n');
    Ok(json)
}

/// Replace the manifest at `path` with the projection of `entries`.
///
/// Creates the containing directory if needed.
pub fn save(path: &Path, entries: &[RemoteEntry]) -> Result<(), SyncError> {
    let json = render(entries)?;
    write_atomic(path, json.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::EntryId;
    use tempfile::TempDir;

    fn entry(id: u64, hash: &str) -> RemoteEntry {
        RemoteEntry {
            id: EntryId::from(id),
            title: format!("Entry {id}"),
            author: "Ethan Kahn".into(),
            category: None,
            summary: Some("summary".into()),
            date: "2021-05-19T21:50:32.720Z".into(),
            hash: hash.into(),
            body: Some("<p>body</p>\n".into()),
        }
    }

    #[test]
    fn bootstrap_when_file_missing() {
        let tmp = TempDir::new().unwrap();
        let state = load(&manifest_path(tmp.path(), "nonexistent")).unwrap();
        assert_eq!(state, ManifestState::Bootstrap);
    }

    #[test]
    fn roundtrip_save_load() {
        let tmp = TempDir::new().unwrap();
        let path = manifest_path(tmp.path(), "literature");
        let mut video = entry(2, "h2");
        video.id = EntryId::from("fl34_31kfQ");
        video.category = Some("AA".into());
        video.summary = None;
        let entries = vec![entry(1, "h1"), video];

        save(&path, &entries).unwrap();
        let ManifestState::Loaded(loaded) = load(&path).unwrap() else {
            panic!("expected loaded manifest");
        };
        let expected: Manifest = entries.iter().map(ManifestEntry::from).collect();
        assert_eq!(loaded, expected);
    }

    #[test]
    fn body_is_not_persisted() {
        let tmp = TempDir::new().unwrap();
        let path = manifest_path(tmp.path(), "literature");
        save(&path, &[entry(1, "h1")]).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("body"));
    }

    #[test]
    fn save_creates_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let path = manifest_path(&tmp.path().join("a").join("b"), "b");
        save(&path, &[entry(1, "h1")]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn invalid_json_is_corrupt_not_bootstrap() {
        let tmp = TempDir::new().unwrap();
        let path = manifest_path(tmp.path(), "broken");
        std::fs::write(&path, "{ not json").unwrap();
        let err = load(&path).unwrap_err();
        assert!(matches!(err, SyncError::CorruptManifest { .. }), "got: {err}");
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn non_array_root_is_corrupt() {
        let tmp = TempDir::new().unwrap();
        let path = manifest_path(tmp.path(), "object");
        std::fs::write(&path, r#"{"id": 1}"#).unwrap();
        let err = load(&path).unwrap_err();
        assert!(matches!(err, SyncError::CorruptManifest { .. }), "got: {err}");
    }

    #[test]
    fn directory_in_place_of_file_is_storage_error() {
        let tmp = TempDir::new().unwrap();
        let path = manifest_path(tmp.path(), "dir");
        std::fs::create_dir_all(&path).unwrap();
        let err = load(&path).unwrap_err();
        assert!(matches!(err, SyncError::Storage { .. }), "got: {err}");
    }

    #[test]
    fn empty_array_loads_as_empty_manifest() {
        let tmp = TempDir::new().unwrap();
        let path = manifest_path(tmp.path(), "empty");
        std::fs::write(&path, "[]").unwrap();
        assert_eq!(load(&path).unwrap(), ManifestState::Loaded(vec![]));
    }
}
