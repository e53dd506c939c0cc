//! Literature materializer: one `<id>.mdhtml` body file per entry.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use folio_core::{EntryId, ManifestEntry, RemoteEntry};

use crate::error::{io_err, SyncError};
use crate::reconcile::EntryHandler;
use crate::writer::write_atomic;

/// Extension of materialized body files.
pub const ARTIFACT_EXTENSION: &str = "mdhtml";

const ELLIPSIS: &str = "...";

/// `<dir>/<id>.mdhtml`
pub fn artifact_path(dir: &Path, id: &EntryId) -> PathBuf {
    dir.join(format!("{id}.{ARTIFACT_EXTENSION}"))
}

/// Write `entry.body` verbatim to its artifact file, replacing any existing one.
///
/// An entry without a body is a programming error upstream and fails with
/// [`SyncError::MissingBody`] before anything is written.
pub fn save(dir: &Path, entry: &RemoteEntry) -> Result<PathBuf, SyncError> {
    let body = entry.body.as_deref().ok_or_else(|| SyncError::MissingBody {
        id: entry.id.clone(),
    })?;
    let path = artifact_path(dir, &entry.id);
    write_atomic(&path, body.as_bytes())?;
    tracing::debug!("saved {}", path.display());
    Ok(path)
}

/// Remove the artifact file for `id`. A file that is already gone is not an error.
pub fn delete(dir: &Path, id: &EntryId) -> Result<(), SyncError> {
    let path = artifact_path(dir, id);
    match std::fs::remove_file(&path) {
        Ok(()) => {
            tracing::debug!("deleted {}", path.display());
            Ok(())
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(io_err(&path, err)),
    }
}

/// Bound `title` to `max_len` characters for menus and navigation.
///
/// Longer titles are cut back to the last whitespace at or before `max_len`
/// and suffixed with `...`; a title with no such whitespace is cut hard.
pub fn fit_title(max_len: usize, title: &str) -> String {
    if title.chars().count() <= max_len {
        return title.to_string();
    }

    let cut = title
        .char_indices()
        .nth(max_len)
        .map_or(title.len(), |(i, _)| i);
    let head = &title[..cut];
    let at_boundary = title[cut..].starts_with(char::is_whitespace);
    let kept = if at_boundary {
        head
    } else {
        head.rfind(char::is_whitespace).map_or(head, |i| &head[..i])
    };
    format!("{}{ELLIPSIS}", kept.trim_end())
}

/// Wires the materializer into reconciliation: add/update save, delete removes.
#[derive(Debug, Clone)]
pub struct LiteratureHandler {
    dir: PathBuf,
}

impl LiteratureHandler {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl EntryHandler for LiteratureHandler {
    fn on_add(&mut self, entry: &RemoteEntry) -> Result<(), SyncError> {
        save(&self.dir, entry).map(|_| ())
    }

    fn on_update(&mut self, entry: &RemoteEntry) -> Result<(), SyncError> {
        save(&self.dir, entry).map(|_| ())
    }

    fn on_delete(&mut self, entry: &ManifestEntry) -> Result<(), SyncError> {
        delete(&self.dir, &entry.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn entry(body: Option<&str>) -> RemoteEntry {
        RemoteEntry {
            id: EntryId::from(69866782),
            title: "Entry".into(),
            author: "Ethan Kahn".into(),
            category: None,
            summary: None,
            date: "2021-05-19T21:50:32.720Z".into(),
            hash: "h".into(),
            body: body.map(str::to_string),
        }
    }

    #[test]
    fn fit_title_leaves_short_titles_alone() {
        assert_eq!(fit_title(11, "hello world"), "hello world");
        assert_eq!(fit_title(50, "hello world"), "hello world");
    }

    #[test]
    fn fit_title_truncates_at_whitespace() {
        assert_eq!(fit_title(5, "hello world"), "hello...");
    }

    #[test]
    fn fit_title_backs_up_to_previous_whitespace() {
        assert_eq!(fit_title(6, "hello world"), "hello...");
        assert_eq!(fit_title(9, "hello world"), "hello...");
        assert_eq!(fit_title(13, "the quick brown fox"), "the quick...");
    }

    #[test]
    fn fit_title_hard_cuts_without_whitespace() {
        assert_eq!(fit_title(3, "abcdefgh"), "abc...");
    }

    #[test]
    fn fit_title_counts_characters_not_bytes() {
        assert_eq!(fit_title(4, "café au lait"), "café...");
        assert_eq!(fit_title(12, "café au lait"), "café au lait");
    }

    #[test]
    fn save_without_body_is_missing_body() {
        let tmp = TempDir::new().unwrap();
        let err = save(tmp.path(), &entry(None)).unwrap_err();
        assert!(matches!(err, SyncError::MissingBody { .. }), "got: {err}");
        assert!(!artifact_path(tmp.path(), &EntryId::from(69866782)).exists());
    }

    #[test]
    fn save_writes_exact_body() {
        let tmp = TempDir::new().unwrap();
        let body = "<p>Some body text</p>\n";
        let path = save(tmp.path(), &entry(Some(body))).unwrap();
        assert_eq!(path, tmp.path().join("69866782.mdhtml"));
        assert_eq!(fs::read_to_string(&path).unwrap(), body);
    }

    #[test]
    fn save_overwrites_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = artifact_path(tmp.path(), &EntryId::from(69866782));
        fs::write(&path, "old").unwrap();
        save(tmp.path(), &entry(Some("new"))).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn delete_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let id = EntryId::from(69866782);
        let path = artifact_path(tmp.path(), &id);
        fs::write(&path, "123").unwrap();
        delete(tmp.path(), &id).unwrap();
        assert!(!path.exists());
        delete(tmp.path(), &id).unwrap();
    }

    #[test]
    fn text_ids_name_files_without_quotes() {
        let path = artifact_path(Path::new("/out"), &EntryId::from("fl34_31kfQ"));
        assert_eq!(path, PathBuf::from("/out/fl34_31kfQ.mdhtml"));
    }
}
