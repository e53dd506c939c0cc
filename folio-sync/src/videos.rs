//! Video map build: group video entries by category name into `videos.json`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use folio_core::{CategoryMap, CoreError, EntryId, RemoteEntry};
use folio_source::ContentSource;

use crate::error::SyncError;
use crate::pipeline::BuildOptions;
use crate::writer::{check_if_changed, write_if_changed, WriteResult};

/// File name of the video map inside the build directory.
pub const VIDEO_MAP_FILE: &str = "videos.json";

/// A grouped video; the category code is implied by its group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoEntry {
    pub id: EntryId,
    pub title: String,
    pub author: String,
    pub date: String,
    pub hash: String,
}

impl From<&RemoteEntry> for VideoEntry {
    fn from(e: &RemoteEntry) -> Self {
        Self {
            id: e.id.clone(),
            title: e.title.clone(),
            author: e.author.clone(),
            date: e.date.clone(),
            hash: e.hash.clone(),
        }
    }
}

/// Category name → videos, in source order within each group.
pub type VideoMap = BTreeMap<String, Vec<VideoEntry>>;

/// Group `entries` by resolved category name.
///
/// An entry without a category, or with a code missing from `categories`,
/// fails the whole grouping.
pub fn group_by_category(
    entries: &[RemoteEntry],
    categories: &CategoryMap,
) -> Result<VideoMap, CoreError> {
    let mut map = VideoMap::new();
    for entry in entries {
        let code = entry.category.as_deref().unwrap_or_default();
        let name = categories.name(code)?;
        map.entry(name.to_string())
            .or_default()
            .push(VideoEntry::from(entry));
    }
    Ok(map)
}

/// Fetch videos, group them and write `<build_dir>/videos.json`.
///
/// The file is only rewritten when its content changes. With
/// `options.dry_run` nothing is written; the result is `WouldWrite` when the
/// file differs from disk and `Unchanged` otherwise.
pub fn build_video_map<S>(
    options: &BuildOptions,
    source: &S,
    categories: &CategoryMap,
) -> Result<(VideoMap, WriteResult), SyncError>
where
    S: ContentSource + ?Sized,
{
    let path = options.build_dir()?.join(VIDEO_MAP_FILE);
    let entries = source.fetch_entries(&options.query)?;
    let map = group_by_category(&entries, categories)?;

    let mut json = serde_json::to_string_pretty(&map)?;
    json.push('\n');

    if options.dry_run {
        tracing::info!("[dry-run] {} not written", path.display());
        return Ok((map, check_if_changed(&path, json.as_bytes())?));
    }

    let result = write_if_changed(&path, json.as_bytes())?;
    Ok((map, result))
}
