//! Raw story payloads and their normalization into [`RemoteEntry`].
//!
//! Stories come in two content shapes. Video stories carry their own `id`,
//! `category` and `timestamp` inside `content` and replace the story-level
//! values with them; they never carry a summary. Content with an `id` or a
//! `category` key is a video and must then carry the video fields. Everything
//! else is treated as literature.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use folio_core::{EntryId, RemoteEntry};

use crate::error::SourceError;

/// Category code the CMS uses for "no category".
const NO_CATEGORY: &str = "--";

/// A story as returned by the CDN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: u64,
    pub name: String,
    pub created_at: String,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub first_published_at: Option<String>,
    #[serde(default)]
    pub full_slug: String,
    pub content: Value,
}

/// Video-specific content fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VideoContent {
    pub id: String,
    #[serde(default)]
    pub category: String,
    pub timestamp: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub body: Option<String>,
}

/// Literature content fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LiteratureContent {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    /// Overrides the publish date when set.
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Content shapes a story can carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoryContent {
    Video(VideoContent),
    Literature(LiteratureContent),
}

impl StoryContent {
    pub fn parse(story: &Story) -> Result<Self, SourceError> {
        let content = &story.content;
        let parsed = if content.get("id").is_some() || content.get("category").is_some() {
            serde_json::from_value(content.clone()).map(StoryContent::Video)
        } else {
            serde_json::from_value(content.clone()).map(StoryContent::Literature)
        };
        parsed.map_err(|e| SourceError::Content {
            story: story.id,
            source: e,
        })
    }
}

/// Project a story onto the entry shape the sync engine consumes.
///
/// The body is carried through as raw markup; rendering is the source's job.
pub fn to_remote_entry(story: &Story) -> Result<RemoteEntry, SourceError> {
    let hash = fingerprint(story);
    let entry = match StoryContent::parse(story)? {
        StoryContent::Video(video) => RemoteEntry {
            id: EntryId::Text(video.id),
            title: story.name.clone(),
            author: video.author,
            category: Some(video.category).filter(|c| c != NO_CATEGORY && !c.is_empty()),
            summary: None,
            date: video.timestamp,
            hash,
            body: video.body,
        },
        StoryContent::Literature(lit) => RemoteEntry {
            id: EntryId::Number(story.id),
            title: story.name.clone(),
            author: lit.author,
            category: None,
            summary: lit.summary.filter(|s| !s.is_empty()),
            date: lit
                .timestamp
                .or_else(|| story.first_published_at.clone())
                .unwrap_or_else(|| story.created_at.clone()),
            hash,
            body: lit.body,
        },
    };
    Ok(entry)
}

/// Hex SHA-256 over the story name and its content.
///
/// `serde_json::Value` maps serialize with sorted keys, so the digest does not
/// depend on the key order the CDN happened to use.
pub fn fingerprint(story: &Story) -> String {
    let mut hasher = Sha256::new();
    hasher.update(story.name.as_bytes());
    hasher.update([0u8]);
    hasher.update(story.content.to_string().as_bytes());
    hex::encode(hasher.finalize())
}
