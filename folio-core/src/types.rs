//! Domain types for content entries and manifests.
//!
//! A [`RemoteEntry`] is what the content source hands back after
//! normalization; a [`ManifestEntry`] is its metadata-only projection as
//! persisted in the build manifest. Entries are identified by [`EntryId`]
//! alone; the `hash` fingerprint is the only change signal.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Identifier of an entry within a content collection.
///
/// Literature stories carry numeric ids; video stories carry the string id
/// of the hosted video. Both forms round-trip through JSON unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    Number(u64),
    Text(String),
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryId::Number(n) => n.fmt(f),
            EntryId::Text(s) => s.fmt(f),
        }
    }
}

impl From<u64> for EntryId {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

impl From<String> for EntryId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which revision of the content the source should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoryVersion {
    #[default]
    Draft,
    Published,
}

impl fmt::Display for StoryVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoryVersion::Draft => write!(f, "draft"),
            StoryVersion::Published => write!(f, "published"),
        }
    }
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// A normalized entry as returned by the content source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEntry {
    pub id: EntryId,
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// ISO-8601 timestamp: content override, else first publish, else creation.
    pub date: String,
    /// Opaque content fingerprint supplied by the source.
    pub hash: String,
    /// Rendered body. Required for entries that get materialized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// Metadata-only projection of a [`RemoteEntry`], as stored in the manifest.
///
/// Field order here is the on-disk key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub id: EntryId,
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub date: String,
    pub hash: String,
}

impl From<&RemoteEntry> for ManifestEntry {
    fn from(entry: &RemoteEntry) -> Self {
        Self {
            id: entry.id.clone(),
            title: entry.title.clone(),
            author: entry.author.clone(),
            category: entry.category.clone(),
            summary: entry.summary.clone(),
            date: entry.date.clone(),
            hash: entry.hash.clone(),
        }
    }
}

/// The persisted record of the last synchronized set of entries.
pub type Manifest = Vec<ManifestEntry>;

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// Query options passed to a content source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmsQuery {
    /// CDN endpoint path, e.g. `cdn/stories`.
    pub url: String,
    /// Slug prefix filter, e.g. `library/literature`.
    pub starts_with: String,
    pub version: StoryVersion,
    /// Sort key, e.g. `created_at:asc`.
    pub sort_by: String,
    /// First page to fetch. `Some(0)` fetches a single page without looping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl CmsQuery {
    /// Default CDN endpoint for story listings.
    pub const DEFAULT_URL: &'static str = "cdn/stories";

    /// Query for `starts_with` against the default endpoint.
    pub fn new(starts_with: impl Into<String>, version: StoryVersion, sort_by: impl Into<String>) -> Self {
        Self {
            url: Self::DEFAULT_URL.to_string(),
            starts_with: starts_with.into(),
            version,
            sort_by: sort_by.into(),
            page: None,
            per_page: None,
        }
    }

    pub fn with_page(mut self, page: Option<u32>, per_page: Option<u32>) -> Self {
        self.page = page;
        self.per_page = per_page;
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
