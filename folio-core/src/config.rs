//! `folio.yaml` build configuration.
//!
//! # Layout
//!
//! ```yaml
//! api:
//!   base_url: https://api.storyblok.com/v2
//!   token_env: STORYBLOK_TOKEN
//!   timeout_secs: 30
//! root: ./release
//! targets:
//!   - name: public-lit
//!     kind: literature
//!     starts_with: library/literature
//!     version: draft
//!     sort_by: created_at:asc
//!     build_path: ./release/library/literature
//! categories:
//!   AA: General Spirituality
//! ```
//!
//! Relative `root` and `build_path` values are resolved against the directory
//! containing the config file. Every target's `build_path` must live under
//! `root`.

use std::collections::{BTreeMap, HashSet};
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::categories::CategoryMap;
use crate::error::CoreError;
use crate::types::{CmsQuery, StoryVersion};

/// Default config file name looked up by the CLI.
pub const DEFAULT_CONFIG_FILE: &str = "folio.yaml";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Content source connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Name of the environment variable holding the access token.
    #[serde(default = "default_token_env")]
    pub token_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token_env: default_token_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.storyblok.com/v2".to_string()
}

fn default_token_env() -> String {
    "STORYBLOK_TOKEN".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// What a target materializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Manifest plus one `<id>.mdhtml` body file per entry.
    #[default]
    Literature,
    /// A single `videos.json` grouped by category name.
    Videos,
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literature => f.write_str("literature"),
            Self::Videos => f.write_str("videos"),
        }
    }
}

/// One build target: a content collection mirrored into a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetConfig {
    pub name: String,
    #[serde(default)]
    pub kind: TargetKind,
    #[serde(default = "default_url")]
    pub url: String,
    pub starts_with: String,
    #[serde(default)]
    pub version: StoryVersion,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    pub build_path: PathBuf,
    /// Overrides the manifest file stem (defaults to the build dir's base name).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

fn default_url() -> String {
    CmsQuery::DEFAULT_URL.to_string()
}

fn default_sort_by() -> String {
    "created_at:asc".to_string()
}

impl TargetConfig {
    /// Source query for this target.
    pub fn query(&self) -> CmsQuery {
        CmsQuery {
            url: self.url.clone(),
            starts_with: self.starts_with.clone(),
            version: self.version,
            sort_by: self.sort_by.clone(),
            page: None,
            per_page: self.per_page,
        }
    }
}

/// Root of `folio.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub api: ApiConfig,
    pub root: PathBuf,
    #[serde(default)]
    pub targets: Vec<TargetConfig>,
    /// Replaces the built-in category table when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<BTreeMap<String, String>>,
}

impl FolioConfig {
    /// Category table for video targets.
    pub fn category_map(&self) -> CategoryMap {
        match &self.categories {
            Some(names) => CategoryMap::new(names.clone()),
            None => CategoryMap::default(),
        }
    }

    /// Find a target by name.
    pub fn target(&self, name: &str) -> Option<&TargetConfig> {
        self.targets.iter().find(|t| t.name == name)
    }

    /// Resolve relative paths against `base` and normalize them lexically.
    pub fn resolve_paths(&mut self, base: &Path) {
        self.root = normalize(&base.join(&self.root));
        for target in &mut self.targets {
            target.build_path = normalize(&base.join(&target.build_path));
        }
    }

    /// Check target names are unique and every build path lives under `root`.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut seen = HashSet::new();
        for target in &self.targets {
            if !seen.insert(target.name.as_str()) {
                return Err(CoreError::InvalidTarget {
                    name: target.name.clone(),
                    reason: "duplicate target name".to_string(),
                });
            }
            if !normalize(&target.build_path).starts_with(normalize(&self.root)) {
                return Err(CoreError::InvalidTarget {
                    name: target.name.clone(),
                    reason: format!(
                        "build path {} is not inside root {}",
                        target.build_path.display(),
                        self.root.display()
                    ),
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// Load, resolve and validate the config at `path`.
///
/// Returns `CoreError::ConfigNotFound` if absent,
/// `CoreError::ConfigParse` (with path + line context) if malformed YAML.
pub fn load_at(path: &Path) -> Result<FolioConfig, CoreError> {
    if !path.exists() {
        return Err(CoreError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path)?;
    let mut config: FolioConfig = serde_yaml::from_str(&contents).map_err(|e| {
        CoreError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        }
    })?;

    let base = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => std::env::current_dir()?,
    };
    config.resolve_paths(&base);
    config.validate()?;
    Ok(config)
}

/// Lexically collapse `.` and `..` components without touching the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_dot_segments() {
        assert_eq!(
            normalize(Path::new("/a/./b/../c")),
            PathBuf::from("/a/c")
        );
        assert_eq!(normalize(Path::new("a/../../b")), PathBuf::from("../b"));
    }

    #[test]
    fn target_query_uses_target_fields() {
        let target = TargetConfig {
            name: "lit".into(),
            kind: TargetKind::Literature,
            url: default_url(),
            starts_with: "library/literature".into(),
            version: StoryVersion::Published,
            sort_by: "created_at:desc".into(),
            build_path: PathBuf::from("/out/lit"),
            manifest_name: None,
            per_page: Some(25),
        };
        let query = target.query();
        assert_eq!(query.url, "cdn/stories");
        assert_eq!(query.starts_with, "library/literature");
        assert_eq!(query.version, StoryVersion::Published);
        assert_eq!(query.per_page, Some(25));
        assert_eq!(query.page, None);
    }

    #[test]
    fn defaults_fill_optional_fields() {
        let yaml = "root: /out\ntargets:\n  - name: lit\n    starts_with: lib\n    build_path: /out/lit\n";
        let config: FolioConfig = serde_yaml::from_str(yaml).expect("parse");
        let target = &config.targets[0];
        assert_eq!(target.kind, TargetKind::Literature);
        assert_eq!(target.version, StoryVersion::Draft);
        assert_eq!(target.sort_by, "created_at:asc");
        assert_eq!(config.api.token_env, "STORYBLOK_TOKEN");
        assert_eq!(config.category_map(), CategoryMap::default());
    }
}
