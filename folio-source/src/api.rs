//! Transport seam for the CDN story listing endpoint.

use std::time::Duration;

use serde::Deserialize;

use folio_core::{ApiConfig, CmsQuery};

use crate::error::SourceError;
use crate::story::Story;

/// One page of a story listing.
#[derive(Debug, Clone, PartialEq)]
pub struct StoriesPage {
    pub stories: Vec<Story>,
    /// Total number of stories matching the query across all pages.
    pub total: usize,
}

/// Fetches a single page of stories.
pub trait StoryApi {
    fn get_stories(&self, query: &CmsQuery, page: u32, per_page: u32)
        -> Result<StoriesPage, SourceError>;
}

#[derive(Debug, Deserialize)]
struct StoriesResponse {
    #[serde(default)]
    stories: Vec<Story>,
}

/// Blocking HTTP client for the CDN API.
pub struct HttpStoryApi {
    base_url: String,
    token: String,
    agent: ureq::Agent,
}

impl HttpStoryApi {
    /// Create a client targeting `base_url` (e.g. `https://api.storyblok.com/v2`).
    pub fn new(base_url: &str, token: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }

    /// Build a client from config, reading the token from `api.token_env`.
    pub fn from_config(api: &ApiConfig) -> Result<Self, SourceError> {
        let token = std::env::var(&api.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| SourceError::MissingToken {
                var: api.token_env.clone(),
            })?;
        Ok(Self::new(
            &api.base_url,
            token,
            Duration::from_secs(api.timeout_secs),
        ))
    }

    fn endpoint(&self, query: &CmsQuery) -> String {
        format!("{}/{}", self.base_url, query.url.trim_start_matches('/'))
    }
}

impl StoryApi for HttpStoryApi {
    /// GET <base>/<url>?starts_with=..&version=..&sort_by=..&page=..&per_page=..
    fn get_stories(
        &self,
        query: &CmsQuery,
        page: u32,
        per_page: u32,
    ) -> Result<StoriesPage, SourceError> {
        let url = self.endpoint(query);
        tracing::debug!("GET {url} starts_with={} page={page}", query.starts_with);
        let response = self
            .agent
            .get(&url)
            .query("token", &self.token)
            .query("starts_with", &query.starts_with)
            .query("version", &query.version.to_string())
            .query("sort_by", &query.sort_by)
            .query("page", &page.to_string())
            .query("per_page", &per_page.to_string())
            .call()
            .map_err(|e| SourceError::Http {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let total = response
            .header("total")
            .and_then(|v| v.trim().parse::<usize>().ok());
        let body: StoriesResponse = response
            .into_json()
            .map_err(|e| SourceError::Decode { url, source: e })?;
        Ok(StoriesPage {
            total: total.unwrap_or(body.stories.len()),
            stories: body.stories,
        })
    }
}
