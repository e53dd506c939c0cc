//! [`ContentSource`] trait and the paging Storyblok implementation.

use folio_core::{CmsQuery, RemoteEntry};
use folio_renderer::MarkupRenderer;

use crate::api::StoryApi;
use crate::error::SourceError;
use crate::story::{to_remote_entry, Story};

/// Upper bound the CDN accepts for `per_page`.
pub const MAX_PER_PAGE: u32 = 100;

/// Supplies the latest normalized entries for a query.
pub trait ContentSource {
    fn fetch_entries(&self, query: &CmsQuery) -> Result<Vec<RemoteEntry>, SourceError>;
}

impl<S: ContentSource + ?Sized> ContentSource for &S {
    fn fetch_entries(&self, query: &CmsQuery) -> Result<Vec<RemoteEntry>, SourceError> {
        (**self).fetch_entries(query)
    }
}

/// Pages through a [`StoryApi`], normalizes stories and renders bodies.
pub struct StoryblokSource<A> {
    api: A,
    renderer: MarkupRenderer,
}

impl<A: StoryApi> StoryblokSource<A> {
    pub fn new(api: A, renderer: MarkupRenderer) -> Self {
        Self { api, renderer }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetch every story matching `query`.
    ///
    /// `query.page == Some(0)` fetches one page and stops; otherwise paging
    /// starts at `query.page` (default 1) and continues until `total` is
    /// covered or a page comes back empty.
    pub fn fetch_stories(&self, query: &CmsQuery) -> Result<Vec<Story>, SourceError> {
        let per_page = query.per_page.unwrap_or(MAX_PER_PAGE);
        if per_page == 0 || per_page > MAX_PER_PAGE {
            return Err(SourceError::InvalidPerPage {
                per_page,
                max: MAX_PER_PAGE,
            });
        }

        let single_page = query.page == Some(0);
        let mut page = query.page.unwrap_or(1).max(1);
        let first = self.api.get_stories(query, page, per_page)?;
        let total = first.total;
        let mut stories = first.stories;

        if !single_page {
            while (page as usize) * (per_page as usize) < total {
                page += 1;
                let next = self.api.get_stories(query, page, per_page)?;
                if next.stories.is_empty() {
                    break;
                }
                stories.extend(next.stories);
            }
        }

        if stories.is_empty() {
            return Err(SourceError::NoEntries {
                starts_with: query.starts_with.clone(),
            });
        }
        tracing::debug!(
            "fetched {} stories for '{}' ({} pages)",
            stories.len(),
            query.starts_with,
            page
        );
        Ok(stories)
    }
}

impl<A: StoryApi> ContentSource for StoryblokSource<A> {
    fn fetch_entries(&self, query: &CmsQuery) -> Result<Vec<RemoteEntry>, SourceError> {
        self.fetch_stories(query)?
            .iter()
            .map(|story| {
                let mut entry = to_remote_entry(story)?;
                entry.body = match entry.body.take() {
                    Some(markup) => Some(self.renderer.render(&markup)?),
                    None => None,
                };
                Ok(entry)
            })
            .collect()
    }
}
