//! # folio-source
//!
//! Content source collaborator: fetches stories from a Storyblok-style CDN
//! and normalizes them into [`RemoteEntry`](folio_core::RemoteEntry) values.
//!
//! [`StoryblokSource`] owns paging and normalization; the HTTP transport sits
//! behind the [`StoryApi`] trait so fixtures can stand in for the network.

pub mod api;
pub mod error;
pub mod source;
pub mod story;

pub use api::{HttpStoryApi, StoriesPage, StoryApi};
pub use error::SourceError;
pub use source::{ContentSource, StoryblokSource, MAX_PER_PAGE};
pub use story::{to_remote_entry, Story, StoryContent};
