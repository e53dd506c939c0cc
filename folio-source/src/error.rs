//! Error types for folio-source.

use thiserror::Error;

use folio_renderer::RenderError;

/// All errors that can arise while fetching and normalizing entries.
#[derive(Debug, Error)]
pub enum SourceError {
    /// `per_page` outside `1..=max`.
    #[error("getStories()::Max stories per page is {max} (got {per_page})")]
    InvalidPerPage { per_page: u32, max: u32 },

    /// The query matched no stories.
    #[error("Missing Stories::{starts_with}")]
    NoEntries { starts_with: String },

    /// The access token environment variable is unset or empty.
    #[error("content API token not set; export {var}")]
    MissingToken { var: String },

    /// Transport or non-success HTTP status.
    #[error("request to {url} failed: {message}")]
    Http { url: String, message: String },

    /// Response body was not the expected JSON.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// A story's `content` did not match any known content shape.
    #[error("story {story} has unrecognized content: {source}")]
    Content {
        story: u64,
        #[source]
        source: serde_json::Error,
    },

    /// Rendering a story body failed.
    #[error("render error: {0}")]
    Render(#[from] RenderError),
}
