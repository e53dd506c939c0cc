//! Error types for folio-renderer.

use thiserror::Error;

/// All errors that can arise from markup rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Tera template engine error.
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Malformed `@[service](id)` syntax or an id the service would reject.
    #[error("invalid video embed '{syntax}': {reason}")]
    InvalidVideo { syntax: String, reason: String },
}

pub(crate) fn invalid_video(syntax: &str, reason: impl Into<String>) -> RenderError {
    RenderError::InvalidVideo {
        syntax: syntax.to_string(),
        reason: reason.into(),
    }
}
