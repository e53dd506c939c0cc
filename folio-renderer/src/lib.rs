//! # folio-renderer
//!
//! Markdown-to-HTML rendering for literature bodies.
//!
//! External links open in a new browsing context, internal links route
//! through the host application's client-side router, and the
//! `@[youtube](<id>)` shorthand expands to an embedded player.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use folio_renderer::MarkupRenderer;
//!
//! fn render(body: &str) {
//!     if let Ok(renderer) = MarkupRenderer::new() {
//!         if let Ok(html) = renderer.render(body) {
//!             println!("{html}");
//!         }
//!     }
//! }
//! ```

pub mod embed;
pub mod engine;
pub mod error;

pub use embed::{EmbedOptions, VideoEmbedder};
pub use engine::MarkupRenderer;
pub use error::RenderError;
