//! Markdown rendering engine: [`MarkupRenderer`].
//!
//! # Link handling
//!
//! | Link                 | Rendered as                                                    |
//! |----------------------|----------------------------------------------------------------|
//! | `http…` / `https…`   | `<a href="…" target="_blank" rel="noopener">`                  |
//! | anything else        | `<a href="…" onclick="event.preventDefault(); window.$router.push('…')">` |
//!
//! Soft line breaks render as `<br />` and smart punctuation is enabled.

use pulldown_cmark::{html, CowStr, Event, LinkType, Options, Parser, Tag};

use crate::embed::{EmbedOptions, VideoEmbedder};
use crate::error::RenderError;

/// Renders literature bodies from markdown to HTML.
#[derive(Debug)]
pub struct MarkupRenderer {
    embedder: VideoEmbedder,
    options: Options,
}

impl MarkupRenderer {
    /// Renderer with the default player options.
    pub fn new() -> Result<Self, RenderError> {
        Self::with_embed_options(EmbedOptions::default())
    }

    pub fn with_embed_options(embed: EmbedOptions) -> Result<Self, RenderError> {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_SMART_PUNCTUATION);
        options.insert(Options::ENABLE_DEFINITION_LIST);
        Ok(Self {
            embedder: VideoEmbedder::new(embed)?,
            options,
        })
    }

    /// Render `markdown` to an HTML fragment.
    pub fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let source = self.embedder.expand(markdown)?;
        let parser = Parser::new_ext(&source, self.options).map(|event| match event {
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                ..
            }) => Event::InlineHtml(CowStr::from(link_open(link_type, &dest_url, &title))),
            Event::SoftBreak => Event::HardBreak,
            other => other,
        });

        let mut out = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut out, parser);
        Ok(out)
    }
}

fn link_open(link_type: LinkType, dest: &str, title: &str) -> String {
    let href = match link_type {
        LinkType::Email => format!("mailto:{dest}"),
        _ => dest.to_string(),
    };
    let link = href.to_lowercase();

    let mut tag = format!("<a href=\"{}\"", escape_attr(&href));
    if !title.is_empty() {
        tag.push_str(&format!(" title=\"{}\"", escape_attr(title)));
    }
    if link.starts_with("http") {
        // Block `window.opener` access from the new tab.
        tag.push_str(" target=\"_blank\" rel=\"noopener\"");
    } else if link_type != LinkType::Email {
        tag.push_str(&format!(
            " onclick=\"event.preventDefault(); window.$router.push('{}')\"",
            escape_attr(&link)
        ));
    }
    tag.push('>');
    tag
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_attr_handles_quotes_and_ampersands() {
        assert_eq!(escape_attr("a&b\"c"), "a&amp;b&quot;c");
    }

    #[test]
    fn internal_link_is_lowercased_in_router_call() {
        let tag = link_open(LinkType::Inline, "/Library/Item", "");
        assert_eq!(
            tag,
            "<a href=\"/Library/Item\" onclick=\"event.preventDefault(); window.$router.push('/library/item')\">"
        );
    }

    #[test]
    fn titled_external_link_keeps_title() {
        let tag = link_open(LinkType::Inline, "https://x.test", "X");
        assert_eq!(
            tag,
            "<a href=\"https://x.test\" title=\"X\" target=\"_blank\" rel=\"noopener\">"
        );
    }
}
