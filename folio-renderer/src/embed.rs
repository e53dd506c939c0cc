//! `@[service](id)` video shorthand.
//!
//! Only `youtube` is supported. The shorthand is expanded to raw HTML before
//! the markdown pass, so the player markup passes through the parser as an
//! HTML block (or inline HTML when it shares a line with text). Code spans
//! and code blocks are left as written.

use std::ops::Range;

use pulldown_cmark::{Event, Parser, Tag};
use serde::Serialize;
use tera::{Context, Tera};

use crate::error::{invalid_video, RenderError};

// ---------------------------------------------------------------------------
// Embedded templates: baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

const TPLS: &[(&str, &str)] = &[("youtube.html.tera", include_str!("templates/youtube.html.tera"))];

const YOUTUBE_ID_LEN: usize = 11;

/// Player sizing and query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedOptions {
    pub width: String,
    pub height: String,
    /// YouTube `rel` parameter; `0` limits related videos to the same channel.
    pub rel: u8,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            width: "auto".to_string(),
            height: "auto".to_string(),
            rel: 0,
        }
    }
}

#[derive(Serialize)]
struct EmbedContext<'a> {
    video_id: &'a str,
    width: &'a str,
    height: &'a str,
    rel: u8,
}

/// Expands video shorthand into player markup.
#[derive(Debug)]
pub struct VideoEmbedder {
    tera: Tera,
    options: EmbedOptions,
}

impl VideoEmbedder {
    pub fn new(options: EmbedOptions) -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TPLS.iter().copied())?;
        Ok(Self { tera, options })
    }

    /// Render the player for a single video.
    pub fn embed(&self, service: &str, video_id: &str) -> Result<String, RenderError> {
        let syntax = format!("@[{service}]({video_id})");
        match service {
            "youtube" => {
                if !is_youtube_id(video_id) {
                    return Err(invalid_video(&syntax, "not a valid YouTube video id"));
                }
                let ctx = Context::from_serialize(EmbedContext {
                    video_id,
                    width: &self.options.width,
                    height: &self.options.height,
                    rel: self.options.rel,
                })?;
                let html = self.tera.render("youtube.html.tera", &ctx)?;
                Ok(html.trim_end().to_string())
            }
            "" => Err(invalid_video(&syntax, "missing video service")),
            other => Err(invalid_video(&syntax, format!("unsupported video service '{other}'"))),
        }
    }

    /// Replace every `@[service](id)` occurrence in `source` that is not
    /// inside a code span or code block.
    pub fn expand(&self, source: &str) -> Result<String, RenderError> {
        let code = code_ranges(source);
        let mut out = String::with_capacity(source.len());
        let mut pos = 0;
        while let Some(found) = source[pos..].find("@[") {
            let start = pos + found;
            if let Some(range) = code.iter().find(|r| r.contains(&start)) {
                out.push_str(&source[pos..range.end]);
                pos = range.end;
                continue;
            }
            out.push_str(&source[pos..start]);
            let (consumed, service, video_id) = parse_shorthand(&source[start..])?;
            out.push_str(&self.embed(service, video_id)?);
            pos = start + consumed;
        }
        out.push_str(&source[pos..]);
        Ok(out)
    }
}

/// Byte ranges of inline code and code blocks in `source`.
fn code_ranges(source: &str) -> Vec<Range<usize>> {
    Parser::new(source)
        .into_offset_iter()
        .filter_map(|(event, range)| match event {
            Event::Code(_) | Event::Start(Tag::CodeBlock(_)) => Some(range),
            _ => None,
        })
        .collect()
}

/// Parse `@[service](id)` at the start of `input`.
///
/// Returns the number of bytes consumed, the service and the id.
fn parse_shorthand(input: &str) -> Result<(usize, &str, &str), RenderError> {
    let incomplete = || {
        let line = input.lines().next().unwrap_or(input);
        invalid_video(line, "incomplete video syntax, expected @[service](id)")
    };

    let close_bracket = input.find(']').ok_or_else(incomplete)?;
    let service = &input[2..close_bracket];
    if service.contains('\n') {
        return Err(incomplete());
    }
    let after = &input[close_bracket + 1..];
    if !after.starts_with('(') {
        return Err(incomplete());
    }
    let close_paren = after.find(')').ok_or_else(incomplete)?;
    let video_id = &after[1..close_paren];
    if video_id.contains('\n') {
        return Err(incomplete());
    }
    Ok((close_bracket + 1 + close_paren + 1, service, video_id.trim()))
}

fn is_youtube_id(id: &str) -> bool {
    id.len() == YOUTUBE_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
