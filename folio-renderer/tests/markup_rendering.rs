use folio_renderer::{MarkupRenderer, RenderError};
use rstest::rstest;

fn renderer() -> MarkupRenderer {
    MarkupRenderer::new().expect("renderer")
}

#[test]
fn renders_markdown_as_html() {
    let html = renderer()
        .render("Some text **bolded** and *italisized*.")
        .unwrap();
    assert_eq!(
        html,
        "<p>Some text <strong>bolded</strong> and <em>italisized</em>.</p>\n"
    );
}

#[test]
fn external_links_open_in_new_tab() {
    let html = renderer().render("[link](http://t.est)").unwrap();
    assert_eq!(
        html,
        "<p><a href=\"http://t.est\" target=\"_blank\" rel=\"noopener\">link</a></p>\n"
    );
}

#[test]
fn internal_links_route_through_router() {
    let html = renderer().render("[link](/test)").unwrap();
    assert_eq!(
        html,
        "<p><a href=\"/test\" onclick=\"event.preventDefault(); window.$router.push('/test')\">link</a></p>\n"
    );
}

#[test]
fn soft_breaks_become_line_breaks() {
    let html = renderer().render("first\nsecond").unwrap();
    assert!(html.contains("first<br />"), "got: {html}");
    assert!(html.contains("second"));
}

#[test]
fn video_shorthand_renders_youtube_embed() {
    let html = renderer().render("@[youtube](5JqzCjg4YRU)").unwrap();
    assert!(html.contains("<iframe class=\"embed-responsive-item youtube-player\""));
    assert!(html.contains("https://www.youtube-nocookie.com/embed/5JqzCjg4YRU?rel=0"));
    assert!(!html.contains("@["));
}

#[test]
fn code_span_shorthand_is_left_alone() {
    let html = renderer().render("Write `@[service](id)` to embed.").unwrap();
    assert_eq!(html, "<p>Write <code>@[service](id)</code> to embed.</p>\n");
}

#[test]
fn code_block_shorthand_is_left_alone() {
    let html = renderer().render("```\n@[youtube](bad)\n```\n").unwrap();
    assert_eq!(html, "<pre><code>@[youtube](bad)\n</code></pre>\n");
}

#[test]
fn definition_lists_are_rendered() {
    let html = renderer().render("Term\n: Definition\n").unwrap();
    assert!(html.contains("<dt>Term</dt>"), "got: {html}");
    assert!(html.contains("<dd>Definition</dd>"), "got: {html}");
}

#[rstest]
#[case("@[youtube](58712)")]
#[case("@[]")]
#[case("text before @[youtube](")]
fn malformed_video_shorthand_fails(#[case] source: &str) {
    let err = renderer().render(source).unwrap_err();
    assert!(matches!(err, RenderError::InvalidVideo { .. }), "got: {err}");
}
