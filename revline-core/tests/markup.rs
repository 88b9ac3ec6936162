//! Integration tests for the markup renderer.
//!
//! Exercises: heading levels, fenced blocks (tagged, untagged, and
//! unterminated), inline code, list wrapping, bold, paragraph wrapping,
//! idempotence on rendered paragraphs, and empty input.

use revline_core::render_markdown;

#[test]
fn empty_input_renders_empty() {
    assert_eq!(render_markdown(""), "");
}

#[test]
fn blank_lines_are_dropped() {
    assert_eq!(render_markdown("\n\n"), "");
    assert_eq!(render_markdown("a\n\nb"), "<p>a</p>\n<p>b</p>");
}

#[test]
fn single_paragraph() {
    assert_eq!(render_markdown("Hello world"), "<p>Hello world</p>");
}

#[test]
fn rendering_is_idempotent_on_paragraph_output() {
    let once = render_markdown("Hello world");
    let twice = render_markdown(&once);
    assert_eq!(once, twice, "re-rendering must not double-wrap paragraphs");
}

#[test]
fn heading_levels_render_exactly_once() {
    assert_eq!(render_markdown("# Title"), "<h1>Title</h1>");
    assert_eq!(render_markdown("## Title"), "<h2>Title</h2>");
    assert_eq!(render_markdown("### Title"), "<h3>Title</h3>");
    assert_eq!(render_markdown("#### Title"), "<h4>Title</h4>");
}

#[test]
fn heading_content_is_not_duplicated_into_a_paragraph() {
    let output = render_markdown("# Title");
    assert_eq!(output.matches("Title").count(), 1);
    assert!(!output.contains("<p>"));
}

#[test]
fn fenced_block_keeps_interior_exactly() {
    let output = render_markdown("```js\nconst x = 1;\n```");
    assert_eq!(
        output,
        "<pre><code class=\"language-js\">const x = 1;</code></pre>"
    );
}

#[test]
fn fenced_block_without_tag_defaults_to_text() {
    let output = render_markdown("```\nplain\n```");
    assert_eq!(output, "<pre><code class=\"language-text\">plain</code></pre>");
}

#[test]
fn fenced_block_trims_a_single_surrounding_blank_line() {
    let output = render_markdown("```rs\n\nlet y = 2;\n\n```");
    assert_eq!(
        output,
        "<pre><code class=\"language-rs\">let y = 2;</code></pre>"
    );
}

#[test]
fn fence_interior_is_shielded_from_other_passes() {
    let output = render_markdown("```md\n# not a heading\n- not a list\n```");
    assert!(output.contains("# not a heading\n- not a list"));
    assert!(!output.contains("<h1>"));
    assert!(!output.contains("<li>"));
}

#[test]
fn unterminated_fence_degrades_to_trailing_paragraphs() {
    let output = render_markdown("intro\n```py\nx = 1");
    assert_eq!(output, "<p>intro</p>\n<p>x = 1</p>");
}

#[test]
fn inline_code_spans() {
    assert_eq!(
        render_markdown("use `BTreeMap` here"),
        "<p>use <code>BTreeMap</code> here</p>"
    );
}

#[test]
fn list_run_is_wrapped_in_exactly_one_container() {
    let output = render_markdown("- one\n- two\n- three");
    assert_eq!(output.matches("<ul>").count(), 1);
    assert_eq!(output.matches("</ul>").count(), 1);
    assert_eq!(output.matches("<li>").count(), 3);
    assert_eq!(
        output,
        "<ul>\n<li>one</li>\n<li>two</li>\n<li>three</li>\n</ul>"
    );
}

#[test]
fn separate_list_runs_get_separate_containers() {
    let output = render_markdown("- a\n\ntext\n\n- b");
    assert_eq!(output.matches("<ul>").count(), 2);
    assert_eq!(output.matches("</ul>").count(), 2);
}

#[test]
fn bold_spans() {
    assert_eq!(
        render_markdown("this is **important** here"),
        "<p>this is <strong>important</strong> here</p>"
    );
}

#[test]
fn mixed_document() {
    let review = "\
# Review

Overall **solid**.

## Issues

- `unwrap` on line 4
- missing test

```rust
fn demo() {}
```

done";
    let output = render_markdown(review);

    assert!(output.contains("<h1>Review</h1>"));
    assert!(output.contains("<h2>Issues</h2>"));
    assert!(output.contains("<p>Overall <strong>solid</strong>.</p>"));
    assert!(output.contains("<ul>\n<li><code>unwrap</code> on line 4</li>\n<li>missing test</li>\n</ul>"));
    assert!(output.contains("<pre><code class=\"language-rust\">fn demo() {}</code></pre>"));
    assert!(output.ends_with("<p>done</p>"));
}

#[test]
fn rendering_never_fails_on_arbitrary_input() {
    // Total function: adversarial fragments must all produce some output.
    for input in ["```", "``", "`", "**", "#", "####x", "- ", "<p>", "\u{0}"] {
        let _ = render_markdown(input);
    }
}
