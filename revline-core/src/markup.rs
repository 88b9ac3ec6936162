//! Markdown-to-structural-markup rendering.
//!
//! Review text uses a small, predictable markdown dialect: headings up to
//! four levels, fenced code blocks, inline code, `- ` list items, bold
//! spans, and plain paragraphs. Rendering is an ordered sequence of
//! substitution passes over the whole text, each pass re-scanning the
//! output of the previous one. There is no general-purpose markdown parser
//! here and none is wanted; the dialect is closed and the passes are the
//! contract.
//!
//! Fenced blocks are handled first: each completed fence is rendered and
//! lifted out behind a placeholder so later passes cannot disturb its
//! interior, then restored at the end byte-exact (minus one leading and
//! one trailing blank line). Heading passes test the longest marker run
//! first so `####` is never consumed as `#`. The paragraph pass runs last,
//! after all block substitutions, or it would wrap half-formed markers.
//!
//! Output is trusted markup: nothing is escaped. The only consumer is the
//! in-process review panel, which interprets the tags itself; feeding the
//! output to anything that executes markup is the caller's decision to
//! make, not this function's.

use std::sync::LazyLock;

use regex::Regex;

static HEADINGS: LazyLock<[(Regex, &'static str, &'static str); 4]> = LazyLock::new(|| {
    // Longest marker first: a shorter run anchored only by `#` would also
    // match deeper headings.
    [
        (heading_regex(4), "<h4>", "</h4>"),
        (heading_regex(3), "<h3>", "</h3>"),
        (heading_regex(2), "<h2>", "</h2>"),
        (heading_regex(1), "<h1>", "</h1>"),
    ]
});

static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("inline code pattern compiles"));

static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*-\s+(.*)$").expect("list item pattern compiles"));

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("bold pattern compiles"));

fn heading_regex(level: usize) -> Regex {
    let marker = "#".repeat(level);
    // (?m)^#{level}\s+(.*)$ with the marker run length exact.
    Regex::new(&format!(r"(?m)^{marker}\s+(.*)$")).expect("heading pattern compiles")
}

/// Renders `text` from the review markdown dialect to structural markup.
///
/// Total and deterministic: every input produces an output, including the
/// empty string (which renders to the empty string; blank lines are
/// dropped rather than wrapped). Already-rendered paragraph text passes
/// through unchanged, so re-rendering output does not double-wrap.
pub fn render_markdown(text: &str) -> String {
    let (text, blocks) = lift_fenced_blocks(text);
    let text = replace_headings(&text);
    let text = INLINE_CODE.replace_all(&text, "<code>$1</code>");
    let text = wrap_list_items(&text);
    let text = BOLD.replace_all(&text, "<strong>$1</strong>");
    let text = wrap_paragraphs(&text);
    restore_fenced_blocks(text, &blocks)
}

/// Placeholder emitted where a lifted fenced block will be restored.
///
/// Starts with `<` so the paragraph pass leaves it alone, and contains no
/// backticks, asterisks, or list markers for the other passes to chew on.
fn block_placeholder(index: usize) -> String {
    format!("<!--code-block-{index}-->")
}

/// Renders completed fenced code blocks and replaces each with a
/// placeholder, returning the rewritten text and the rendered blocks.
///
/// A fence opens on a line starting with three backticks (the rest of the
/// line is the language tag, defaulting to `text`) and closes on a line
/// that is exactly three backticks. The interior is preserved verbatim
/// apart from one leading and one trailing blank line. An opener with no
/// matching close is dropped and its content falls through to the later
/// passes, ending up as trailing paragraphs.
fn lift_fenced_blocks(text: &str) -> (String, Vec<String>) {
    let lines: Vec<&str> = text.lines().collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut blocks: Vec<String> = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let Some(tag) = line.strip_prefix("```") else {
            out.push(line.to_owned());
            i += 1;
            continue;
        };

        let close = (i + 1..lines.len()).find(|&j| lines[j].trim_end() == "```");
        let Some(close) = close else {
            // Unterminated fence: drop the opener, keep the content.
            i += 1;
            continue;
        };

        let language = tag.trim().split_whitespace().next().unwrap_or("");
        let language = if language.is_empty() { "text" } else { language };

        let mut start = i + 1;
        let mut end = close;
        if start < end && lines[start].trim().is_empty() {
            start += 1;
        }
        if end > start && lines[end - 1].trim().is_empty() {
            end -= 1;
        }

        out.push(block_placeholder(blocks.len()));
        blocks.push(format!(
            "<pre><code class=\"language-{language}\">{}</code></pre>",
            lines[start..end].join("\n")
        ));
        i = close + 1;
    }

    (out.join("\n"), blocks)
}

/// Substitutes placeholders back with their rendered fenced blocks.
fn restore_fenced_blocks(mut text: String, blocks: &[String]) -> String {
    for (index, block) in blocks.iter().enumerate() {
        text = text.replace(&block_placeholder(index), block);
    }
    text
}

/// Applies the four heading passes, longest marker run first.
fn replace_headings(text: &str) -> String {
    let mut text = text.to_owned();
    for (pattern, open, close) in HEADINGS.iter() {
        text = pattern
            .replace_all(&text, format!("{open}$1{close}"))
            .into_owned();
    }
    text
}

/// Converts `- ` lines to `<li>` and wraps each contiguous run of items in
/// exactly one `<ul>` container.
fn wrap_list_items(text: &str) -> String {
    let text = LIST_ITEM.replace_all(text, "<li>$1</li>");

    let mut out: Vec<&str> = Vec::new();
    let mut in_list = false;
    for line in text.lines() {
        let is_item = line.starts_with("<li>");
        if is_item && !in_list {
            out.push("<ul>");
            in_list = true;
        } else if !is_item && in_list {
            out.push("</ul>");
            in_list = false;
        }
        out.push(line);
    }
    if in_list {
        out.push("</ul>");
    }
    out.join("\n")
}

/// Wraps every remaining non-blank, non-markup line in a paragraph.
///
/// Runs last: any line still starting with `<` was produced by an earlier
/// pass (or is a lifted-block placeholder) and is left alone. Blank lines
/// are dropped, which also makes the empty input render to empty output.
fn wrap_paragraphs(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if line.starts_with('<') {
            out.push(line.to_owned());
        } else {
            out.push(format!("<p>{line}</p>"));
        }
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_markers_do_not_swallow_deeper_levels() {
        assert_eq!(render_markdown("### Sub"), "<h3>Sub</h3>");
        assert_eq!(render_markdown("#### Deep"), "<h4>Deep</h4>");
    }

    #[test]
    fn placeholder_survives_every_pass() {
        // A placeholder must come back out as the rendered block even when
        // surrounded by every other construct.
        let input = "# T\n```js\nlet a = `x`;\n```\n- item\n**b**";
        let output = render_markdown(input);
        assert!(output.contains("<pre><code class=\"language-js\">let a = `x`;</code></pre>"));
        assert!(!output.contains("code-block-0"));
    }

    #[test]
    fn unterminated_fence_becomes_paragraphs() {
        let output = render_markdown("before\n```rust\nlet x = 1;");
        assert_eq!(output, "<p>before</p>\n<p>let x = 1;</p>");
    }
}
