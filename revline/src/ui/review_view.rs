//! Review panel renderer and markup display adapter for revline.
//!
//! The review panel shows the reviewer's prose after it has been rendered
//! to structural markup by `revline_core::render_markdown`. The adapter in
//! this module converts that markup into styled terminal lines. It trusts
//! its input completely: the markup comes from our own renderer, every
//! block element sits on its own line, and nothing is escaped. Tags the
//! adapter does not recognize pass through as plain text rather than
//! erroring.

use ratatui::{
    Frame,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
};

use crate::app::{AppState, PanelFocus};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

const CODE_OPEN_PREFIX: &str = "<pre><code class=\"language-";
const CODE_CLOSE: &str = "</code></pre>";

/// Renders the review right panel.
///
/// Shows, in priority order: the in-flight indicator, a reviewer failure,
/// the rendered review, or the idle hint.
pub fn render_review(
    frame: &mut Frame,
    area: ratatui::layout::Rect,
    focus: PanelFocus,
    state: &AppState,
    theme: &Theme,
) {
    let is_focused = focus == PanelFocus::Review;
    let block = panel_block("Review", is_focused, theme);
    let inner = inner_rect(area);

    frame.render_widget(block, area);

    let text = if state.review_loading {
        Text::from(Line::styled(
            "Reviewing...",
            Style::default().fg(theme.file_meta).add_modifier(Modifier::ITALIC),
        ))
    } else if let Some(reason) = &state.review_error {
        Text::from(Line::styled(reason.clone(), Style::default().fg(theme.error)))
    } else if !state.review_lines.is_empty() {
        Text::from(state.review_lines.clone())
    } else if state.selected_path.is_some() {
        Text::from(Line::styled(
            "Press r to request a review of this file",
            Style::default().fg(theme.file_meta),
        ))
    } else {
        Text::from(Line::styled(
            "Select a file, then press r to review it",
            Style::default().fg(theme.file_meta),
        ))
    };

    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .scroll((state.review_scroll, 0));
    frame.render_widget(paragraph, inner);
}

/// Converts structural markup into styled terminal lines.
///
/// Handles the tag vocabulary `render_markdown` emits: `<h1>`..`<h4>`,
/// `<p>`, `<ul>`/`</ul>` (containers, dropped), `<li>`, fenced
/// `<pre><code class="language-X">` blocks, and inline `<code>` /
/// `<strong>` spans. Anything else is shown as plain text.
pub fn markup_to_lines(markup: &str, theme: &Theme) -> Vec<Line<'static>> {
    let mut out: Vec<Line<'static>> = Vec::new();
    let mut in_code = false;

    for line in markup.lines() {
        if in_code {
            match line.strip_suffix(CODE_CLOSE) {
                Some(content) => {
                    out.push(code_line(content, theme));
                    in_code = false;
                }
                None => out.push(code_line(line, theme)),
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix(CODE_OPEN_PREFIX) {
            // rest is `X">content...`, where content may close on this line.
            if let Some(tag_end) = rest.find("\">") {
                let body = &rest[tag_end + 2..];
                match body.strip_suffix(CODE_CLOSE) {
                    Some(content) => out.push(code_line(content, theme)),
                    None => {
                        out.push(code_line(body, theme));
                        in_code = true;
                    }
                }
                continue;
            }
        }

        if let Some(content) = strip_tag(line, "h1").or_else(|| strip_tag(line, "h2")) {
            out.push(Line::styled(
                content.to_owned(),
                Style::default().fg(theme.heading).add_modifier(Modifier::BOLD),
            ));
        } else if let Some(content) = strip_tag(line, "h3").or_else(|| strip_tag(line, "h4")) {
            out.push(Line::styled(content.to_owned(), Style::default().fg(theme.heading)));
        } else if line == "<ul>" || line == "</ul>" {
            // Containers carry no content of their own.
        } else if let Some(content) = strip_tag(line, "li") {
            let mut spans = vec![Span::styled(
                "\u{2022} ".to_owned(),
                Style::default().fg(theme.list_bullet),
            )];
            spans.extend(inline_spans(content, theme));
            out.push(Line::from(spans));
        } else if let Some(content) = strip_tag(line, "p") {
            out.push(Line::from(inline_spans(content, theme)));
        } else {
            out.push(Line::styled(line.to_owned(), Style::default().fg(theme.text)));
        }
    }

    out
}

/// Strips `<tag>`/`</tag>` from a full line, returning the content.
fn strip_tag<'a>(line: &'a str, tag: &str) -> Option<&'a str> {
    line.strip_prefix(&format!("<{tag}>"))?
        .strip_suffix(&format!("</{tag}>"))
}

/// Styles one line of fenced code block content.
fn code_line(content: &str, theme: &Theme) -> Line<'static> {
    Line::styled(format!("  {content}"), Style::default().fg(theme.code_block))
}

/// Splits paragraph or list-item content on inline `<code>` / `<strong>`
/// tags, tracking nesting so `<code><strong>x</strong></code>` styles
/// correctly. Unbalanced tags degrade to whatever state they leave behind;
/// the text is still shown.
fn inline_spans(content: &str, theme: &Theme) -> Vec<Span<'static>> {
    const TAGS: [(&str, i32, i32); 4] = [
        ("<code>", 1, 0),
        ("</code>", -1, 0),
        ("<strong>", 0, 1),
        ("</strong>", 0, -1),
    ];

    let mut spans = Vec::new();
    let mut code_depth = 0i32;
    let mut strong_depth = 0i32;
    let mut rest = content;

    while !rest.is_empty() {
        let next = TAGS
            .iter()
            .filter_map(|&(tag, code, strong)| rest.find(tag).map(|at| (at, tag, code, strong)))
            .min_by_key(|&(at, tag, _, _)| (at, std::cmp::Reverse(tag.len())));

        match next {
            Some((at, tag, code, strong)) => {
                if at > 0 {
                    spans.push(styled_span(&rest[..at], code_depth, strong_depth, theme));
                }
                code_depth = (code_depth + code).max(0);
                strong_depth = (strong_depth + strong).max(0);
                rest = &rest[at + tag.len()..];
            }
            None => {
                spans.push(styled_span(rest, code_depth, strong_depth, theme));
                break;
            }
        }
    }

    if spans.is_empty() {
        spans.push(Span::raw(""));
    }
    spans
}

/// Builds one span with the style implied by the current tag depths.
fn styled_span(text: &str, code_depth: i32, strong_depth: i32, theme: &Theme) -> Span<'static> {
    let mut style = Style::default().fg(if code_depth > 0 {
        theme.inline_code
    } else if strong_depth > 0 {
        theme.bold
    } else {
        theme.text
    });
    if strong_depth > 0 {
        style = style.add_modifier(Modifier::BOLD);
    }
    Span::styled(text.to_owned(), style)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(markup: &str) -> Vec<Line<'static>> {
        markup_to_lines(markup, &Theme::dark())
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn headings_and_paragraphs_map_to_single_lines() {
        let lines = render("<h1>Review</h1>\n<p>fine overall</p>");
        assert_eq!(lines.len(), 2);
        assert_eq!(line_text(&lines[0]), "Review");
        assert_eq!(line_text(&lines[1]), "fine overall");
    }

    #[test]
    fn list_containers_are_dropped_and_items_get_bullets() {
        let lines = render("<ul>\n<li>one</li>\n<li>two</li>\n</ul>");
        assert_eq!(lines.len(), 2);
        assert_eq!(line_text(&lines[0]), "\u{2022} one");
        assert_eq!(line_text(&lines[1]), "\u{2022} two");
    }

    #[test]
    fn multi_line_code_block_is_collected() {
        let markup = "<pre><code class=\"language-rs\">fn a() {}\nfn b() {}</code></pre>";
        let lines = render(markup);
        assert_eq!(lines.len(), 2);
        assert_eq!(line_text(&lines[0]), "  fn a() {}");
        assert_eq!(line_text(&lines[1]), "  fn b() {}");
    }

    #[test]
    fn inline_tags_split_into_styled_spans() {
        let lines = render("<p>use <code>next</code> and <strong>stop</strong></p>");
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), "use next and stop");
        assert_eq!(lines[0].spans.len(), 4);
    }

    #[test]
    fn nested_inline_tags_keep_text() {
        let lines = render("<p><code><strong>x</strong></code></p>");
        assert_eq!(line_text(&lines[0]), "x");
    }

    #[test]
    fn unknown_lines_pass_through_as_text() {
        let lines = render("just text");
        assert_eq!(line_text(&lines[0]), "just text");
    }
}
