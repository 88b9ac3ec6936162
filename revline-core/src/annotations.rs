//! Line-reference extraction from review prose.
//!
//! Reviewer output is natural language with line numbers scattered through
//! it in several habitual shapes ("Line 12:", "lines 3-5", a numbered list
//! whose markers happen to be line numbers). Nothing about the text is
//! well-formed, so extraction is a fixed, ordered battery of independent
//! regex passes over the whole input. Every pass accumulates into the same
//! result: the flagged-line set only grows, while a later pass's comment
//! for a line overwrites an earlier pass's (last-applied-pattern-wins).
//! The order is part of the contract, not an accident of iteration.
//!
//! The comment attributed to a reference is the text immediately after the
//! match, extended line by line until the next line itself looks like the
//! start of a new reference. That stop condition is a heuristic: a comment
//! legitimately containing a nested numbered sub-list ("2. also consider
//! ...") is cut short at the sub-list marker, because the marker is
//! indistinguishable from a new reference. This is a known limitation, not
//! a bug to fix silently.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;

/// The recognized reference shapes, in fixed application order.
///
/// Capture group 1 is the start line; group 2, where present, is the end of
/// a range. Patterns are not mutually exclusive: the same piece of text may
/// be matched by several of them, and later entries win comment conflicts.
static REFERENCE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"Line\s+(\d+)-(\d+):",               // "Line 1-5:"
        r"Line\s+(\d+):",                     // "Line 1:"
        r"(?m)^\s*(\d+)\.\s+",                // "1. " at line start
        r"(?m)^\s*(\d+)\)\s+",                // "1) " at line start
        r"(?m)^\s*(\d+)\s+",                  // "1 " at line start
        r"(?i)line\s+(\d+)",                  // "line 1", any position
        r"(?i)lines?\s+(\d+)(?:\s*-\s*(\d+))?", // "lines 1" or "lines 1-5"
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("reference pattern compiles"))
    .collect()
});

/// Line-start shapes that terminate a comment span.
///
/// Mirrors the line-start reference patterns above. Matched against each
/// candidate continuation line directly (anchored at the slice start)
/// instead of via lookaround, so the behavior does not depend on any
/// engine's overlap or lookahead semantics.
static REFERENCE_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d+\.|\d+\)|\d+\s|[Ll]ine\s+\d)").expect("reference start pattern compiles")
});

/// Output of [`extract_annotations`]: flagged lines plus per-line comments.
///
/// `highlighted_lines` iterates ascending with no duplicates by
/// construction. Every key of `line_comments` is a member of
/// `highlighted_lines`; the converse need not hold, and consumers must
/// treat a flagged line without a usable comment as "highlighted, no
/// detail available" rather than an error.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AnnotationResult {
    /// Source lines the display layer should mark, ascending.
    pub highlighted_lines: BTreeSet<u32>,
    /// Trimmed comment text attributed to each referenced line.
    pub line_comments: BTreeMap<u32, String>,
}

impl AnnotationResult {
    /// Returns `true` when no reference was found in the input.
    pub fn is_empty(&self) -> bool {
        self.highlighted_lines.is_empty()
    }

    /// Returns the comment attributed to `line`, if one was captured and is
    /// not blank.
    pub fn comment_for(&self, line: u32) -> Option<&str> {
        self.line_comments
            .get(&line)
            .map(String::as_str)
            .filter(|comment| !comment.is_empty())
    }
}

/// Scans `review` for line references and accumulates them into an
/// [`AnnotationResult`].
///
/// Pure and deterministic; each pattern pass scans the entire input, so the
/// cost is linear in input length per pattern. Unparseable numbers (such as
/// a digit run that overflows `u32`) are skipped silently. A range
/// reference flags every line in `[start, end]` inclusive and stores the
/// identical comment under each of them; an inverted range (`end < start`)
/// flags nothing. Input with no references yields an empty result, which
/// is success, not an error.
pub fn extract_annotations(review: &str) -> AnnotationResult {
    REFERENCE_PATTERNS
        .iter()
        .fold(AnnotationResult::default(), |acc, pattern| {
            apply_pattern(pattern, review, acc)
        })
}

/// Applies one reference pattern over the whole input, folding matches into
/// the accumulated result.
fn apply_pattern(pattern: &Regex, review: &str, mut acc: AnnotationResult) -> AnnotationResult {
    for caps in pattern.captures_iter(review) {
        let Some(whole) = caps.get(0) else { continue };
        let Some(start) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) else {
            continue;
        };
        let end = match caps.get(2) {
            Some(m) => match m.as_str().parse::<u32>() {
                Ok(end) => end,
                Err(_) => continue,
            },
            None => start,
        };

        let comment = comment_span(review, whole.end());
        for line in start..=end {
            acc.highlighted_lines.insert(line);
            acc.line_comments.insert(line, comment.clone());
        }
    }
    acc
}

/// Captures the comment text that follows a reference ending at byte
/// offset `from`.
///
/// Takes the remainder of the current line, then extends over following
/// lines until one matches [`REFERENCE_START`]. The span is trimmed of
/// surrounding whitespace and of one leading colon: the colon-less
/// patterns re-match text written for the colon forms ("Line 3: fix it"),
/// and without the strip they would attribute ": fix it" to line 3.
/// When nothing non-reference follows, the result is the empty string.
fn comment_span(review: &str, from: usize) -> String {
    let rest = &review[from..];
    let mut end = rest.find('\n').unwrap_or(rest.len());

    while end < rest.len() {
        let line_start = end + 1;
        let line_end = rest[line_start..]
            .find('\n')
            .map_or(rest.len(), |i| line_start + i);
        if REFERENCE_START.is_match(&rest[line_start..line_end]) {
            break;
        }
        end = line_end;
    }

    let span = rest[..end].trim();
    let span = span.strip_prefix(':').map_or(span, str::trim_start);
    span.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_span_stops_before_next_reference() {
        let text = "Line 3: fix this\nstill line three\nLine 8: other";
        // Offset of the text after "Line 3:".
        let from = "Line 3:".len();
        assert_eq!(comment_span(text, from), "fix this\nstill line three");
    }

    #[test]
    fn comment_span_strips_one_leading_colon() {
        let text = "line 3: fix it";
        let from = "line 3".len();
        assert_eq!(comment_span(text, from), "fix it");
    }

    #[test]
    fn comment_span_empty_when_nothing_follows() {
        let text = "see Line 9:";
        assert_eq!(comment_span(text, text.len()), "");
    }
}
