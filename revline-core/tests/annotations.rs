//! Integration tests for the annotation extractor.
//!
//! Exercises: every recognized reference shape, range expansion, comment
//! attribution, pattern-precedence overwrites, sortedness/deduplication,
//! degenerate input, and the documented comment-span heuristic limit.

use revline_core::extract_annotations;

#[test]
fn no_numeric_markers_yields_empty_result() {
    let result = extract_annotations("looks good to me, ship it");
    assert!(result.is_empty(), "prose without numbers must flag nothing");
    assert!(result.line_comments.is_empty());
}

#[test]
fn empty_input_is_success() {
    let result = extract_annotations("");
    assert!(result.is_empty());
}

#[test]
fn explicit_single_and_range_references() {
    let result = extract_annotations("Line 3: fix this typo\nLine 7-9: extract this helper");

    let lines: Vec<u32> = result.highlighted_lines.iter().copied().collect();
    assert_eq!(lines, vec![3, 7, 8, 9]);

    assert_eq!(result.comment_for(3), Some("fix this typo"));
    assert_eq!(result.comment_for(7), Some("extract this helper"));
    assert_eq!(result.comment_for(8), Some("extract this helper"));
    assert_eq!(result.comment_for(9), Some("extract this helper"));
}

#[test]
fn lowercase_reference_matches_case_insensitively() {
    let result = extract_annotations("line 5 has an issue");
    let lines: Vec<u32> = result.highlighted_lines.iter().copied().collect();
    assert_eq!(lines, vec![5]);
    assert_eq!(result.comment_for(5), Some("has an issue"));
}

#[test]
fn numbered_list_markers_are_references() {
    let review = "1. Rename the variable\n2) Drop the clone\n3 missing newline";
    let result = extract_annotations(review);

    let lines: Vec<u32> = result.highlighted_lines.iter().copied().collect();
    assert_eq!(lines, vec![1, 2, 3]);
    assert_eq!(result.comment_for(1), Some("Rename the variable"));
    assert_eq!(result.comment_for(2), Some("Drop the clone"));
    assert_eq!(result.comment_for(3), Some("missing newline"));
}

#[test]
fn comment_extends_over_plain_continuation_lines() {
    let review = "Line 4: this loop allocates per iteration\nhoist the buffer out\nLine 9: ok";
    let result = extract_annotations(review);

    assert_eq!(
        result.comment_for(4),
        Some("this loop allocates per iteration\nhoist the buffer out")
    );
    assert_eq!(result.comment_for(9), Some("ok"));
}

#[test]
fn repeated_and_overlapping_references_stay_sorted_and_deduplicated() {
    let review = "Line 2-4: first pass\nlines 3-5 second pass\nline 2 again";
    let result = extract_annotations(review);

    let lines: Vec<u32> = result.highlighted_lines.iter().copied().collect();
    assert_eq!(lines, vec![2, 3, 4, 5], "overlap must union, not duplicate");

    // "line 2 again" is matched by a later pattern than "Line 2-4:", so its
    // comment wins for line 2.
    assert_eq!(result.comment_for(2), Some("again"));
    // Lines only covered by the lines-range form keep that form's comment.
    assert_eq!(result.comment_for(5), Some("second pass"));
}

#[test]
fn overflowing_line_number_is_skipped_silently() {
    let result = extract_annotations("Line 99999999999999999999: never parses");
    assert!(
        !result.highlighted_lines.contains(&u32::MAX),
        "overflow must not be clamped into a real line"
    );
    // The digits still match the bare-leading-number shape on no line here,
    // so nothing at all is flagged.
    assert!(result.is_empty());
}

#[test]
fn inverted_range_flags_nothing() {
    let result = extract_annotations("Line 9-3: backwards");
    assert!(result.highlighted_lines.is_empty());
}

#[test]
fn reference_with_no_trailing_text_stores_empty_comment() {
    let result = extract_annotations("Line 12:");
    assert!(result.highlighted_lines.contains(&12));
    assert_eq!(
        result.line_comments.get(&12).map(String::as_str),
        Some(""),
        "span is stored even when empty"
    );
    assert_eq!(result.comment_for(12), None, "blank comment reads as no detail");
}

#[test]
fn every_comment_key_is_a_highlighted_line() {
    let review = "Line 1: a\n2. b\nlines 4-6 c\nline 9 d";
    let result = extract_annotations(review);
    for line in result.line_comments.keys() {
        assert!(
            result.highlighted_lines.contains(line),
            "comment for line {line} without a highlight"
        );
    }
}

#[test]
fn nested_numbered_sub_list_truncates_span() {
    // Known heuristic limit: a numbered sub-list inside a comment is
    // indistinguishable from a new reference, so the span stops there and
    // the marker line is treated as a reference of its own.
    let review = "Line 10: two problems here\n1. naming\n2. lifetime";
    let result = extract_annotations(review);

    assert_eq!(result.comment_for(10), Some("two problems here"));
    assert!(result.highlighted_lines.contains(&1));
    assert!(result.highlighted_lines.contains(&2));
}

#[test]
fn extraction_is_deterministic() {
    let review = "Line 3: a\nlines 3-4 b\n7) c";
    assert_eq!(extract_annotations(review), extract_annotations(review));
}
