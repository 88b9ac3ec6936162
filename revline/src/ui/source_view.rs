//! Source panel renderer for revline.
//!
//! Renders the centre panel using a List widget with manual virtual
//! scrolling. Only lines[source_scroll..source_scroll+viewport_height]
//! are materialized per frame, making rendering O(viewport) rather than
//! O(file length).
//!
//! Lines flagged by the annotation extractor get a gutter marker and a
//! background tint; the cursor line gets an emphasized line number. A
//! flagged line is clickable and Enter-able even when no comment was
//! captured for it (the dialog then shows its placeholder).

use ratatui::{
    Frame,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
};

use crate::app::{AppState, PanelFocus};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

/// Renders the source centre panel with virtual List scrolling.
///
/// Placeholders, in priority order: load error, loading, no selection.
pub fn render_source(
    frame: &mut Frame,
    area: ratatui::layout::Rect,
    focus: PanelFocus,
    state: &AppState,
    theme: &Theme,
) {
    let is_focused = focus == PanelFocus::Source;
    let title = match &state.selected_path {
        Some(path) => path.clone(),
        None => "Source".to_owned(),
    };
    let block = panel_block(&title, is_focused, theme);
    let inner = inner_rect(area);
    let viewport_height = inner.height as usize;

    frame.render_widget(block, area);

    if state.source_lines.is_empty() {
        let msg = if let Some(reason) = &state.source_error {
            reason.clone()
        } else if state.source_loading {
            "Loading...".to_owned()
        } else if state.selected_path.is_some() {
            "(empty file)".to_owned()
        } else {
            "Select a file from the list to view its content".to_owned()
        };
        let style = if state.source_error.is_some() {
            Style::default().fg(theme.error)
        } else {
            Style::default().fg(theme.file_meta)
        };
        let items = vec![ListItem::new(Line::styled(msg, style))];
        frame.render_widget(List::new(items), inner);
        return;
    }

    let total = state.source_lines.len();
    let visible_start = state.source_scroll.min(total.saturating_sub(1));
    let visible_end = (visible_start + viewport_height).min(total);
    let number_width = digits(total);

    let items: Vec<ListItem> = (visible_start..visible_end)
        .map(|index| ListItem::new(source_line(index, state, theme, number_width)))
        .collect();

    frame.render_widget(List::new(items), inner);
}

/// Builds the display line for source line `index` (0-based).
///
/// Layout: right-aligned line number, gutter marker, highlighted code
/// spans. Flagged lines are tinted with `theme.highlight_bg` across the
/// whole row.
fn source_line(
    index: usize,
    state: &AppState,
    theme: &Theme,
    number_width: usize,
) -> Line<'static> {
    let number = index + 1;
    let flagged = state.annotations.highlighted_lines.contains(&(number as u32));
    let is_cursor = number == state.cursor_line;

    let number_style = if is_cursor {
        Style::default().fg(theme.cursor_line).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.line_number)
    };
    let marker = if flagged {
        Span::styled("\u{258c}", Style::default().fg(theme.highlight_marker))
    } else {
        Span::raw(" ")
    };

    let mut spans = vec![
        Span::styled(format!("{number:>number_width$} "), number_style),
        marker,
        Span::raw(" "),
    ];
    spans.extend(state.source_lines[index].spans.iter().cloned());

    let mut line = Line::from(spans);
    if flagged {
        line.style = Style::default().bg(theme.highlight_bg);
    }
    line
}

/// Number of decimal digits needed for the gutter of an `n`-line file.
fn digits(n: usize) -> usize {
    let mut digits = 1;
    let mut n = n;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gutter_width_grows_with_line_count() {
        assert_eq!(digits(1), 1);
        assert_eq!(digits(9), 1);
        assert_eq!(digits(10), 2);
        assert_eq!(digits(4242), 4);
    }
}
