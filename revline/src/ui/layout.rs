//! Responsive 3-panel layout engine for revline.
//!
//! This module is pure layout arithmetic; no mutable application state
//! lives here. It is called inside `terminal.draw()` on every render so
//! every frame gets a fresh layout that automatically reflects the current
//! terminal size.
//!
//! # Panel geometry
//!
//! At `>= 120` columns all three panels are visible with widths driven by
//! `AppState.left_pct / center_pct / right_pct` (defaults 20 / 55 / 25).
//! Below 120 columns both side panels collapse and the source view fills
//! the full width.
//!
//! `Spacing::Overlap(1)` combined with `Block::merge_borders` makes
//! adjacent panel borders share a single column and merge their
//! corner/junction box-drawing characters automatically.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect, Spacing},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use crate::app::{AppState, Mode};
use crate::theme::Theme;

/// Returns `[left, center, right, status_bar]` panel `Rect`s for this frame.
///
/// Called inside `terminal.draw()` on every render. The returned rects are
/// valid only for the current draw closure; never store them across frames
/// (the hit-testing copy in `AppState.panel_rects` is refreshed every
/// render for exactly that reason).
pub fn compute_layout(frame: &Frame, state: &AppState) -> [Rect; 4] {
    let term_width = frame.area().width;

    // Vertical split: main area (fills remaining height) + 1-row status bar.
    let [main_area, status_bar] =
        frame.area().layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]));

    // Horizontal split: collapse side panels when the terminal is narrow.
    let horizontal = if term_width >= 120 {
        Layout::horizontal([
            Constraint::Percentage(state.left_pct),
            Constraint::Percentage(state.center_pct),
            Constraint::Percentage(state.right_pct),
        ])
        .spacing(Spacing::Overlap(1))
    } else {
        Layout::horizontal([
            Constraint::Length(0),
            Constraint::Fill(1),
            Constraint::Length(0),
        ])
        .spacing(Spacing::Overlap(1))
    };

    let [left, center, right] = main_area.layout(&horizontal);

    [left, center, right, status_bar]
}

/// Returns the inner `Rect` of a panel after removing the 1-cell border.
///
/// Used to cache viewport heights in `AppState` before panels are
/// rendered, so that scroll distances are available at keypress time.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// Builds a bordered `Block` for a panel.
///
/// Applies `BorderType::Thick` when the panel is focused and
/// `BorderType::Plain` otherwise. `MergeStrategy::Fuzzy` is used because
/// `Exact` produces incorrect junctions when mixing `Thick` and `Plain`
/// borders.
pub fn panel_block<'a>(title: &'a str, is_focused: bool, theme: &'a Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .merge_borders(MergeStrategy::Fuzzy)
}

/// Renders the 1-row status bar at the bottom of the terminal.
///
/// Always shows the mode indicator and the selected file; a review in
/// flight and the flagged-line count are appended when relevant. Never
/// renders blank.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let mode_text = match state.mode {
        Mode::Normal => " NORMAL ",
        Mode::HelpOverlay => " HELP ",
        Mode::LineDetail => " DETAIL ",
    };
    let mode_span = Span::styled(
        mode_text,
        Style::default().fg(theme.status_mode).add_modifier(Modifier::BOLD),
    );

    let mut spans = vec![mode_span];
    if let Some(path) = &state.selected_path {
        spans.push(Span::raw(" "));
        spans.push(Span::raw(path.clone()));
    }
    if state.review_loading {
        spans.push(Span::styled(
            "  reviewing...",
            Style::default().add_modifier(Modifier::ITALIC),
        ));
    } else if !state.annotations.is_empty() {
        spans.push(Span::raw(format!(
            "  {} flagged line(s)",
            state.annotations.highlighted_lines.len()
        )));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}
