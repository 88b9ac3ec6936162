//! UI rendering module for revline.
//!
//! This is the module root for `ui/`. It re-exports `render()` as the
//! single entry point called by the event loop's `terminal.draw()`
//! closure.
//!
//! All layout arithmetic lives in `layout.rs`. Source panel rendering
//! lives in `source_view.rs`, the file listing in `file_list.rs`, and the
//! review panel plus the markup display adapter in `review_view.rs`. The
//! modal overlays (help, line detail) render last so they sit on top.

mod layout;
pub mod dialog;
pub mod file_list;
pub mod help;
pub mod keybindings;
pub mod review_view;
pub mod source_view;

use ratatui::Frame;

use crate::app::{AppState, Mode};
use crate::theme::Theme;
use layout::{compute_layout, inner_rect, render_status_bar};

/// Renders one complete frame: 3-panel layout, overlays, and status bar.
///
/// Called exactly once per `AppEvent::Render` inside `terminal.draw()`.
/// This is the only location where `terminal.draw()` is invoked in the
/// application.
///
/// After computing the layout, viewport heights and panel rects are
/// written back into `state` so that scroll operations and mouse
/// hit-testing triggered by the *next* input event can use them. The
/// one-frame lag is imperceptible in practice.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let [left, center, right, status_bar] = compute_layout(frame, state);

    // Cache geometry BEFORE rendering panels so it is available for the
    // next input cycle. inner_rect() strips the 1-cell border on each side.
    state.file_list_viewport_height = inner_rect(left).height;
    state.source_viewport_height = inner_rect(center).height;
    state.review_viewport_height = inner_rect(right).height;
    state.panel_rects = [left, center, right];

    let focus = state.focus;

    // Left panel: file list (skip rendering if collapsed).
    if left.width > 0 {
        file_list::render_file_list(frame, left, focus, state, theme);
    }

    // Centre panel: source view (always visible).
    source_view::render_source(frame, center, focus, state, theme);

    // Right panel: rendered review (skip rendering if collapsed).
    if right.width > 0 {
        review_view::render_review(frame, right, focus, state, theme);
    }

    // Status bar: always visible, 1 row.
    render_status_bar(frame, status_bar, state, theme);

    // Overlays render after all panels so they sit on top. Clear is called
    // inside each overlay to erase the background.
    match state.mode {
        Mode::HelpOverlay => help::render_help_overlay(frame, theme, state.help_scroll),
        Mode::LineDetail => dialog::render_line_detail(frame, state, theme),
        Mode::Normal => {}
    }
}
