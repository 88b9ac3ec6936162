//! Central application state for revline.
//!
//! This module owns all mutable UI state: the current mode, which panel has
//! focus, per-panel scroll offsets and viewport heights, the file listing,
//! the loaded file, the review text with its extracted annotations, and the
//! line-detail dialog. No ratatui rendering logic lives here; `app.rs` is
//! pure state that is read by the render module and mutated by the
//! keybinding dispatcher and the event-loop arms.
//!
//! The review lifecycle invariant lives here too: selecting a different
//! file clears review text, annotations, and dialog state before the load
//! request goes out, and a review result that arrives for a file other
//! than the current selection is discarded. Stale annotations are never
//! shown against new file content.

use crossbeam_channel::Sender;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::ListState;
use tokio::sync::mpsc::UnboundedSender;

use revline_core::{extract_annotations, render_markdown, AnnotationResult};

use crate::config::ReviewerConfig;
use crate::event::AppEvent;
use crate::review::{self, ReviewOutcome};
use crate::theme::Theme;
use crate::ui::review_view;
use crate::workspace::types::{FileEntry, WorkspaceRequest, WorkspaceResponse};

/// UI mode controlling which keybinding set is active.
///
/// The default mode is `Normal`. Transitions are driven by the keybinding
/// dispatcher.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal vim-style navigation mode (default).
    #[default]
    Normal,
    /// Full-screen help overlay is shown above all panels.
    HelpOverlay,
    /// Modal dialog showing the comment for one highlighted line.
    LineDetail,
}

/// Which panel currently has keyboard focus.
///
/// The default focus is `FileList`. Navigation cycles FileList → Source →
/// Review → FileList via `next()` and in reverse via `prev()`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// Left panel showing the reviewable files.
    #[default]
    FileList,
    /// Centre panel showing the selected file's source.
    Source,
    /// Right panel showing the rendered review.
    Review,
}

impl PanelFocus {
    /// Returns the panel that precedes `self` in the cycle (wraps around).
    pub fn prev(self) -> Self {
        match self {
            PanelFocus::FileList => PanelFocus::Review,
            PanelFocus::Source => PanelFocus::FileList,
            PanelFocus::Review => PanelFocus::Source,
        }
    }

    /// Returns the panel that follows `self` in the cycle (wraps around).
    pub fn next(self) -> Self {
        match self {
            PanelFocus::FileList => PanelFocus::Source,
            PanelFocus::Source => PanelFocus::Review,
            PanelFocus::Review => PanelFocus::FileList,
        }
    }
}

/// All mutable UI state passed through every render cycle.
///
/// Scroll state, focus, mode, and panel geometry are bundled here so the
/// render function receives a single reference and the keybinding
/// dispatcher a single mutable reference. No logic resides in the render
/// path.
pub struct AppState {
    /// Current mode governing which keybindings are active.
    pub mode: Mode,
    /// Which panel currently receives keyboard scroll/navigation events.
    pub focus: PanelFocus,

    /// Stateful list widget backing the file-list panel (left).
    pub file_list_state: ListState,
    /// The workspace file listing, sorted by path.
    pub files: Vec<FileEntry>,
    /// True until the first file listing arrives.
    pub files_loading: bool,

    /// Workspace-relative path of the currently selected file, if any.
    pub selected_path: Option<String>,
    /// Raw content of the selected file (what the reviewer receives).
    pub source_raw: String,
    /// Pre-highlighted source lines from the workspace thread.
    pub source_lines: Vec<Line<'static>>,
    /// Load failure reason, shown in the source panel instead of content.
    pub source_error: Option<String>,
    /// True while a LoadFile request is in flight for `selected_path`.
    pub source_loading: bool,
    /// Index of the first visible source line (virtual scrolling).
    pub source_scroll: usize,
    /// 1-based source line the cursor is on. Meaningless when no file is
    /// loaded; clamped to the line count on every move.
    pub cursor_line: usize,

    /// The most recent review prose, empty before the first response.
    pub review_text: String,
    /// Pre-rendered display lines for the review panel.
    pub review_lines: Vec<Line<'static>>,
    /// Failure reason from the reviewer, shown in the review panel.
    pub review_error: Option<String>,
    /// True while a reviewer invocation is in flight.
    pub review_loading: bool,
    /// Vertical scroll offset for the review panel.
    pub review_scroll: u16,
    /// Flagged lines and per-line comments extracted from `review_text`.
    pub annotations: AnnotationResult,

    /// Line whose comment the detail dialog is showing (LineDetail mode).
    pub detail_line: Option<u32>,

    /// Inner height of the file-list panel, cached after each render.
    pub file_list_viewport_height: u16,
    /// Inner height of the source panel, cached after each render.
    pub source_viewport_height: u16,
    /// Inner height of the review panel, cached after each render.
    pub review_viewport_height: u16,
    /// Vertical scroll offset of the help overlay.
    pub help_scroll: u16,

    /// Width percentage of the left (file-list) panel. Default: 20.
    pub left_pct: u16,
    /// Width percentage of the centre (source) panel. Default: 55.
    pub center_pct: u16,
    /// Width percentage of the right (review) panel. Default: 25.
    pub right_pct: u16,
    /// Outer panel rects from the last render, for mouse hit-testing.
    pub panel_rects: [Rect; 3],

    /// Request channel into the workspace worker thread.
    pub workspace_tx: Option<Sender<WorkspaceRequest>>,
    /// App event channel, used to spawn reviewer tasks.
    pub event_tx: Option<UnboundedSender<AppEvent>>,
    /// Reviewer settings from config, cloned into each reviewer task.
    pub reviewer: ReviewerConfig,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            focus: PanelFocus::default(),
            file_list_state: ListState::default(),
            files: Vec::new(),
            files_loading: true,
            selected_path: None,
            source_raw: String::new(),
            source_lines: Vec::new(),
            source_error: None,
            source_loading: false,
            source_scroll: 0,
            cursor_line: 1,
            review_text: String::new(),
            review_lines: Vec::new(),
            review_error: None,
            review_loading: false,
            review_scroll: 0,
            annotations: AnnotationResult::default(),
            detail_line: None,
            file_list_viewport_height: 0,
            source_viewport_height: 0,
            review_viewport_height: 0,
            help_scroll: 0,
            left_pct: 20,
            center_pct: 55,
            right_pct: 25,
            panel_rects: [Rect::default(); 3],
            workspace_tx: None,
            event_tx: None,
            reviewer: ReviewerConfig::default(),
        }
    }
}

impl AppState {
    /// Scrolls the focused panel down by `lines` rows.
    ///
    /// For `FileList`: advances the `ListState` selection. For `Source`:
    /// moves the cursor (the viewport follows). For `Review`: adds to the
    /// u16 scroll offset (saturating).
    pub fn scroll_down(&mut self, lines: u16) {
        match self.focus {
            PanelFocus::FileList => {
                self.file_list_state.scroll_down_by(lines);
            }
            PanelFocus::Source => {
                self.move_cursor(i64::from(lines));
            }
            PanelFocus::Review => {
                self.review_scroll = self.review_scroll.saturating_add(lines);
            }
        }
    }

    /// Scrolls the focused panel up by `lines` rows.
    pub fn scroll_up(&mut self, lines: u16) {
        match self.focus {
            PanelFocus::FileList => {
                self.file_list_state.scroll_up_by(lines);
            }
            PanelFocus::Source => {
                self.move_cursor(-i64::from(lines));
            }
            PanelFocus::Review => {
                self.review_scroll = self.review_scroll.saturating_sub(lines);
            }
        }
    }

    /// Scrolls the focused panel to the very top.
    pub fn scroll_top(&mut self) {
        match self.focus {
            PanelFocus::FileList => {
                self.file_list_state.select_first();
            }
            PanelFocus::Source => {
                self.cursor_line = 1;
                self.ensure_cursor_visible();
            }
            PanelFocus::Review => {
                self.review_scroll = 0;
            }
        }
    }

    /// Scrolls the focused panel to the very bottom.
    pub fn scroll_bottom(&mut self) {
        match self.focus {
            PanelFocus::FileList => {
                self.file_list_state.select_last();
            }
            PanelFocus::Source => {
                self.cursor_line = self.source_lines.len().max(1);
                self.ensure_cursor_visible();
            }
            PanelFocus::Review => {
                // ratatui clamps Paragraph scroll to content height.
                self.review_scroll = u16::MAX;
            }
        }
    }

    /// Scrolls the focused panel down by half its visible height.
    ///
    /// Uses the viewport height cached from the previous render. If the
    /// cached height is zero (first frame), scrolls by 1 to avoid a no-op.
    pub fn half_page_down(&mut self) {
        self.scroll_down((self.focused_viewport_height() / 2).max(1));
    }

    /// Scrolls the focused panel up by half its visible height.
    pub fn half_page_up(&mut self) {
        self.scroll_up((self.focused_viewport_height() / 2).max(1));
    }

    /// Scrolls the focused panel down by its full visible height.
    pub fn full_page_down(&mut self) {
        self.scroll_down(self.focused_viewport_height().max(1));
    }

    /// Scrolls the focused panel up by its full visible height.
    pub fn full_page_up(&mut self) {
        self.scroll_up(self.focused_viewport_height().max(1));
    }

    fn focused_viewport_height(&self) -> u16 {
        match self.focus {
            PanelFocus::FileList => self.file_list_viewport_height,
            PanelFocus::Source => self.source_viewport_height,
            PanelFocus::Review => self.review_viewport_height,
        }
    }

    /// Moves the source cursor by `delta` lines, clamped to the file, and
    /// keeps it visible.
    pub fn move_cursor(&mut self, delta: i64) {
        if self.source_lines.is_empty() {
            return;
        }
        let max = self.source_lines.len() as i64;
        let next = (self.cursor_line as i64 + delta).clamp(1, max);
        self.cursor_line = next as usize;
        self.ensure_cursor_visible();
    }

    /// Adjusts `source_scroll` so the cursor line is inside the viewport.
    ///
    /// Uses the viewport height cached from the previous render; on the
    /// very first frame (height 0) the scroll is left alone.
    pub fn ensure_cursor_visible(&mut self) {
        let height = self.source_viewport_height as usize;
        if height == 0 {
            return;
        }
        let index = self.cursor_line.saturating_sub(1);
        if index < self.source_scroll {
            self.source_scroll = index;
        } else if index >= self.source_scroll + height {
            self.source_scroll = index + 1 - height;
        }
    }

    /// Moves the source cursor to the next flagged line, wrapping around.
    ///
    /// No-op when the extractor produced nothing.
    pub fn jump_next_annotation(&mut self) {
        let cursor = self.cursor_line as u32;
        let next = self
            .annotations
            .highlighted_lines
            .range(cursor.saturating_add(1)..)
            .next()
            .or_else(|| self.annotations.highlighted_lines.iter().next())
            .copied();
        if let Some(line) = next {
            self.cursor_line = line as usize;
            self.ensure_cursor_visible();
        }
    }

    /// Moves the source cursor to the previous flagged line, wrapping.
    pub fn jump_prev_annotation(&mut self) {
        let cursor = self.cursor_line as u32;
        let prev = self
            .annotations
            .highlighted_lines
            .range(..cursor)
            .next_back()
            .or_else(|| self.annotations.highlighted_lines.iter().next_back())
            .copied();
        if let Some(line) = prev {
            self.cursor_line = line as usize;
            self.ensure_cursor_visible();
        }
    }

    /// Opens the line-detail dialog when the cursor is on a flagged line.
    ///
    /// Lines without annotations do not open an empty dialog; flagged
    /// lines without a captured comment do, showing the "no detail"
    /// placeholder.
    pub fn open_line_detail(&mut self) {
        let line = self.cursor_line as u32;
        if self.annotations.highlighted_lines.contains(&line) {
            self.detail_line = Some(line);
            self.mode = Mode::LineDetail;
        }
    }

    /// Closes the line-detail dialog and returns to Normal mode.
    pub fn close_line_detail(&mut self) {
        self.detail_line = None;
        self.mode = Mode::Normal;
    }

    /// Loads the file currently selected in the file list (Enter or l).
    ///
    /// Re-selecting the already-loaded file only moves focus. Otherwise
    /// all review state is cleared *before* the load request is sent, so
    /// annotations from the previous file can never be rendered against
    /// the new content.
    pub fn select_file(&mut self) {
        let Some(index) = self.file_list_state.selected() else {
            return;
        };
        let Some(entry) = self.files.get(index) else {
            return;
        };
        let path = entry.path.clone();

        if self.selected_path.as_deref() == Some(path.as_str()) {
            self.focus = PanelFocus::Source;
            return;
        }

        self.selected_path = Some(path.clone());
        self.source_raw.clear();
        self.source_lines.clear();
        self.source_error = None;
        self.source_loading = true;
        self.source_scroll = 0;
        self.cursor_line = 1;
        self.clear_review();

        if let Some(tx) = &self.workspace_tx {
            let _ = tx.send(WorkspaceRequest::LoadFile(path));
        }
        self.focus = PanelFocus::Source;
    }

    /// Resets review text, rendered lines, annotations, and dialog state.
    fn clear_review(&mut self) {
        self.review_text.clear();
        self.review_lines.clear();
        self.review_error = None;
        self.review_loading = false;
        self.review_scroll = 0;
        self.annotations = AnnotationResult::default();
        self.detail_line = None;
        if self.mode == Mode::LineDetail {
            self.mode = Mode::Normal;
        }
    }

    /// Applies a payload from the workspace thread to the app state.
    ///
    /// File content for a path that is no longer selected is discarded
    /// (the user switched files while the load was in flight).
    pub fn apply_workspace(&mut self, response: WorkspaceResponse) {
        match response {
            WorkspaceResponse::FileList(files) => {
                self.files = files;
                self.files_loading = false;
                if self.file_list_state.selected().is_none() && !self.files.is_empty() {
                    self.file_list_state.select(Some(0));
                }
            }
            WorkspaceResponse::FileLoaded(loaded) => {
                if self.selected_path.as_deref() == Some(loaded.path.as_str()) {
                    self.source_raw = loaded.raw;
                    self.source_lines = loaded.lines;
                    self.source_error = None;
                    self.source_loading = false;
                }
            }
            WorkspaceResponse::LoadFailed { path, reason } => {
                if self.selected_path.as_deref() == Some(path.as_str()) {
                    self.source_error = Some(reason);
                    self.source_loading = false;
                }
            }
        }
    }

    /// Starts a reviewer invocation for the selected file.
    ///
    /// One request at a time: a second `r` while a review is in flight is
    /// ignored rather than queued, matching the one-extraction-per-response
    /// lifecycle.
    pub fn request_review(&mut self) {
        if self.review_loading {
            return;
        }
        let Some(path) = self.selected_path.clone() else {
            return;
        };
        if self.source_error.is_some() {
            return;
        }
        let Some(tx) = self.event_tx.clone() else {
            return;
        };

        self.clear_review();
        self.review_loading = true;
        review::spawn_review_task(tx, self.reviewer.clone(), path, self.source_raw.clone());
    }

    /// Applies a completed reviewer invocation.
    ///
    /// Runs the annotation extractor exactly once per completed response
    /// and pre-renders the review markup into display lines. An outcome
    /// for a file other than the current selection is dropped whole.
    pub fn apply_review(&mut self, outcome: ReviewOutcome, theme: &Theme) {
        if self.selected_path.as_deref() != Some(outcome.path.as_str()) {
            return;
        }
        self.review_loading = false;
        self.review_scroll = 0;

        match outcome.result {
            Ok(text) => {
                self.annotations = extract_annotations(&text);
                self.review_lines = review_view::markup_to_lines(&render_markdown(&text), theme);
                self.review_error = None;
                self.review_text = text;
            }
            Err(reason) => {
                self.annotations = AnnotationResult::default();
                self.review_lines.clear();
                self.review_text.clear();
                self.review_error = Some(reason);
            }
        }
    }

    /// Shrinks the source (centre) panel by transferring 5% to the sides.
    ///
    /// The centre panel will not shrink below 20%.
    pub fn shrink_source_panel(&mut self) {
        const MIN_CENTER: u16 = 20;
        const STEP: u16 = 5;
        if self.center_pct <= MIN_CENTER {
            return;
        }
        let transfer = STEP.min(self.center_pct - MIN_CENTER);
        self.center_pct -= transfer;
        let left_gain = transfer / 2;
        let right_gain = transfer - left_gain;
        self.left_pct = self.left_pct.saturating_add(left_gain);
        self.right_pct = self.right_pct.saturating_add(right_gain);
    }

    /// Grows the source (centre) panel by pulling 5% from the sides.
    ///
    /// The centre panel will not grow above 80%; side panels stop giving
    /// at 5% each.
    pub fn grow_source_panel(&mut self) {
        const MAX_CENTER: u16 = 80;
        const MIN_SIDE: u16 = 5;
        const STEP: u16 = 5;
        if self.center_pct >= MAX_CENTER {
            return;
        }
        let room = MAX_CENTER - self.center_pct;
        let transfer = STEP.min(room);
        let left_give = (transfer / 2).min(self.left_pct.saturating_sub(MIN_SIDE));
        let right_give = (transfer - transfer / 2).min(self.right_pct.saturating_sub(MIN_SIDE));
        self.left_pct -= left_give;
        self.right_pct -= right_give;
        self.center_pct += left_give + right_give;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_state(path: &str, lines: usize) -> AppState {
        let mut state = AppState::default();
        state.selected_path = Some(path.to_owned());
        state.source_raw = "x\n".repeat(lines);
        state.source_lines = (0..lines).map(|_| Line::raw("x")).collect();
        state.source_viewport_height = 10;
        state
    }

    #[test]
    fn review_for_other_file_is_discarded() {
        let mut state = loaded_state("src/a.rs", 5);
        state.apply_review(
            ReviewOutcome {
                path: "src/b.rs".to_owned(),
                result: Ok("Line 2: stale".to_owned()),
            },
            &Theme::dark(),
        );
        assert!(state.annotations.is_empty(), "stale review must be dropped");
        assert!(state.review_text.is_empty());
    }

    #[test]
    fn successful_review_populates_annotations_and_lines() {
        let mut state = loaded_state("src/a.rs", 5);
        state.review_loading = true;
        state.apply_review(
            ReviewOutcome {
                path: "src/a.rs".to_owned(),
                result: Ok("# Review\nLine 2: tighten this".to_owned()),
            },
            &Theme::dark(),
        );
        assert!(!state.review_loading);
        assert!(state.annotations.highlighted_lines.contains(&2));
        assert!(!state.review_lines.is_empty());
    }

    #[test]
    fn failed_review_sets_error_and_clears_annotations() {
        let mut state = loaded_state("src/a.rs", 5);
        state.apply_review(
            ReviewOutcome {
                path: "src/a.rs".to_owned(),
                result: Err("reviewer command failed".to_owned()),
            },
            &Theme::dark(),
        );
        assert!(state.annotations.is_empty());
        assert!(state.review_error.is_some());
    }

    #[test]
    fn selecting_a_file_clears_prior_review_state() {
        let mut state = loaded_state("src/a.rs", 5);
        state.apply_review(
            ReviewOutcome {
                path: "src/a.rs".to_owned(),
                result: Ok("Line 1: note".to_owned()),
            },
            &Theme::dark(),
        );
        assert!(!state.annotations.is_empty());

        state.files = vec![
            crate::workspace::types::FileEntry { path: "src/a.rs".to_owned(), size: 1 },
            crate::workspace::types::FileEntry { path: "src/b.rs".to_owned(), size: 1 },
        ];
        state.file_list_state.select(Some(1));
        state.select_file();

        assert_eq!(state.selected_path.as_deref(), Some("src/b.rs"));
        assert!(state.annotations.is_empty(), "old annotations must not survive");
        assert!(state.review_text.is_empty());
        assert!(state.detail_line.is_none());
    }

    #[test]
    fn cursor_is_clamped_and_viewport_follows() {
        let mut state = loaded_state("src/a.rs", 30);
        state.move_cursor(100);
        assert_eq!(state.cursor_line, 30);
        assert!(state.source_scroll + 10 >= 30, "cursor must be visible");
        state.move_cursor(-100);
        assert_eq!(state.cursor_line, 1);
        assert_eq!(state.source_scroll, 0);
    }

    #[test]
    fn annotation_jumps_wrap_around() {
        let mut state = loaded_state("src/a.rs", 30);
        state.apply_review(
            ReviewOutcome {
                path: "src/a.rs".to_owned(),
                result: Ok("Line 5: a\nLine 20: b".to_owned()),
            },
            &Theme::dark(),
        );
        state.cursor_line = 1;
        state.jump_next_annotation();
        assert_eq!(state.cursor_line, 5);
        state.jump_next_annotation();
        assert_eq!(state.cursor_line, 20);
        state.jump_next_annotation();
        assert_eq!(state.cursor_line, 5, "wraps to first");
        state.jump_prev_annotation();
        assert_eq!(state.cursor_line, 20, "wraps to last");
    }

    #[test]
    fn detail_opens_only_on_flagged_lines() {
        let mut state = loaded_state("src/a.rs", 30);
        state.apply_review(
            ReviewOutcome {
                path: "src/a.rs".to_owned(),
                result: Ok("Line 5: a".to_owned()),
            },
            &Theme::dark(),
        );
        state.cursor_line = 4;
        state.open_line_detail();
        assert_eq!(state.mode, Mode::Normal);
        state.cursor_line = 5;
        state.open_line_detail();
        assert_eq!(state.mode, Mode::LineDetail);
        assert_eq!(state.detail_line, Some(5));
    }
}
