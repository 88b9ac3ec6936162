//! Keybinding dispatcher for revline.
//!
//! Translates raw crossterm `KeyEvent`s into `AppState` mutations and
//! returns a `KeyAction` telling the event loop whether to continue or
//! quit. The dispatcher branches first on `state.mode` so that
//! HelpOverlay, LineDetail, and Normal all have isolated handler
//! functions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::app::{AppState, Mode, PanelFocus};

/// Control-flow signal returned from the key dispatcher.
///
/// The event loop checks this after every keypress: `Quit` tears down the
/// terminal and exits; `Continue` keeps the loop running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Continue the event loop normally.
    Continue,
    /// Exit cleanly.
    Quit,
}

/// Dispatches a key event to the handler matching the current mode.
///
/// Mutates `state` in place and returns a `KeyAction` signalling whether
/// to continue or quit.
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match state.mode {
        Mode::HelpOverlay => handle_help(key, state),
        Mode::LineDetail => handle_line_detail(key, state),
        Mode::Normal => handle_normal(key, state),
    }
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

/// Handles a key event while in Normal mode.
///
/// Delegates scroll keys to `handle_scroll_key` and panel-specific Enter
/// handling to `handle_enter`; focus, annotation jumps, panel resize, the
/// review trigger, and mode transitions are handled inline.
fn handle_normal(key: KeyEvent, state: &mut AppState) -> KeyAction {
    if let Some(action) = handle_scroll_key(key, state) {
        return action;
    }

    match key.code {
        // Panel focus
        KeyCode::Char('H') => {
            state.focus = state.focus.prev();
            KeyAction::Continue
        }
        KeyCode::Char('L') => {
            state.focus = state.focus.next();
            KeyAction::Continue
        }
        KeyCode::Tab => {
            state.focus = state.focus.next();
            KeyAction::Continue
        }
        KeyCode::BackTab => {
            state.focus = state.focus.prev();
            KeyAction::Continue
        }

        // Open / reveal
        KeyCode::Enter => handle_enter(state),
        KeyCode::Char('l') if state.focus == PanelFocus::FileList => {
            state.select_file();
            KeyAction::Continue
        }

        // Annotation navigation
        KeyCode::Char('n') => {
            state.jump_next_annotation();
            KeyAction::Continue
        }
        KeyCode::Char('p') => {
            state.jump_prev_annotation();
            KeyAction::Continue
        }

        // Review trigger
        KeyCode::Char('r') => {
            state.request_review();
            KeyAction::Continue
        }

        // Source panel resize
        KeyCode::Char('<') => { state.shrink_source_panel(); KeyAction::Continue }
        KeyCode::Char('>') => { state.grow_source_panel(); KeyAction::Continue }

        // Help overlay
        KeyCode::Char('?') => {
            state.help_scroll = 0;
            state.mode = Mode::HelpOverlay;
            KeyAction::Continue
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,

        _ => KeyAction::Continue,
    }
}

/// Handles Enter (and `l`) based on the focused panel.
///
/// On the file list it opens the selected file; on the source panel it
/// reveals the comment for the cursor line when that line is flagged.
/// Enter on the review panel does nothing.
fn handle_enter(state: &mut AppState) -> KeyAction {
    match state.focus {
        PanelFocus::FileList => state.select_file(),
        PanelFocus::Source => state.open_line_detail(),
        PanelFocus::Review => {}
    }
    KeyAction::Continue
}

/// Handles scroll-related keys in Normal mode: j / k / g / G and Ctrl
/// combos.
///
/// Returns `Some(KeyAction)` when the key was consumed, `None` when the
/// key should fall through to the rest of the Normal handler.
fn handle_scroll_key(key: KeyEvent, state: &mut AppState) -> Option<KeyAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.scroll_down(1);
            Some(KeyAction::Continue)
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.scroll_up(1);
            Some(KeyAction::Continue)
        }
        KeyCode::Char('g') => {
            state.scroll_top();
            Some(KeyAction::Continue)
        }
        KeyCode::Char('G') => {
            state.scroll_bottom();
            Some(KeyAction::Continue)
        }
        KeyCode::Char('d') if ctrl => {
            state.half_page_down();
            Some(KeyAction::Continue)
        }
        KeyCode::Char('u') if ctrl => {
            state.half_page_up();
            Some(KeyAction::Continue)
        }
        KeyCode::Char('f') if ctrl => {
            state.full_page_down();
            Some(KeyAction::Continue)
        }
        KeyCode::Char('b') if ctrl => {
            state.full_page_up();
            Some(KeyAction::Continue)
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// HelpOverlay mode
// ---------------------------------------------------------------------------

/// Handles a key event while the help overlay is visible.
///
/// Any of `?`, `Esc`, or `q` dismisses the overlay and returns to Normal
/// mode. j/k/g/G scroll the overlay; all other keys are ignored.
fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') => {
            state.help_scroll = state.help_scroll.saturating_add(1);
            KeyAction::Continue
        }
        KeyCode::Char('k') => {
            state.help_scroll = state.help_scroll.saturating_sub(1);
            KeyAction::Continue
        }
        KeyCode::Char('g') => {
            state.help_scroll = 0;
            KeyAction::Continue
        }
        KeyCode::Char('G') => {
            state.help_scroll = u16::MAX;
            KeyAction::Continue
        }
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => {
            state.mode = Mode::Normal;
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

// ---------------------------------------------------------------------------
// LineDetail mode
// ---------------------------------------------------------------------------

/// Handles a key event while the line-detail dialog is open.
///
/// `Esc`, `q`, and `Enter` all dismiss the dialog; `n` / `p` jump to the
/// neighbouring flagged line and keep the dialog open on it.
fn handle_line_detail(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => {
            state.close_line_detail();
            KeyAction::Continue
        }
        KeyCode::Char('n') => {
            state.jump_next_annotation();
            state.detail_line = Some(state.cursor_line as u32);
            KeyAction::Continue
        }
        KeyCode::Char('p') => {
            state.jump_prev_annotation();
            state.detail_line = Some(state.cursor_line as u32);
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

// ---------------------------------------------------------------------------
// Mouse events
// ---------------------------------------------------------------------------

/// Handles a mouse event: click-to-focus, click-to-reveal, scroll wheel.
///
/// Left click on a panel sets focus to that panel; a click on a source
/// line also moves the cursor there and, when the line is flagged, opens
/// its comment. The scroll wheel scrolls the focused panel by 3 lines.
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) -> KeyAction {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            handle_mouse_click(mouse.column, mouse.row, state)
        }
        MouseEventKind::ScrollUp => handle_mouse_scroll_up(state),
        MouseEventKind::ScrollDown => handle_mouse_scroll_down(state),
        _ => KeyAction::Continue,
    }
}

/// Sets focus (and possibly the source cursor) from a clicked position.
///
/// Panels with zero width are skipped so collapsed panels cannot receive
/// focus via click. A click while a modal is open just dismisses it.
fn handle_mouse_click(col: u16, row: u16, state: &mut AppState) -> KeyAction {
    if state.mode == Mode::LineDetail {
        state.close_line_detail();
        return KeyAction::Continue;
    }
    if state.mode == Mode::HelpOverlay {
        state.mode = Mode::Normal;
        return KeyAction::Continue;
    }

    let pos = Position { x: col, y: row };
    let [left, center, right] = state.panel_rects;

    if left.width > 0 && left.contains(pos) {
        state.focus = PanelFocus::FileList;
    } else if center.contains(pos) {
        state.focus = PanelFocus::Source;
        click_source_line(row, state);
    } else if right.width > 0 && right.contains(pos) {
        state.focus = PanelFocus::Review;
    }

    KeyAction::Continue
}

/// Moves the cursor to the clicked source row and reveals its comment.
///
/// The clicked row is mapped through the border offset and the current
/// scroll position. Clicks on the border or past the end of the file are
/// ignored.
fn click_source_line(row: u16, state: &mut AppState) {
    let center = state.panel_rects[1];
    let Some(row_in_panel) = row.checked_sub(center.y.saturating_add(1)) else {
        return;
    };
    if usize::from(row_in_panel) >= usize::from(state.source_viewport_height) {
        return;
    }

    let index = state.source_scroll + usize::from(row_in_panel);
    if index >= state.source_lines.len() {
        return;
    }

    state.cursor_line = index + 1;
    state.open_line_detail();
}

/// Scrolls up by 3 lines; scrolls the help overlay in HelpOverlay mode.
fn handle_mouse_scroll_up(state: &mut AppState) -> KeyAction {
    if state.mode == Mode::HelpOverlay {
        state.help_scroll = state.help_scroll.saturating_sub(3);
    } else {
        state.scroll_up(3);
    }
    KeyAction::Continue
}

/// Scrolls down by 3 lines; scrolls the help overlay in HelpOverlay mode.
fn handle_mouse_scroll_down(state: &mut AppState) -> KeyAction {
    if state.mode == Mode::HelpOverlay {
        state.help_scroll = state.help_scroll.saturating_add(3);
    } else {
        state.scroll_down(3);
    }
    KeyAction::Continue
}
