//! File list panel renderer for revline.
//!
//! Renders the left panel from AppState.files. Each entry shows the
//! workspace-relative path and a human-readable size. When the listing is
//! empty, shows a placeholder matching the loading state.

use ratatui::{
    Frame,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem},
};

use crate::app::{AppState, PanelFocus};
use crate::theme::Theme;
use crate::ui::layout::panel_block;
use crate::workspace::types::FileEntry;

/// Renders the file-list left panel from `AppState.files`.
///
/// Uses `render_stateful_widget` so the ListState selection highlight is
/// applied. File count is shown in the panel title (e.g., "Files (12)").
pub fn render_file_list(
    frame: &mut Frame,
    area: ratatui::layout::Rect,
    focus: PanelFocus,
    state: &mut AppState,
    theme: &Theme,
) {
    let is_focused = focus == PanelFocus::FileList;
    let file_count = state.files.len();
    let title = if file_count > 0 {
        format!("Files ({})", file_count)
    } else {
        "Files".to_owned()
    };
    let block = panel_block(&title, is_focused, theme);

    let items: Vec<ListItem> = if state.files.is_empty() {
        let msg = if state.files_loading { "Loading..." } else { "No files" };
        vec![ListItem::new(Line::raw(msg))]
    } else {
        state
            .files
            .iter()
            .map(|entry| file_entry_item(entry, state.selected_path.as_deref(), theme))
            .collect()
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(theme.border_active));

    frame.render_stateful_widget(list, area, &mut state.file_list_state);
}

/// Converts a FileEntry into a styled ListItem.
///
/// The currently open file is marked with `>`; all entries show a
/// right-aligned-ish size column in dim color.
fn file_entry_item(
    entry: &FileEntry,
    selected_path: Option<&str>,
    theme: &Theme,
) -> ListItem<'static> {
    let open_mark = if selected_path == Some(entry.path.as_str()) { "> " } else { "  " };

    // Truncate long paths to avoid horizontal overflow.
    let max_path_len = 28usize;
    let path_display = if entry.path.len() > max_path_len {
        format!("...{}", &entry.path[entry.path.len() - (max_path_len - 3)..])
    } else {
        entry.path.clone()
    };

    ListItem::new(Line::from(vec![
        Span::styled(open_mark.to_owned(), Style::default().fg(theme.border_active)),
        Span::styled(path_display, Style::default().fg(theme.file_path)),
        Span::styled(format!("  {}", format_size(entry.size)), Style::default().fg(theme.file_meta)),
    ]))
}

/// Formats a byte count as a short human-readable size.
fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1}M", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1}k", bytes as f64 / 1024.0)
    } else {
        format!("{}B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_format_by_magnitude() {
        assert_eq!(format_size(12), "12B");
        assert_eq!(format_size(2048), "2.0k");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0M");
    }
}
