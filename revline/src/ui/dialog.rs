//! Line-detail dialog for revline.
//!
//! A centred modal shown in `Mode::LineDetail`, presenting the comment the
//! extractor attributed to one highlighted source line. A highlighted line
//! with no captured comment is a valid state, not an error: the dialog
//! shows a placeholder instead.

use ratatui::{
    Frame,
    layout::Constraint,
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::app::AppState;
use crate::theme::Theme;

/// Renders the line-detail modal on top of the panel layout.
///
/// Erases the dialog area with `Clear`, then draws a bordered box titled
/// with the line number and the comment body, wrapped. Skipped entirely on
/// very narrow terminals to avoid a zero-size Rect.
pub fn render_line_detail(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let Some(line) = state.detail_line else {
        return;
    };
    if frame.area().width < 40 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(50), Constraint::Percentage(40));

    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(format!(" Line {} (Esc to dismiss) ", line))
        .border_style(Style::default().fg(theme.border_active));

    let body = match state.annotations.comment_for(line) {
        Some(comment) => Text::styled(comment.to_owned(), Style::default().fg(theme.text)),
        None => Text::from(Line::styled(
            "No detail available for this line.",
            Style::default().fg(theme.file_meta),
        )),
    };

    frame.render_widget(
        Paragraph::new(body).block(block).wrap(Wrap { trim: false }),
        overlay_area,
    );
}
