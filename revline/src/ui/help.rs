//! Help overlay renderer for revline.
//!
//! Provides `render_help_overlay()` which draws a centred modal box over
//! the existing panel layout using ratatui's `Clear` widget to erase the
//! background first. The overlay is rendered inside the same
//! `terminal.draw()` closure as all other panels.

use ratatui::{
    Frame,
    layout::Constraint,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

/// Renders the help overlay as a centred modal on top of the panels.
///
/// The paragraph scrolls vertically by `help_scroll` rows, enabling
/// navigation of the help text on short terminals. If the terminal is
/// narrower than 60 columns the overlay is skipped to avoid a zero-height
/// `Rect` panic.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 60 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(80), Constraint::Percentage(80));

    // Erase the background behind the modal before drawing content.
    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help  (j/k scroll, ? or Esc to dismiss) ")
        .border_style(ratatui::style::Style::default().fg(theme.border_active));

    frame.render_widget(
        Paragraph::new(build_help_text())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

/// Builds the help text as a multi-line `Text` value.
fn build_help_text() -> Text<'static> {
    Text::from(vec![
        Line::from("Navigation"),
        Line::from("  j / k         Scroll down / up one line"),
        Line::from("  g / G         Jump to top / bottom"),
        Line::from("  Ctrl-d / u    Scroll half page down / up"),
        Line::from("  Ctrl-f / b    Scroll full page down / up"),
        Line::from("  H / L / Tab   Move panel focus"),
        Line::from(""),
        Line::from("File List"),
        Line::from("  Enter / l     Open the selected file"),
        Line::from(""),
        Line::from("Source View"),
        Line::from("  n / p         Next / previous flagged line"),
        Line::from("  Enter         Show the comment for a flagged line"),
        Line::from("  < / >         Shrink / grow the source panel by 5%"),
        Line::from(""),
        Line::from("Review"),
        Line::from("  r             Ask the configured reviewer for feedback"),
        Line::from(""),
        Line::from("General"),
        Line::from("  Mouse         Click focuses a panel; click a flagged line"),
        Line::from("                to open its comment"),
        Line::from("  ?             Open / close this help overlay"),
        Line::from("  q / Esc       Quit"),
    ])
}
