//! Color theme system for revline.
//!
//! A `Theme` holds named `ratatui::style::Color` fields covering every UI
//! surface revline renders. Two built-in themes are provided:
//!
//! - `dark` uses ANSI 16 colors (`Color::Reset`, `Color::DarkGray`, etc.)
//!   so it works on any terminal, including 256-color SSH sessions with no
//!   truecolor support.
//! - `catppuccin_mocha` is the Catppuccin Mocha palette in RGB and
//!   requires truecolor.

use ratatui::style::Color;

/// All color values used across revline's UI surfaces.
///
/// Every field is a `ratatui::style::Color`. Callers use `theme.field`
/// directly inside `Style::default().fg(theme.border_active)`.
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    /// Border color for the currently focused panel.
    pub border_active: Color,
    /// Border color for unfocused panels.
    pub border_inactive: Color,

    // Source view
    /// Gutter line numbers.
    pub line_number: Color,
    /// Gutter line number of the cursor line.
    pub cursor_line: Color,
    /// Background of lines flagged by the extractor.
    pub highlight_bg: Color,
    /// Gutter marker in front of flagged lines.
    pub highlight_marker: Color,

    // File list
    /// File paths.
    pub file_path: Color,
    /// Secondary file info (sizes, counts).
    pub file_meta: Color,

    // Review panel markup
    /// Heading text (all four levels).
    pub heading: Color,
    /// Bold spans.
    pub bold: Color,
    /// Inline code spans.
    pub inline_code: Color,
    /// Fenced code block content.
    pub code_block: Color,
    /// List bullets.
    pub list_bullet: Color,
    /// Plain paragraph text and placeholders.
    pub text: Color,
    /// Error notes (failed loads, failed reviews).
    pub error: Color,

    // Status bar
    /// Status bar background.
    pub status_bar_bg: Color,
    /// Status bar foreground (general text).
    pub status_bar_fg: Color,
    /// Mode indicator color.
    pub status_mode: Color,

    // General
    /// Application background (used for clearing areas).
    pub background: Color,
}

impl Theme {
    /// Returns the built-in dark theme using ANSI 16 colors.
    ///
    /// Works on all terminals: 16-color, 256-color, and truecolor. Suitable
    /// as the default when color capability is unknown.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            line_number: Color::DarkGray,
            cursor_line: Color::Cyan,
            highlight_bg: Color::DarkGray,
            highlight_marker: Color::Yellow,

            file_path: Color::Reset,
            file_meta: Color::DarkGray,

            heading: Color::Magenta,
            bold: Color::Magenta,
            inline_code: Color::Green,
            code_block: Color::Green,
            list_bullet: Color::Blue,
            text: Color::Reset,
            error: Color::Red,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_mode: Color::Cyan,

            background: Color::Reset,
        }
    }

    /// Returns the Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Requires a truecolor terminal; ratatui degrades colors to the
    /// nearest ANSI 256-color approximation elsewhere, with reduced
    /// fidelity. Use `dark()` on SSH or 256-color terminals.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        // Catppuccin Mocha palette (selected subset)
        let green = Color::Rgb(166, 227, 161);    // #a6e3a1
        let red = Color::Rgb(243, 139, 168);      // #f38ba8
        let yellow = Color::Rgb(249, 226, 175);   // #f9e2af
        let blue = Color::Rgb(137, 180, 250);     // #89b4fa
        let pink = Color::Rgb(245, 194, 231);     // #f5c2e7
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface1 = Color::Rgb(69, 71, 90);    // #45475a
        let surface0 = Color::Rgb(49, 50, 68);    // #313244
        let base = Color::Rgb(30, 30, 46);        // #1e1e2e
        let text = Color::Rgb(205, 214, 244);     // #cdd6f4

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            line_number: overlay1,
            cursor_line: lavender,
            highlight_bg: surface0,
            highlight_marker: yellow,

            file_path: text,
            file_meta: overlay1,

            heading: pink,
            bold: pink,
            inline_code: green,
            code_block: green,
            list_bullet: blue,
            text,
            error: red,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_mode: lavender,

            background: base,
        }
    }

    /// Resolves a theme name string to the corresponding built-in theme.
    ///
    /// Unknown names fall back to `dark()` so a typo in config never
    /// prevents startup. The fallback is noted on stderr (not a hard
    /// error).
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                eprintln!("revline: unknown theme '{}', falling back to 'dark'", other);
                Self::dark()
            }
        }
    }
}
