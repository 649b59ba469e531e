// Theme support for the TUI
//
// A handful of built-in palettes selected by name from config. "auto" uses the
// terminal's ANSI palette, the named themes use true color (RGB).

use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Names accepted by `Theme::by_name`, in the order the help modal lists them
pub const THEME_NAMES: &[&str] = &["dark", "light", "dracula", "nord", "auto"];

/// Color palette for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // ─── Terminal Colors ─────────────────────────────────────
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,

    // ─── UI Element Colors ───────────────────────────────────
    pub title: Color,
    pub status_bar: Color,
    pub border: Color,
    pub highlight: Color,
    pub error: Color,

    // ─── Selection Colors ────────────────────────────────────
    pub selection: Color,
    pub selection_fg: Color,

    // ─── Panel Identity Colors ───────────────────────────────
    pub panel_form: Color,
    pub panel_table: Color,
    pub panel_logs: Color,

    /// Actionable table cells
    pub button: Color,

    pub border_type: BorderType,
}

impl Theme {
    /// Load theme by name; unknown names fall back to "dark"
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "dracula" => Self::dracula(),
            "nord" => Self::nord(),
            "auto" => Self::auto(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!("Unknown theme '{}', using dark", other);
                Self::dark()
            }
        }
    }

    /// One Half Dark
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color::Rgb(40, 44, 52),
            foreground: Color::Rgb(220, 223, 228),
            muted: Color::Rgb(92, 99, 112),
            title: Color::Rgb(86, 182, 194),
            status_bar: Color::Rgb(152, 195, 121),
            border: Color::Rgb(92, 99, 112),
            highlight: Color::Rgb(229, 192, 123),
            error: Color::Rgb(224, 108, 117),
            selection: Color::Rgb(71, 78, 93),
            selection_fg: Color::Rgb(220, 223, 228),
            panel_form: Color::Rgb(97, 175, 239),
            panel_table: Color::Rgb(86, 182, 194),
            panel_logs: Color::Rgb(152, 195, 121),
            button: Color::Rgb(198, 120, 221),
            border_type: BorderType::Rounded,
        }
    }

    /// One Half Light
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color::Rgb(250, 250, 250),
            foreground: Color::Rgb(56, 58, 66),
            muted: Color::Rgb(160, 161, 167),
            title: Color::Rgb(1, 132, 188),
            status_bar: Color::Rgb(80, 161, 79),
            border: Color::Rgb(160, 161, 167),
            highlight: Color::Rgb(193, 132, 1),
            error: Color::Rgb(228, 86, 73),
            selection: Color::Rgb(229, 229, 230),
            selection_fg: Color::Rgb(56, 58, 66),
            panel_form: Color::Rgb(64, 120, 242),
            panel_table: Color::Rgb(1, 132, 188),
            panel_logs: Color::Rgb(80, 161, 79),
            button: Color::Rgb(166, 38, 164),
            border_type: BorderType::Rounded,
        }
    }

    /// Dracula theme - https://draculatheme.com
    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            background: Color::Rgb(0x28, 0x2a, 0x36),
            foreground: Color::Rgb(0xf8, 0xf8, 0xf2),
            muted: Color::Rgb(0x62, 0x72, 0xa4),      // comment
            title: Color::Rgb(0x8b, 0xe9, 0xfd),      // cyan
            status_bar: Color::Rgb(0x50, 0xfa, 0x7b), // green
            border: Color::Rgb(0x62, 0x72, 0xa4),     // comment
            highlight: Color::Rgb(0xf1, 0xfa, 0x8c),  // yellow
            error: Color::Rgb(0xff, 0x55, 0x55),      // red
            selection: Color::Rgb(0x44, 0x47, 0x5a),
            selection_fg: Color::Rgb(0xf8, 0xf8, 0xf2),
            panel_form: Color::Rgb(0xbd, 0x93, 0xf9),  // purple
            panel_table: Color::Rgb(0x8b, 0xe9, 0xfd), // cyan
            panel_logs: Color::Rgb(0x62, 0x72, 0xa4),  // comment
            button: Color::Rgb(0xff, 0x79, 0xc6),      // pink
            border_type: BorderType::Plain,
        }
    }

    /// Nord theme - https://nordtheme.com
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            background: Color::Rgb(0x2e, 0x34, 0x40),
            foreground: Color::Rgb(0xd8, 0xde, 0xe9),
            muted: Color::Rgb(0x4c, 0x56, 0x6a),      // polar night
            title: Color::Rgb(0x88, 0xc0, 0xd0),      // frost cyan
            status_bar: Color::Rgb(0xa3, 0xbe, 0x8c), // aurora green
            border: Color::Rgb(0x4c, 0x56, 0x6a),     // polar night
            highlight: Color::Rgb(0xeb, 0xcb, 0x8b),  // aurora yellow
            error: Color::Rgb(0xbf, 0x61, 0x6a),      // aurora red
            selection: Color::Rgb(0x43, 0x4c, 0x5e),
            selection_fg: Color::Rgb(0xec, 0xef, 0xf4),
            panel_form: Color::Rgb(0x81, 0xa1, 0xc1),  // frost blue
            panel_table: Color::Rgb(0x88, 0xc0, 0xd0), // frost cyan
            panel_logs: Color::Rgb(0x4c, 0x56, 0x6a),  // polar night
            button: Color::Rgb(0xb4, 0x8e, 0xad),      // aurora purple
            border_type: BorderType::Plain,
        }
    }

    /// Auto theme - uses terminal's ANSI palette
    pub fn auto() -> Self {
        Self {
            name: "auto".to_string(),
            background: Color::Reset,
            foreground: Color::Reset,
            muted: Color::DarkGray,
            title: Color::Cyan,
            status_bar: Color::Green,
            border: Color::White,
            highlight: Color::Yellow,
            error: Color::Red,
            selection: Color::DarkGray,
            selection_fg: Color::White,
            panel_form: Color::Blue,
            panel_table: Color::Cyan,
            panel_logs: Color::DarkGray,
            button: Color::Magenta,
            border_type: BorderType::Plain,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
