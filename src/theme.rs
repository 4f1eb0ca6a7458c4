//! Theme data model: built-in palettes and resolution from config.

use ratatui::style::Color;

use crate::config::{ThemeColorsConfig, ThemeConfig};

// ── Runtime theme colors ─────────────────────────────────────────────────────

/// All runtime colors used in the UI.
///
/// Constructed from a config-level `ThemeConfig` via `resolve_theme()`.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Listing panel
    pub list_fg: Color,
    pub list_selected_bg: Color,
    pub list_selected_fg: Color,
    pub dir_fg: Color,
    pub file_fg: Color,
    /// Entry currently held in the clipboard is dimmed with this.
    pub clipboard_fg: Color,

    // Chrome
    pub path_fg: Color,
    pub drive_fg: Color,
    pub drive_unready_fg: Color,
    pub border_fg: Color,

    // Status bar
    pub status_bg: Color,
    pub status_fg: Color,

    // Semantic colors (not configurable, consistent across themes)
    pub error_fg: Color,
    pub success_fg: Color,
    pub dim_fg: Color,
}

// ── Built-in palettes ────────────────────────────────────────────────────────

/// Dark theme using Catppuccin Mocha palette.
pub fn dark_theme() -> ThemeColors {
    ThemeColors {
        list_fg: Color::Rgb(205, 214, 244),          // #cdd6f4 (text)
        list_selected_bg: Color::Rgb(69, 71, 90),    // #45475a (surface1)
        list_selected_fg: Color::Rgb(205, 214, 244), // #cdd6f4
        dir_fg: Color::Rgb(137, 180, 250),           // #89b4fa (blue)
        file_fg: Color::Rgb(205, 214, 244),          // #cdd6f4
        clipboard_fg: Color::Rgb(108, 112, 134),     // #6c7086 (overlay0)

        path_fg: Color::Rgb(203, 166, 247),          // #cba6f7 (mauve)
        drive_fg: Color::Rgb(137, 180, 250),         // #89b4fa (blue)
        drive_unready_fg: Color::Rgb(108, 112, 134), // #6c7086
        border_fg: Color::Rgb(88, 91, 112),          // #585b70 (surface2)

        status_bg: Color::Rgb(30, 30, 46), // #1e1e2e (base)
        status_fg: Color::Rgb(205, 214, 244),

        error_fg: Color::Rgb(243, 139, 168),   // #f38ba8 (red)
        success_fg: Color::Rgb(166, 227, 161), // #a6e3a1 (green)
        dim_fg: Color::Rgb(108, 112, 134),     // #6c7086
    }
}

/// Light theme — complementary light palette.
pub fn light_theme() -> ThemeColors {
    ThemeColors {
        list_fg: Color::Rgb(76, 79, 105),             // #4c4f69 (text)
        list_selected_bg: Color::Rgb(204, 208, 218),  // #ccd0da (surface1)
        list_selected_fg: Color::Rgb(76, 79, 105),
        dir_fg: Color::Rgb(30, 102, 245),             // #1e66f5 (blue)
        file_fg: Color::Rgb(76, 79, 105),
        clipboard_fg: Color::Rgb(156, 160, 176),      // #9ca0b0 (overlay0)

        path_fg: Color::Rgb(136, 57, 239),            // #8839ef (mauve)
        drive_fg: Color::Rgb(30, 102, 245),
        drive_unready_fg: Color::Rgb(156, 160, 176),
        border_fg: Color::Rgb(172, 176, 190),         // #acb0be (surface2)

        status_bg: Color::Rgb(239, 241, 245), // #eff1f5 (base)
        status_fg: Color::Rgb(76, 79, 105),

        error_fg: Color::Rgb(210, 15, 57),    // #d20f39 (red)
        success_fg: Color::Rgb(64, 160, 43),  // #40a02b (green)
        dim_fg: Color::Rgb(156, 160, 176),
    }
}

// ── Theme resolution ─────────────────────────────────────────────────────────

/// Resolve the final `ThemeColors` from config.
///
/// - `"dark"` (default): dark Catppuccin palette
/// - `"light"`: light Catppuccin palette
/// - `"custom"`: start from dark palette, then override with custom hex values
pub fn resolve_theme(config: &ThemeConfig) -> ThemeColors {
    let scheme = config.scheme.as_deref().unwrap_or("dark");
    match scheme {
        "light" => light_theme(),
        "custom" => {
            let mut theme = dark_theme();
            if let Some(custom) = &config.custom {
                apply_custom_colors(&mut theme, custom);
            }
            theme
        }
        _ => dark_theme(), // "dark" or any unrecognized value
    }
}

/// Parse a `#rrggbb` hex string into a ratatui color.
fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

fn parse_or(value: Option<&String>, fallback: Color) -> Color {
    value.and_then(|s| parse_hex_color(s)).unwrap_or(fallback)
}

/// Apply custom hex color overrides on top of an existing theme.
fn apply_custom_colors(theme: &mut ThemeColors, custom: &ThemeColorsConfig) {
    theme.list_fg = parse_or(custom.list_fg.as_ref(), theme.list_fg);
    theme.list_selected_bg = parse_or(custom.list_selected_bg.as_ref(), theme.list_selected_bg);
    theme.list_selected_fg = parse_or(custom.list_selected_fg.as_ref(), theme.list_selected_fg);
    theme.dir_fg = parse_or(custom.dir_fg.as_ref(), theme.dir_fg);
    theme.file_fg = parse_or(custom.file_fg.as_ref(), theme.file_fg);
    theme.path_fg = parse_or(custom.path_fg.as_ref(), theme.path_fg);
    theme.drive_fg = parse_or(custom.drive_fg.as_ref(), theme.drive_fg);
    theme.status_bg = parse_or(custom.status_bg.as_ref(), theme.status_bg);
    theme.status_fg = parse_or(custom.status_fg.as_ref(), theme.status_fg);
}

// ── Tests ────────────────────────────────────────────────────────────────────
