use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

/// Status bar widget: entry counts, clipboard content, key hints, or a
/// transient status/error message spanning the full width.
pub struct StatusBarWidget<'a> {
    counts: &'a str,
    theme: &'a ThemeColors,
    status_message: Option<&'a str>,
    is_error: bool,
    clipboard_info: Option<&'a str>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(counts: &'a str, theme: &'a ThemeColors) -> Self {
        Self {
            counts,
            theme,
            status_message: None,
            is_error: false,
            clipboard_info: None,
        }
    }

    pub fn status_message(mut self, msg: &'a str, is_error: bool) -> Self {
        self.status_message = Some(msg);
        self.is_error = is_error;
        self
    }

    pub fn clipboard_info(mut self, info: &'a str) -> Self {
        self.clipboard_info = Some(info);
        self
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let width = area.width as usize;

        // A message takes over the whole bar.
        if let Some(msg) = self.status_message {
            let style = if self.is_error {
                Style::default()
                    .bg(self.theme.error_fg)
                    .fg(self.theme.status_fg)
            } else {
                Style::default().fg(self.theme.success_fg)
            };

            let display: String = if msg.chars().count() >= width {
                msg.chars().take(width).collect()
            } else {
                format!("{msg:<width$}")
            };

            let line = Line::from(Span::styled(display, style));
            buf.set_line(area.x, area.y, &line, area.width);
            return;
        }

        // Normal bar: [counts] [clipboard] ... [hints]
        let key_hints = " d:dir  f:file  x:cut  c:copy  v:paste  Del:trash  q:quit ";
        let base_style = Style::default()
            .bg(self.theme.status_bg)
            .fg(self.theme.status_fg);

        let mut left = self.counts.to_string();
        if let Some(info) = self.clipboard_info {
            left.push_str("    ");
            left.push_str(info);
        }

        let gap = width
            .saturating_sub(left.chars().count())
            .saturating_sub(key_hints.len());
        let text: String = format!("{left}{}{key_hints}", " ".repeat(gap))
            .chars()
            .take(width)
            .collect();

        let line = Line::from(Span::styled(text, base_style));
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
