use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::fs::drives::Drive;
use crate::theme::ThemeColors;

/// One-line drive bar: `[0] /   [1] /mnt/usb   ...`
///
/// The printed slot numbers are the numeric keys that switch to each
/// drive; unready drives are dimmed and their keys do nothing.
pub struct DriveBarWidget<'a> {
    drives: &'a [Drive],
    theme: &'a ThemeColors,
}

impl<'a> DriveBarWidget<'a> {
    pub fn new(drives: &'a [Drive], theme: &'a ThemeColors) -> Self {
        Self { drives, theme }
    }
}

impl<'a> Widget for DriveBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let mut spans: Vec<Span> = Vec::new();
        for (slot, drive) in self.drives.iter().enumerate() {
            let style = if drive.is_ready {
                Style::default()
                    .fg(self.theme.drive_fg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.drive_unready_fg)
            };
            spans.push(Span::styled(format!("[{slot}] {}", drive.name), style));
            spans.push(Span::raw("   "));
        }

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
