use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::fs::listing::{size_label, Entry, EntryKind, Listing};
use crate::theme::ThemeColors;

/// Widget that renders the directory listing with the selection cursor.
///
/// Rows follow the classified layout: the ".." parent link first, then
/// directories, then files with their size label right-aligned. The entry
/// currently held in the clipboard is dimmed.
pub struct ListingWidget<'a> {
    listing: &'a Listing,
    selected: Option<usize>,
    scroll_offset: usize,
    clipboard_path: Option<&'a Path>,
    theme: &'a ThemeColors,
    block: Option<Block<'a>>,
}

impl<'a> ListingWidget<'a> {
    pub fn new(
        listing: &'a Listing,
        selected: Option<usize>,
        scroll_offset: usize,
        theme: &'a ThemeColors,
    ) -> Self {
        Self {
            listing,
            selected,
            scroll_offset,
            clipboard_path: None,
            theme,
            block: None,
        }
    }

    pub fn clipboard_path(mut self, path: Option<&'a Path>) -> Self {
        self.clipboard_path = path;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn created_label(created: Option<SystemTime>) -> String {
        match created {
            Some(time) => {
                let local: DateTime<Local> = time.into();
                local.format("%Y-%m-%d %H:%M").to_string()
            }
            None => "----------------".to_string(),
        }
    }

    /// Left-hand row text: kind tag, creation time and name.
    fn row_text(entry: &Entry) -> String {
        match entry.kind {
            EntryKind::ParentLink => "     ..".to_string(),
            EntryKind::Directory => {
                format!("d_{}    {}", Self::created_label(entry.created), entry.name)
            }
            EntryKind::File => {
                format!("f_{}    {}", Self::created_label(entry.created), entry.name)
            }
        }
    }
}

impl<'a> Widget for ListingWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner_area = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        let visible_height = inner_area.height as usize;
        if self.listing.is_empty() || visible_height == 0 {
            return;
        }

        let visible = self
            .listing
            .entries()
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(visible_height);

        for (row, (idx, entry)) in visible.enumerate() {
            let y = inner_area.y + row as u16;

            let is_selected = self.selected == Some(idx);
            let in_clipboard = self
                .clipboard_path
                .is_some_and(|p| p == entry.path.as_path());

            let style = if is_selected {
                Style::default()
                    .bg(self.theme.list_selected_bg)
                    .fg(self.theme.list_selected_fg)
                    .add_modifier(Modifier::BOLD)
            } else if in_clipboard {
                Style::default().fg(self.theme.clipboard_fg)
            } else if self.listing.is_directory_at(idx) {
                Style::default()
                    .fg(self.theme.dir_fg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.file_fg)
            };

            let cursor = if is_selected { "-> " } else { "   " };
            let text = format!("{}{}", cursor, Self::row_text(entry));

            let line = Line::from(Span::styled(text, style));
            buf.set_line(inner_area.x, y, &line, inner_area.width);

            // Size label right-aligned for files.
            if entry.kind == EntryKind::File {
                let label = size_label(entry.size);
                let label_width = label.len() as u16;
                if inner_area.width > label_width + 1 {
                    let x = inner_area.x + inner_area.width - label_width - 1;
                    let size_line = Line::from(Span::styled(label, style));
                    buf.set_line(x, y, &size_line, label_width);
                }
            }
        }
    }
}
