use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::components::drives::DriveBarWidget;
use crate::components::listing::ListingWidget;
use crate::components::status_bar::StatusBarWidget;
use crate::theme::ThemeColors;

/// Render the application UI.
///
/// Layout, top to bottom: current path, drive bar, listing, status bar.
pub fn render(app: &mut App, theme: &ThemeColors, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    // Current path, centered, with the version tucked on the left.
    let path_line = Line::from(vec![
        Span::styled(
            format!("v{} ", env!("CARGO_PKG_VERSION")),
            Style::default().fg(theme.dim_fg),
        ),
        Span::styled(
            app.current_dir.display().to_string(),
            Style::default()
                .fg(theme.path_fg)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(path_line).alignment(Alignment::Center),
        chunks[0],
    );

    frame.render_widget(DriveBarWidget::new(&app.drives, theme), chunks[1]);

    // Keep the selected row visible, accounting for the listing border.
    let visible_height = chunks[2].height.saturating_sub(2) as usize;
    app.update_scroll(visible_height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_fg));
    let listing = ListingWidget::new(&app.listing, app.selected, app.scroll_offset, theme)
        .clipboard_path(app.clipboard.path())
        .block(block);
    frame.render_widget(listing, chunks[2]);

    let counts = format!(
        "Directories : {}    Files : {}    Total : {}",
        app.listing.dir_count(),
        app.listing.file_count(),
        app.listing.len()
    );
    let clipboard_label = app.clipboard.label();
    let mut status_bar = StatusBarWidget::new(&counts, theme);
    if let Some(ref msg) = app.status_message {
        status_bar = status_bar.status_message(&msg.text, msg.is_error);
    }
    if let Some(ref label) = clipboard_label {
        status_bar = status_bar.clipboard_info(label);
    }
    frame.render_widget(status_bar, chunks[3]);
}
