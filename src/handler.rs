use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::App;
use crate::fs::clipboard::ClipboardOp;

/// Handle a key event.
///
/// Navigation: arrows move the selection, Enter opens or enters the
/// selected entry, numeric keys jump to the matching drive slot.
/// Editing: `d`/`f` create a directory/file, `x`/`c`/`v` cut/copy/paste,
/// Delete sends to trash. `q` or Ctrl-C quits.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Ignore key-release reports from terminals that send them.
    if key.kind == KeyEventKind::Release {
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        KeyCode::Up => app.move_selection(-1),
        KeyCode::Down => app.move_selection(1),
        KeyCode::Home => app.move_selection(isize::MIN),
        KeyCode::End => app.move_selection(isize::MAX),
        KeyCode::Enter => app.activate_selection(),

        KeyCode::Char('d') => app.create_directory(),
        KeyCode::Char('f') => app.create_file(),

        KeyCode::Char('x') => app.mark_clipboard(ClipboardOp::Cut),
        KeyCode::Char('c') => app.mark_clipboard(ClipboardOp::Copy),
        KeyCode::Char('v') => app.paste(),

        KeyCode::Delete => app.delete_selected(),

        KeyCode::Char('r') => app.refresh_drives(),

        KeyCode::Char(c) if c.is_ascii_digit() => {
            let slot = (c as u8 - b'0') as usize;
            app.switch_drive(slot);
        }

        _ => {}
    }
}
