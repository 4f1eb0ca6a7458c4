use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::error::Result;
use crate::fs::clipboard::{Clipboard, ClipboardOp};
use crate::fs::drives::{self, Drive};
use crate::fs::listing::Listing;
use crate::fs::operations;

/// Navigation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Idle,
    Loading,
    /// The last load failed; the previous listing and selection are retained.
    Error,
}

/// A transient status-bar message.
#[derive(Debug)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    pub created: Instant,
}

/// Main application state.
///
/// Owns the current directory, the listing snapshot, the selection and the
/// clipboard. All mutations go through the foreground event loop, so an
/// input-triggered navigation and a watcher-triggered reload can never
/// interleave their read-modify-write of listing and selection.
pub struct App {
    pub current_dir: PathBuf,
    pub listing: Listing,
    /// `None` iff the listing is empty; otherwise an index into it.
    pub selected: Option<usize>,
    pub nav_state: NavState,
    pub clipboard: Clipboard,
    /// Numeric-key lookup table; slot `k` is taken by the `k` key.
    pub drives: Vec<Drive>,
    pub scroll_offset: usize,
    pub should_quit: bool,
    pub status_message: Option<StatusMessage>,
}

impl App {
    /// Create a new App rooted at the given path.
    pub fn new(path: &Path) -> Result<Self> {
        let listing = Listing::load(path)?;
        let selected = if listing.is_empty() { None } else { Some(0) };
        Ok(Self {
            current_dir: path.to_path_buf(),
            listing,
            selected,
            nav_state: NavState::Idle,
            clipboard: Clipboard::new(),
            drives: drives::list_drives(),
            scroll_offset: 0,
            should_quit: false,
            status_message: None,
        })
    }

    /// Quit the application.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    // ── Status messages ─────────────────────────────────────────────────────

    pub fn set_status(&mut self, text: String) {
        self.status_message = Some(StatusMessage {
            text,
            is_error: false,
            created: Instant::now(),
        });
    }

    pub fn set_error(&mut self, text: String) {
        self.status_message = Some(StatusMessage {
            text,
            is_error: true,
            created: Instant::now(),
        });
    }

    /// Clear the status message once it has been shown for a few seconds.
    pub fn clear_expired_status(&mut self) {
        if let Some(ref msg) = self.status_message {
            if msg.created.elapsed().as_secs() > 3 {
                self.status_message = None;
            }
        }
    }

    // ── Navigation ──────────────────────────────────────────────────────────

    /// Change the current directory.
    ///
    /// On success the selection resets to the first entry (or none for an
    /// empty listing). On failure everything is retained and the error is
    /// surfaced; the user recovers by navigating elsewhere.
    pub fn navigate_to(&mut self, path: &Path) {
        self.nav_state = NavState::Loading;
        match Listing::load(path) {
            Ok(listing) => {
                self.current_dir = path.to_path_buf();
                self.selected = if listing.is_empty() { None } else { Some(0) };
                self.listing = listing;
                self.scroll_offset = 0;
                self.nav_state = NavState::Idle;
            }
            Err(e) => {
                self.nav_state = NavState::Error;
                self.set_error(format!("Cannot open {}: {}", path.display(), e));
            }
        }
    }

    /// Reload the current directory, keeping the user's position.
    ///
    /// Unlike `navigate_to`, the selection is preserved and only clamped to
    /// the new last entry when it fell off the end. A reload either
    /// completes or fails atomically; a partial listing is never published.
    pub fn refresh(&mut self) {
        match Listing::load(&self.current_dir) {
            Ok(listing) => {
                self.selected = if listing.is_empty() {
                    None
                } else {
                    match self.selected {
                        Some(i) if i >= listing.len() => Some(listing.len() - 1),
                        Some(i) => Some(i),
                        None => Some(0),
                    }
                };
                self.listing = listing;
                self.nav_state = NavState::Idle;
            }
            Err(e) => {
                self.nav_state = NavState::Error;
                self.set_error(format!("Refresh failed: {e}"));
            }
        }
    }

    /// Apply an external filesystem change reported by the watcher.
    pub fn on_external_change(&mut self) {
        self.refresh();
    }

    /// Move the selection by `delta`, clamped to the listing bounds.
    /// Moving past either end is a silent no-op.
    pub fn move_selection(&mut self, delta: isize) {
        let Some(current) = self.selected else {
            return;
        };
        let count = self.listing.len();
        if count == 0 {
            return;
        }
        let target = (current as isize).saturating_add(delta);
        self.selected = Some(target.clamp(0, count as isize - 1) as usize);
    }

    /// Open the selected file, or enter the selected directory.
    pub fn activate_selection(&mut self) {
        let Some(index) = self.selected else {
            return;
        };
        let Some(entry) = self.listing.entry(index) else {
            return;
        };
        let path = entry.path.clone();
        let name = entry.name.clone();

        if self.listing.is_directory_at(index) {
            self.navigate_to(&path);
        } else if let Err(e) = operations::open_with_default(&path) {
            self.set_error(format!("Cannot open {name}: {e}"));
        }
    }

    // ── Drives ──────────────────────────────────────────────────────────────

    /// Re-enumerate drives, regenerating the numeric-key lookup table.
    pub fn refresh_drives(&mut self) {
        self.drives = drives::list_drives();
    }

    /// Navigate to the drive bound to numeric key `slot`.
    /// Unready or unbound slots are silently ignored.
    pub fn switch_drive(&mut self, slot: usize) {
        let Some(drive) = self.drives.get(slot) else {
            return;
        };
        if !drive.is_ready {
            return;
        }
        let root = drive.path.clone();
        self.navigate_to(&root);
    }

    // ── Create ──────────────────────────────────────────────────────────────

    /// Create a new directory with an auto-generated unique default name.
    pub fn create_directory(&mut self) {
        let name = self.listing.unique_name("Directory", None);
        match operations::create_dir(&self.current_dir, &name) {
            Ok(_) => {
                self.set_status(format!("Created {name}"));
                self.refresh();
            }
            Err(e) => self.set_error(format!("Cannot create {name}: {e}")),
        }
    }

    /// Create a new empty file with an auto-generated unique default name.
    pub fn create_file(&mut self) {
        let name = self.listing.unique_name("File", Some("txt"));
        match operations::create_file(&self.current_dir, &name) {
            Ok(_) => {
                self.set_status(format!("Created {name}"));
                self.refresh();
            }
            Err(e) => self.set_error(format!("Cannot create {name}: {e}")),
        }
    }

    // ── Clipboard ───────────────────────────────────────────────────────────

    /// Mark the selected entry for a later paste.
    /// The ".." pseudo-entry cannot be marked.
    pub fn mark_clipboard(&mut self, op: ClipboardOp) {
        let Some(index) = self.selected else {
            return;
        };
        if self.listing.is_parent_link_at(index) {
            return;
        }
        let Some(entry) = self.listing.entry(index) else {
            return;
        };
        let path = entry.path.clone();
        let is_dir = self.listing.is_directory_at(index);
        self.clipboard.set(path, is_dir, op);
        if let Some(label) = self.clipboard.label() {
            self.set_status(label);
        }
    }

    /// Paste the clipboard entry into the current directory.
    ///
    /// Cut performs a move, Copy a recursive copy; either failure (name
    /// collision, access denied, stale source) is reported and leaves the
    /// clipboard unchanged. The clipboard also stays populated after a
    /// successful cut-paste, matching the original behavior.
    pub fn paste(&mut self) {
        let (Some(src), Some(op)) = (
            self.clipboard.path().map(Path::to_path_buf),
            self.clipboard.operation(),
        ) else {
            self.set_error("Clipboard is empty".to_string());
            return;
        };

        let result = match op {
            ClipboardOp::Cut => operations::move_entry(&src, &self.current_dir),
            ClipboardOp::Copy => operations::copy_entry(&src, &self.current_dir),
        };

        match result {
            Ok(dest) => {
                let name = dest
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                let kind = if self.clipboard.is_dir() {
                    "directory"
                } else {
                    "file"
                };
                self.set_status(format!("Pasted {kind} {name}"));
                self.refresh();
            }
            Err(e) => self.set_error(format!("Paste failed: {e}")),
        }
    }

    // ── Delete ──────────────────────────────────────────────────────────────

    /// Send the selected entry to the trash.
    /// The ".." pseudo-entry cannot be deleted.
    pub fn delete_selected(&mut self) {
        let Some(index) = self.selected else {
            return;
        };
        if self.listing.is_parent_link_at(index) {
            return;
        }
        let Some(entry) = self.listing.entry(index) else {
            return;
        };
        let path = entry.path.clone();
        let name = entry.name.clone();

        match operations::delete_to_trash(&path) {
            Ok(()) => {
                self.set_status(format!("Sent {name} to trash"));
                self.refresh();
            }
            Err(e) => self.set_error(format!("Cannot delete {name}: {e}")),
        }
    }

    // ── Rendering support ───────────────────────────────────────────────────

    /// Keep the selected row inside the visible window.
    pub fn update_scroll(&mut self, visible_height: usize) {
        let Some(selected) = self.selected else {
            self.scroll_offset = 0;
            return;
        };
        if visible_height == 0 {
            return;
        }
        if selected < self.scroll_offset {
            self.scroll_offset = selected;
        } else if selected >= self.scroll_offset + visible_height {
            self.scroll_offset = selected + 1 - visible_height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    /// 2 subdirectories + 3 files, plus the parent link.
    fn setup_app() -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("alpha")).unwrap();
        fs::create_dir(dir.path().join("beta")).unwrap();
        File::create(dir.path().join("one.txt")).unwrap();
        File::create(dir.path().join("two.rs")).unwrap();
        File::create(dir.path().join("three.md")).unwrap();
        let app = App::new(dir.path()).unwrap();
        (dir, app)
    }

    #[test]
    fn new_app_selects_first_entry() {
        let (_dir, app) = setup_app();
        assert_eq!(app.selected, Some(0));
        assert_eq!(app.nav_state, NavState::Idle);
        // parent link + 2 dirs + 3 files
        assert_eq!(app.listing.len(), 6);
    }

    #[test]
    fn layout_matches_two_dirs_three_files() {
        let (_dir, app) = setup_app();
        assert_eq!(app.listing.first_file_index(), 3);
        assert!(app.listing.is_directory_at(1));
        assert!(app.listing.is_directory_at(2));
        assert!(!app.listing.is_directory_at(3));
    }

    #[test]
    fn move_selection_clamps_at_bounds() {
        let (_dir, mut app) = setup_app();
        app.move_selection(-1);
        assert_eq!(app.selected, Some(0));
        app.move_selection(-1);
        assert_eq!(app.selected, Some(0));

        app.move_selection(isize::MAX);
        assert_eq!(app.selected, Some(app.listing.len() - 1));
        app.move_selection(1);
        assert_eq!(app.selected, Some(app.listing.len() - 1));
    }

    #[test]
    fn move_selection_is_noop_without_selection() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("empty_like");
        fs::create_dir(&root).unwrap();
        let mut app = App::new(&root).unwrap();
        // Only the parent link exists; point selection at it and clear.
        app.listing = Listing::default();
        app.selected = None;
        app.move_selection(1);
        assert_eq!(app.selected, None);
    }

    #[test]
    fn navigate_resets_selection_to_first() {
        let (dir, mut app) = setup_app();
        app.selected = Some(4);
        app.navigate_to(&dir.path().join("alpha"));
        assert_eq!(app.selected, Some(0));
        assert_eq!(app.current_dir, dir.path().join("alpha"));
        assert_eq!(app.nav_state, NavState::Idle);
    }

    #[test]
    fn navigate_failure_retains_previous_state() {
        let (dir, mut app) = setup_app();
        app.selected = Some(3);
        let before_len = app.listing.len();

        app.navigate_to(&dir.path().join("no_such_dir"));

        assert_eq!(app.nav_state, NavState::Error);
        assert_eq!(app.current_dir, dir.path());
        assert_eq!(app.selected, Some(3));
        assert_eq!(app.listing.len(), before_len);
        assert!(app.status_message.as_ref().unwrap().is_error);
    }

    #[test]
    fn navigate_recovers_after_error() {
        let (dir, mut app) = setup_app();
        app.navigate_to(&dir.path().join("no_such_dir"));
        assert_eq!(app.nav_state, NavState::Error);
        app.navigate_to(&dir.path().join("beta"));
        assert_eq!(app.nav_state, NavState::Idle);
    }

    #[test]
    fn activate_parent_link_navigates_up() {
        let (dir, mut app) = setup_app();
        app.navigate_to(&dir.path().join("alpha"));
        app.selected = Some(0); // ".."
        app.activate_selection();
        assert_eq!(app.current_dir, dir.path());
    }

    #[test]
    fn activate_directory_enters_it() {
        let (dir, mut app) = setup_app();
        app.selected = Some(1); // first real subdirectory
        let name = app.listing.entry(1).unwrap().name.clone();
        app.activate_selection();
        assert_eq!(app.current_dir, dir.path().join(name));
        assert_eq!(app.selected, Some(0));
    }

    #[test]
    fn external_change_preserves_selection() {
        let (dir, mut app) = setup_app();
        app.selected = Some(4);
        File::create(dir.path().join("four.txt")).unwrap();
        app.on_external_change();
        assert_eq!(app.selected, Some(4));
        assert_eq!(app.listing.len(), 7);
    }

    #[test]
    fn external_change_clamps_selection_to_last() {
        let (dir, mut app) = setup_app();
        app.selected = Some(5); // last entry (a file)
        let last_name = app.listing.entry(5).unwrap().name.clone();
        fs::remove_file(dir.path().join(&last_name)).unwrap();
        app.on_external_change();
        assert_eq!(app.listing.len(), 5);
        assert_eq!(app.selected, Some(4));
    }

    #[test]
    fn external_change_never_resets_to_first() {
        let (dir, mut app) = setup_app();
        app.selected = Some(2);
        File::create(dir.path().join("zzz.txt")).unwrap();
        app.on_external_change();
        assert_eq!(app.selected, Some(2));
    }

    #[test]
    fn refresh_failure_keeps_listing_and_selection() {
        let (_tmp, mut app) = {
            let tmp = TempDir::new().unwrap();
            let root = tmp.path().join("root");
            fs::create_dir(&root).unwrap();
            File::create(root.join("a.txt")).unwrap();
            let app = App::new(&root).unwrap();
            (tmp, app)
        };
        let before_len = app.listing.len();
        app.selected = Some(1);

        fs::remove_dir_all(&app.current_dir).unwrap();
        app.on_external_change();

        assert_eq!(app.nav_state, NavState::Error);
        assert_eq!(app.listing.len(), before_len);
        assert_eq!(app.selected, Some(1));
    }

    #[test]
    fn create_directory_uses_unique_default_names() {
        let (dir, mut app) = setup_app();
        app.create_directory();
        assert!(dir.path().join("Directory").is_dir());
        app.create_directory();
        assert!(dir.path().join("Directory_1").is_dir());
        app.create_directory();
        assert!(dir.path().join("Directory_2").is_dir());
    }

    #[test]
    fn create_file_uses_unique_default_names() {
        let (dir, mut app) = setup_app();
        app.create_file();
        assert!(dir.path().join("File.txt").is_file());
        app.create_file();
        assert!(dir.path().join("File_1.txt").is_file());
    }

    #[test]
    fn create_preserves_selection_position() {
        let (_dir, mut app) = setup_app();
        app.selected = Some(4);
        app.create_file();
        assert_eq!(app.selected, Some(4));
    }

    #[test]
    fn mark_parent_link_is_rejected() {
        let (_dir, mut app) = setup_app();
        app.selected = Some(0); // ".."
        app.mark_clipboard(ClipboardOp::Copy);
        assert!(app.clipboard.is_empty());
        app.mark_clipboard(ClipboardOp::Cut);
        assert!(app.clipboard.is_empty());
    }

    #[test]
    fn mark_without_selection_is_rejected() {
        let (_dir, mut app) = setup_app();
        app.selected = None;
        app.mark_clipboard(ClipboardOp::Copy);
        assert!(app.clipboard.is_empty());
    }

    #[test]
    fn paste_with_empty_clipboard_is_rejected() {
        let (_dir, mut app) = setup_app();
        let before_len = app.listing.len();
        app.paste();
        assert!(app.status_message.as_ref().unwrap().is_error);
        assert_eq!(app.listing.len(), before_len);
    }

    #[test]
    fn copy_paste_into_other_directory() {
        let (dir, mut app) = setup_app();
        // Mark "one.txt" (first file).
        let idx = app.listing.first_file_index();
        app.selected = Some(idx);
        let name = app.listing.entry(idx).unwrap().name.clone();
        app.mark_clipboard(ClipboardOp::Copy);

        app.navigate_to(&dir.path().join("alpha"));
        app.paste();

        // Present in the destination, still present at the source.
        assert!(dir.path().join("alpha").join(&name).exists());
        assert!(dir.path().join(&name).exists());
        assert!(app.listing.exists(&name));
        let msg = app.status_message.as_ref().unwrap();
        assert!(!msg.is_error);
        assert!(msg.text.contains("Pasted file"));
    }

    #[test]
    fn cut_paste_moves_the_entry() {
        let (dir, mut app) = setup_app();
        let idx = app.listing.first_file_index();
        app.selected = Some(idx);
        let name = app.listing.entry(idx).unwrap().name.clone();
        app.mark_clipboard(ClipboardOp::Cut);

        app.navigate_to(&dir.path().join("beta"));
        app.paste();

        assert!(dir.path().join("beta").join(&name).exists());
        assert!(!dir.path().join(&name).exists());
    }

    #[test]
    fn clipboard_survives_cut_paste_and_second_paste_fails() {
        let (dir, mut app) = setup_app();
        let idx = app.listing.first_file_index();
        app.selected = Some(idx);
        app.mark_clipboard(ClipboardOp::Cut);

        app.navigate_to(&dir.path().join("beta"));
        app.paste();

        // Baseline behavior: the clipboard still holds the now-stale path.
        assert!(!app.clipboard.is_empty());

        // Pasting the stale reference again fails non-fatally.
        app.navigate_to(&dir.path().join("alpha"));
        app.paste();
        assert!(app.status_message.as_ref().unwrap().is_error);
        assert!(!app.clipboard.is_empty());
    }

    #[test]
    fn paste_collision_is_reported_and_clipboard_kept() {
        let (dir, mut app) = setup_app();
        let idx = app.listing.first_file_index();
        app.selected = Some(idx);
        let name = app.listing.entry(idx).unwrap().name.clone();
        app.mark_clipboard(ClipboardOp::Copy);

        // Destination already has an entry with the same name.
        File::create(dir.path().join("alpha").join(&name)).unwrap();
        app.navigate_to(&dir.path().join("alpha"));
        app.paste();

        assert!(app.status_message.as_ref().unwrap().is_error);
        assert!(!app.clipboard.is_empty());
    }

    #[test]
    fn paste_into_source_directory_collides() {
        let (_dir, mut app) = setup_app();
        let idx = app.listing.first_file_index();
        app.selected = Some(idx);
        app.mark_clipboard(ClipboardOp::Copy);
        // Same directory, same name: rejected as a collision.
        app.paste();
        assert!(app.status_message.as_ref().unwrap().is_error);
    }

    #[test]
    fn delete_parent_link_is_rejected() {
        let (dir, mut app) = setup_app();
        app.selected = Some(0);
        app.delete_selected();
        // Parent directory untouched, listing unchanged.
        assert!(dir.path().exists());
        assert_eq!(app.listing.len(), 6);
    }

    #[test]
    fn delete_without_selection_is_rejected() {
        let (_dir, mut app) = setup_app();
        app.selected = None;
        app.delete_selected();
        assert!(app.status_message.is_none());
    }

    #[test]
    fn switch_drive_ignores_unbound_slots() {
        let (dir, mut app) = setup_app();
        app.drives.clear();
        app.switch_drive(0);
        assert_eq!(app.current_dir, dir.path());
    }

    #[test]
    fn switch_drive_ignores_unready_drives() {
        let (dir, mut app) = setup_app();
        app.drives = vec![Drive {
            name: "stale".to_string(),
            path: PathBuf::from("/definitely/not/mounted"),
            is_ready: false,
        }];
        app.switch_drive(0);
        assert_eq!(app.current_dir, dir.path());
        assert!(app.status_message.is_none());
    }

    #[test]
    fn switch_drive_navigates_to_ready_root() {
        let (dir, mut app) = setup_app();
        let target = dir.path().join("alpha");
        app.drives = vec![Drive {
            name: "alpha".to_string(),
            path: target.clone(),
            is_ready: true,
        }];
        app.switch_drive(0);
        assert_eq!(app.current_dir, target);
        assert_eq!(app.selected, Some(0));
    }

    #[test]
    fn update_scroll_follows_selection() {
        let (_dir, mut app) = setup_app();
        app.selected = Some(5);
        app.update_scroll(3);
        assert_eq!(app.scroll_offset, 3);

        app.selected = Some(0);
        app.update_scroll(3);
        assert_eq!(app.scroll_offset, 0);
    }

    #[test]
    fn expired_status_is_cleared() {
        let (_dir, mut app) = setup_app();
        app.set_status("fresh".to_string());
        app.clear_expired_status();
        assert!(app.status_message.is_some());

        app.status_message = Some(StatusMessage {
            text: "old".to_string(),
            is_error: false,
            created: Instant::now() - std::time::Duration::from_secs(5),
        });
        app.clear_expired_status();
        assert!(app.status_message.is_none());
    }
}
