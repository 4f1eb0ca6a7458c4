use std::path::{Path, PathBuf};
use std::time::Duration;

use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use tokio::sync::mpsc;

use crate::event::Event;

/// Filesystem watcher that monitors the current directory and pushes
/// change events into the application event channel.
///
/// The notify callback runs on a separate thread but only *sends*; the
/// foreground loop applies the resulting reload, so listing and selection
/// are never mutated from two contexts at once.
pub struct FsWatcher {
    debouncer: notify_debouncer_mini::Debouncer<notify::RecommendedWatcher>,
    root: PathBuf,
}

impl FsWatcher {
    /// Create a new FsWatcher that watches `root` recursively.
    ///
    /// Changes are debounced by `debounce_duration` and sent via `event_tx`
    /// as `Event::FsChange`; internal watch failures are sent as
    /// `Event::WatchError` and are non-fatal.
    pub fn new(
        root: &Path,
        debounce_duration: Duration,
        event_tx: mpsc::UnboundedSender<Event>,
    ) -> notify::Result<Self> {
        let mut debouncer = new_debouncer(
            debounce_duration,
            move |result: Result<Vec<notify_debouncer_mini::DebouncedEvent>, notify::Error>| {
                match result {
                    Ok(events) => {
                        let paths: Vec<PathBuf> = events
                            .iter()
                            .filter(|e| e.kind == DebouncedEventKind::Any)
                            .map(|e| e.path.clone())
                            .collect();
                        if paths.is_empty() {
                            return;
                        }
                        let _ = event_tx.send(Event::FsChange(paths));
                    }
                    Err(error) => {
                        let _ = event_tx.send(Event::WatchError(error.to_string()));
                    }
                }
            },
        )?;

        debouncer
            .watcher()
            .watch(root, notify::RecursiveMode::Recursive)?;

        Ok(Self {
            debouncer,
            root: root.to_path_buf(),
        })
    }

    /// The directory currently being watched.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Re-point the watch at a new directory.
    ///
    /// Called only after a successful navigation; a failed navigation keeps
    /// the old watch so a stale or nonexistent path is never watched.
    ///
    /// The tracked root moves to `new_root` even when the new watch cannot
    /// be established, so the caller reports the failure once instead of
    /// retrying on every tick; live refresh resumes on the next successful
    /// re-point.
    pub fn repoint(&mut self, new_root: &Path) -> notify::Result<()> {
        // The old root may already be gone; dropping its watch can fail.
        let _ = self.debouncer.watcher().unwatch(&self.root);
        let result = self
            .debouncer
            .watcher()
            .watch(new_root, notify::RecursiveMode::Recursive);
        self.root = new_root.to_path_buf();
        result
    }
}
