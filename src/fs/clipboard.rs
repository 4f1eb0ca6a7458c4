use std::path::{Path, PathBuf};

/// The type of clipboard operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardOp {
    Copy,
    Cut,
}

/// Clipboard buffer holding at most one marked entry and its operation.
///
/// The reference persists across navigation and is NOT cleared after a
/// successful Cut-mode paste; a second paste of the now-stale reference
/// simply fails at the gateway and is reported like any other error.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    path: Option<PathBuf>,
    is_dir: bool,
    operation: Option<ClipboardOp>,
}

impl Clipboard {
    /// Create a new empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an entry for a later paste, replacing any previous mark.
    pub fn set(&mut self, path: PathBuf, is_dir: bool, op: ClipboardOp) {
        self.path = Some(path);
        self.is_dir = is_dir;
        self.operation = Some(op);
    }

    /// Whether the clipboard has content.
    pub fn is_empty(&self) -> bool {
        self.path.is_none()
    }

    /// Path of the marked entry, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether the marked entry was a directory when it was marked.
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    pub fn operation(&self) -> Option<ClipboardOp> {
        self.operation
    }

    /// Short status-bar label, e.g. "cut: notes.txt".
    pub fn label(&self) -> Option<String> {
        let path = self.path.as_ref()?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let verb = match self.operation? {
            ClipboardOp::Copy => "copy",
            ClipboardOp::Cut => "cut",
        };
        Some(format!("{verb}: {name}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clipboard_is_empty() {
        let cb = Clipboard::new();
        assert!(cb.is_empty());
        assert_eq!(cb.operation(), None);
        assert_eq!(cb.path(), None);
        assert_eq!(cb.label(), None);
    }

    #[test]
    fn set_copy_operation() {
        let mut cb = Clipboard::new();
        cb.set(PathBuf::from("/tmp/a.txt"), false, ClipboardOp::Copy);
        assert!(!cb.is_empty());
        assert_eq!(cb.operation(), Some(ClipboardOp::Copy));
        assert_eq!(cb.path(), Some(Path::new("/tmp/a.txt")));
        assert!(!cb.is_dir());
    }

    #[test]
    fn set_cut_directory() {
        let mut cb = Clipboard::new();
        cb.set(PathBuf::from("/tmp/dir"), true, ClipboardOp::Cut);
        assert_eq!(cb.operation(), Some(ClipboardOp::Cut));
        assert!(cb.is_dir());
    }

    #[test]
    fn set_overwrites_previous() {
        let mut cb = Clipboard::new();
        cb.set(PathBuf::from("/tmp/old.txt"), false, ClipboardOp::Copy);
        cb.set(PathBuf::from("/tmp/new"), true, ClipboardOp::Cut);
        assert_eq!(cb.path(), Some(Path::new("/tmp/new")));
        assert_eq!(cb.operation(), Some(ClipboardOp::Cut));
        assert!(cb.is_dir());
    }

    #[test]
    fn label_shows_verb_and_name() {
        let mut cb = Clipboard::new();
        cb.set(PathBuf::from("/tmp/notes.txt"), false, ClipboardOp::Cut);
        assert_eq!(cb.label().unwrap(), "cut: notes.txt");
        cb.set(PathBuf::from("/tmp/dir"), true, ClipboardOp::Copy);
        assert_eq!(cb.label().unwrap(), "copy: dir");
    }
}
