use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::Result;

/// Kind of a displayed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// The ".." pseudo-entry pointing at the parent directory.
    ParentLink,
    Directory,
    File,
}

/// A classified filesystem node, snapshotted at load time.
///
/// Becomes stale the instant the underlying filesystem changes; the
/// watcher-driven reload exists precisely because of that.
#[derive(Debug, Clone)]
pub struct Entry {
    pub kind: EntryKind,
    pub name: String,
    pub path: PathBuf,
    /// Creation time, when the filesystem reports one.
    pub created: Option<SystemTime>,
    /// Byte length for files; 0 for directories and the parent link.
    pub size: u64,
}

/// Ordered snapshot of a single directory load.
///
/// Layout: optional ParentLink first (present iff the directory has a
/// parent), then subdirectories, then files. Both groups keep the order
/// `read_dir` returned them in — no sorting is applied.
#[derive(Debug, Clone, Default)]
pub struct Listing {
    entries: Vec<Entry>,
    first_file_index: usize,
    has_parent: bool,
}

impl Listing {
    /// Load the contents of `path`.
    ///
    /// Fails when the directory cannot be enumerated (permission denied,
    /// path vanished); callers keep their previous listing in that case.
    /// Entries whose metadata cannot be read are skipped.
    pub fn load(path: &Path) -> Result<Self> {
        let mut dirs: Vec<Entry> = Vec::new();
        let mut files: Vec<Entry> = Vec::new();

        let has_parent = path.parent().is_some();
        if let Some(parent) = path.parent() {
            let created = fs::metadata(parent).ok().and_then(|m| m.created().ok());
            dirs.push(Entry {
                kind: EntryKind::ParentLink,
                name: "..".to_string(),
                path: parent.to_path_buf(),
                created,
                size: 0,
            });
        }

        for entry in fs::read_dir(path)? {
            let entry = match entry {
                Ok(e) => e,
                Err(_) => continue,
            };
            let meta = match entry.metadata() {
                Ok(m) => m,
                Err(_) => continue,
            };
            let name = entry.file_name().to_string_lossy().to_string();
            let created = meta.created().ok();

            if entry.path().is_dir() {
                dirs.push(Entry {
                    kind: EntryKind::Directory,
                    name,
                    path: entry.path(),
                    created,
                    size: 0,
                });
            } else {
                files.push(Entry {
                    kind: EntryKind::File,
                    name,
                    path: entry.path(),
                    created,
                    size: meta.len(),
                });
            }
        }

        let first_file_index = dirs.len();
        let mut entries = dirs;
        entries.append(&mut files);

        Ok(Self {
            entries,
            first_file_index,
            has_parent,
        })
    }

    /// Number of displayed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// An empty directory with no parent yields an empty listing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Index of the first file; everything below it is a directory
    /// (including the parent link).
    pub fn first_file_index(&self) -> usize {
        self.first_file_index
    }

    pub fn has_parent(&self) -> bool {
        self.has_parent
    }

    /// Whether the entry at `index` is a directory or the parent link.
    pub fn is_directory_at(&self, index: usize) -> bool {
        index < self.first_file_index
    }

    /// Whether the entry at `index` is the ".." pseudo-entry.
    pub fn is_parent_link_at(&self, index: usize) -> bool {
        self.has_parent && index == 0
    }

    /// True iff any entry other than the parent link has exactly this name.
    pub fn exists(&self, name: &str) -> bool {
        self.entries
            .iter()
            .filter(|e| e.kind != EntryKind::ParentLink)
            .any(|e| e.name == name)
    }

    /// Generate an unused default name: `base`, `base_1`, `base_2`, …
    /// with an optional extension (`File.txt`, `File_1.txt`, …).
    pub fn unique_name(&self, base: &str, ext: Option<&str>) -> String {
        let with_ext = |stem: String| match ext {
            Some(e) => format!("{stem}.{e}"),
            None => stem,
        };

        let mut name = with_ext(base.to_string());
        let mut i = 1;
        while self.exists(&name) {
            name = with_ext(format!("{base}_{i}"));
            i += 1;
        }
        name
    }

    /// Count of directory entries, parent link included.
    pub fn dir_count(&self) -> usize {
        self.first_file_index
    }

    /// Count of file entries.
    pub fn file_count(&self) -> usize {
        self.entries.len() - self.first_file_index
    }
}

/// Format a byte length in the largest binary unit where the value is >= 1.
///
/// Values are floor-divided at each unit boundary: 1535 bytes is "1 KB".
pub fn size_label(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{} GB", size / GB)
    } else if size >= MB {
        format!("{} MB", size / MB)
    } else if size >= KB {
        format!("{} KB", size / KB)
    } else if size > 0 {
        format!("{} Bytes", size)
    } else {
        "0 Bytes".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn setup_listing() -> (TempDir, Listing) {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("alpha")).unwrap();
        fs::create_dir(dir.path().join("beta")).unwrap();
        File::create(dir.path().join("one.txt")).unwrap();
        File::create(dir.path().join("two.rs")).unwrap();
        File::create(dir.path().join("three.md")).unwrap();
        let listing = Listing::load(dir.path()).unwrap();
        (dir, listing)
    }

    #[test]
    fn size_label_exact_values() {
        assert_eq!(size_label(0), "0 Bytes");
        assert_eq!(size_label(1), "1 Bytes");
        assert_eq!(size_label(1023), "1023 Bytes");
        assert_eq!(size_label(1024), "1 KB");
        assert_eq!(size_label(1_048_576), "1 MB");
        assert_eq!(size_label(1_073_741_824), "1 GB");
    }

    #[test]
    fn size_label_floor_divides() {
        assert_eq!(size_label(1535), "1 KB");
        assert_eq!(size_label(2047), "1 KB");
        assert_eq!(size_label(2048), "2 KB");
        assert_eq!(size_label(1_048_575), "1023 KB");
        assert_eq!(size_label(2_097_151), "1 MB");
    }

    #[test]
    fn load_puts_parent_link_first() {
        let (_dir, listing) = setup_listing();
        assert!(listing.has_parent());
        let first = listing.entry(0).unwrap();
        assert_eq!(first.kind, EntryKind::ParentLink);
        assert_eq!(first.name, "..");
        assert!(listing.is_parent_link_at(0));
        assert!(!listing.is_parent_link_at(1));
    }

    #[test]
    fn load_orders_dirs_before_files() {
        let (_dir, listing) = setup_listing();
        // 1 parent link + 2 dirs + 3 files
        assert_eq!(listing.len(), 6);
        assert_eq!(listing.first_file_index(), 3);
        for i in 0..listing.len() {
            assert_eq!(
                listing.is_directory_at(i),
                i < listing.first_file_index(),
                "entry {i}"
            );
        }
        for i in listing.first_file_index()..listing.len() {
            assert_eq!(listing.entry(i).unwrap().kind, EntryKind::File);
        }
        assert_eq!(listing.dir_count(), 3);
        assert_eq!(listing.file_count(), 3);
    }

    #[test]
    fn count_matches_len_invariant() {
        let (_dir, listing) = setup_listing();
        assert_eq!(listing.len(), listing.entries().len());
        assert_eq!(
            listing.first_file_index(),
            (listing.has_parent() as usize) + 2
        );
    }

    #[test]
    fn load_failure_for_missing_directory() {
        let dir = TempDir::new().unwrap();
        let gone = dir.path().join("vanished");
        assert!(Listing::load(&gone).is_err());
    }

    #[test]
    fn exists_ignores_parent_link() {
        let (_dir, listing) = setup_listing();
        assert!(listing.exists("alpha"));
        assert!(listing.exists("one.txt"));
        assert!(!listing.exists(".."));
        assert!(!listing.exists("missing"));
    }

    #[test]
    fn unique_name_scans_upward() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("Directory")).unwrap();
        let listing = Listing::load(dir.path()).unwrap();
        assert_eq!(listing.unique_name("Directory", None), "Directory_1");

        fs::create_dir(dir.path().join("Directory_1")).unwrap();
        let listing = Listing::load(dir.path()).unwrap();
        assert_eq!(listing.unique_name("Directory", None), "Directory_2");
    }

    #[test]
    fn unique_name_with_extension() {
        let dir = TempDir::new().unwrap();
        let listing = Listing::load(dir.path()).unwrap();
        assert_eq!(listing.unique_name("File", Some("txt")), "File.txt");

        File::create(dir.path().join("File.txt")).unwrap();
        let listing = Listing::load(dir.path()).unwrap();
        assert_eq!(listing.unique_name("File", Some("txt")), "File_1.txt");
    }

    #[test]
    fn file_entries_carry_size() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("data.bin"), vec![0u8; 2048]).unwrap();
        let listing = Listing::load(dir.path()).unwrap();
        let file = listing.entry(listing.first_file_index()).unwrap();
        assert_eq!(file.name, "data.bin");
        assert_eq!(file.size, 2048);
        assert_eq!(size_label(file.size), "2 KB");
    }

    #[test]
    fn empty_directory_without_parent_lists_nothing_inside() {
        let dir = TempDir::new().unwrap();
        let listing = Listing::load(dir.path()).unwrap();
        // Only the parent link is present.
        assert_eq!(listing.len(), 1);
        assert_eq!(listing.first_file_index(), 1);
        assert_eq!(listing.file_count(), 0);
    }
}
