use std::fs;
use std::path::PathBuf;

/// Maximum number of drives shown; each is bound to a numeric key (0-9).
pub const MAX_DRIVES: usize = 10;

/// A mounted drive or volume that can become the navigation root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drive {
    pub name: String,
    pub path: PathBuf,
    pub is_ready: bool,
}

impl Drive {
    fn probe(name: String, path: PathBuf) -> Self {
        // Ready means we can actually enumerate the root.
        let is_ready = fs::read_dir(&path).is_ok();
        Self {
            name,
            path,
            is_ready,
        }
    }
}

/// Enumerate drives/volumes, capped at [`MAX_DRIVES`].
///
/// The result backs the numeric-key lookup table; callers regenerate it
/// whenever drives are re-listed rather than caching key bindings.
pub fn list_drives() -> Vec<Drive> {
    let mut drives = platform_drives();
    drives.truncate(MAX_DRIVES);
    drives
}

#[cfg(target_os = "linux")]
fn platform_drives() -> Vec<Drive> {
    let mut roots = vec![PathBuf::from("/")];
    if let Ok(mounts) = fs::read_to_string("/proc/mounts") {
        for path in parse_mount_points(&mounts) {
            if !roots.contains(&path) {
                roots.push(path);
            }
        }
    }
    if let Some(home) = dirs::home_dir() {
        if !roots.contains(&home) {
            roots.push(home);
        }
    }
    roots
        .into_iter()
        .map(|p| Drive::probe(p.display().to_string(), p))
        .collect()
}

#[cfg(target_os = "macos")]
fn platform_drives() -> Vec<Drive> {
    let mut drives = vec![Drive::probe("/".to_string(), PathBuf::from("/"))];
    if let Ok(entries) = fs::read_dir("/Volumes") {
        for entry in entries.flatten() {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();
            drives.push(Drive::probe(name, path));
        }
    }
    drives
}

#[cfg(target_os = "windows")]
fn platform_drives() -> Vec<Drive> {
    ('A'..='Z')
        .map(|letter| PathBuf::from(format!("{letter}:\\")))
        .filter(|p| p.exists())
        .map(|p| Drive::probe(p.display().to_string(), p))
        .collect()
}

/// Extract device-backed mount points from a `/proc/mounts` style table.
///
/// Only mounts whose source is a device path are kept; pseudo filesystems
/// (proc, sysfs, tmpfs, ...) are not navigable drives. Octal escapes in
/// mount points are decoded (`\040` for space).
#[cfg(any(target_os = "linux", test))]
fn parse_mount_points(mounts: &str) -> Vec<PathBuf> {
    let mut points = Vec::new();
    for line in mounts.lines() {
        let mut fields = line.split_whitespace();
        let (Some(device), Some(mount_point)) = (fields.next(), fields.next()) else {
            continue;
        };
        if !device.starts_with("/dev/") {
            continue;
        }
        let decoded = decode_octal_escapes(mount_point);
        let path = PathBuf::from(decoded);
        if !points.contains(&path) {
            points.push(path);
        }
    }
    points
}

/// Decode `\0dd` octal escapes used by the kernel for whitespace in paths.
#[cfg(any(target_os = "linux", test))]
fn decode_octal_escapes(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\'
            && i + 3 < bytes.len()
            && bytes[i + 1..=i + 3].iter().all(u8::is_ascii_digit)
        {
            let oct = [bytes[i + 1], bytes[i + 2], bytes[i + 3]];
            if let Ok(v) = u8::from_str_radix(std::str::from_utf8(&oct).unwrap_or("x"), 8) {
                out.push(v);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_device_backed_mounts_only() {
        let table = "\
proc /proc proc rw,nosuid 0 0
/dev/sda2 / ext4 rw,relatime 0 0
sysfs /sys sysfs rw 0 0
tmpfs /run tmpfs rw 0 0
/dev/sdb1 /mnt/usb vfat rw 0 0
";
        let points = parse_mount_points(table);
        assert_eq!(points, vec![PathBuf::from("/"), PathBuf::from("/mnt/usb")]);
    }

    #[test]
    fn parse_dedupes_mount_points() {
        let table = "\
/dev/sda2 / ext4 rw 0 0
/dev/sda2 / ext4 ro 0 0
";
        assert_eq!(parse_mount_points(table).len(), 1);
    }

    #[test]
    fn parse_decodes_escaped_spaces() {
        let table = "/dev/sdc1 /mnt/My\\040Disk ntfs rw 0 0\n";
        let points = parse_mount_points(table);
        assert_eq!(points, vec![PathBuf::from("/mnt/My Disk")]);
    }

    #[test]
    fn decode_leaves_plain_paths_alone() {
        assert_eq!(decode_octal_escapes("/mnt/usb"), "/mnt/usb");
        assert_eq!(decode_octal_escapes("/mnt/a\\040b"), "/mnt/a b");
    }

    #[test]
    fn list_drives_is_bounded() {
        let drives = list_drives();
        assert!(drives.len() <= MAX_DRIVES);
    }

    #[cfg(unix)]
    #[test]
    fn root_drive_is_ready() {
        let drives = list_drives();
        let root = drives.iter().find(|d| d.path == PathBuf::from("/"));
        assert!(root.is_some());
        assert!(root.unwrap().is_ready);
    }
}
