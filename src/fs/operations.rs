use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::Result;

/// Create an empty file at `root/name`.
pub fn create_file(root: &Path, name: &str) -> Result<PathBuf> {
    let path = root.join(name);
    fs::File::create(&path)?;
    Ok(path)
}

/// Create a new directory at `root/name`.
pub fn create_dir(root: &Path, name: &str) -> Result<PathBuf> {
    let path = root.join(name);
    fs::create_dir(&path)?;
    Ok(path)
}

/// Destination path for `src` placed inside `dest_dir` under the same name.
///
/// Name collisions are errors, not auto-renames: paste reports the failure
/// and leaves the clipboard untouched.
fn transfer_dest(src: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let name = src
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "no filename"))?;
    let dest = dest_dir.join(name);
    if dest.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", dest.display()),
        )
        .into());
    }
    Ok(dest)
}

/// Move a file or directory into `dest_dir` under the same name.
///
/// Uses `fs::rename` first (fast, same-device). Falls back to copy+delete
/// if rename fails (cross-device). Returns the final path.
pub fn move_entry(src: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let dest = transfer_dest(src, dest_dir)?;

    match fs::rename(src, &dest) {
        Ok(()) => Ok(dest),
        Err(_) => {
            if src.is_dir() {
                copy_dir_recursive(src, &dest)?;
                fs::remove_dir_all(src)?;
            } else {
                fs::copy(src, &dest)?;
                fs::remove_file(src)?;
            }
            Ok(dest)
        }
    }
}

/// Copy a file or directory (recursively) into `dest_dir` under the same name.
pub fn copy_entry(src: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let dest = transfer_dest(src, dest_dir)?;

    if src.is_dir() {
        copy_dir_recursive(src, &dest)?;
    } else {
        fs::copy(src, &dest)?;
    }
    Ok(dest)
}

fn copy_dir_recursive(src: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dest_path = dest.join(entry.file_name());
        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dest_path)?;
        } else {
            fs::copy(&src_path, &dest_path)?;
        }
    }
    Ok(())
}

/// Send a file or directory to the trash (recoverable delete).
pub fn delete_to_trash(path: &Path) -> Result<()> {
    trash::delete(path)?;
    Ok(())
}

/// Open a file with the platform's default handler (fire-and-forget).
pub fn open_with_default(path: &Path) -> Result<()> {
    #[cfg(target_os = "linux")]
    let mut cmd = {
        let mut c = Command::new("xdg-open");
        c.arg(path);
        c
    };

    #[cfg(target_os = "macos")]
    let mut cmd = {
        let mut c = Command::new("open");
        c.arg(path);
        c
    };

    #[cfg(target_os = "windows")]
    let mut cmd = {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]).arg(path);
        c
    };

    cmd.stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()?;
    Ok(())
}
