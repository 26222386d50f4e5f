//! Staged output writes.
//!
//! A destination must end up either fully written or untouched, never
//! truncated halfway. The text lands in a sibling staging file first and
//! is renamed into place only once fully written.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Writes `contents` to `path` with commit-on-success semantics.
pub fn write_staged(path: &Path, contents: &str) -> io::Result<()> {
    let staging = staging_path(path);
    if let Err(error) = fs::write(&staging, contents) {
        let _ = fs::remove_file(&staging);
        return Err(error);
    }
    if let Err(error) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(error);
    }
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".staged");
    path.with_file_name(name)
}
