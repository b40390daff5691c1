//! Path utilities for detecting Matroska files and enumerating inputs.
//!
//! Every batch command accepts either a single file or a directory. A
//! directory is expanded to its direct, non-hidden children; nothing below
//! the first level is visited.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions treated as Matroska containers.
const MATROSKA_EXTENSIONS: &[&str] = &["mkv"];

/// Check if a path has a Matroska file extension.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use mkvkit_common::paths::is_matroska_file;
///
/// assert!(is_matroska_file(Path::new("movie.mkv")));
/// assert!(is_matroska_file(Path::new("/path/to/EPISODE.MKV")));
/// assert!(!is_matroska_file(Path::new("movie.mp4")));
/// ```
pub fn is_matroska_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| MATROSKA_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Check if a file name starts with a dot.
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

/// List the files at `path` accepted by `filter`, sorted.
///
/// A file path yields itself (if accepted). A directory yields its direct
/// children, skipping hidden entries and subdirectories. A missing path
/// yields nothing.
pub fn list_directory<F>(path: &Path, filter: F) -> Vec<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    if !path.is_dir() {
        return if path.exists() && filter(path) {
            vec![path.to_path_buf()]
        } else {
            Vec::new()
        };
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| !is_hidden(p) && p.is_file() && filter(p))
        .collect();

    files.sort();
    files
}

/// List the Matroska files at `path`, sorted.
pub fn list_matroska_files(path: &Path) -> Vec<PathBuf> {
    list_directory(path, is_matroska_file)
}

/// Append `suffix` to the full file name of `path` (`a.mkv` + `.chap.xml`
/// gives `a.mkv.chap.xml`).
pub fn append_to_file_name(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}
