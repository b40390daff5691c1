//! Subcommand handlers.

pub mod attachments;
pub mod chapters;
pub mod explode;
pub mod inspect;
pub mod tag;
pub mod tools;

use anyhow::Result;
use mkvkit_common::lang::is_language_code;
use mkvkit_common::paths::list_matroska_files;
use std::path::{Path, PathBuf};

/// Files a command runs on: the file itself, or the Matroska files of a
/// directory.
pub fn matroska_inputs(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        anyhow::bail!("Input does not exist: {:?}", path);
    }
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let files = list_matroska_files(path);
    if files.is_empty() {
        anyhow::bail!("No Matroska files in {:?}", path);
    }
    tracing::debug!("{} Matroska files in {:?}", files.len(), path);
    Ok(files)
}

/// Split a comma separated list, trimming items and dropping empty ones.
pub fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|i| !i.is_empty())
        .map(String::from)
        .collect()
}

/// Like [`split_list`] but every item must be a language code. Repeats are
/// kept since positions map to tracks.
pub fn split_languages(s: &str) -> Result<Vec<String>> {
    let codes = split_list(s);
    if let Some(bad) = codes.iter().find(|c| !is_language_code(c)) {
        anyhow::bail!("'{}' is not a three letter language code", bad);
    }
    Ok(codes.into_iter().map(|c| c.to_lowercase()).collect())
}
