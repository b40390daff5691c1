//! `mkvkit chapters`: list files without chapters, or add chapter files.

use anyhow::Result;
use mkvkit_av::actions::chapters_command;
use mkvkit_common::paths::{list_directory, list_matroska_files};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::matroska_inputs;
use mkvkit::batch::run_batch;
use mkvkit::config::Config;
use mkvkit::toolbox::Toolbox;

pub fn check(input: &Path, config: &Config) -> Result<()> {
    let files = matroska_inputs(input)?;
    let toolbox = Toolbox::new(&config.tools);
    let inspector = toolbox.inspector()?;

    let outcome = run_batch(&files, config.worker_count(), |file| {
        Ok(toolbox.open(&inspector, file)?.is_chaptered())
    })?;

    for (file, chaptered) in &outcome.succeeded {
        if !chaptered {
            println!("{}", file.display());
        }
    }
    for (file, _) in &outcome.failed {
        println!("ERROR PARSING :::: {}", file.display());
    }

    outcome.into_result().map(|_| ())
}

fn is_chapter_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
}

/// Pair the sorted chapter files of `dir` with its sorted Matroska files.
///
/// Fails unless both lists have the same length.
pub fn pair_chapter_files(dir: &Path) -> Result<Vec<(PathBuf, PathBuf)>> {
    if !dir.is_dir() {
        anyhow::bail!("Not a directory: {:?}", dir);
    }

    let chapters = list_directory(dir, is_chapter_file);
    let videos = list_matroska_files(dir);
    if chapters.len() != videos.len() {
        anyhow::bail!(
            "{} chapter files and {} video files in {:?}",
            chapters.len(),
            videos.len(),
            dir
        );
    }
    if videos.is_empty() {
        anyhow::bail!("No Matroska files in {:?}", dir);
    }

    Ok(videos.into_iter().zip(chapters).collect())
}

/// Write each chapter file of `dir` into the Matroska file at the same position.
pub fn add(dir: &Path, dry_run: bool, config: &Config) -> Result<()> {
    let pairs = pair_chapter_files(dir)?;
    let toolbox = Toolbox::new(&config.tools).dry_run(dry_run);
    let mkvpropedit = toolbox.mkvpropedit()?;

    let chapters: HashMap<&Path, &Path> = pairs
        .iter()
        .map(|(video, xml)| (video.as_path(), xml.as_path()))
        .collect();
    let videos: Vec<PathBuf> = pairs.iter().map(|(video, _)| video.clone()).collect();

    let outcome = run_batch(&videos, config.worker_count(), |video| {
        let xml = chapters
            .get(video)
            .ok_or_else(|| anyhow::anyhow!("No chapter file for {:?}", video))?;
        toolbox.run(chapters_command(&mkvpropedit, video, xml))
    })?;

    for (video, _) in &outcome.succeeded {
        tracing::info!("{}: chapters replaced", video.display());
    }
    outcome.into_result().map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_pair_chapter_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.mkv", "a.mkv", "02.xml", "01.XML", "notes.txt"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }

        let pairs = pair_chapter_files(dir.path()).unwrap();
        assert_eq!(
            pairs,
            vec![
                (dir.path().join("a.mkv"), dir.path().join("01.XML")),
                (dir.path().join("b.mkv"), dir.path().join("02.xml")),
            ]
        );
    }

    #[test]
    fn test_pair_chapter_files_count_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.mkv", "b.mkv", "a.xml"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }

        let err = pair_chapter_files(dir.path()).unwrap_err();
        assert!(err.to_string().contains("1 chapter files and 2 video files"), "{err}");
    }

    #[test]
    fn test_pair_chapter_files_needs_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.mkv");
        fs::write(&file, b"").unwrap();
        assert!(pair_chapter_files(&file).is_err());
        assert!(pair_chapter_files(dir.path()).is_err());
    }
}
