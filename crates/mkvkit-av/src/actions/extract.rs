//! Extraction with mkvextract.

use std::path::{Path, PathBuf};

use mkvkit_common::paths::append_to_file_name;

use crate::command::ToolCommand;
use crate::container::AttachmentRecord;
use crate::select::{ExtractionPlan, PlanEntry};
use crate::{Error, Result};

/// Output path of one plan entry: `<source>.<id>.<suffix>.<ext>`.
pub fn track_destination(source: &Path, entry: &PlanEntry) -> PathBuf {
    append_to_file_name(source, &format!(".{}", entry.file_suffix()))
}

/// Output path of the chapter list: `<source>.chap.xml`.
pub fn chapters_destination(source: &Path) -> PathBuf {
    append_to_file_name(source, ".chap.xml")
}

/// Extract every track of `plan` in a single mkvextract run.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the plan has no track entry.
pub fn extract_tracks_command(
    mkvextract: &Path,
    source: &Path,
    plan: &ExtractionPlan,
) -> Result<ToolCommand> {
    if plan.is_empty() {
        return Err(Error::invalid_argument("extraction plan has no track"));
    }

    let mut cmd = ToolCommand::new(mkvextract);
    cmd.arg(source.to_string_lossy());
    cmd.arg("tracks");
    for entry in &plan.entries {
        let dest = track_destination(source, entry);
        cmd.arg(format!("{}:{}", entry.track_id, dest.to_string_lossy()));
    }
    cmd.accept_warnings();

    Ok(cmd)
}

/// Extract the chapter list as XML.
pub fn extract_chapters_command(mkvextract: &Path, source: &Path) -> ToolCommand {
    let mut cmd = ToolCommand::new(mkvextract);
    cmd.arg(source.to_string_lossy());
    cmd.arg("chapters");
    cmd.arg(chapters_destination(source).to_string_lossy());
    cmd.accept_warnings();
    cmd
}

/// Extract attachments into `out_dir`, each under its lower-cased file name.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `attachments` is empty.
pub fn extract_attachments_command(
    mkvextract: &Path,
    source: &Path,
    attachments: &[&AttachmentRecord],
    out_dir: &Path,
) -> Result<ToolCommand> {
    if attachments.is_empty() {
        return Err(Error::invalid_argument("no attachment to extract"));
    }

    let mut cmd = ToolCommand::new(mkvextract);
    cmd.arg(source.to_string_lossy());
    cmd.arg("attachments");
    for attachment in attachments {
        let dest = out_dir.join(attachment.file_name.to_lowercase());
        cmd.arg(format!("{}:{}", attachment.id, dest.to_string_lossy()));
    }
    cmd.accept_warnings();

    Ok(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TrackCategory;
    use crate::select::OutputSuffix;

    fn entry(id: u32, category: TrackCategory, suffix: OutputSuffix, ext: &str) -> PlanEntry {
        PlanEntry {
            track_id: id,
            category,
            suffix,
            extension: ext.to_string(),
        }
    }

    #[test]
    fn test_extract_tracks_command() {
        let plan = ExtractionPlan {
            entries: vec![
                entry(0, TrackCategory::Video, OutputSuffix::Video, "265"),
                entry(
                    4,
                    TrackCategory::Subtitle,
                    OutputSuffix::Language {
                        code: "fre".to_string(),
                        forced: true,
                    },
                    "ass",
                ),
            ],
            extract_chapters: false,
        };
        let cmd = extract_tracks_command(
            Path::new("/usr/bin/mkvextract"),
            Path::new("/media/ep.mkv"),
            &plan,
        )
        .unwrap();

        assert_eq!(cmd.program(), Path::new("/usr/bin/mkvextract"));
        assert_eq!(
            cmd.get_args(),
            &[
                "/media/ep.mkv",
                "tracks",
                "0:/media/ep.mkv.0.video.265",
                "4:/media/ep.mkv.4.fre-forced.ass",
            ]
        );
    }

    #[test]
    fn test_empty_plan_rejected() {
        let plan = ExtractionPlan::default();
        assert!(extract_tracks_command(Path::new("mkvextract"), Path::new("a.mkv"), &plan).is_err());
    }

    #[test]
    fn test_extract_chapters_command() {
        let cmd = extract_chapters_command(Path::new("mkvextract"), Path::new("a.mkv"));
        assert_eq!(cmd.get_args(), &["a.mkv", "chapters", "a.mkv.chap.xml"]);
    }

    #[test]
    fn test_extract_attachments_lowercases_names() {
        let font = AttachmentRecord {
            id: 3,
            uid: 30,
            file_name: "Arial Bold.TTF".to_string(),
            content_type: "application/x-truetype-font".to_string(),
        };
        let cmd = extract_attachments_command(
            Path::new("mkvextract"),
            Path::new("a.mkv"),
            &[&font],
            Path::new("/tmp/fonts"),
        )
        .unwrap();
        assert_eq!(
            cmd.get_args(),
            &["a.mkv", "attachments", "3:/tmp/fonts/arial bold.ttf"]
        );
    }
}
