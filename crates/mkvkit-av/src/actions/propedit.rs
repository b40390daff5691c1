//! In-place edits with mkvpropedit.

use std::path::Path;

use crate::attachments::AttachmentClassifier;
use crate::command::ToolCommand;
use crate::container::AttachmentRecord;
use crate::tagging::TagPlan;

fn propedit(mkvpropedit: &Path, source: &Path) -> ToolCommand {
    let mut cmd = ToolCommand::new(mkvpropedit);
    cmd.arg(source.to_string_lossy());
    cmd.accept_warnings();
    cmd
}

/// Delete every attachment of one MIME type.
pub fn delete_attachments_command(mkvpropedit: &Path, source: &Path, mime: &str) -> ToolCommand {
    let mut cmd = propedit(mkvpropedit, source);
    cmd.args(["--delete-attachment".to_string(), format!("mime-type:{}", mime)]);
    cmd
}

/// Rewrite the MIME type of `attachment` from its file extension.
///
/// `None` when the extension gives no MIME type or the attachment already
/// has it.
pub fn fix_attachment_command(
    mkvpropedit: &Path,
    source: &Path,
    attachment: &AttachmentRecord,
) -> Option<ToolCommand> {
    let mime = AttachmentClassifier::repair_mime_type(&attachment.file_name)?;
    if attachment.content_type == mime {
        return None;
    }

    let mut cmd = propedit(mkvpropedit, source);
    cmd.args(["--attachment-mime-type", mime]);
    cmd.args(["--update-attachment".to_string(), attachment.id.to_string()]);
    Some(cmd)
}

/// Attach `file`, with a MIME type when its extension gives one.
pub fn add_attachment_command(mkvpropedit: &Path, source: &Path, file: &Path) -> ToolCommand {
    let mut cmd = propedit(mkvpropedit, source);
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    if let Some(mime) = AttachmentClassifier::repair_mime_type(&name) {
        cmd.args(["--attachment-mime-type", mime]);
    }
    cmd.arg("--add-attachment");
    cmd.arg(file.to_string_lossy());
    cmd
}

/// Replace the chapters of `source` with an XML chapter file.
pub fn chapters_command(mkvpropedit: &Path, source: &Path, chapters: &Path) -> ToolCommand {
    let mut cmd = propedit(mkvpropedit, source);
    cmd.arg("--chapters");
    cmd.arg(chapters.to_string_lossy());
    cmd
}

/// Apply the language, name and forced edits of `plan`, then the title.
pub fn tag_command(mkvpropedit: &Path, source: &Path, plan: &TagPlan) -> ToolCommand {
    let mut cmd = propedit(mkvpropedit, source);
    for edit in &plan.edits {
        cmd.args(["--edit".to_string(), format!("track:{}", edit.track)]);
        cmd.args(["--set".to_string(), format!("language={}", edit.language)]);
        cmd.args(["--set".to_string(), format!("name={}", edit.name)]);
        if let Some(forced) = edit.forced {
            cmd.args(["--set".to_string(), format!("flag-forced={}", u8::from(forced))]);
        }
    }
    cmd.args(["--edit", "info"]);
    cmd.args(["--set".to_string(), format!("title={}", plan.title)]);
    cmd
}
