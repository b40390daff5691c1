//! `mkvkit attachments`: extract, delete, fix and add attachments.

use anyhow::{Context, Result};
use mkvkit_av::actions::{
    add_attachment_command, delete_attachments_command, extract_attachments_command,
    fix_attachment_command,
};
use mkvkit_av::{parse_attachment_kinds, AttachmentClassifier, AttachmentRecord};
use mkvkit_common::paths::list_directory;
use std::collections::HashSet;
use std::path::Path;

use super::matroska_inputs;
use mkvkit::batch::run_batch;
use mkvkit::config::Config;
use mkvkit::toolbox::Toolbox;

/// Extract matching attachments of every input into `output`.
///
/// Files are handled in order and a file name (case-insensitive) is only
/// extracted the first time it is seen.
pub fn extract(input: &Path, kinds: &str, output: &Path, dry_run: bool, config: &Config) -> Result<()> {
    let wanted = parse_attachment_kinds(kinds)?;
    let files = matroska_inputs(input)?;
    let toolbox = Toolbox::new(&config.tools).dry_run(dry_run);
    let inspector = toolbox.inspector()?;
    let mkvextract = toolbox.mkvextract()?;

    if !dry_run {
        std::fs::create_dir_all(output)
            .with_context(|| format!("Failed to create output directory {:?}", output))?;
    }

    let mut extracted: HashSet<String> = HashSet::new();
    let mut failed = 0usize;

    for file in &files {
        let result = (|| -> Result<usize> {
            let model = toolbox.open(&inspector, file)?;
            let fresh: Vec<&AttachmentRecord> =
                AttachmentClassifier::filter(model.attachments(), &wanted)
                    .into_iter()
                    .filter(|a| extracted.insert(a.file_name.to_lowercase()))
                    .collect();
            if fresh.is_empty() {
                return Ok(0);
            }
            toolbox.run(extract_attachments_command(&mkvextract, file, &fresh, output)?)?;
            Ok(fresh.len())
        })();

        match result {
            Ok(0) => tracing::debug!("{}: nothing new to extract", file.display()),
            Ok(n) => tracing::info!("{}: extracted {} attachments", file.display(), n),
            Err(e) => {
                tracing::warn!("{}: {:#}", file.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} files failed", failed, files.len());
    }
    Ok(())
}

/// Delete attachments of the given kinds, one call per matching MIME type.
pub fn delete(input: &Path, kinds: &str, dry_run: bool, config: &Config) -> Result<()> {
    let wanted = parse_attachment_kinds(kinds)?;
    let files = matroska_inputs(input)?;
    let toolbox = Toolbox::new(&config.tools).dry_run(dry_run);
    let inspector = toolbox.inspector()?;
    let mkvpropedit = toolbox.mkvpropedit()?;

    let outcome = run_batch(&files, config.worker_count(), |file| {
        let model = toolbox.open(&inspector, file)?;
        let mut mime_types: Vec<&str> = Vec::new();
        for attachment in AttachmentClassifier::filter(model.attachments(), &wanted) {
            if !mime_types.contains(&attachment.content_type.as_str()) {
                mime_types.push(&attachment.content_type);
            }
        }
        for mime in &mime_types {
            toolbox.run(delete_attachments_command(&mkvpropedit, file, mime))?;
        }
        Ok(mime_types.len())
    })?;

    for (file, count) in &outcome.succeeded {
        if *count > 0 {
            tracing::info!("{}: deleted {} attachment types", file.display(), count);
        }
    }
    outcome.into_result().map(|_| ())
}

/// Repair attachment MIME types from their file extensions.
pub fn fix(input: &Path, dry_run: bool, config: &Config) -> Result<()> {
    let files = matroska_inputs(input)?;
    let toolbox = Toolbox::new(&config.tools).dry_run(dry_run);
    let inspector = toolbox.inspector()?;
    let mkvpropedit = toolbox.mkvpropedit()?;

    let outcome = run_batch(&files, config.worker_count(), |file| {
        let model = toolbox.open(&inspector, file)?;
        let mut fixed = 0usize;
        for attachment in model.attachments() {
            if let Some(cmd) = fix_attachment_command(&mkvpropedit, file, attachment) {
                toolbox.run(cmd)?;
                fixed += 1;
            }
        }
        Ok(fixed)
    })?;

    for (file, count) in &outcome.succeeded {
        if *count > 0 {
            tracing::info!("{}: fixed {} attachments", file.display(), count);
        }
    }
    outcome.into_result().map(|_| ())
}

/// Attach every file found at `attachments` to every input.
pub fn add(attachments: &Path, input: &Path, dry_run: bool, config: &Config) -> Result<()> {
    if !attachments.exists() {
        anyhow::bail!("Attachment path does not exist: {:?}", attachments);
    }
    let to_add = list_directory(attachments, |_| true);
    if to_add.is_empty() {
        anyhow::bail!("No files to attach in {:?}", attachments);
    }

    let files = matroska_inputs(input)?;
    let toolbox = Toolbox::new(&config.tools).dry_run(dry_run);
    let mkvpropedit = toolbox.mkvpropedit()?;

    let outcome = run_batch(&files, config.worker_count(), |file| {
        for attachment in &to_add {
            toolbox.run(add_attachment_command(&mkvpropedit, file, attachment))?;
        }
        Ok(())
    })?;

    tracing::info!(
        "Added {} attachments to {} files",
        to_add.len(),
        outcome.succeeded.len()
    );
    outcome.into_result().map(|_| ())
}
