//! `mkvkit tag`: name and tag the tracks of every input.

use anyhow::Result;
use mkvkit_av::actions::tag_command;
use mkvkit_av::{describe_video, plan_tags, TagOptions};
use std::path::Path;

use super::{matroska_inputs, split_languages, split_list};
use mkvkit::batch::run_batch;
use mkvkit::config::Config;
use mkvkit::toolbox::Toolbox;

/// Flags of the `tag` subcommand.
#[derive(Debug)]
pub struct TagArgs {
    pub video_name: Option<String>,
    pub audio_names: Option<String>,
    pub sub_names: Option<String>,
    pub video_lang: String,
    pub audio_langs: String,
    pub sub_langs: String,
    pub replace: String,
    pub dry_run: bool,
}

impl TagArgs {
    pub fn options(&self) -> Result<TagOptions> {
        let mut video = split_languages(&self.video_lang)?;
        if video.len() != 1 {
            anyhow::bail!("Expected one video language, got '{}'", self.video_lang);
        }

        Ok(TagOptions {
            video_language: video.remove(0),
            audio_languages: split_languages(&self.audio_langs)?,
            subtitle_languages: split_languages(&self.sub_langs)?,
            video_name: self.video_name.clone(),
            audio_names: self.audio_names.as_deref().map(split_list).unwrap_or_default(),
            subtitle_names: self.sub_names.as_deref().map(split_list).unwrap_or_default(),
            title_pattern: self.replace.clone(),
        })
    }
}

pub fn run(input: &Path, args: &TagArgs, config: &Config) -> Result<()> {
    let options = args.options()?;
    let files = matroska_inputs(input)?;
    let toolbox = Toolbox::new(&config.tools).dry_run(args.dry_run);
    let inspector = toolbox.inspector()?;
    let mkvpropedit = toolbox.mkvpropedit()?;
    let mediainfo = toolbox.mediainfo()?;

    let outcome = run_batch(&files, config.worker_count(), |file| {
        let model = toolbox.open(&inspector, file)?;
        let description = match describe_video(&mediainfo, file) {
            Ok(description) => description,
            Err(e) if toolbox.is_dry_run() => {
                tracing::warn!("{}: {}", file.display(), e);
                String::new()
            }
            Err(e) => return Err(e.into()),
        };

        let plan = plan_tags(&model, &options, &description)?;
        toolbox.run(tag_command(&mkvpropedit, file, &plan))?;
        Ok(plan.edits.len())
    })?;

    for (file, edits) in &outcome.succeeded {
        tracing::info!("{}: tagged {} tracks", file.display(), edits);
    }
    outcome.into_result().map(|_| ())
}
