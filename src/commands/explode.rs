//! `mkvkit explode`: split a file into its wanted tracks and chapters.

use anyhow::{Context, Result};
use mkvkit_av::actions::{
    chapters_destination, extract_chapters_command, extract_tracks_command, track_destination,
};
use mkvkit_av::{
    parse_subtitle_families, Error, ExtractionPlan, SelectionPolicy, TrackCategory, TrackSelector,
};
use mkvkit_common::LanguageSpec;
use std::path::{Path, PathBuf};

use mkvkit::config::{Config, ExplodeConfig};
use mkvkit::toolbox::Toolbox;

/// Flags of the `explode` subcommand.
#[derive(Debug, Default)]
pub struct ExplodeArgs {
    pub file: PathBuf,
    pub no_video: bool,
    pub no_audio: bool,
    pub no_subtitles: bool,
    pub no_chapters: bool,
    pub audio_langs: Option<String>,
    pub subtitle_langs: Option<String>,
    pub subtitle_types: Option<String>,
    pub dry_run: bool,
}

/// Build the selection policy from the flags, falling back to the config.
pub fn build_policy(args: &ExplodeArgs, defaults: &ExplodeConfig) -> Result<SelectionPolicy> {
    let categories = [
        (TrackCategory::Video, !args.no_video),
        (TrackCategory::Audio, !args.no_audio),
        (TrackCategory::Subtitle, !args.no_subtitles),
    ]
    .into_iter()
    .filter_map(|(category, wanted)| wanted.then_some(category));

    let audio: LanguageSpec = args
        .audio_langs
        .as_deref()
        .unwrap_or(&defaults.audio_languages)
        .parse()
        .context("Invalid audio languages")?;
    let subtitles: LanguageSpec = args
        .subtitle_langs
        .as_deref()
        .unwrap_or(&defaults.subtitle_languages)
        .parse()
        .context("Invalid subtitle languages")?;
    let codecs = parse_subtitle_families(
        args.subtitle_types
            .as_deref()
            .unwrap_or(&defaults.subtitle_types),
    )
    .context("Invalid subtitle types")?;

    let policy = SelectionPolicy::new()
        .categories(categories)
        .audio_langs(audio.resolve(&defaults.default_audio_languages))
        .subtitle_langs(subtitles.resolve(&defaults.default_subtitle_languages))
        .subtitle_codecs(codecs)
        .chapters(!args.no_chapters);
    policy.validate()?;

    Ok(policy)
}

fn print_plan(source: &Path, plan: &ExtractionPlan) {
    for entry in &plan.entries {
        println!("{} -> {}", entry, track_destination(source, entry).display());
    }
    if plan.extract_chapters {
        println!("chapters -> {}", chapters_destination(source).display());
    }
}

pub fn run(args: ExplodeArgs, config: &Config) -> Result<()> {
    let policy = build_policy(&args, &config.explode)?;
    let toolbox = Toolbox::new(&config.tools).dry_run(args.dry_run);

    let inspector = toolbox.inspector()?;
    let model = toolbox.open(&inspector, &args.file)?;
    if !model.is_valid() {
        return Err(Error::file_not_found(&args.file).into());
    }

    let plan = TrackSelector::default().select(&model, &policy)?;
    print_plan(&args.file, &plan);

    if plan.is_empty() && !plan.extract_chapters {
        println!("Nothing to extract from {}", args.file.display());
        return Ok(());
    }

    let mkvextract = toolbox.mkvextract()?;
    if !plan.is_empty() {
        toolbox.run(extract_tracks_command(&mkvextract, &args.file, &plan)?)?;
    }
    if plan.extract_chapters {
        toolbox.run(extract_chapters_command(&mkvextract, &args.file))?;
    }

    if !args.dry_run {
        tracing::info!(
            "Extracted {} tracks from {}",
            plan.len(),
            args.file.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_from_config_defaults() {
        let policy = build_policy(&ExplodeArgs::default(), &ExplodeConfig::default()).unwrap();
        assert_eq!(policy.audio_languages, vec!["eng", "fre", "jpn"]);
        assert_eq!(policy.subtitle_languages, vec!["eng", "fre", "jpn"]);
        assert_eq!(policy.subtitle_codecs, vec!["substationalpha", "subrip/srt"]);
        assert_eq!(policy.wanted_categories.len(), 3);
        assert!(policy.include_chapters);
    }

    #[test]
    fn test_policy_from_flags() {
        let args = ExplodeArgs {
            no_video: true,
            no_chapters: true,
            audio_langs: Some("jpn".to_string()),
            subtitle_langs: Some("all".to_string()),
            subtitle_types: Some("pgs".to_string()),
            ..ExplodeArgs::default()
        };
        let policy = build_policy(&args, &ExplodeConfig::default()).unwrap();
        assert!(!policy.wants(TrackCategory::Video));
        assert_eq!(policy.audio_languages, vec!["jpn"]);
        assert_eq!(policy.subtitle_languages, vec!["eng", "fre"]);
        assert_eq!(policy.subtitle_codecs, vec!["hdmv pgs"]);
        assert!(!policy.include_chapters);
    }

    #[test]
    fn test_policy_rejects_bad_flags() {
        let defaults = ExplodeConfig::default();
        let bad_lang = ExplodeArgs {
            audio_langs: Some("english".to_string()),
            ..ExplodeArgs::default()
        };
        assert!(build_policy(&bad_lang, &defaults).is_err());

        let nothing = ExplodeArgs {
            no_video: true,
            no_audio: true,
            no_subtitles: true,
            ..ExplodeArgs::default()
        };
        assert!(build_policy(&nothing, &defaults).is_err());
    }
}
