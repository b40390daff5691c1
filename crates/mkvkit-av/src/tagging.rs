//! Track naming and language tagging.
//!
//! Computes the `mkvpropedit` edits that give every track a language and a
//! descriptive name such as `JPN — FLAC 5.1 / 24bits — Original`.

use std::fmt;

use serde::Serialize;

use crate::catalog::TrackCategory;
use crate::container::{ContainerModel, TrackRecord};
use crate::{Error, Result};

/// Separator between the parts of a track name.
const SEP: &str = " — ";

/// User choices for one tagging run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOptions {
    pub video_language: String,
    /// Applied to audio tracks in report order; missing entries become `und`.
    pub audio_languages: Vec<String>,
    pub subtitle_languages: Vec<String>,
    pub video_name: Option<String>,
    pub audio_names: Vec<String>,
    pub subtitle_names: Vec<String>,
    /// Removed from the file stem to form the title.
    pub title_pattern: String,
}

impl Default for TagOptions {
    fn default() -> Self {
        Self {
            video_language: "und".to_string(),
            audio_languages: vec!["jpn".to_string()],
            subtitle_languages: vec!["eng".to_string()],
            video_name: None,
            audio_names: Vec::new(),
            subtitle_names: Vec::new(),
            title_pattern: String::new(),
        }
    }
}

/// Addresses a track the way mkvpropedit does: `v1`, `a2`, `s3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrackAddress {
    pub category: TrackCategory,
    /// 1-based position among tracks of the same category.
    pub position: usize,
}

impl fmt::Display for TrackAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.category {
            TrackCategory::Video => 'v',
            TrackCategory::Audio => 'a',
            TrackCategory::Subtitle => 's',
        };
        write!(f, "{}{}", prefix, self.position)
    }
}

/// Property changes for one track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackEdit {
    pub track: TrackAddress,
    pub language: String,
    pub name: String,
    /// Only set for subtitle tracks.
    pub forced: Option<bool>,
}

/// All edits for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagPlan {
    pub edits: Vec<TrackEdit>,
    pub title: String,
}

/// `2.0` for mono and stereo, `5.1` for six channels.
pub fn channel_layout(channels: u32) -> String {
    if channels <= 2 {
        format!("{}.0", channels)
    } else {
        format!("{}.1", channels - 1)
    }
}

fn nth_or_und(list: &[String], index: usize) -> String {
    list.get(index)
        .map(|l| l.to_lowercase())
        .unwrap_or_else(|| "und".to_string())
}

fn audio_name(track: &TrackRecord, language: &str, extra: Option<&String>) -> String {
    let mut name = format!(
        "{} — {} {}",
        language.to_uppercase(),
        track.codec_key.to_uppercase(),
        channel_layout(track.audio_channels.unwrap_or(0))
    );
    if let Some(bits) = track.audio_bits {
        name.push_str(&format!(" / {}bits", bits));
    }
    if let Some(extra) = extra {
        name.push_str(SEP);
        name.push_str(extra);
    }
    name
}

/// Compute the edits for `model`.
///
/// `video_description` is the codec summary of the video track, usually
/// from [`crate::describe_video`].
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the model is invalid or has no
/// video track.
pub fn plan_tags(
    model: &ContainerModel,
    options: &TagOptions,
    video_description: &str,
) -> Result<TagPlan> {
    if !model.is_valid() {
        return Err(Error::invalid_argument(format!(
            "{} is not a valid container",
            model.path().display()
        )));
    }

    let video = model.tracks_of(TrackCategory::Video).next().ok_or_else(|| {
        Error::invalid_argument(format!("{} has no video track", model.path().display()))
    })?;
    tracing::trace!("Tagging video track {}", video.id);

    let mut edits = Vec::new();

    let video_language = options.video_language.to_lowercase();
    let mut name = format!("{}{}{}", video_language.to_uppercase(), SEP, video_description);
    if let Some(extra) = &options.video_name {
        name.push_str(SEP);
        name.push_str(extra);
    }
    edits.push(TrackEdit {
        track: TrackAddress {
            category: TrackCategory::Video,
            position: 1,
        },
        language: video_language,
        name,
        forced: None,
    });

    for (index, track) in model.tracks_of(TrackCategory::Audio).enumerate() {
        let language = nth_or_und(&options.audio_languages, index);
        edits.push(TrackEdit {
            track: TrackAddress {
                category: TrackCategory::Audio,
                position: index + 1,
            },
            name: audio_name(track, &language, options.audio_names.get(index)),
            language,
            forced: None,
        });
    }

    for (index, _) in model.tracks_of(TrackCategory::Subtitle).enumerate() {
        let language = nth_or_und(&options.subtitle_languages, index);
        let mut name = language.to_uppercase();
        let mut forced = false;
        if let Some(extra) = options.subtitle_names.get(index) {
            forced = extra.to_lowercase().contains("forced");
            name.push_str(SEP);
            name.push_str(extra);
        }
        edits.push(TrackEdit {
            track: TrackAddress {
                category: TrackCategory::Subtitle,
                position: index + 1,
            },
            language,
            name,
            forced: Some(forced),
        });
    }

    let stem = model
        .path()
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let title = if options.title_pattern.is_empty() {
        stem
    } else {
        stem.replace(&options.title_pattern, "")
    };

    Ok(TagPlan { edits, title })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model() -> ContainerModel {
        let doc = json!({
            "file_name": "test.mkv",
            "tracks": [
                {"id": 0, "type": "video", "codec": "AVC/H.264/MPEG-4p10",
                 "properties": {"uid": 1, "forced_track": false, "default_track": true}},
                {"id": 1, "type": "audio", "codec": "FLAC",
                 "properties": {"uid": 2, "forced_track": false, "default_track": true,
                                "audio_channels": 6, "audio_bits_per_sample": 24}},
                {"id": 2, "type": "audio", "codec": "AAC",
                 "properties": {"uid": 3, "forced_track": false, "default_track": false,
                                "audio_channels": 2}},
                {"id": 3, "type": "subtitles", "codec": "SubStationAlpha",
                 "properties": {"uid": 4, "forced_track": false, "default_track": true}},
                {"id": 4, "type": "subtitles", "codec": "SubStationAlpha",
                 "properties": {"uid": 5, "forced_track": false, "default_track": false}}
            ]
        });
        ContainerModel::from_json("/tv/Show - 01 [BD].mkv", &doc.to_string()).unwrap()
    }

    #[test]
    fn test_channel_layout() {
        assert_eq!(channel_layout(1), "1.0");
        assert_eq!(channel_layout(2), "2.0");
        assert_eq!(channel_layout(6), "5.1");
        assert_eq!(channel_layout(8), "7.1");
    }

    #[test]
    fn test_plan_defaults() {
        let plan = plan_tags(&model(), &TagOptions::default(), "AVC High@L4.1 23.976fps").unwrap();
        let selectors: Vec<String> = plan.edits.iter().map(|e| e.track.to_string()).collect();
        assert_eq!(selectors, vec!["v1", "a1", "a2", "s1", "s2"]);

        assert_eq!(plan.edits[0].language, "und");
        assert_eq!(plan.edits[0].name, "UND — AVC High@L4.1 23.976fps");
        assert_eq!(plan.edits[1].name, "JPN — FLAC 5.1 / 24bits");
        assert_eq!(plan.edits[2].language, "und");
        assert_eq!(plan.edits[2].name, "UND — AAC 2.0");
        assert_eq!(plan.edits[3].name, "ENG");
        assert_eq!(plan.edits[3].forced, Some(false));
        assert_eq!(plan.edits[4].language, "und");
        assert_eq!(plan.title, "Show - 01 [BD]");
    }

    #[test]
    fn test_plan_with_names() {
        let options = TagOptions {
            video_name: Some("Remux".to_string()),
            audio_languages: vec!["jpn".to_string(), "eng".to_string()],
            audio_names: vec!["Original".to_string()],
            subtitle_languages: vec!["eng".to_string(), "eng".to_string()],
            subtitle_names: vec!["Full".to_string(), "Signs (Forced)".to_string()],
            title_pattern: " [BD]".to_string(),
            ..TagOptions::default()
        };
        let plan = plan_tags(&model(), &options, "AVC").unwrap();

        assert_eq!(plan.edits[0].name, "UND — AVC — Remux");
        assert_eq!(plan.edits[1].name, "JPN — FLAC 5.1 / 24bits — Original");
        assert_eq!(plan.edits[2].name, "ENG — AAC 2.0");
        assert_eq!(plan.edits[3].name, "ENG — Full");
        assert_eq!(plan.edits[3].forced, Some(false));
        assert_eq!(plan.edits[4].name, "ENG — Signs (Forced)");
        assert_eq!(plan.edits[4].forced, Some(true));
        assert_eq!(plan.title, "Show - 01");
    }

    #[test]
    fn test_plan_requires_video() {
        let doc = json!({
            "file_name": "test.mkv",
            "tracks": [
                {"id": 0, "type": "audio", "codec": "AAC",
                 "properties": {"uid": 1, "forced_track": false, "default_track": true,
                                "audio_channels": 2}}
            ]
        });
        let m = ContainerModel::from_json("a.mkv", &doc.to_string()).unwrap();
        assert!(matches!(
            plan_tags(&m, &TagOptions::default(), ""),
            Err(Error::InvalidArgument(_))
        ));
        assert!(plan_tags(&ContainerModel::invalid("x.mkv"), &TagOptions::default(), "").is_err());
    }
}
