//! Schema of the `mkvmerge -J` identification document.
//!
//! Only the fields the model needs are declared. Required fields are plain
//! types so serde reports them as missing; optional ones are `Option`.
//! Records are decoded one at a time so an error names the offending track
//! or attachment.

use serde::Deserialize;
use serde_json::Value;

use super::{AttachmentRecord, TrackRecord};
use crate::catalog::TrackCategory;
use crate::{Error, Result};

const TOOL: &str = "mkvmerge";

#[derive(Debug, Deserialize)]
pub(crate) struct IdentifyDocument {
    pub file_name: String,
    #[serde(default)]
    pub chapters: Option<Vec<Value>>,
    pub tracks: Vec<Value>,
    #[serde(default)]
    pub attachments: Option<Vec<Value>>,
}

/// Status fields, checked before the document itself so that mkvmerge's
/// own diagnosis wins over a missing-field error.
#[derive(Debug, Deserialize)]
struct RawStatus {
    #[serde(default)]
    errors: Vec<String>,
    #[serde(default)]
    container: Option<RawContainer>,
}

#[derive(Debug, Deserialize)]
struct RawContainer {
    #[serde(default = "default_recognized")]
    recognized: bool,
}

fn default_recognized() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct RawTrack {
    id: u32,
    #[serde(rename = "type")]
    track_type: String,
    codec: String,
    properties: RawTrackProperties,
}

#[derive(Debug, Deserialize)]
struct RawTrackProperties {
    uid: u64,
    track_name: Option<String>,
    forced_track: bool,
    default_track: bool,
    language: Option<String>,
    audio_channels: Option<u32>,
    audio_bits_per_sample: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawAttachment {
    id: u32,
    file_name: String,
    content_type: Option<String>,
    properties: RawAttachmentProperties,
}

#[derive(Debug, Deserialize)]
struct RawAttachmentProperties {
    uid: u64,
}

impl IdentifyDocument {
    pub fn parse(json: &str) -> Result<Self> {
        let invalid =
            |e: serde_json::Error| Error::parse_error(TOOL, format!("invalid document: {}", e));
        let value: Value = serde_json::from_str(json).map_err(invalid)?;

        let status = RawStatus::deserialize(&value).map_err(invalid)?;
        if !status.errors.is_empty() {
            return Err(Error::parse_error(TOOL, status.errors.join("; ")));
        }
        if status.container.as_ref().is_some_and(|c| !c.recognized) {
            return Err(Error::parse_error(TOOL, "container not recognized"));
        }

        IdentifyDocument::deserialize(&value).map_err(invalid)
    }

    /// True iff a non-empty chapter list was reported.
    pub fn is_chaptered(&self) -> bool {
        self.chapters.as_ref().is_some_and(|c| !c.is_empty())
    }

    pub fn tracks(&self) -> Result<Vec<TrackRecord>> {
        self.tracks
            .iter()
            .enumerate()
            .map(|(index, value)| decode_track(index, value))
            .collect()
    }

    pub fn attachments(&self) -> Result<Vec<AttachmentRecord>> {
        self.attachments
            .iter()
            .flatten()
            .enumerate()
            .map(|(index, value)| decode_attachment(index, value))
            .collect()
    }
}

fn decode_track(index: usize, value: &Value) -> Result<TrackRecord> {
    let raw = RawTrack::deserialize(value)
        .map_err(|e| Error::parse_error(TOOL, format!("track #{}: {}", index, e)))?;

    let category = TrackCategory::from_mkvmerge(&raw.track_type).ok_or_else(|| {
        Error::parse_error(
            TOOL,
            format!("track {}: unsupported type '{}'", raw.id, raw.track_type),
        )
    })?;

    let props = raw.properties;
    if category == TrackCategory::Audio && props.audio_channels.is_none() {
        return Err(Error::parse_error(
            TOOL,
            format!("track {}: audio track without audio_channels", raw.id),
        ));
    }

    let name = props.track_name.unwrap_or_default();
    // A name mentioning "forced" marks the track forced even if the flag is off
    let forced = props.forced_track || name.to_lowercase().contains("forced");

    Ok(TrackRecord {
        id: raw.id,
        uid: props.uid,
        category,
        codec_key: raw.codec.to_lowercase(),
        language: props.language.map(|l| l.to_lowercase()),
        name,
        forced,
        default: props.default_track,
        audio_channels: match category {
            TrackCategory::Audio => props.audio_channels,
            _ => None,
        },
        audio_bits: match category {
            TrackCategory::Audio => props.audio_bits_per_sample,
            _ => None,
        },
    })
}

fn decode_attachment(index: usize, value: &Value) -> Result<AttachmentRecord> {
    let raw = RawAttachment::deserialize(value)
        .map_err(|e| Error::parse_error(TOOL, format!("attachment #{}: {}", index, e)))?;

    Ok(AttachmentRecord {
        id: raw.id,
        uid: raw.properties.uid,
        file_name: raw.file_name,
        content_type: raw.content_type.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn track(value: Value) -> Result<TrackRecord> {
        decode_track(0, &value)
    }

    #[test]
    fn test_decode_audio_track() {
        let t = track(json!({
            "id": 1, "type": "audio", "codec": "DTS-HD Master Audio",
            "properties": {
                "uid": 42, "forced_track": false, "default_track": true,
                "language": "ENG", "audio_channels": 8, "audio_bits_per_sample": 24
            }
        }))
        .unwrap();

        assert_eq!(t.category, TrackCategory::Audio);
        assert_eq!(t.codec_key, "dts-hd master audio");
        assert_eq!(t.language.as_deref(), Some("eng"));
        assert_eq!(t.name, "");
        assert_eq!(t.audio_channels, Some(8));
        assert_eq!(t.audio_bits, Some(24));
        assert!(t.default);
        assert!(!t.forced);
    }

    #[test]
    fn test_forced_inferred_from_name() {
        let t = track(json!({
            "id": 3, "type": "subtitles", "codec": "SubStationAlpha",
            "properties": {
                "uid": 7, "forced_track": false, "default_track": false,
                "language": "eng", "track_name": "Signs (Forced)"
            }
        }))
        .unwrap();
        assert!(t.forced);
    }

    #[test]
    fn test_missing_required_field() {
        let err = track(json!({
            "id": 0, "type": "video", "codec": "AVC/H.264/MPEG-4p10",
            "properties": { "forced_track": false, "default_track": true }
        }))
        .unwrap_err();
        assert!(matches!(err, Error::ParseError { .. }));
        assert!(err.to_string().contains("uid"), "{err}");
    }

    #[test]
    fn test_audio_without_channels_is_rejected() {
        let err = track(json!({
            "id": 1, "type": "audio", "codec": "AAC",
            "properties": { "uid": 1, "forced_track": false, "default_track": true }
        }))
        .unwrap_err();
        assert!(err.to_string().contains("audio_channels"));
    }

    #[test]
    fn test_unknown_track_type_is_rejected() {
        let err = track(json!({
            "id": 5, "type": "buttons", "codec": "HDMV IG",
            "properties": { "uid": 1, "forced_track": false, "default_track": false }
        }))
        .unwrap_err();
        assert!(err.to_string().contains("buttons"));
    }

    #[test]
    fn test_attachment_without_content_type() {
        let a = decode_attachment(
            0,
            &json!({ "id": 1, "file_name": "cover.jpg", "properties": { "uid": 9 } }),
        )
        .unwrap();
        assert_eq!(a.content_type, "");
        assert_eq!(a.uid, 9);
    }

    #[test]
    fn test_document_errors_fail() {
        let err = IdentifyDocument::parse(
            r#"{"errors": ["The file could not be opened"], "tracks": []}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("could not be opened"));

        let err = IdentifyDocument::parse(r#"{"container": {"recognized": false}}"#).unwrap_err();
        assert!(err.to_string().contains("not recognized"));

        assert!(IdentifyDocument::parse("not json").is_err());
    }

    #[test]
    fn test_chapters_flag() {
        let doc = IdentifyDocument::parse(r#"{"file_name": "a.mkv", "chapters": [], "tracks": []}"#)
            .unwrap();
        assert!(!doc.is_chaptered());
        let doc =
            IdentifyDocument::parse(r#"{"file_name": "a.mkv", "chapters": null, "tracks": []}"#)
                .unwrap();
        assert!(!doc.is_chaptered());
        let doc = IdentifyDocument::parse(
            r#"{"file_name": "a.mkv", "chapters": [{"num_entries": 12}], "tracks": []}"#,
        )
        .unwrap();
        assert!(doc.is_chaptered());
    }

    #[test]
    fn test_document_without_tracks_fails() {
        let err = IdentifyDocument::parse(r#"{"file_name": "a.mkv", "attachments": []}"#)
            .unwrap_err();
        assert!(matches!(err, Error::ParseError { .. }));
        assert!(err.to_string().contains("tracks"), "{err}");

        let err = IdentifyDocument::parse(r#"{"tracks": []}"#).unwrap_err();
        assert!(err.to_string().contains("file_name"), "{err}");

        assert!(matches!(
            IdentifyDocument::parse("{}"),
            Err(Error::ParseError { .. })
        ));
    }
}
