//! Codec catalog.
//!
//! Maps the codec names reported by `mkvmerge -J` (lower-cased) to a track
//! category, the file extension used when the track is extracted, and for
//! audio codecs a quality rank. Ranks are hand-assigned, higher means better
//! fidelity. Codecs sharing a rank are told apart by a tier, so `(rank, tier)`
//! is a strict order.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Kind of elementary stream inside a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackCategory {
    Video,
    Audio,
    #[serde(rename = "subtitles")]
    Subtitle,
}

impl TrackCategory {
    /// All categories, in the order mkvmerge usually reports them.
    pub const ALL: [TrackCategory; 3] = [
        TrackCategory::Video,
        TrackCategory::Audio,
        TrackCategory::Subtitle,
    ];

    /// Parse the `type` field of an mkvmerge track record.
    pub fn from_mkvmerge(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "video" => Some(TrackCategory::Video),
            "audio" => Some(TrackCategory::Audio),
            "subtitles" => Some(TrackCategory::Subtitle),
            _ => None,
        }
    }
}

impl fmt::Display for TrackCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackCategory::Video => write!(f, "video"),
            TrackCategory::Audio => write!(f, "audio"),
            TrackCategory::Subtitle => write!(f, "subtitles"),
        }
    }
}

/// Subtitle format names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubtitleFamily {
    Ass,
    Mks,
    Pgs,
    Srt,
    Vobsub,
}

impl SubtitleFamily {
    /// The families the `all` keyword expands to.
    pub const ALL: [SubtitleFamily; 4] = [
        SubtitleFamily::Ass,
        SubtitleFamily::Pgs,
        SubtitleFamily::Srt,
        SubtitleFamily::Vobsub,
    ];

    /// Codec key mkvmerge reports for this family.
    pub fn codec_key(&self) -> &'static str {
        match self {
            // mkvmerge names SSA, ASS and MKS-embedded styles the same way
            SubtitleFamily::Ass | SubtitleFamily::Mks => "substationalpha",
            SubtitleFamily::Pgs => "hdmv pgs",
            SubtitleFamily::Srt => "subrip/srt",
            SubtitleFamily::Vobsub => "vobsub",
        }
    }
}

impl FromStr for SubtitleFamily {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ass" | "ssa" => Ok(SubtitleFamily::Ass),
            "mks" => Ok(SubtitleFamily::Mks),
            "pgs" | "sup" => Ok(SubtitleFamily::Pgs),
            "srt" => Ok(SubtitleFamily::Srt),
            "vobsub" => Ok(SubtitleFamily::Vobsub),
            other => Err(Error::invalid_argument(format!(
                "unknown subtitle type: {}",
                other
            ))),
        }
    }
}

/// Parse a comma separated list of subtitle families into codec keys.
///
/// `all` expands to [`SubtitleFamily::ALL`]. Duplicates collapse.
pub fn parse_subtitle_families(s: &str) -> Result<Vec<String>> {
    let families: Vec<SubtitleFamily> = if s.trim().eq_ignore_ascii_case("all") {
        SubtitleFamily::ALL.to_vec()
    } else {
        s.split(',')
            .map(str::trim)
            .filter(|i| !i.is_empty())
            .map(SubtitleFamily::from_str)
            .collect::<Result<_>>()?
    };

    let mut keys: Vec<String> = Vec::new();
    for family in families {
        let key = family.codec_key().to_string();
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    Ok(keys)
}

/// One catalog row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecEntry {
    pub category: TrackCategory,
    /// Extension without the leading dot (`hdma.dts`, `264`, `srt`).
    pub extension: String,
    /// Quality rank, audio codecs only.
    pub audio_score: Option<u32>,
    /// Order among audio codecs sharing a rank.
    pub audio_tier: u8,
}

/// Immutable lookup table from codec key to [`CodecEntry`].
///
/// [`CodecCatalog::standard`] covers every codec mkvmerge reports for the
/// formats this toolbox handles. Tests build smaller catalogs with the
/// `with_*` builders.
#[derive(Debug, Clone, Default)]
pub struct CodecCatalog {
    entries: HashMap<String, CodecEntry>,
}

impl CodecCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide catalog of known mkvmerge codec names.
    pub fn standard() -> &'static CodecCatalog {
        static STANDARD: OnceLock<CodecCatalog> = OnceLock::new();
        STANDARD.get_or_init(|| {
            CodecCatalog::new()
                // video
                .with_video("mpeg-1/2", "mpeg2")
                .with_video("mpeg-4p2", "mpeg4")
                .with_video("mpeg-4p10/avc/h.264", "264")
                .with_video("avc/h.264/mpeg-4p10", "264")
                .with_video("mpeg-h/hevc/h.265", "265")
                .with_video("hevc/h.265/mpeg-h", "265")
                .with_video("vc-1", "vc1")
                .with_video("av1", "av1")
                .with_video("vp8", "ivf")
                .with_video("vp9", "ivf")
                // audio: rank, then tier among codecs sharing a rank
                .with_audio("mp2", "mp2", 1)
                .with_audio("mp3", "mp3", 2)
                .with_audio("vorbis", "ogg", 3)
                .with_audio_tier("wavpack4", "wv", 3, 1)
                .with_audio("opus", "opus", 4)
                .with_audio("aac", "aac", 5)
                .with_audio("ac-3", "ac3", 6)
                .with_audio_tier("ac-3 dolby surround ex", "ac3", 6, 1)
                .with_audio("e-ac-3", "eac3", 7)
                .with_audio("a_ms/acm", "wav", 8)
                .with_audio("dts", "dts", 9)
                .with_audio("dts-es", "es.dts", 10)
                .with_audio("alac", "m4a", 11)
                .with_audio("flac", "flac", 12)
                .with_audio("dts-hd high resolution audio", "hra.dts", 13)
                .with_audio("dts-hd master audio", "hdma.dts", 14)
                .with_audio("truehd", "thd", 15)
                .with_audio("truehd atmos", "thd", 16)
                // subtitles
                .with_subtitle("substationalpha", "ass")
                .with_subtitle("hdmv pgs", "sup")
                .with_subtitle("subrip/srt", "srt")
                .with_subtitle("vobsub", "vobsub")
        })
    }

    /// Add a video codec.
    pub fn with_video(self, key: &str, extension: &str) -> Self {
        self.with_entry(key, TrackCategory::Video, extension, None, 0)
    }

    /// Add an audio codec with its quality rank.
    pub fn with_audio(self, key: &str, extension: &str, score: u32) -> Self {
        self.with_audio_tier(key, extension, score, 0)
    }

    /// Add an audio codec that shares its rank with another one.
    pub fn with_audio_tier(self, key: &str, extension: &str, score: u32, tier: u8) -> Self {
        self.with_entry(key, TrackCategory::Audio, extension, Some(score), tier)
    }

    /// Add a subtitle codec.
    pub fn with_subtitle(self, key: &str, extension: &str) -> Self {
        self.with_entry(key, TrackCategory::Subtitle, extension, None, 0)
    }

    fn with_entry(
        mut self,
        key: &str,
        category: TrackCategory,
        extension: &str,
        audio_score: Option<u32>,
        audio_tier: u8,
    ) -> Self {
        self.entries.insert(
            key.to_lowercase(),
            CodecEntry {
                category,
                extension: extension.to_string(),
                audio_score,
                audio_tier,
            },
        );
        self
    }

    /// Look up a codec key (case-insensitive).
    ///
    /// `None` means the codec is unknown and tracks using it must not be
    /// extracted; callers treat it as a skip, not an error.
    pub fn classify(&self, codec_key: &str) -> Option<&CodecEntry> {
        self.entries.get(&codec_key.to_lowercase())
    }

    /// Output extension for a codec key, if known.
    pub fn extension(&self, codec_key: &str) -> Option<&str> {
        self.classify(codec_key).map(|e| e.extension.as_str())
    }

    /// Quality rank of an audio codec.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the key is unknown or not an
    /// audio codec.
    pub fn audio_score(&self, codec_key: &str) -> Result<u32> {
        self.audio_rank(codec_key).map(|(score, _)| score)
    }

    /// Rank and tier of an audio codec; ordering these pairs is strict.
    ///
    /// # Errors
    ///
    /// Same as [`CodecCatalog::audio_score`].
    pub fn audio_rank(&self, codec_key: &str) -> Result<(u32, u8)> {
        match self.classify(codec_key) {
            Some(CodecEntry {
                category: TrackCategory::Audio,
                audio_score: Some(score),
                audio_tier,
                ..
            }) => Ok((*score, *audio_tier)),
            Some(entry) => Err(Error::invalid_argument(format!(
                "audio score requested for {} codec '{}'",
                entry.category, codec_key
            ))),
            None => Err(Error::invalid_argument(format!(
                "audio score requested for unknown codec '{}'",
                codec_key
            ))),
        }
    }

    /// Number of known codec keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_classify_is_case_insensitive() {
        let catalog = CodecCatalog::standard();
        let entry = catalog.classify("DTS-HD Master Audio").unwrap();
        assert_eq!(entry.category, TrackCategory::Audio);
        assert_eq!(entry.extension, "hdma.dts");
        assert_eq!(catalog.extension("AVC/H.264/MPEG-4p10"), Some("264"));
        assert_eq!(catalog.extension("SubRip/SRT"), Some("srt"));
        assert_eq!(catalog.extension("WavPack4"), Some("wv"));
        assert_eq!(catalog.extension("A_MS/ACM"), Some("wav"));
    }

    #[test]
    fn test_unknown_codec() {
        let catalog = CodecCatalog::standard();
        assert!(catalog.classify("made_up_codec_xyz").is_none());
        assert_eq!(catalog.extension("made_up_codec_xyz"), None);
    }

    #[test]
    fn test_audio_ranks_are_strictly_ordered() {
        let catalog = CodecCatalog::standard();
        let ranks: Vec<(u32, u8)> = catalog
            .entries
            .values()
            .filter_map(|e| e.audio_score.map(|s| (s, e.audio_tier)))
            .collect();
        let unique: HashSet<(u32, u8)> = ranks.iter().copied().collect();
        assert_eq!(ranks.len(), unique.len());
        assert!(catalog.audio_rank("ac-3 dolby surround ex").unwrap() > catalog.audio_rank("ac-3").unwrap());
        assert!(catalog.audio_rank("wavpack4").unwrap() > catalog.audio_rank("vorbis").unwrap());
        assert!(catalog.audio_rank("opus").unwrap() > catalog.audio_rank("wavpack4").unwrap());
    }

    #[test]
    fn test_standard_audio_scores() {
        let catalog = CodecCatalog::standard();
        let expected = [
            ("mp2", 1),
            ("mp3", 2),
            ("vorbis", 3),
            ("wavpack4", 3),
            ("opus", 4),
            ("aac", 5),
            ("ac-3", 6),
            ("ac-3 dolby surround ex", 6),
            ("e-ac-3", 7),
            ("a_ms/acm", 8),
            ("dts", 9),
            ("dts-es", 10),
            ("alac", 11),
            ("flac", 12),
            ("dts-hd high resolution audio", 13),
            ("dts-hd master audio", 14),
            ("truehd", 15),
            ("truehd atmos", 16),
        ];
        for (codec, score) in expected {
            assert_eq!(catalog.audio_score(codec).unwrap(), score, "{}", codec);
        }
    }

    #[test]
    fn test_audio_score_rejects_non_audio() {
        let catalog = CodecCatalog::standard();
        assert!(matches!(
            catalog.audio_score("hdmv pgs"),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            catalog.audio_score("made_up_codec_xyz"),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_every_audio_entry_has_score() {
        for entry in CodecCatalog::standard().entries.values() {
            assert_eq!(
                entry.audio_score.is_some(),
                entry.category == TrackCategory::Audio
            );
        }
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = CodecCatalog::new().with_audio("Foo", "foo", 3);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.audio_score("foo").unwrap(), 3);
        assert!(catalog.classify("aac").is_none());
    }

    #[test]
    fn test_parse_subtitle_families() {
        assert_eq!(
            parse_subtitle_families("ass,srt").unwrap(),
            vec!["substationalpha", "subrip/srt"]
        );
        assert_eq!(
            parse_subtitle_families("ass,mks").unwrap(),
            vec!["substationalpha"]
        );
        assert_eq!(parse_subtitle_families("all").unwrap().len(), 4);
        assert!(parse_subtitle_families("ass,webvtt").is_err());
    }

    #[test]
    fn test_track_category_from_mkvmerge() {
        assert_eq!(
            TrackCategory::from_mkvmerge("subtitles"),
            Some(TrackCategory::Subtitle)
        );
        assert_eq!(TrackCategory::from_mkvmerge("Video"), Some(TrackCategory::Video));
        assert_eq!(TrackCategory::from_mkvmerge("buttons"), None);
    }
}
