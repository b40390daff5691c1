//! In-memory model of one Matroska container.
//!
//! A [`ContainerModel`] is built once from the identification document of
//! the inspection tool and is read-only afterwards. Track order is the order
//! mkvmerge reported them in, which is also ascending track id; extraction
//! addresses tracks by that id.

mod identify;

use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::catalog::{CodecCatalog, TrackCategory};
use crate::inspect::Inspector;
use crate::{Error, Result};
use identify::IdentifyDocument;

/// One media track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackRecord {
    /// Track id, unique within the container.
    pub id: u32,
    pub uid: u64,
    pub category: TrackCategory,
    /// Lower-cased codec name as reported by mkvmerge.
    pub codec_key: String,
    /// Lower-cased language code; `None` when the tool reported none.
    pub language: Option<String>,
    pub name: String,
    /// Forced flag, or a track name containing "forced".
    pub forced: bool,
    pub default: bool,
    /// Audio tracks only.
    pub audio_channels: Option<u32>,
    /// Audio tracks only.
    pub audio_bits: Option<u32>,
}

impl TrackRecord {
    /// Whether the track name marks a commentary.
    pub fn is_commentary(&self) -> bool {
        self.name.to_lowercase().contains("commentary")
    }

    /// Codec rank plus channel count, used to pick the best audio track.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for non-audio tracks or codecs
    /// without a rank.
    pub fn audio_score(&self, catalog: &CodecCatalog) -> Result<AudioScore> {
        if self.category != TrackCategory::Audio {
            return Err(Error::invalid_argument(format!(
                "track {} is not an audio track",
                self.id
            )));
        }
        let (rank, tier) = catalog.audio_rank(&self.codec_key)?;
        Ok(AudioScore {
            total: rank.saturating_add(self.audio_channels.unwrap_or(0)),
            rank,
            tier,
        })
    }
}

/// Score of one audio track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioScore {
    /// Codec rank plus channel count.
    pub total: u32,
    pub rank: u32,
    pub tier: u8,
}

impl AudioScore {
    /// Whether this track should replace `other` as the best one.
    ///
    /// A higher total wins. Equal totals only differ when both tracks use
    /// codecs of the same rank, where the higher tier wins; anything else
    /// keeps `other`.
    pub fn beats(&self, other: &AudioScore) -> bool {
        self.total > other.total
            || (self.total == other.total && self.rank == other.rank && self.tier > other.tier)
    }
}

impl std::fmt::Display for AudioScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.total)
    }
}

/// One embedded attachment (font, cover art, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentRecord {
    pub id: u32,
    pub uid: u64,
    pub file_name: String,
    /// MIME type; empty when the tool reported none.
    pub content_type: String,
}

/// One container file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerModel {
    path: PathBuf,
    valid: bool,
    chaptered: bool,
    tracks: Vec<TrackRecord>,
    attachments: Vec<AttachmentRecord>,
}

impl ContainerModel {
    /// Build the model of the file at `path`.
    ///
    /// A path that does not exist yields an invalid, empty model without
    /// calling the inspector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseError`] if the inspector fails or its document
    /// is invalid or incomplete. No partial model is returned.
    pub fn open(path: impl AsRef<Path>, inspector: &dyn Inspector) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("{} does not exist, model is invalid", path.display());
            return Ok(Self::invalid(path));
        }

        let json = inspector.identify(path)?;
        Self::from_json(path, &json)
    }

    /// Build a model from an identification document.
    pub fn from_json(path: impl AsRef<Path>, json: &str) -> Result<Self> {
        let path = path.as_ref();
        let doc = IdentifyDocument::parse(json)?;

        tracing::trace!("Identified {}", doc.file_name);

        Self::from_parts(path, doc.tracks()?, doc.attachments()?, doc.is_chaptered())
    }

    /// Assemble a model from already decoded records.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseError`] on a duplicate track id or a duplicate
    /// attachment `(id, uid)` pair.
    pub fn from_parts(
        path: impl AsRef<Path>,
        tracks: Vec<TrackRecord>,
        attachments: Vec<AttachmentRecord>,
        chaptered: bool,
    ) -> Result<Self> {
        let mut ids = HashSet::new();
        if let Some(dup) = tracks.iter().find(|t| !ids.insert(t.id)) {
            return Err(Error::parse_error(
                "mkvmerge",
                format!("duplicate track id {}", dup.id),
            ));
        }

        let mut pairs = HashSet::new();
        if let Some(dup) = attachments.iter().find(|a| !pairs.insert((a.id, a.uid))) {
            return Err(Error::parse_error(
                "mkvmerge",
                format!("duplicate attachment {} (uid {})", dup.id, dup.uid),
            ));
        }

        Ok(Self {
            path: path.as_ref().to_path_buf(),
            valid: true,
            chaptered,
            tracks,
            attachments,
        })
    }

    /// An empty model for a file that could not be found.
    pub fn invalid(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            valid: false,
            chaptered: false,
            tracks: Vec::new(),
            attachments: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// False if the file did not exist.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// True if a non-empty chapter list was reported.
    pub fn is_chaptered(&self) -> bool {
        self.chaptered
    }

    /// Tracks in report order.
    pub fn tracks(&self) -> &[TrackRecord] {
        &self.tracks
    }

    /// Attachments in report order.
    pub fn attachments(&self) -> &[AttachmentRecord] {
        &self.attachments
    }

    /// Look up a track by id.
    pub fn track(&self, id: u32) -> Option<&TrackRecord> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Tracks of one category, in report order.
    pub fn tracks_of(&self, category: TrackCategory) -> impl Iterator<Item = &TrackRecord> {
        self.tracks.iter().filter(move |t| t.category == category)
    }
}
