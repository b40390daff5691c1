//! Track selection.
//!
//! Turns a [`ContainerModel`] and a [`SelectionPolicy`] into an
//! [`ExtractionPlan`]: which track ids to extract and how to name them.
//!
//! Tracks are considered in report order. Video tracks pass on category and
//! codec alone. Audio and subtitle tracks must also have a known language in
//! the policy and must not be commentaries; subtitles must use a wanted
//! codec. Afterwards only the best audio track of each language is kept:
//! highest codec rank plus channel count, first track on a tie.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::catalog::{CodecCatalog, TrackCategory};
use crate::container::{AudioScore, ContainerModel, TrackRecord};
use crate::{Error, Result};

/// Languages the `all` keyword stands for, audio.
pub const DEFAULT_AUDIO_LANGUAGES: [&str; 3] = ["eng", "fre", "jpn"];

/// Languages the `all` keyword stands for, subtitles.
pub const DEFAULT_SUBTITLE_LANGUAGES: [&str; 2] = ["eng", "fre"];

/// What to extract from a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionPolicy {
    /// Track categories to consider.
    pub wanted_categories: HashSet<TrackCategory>,
    /// Audio languages to keep, lower-cased.
    pub audio_languages: Vec<String>,
    /// Subtitle languages to keep, lower-cased.
    pub subtitle_languages: Vec<String>,
    /// Subtitle codec keys to keep, lower-cased.
    pub subtitle_codecs: Vec<String>,
    /// Also extract chapters when the container has some.
    pub include_chapters: bool,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            wanted_categories: TrackCategory::ALL.into_iter().collect(),
            audio_languages: DEFAULT_AUDIO_LANGUAGES.map(String::from).to_vec(),
            subtitle_languages: DEFAULT_SUBTITLE_LANGUAGES.map(String::from).to_vec(),
            subtitle_codecs: vec!["substationalpha".to_string(), "subrip/srt".to_string()],
            include_chapters: true,
        }
    }
}

fn lowered(items: impl IntoIterator<Item = impl Into<String>>) -> Vec<String> {
    items
        .into_iter()
        .map(|i| i.into().to_lowercase())
        .collect()
}

impl SelectionPolicy {
    /// Create a policy with the default languages and codecs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the wanted categories.
    pub fn categories(mut self, categories: impl IntoIterator<Item = TrackCategory>) -> Self {
        self.wanted_categories = categories.into_iter().collect();
        self
    }

    /// Drop one category.
    pub fn without(mut self, category: TrackCategory) -> Self {
        self.wanted_categories.remove(&category);
        self
    }

    /// Keep only these audio languages.
    pub fn audio_langs(mut self, languages: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.audio_languages = lowered(languages);
        self
    }

    /// Keep only these subtitle languages.
    pub fn subtitle_langs(
        mut self,
        languages: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.subtitle_languages = lowered(languages);
        self
    }

    /// Keep only subtitles using these codec keys.
    pub fn subtitle_codecs(mut self, codecs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.subtitle_codecs = lowered(codecs);
        self
    }

    /// Request chapter extraction or not.
    pub fn chapters(mut self, include: bool) -> Self {
        self.include_chapters = include;
        self
    }

    /// Reject empty or self-contradicting policies.
    pub fn validate(&self) -> Result<()> {
        if self.wanted_categories.is_empty() {
            return Err(Error::invalid_argument("no track category wanted"));
        }
        if self.wants(TrackCategory::Audio) && self.audio_languages.is_empty() {
            return Err(Error::invalid_argument(
                "audio tracks wanted but no audio language given",
            ));
        }
        if self.wants(TrackCategory::Subtitle) {
            if self.subtitle_languages.is_empty() {
                return Err(Error::invalid_argument(
                    "subtitle tracks wanted but no subtitle language given",
                ));
            }
            if self.subtitle_codecs.is_empty() {
                return Err(Error::invalid_argument(
                    "subtitle tracks wanted but no subtitle type given",
                ));
            }
        }
        Ok(())
    }

    pub fn wants(&self, category: TrackCategory) -> bool {
        self.wanted_categories.contains(&category)
    }
}

/// Naming marker of an extracted track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OutputSuffix {
    Video,
    Language { code: String, forced: bool },
}

impl fmt::Display for OutputSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputSuffix::Video => write!(f, "video"),
            OutputSuffix::Language { code, forced: false } => write!(f, "{}", code),
            OutputSuffix::Language { code, forced: true } => write!(f, "{}-forced", code),
        }
    }
}

/// One track to extract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanEntry {
    pub track_id: u32,
    pub category: TrackCategory,
    pub suffix: OutputSuffix,
    /// Output extension from the codec catalog, without the dot.
    pub extension: String,
}

impl PlanEntry {
    /// `<id>.<suffix>.<ext>`, appended to the source file name.
    pub fn file_suffix(&self) -> String {
        format!("{}.{}.{}", self.track_id, self.suffix, self.extension)
    }
}

impl fmt::Display for PlanEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.track_id, self.suffix)
    }
}

/// Ordered extraction decisions for one container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionPlan {
    /// Entries in ascending track id order.
    pub entries: Vec<PlanEntry>,
    /// Extract the chapter list as well.
    pub extract_chapters: bool,
}

impl ExtractionPlan {
    /// True when no track matched. Chapters do not count.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn track_ids(&self) -> Vec<u32> {
        self.entries.iter().map(|e| e.track_id).collect()
    }
}

/// Runs the selection algorithm against a codec catalog.
#[derive(Debug, Clone, Copy)]
pub struct TrackSelector<'a> {
    catalog: &'a CodecCatalog,
}

impl Default for TrackSelector<'static> {
    fn default() -> Self {
        Self::new(CodecCatalog::standard())
    }
}

impl<'a> TrackSelector<'a> {
    pub fn new(catalog: &'a CodecCatalog) -> Self {
        Self { catalog }
    }

    /// Build the extraction plan.
    ///
    /// An invalid model gives an empty plan. An empty plan is a valid
    /// result meaning nothing matched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the policy fails
    /// [`SelectionPolicy::validate`].
    pub fn select(&self, model: &ContainerModel, policy: &SelectionPolicy) -> Result<ExtractionPlan> {
        policy.validate()?;

        if !model.is_valid() {
            return Ok(ExtractionPlan::default());
        }

        let candidates: Vec<(&TrackRecord, PlanEntry)> = model
            .tracks()
            .iter()
            .filter_map(|track| self.consider(track, policy).map(|entry| (track, entry)))
            .collect();

        let entries = self.keep_best_audio(candidates)?;

        Ok(ExtractionPlan {
            entries,
            extract_chapters: policy.include_chapters && model.is_chaptered(),
        })
    }

    fn consider(&self, track: &TrackRecord, policy: &SelectionPolicy) -> Option<PlanEntry> {
        if !policy.wants(track.category) {
            tracing::debug!("Track {}: {}, skipping", track.id, track.category);
            return None;
        }

        let extension = match self.catalog.classify(&track.codec_key) {
            Some(entry) if entry.category == track.category => entry.extension.clone(),
            _ => {
                tracing::info!(
                    "Track {}: unknown {} codec <{}>, skipping",
                    track.id,
                    track.category,
                    track.codec_key
                );
                return None;
            }
        };

        let suffix = match track.category {
            TrackCategory::Video => OutputSuffix::Video,
            TrackCategory::Audio | TrackCategory::Subtitle => {
                if track.is_commentary() {
                    tracing::debug!("Track {}: commentary, skipping", track.id);
                    return None;
                }
                let Some(lang) = track.language.as_deref() else {
                    tracing::debug!("Track {}: unknown language, skipping", track.id);
                    return None;
                };

                let wanted = match track.category {
                    TrackCategory::Audio => policy.audio_languages.iter().any(|l| l == lang),
                    _ => {
                        policy.subtitle_languages.iter().any(|l| l == lang)
                            && policy.subtitle_codecs.contains(&track.codec_key)
                    }
                };
                if !wanted {
                    tracing::debug!("Track {}: {} not wanted, skipping", track.id, lang);
                    return None;
                }

                OutputSuffix::Language {
                    code: lang.to_string(),
                    forced: track.category == TrackCategory::Subtitle && track.forced,
                }
            }
        };

        Some(PlanEntry {
            track_id: track.id,
            category: track.category,
            suffix,
            extension,
        })
    }

    /// Keep one audio entry per language; other entries pass through.
    fn keep_best_audio(&self, candidates: Vec<(&TrackRecord, PlanEntry)>) -> Result<Vec<PlanEntry>> {
        // language -> (track id, score) of the best track seen so far
        let mut best: HashMap<&str, (u32, AudioScore)> = HashMap::new();

        for (track, _) in candidates
            .iter()
            .filter(|(t, _)| t.category == TrackCategory::Audio)
        {
            let Some(lang) = track.language.as_deref() else {
                continue;
            };
            let score = track.audio_score(self.catalog)?;
            match best.entry(lang) {
                Entry::Vacant(slot) => {
                    slot.insert((track.id, score));
                }
                Entry::Occupied(mut slot) => {
                    if score.beats(&slot.get().1) {
                        tracing::debug!(
                            "Track {} ({}) beats track {} ({}) for {}",
                            track.id,
                            score,
                            slot.get().0,
                            slot.get().1,
                            lang
                        );
                        slot.insert((track.id, score));
                    }
                }
            }
        }

        Ok(candidates
            .into_iter()
            .filter(|(track, _)| match (track.category, track.language.as_deref()) {
                (TrackCategory::Audio, Some(lang)) => {
                    best.get(lang).is_some_and(|(id, _)| *id == track.id)
                }
                _ => true,
            })
            .map(|(_, entry)| entry)
            .collect())
    }
}
