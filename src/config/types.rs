use serde::{Deserialize, Serialize};
use mkvkit_av::tools::{MEDIAINFO, MKVEXTRACT, MKVMERGE, MKVPROPEDIT};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Worker threads for batch commands; 0 uses one per CPU.
    #[serde(default)]
    pub jobs: usize,

    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub explode: ExplodeConfig,
}

impl Config {
    /// Effective worker count.
    pub fn worker_count(&self) -> usize {
        if self.jobs == 0 {
            num_cpus::get()
        } else {
            self.jobs
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub mkvmerge_path: Option<PathBuf>,

    #[serde(default)]
    pub mkvextract_path: Option<PathBuf>,

    #[serde(default)]
    pub mkvpropedit_path: Option<PathBuf>,

    #[serde(default)]
    pub mediainfo_path: Option<PathBuf>,

    /// Time allowed for one `mkvmerge -J` call
    #[serde(default = "default_inspect_timeout")]
    pub inspect_timeout_secs: u64,

    /// Time allowed for one extraction or edit
    #[serde(default = "default_command_timeout")]
    pub command_timeout_secs: u64,
}

fn default_inspect_timeout() -> u64 {
    60
}

fn default_command_timeout() -> u64 {
    3600
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            mkvmerge_path: None,
            mkvextract_path: None,
            mkvpropedit_path: None,
            mediainfo_path: None,
            inspect_timeout_secs: default_inspect_timeout(),
            command_timeout_secs: default_command_timeout(),
        }
    }
}

impl ToolsConfig {
    /// Configured path of one of the mkvtoolnix programs or mediainfo.
    pub fn path_for(&self, tool: &str) -> Option<&Path> {
        match tool {
            MKVMERGE => self.mkvmerge_path.as_deref(),
            MKVEXTRACT => self.mkvextract_path.as_deref(),
            MKVPROPEDIT => self.mkvpropedit_path.as_deref(),
            MEDIAINFO => self.mediainfo_path.as_deref(),
            _ => None,
        }
    }

    pub fn inspect_timeout(&self) -> Duration {
        Duration::from_secs(self.inspect_timeout_secs)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExplodeConfig {
    /// Languages `all` stands for on audio tracks
    #[serde(default = "default_audio_defaults")]
    pub default_audio_languages: Vec<String>,

    /// Languages `all` stands for on subtitle tracks
    #[serde(default = "default_subtitle_defaults")]
    pub default_subtitle_languages: Vec<String>,

    #[serde(default = "default_audio_languages")]
    pub audio_languages: String,

    #[serde(default = "default_subtitle_languages")]
    pub subtitle_languages: String,

    #[serde(default = "default_subtitle_types")]
    pub subtitle_types: String,
}

fn default_audio_defaults() -> Vec<String> {
    mkvkit_av::select::DEFAULT_AUDIO_LANGUAGES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_subtitle_defaults() -> Vec<String> {
    mkvkit_av::select::DEFAULT_SUBTITLE_LANGUAGES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_audio_languages() -> String {
    "all".to_string()
}

fn default_subtitle_languages() -> String {
    "eng,fre,jpn".to_string()
}

fn default_subtitle_types() -> String {
    "ass,srt".to_string()
}

impl Default for ExplodeConfig {
    fn default() -> Self {
        Self {
            default_audio_languages: default_audio_defaults(),
            default_subtitle_languages: default_subtitle_defaults(),
            audio_languages: default_audio_languages(),
            subtitle_languages: default_subtitle_languages(),
            subtitle_types: default_subtitle_types(),
        }
    }
}
