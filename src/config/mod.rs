mod types;

pub use types::*;

use anyhow::{Context, Result};
use mkvkit_av::parse_subtitle_families;
use mkvkit_common::lang::{is_language_code, LanguageSpec};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config).with_context(|| format!("Invalid config file: {:?}", path))?;

    expand_tool_paths(&mut config.tools);

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = ["./mkvkit.toml", "~/.config/mkvkit/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

fn expand_tool_paths(tools: &mut ToolsConfig) {
    for path in [
        &mut tools.mkvmerge_path,
        &mut tools.mkvextract_path,
        &mut tools.mkvpropedit_path,
        &mut tools.mediainfo_path,
    ]
    .into_iter()
    .flatten()
    {
        let expanded = shellexpand::tilde(&path.to_string_lossy()).to_string();
        *path = PathBuf::from(expanded);
    }
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    let explode = &config.explode;

    for code in explode
        .default_audio_languages
        .iter()
        .chain(&explode.default_subtitle_languages)
    {
        if !is_language_code(code) {
            anyhow::bail!("'{}' is not a three letter language code", code);
        }
    }

    explode
        .audio_languages
        .parse::<LanguageSpec>()
        .context("explode.audio_languages")?;
    explode
        .subtitle_languages
        .parse::<LanguageSpec>()
        .context("explode.subtitle_languages")?;
    parse_subtitle_families(&explode.subtitle_types).context("explode.subtitle_types")?;

    if config.tools.inspect_timeout_secs == 0 || config.tools.command_timeout_secs == 0 {
        anyhow::bail!("Tool timeouts cannot be 0");
    }

    Ok(())
}
