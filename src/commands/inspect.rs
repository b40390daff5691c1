//! `mkvkit inspect`: print the container model.

use anyhow::Result;
use mkvkit_av::{CodecCatalog, ContainerModel, Error, TrackCategory, TrackRecord};
use std::path::Path;

use mkvkit::config::Config;
use mkvkit::toolbox::Toolbox;

pub fn run(file: &Path, json: bool, config: &Config) -> Result<()> {
    let toolbox = Toolbox::new(&config.tools);
    let inspector = toolbox.inspector()?;
    let model = toolbox.open(&inspector, file)?;
    if !model.is_valid() {
        return Err(Error::file_not_found(file).into());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&model)?);
    } else {
        print!("{}", render(&model, CodecCatalog::standard()));
    }
    Ok(())
}

fn describe_track(track: &TrackRecord, catalog: &CodecCatalog) -> String {
    let mut line = format!("  [{}] {}", track.id, track.codec_key);
    if let Some(ref lang) = track.language {
        line.push_str(&format!(" ({})", lang));
    }
    if let Some(channels) = track.audio_channels {
        line.push_str(&format!(" {}ch", channels));
    }
    if let Some(bits) = track.audio_bits {
        line.push_str(&format!(" {}bits", bits));
    }
    if !track.name.is_empty() {
        line.push_str(&format!(" \"{}\"", track.name));
    }
    if track.forced {
        line.push_str(" [forced]");
    }
    if track.default {
        line.push_str(" [default]");
    }
    match catalog.classify(&track.codec_key) {
        Some(entry) if entry.category == track.category => {
            line.push_str(&format!(" -> .{}", entry.extension))
        }
        _ => line.push_str(" -> unknown codec"),
    }
    line
}

/// Human readable listing of a model.
pub fn render(model: &ContainerModel, catalog: &CodecCatalog) -> String {
    let mut out = format!("File: {}\n", model.path().display());
    out.push_str(&format!(
        "Chapters: {}\n",
        if model.is_chaptered() { "yes" } else { "no" }
    ));

    for (category, title) in [
        (TrackCategory::Video, "Video Tracks"),
        (TrackCategory::Audio, "Audio Tracks"),
        (TrackCategory::Subtitle, "Subtitle Tracks"),
    ] {
        let tracks: Vec<&TrackRecord> = model.tracks_of(category).collect();
        out.push_str(&format!("\n{}: {}\n", title, tracks.len()));
        for track in tracks {
            out.push_str(&describe_track(track, catalog));
            out.push('\n');
        }
    }

    out.push_str(&format!("\nAttachments: {}\n", model.attachments().len()));
    for attachment in model.attachments() {
        let content_type = if attachment.content_type.is_empty() {
            "no type"
        } else {
            attachment.content_type.as_str()
        };
        out.push_str(&format!(
            "  [{}] {} ({})\n",
            attachment.id, attachment.file_name, content_type
        ));
    }
    out
}
