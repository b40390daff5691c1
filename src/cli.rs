use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mkvkit")]
#[command(author, version, about = "Matroska toolbox built on mkvtoolnix")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Worker threads for batch commands (0 = one per CPU)
    #[arg(short, long, global = true)]
    pub jobs: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract the wanted tracks and chapters of a file next to it
    Explode {
        /// Matroska file to explode
        #[arg(required = true)]
        file: PathBuf,

        /// Skip video tracks
        #[arg(long)]
        no_video: bool,

        /// Skip audio tracks
        #[arg(long)]
        no_audio: bool,

        /// Skip subtitle tracks
        #[arg(long)]
        no_subtitles: bool,

        /// Skip chapters
        #[arg(long)]
        no_chapters: bool,

        /// Audio languages, comma separated, or "all"
        #[arg(short = 'a', long)]
        audio_langs: Option<String>,

        /// Subtitle languages, comma separated, or "all"
        #[arg(short = 's', long)]
        subtitle_langs: Option<String>,

        /// Subtitle types (ass, mks, pgs, srt, vobsub), comma separated, or "all"
        #[arg(short = 't', long)]
        subtitle_types: Option<String>,

        /// Show what would be extracted without executing
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the tracks, attachments and chapters of a file
    Inspect {
        /// File to inspect
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract, delete, repair or add attachments
    #[command(subcommand)]
    Attachments(AttachmentCommands),

    /// Check or add chapters
    #[command(subcommand)]
    Chapters(ChapterCommands),

    /// Set track languages, track names and the title
    Tag {
        /// Matroska file or directory of Matroska files
        #[arg(required = true)]
        input: PathBuf,

        /// Name of the video track
        #[arg(short = 'n', long)]
        video_name: Option<String>,

        /// Names of the audio tracks, comma separated
        #[arg(short = 'a', long)]
        audio_names: Option<String>,

        /// Names of the subtitle tracks, comma separated
        #[arg(short = 's', long)]
        sub_names: Option<String>,

        /// Language of the video track
        #[arg(short = 'x', long, default_value = "und")]
        video_lang: String,

        /// Languages of the audio tracks, comma separated
        #[arg(short = 'y', long, default_value = "jpn")]
        audio_langs: String,

        /// Languages of the subtitle tracks, comma separated
        #[arg(short = 'z', long, default_value = "eng")]
        sub_langs: String,

        /// Text removed from the file name to form the title
        #[arg(short = 'r', long, default_value = "")]
        replace: String,

        /// Print the mkvpropedit commands without executing
        #[arg(long)]
        dry_run: bool,
    },

    /// Check that required external tools are available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        file: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum AttachmentCommands {
    /// Extract attachments, each file name once across all inputs
    Extract {
        /// Matroska file or directory of Matroska files
        #[arg(required = true)]
        input: PathBuf,

        /// Attachment kinds (font, image), comma separated
        #[arg(short = 't', long = "type", default_value = "font,image")]
        kinds: String,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Print the mkvextract commands without executing
        #[arg(long)]
        dry_run: bool,
    },

    /// Delete attachments of the given kinds
    Delete {
        /// Matroska file or directory of Matroska files
        #[arg(required = true)]
        input: PathBuf,

        /// Attachment kinds (font, image), comma separated
        #[arg(short = 't', long = "type", default_value = "image")]
        kinds: String,

        /// Print the mkvpropedit commands without executing
        #[arg(long)]
        dry_run: bool,
    },

    /// Set MIME types from the attachment file extensions
    Fix {
        /// Matroska file or directory of Matroska files
        #[arg(required = true)]
        input: PathBuf,

        /// Print the mkvpropedit commands without executing
        #[arg(long)]
        dry_run: bool,
    },

    /// Attach files to every Matroska file
    Add {
        /// File or directory of files to attach
        #[arg(required = true)]
        attachments: PathBuf,

        /// Matroska file or directory of Matroska files
        #[arg(required = true)]
        input: PathBuf,

        /// Print the mkvpropedit commands without executing
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Subcommand)]
pub enum ChapterCommands {
    /// List files without chapters
    Check {
        /// Matroska file or directory of Matroska files
        #[arg(required = true)]
        input: PathBuf,
    },

    /// Set the chapters of each Matroska file of a directory from its XML chapter files
    Add {
        /// Directory with as many .xml chapter files as .mkv files, paired in name order
        #[arg(required = true)]
        dir: PathBuf,

        /// Print the mkvpropedit commands without executing
        #[arg(long)]
        dry_run: bool,
    },
}
