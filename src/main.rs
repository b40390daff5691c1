mod cli;
mod commands;

use mkvkit::config;

use anyhow::Result;
use clap::Parser;
use cli::{AttachmentCommands, ChapterCommands, Cli, Commands};
use commands::explode::ExplodeArgs;
use commands::tag::TagArgs;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "mkvkit=trace,mkvkit_av=trace,mkvkit_common=trace".to_string()
        } else {
            "mkvkit=info,mkvkit_av=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let load = || -> Result<config::Config> {
        let mut config = config::load_config_or_default(cli.config.as_deref())?;
        if let Some(jobs) = cli.jobs {
            config.jobs = jobs;
        }
        Ok(config)
    };

    match cli.command {
        Commands::Explode {
            file,
            no_video,
            no_audio,
            no_subtitles,
            no_chapters,
            audio_langs,
            subtitle_langs,
            subtitle_types,
            dry_run,
        } => commands::explode::run(
            ExplodeArgs {
                file,
                no_video,
                no_audio,
                no_subtitles,
                no_chapters,
                audio_langs,
                subtitle_langs,
                subtitle_types,
                dry_run,
            },
            &load()?,
        ),
        Commands::Inspect { file, json } => commands::inspect::run(&file, json, &load()?),
        Commands::Attachments(action) => match action {
            AttachmentCommands::Extract {
                input,
                kinds,
                output,
                dry_run,
            } => commands::attachments::extract(&input, &kinds, &output, dry_run, &load()?),
            AttachmentCommands::Delete {
                input,
                kinds,
                dry_run,
            } => commands::attachments::delete(&input, &kinds, dry_run, &load()?),
            AttachmentCommands::Fix { input, dry_run } => {
                commands::attachments::fix(&input, dry_run, &load()?)
            }
            AttachmentCommands::Add {
                attachments,
                input,
                dry_run,
            } => commands::attachments::add(&attachments, &input, dry_run, &load()?),
        },
        Commands::Chapters(action) => match action {
            ChapterCommands::Check { input } => commands::chapters::check(&input, &load()?),
            ChapterCommands::Add { dir, dry_run } => {
                commands::chapters::add(&dir, dry_run, &load()?)
            }
        },
        Commands::Tag {
            input,
            video_name,
            audio_names,
            sub_names,
            video_lang,
            audio_langs,
            sub_langs,
            replace,
            dry_run,
        } => commands::tag::run(
            &input,
            &TagArgs {
                video_name,
                audio_names,
                sub_names,
                video_lang,
                audio_langs,
                sub_langs,
                replace,
                dry_run,
            },
            &load()?,
        ),
        Commands::CheckTools => commands::tools::run(),
        Commands::Validate { file } => {
            let path = file.or_else(|| cli.config.clone());
            validate_config(path.as_deref())
        }
    }
}

fn validate_config(path: Option<&std::path::Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            config::Config::default()
        }
    };

    println!("  Workers: {}", config.worker_count());
    println!(
        "  Timeouts: inspect {}s, commands {}s",
        config.tools.inspect_timeout_secs, config.tools.command_timeout_secs
    );
    println!("  Audio languages: {}", config.explode.audio_languages);
    println!("  Subtitle languages: {}", config.explode.subtitle_languages);
    println!("  Subtitle types: {}", config.explode.subtitle_types);

    Ok(())
}
