//! Transcode pipeline CLI
//!
//! Streams a source file through an external encoder and writes the
//! encoder's output as it is produced.
//!
//! # Usage
//!
//! ```bash
//! transcode stream --profile mpegts --input movie.mkv --start 00:10:00 > out.ts
//! transcode stream --profile web --input movie.mkv --length 30 --dry-run
//! transcode exec --command "ffmpeg -i movie.mkv -f webm pipe:" --output out.webm
//! transcode mime movie.mkv song.flac
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use transcode_pipe::app::{AppContainer, DefaultAppContainer};
use transcode_pipe::cli::{commands, Cli, Commands};
use transcode_pipe::config_initialization::initialize_configuration_hierarchy;

/// Main entry point for the transcode CLI
#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    let loaded = initialize_configuration_hierarchy(&cli).context("Failed to load configuration")?;

    // Initialize logging; stdout may carry media, so logs go to stderr
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&loaded.config.log_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    match &loaded.source {
        Some(path) => info!("Loaded configuration from {}", path.display()),
        None => debug!("No configuration file, using defaults"),
    }
    debug!(
        env_overrides = loaded.env_overrides,
        cli_overrides = loaded.cli_overrides,
        threads = loaded.config.threads,
        "Configuration resolved"
    );

    let container = DefaultAppContainer::new(loaded.config);
    let interactor = container.transcode_interactor();

    // Execute the requested command
    match cli.command {
        Commands::Stream(args) => commands::stream(&interactor, args).await?,
        Commands::Exec(args) => commands::exec(&interactor, args).await?,
        Commands::Mime(args) => commands::mime(args)?,
    }

    Ok(())
}
