//! Command-line argument definitions

use clap::Args;

/// Arguments for the stream command
#[derive(Args, Debug)]
pub struct StreamArgs {
    /// Output profile (mpegts, webm, chromecast, web)
    #[arg(short, long)]
    pub profile: String,

    /// Source media file
    #[arg(short, long)]
    pub input: String,

    /// Start offset (HH:MM:SS.ms, MM:SS.ms, or seconds)
    #[arg(short, long, default_value = "0")]
    pub start: String,

    /// Length to transcode; omit or pass a negative value for the whole source
    #[arg(short, long, allow_hyphen_values = true)]
    pub length: Option<String>,

    /// Output file, or `-` for stdout
    #[arg(short, long, default_value = "-")]
    pub output: String,

    /// Encoder thread count (overrides config)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Print the encoder command instead of running it
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the exec command
#[derive(Args, Debug)]
pub struct ExecArgs {
    /// Command line to run, quoted as a single argument
    #[arg(short, long, allow_hyphen_values = true)]
    pub command: String,

    /// Output file, or `-` for stdout
    #[arg(short, long, default_value = "-")]
    pub output: String,
}

/// Arguments for the mime command
#[derive(Args, Debug)]
pub struct MimeArgs {
    /// Paths to inspect
    #[arg(required = true)]
    pub paths: Vec<String>,
}
