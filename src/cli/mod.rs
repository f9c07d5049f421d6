//! CLI module for the transcode binary
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// Transcode pipeline
///
/// Streams a source file through an external encoder in one of the fixed
/// output profiles, or runs an ad-hoc encoder command, writing the encoder's
/// output to stdout or a file as it is produced.
#[derive(Parser, Debug)]
#[command(name = "transcode")]
#[command(about = "Stream media through an external encoder in a fixed output profile")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (default: ./transcode.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transcode a file in one of the output profiles
    Stream(args::StreamArgs),
    /// Run an ad-hoc encoder command and stream its output
    Exec(args::ExecArgs),
    /// Print the MIME type of each path
    Mime(args::MimeArgs),
}
