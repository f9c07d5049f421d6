//! Command implementations

use anyhow::{Context, Result};
use chrono::Duration;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};

use crate::app::TranscodeInteractor;
use crate::cli::args::{ExecArgs, MimeArgs, StreamArgs};
use crate::domain::model::{DiagnosticSink, Profile, TimeWindow, TranscodeRequest};
use crate::ports::ProcessHandle;
use crate::utils::mime::mime_type_by_path;
use crate::utils::time::parse_time;

/// Execute the stream command
pub async fn stream(interactor: &TranscodeInteractor, args: StreamArgs) -> Result<()> {
    let profile: Profile = args.profile.parse()?;
    let window = parse_window(&args.start, args.length.as_deref())?;

    if args.dry_run {
        let argv = interactor
            .plan(profile, &args.input, &window)
            .await
            .context("Failed to plan transcode")?;
        println!("{}", argv.join(" "));
        return Ok(());
    }

    info!(%profile, input = %args.input, content_type = profile.mime_type(), "Starting stream");
    let request = TranscodeRequest::new(args.input, window, DiagnosticSink::Inherit);
    let handle = interactor
        .transcode(profile, request)
        .await
        .context("Failed to start transcode")?;

    drain(handle, &args.output).await
}

/// Execute the exec command
pub async fn exec(interactor: &TranscodeInteractor, args: ExecArgs) -> Result<()> {
    let handle = interactor
        .exec_adhoc(&args.command, TimeWindow::full(), DiagnosticSink::Inherit)
        .await
        .context("Failed to start command")?;

    drain(handle, &args.output).await
}

/// Execute the mime command
pub fn mime(args: MimeArgs) -> Result<()> {
    for path in &args.paths {
        println!("{}", mime_type_by_path(path));
    }
    Ok(())
}

/// Parse the CLI's start/length pair into a window
pub fn parse_window(start: &str, length: Option<&str>) -> Result<TimeWindow> {
    let start = parse_time(start).context("Invalid start time")?;
    let length = match length {
        Some(length) => parse_time(length).context("Invalid length")?,
        None => Duration::seconds(-1),
    };
    Ok(TimeWindow::new(start, length)?)
}

/// Copy the encoder output to its destination, then wait for the reaper
async fn drain(handle: ProcessHandle, output: &str) -> Result<()> {
    let (mut stream, reaper) = handle.into_parts();

    let bytes = if output == "-" {
        copy_out(&mut stream, &mut tokio::io::stdout()).await?
    } else {
        let mut file = tokio::fs::File::create(output)
            .await
            .with_context(|| format!("Failed to create output file: {}", output))?;
        copy_out(&mut stream, &mut file).await?
    };

    // The reaper has already logged the outcome by the time it resolves
    let outcome = reaper.join().await;
    if outcome.is_success() {
        info!(bytes, "Stream completed");
    } else {
        warn!(bytes, %outcome, "Stream ended early");
    }
    Ok(())
}

async fn copy_out<R, W>(reader: &mut R, writer: &mut W) -> Result<u64>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let bytes = tokio::io::copy(reader, writer)
        .await
        .context("Failed to write encoder output")?;
    writer.flush().await.context("Failed to flush encoder output")?;
    Ok(bytes)
}
