//! Process launch adapter
//!
//! Spawns the encoder with `tokio::process`, hands its stdout to the caller
//! and reaps it on a background task. Failures after a successful spawn are
//! only ever logged.

use std::io;
use std::process::Stdio;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Launches encoder processes and reaps them in the background
///
/// Must be used from within a Tokio runtime.
pub struct ProcessLauncher {
    log_port: Arc<dyn LogPort>,
}

impl ProcessLauncher {
    /// Create a launcher that reports process outcomes to `log_port`
    pub fn new(log_port: Arc<dyn LogPort>) -> Self {
        Self { log_port }
    }
}

impl LaunchPort for ProcessLauncher {
    fn launch(&self, argv: Vec<String>, sink: DiagnosticSink) -> Result<ProcessHandle, DomainError> {
        let (program, args) = argv.split_first().ok_or(DomainError::EmptyCommand)?;

        let mut cmd = Command::new(program);
        cmd.args(args).stdin(Stdio::null()).stdout(Stdio::piped());

        let mut diagnostics = None;
        match sink {
            DiagnosticSink::Inherit => {
                cmd.stderr(Stdio::inherit());
            }
            DiagnosticSink::Discard => {
                cmd.stderr(Stdio::null());
            }
            DiagnosticSink::File(file) => {
                cmd.stderr(Stdio::from(file));
            }
            DiagnosticSink::Writer(writer) => {
                cmd.stderr(Stdio::piped());
                diagnostics = Some(writer);
            }
        }

        let mut child = cmd.spawn().map_err(|source| DomainError::Launch {
            argv: argv.clone(),
            source,
        })?;

        let stdout = match child.stdout.take() {
            Some(stdout) => stdout,
            None => {
                let source = missing_stdout_error(child.start_kill());
                return Err(DomainError::Launch { argv, source });
            }
        };

        let copier = match (diagnostics, child.stderr.take()) {
            (Some(writer), Some(stderr)) => Some(spawn_diagnostic_copy(
                stderr,
                writer,
                Arc::clone(&self.log_port),
            )),
            _ => None,
        };

        let pid = child.id();
        let reaper = spawn_reaper(child, copier, argv, Arc::clone(&self.log_port));

        Ok(ProcessHandle {
            stream: TranscodeStream::new(stdout),
            pid,
            reaper,
        })
    }
}

/// Copy the encoder's stderr into the caller's writer until EOF
fn spawn_diagnostic_copy<R>(
    mut stderr: R,
    mut writer: Box<dyn AsyncWrite + Send + Unpin>,
    log_port: Arc<dyn LogPort>,
) -> JoinHandle<()>
where
    R: AsyncRead + Send + Unpin + 'static,
{
    tokio::spawn(async move {
        let forwarded = match tokio::io::copy(&mut stderr, &mut writer).await {
            Ok(_) => writer.flush().await,
            Err(e) => Err(e),
        };
        let Err(e) = forwarded else {
            return;
        };
        log_port
            .warn(&format!("failed to forward encoder diagnostics: {}", e))
            .await;

        // Keep the pipe open until EOF so the encoder never sees EPIPE
        if let Err(e) = tokio::io::copy(&mut stderr, &mut tokio::io::sink()).await {
            log_port
                .debug(&format!("failed to drain encoder diagnostics: {}", e))
                .await;
        }
    })
}

/// Error for a child spawned without its stdout pipe, carrying any kill failure
fn missing_stdout_error(killed: io::Result<()>) -> io::Error {
    match killed {
        Ok(()) => io::Error::new(io::ErrorKind::BrokenPipe, "stdout pipe was not created"),
        Err(e) => io::Error::new(
            io::ErrorKind::BrokenPipe,
            format!("stdout pipe was not created, and killing the child failed: {}", e),
        ),
    }
}

fn spawn_reaper(
    mut child: Child,
    copier: Option<JoinHandle<()>>,
    argv: Vec<String>,
    log_port: Arc<dyn LogPort>,
) -> Reaper {
    Reaper::new(tokio::spawn(async move {
        let started = LogEvent::new(LogLevel::Info, format!("transcode command: {:?}", argv))
            .with("argv", argv.join(" "))
            .with("pid", child.id().map(|pid| pid.to_string()).unwrap_or_default());
        log_port.log_event(&started).await;

        let outcome = match child.wait().await {
            Ok(status) if status.success() => ExitOutcome::Success,
            Ok(status) => ExitOutcome::Failed {
                code: status.code(),
            },
            Err(e) => ExitOutcome::WaitError(e.to_string()),
        };

        // Diagnostics go out before the outcome is reported
        if let Some(copier) = copier {
            let _ = copier.await;
        }

        report_outcome(log_port.as_ref(), &argv, &outcome).await;
        outcome
    }))
}

async fn report_outcome(log_port: &dyn LogPort, argv: &[String], outcome: &ExitOutcome) {
    let (level, message) = match outcome {
        ExitOutcome::Success => (LogLevel::Debug, format!("command {:?} finished", argv)),
        failure => (LogLevel::Error, format!("command {:?} failed: {}", argv, failure)),
    };
    let event = LogEvent::new(level, message)
        .with("argv", argv.join(" "))
        .with("outcome", outcome.to_string());
    log_port.log_event(&event).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_stdout_error_keeps_kill_failure() {
        let err = missing_stdout_error(Err(io::Error::new(io::ErrorKind::PermissionDenied, "EPERM")));
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(err.to_string().contains("killing the child failed: EPERM"));
    }

    #[test]
    fn test_missing_stdout_error_after_kill() {
        let err = missing_stdout_error(Ok(()));
        assert_eq!(err.to_string(), "stdout pipe was not created");
    }
}
