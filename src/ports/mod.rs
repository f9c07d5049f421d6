// Ports - Interface definitions (contracts)

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use async_trait::async_trait;
use tokio::io::{AsyncRead, ReadBuf};
use tokio::task::JoinHandle;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for media file probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Probe a source file and return its streams in container order
    async fn probe_streams(&self, file_path: &str) -> Result<Vec<StreamDescriptor>, DomainError>;
}

/// Port for starting encoder processes
pub trait LaunchPort: Send + Sync {
    /// Start `argv[0]` with the remaining arguments and hand back its stdout
    ///
    /// Returns as soon as the process is started. Anything that goes wrong
    /// afterwards is logged by the reaper and never returned to the reader.
    fn launch(&self, argv: Vec<String>, sink: DiagnosticSink) -> Result<ProcessHandle, DomainError>;
}

/// Readable byte stream bound to a running encoder's stdout
pub struct TranscodeStream {
    inner: Box<dyn AsyncRead + Send + Unpin>,
}

impl TranscodeStream {
    pub fn new<R>(reader: R) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        Self {
            inner: Box::new(reader),
        }
    }
}

impl AsyncRead for TranscodeStream {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_read(cx, buf)
    }
}

impl fmt::Debug for TranscodeStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TranscodeStream")
    }
}

/// How an encoder process ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitOutcome {
    /// Exited with status zero
    Success,
    /// Exited non-zero; `code` is `None` when killed by a signal
    Failed { code: Option<i32> },
    /// Waiting on the process failed
    WaitError(String),
}

impl ExitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExitOutcome::Success)
    }
}

impl fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitOutcome::Success => f.write_str("exited successfully"),
            ExitOutcome::Failed { code: Some(code) } => write!(f, "exit status: {}", code),
            ExitOutcome::Failed { code: None } => f.write_str("terminated by signal"),
            ExitOutcome::WaitError(e) => write!(f, "wait failed: {}", e),
        }
    }
}

/// Background task that waits for an encoder to exit and logs the outcome
///
/// Dropping it detaches the task; it is never cancelled.
#[derive(Debug)]
pub struct Reaper {
    task: JoinHandle<ExitOutcome>,
}

impl Reaper {
    pub fn new(task: JoinHandle<ExitOutcome>) -> Self {
        Self { task }
    }

    /// Wait until the process has been reaped and its outcome logged
    pub async fn join(self) -> ExitOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) => ExitOutcome::WaitError(e.to_string()),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// A launched encoder process
#[derive(Debug)]
pub struct ProcessHandle {
    pub stream: TranscodeStream,
    pub pid: Option<u32>,
    pub reaper: Reaper,
}

impl ProcessHandle {
    /// Keep only the output stream; the reaper keeps running on its own
    pub fn into_stream(self) -> TranscodeStream {
        self.stream
    }

    pub fn into_parts(self) -> (TranscodeStream, Reaper) {
        (self.stream, self.reaper)
    }
}

/// Port for logging and observability
#[async_trait]
pub trait LogPort: Send + Sync {
    /// Log info message
    async fn info(&self, message: &str);

    /// Log warning message
    async fn warn(&self, message: &str);

    /// Log error message
    async fn error(&self, message: &str);

    /// Log debug message
    async fn debug(&self, message: &str);

    /// Log structured event
    async fn log_event(&self, event: &LogEvent);
}

/// Log event with structured data
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub context: HashMap<String, String>,
}

impl LogEvent {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: chrono::Utc::now(),
            context: HashMap::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.context.insert(key.to_string(), value.into());
        self
    }
}

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse log level from string
    pub fn parse(level_str: &str) -> Result<Self, DomainError> {
        match level_str.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid log level: {}. Valid levels: trace, debug, info, warn, error",
                level_str
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
