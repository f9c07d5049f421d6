//! Shared test doubles

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use transcode_pipe::ports::{LogEvent, LogLevel};
use transcode_pipe::*;

/// Log port that keeps every entry for inspection
#[derive(Default)]
pub struct RecordingLog {
    entries: Mutex<Vec<(LogLevel, String)>>,
}

impl RecordingLog {
    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.entries.lock().unwrap().clone()
    }

    pub fn at(&self, level: LogLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    fn push(&self, level: LogLevel, message: &str) {
        self.entries.lock().unwrap().push((level, message.to_string()));
    }
}

#[async_trait]
impl LogPort for RecordingLog {
    async fn info(&self, message: &str) {
        self.push(LogLevel::Info, message);
    }

    async fn warn(&self, message: &str) {
        self.push(LogLevel::Warn, message);
    }

    async fn error(&self, message: &str) {
        self.push(LogLevel::Error, message);
    }

    async fn debug(&self, message: &str) {
        self.push(LogLevel::Debug, message);
    }

    async fn log_event(&self, event: &LogEvent) {
        self.push(event.level, &event.message);
    }
}

/// Probe port returning canned streams, or failing
pub struct FakeProbe {
    result: Result<Vec<StreamDescriptor>, String>,
    calls: AtomicUsize,
}

impl FakeProbe {
    pub fn with_streams(streams: Vec<StreamDescriptor>) -> Self {
        Self {
            result: Ok(streams),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProbePort for FakeProbe {
    async fn probe_streams(&self, file_path: &str) -> Result<Vec<StreamDescriptor>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.result {
            Ok(streams) => Ok(streams.clone()),
            Err(message) => Err(DomainError::probe(file_path, message.clone())),
        }
    }
}

/// Launch port that records argv and serves fixed output
pub struct FakeLauncher {
    output: Vec<u8>,
    launched: Mutex<Vec<Vec<String>>>,
}

impl FakeLauncher {
    pub fn new(output: &[u8]) -> Self {
        Self {
            output: output.to_vec(),
            launched: Mutex::new(Vec::new()),
        }
    }

    pub fn launched(&self) -> Vec<Vec<String>> {
        self.launched.lock().unwrap().clone()
    }
}

impl LaunchPort for FakeLauncher {
    fn launch(&self, argv: Vec<String>, _sink: DiagnosticSink) -> Result<ProcessHandle, DomainError> {
        if argv.is_empty() {
            return Err(DomainError::EmptyCommand);
        }
        self.launched.lock().unwrap().push(argv);
        Ok(ProcessHandle {
            stream: TranscodeStream::new(std::io::Cursor::new(self.output.clone())),
            pid: None,
            reaper: Reaper::new(tokio::spawn(async { ExitOutcome::Success })),
        })
    }
}
