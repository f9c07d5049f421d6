//! Transcode Pipeline Library
//!
//! Selects per-stream codec policies, assembles external encoder
//! invocations for a fixed set of output profiles, and exposes the running
//! encoder's stdout as a live byte stream while the process is reaped in
//! the background.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod planner;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use app::{AppContainer, DefaultAppContainer, TranscodeInteractor};
pub use domain::errors::{DomainError, DomainResult};
pub use domain::model::{
    CodecType, DiagnosticSink, EncoderDirective, Profile, StreamDescriptor, TimeWindow,
    TranscodeRequest,
};
pub use ports::{ExitOutcome, LaunchPort, LogPort, ProbePort, ProcessHandle, Reaper, TranscodeStream};
