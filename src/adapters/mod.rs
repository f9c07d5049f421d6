// Adapters - External system implementations

pub mod exec_process;
pub mod probe_ffprobe;
pub mod toml_config;
pub mod tracing_log;

// Re-export adapters
pub use exec_process::ProcessLauncher;
pub use probe_ffprobe::FfprobeAdapter;
pub use toml_config::{TomlConfigAdapter, TranscodeConfig};
pub use tracing_log::TracingLogAdapter;
