//! FFprobe adapter for media file probing
//!
//! Runs `ffprobe -v quiet -print_format json -show_streams` and validates
//! each stream row into a [`StreamDescriptor`] once, here at the boundary.

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// FFprobe-based probe adapter
pub struct FfprobeAdapter {
    ffprobe_path: String,
}

impl FfprobeAdapter {
    /// Create new FFprobe adapter using the given binary
    pub fn new(ffprobe_path: impl Into<String>) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
        }
    }
}

impl Default for FfprobeAdapter {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    index: Option<u32>,
    codec_type: Option<String>,
    codec_name: Option<String>,
}

/// Parse ffprobe's JSON output into stream descriptors
pub fn parse_streams(path: &str, json: &str) -> Result<Vec<StreamDescriptor>, DomainError> {
    let output: FfprobeOutput = serde_json::from_str(json)
        .map_err(|e| DomainError::probe(path, format!("ffprobe JSON parse error: {}", e)))?;

    output
        .streams
        .into_iter()
        .enumerate()
        .map(|(position, stream)| -> Result<StreamDescriptor, DomainError> {
            let index = stream.index.ok_or_else(|| {
                DomainError::probe(path, format!("stream #{} has no index", position))
            })?;
            Ok(StreamDescriptor {
                index,
                codec_type: CodecType::parse(stream.codec_type.as_deref().unwrap_or("")),
                codec_name: stream.codec_name,
            })
        })
        .collect()
}

#[async_trait]
impl ProbePort for FfprobeAdapter {
    async fn probe_streams(&self, file_path: &str) -> Result<Vec<StreamDescriptor>, DomainError> {
        tracing::debug!(path = file_path, ffprobe = %self.ffprobe_path, "probing streams");

        let output = Command::new(&self.ffprobe_path)
            .args(["-v", "quiet", "-print_format", "json", "-show_streams"])
            .arg(file_path)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                DomainError::probe(file_path, format!("failed to run {}: {}", self.ffprobe_path, e))
            })?;

        if !output.status.success() {
            return Err(DomainError::probe(
                file_path,
                format!(
                    "{} exited with {}: {}",
                    self.ffprobe_path,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            ));
        }

        let streams = parse_streams(file_path, &String::from_utf8_lossy(&output.stdout))?;
        tracing::debug!(path = file_path, count = streams.len(), "probe finished");
        Ok(streams)
    }
}
