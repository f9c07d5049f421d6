// Domain models - Core types and data structures

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use tokio::io::AsyncWrite;

use crate::domain::errors::DomainError;

/// Kind of elementary stream, as reported by the probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecType {
    Video,
    Audio,
    Subtitle,
    /// Data, attachment or anything the probe reports that we don't map
    Other(String),
}

impl CodecType {
    /// Map the probe's string form onto a codec type
    pub fn parse(kind: &str) -> Self {
        match kind {
            "video" => CodecType::Video,
            "audio" => CodecType::Audio,
            "subtitle" => CodecType::Subtitle,
            other => CodecType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CodecType::Video => "video",
            CodecType::Audio => "audio",
            CodecType::Subtitle => "subtitle",
            CodecType::Other(kind) => kind,
        }
    }
}

impl fmt::Display for CodecType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One probed elementary stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamDescriptor {
    pub index: u32,
    pub codec_type: CodecType,
    pub codec_name: Option<String>,
}

impl StreamDescriptor {
    /// Create a new stream descriptor
    pub fn new(index: u32, codec_type: CodecType, codec_name: impl Into<String>) -> Self {
        Self {
            index,
            codec_type,
            codec_name: Some(codec_name.into()),
        }
    }

    /// Codec name, or the empty string when the probe left it out
    pub fn codec_name(&self) -> &str {
        self.codec_name.as_deref().unwrap_or("")
    }
}

/// Encoder flags selected for a single source stream
///
/// An empty directive drops the stream from the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderDirective {
    index: u32,
    flags: Vec<String>,
}

impl EncoderDirective {
    /// Directive that omits the stream entirely
    pub fn skip(index: u32) -> Self {
        Self {
            index,
            flags: Vec::new(),
        }
    }

    /// Directive with the given flags for the stream at `index`
    pub fn with_flags<I, S>(index: u32, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            index,
            flags: flags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Flags followed by the `-map 0:<index>` selector, or nothing when empty
    pub fn into_args(self) -> Vec<String> {
        if self.flags.is_empty() {
            return Vec::new();
        }
        let mut args = self.flags;
        args.push("-map".to_string());
        args.push(format!("0:{}", self.index));
        args
    }
}

/// Start offset and length of the requested slice of the source
///
/// A negative length means "until the end of the source".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: Duration,
    pub length: Duration,
}

impl TimeWindow {
    /// Create a window, rejecting negative start offsets
    pub fn new(start: Duration, length: Duration) -> Result<Self, DomainError> {
        if start < Duration::zero() {
            return Err(DomainError::BadArgs(
                "Start offset cannot be negative".to_string(),
            ));
        }
        Ok(Self { start, length })
    }

    /// Whole source from the beginning
    pub fn full() -> Self {
        Self {
            start: Duration::zero(),
            length: Duration::seconds(-1),
        }
    }

    /// Whole source from `start`
    pub fn from_start(start: Duration) -> Result<Self, DomainError> {
        Self::new(start, Duration::seconds(-1))
    }

    /// Length bound when zero counts as a bound (MPEG-TS profile)
    pub fn bounded_inclusive(&self) -> Option<Duration> {
        (self.length >= Duration::zero()).then_some(self.length)
    }

    /// Length bound when zero means unbounded (all other profiles)
    pub fn bounded_exclusive(&self) -> Option<Duration> {
        (self.length > Duration::zero()).then_some(self.length)
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::full()
    }
}

/// Output profile targeting a class of receiving device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    /// MPEG transport stream for DLNA renderers, per-stream codec policy
    MpegTs,
    /// Legacy web video through the secondary encoder
    WebM,
    /// Fragmented MP4 with a fixed H.264 profile for cast devices
    ChromecastMp4,
    /// Fragmented MP4 with H.264 and MP3 for browsers
    WebMp4,
}

impl Profile {
    pub const ALL: [Profile; 4] = [
        Profile::MpegTs,
        Profile::WebM,
        Profile::ChromecastMp4,
        Profile::WebMp4,
    ];

    /// Stable name used by the CLI and configuration
    pub fn name(&self) -> &'static str {
        match self {
            Profile::MpegTs => "mpegts",
            Profile::WebM => "webm",
            Profile::ChromecastMp4 => "chromecast",
            Profile::WebMp4 => "web",
        }
    }

    /// Content type of the produced stream
    pub fn mime_type(&self) -> &'static str {
        match self {
            Profile::MpegTs => "video/mpeg",
            Profile::WebM => "video/webm",
            Profile::ChromecastMp4 | Profile::WebMp4 => "video/mp4",
        }
    }

    /// Whether building this profile needs stream metadata
    pub fn needs_probe(&self) -> bool {
        matches!(self, Profile::MpegTs)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Profile {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Profile::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                DomainError::BadArgs(format!(
                    "Unknown profile: {}. Valid profiles: mpegts, webm, chromecast, web",
                    s
                ))
            })
    }
}

/// Destination for the encoder's error output
pub enum DiagnosticSink {
    /// Share the host process's stderr
    Inherit,
    /// Drop everything
    Discard,
    /// Append to an open file
    File(std::fs::File),
    /// Copy into an async writer for as long as the encoder writes
    Writer(Box<dyn AsyncWrite + Send + Unpin>),
}

impl DiagnosticSink {
    /// Wrap any async writer
    pub fn writer<W>(writer: W) -> Self
    where
        W: AsyncWrite + Send + Unpin + 'static,
    {
        DiagnosticSink::Writer(Box::new(writer))
    }
}

impl fmt::Debug for DiagnosticSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSink::Inherit => f.write_str("Inherit"),
            DiagnosticSink::Discard => f.write_str("Discard"),
            DiagnosticSink::File(file) => f.debug_tuple("File").field(file).finish(),
            DiagnosticSink::Writer(_) => f.write_str("Writer(..)"),
        }
    }
}

/// Input to a profile command builder
#[derive(Debug)]
pub struct TranscodeRequest {
    pub path: String,
    pub window: TimeWindow,
    pub sink: DiagnosticSink,
}

impl TranscodeRequest {
    pub fn new(path: impl Into<String>, window: TimeWindow, sink: DiagnosticSink) -> Self {
        Self {
            path: path.into(),
            window,
            sink,
        }
    }
}
