//! Encoder argument vectors for each output profile

use chrono::Duration;

use crate::adapters::toml_config::TranscodeConfig;
use crate::domain::model::*;
use crate::domain::rules::CodecPolicySelector;
use crate::utils::time::format_sexagesimal;

/// Fragmented MP4 flags so the output can be streamed without seeking
const FRAGMENTED_MP4_FLAGS: &str = "+faststart+frag_keyframe+empty_moov";

/// Target for the encoder's output
const PIPE_TARGET: &str = "pipe:";

/// Assembles full encoder argument vectors from configuration
pub struct ProfileCommandBuilder<'a> {
    config: &'a TranscodeConfig,
}

impl<'a> ProfileCommandBuilder<'a> {
    pub fn new(config: &'a TranscodeConfig) -> Self {
        Self { config }
    }

    /// Arguments for `profile`; `streams` is only consulted by MPEG-TS
    pub fn build(
        &self,
        profile: Profile,
        path: &str,
        window: &TimeWindow,
        streams: &[StreamDescriptor],
    ) -> Vec<String> {
        match profile {
            Profile::MpegTs => self.mpegts(path, window, streams),
            Profile::WebM => self.webm(path, window),
            Profile::ChromecastMp4 => self.chromecast(path, window),
            Profile::WebMp4 => self.web(path, window),
        }
    }

    /// MPEG transport stream with per-stream codec policy
    ///
    /// A zero length still bounds the output here.
    pub fn mpegts(&self, path: &str, window: &TimeWindow, streams: &[StreamDescriptor]) -> Vec<String> {
        let mut args = vec![self.config.encoders.primary.clone()];
        args.extend(self.thread_flags());
        push_start(&mut args, window.start);
        push_length(&mut args, window.bounded_inclusive());
        args.extend(strings(["-i", path]));
        args.extend(CodecPolicySelector::stream_args(streams));
        args.extend(strings(["-f", "mpegts", PIPE_TARGET]));
        args
    }

    /// WebM through the secondary encoder, no per-stream flags
    pub fn webm(&self, path: &str, window: &TimeWindow) -> Vec<String> {
        let mut args = vec![self.config.encoders.secondary.clone()];
        args.extend(self.thread_flags());
        push_start(&mut args, window.start);
        push_length(&mut args, window.bounded_exclusive());
        args.extend(strings(["-i", path, "-f", "webm", PIPE_TARGET]));
        args
    }

    /// Fragmented MP4 with a fixed H.264 high@5.0 encode for cast devices
    pub fn chromecast(&self, path: &str, window: &TimeWindow) -> Vec<String> {
        let mut args = vec![self.config.encoders.primary.clone()];
        push_start(&mut args, window.start);
        args.extend(strings([
            "-i", path,
            "-c:v", "libx264", "-preset", "ultrafast", "-profile:v", "high", "-level", "5.0",
            "-movflags", FRAGMENTED_MP4_FLAGS,
        ]));
        push_length(&mut args, window.bounded_exclusive());
        args.extend(strings(["-f", "mp4", PIPE_TARGET]));
        args
    }

    /// Fragmented MP4 with H.264 video and MP3 audio for browsers
    pub fn web(&self, path: &str, window: &TimeWindow) -> Vec<String> {
        let mut args = vec![self.config.encoders.primary.clone()];
        push_start(&mut args, window.start);
        args.extend(strings([
            "-i", path,
            "-pix_fmt", "yuv420p",
            "-c:v", "libx264", "-crf", "25",
            "-c:a", "mp3", "-ab", "128k", "-ar", "44100",
            "-preset", "ultrafast",
            "-movflags", FRAGMENTED_MP4_FLAGS,
        ]));
        push_length(&mut args, window.bounded_exclusive());
        args.extend(strings(["-f", "mp4", PIPE_TARGET]));
        args
    }

    fn thread_flags(&self) -> Vec<String> {
        vec![
            "-threads".to_string(),
            self.config.threads.to_string(),
            "-async".to_string(),
            "1".to_string(),
        ]
    }
}

fn push_start(args: &mut Vec<String>, start: Duration) {
    args.push("-ss".to_string());
    args.push(format_sexagesimal(start));
}

fn push_length(args: &mut Vec<String>, length: Option<Duration>) {
    if let Some(length) = length {
        args.push("-t".to_string());
        args.push(format_sexagesimal(length));
    }
}

fn strings<const N: usize>(items: [&str; N]) -> impl Iterator<Item = String> + '_ {
    items.into_iter().map(str::to_string)
}
