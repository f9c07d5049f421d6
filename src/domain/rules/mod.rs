// Domain rules - Per-stream codec policy

use crate::domain::model::*;

/// Named target the encoder applies to every video stream
pub const VIDEO_TARGET: &str = "pal-dvd";

/// Source audio codec that DLNA renderers commonly reject
const DTS_CODEC: &str = "dca";

/// Business rules for per-stream encoder flags
pub struct CodecPolicySelector;

impl CodecPolicySelector {
    /// Select encoder flags for a probed stream
    ///
    /// Total and deterministic. Video always gets the fixed target, DTS
    /// audio is downmixed to stereo AC-3, other audio and subtitles are
    /// copied, and any other stream type is dropped.
    pub fn select(stream: &StreamDescriptor) -> EncoderDirective {
        let index = stream.index;
        match stream.codec_type {
            CodecType::Video => EncoderDirective::with_flags(index, ["-target", VIDEO_TARGET]),
            CodecType::Audio if stream.codec_name() == DTS_CODEC => EncoderDirective::with_flags(
                index,
                ["-acodec", "ac3", "-ab", "224k", "-ac", "2"],
            ),
            CodecType::Audio => EncoderDirective::with_flags(index, ["-acodec", "copy"]),
            CodecType::Subtitle => EncoderDirective::with_flags(index, ["-scodec", "copy"]),
            CodecType::Other(_) => EncoderDirective::skip(index),
        }
    }

    /// Concatenate the non-empty directives for all streams, in probe order
    pub fn stream_args(streams: &[StreamDescriptor]) -> Vec<String> {
        streams
            .iter()
            .flat_map(|stream| Self::select(stream).into_args())
            .collect()
    }
}

#[cfg(test)]
mod tests;
