// Unit tests for codec policy rules

use super::*;

fn stream(index: u32, kind: &str, codec: &str) -> StreamDescriptor {
    StreamDescriptor::new(index, CodecType::parse(kind), codec)
}

#[test]
fn test_video_always_gets_target() {
    for codec in ["h264", "hevc", "mpeg2video", "vp9"] {
        let directive = CodecPolicySelector::select(&stream(0, "video", codec));
        assert_eq!(
            directive.into_args(),
            vec!["-target", "pal-dvd", "-map", "0:0"]
        );
    }
}

#[test]
fn test_dts_audio_is_downmixed_to_ac3() {
    let directive = CodecPolicySelector::select(&stream(1, "audio", "dca"));
    assert_eq!(
        directive.into_args(),
        vec!["-acodec", "ac3", "-ab", "224k", "-ac", "2", "-map", "0:1"]
    );
}

#[test]
fn test_non_dts_audio_is_copied() {
    for (index, codec) in [(1, "aac"), (2, "ac3"), (5, "flac"), (9, "")] {
        let args = CodecPolicySelector::select(&stream(index, "audio", codec)).into_args();
        assert_eq!(&args[..2], ["-acodec", "copy"]);
        assert_eq!(args[args.len() - 2], "-map");
        assert_eq!(args[args.len() - 1], format!("0:{}", index));
    }
}

#[test]
fn test_audio_without_codec_name_is_copied() {
    let descriptor = StreamDescriptor {
        index: 3,
        codec_type: CodecType::Audio,
        codec_name: None,
    };
    assert_eq!(
        CodecPolicySelector::select(&descriptor).into_args(),
        vec!["-acodec", "copy", "-map", "0:3"]
    );
}

#[test]
fn test_subtitle_is_copied() {
    let directive = CodecPolicySelector::select(&stream(2, "subtitle", "subrip"));
    assert_eq!(
        directive.into_args(),
        vec!["-scodec", "copy", "-map", "0:2"]
    );
}

#[test]
fn test_other_stream_types_are_dropped() {
    for kind in ["data", "attachment", ""] {
        let directive = CodecPolicySelector::select(&stream(4, kind, "ttf"));
        assert!(directive.is_empty());
        assert!(directive.into_args().is_empty());
    }
}

#[test]
fn test_stream_args_keeps_probe_order_and_skips_dropped() {
    let streams = vec![
        stream(0, "video", "h264"),
        stream(1, "attachment", "ttf"),
        stream(2, "audio", "dca"),
        stream(3, "subtitle", "ass"),
    ];
    let args = CodecPolicySelector::stream_args(&streams);
    assert_eq!(
        args,
        vec![
            "-target", "pal-dvd", "-map", "0:0",
            "-acodec", "ac3", "-ab", "224k", "-ac", "2", "-map", "0:2",
            "-scodec", "copy", "-map", "0:3",
        ]
    );
    assert!(!args.contains(&"0:1".to_string()));
}
