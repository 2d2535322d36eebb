// avsplice-core/tests/probe_parsing_tests.rs

use avsplice_core::{StreamType, parse_probe_output};

// Trimmed output of `ffprobe -v error -print_format json -show_format -show_streams`
// for an MP4 with H.264 video and AAC audio.
const MP4_OUTPUT: &str = r#"{
    "streams": [
        {
            "index": 0,
            "codec_name": "h264",
            "codec_type": "video",
            "width": 1280,
            "height": 720,
            "r_frame_rate": "30/1",
            "duration": "69.980000",
            "tags": {"language": "und"}
        },
        {
            "index": 1,
            "codec_name": "aac",
            "codec_type": "audio",
            "sample_rate": "48000",
            "channels": 2,
            "duration": "69.973333"
        }
    ],
    "format": {
        "filename": "processed_video.mp4",
        "nb_streams": 2,
        "format_name": "mov,mp4,m4a,3gp,3g2,mj2",
        "start_time": "0.000000",
        "duration": "69.980000",
        "size": "1048576",
        "bit_rate": "119871",
        "probe_score": 100,
        "tags": {"major_brand": "isom", "encoder": "Lavf60.16.100"}
    }
}"#;

#[test]
fn test_mp4_output() -> Result<(), Box<dyn std::error::Error>> {
    let info = parse_probe_output(MP4_OUTPUT.as_bytes())?;

    assert!((info.duration_secs - 69.98).abs() < 1e-9);
    assert_eq!(info.format.get("size").map(String::as_str), Some("1048576"));
    assert_eq!(info.format.get("probe_score").map(String::as_str), Some("100"));
    assert_eq!(
        info.format_tags.get("major_brand").map(String::as_str),
        Some("isom")
    );

    assert_eq!(info.streams.len(), 2);
    assert_eq!(info.streams[0].codec_type, StreamType::Video);
    assert_eq!(info.streams[0].height, Some(720));
    assert_eq!(info.streams[1].codec_type, StreamType::Audio);
    assert_eq!(info.streams[1].sample_rate, Some(48000));
    assert!(info.has_video() && info.has_audio());
    Ok(())
}

#[test]
fn test_audio_only_output() -> Result<(), Box<dyn std::error::Error>> {
    let info = parse_probe_output(
        br#"{
            "streams": [{"index": 0, "codec_name": "mp3", "codec_type": "audio"}],
            "format": {"format_name": "mp3", "duration": "215.640816"}
        }"#,
    )?;
    assert!(!info.has_video());
    assert_eq!(info.audio_streams().count(), 1);
    assert_eq!(info.format_name(), Some("mp3"));
    Ok(())
}

#[test]
fn test_streams_section_is_optional() -> Result<(), Box<dyn std::error::Error>> {
    let info = parse_probe_output(br#"{"format": {"duration": "12"}}"#)?;
    assert_eq!(info.duration_secs, 12.0);
    assert!(info.streams.is_empty());
    Ok(())
}

#[test]
fn test_rejected_outputs() {
    for bad in [
        &b"{}"[..],
        br#"{"format": {}}"#,
        br#"{"format": {"duration": "-1"}}"#,
        br#"{"format": {"duration": "N/A"}}"#,
        b"[FORMAT]\nduration=1.0\n[/FORMAT]",
    ] {
        assert!(
            parse_probe_output(bad).is_err(),
            "accepted {:?}",
            String::from_utf8_lossy(bad)
        );
    }
}
