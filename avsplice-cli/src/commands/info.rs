//! Implementation of the 'info' subcommand.
//!
//! Runs the media inspector on one file and prints its container format,
//! duration and streams, or the parsed metadata as JSON.

use crate::cli::InfoArgs;
use crate::error::{CliResult, input_error};
use crate::terminal::{print_section, print_status};

use avsplice_core::external::{CommandFfprobeExecutor, FfprobeExecutor};
use avsplice_core::{MediaInfo, StreamInfo, StreamType, check_dependency, format_bytes, format_duration, inspect};

use std::io;
use std::path::Path;

/// One-line description of a stream, e.g. "#0 Video h264 1920x1080".
pub fn describe_stream(stream: &StreamInfo) -> String {
    let mut parts = vec![
        format!("#{}", stream.index),
        stream.codec_type.to_string(),
        stream.codec_name.clone().unwrap_or_else(|| "unknown".to_string()),
    ];
    match stream.codec_type {
        StreamType::Video => {
            if let (Some(w), Some(h)) = (stream.width, stream.height) {
                parts.push(format!("{w}x{h}"));
            }
        }
        StreamType::Audio => {
            if let Some(channels) = stream.channels {
                parts.push(format!("{channels}ch"));
            }
            if let Some(rate) = stream.sample_rate {
                parts.push(format!("{rate} Hz"));
            }
        }
        _ => {}
    }
    if let Some(duration) = stream.duration_secs {
        parts.push(format_duration(duration));
    }
    parts.join(" ")
}

fn print_media_info(path: &Path, info: &MediaInfo) {
    print_section("Media info");
    print_status("File", &path.display().to_string());
    print_status("Format", info.format_name().unwrap_or("unknown"));
    print_status("Duration", &format_duration(info.duration_secs));
    if let Some(size) = info.format.get("size").and_then(|s| s.parse::<u64>().ok()) {
        print_status("Size", &format_bytes(size));
    }
    for (key, value) in &info.format_tags {
        print_status(key, value);
    }

    print_section("Streams");
    if info.streams.is_empty() {
        println!("  (none)");
    }
    for stream in &info.streams {
        println!("  {}", describe_stream(stream));
    }
}

/// Inspects `path` and prints the result.
pub fn show_info<P: FfprobeExecutor>(prober: &P, path: &Path, json: bool) -> CliResult<()> {
    let info = inspect(prober, path)?;
    if json {
        let text = serde_json::to_string_pretty(&info).map_err(io::Error::other)?;
        println!("{text}");
    } else {
        print_media_info(path, &info);
    }
    Ok(())
}

/// Entry point for `avsplice info`.
pub fn run_info(args: InfoArgs) -> CliResult<()> {
    if !args.file.exists() {
        return Err(input_error(format!("file not found: {}", args.file.display())));
    }
    check_dependency(&args.ffprobe)?;
    let prober = CommandFfprobeExecutor::with_binary(&args.ffprobe);
    show_info(&prober, &args.file, args.json)
}
