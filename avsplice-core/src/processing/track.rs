// ============================================================================
// avsplice-core/src/processing/track.rs
// ============================================================================
//
// TRACK PROCESSING: Single-Track Extraction with ffmpeg
//
// Produces a new file holding one track type (video-only or audio-only) cut
// to a time window. The window has already been validated and resolved to
// absolute source positions by the caller.
//
// Video: -i SRC -ss START -to END -c:v CODEC -an -y DEST/processed_video.mp4
// Audio: -i SRC -ss START -t SPAN -c:a CODEC -vn -y DEST/processed_audio.mka
//
// The audio intermediate is Matroska so any configured audio encoder fits.

use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult, TrackKind};
use crate::external::{FfmpegSpawner, run_ffmpeg};
use crate::processing::window::TimeWindow;

use ffmpeg_sidecar::command::FfmpegCommand;
use log::{debug, info};

use std::path::{Path, PathBuf};

/// File name of the processed video inside the working directory.
pub const PROCESSED_VIDEO_FILE: &str = "processed_video.mp4";

/// File name of the processed audio inside the working directory.
pub const PROCESSED_AUDIO_FILE: &str = "processed_audio.mka";

/// Output file name for a track kind.
pub fn processed_file_name(kind: TrackKind) -> &'static str {
    match kind {
        TrackKind::Video => PROCESSED_VIDEO_FILE,
        TrackKind::Audio => PROCESSED_AUDIO_FILE,
    }
}

/// Renders seconds the way they are passed to ffmpeg (millisecond precision).
pub fn format_seconds(secs: f64) -> String {
    format!("{secs:.3}")
}

/// Builds the ffmpeg command extracting `kind` from `source` into `output`.
pub fn build_track_command(
    config: &CoreConfig,
    source: &Path,
    window: &TimeWindow,
    kind: TrackKind,
    output: &Path,
) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new_with_path(&config.ffmpeg_path);
    cmd.input(source.to_string_lossy().as_ref());
    cmd.args(["-ss", &format_seconds(window.start_secs())]);

    match kind {
        TrackKind::Video => {
            if let Some(end) = window.end_secs() {
                cmd.args(["-to", &format_seconds(end)]);
            }
            cmd.args(["-c:v", &config.video_codec]);
            cmd.arg("-an");
        }
        TrackKind::Audio => {
            if let Some(span) = window.span_secs() {
                cmd.args(["-t", &format_seconds(span)]);
            }
            cmd.args(["-c:a", &config.audio_codec]);
            cmd.arg("-vn");
        }
    }

    cmd.arg("-y");
    cmd.output(output.to_string_lossy().as_ref());
    cmd
}

/// Extracts one track of `source`, cut to `window`, into `dest_dir`.
///
/// Writes exactly one file, overwriting a previous file of the same name.
/// Fails with [`CoreError::Transcode`] carrying ffmpeg's trailing log output
/// when ffmpeg exits non-zero or leaves no output file behind.
pub fn extract_track<S: FfmpegSpawner>(
    spawner: &S,
    config: &CoreConfig,
    source: &Path,
    window: &TimeWindow,
    kind: TrackKind,
    dest_dir: &Path,
) -> CoreResult<PathBuf> {
    let output_path = dest_dir.join(processed_file_name(kind));
    info!(
        "Extracting {} track from {} (start {}s, {})",
        kind,
        source.display(),
        format_seconds(window.start_secs()),
        match window.end_secs() {
            Some(end) => format!("end {}s", format_seconds(end)),
            None => "to end".to_string(),
        }
    );

    let cmd = build_track_command(config, source, window, kind, &output_path);
    let outcome = run_ffmpeg(spawner, cmd, &format!("{kind} track"))?;

    if !outcome.success() {
        return Err(CoreError::Transcode {
            track: kind,
            diagnostics: outcome.diagnostics,
        });
    }
    if !output_path.exists() {
        return Err(CoreError::Transcode {
            track: kind,
            diagnostics: format!(
                "ffmpeg exited successfully but did not create {}",
                output_path.display()
            ),
        });
    }

    debug!("{} track written to {}", kind, output_path.display());
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::mocks::MockFfmpegSpawner;
    use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
    use tempfile::tempdir;

    fn value_after(args: &[String], flag: &str) -> Option<String> {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1).cloned())
    }

    #[test]
    fn test_video_command_arguments() {
        let config = CoreConfig::default();
        let window = TimeWindow::new(10.0, 80.0).unwrap();
        let cmd = build_track_command(
            &config,
            Path::new("in.mkv"),
            &window,
            TrackKind::Video,
            Path::new("/work/processed_video.mp4"),
        );
        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(value_after(&args, "-i").as_deref(), Some("in.mkv"));
        assert_eq!(value_after(&args, "-ss").as_deref(), Some("10.000"));
        assert_eq!(value_after(&args, "-to").as_deref(), Some("80.000"));
        assert_eq!(value_after(&args, "-c:v").as_deref(), Some("libx264"));
        assert!(args.iter().any(|a| a == "-an"));
        assert!(args.iter().any(|a| a == "-y"));
        assert!(!args.iter().any(|a| a == "-t" || a == "-c:a"));
        assert_eq!(args.last().map(String::as_str), Some("/work/processed_video.mp4"));
    }

    #[test]
    fn test_audio_command_arguments() {
        let config = CoreConfig {
            audio_codec: "libopus".to_string(),
            ..Default::default()
        };
        let window = TimeWindow::with_span(5.0, 69.98).unwrap();
        let output = Path::new("/work").join(processed_file_name(TrackKind::Audio));
        let cmd = build_track_command(
            &config,
            Path::new("music.mp3"),
            &window,
            TrackKind::Audio,
            &output,
        );
        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(value_after(&args, "-ss").as_deref(), Some("5.000"));
        assert_eq!(value_after(&args, "-t").as_deref(), Some("69.980"));
        assert_eq!(value_after(&args, "-c:a").as_deref(), Some("libopus"));
        assert!(args.iter().any(|a| a == "-vn"));
        assert!(!args.iter().any(|a| a == "-to" || a == "-an"));
        assert_eq!(args.last().map(String::as_str), Some("/work/processed_audio.mka"));
    }

    #[test]
    fn test_open_window_has_no_end_argument() {
        let window = TimeWindow::to_end(2.5).unwrap();
        let cmd = build_track_command(
            &CoreConfig::default(),
            Path::new("in.mkv"),
            &window,
            TrackKind::Video,
            Path::new("out.mp4"),
        );
        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(value_after(&args, "-ss").as_deref(), Some("2.500"));
        assert!(!args.iter().any(|a| a == "-to"));
    }

    #[test]
    fn test_extract_track_success() {
        let work = tempdir().unwrap();
        let spawner = MockFfmpegSpawner::new();
        spawner.add_success_expectation("libx264", vec![], true);

        let window = TimeWindow::new(0.0, 12.0).unwrap();
        let path = extract_track(
            &spawner,
            &CoreConfig::default(),
            Path::new("in.mkv"),
            &window,
            TrackKind::Video,
            work.path(),
        )
        .unwrap();

        assert_eq!(path, work.path().join(PROCESSED_VIDEO_FILE));
        assert!(path.exists());
        assert_eq!(spawner.get_received_calls().len(), 1);
    }

    #[test]
    fn test_extract_track_failure_carries_diagnostics() {
        let work = tempdir().unwrap();
        let spawner = MockFfmpegSpawner::new();
        spawner.add_exit_error_expectation(
            "aac",
            vec![
                FfmpegEvent::Log(LogLevel::Info, "Input #0, mp3, from 'music.mp3':".to_string()),
                FfmpegEvent::Log(
                    LogLevel::Error,
                    "music.mp3: Invalid data found when processing input".to_string(),
                ),
            ],
            1,
        );

        let window = TimeWindow::with_span(500.0, 10.0).unwrap();
        let err = extract_track(
            &spawner,
            &CoreConfig::default(),
            Path::new("music.mp3"),
            &window,
            TrackKind::Audio,
            work.path(),
        )
        .unwrap_err();

        match err {
            CoreError::Transcode { track, ref diagnostics } => {
                assert_eq!(track, TrackKind::Audio);
                assert!(diagnostics.contains("Invalid data found"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!work.path().join(PROCESSED_AUDIO_FILE).exists());
    }

    #[test]
    fn test_extract_track_without_output_file_fails() {
        let work = tempdir().unwrap();
        let spawner = MockFfmpegSpawner::new();
        spawner.add_success_expectation("libx264", vec![], false);

        let window = TimeWindow::new(0.0, 1.0).unwrap();
        let err = extract_track(
            &spawner,
            &CoreConfig::default(),
            Path::new("in.mkv"),
            &window,
            TrackKind::Video,
            work.path(),
        )
        .unwrap_err();
        assert_eq!(err.classification(), "TranscodeError");
        assert!(err.diagnostics().unwrap().contains("did not create"));
    }
}
