// avsplice-core/tests/merge_preflight_tests.rs
//
// Failures that must be reported before any external tool runs. These use
// the real executors; reaching ffmpeg or ffprobe would fail differently.

use avsplice_core::external::{CommandFfprobeExecutor, SidecarSpawner};
use avsplice_core::{
    CoreConfigBuilder, CoreError, InputRole, MergeRequest, PipelineStage, check_dependency,
    merge_tracks,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn request(video: &Path, audio: &Path) -> MergeRequest {
    MergeRequest {
        video_path: video.to_path_buf(),
        audio_path: audio.to_path_buf(),
        crop_start: 0.0,
        crop_end: 0.0,
        audio_start: 0.0,
    }
}

#[test]
fn test_missing_video_is_reported_first() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let config = CoreConfigBuilder::new()
        .output_path(dir.path().join("out.mp4"))
        .ffprobe_path("/nonexistent/ffprobe")
        .ffmpeg_path("/nonexistent/ffmpeg")
        .build();

    let mut stages = Vec::new();
    let result = merge_tracks(
        &SidecarSpawner,
        &CommandFfprobeExecutor::with_binary("/nonexistent/ffprobe"),
        &config,
        &request(&dir.path().join("nope.mkv"), &dir.path().join("nope.mp3")),
        |s| stages.push(s),
    );

    match result {
        Err(CoreError::InputNotFound { role, path }) => {
            assert_eq!(role, InputRole::Video);
            assert_eq!(path, dir.path().join("nope.mkv"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(
        stages,
        vec![PipelineStage::ValidatingInputs, PipelineStage::Failed]
    );
    assert!(!dir.path().join("out.mp4").exists());
    Ok(())
}

#[test]
fn test_missing_audio_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let video = dir.path().join("clip.mkv");
    fs::write(&video, b"not really a video")?;

    let config = CoreConfigBuilder::new()
        .output_path(dir.path().join("out.mp4"))
        .build();
    let err = merge_tracks(
        &SidecarSpawner,
        &CommandFfprobeExecutor::with_binary("/nonexistent/ffprobe"),
        &config,
        &request(&video, &dir.path().join("music.mp3")),
        |_| {},
    )
    .unwrap_err();

    assert_eq!(err.classification(), "InputNotFound");
    assert_eq!(err.to_string(), format!("Audio file not found: {}", dir.path().join("music.mp3").display()));
    Ok(())
}

#[test]
fn test_unstartable_ffprobe_is_a_start_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let video = dir.path().join("clip.mkv");
    let audio = dir.path().join("music.mp3");
    fs::write(&video, b"v")?;
    fs::write(&audio, b"a")?;

    let config = CoreConfigBuilder::new()
        .output_path(dir.path().join("out.mp4"))
        .temp_dir(dir.path().join("work"))
        .build();
    let err = merge_tracks(
        &SidecarSpawner,
        &CommandFfprobeExecutor::with_binary("/nonexistent/ffprobe"),
        &config,
        &request(&video, &audio),
        |_| {},
    )
    .unwrap_err();

    assert_eq!(err.classification(), "CommandStartError");
    // Nothing was created before the first probe.
    assert!(!dir.path().join("work").exists());
    Ok(())
}

#[test]
fn test_output_directory_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let config = CoreConfigBuilder::new()
        .output_path(dir.path().to_path_buf())
        .build();
    let err = merge_tracks(
        &SidecarSpawner,
        &CommandFfprobeExecutor::new(),
        &config,
        &request(&PathBuf::from("a.mkv"), &PathBuf::from("b.mp3")),
        |_| {},
    )
    .unwrap_err();
    assert_eq!(err.classification(), "InvalidInput");
    Ok(())
}

#[test]
fn test_missing_dependency() {
    let err = check_dependency(Path::new("/nonexistent/ffmpeg")).unwrap_err();
    assert!(matches!(err, CoreError::DependencyNotFound(_)));
}
