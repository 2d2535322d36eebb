use assert_cmd::Command;
use predicates::str::contains;
use std::error::Error;
use std::fs;
use tempfile::tempdir;

// Helper function to get the path to the compiled binary
fn avsplice_cmd() -> Command {
    let mut cmd = Command::cargo_bin("avsplice").expect("Failed to find avsplice binary");
    for var in [
        "AVSPLICE_OUTPUT",
        "AVSPLICE_TEMP_DIR",
        "AVSPLICE_VIDEO_CODEC",
        "AVSPLICE_AUDIO_CODEC",
        "AVSPLICE_FFMPEG",
        "AVSPLICE_FFPROBE",
        "AVSPLICE_LOG_DIR",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_help_lists_commands() -> Result<(), Box<dyn Error>> {
    avsplice_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("merge"))
        .stdout(contains("info"))
        .stdout(contains("--crop-start"));
    Ok(())
}

#[test]
fn test_missing_video_flag_fails() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let audio = dir.path().join("music.mp3");
    fs::write(&audio, "dummy audio")?;

    avsplice_cmd()
        .arg("--video")
        .arg(dir.path().join("nope.mkv"))
        .arg("--audio")
        .arg(&audio)
        .assert()
        .failure()
        .code(1)
        .stderr(contains("InputNotFound"))
        .stderr(contains("Video file not found"));
    Ok(())
}

#[test]
fn test_missing_audio_from_prompt_fails() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let video = dir.path().join("clip.mkv");
    fs::write(&video, "dummy video")?;
    let answers = format!("{}\n{}\n", video.display(), dir.path().join("nope.mp3").display());

    avsplice_cmd()
        .arg("merge")
        .write_stdin(answers)
        .assert()
        .code(1)
        .stdout(contains("Enter the path to the video file"))
        .stdout(contains("Enter the path to the audio file"))
        .stderr(contains("Audio file not found"));
    Ok(())
}

#[test]
fn test_no_answers_is_invalid_input() -> Result<(), Box<dyn Error>> {
    avsplice_cmd()
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(contains("InvalidInput"));
    Ok(())
}

#[test]
fn test_invalid_time_flag_is_argument_error() -> Result<(), Box<dyn Error>> {
    avsplice_cmd()
        .args(["merge", "--crop-start", "soon"])
        .assert()
        .code(2)
        .stderr(contains("not a valid time"));
    Ok(())
}

#[test]
fn test_merge_flags_before_subcommand_are_rejected() -> Result<(), Box<dyn Error>> {
    avsplice_cmd()
        .args(["--video", "clip.mkv", "merge", "--audio", "music.mp3"])
        .assert()
        .code(2)
        .stderr(contains("--video must be given after the 'merge' subcommand"));
    Ok(())
}

#[test]
fn test_missing_ffprobe_is_reported() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let video = dir.path().join("clip.mkv");
    let audio = dir.path().join("music.mp3");
    fs::write(&video, "v")?;
    fs::write(&audio, "a")?;

    avsplice_cmd()
        .env("AVSPLICE_FFPROBE", dir.path().join("no-ffprobe"))
        .arg("--video")
        .arg(&video)
        .arg("--audio")
        .arg(&audio)
        .assert()
        .code(1)
        .stderr(contains("DependencyNotFound"));
    Ok(())
}

#[test]
fn test_info_on_missing_file() -> Result<(), Box<dyn Error>> {
    avsplice_cmd()
        .args(["info", "surely/this/does/not/exist.mkv"])
        .assert()
        .code(1)
        .stderr(contains("file not found"));
    Ok(())
}

#[test]
fn test_log_dir_receives_log_file() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let logs = dir.path().join("logs");

    avsplice_cmd()
        .arg("--log-dir")
        .arg(&logs)
        .arg("--video")
        .arg(dir.path().join("nope.mkv"))
        .arg("--audio")
        .arg(dir.path().join("nope.mp3"))
        .assert()
        .code(1);

    let entries: Vec<_> = fs::read_dir(&logs)?.collect::<Result<_, _>>()?;
    assert_eq!(entries.len(), 1);
    let name = entries[0].file_name().to_string_lossy().into_owned();
    assert!(name.starts_with("avsplice_") && name.ends_with(".log"));
    let contents = fs::read_to_string(entries[0].path())?;
    assert!(contents.contains("InputNotFound"));
    assert!(!contents.contains('\u{1b}'));
    Ok(())
}
