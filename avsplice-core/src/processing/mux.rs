//! Muxing of processed video and audio tracks.
//!
//! Both streams are copied verbatim into the output container and the
//! result is truncated to the shorter of the two (`-shortest`).
//!
//! ffmpeg writes into a staging file beside the output; the staging file is
//! renamed over the output only after a clean exit, so a failed mux never
//! touches an existing output.

use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::{FfmpegSpawner, run_ffmpeg};

use ffmpeg_sidecar::command::FfmpegCommand;
use log::{info, warn};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Staging path ffmpeg writes to before the result is moved onto `output`.
///
/// Lives in the same directory as `output` and keeps its extension, so ffmpeg
/// picks the same container: `final_output.mp4` stages as
/// `.final_output.partial.mp4`.
pub fn staging_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match output.extension() {
        Some(ext) => format!(".{stem}.partial.{}", ext.to_string_lossy()),
        None => format!(".{stem}.partial"),
    };
    output.with_file_name(name)
}

fn discard_staging(staging: &Path) {
    match fs::remove_file(staging) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove {}: {}", staging.display(), e),
    }
}

/// Builds the ffmpeg command muxing `video` and `audio` into `output`.
pub fn build_mux_command(
    config: &CoreConfig,
    video: &Path,
    audio: &Path,
    output: &Path,
) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new_with_path(&config.ffmpeg_path);
    cmd.input(video.to_string_lossy().as_ref());
    cmd.input(audio.to_string_lossy().as_ref());
    cmd.args(["-map", "0:v:0"]);
    cmd.args(["-map", "1:a:0"]);
    cmd.args(["-c:v", "copy"]);
    cmd.args(["-c:a", "copy"]);
    cmd.arg("-shortest");
    cmd.arg("-y");
    cmd.output(output.to_string_lossy().as_ref());
    cmd
}

/// Combines the processed tracks into `output`, overwriting it if present.
///
/// Fails with [`CoreError::Mux`] when ffmpeg exits non-zero; `output` is then
/// left exactly as it was before the call.
pub fn combine<S: FfmpegSpawner>(
    spawner: &S,
    config: &CoreConfig,
    video: &Path,
    audio: &Path,
    output: &Path,
) -> CoreResult<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    info!("Muxing tracks to: {}", output.display());
    let staging = staging_path(output);
    let cmd = build_mux_command(config, video, audio, &staging);
    let outcome = match run_ffmpeg(spawner, cmd, "mux") {
        Ok(outcome) => outcome,
        Err(e) => {
            discard_staging(&staging);
            return Err(e);
        }
    };

    if !outcome.success() {
        discard_staging(&staging);
        return Err(CoreError::Mux {
            output: output.to_path_buf(),
            diagnostics: outcome.diagnostics,
        });
    }

    if let Err(e) = fs::rename(&staging, output) {
        discard_staging(&staging);
        return Err(e.into());
    }
    Ok(())
}
