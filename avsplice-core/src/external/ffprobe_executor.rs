//! FFprobe integration for media inspection.
//!
//! The executor runs ffprobe as a child process and hands its JSON output to
//! [`parse_probe_output`]. A non-zero exit or unusable output becomes
//! [`CoreError::Probe`](crate::error::CoreError::Probe).

use crate::error::{CoreResult, command_start_error, probe_error};
use crate::media::info::{MediaInfo, parse_probe_output};

use std::path::{Path, PathBuf};
use std::process::Command;

/// Trait for anything that can produce [`MediaInfo`] for a file.
pub trait FfprobeExecutor {
    /// Inspects `input_path` and returns its container and stream metadata.
    fn probe(&self, input_path: &Path) -> CoreResult<MediaInfo>;
}

/// [`FfprobeExecutor`] backed by the ffprobe binary.
#[derive(Debug, Clone)]
pub struct CommandFfprobeExecutor {
    binary: PathBuf,
}

impl Default for CommandFfprobeExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandFfprobeExecutor {
    pub fn new() -> Self {
        Self::with_binary(crate::config::DEFAULT_FFPROBE_BINARY)
    }

    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn build_command(&self, input_path: &Path) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ]);
        cmd.arg(input_path);
        cmd
    }
}

impl FfprobeExecutor for CommandFfprobeExecutor {
    fn probe(&self, input_path: &Path) -> CoreResult<MediaInfo> {
        let mut cmd = self.build_command(input_path);
        log::debug!("Running ffprobe: {:?}", cmd);

        let output = cmd
            .output()
            .map_err(|e| command_start_error(self.binary.display().to_string(), e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            log::error!(
                "ffprobe failed for {} ({}): {}",
                input_path.display(),
                output.status,
                stderr
            );
            let reason = if stderr.is_empty() {
                format!("ffprobe exited with {}", output.status)
            } else {
                format!("{stderr} ({})", output.status)
            };
            return Err(probe_error(input_path, reason));
        }

        parse_probe_output(&output.stdout).map_err(|reason| {
            log::error!("Could not parse ffprobe output for {}: {}", input_path.display(), reason);
            probe_error(input_path, reason)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_arguments() {
        let executor = CommandFfprobeExecutor::with_binary("/opt/bin/ffprobe");
        let cmd = executor.build_command(Path::new("clip.mkv"));
        assert_eq!(cmd.get_program(), "/opt/bin/ffprobe");
        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            [
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
                "clip.mkv"
            ]
        );
    }

    #[test]
    fn test_missing_binary_is_a_start_error() {
        let executor = CommandFfprobeExecutor::with_binary("/nonexistent/avsplice-ffprobe");
        let err = executor.probe(Path::new("clip.mkv")).unwrap_err();
        assert_eq!(err.classification(), "CommandStartError");
    }
}
