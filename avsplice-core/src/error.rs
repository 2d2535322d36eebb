// ============================================================================
// avsplice-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for the Merge Pipeline
//
// Every failure in the pipeline is terminal for the current merge and is
// reported through `CoreError`. Variants that originate in ffmpeg/ffprobe carry
// the tool's raw diagnostic text so callers can show it verbatim.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Which of the two merge inputs an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRole {
    Video,
    Audio,
}

impl fmt::Display for InputRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputRole::Video => f.write_str("Video"),
            InputRole::Audio => f.write_str("Audio"),
        }
    }
}

/// Track type processed by a transcode step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Video,
    Audio,
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackKind::Video => f.write_str("video"),
            TrackKind::Audio => f.write_str("audio"),
        }
    }
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("{role} file not found: {}", .path.display())]
    InputNotFound { role: InputRole, path: PathBuf },

    #[error("ffprobe failed for {}: {reason}", .path.display())]
    Probe { path: PathBuf, reason: String },

    #[error(
        "Invalid cropping values: cropping {crop_start:.2}s from the start and {crop_end:.2}s from the end of a {original_duration:.2}s video leaves {remaining:.2}s"
    )]
    InvalidCropRange {
        original_duration: f64,
        crop_start: f64,
        crop_end: f64,
        remaining: f64,
    },

    #[error("Invalid time window: {0}")]
    InvalidWindow(String),

    #[error("ffmpeg failed while processing the {track} track")]
    Transcode { track: TrackKind, diagnostics: String },

    #[error("ffmpeg failed while muxing into {}", .output.display())]
    Mux { output: PathBuf, diagnostics: String },

    #[error("Failed to start {0}: {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Required dependency '{0}' not found")]
    DependencyNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Stable name of the error class, used when reporting failures.
    pub fn classification(&self) -> &'static str {
        match self {
            CoreError::InputNotFound { .. } => "InputNotFound",
            CoreError::Probe { .. } => "ProbeError",
            CoreError::InvalidCropRange { .. } => "InvalidCropRange",
            CoreError::InvalidWindow(_) => "InvalidWindow",
            CoreError::Transcode { .. } => "TranscodeError",
            CoreError::Mux { .. } => "MuxError",
            CoreError::CommandStart(..) => "CommandStartError",
            CoreError::DependencyNotFound(_) => "DependencyNotFound",
            CoreError::InvalidInput(_) => "InvalidInput",
            CoreError::Io(_) => "IoError",
        }
    }

    /// Raw diagnostic text emitted by the external tool, if any.
    pub fn diagnostics(&self) -> Option<&str> {
        match self {
            CoreError::Transcode { diagnostics, .. } | CoreError::Mux { diagnostics, .. } => {
                Some(diagnostics.as_str()).filter(|d| !d.trim().is_empty())
            }
            _ => None,
        }
    }
}

pub fn command_start_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

pub fn probe_error(path: impl Into<PathBuf>, reason: impl Into<String>) -> CoreError {
    CoreError::Probe {
        path: path.into(),
        reason: reason.into(),
    }
}
