//! Configuration structures and constants for the avsplice-core library.
//!
//! This module controls where the merged file is written, where intermediate
//! tracks live while a merge is running, and which codecs and tool binaries
//! the pipeline hands to ffmpeg/ffprobe.

mod builder;

use std::path::PathBuf;

use crate::error::{CoreError, CoreResult};

pub use builder::CoreConfigBuilder;

// Default constants

/// Default output file, relative to the current working directory.
pub const DEFAULT_OUTPUT_FILE: &str = "final_output.mp4";

/// Default encoder used when re-encoding the cropped video track.
pub const DEFAULT_VIDEO_CODEC: &str = "libx264";

/// Default encoder used when re-encoding the shifted audio track.
pub const DEFAULT_AUDIO_CODEC: &str = "aac";

/// Default ffmpeg binary, resolved through `PATH`.
pub const DEFAULT_FFMPEG_BINARY: &str = "ffmpeg";

/// Default ffprobe binary, resolved through `PATH`.
pub const DEFAULT_FFPROBE_BINARY: &str = "ffprobe";

/// Main configuration structure for the avsplice-core library.
///
/// Created by the consumer of the library (e.g. avsplice-cli) and passed to
/// [`crate::merge_tracks`]. All fields have defaults; the builder provides a
/// fluent way to override them.
///
/// # Examples
///
/// ```rust
/// use avsplice_core::config::CoreConfigBuilder;
///
/// let config = CoreConfigBuilder::new()
///     .output_path("merged.mp4")
///     .temp_dir("/tmp/avsplice")
///     .video_codec("libx265")
///     .build();
/// assert_eq!(config.audio_codec, "aac");
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Path of the merged output file
    pub output_path: PathBuf,

    /// Optional base directory for the scoped temp directory (defaults to the
    /// system temp directory)
    pub temp_dir: Option<PathBuf>,

    /// ffmpeg encoder for the video track
    pub video_codec: String,

    /// ffmpeg encoder for the audio track
    pub audio_codec: String,

    /// ffmpeg executable
    pub ffmpeg_path: PathBuf,

    /// ffprobe executable
    pub ffprobe_path: PathBuf,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            temp_dir: None,
            video_codec: DEFAULT_VIDEO_CODEC.to_string(),
            audio_codec: DEFAULT_AUDIO_CODEC.to_string(),
            ffmpeg_path: PathBuf::from(DEFAULT_FFMPEG_BINARY),
            ffprobe_path: PathBuf::from(DEFAULT_FFPROBE_BINARY),
        }
    }
}

impl CoreConfig {
    /// Checks that the configuration can be used for a merge.
    pub fn validate(&self) -> CoreResult<()> {
        if self.video_codec.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "video codec must not be empty".to_string(),
            ));
        }
        if self.audio_codec.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "audio codec must not be empty".to_string(),
            ));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(CoreError::InvalidInput(
                "output path must not be empty".to_string(),
            ));
        }
        if self.output_path.is_dir() {
            return Err(CoreError::InvalidInput(format!(
                "output path '{}' is a directory",
                self.output_path.display()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = CoreConfig::default();
        assert_eq!(config.output_path, PathBuf::from("final_output.mp4"));
        assert_eq!(config.video_codec, "libx264");
        assert_eq!(config.audio_codec, "aac");
        assert!(config.temp_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_codec() {
        let config = CoreConfig {
            audio_codec: " ".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_rejects_directory_output() {
        let dir = tempdir().unwrap();
        let config = CoreConfig {
            output_path: dir.path().to_path_buf(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("is a directory"));
    }
}
