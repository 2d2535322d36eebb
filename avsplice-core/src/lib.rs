//! Core library for merging a cropped video track with a time-shifted audio
//! track using ffmpeg and ffprobe.
//!
//! The merge crops seconds off the start and end of a video, cuts an audio
//! source to the cropped video's real duration starting at a chosen offset,
//! and muxes both tracks into one output file. Intermediate tracks live in a
//! temporary directory that is removed whatever the outcome.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use avsplice_core::{CoreConfigBuilder, MergeRequest, merge_tracks};
//! use avsplice_core::external::{CommandFfprobeExecutor, SidecarSpawner};
//! use std::path::PathBuf;
//!
//! let config = CoreConfigBuilder::new()
//!     .output_path(PathBuf::from("final_output.mp4"))
//!     .build();
//! config.validate().unwrap();
//!
//! let request = MergeRequest {
//!     video_path: PathBuf::from("/path/to/clip.mkv"),
//!     audio_path: PathBuf::from("/path/to/music.mp3"),
//!     crop_start: 10.0,
//!     crop_end: 20.0,
//!     audio_start: 5.0,
//! };
//!
//! let report = merge_tracks(
//!     &SidecarSpawner,
//!     &CommandFfprobeExecutor::new(),
//!     &config,
//!     &request,
//!     |stage| log::info!("{stage}"),
//! )
//! .unwrap();
//! println!("{} bytes written", report.output_size);
//! ```

pub mod config;
pub mod error;
pub mod external;
pub mod media;
pub mod processing;
pub mod temp_files;
pub mod utils;

// Re-exports for public API
pub use config::{CoreConfig, CoreConfigBuilder};
pub use error::{CoreError, CoreResult, InputRole, TrackKind};
pub use external::{CommandFfprobeExecutor, SidecarSpawner, check_dependency};
pub use media::{MediaInfo, StreamInfo, StreamType, inspect, parse_probe_output};
pub use processing::{
    CropPlan, MergeReport, MergeRequest, PipelineStage, TimeWindow, WindowEnd, audio_window,
    merge_tracks,
};
pub use temp_files::create_temp_dir;
pub use utils::{format_bytes, format_duration, parse_seconds};
