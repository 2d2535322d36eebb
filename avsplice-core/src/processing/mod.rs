//! Track processing and merge orchestration.
//!
//! This module organizes the steps of one merge into submodules and exposes
//! the primary function for running it.

/// Time windows and crop arithmetic
pub mod window;

/// Single-track extraction with ffmpeg
pub mod track;

/// Muxing of processed tracks
pub mod mux;

/// Merge orchestration
pub mod pipeline;

pub use mux::combine;
pub use pipeline::{MergeReport, MergeRequest, PipelineStage, merge_tracks, validate_inputs};
pub use track::{PROCESSED_AUDIO_FILE, PROCESSED_VIDEO_FILE, extract_track};
pub use window::{CropPlan, TimeWindow, WindowEnd, audio_window};
