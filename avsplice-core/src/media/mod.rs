//! Media information and inspection module
//!
//! This module provides the typed metadata produced by ffprobe and the
//! inspection entry point used by the merge pipeline.

pub mod info;
pub mod probe;

// Re-export commonly used types
pub use info::{MediaInfo, StreamInfo, StreamType, parse_probe_output};
pub use probe::inspect;
