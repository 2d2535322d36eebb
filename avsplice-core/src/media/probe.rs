//! Media inspection.
//!
//! [`inspect`] is the single entry point the pipeline uses to learn a file's
//! duration and streams. It spawns one ffprobe process through the given
//! executor and never writes to the filesystem.

use std::path::Path;

use crate::error::CoreResult;
use crate::external::FfprobeExecutor;
use crate::media::info::MediaInfo;

/// Inspects `path` and returns its metadata.
///
/// Fails with [`CoreError::Probe`](crate::CoreError::Probe) when ffprobe exits
/// non-zero or its output cannot be parsed. There are no retries.
pub fn inspect<P: FfprobeExecutor>(prober: &P, path: &Path) -> CoreResult<MediaInfo> {
    log::debug!("Inspecting {}", path.display());
    let info = prober.probe(path)?;
    log::debug!(
        "{}: format={}, duration={:.3}s, streams={}",
        path.display(),
        info.format_name().unwrap_or("unknown"),
        info.duration_secs,
        info.streams.len()
    );
    Ok(info)
}
