//! Temporary directory management.
//!
//! Intermediate tracks live in a `tempfile::TempDir`, which deletes itself
//! with all its contents when dropped, so cleanup also happens on every
//! early-return error path.

use crate::config::CoreConfig;
use crate::error::CoreResult;
use tempfile::{Builder as TempFileBuilder, TempDir};

/// Prefix of the per-merge working directory.
pub const WORK_DIR_PREFIX: &str = "avsplice_";

/// Creates a temporary directory with prefix. Auto-cleaned when dropped.
///
/// Placed under `config.temp_dir` when set, else the system temp directory.
pub fn create_temp_dir(config: &CoreConfig, prefix: &str) -> CoreResult<TempDir> {
    let mut builder = TempFileBuilder::new();
    builder.prefix(prefix);

    let dir = match &config.temp_dir {
        Some(base) => {
            std::fs::create_dir_all(base)?;
            builder.tempdir_in(base)?
        }
        None => builder.tempdir()?,
    };
    log::debug!("Created working directory {}", dir.path().display());
    Ok(dir)
}
