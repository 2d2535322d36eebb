// ============================================================================
// avsplice-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: fern dispatch to the console and an optional log file
//
// The console chain prints the CLI's own warnings and errors to stderr with
// a colored level tag. Core library records reach the console only with
// --verbose. When a log directory is given, a second chain writes every
// Info-or-higher record (Debug with --verbose) to `avsplice_<timestamp>.log`,
// stripped of ANSI escapes.
// ffmpeg-sidecar's own records are capped at Warn.

use crate::error::CliResult;
use avsplice_core::CoreError;
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;

use std::fs;
use std::path::{Path, PathBuf};

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Log file name for a run started now.
pub fn log_file_name() -> String {
    format!("avsplice_{}.log", get_timestamp())
}

fn level_tag(level: Level, use_color: bool) -> String {
    let tag = match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN ",
        Level::Info => "INFO ",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    if !use_color {
        return tag.to_string();
    }
    match level {
        Level::Error => tag.bright_red().to_string(),
        Level::Warn => tag.yellow().to_string(),
        Level::Info => tag.green().to_string(),
        Level::Debug => tag.blue().to_string(),
        Level::Trace => tag.magenta().to_string(),
    }
}

/// Installs the global logger. Returns the log file path when one was opened.
pub fn init_logging(
    verbose: bool,
    log_dir: Option<&Path>,
    use_color: bool,
) -> CliResult<Option<PathBuf>> {
    let (console_level, file_level) = if verbose {
        (LevelFilter::Debug, LevelFilter::Debug)
    } else {
        (LevelFilter::Warn, LevelFilter::Info)
    };

    let core_console_level = if verbose { LevelFilter::Debug } else { LevelFilter::Off };
    let console = fern::Dispatch::new()
        .level(console_level)
        .level_for("avsplice_core", core_console_level)
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} {}",
                level_tag(record.level(), use_color),
                message
            ))
        })
        .chain(std::io::stderr());

    let mut root = fern::Dispatch::new()
        .level(file_level.max(console_level))
        .level_for("ffmpeg_sidecar", LevelFilter::Warn)
        .chain(console);

    let mut log_path = None;
    if let Some(dir) = log_dir {
        fs::create_dir_all(dir)?;
        let path = dir.join(log_file_name());
        let file = fern::log_file(&path)?;
        let file_chain = fern::Dispatch::new()
            .level(file_level)
            .format(|out, message, record| {
                let clean = strip_ansi_escapes::strip_str(message.to_string());
                out.finish(format_args!(
                    "[{} {:5} {}] {}",
                    chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                    record.level(),
                    record.target(),
                    clean
                ))
            })
            .chain(file);
        root = root.chain(file_chain);
        log_path = Some(path);
    }

    root.apply()
        .map_err(|e| CoreError::InvalidInput(format!("failed to install logger: {e}")))?;

    log::debug!("Logger initialized (verbose: {verbose})");
    if let Some(path) = &log_path {
        log::info!("Writing log file {}", path.display());
    }
    Ok(log_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_name_shape() {
        let name = log_file_name();
        assert!(name.starts_with("avsplice_"));
        assert!(name.ends_with(".log"));
        // avsplice_YYYYmmdd_HHMMSS.log
        assert_eq!(name.len(), "avsplice_".len() + 15 + ".log".len());
    }

    #[test]
    fn test_plain_level_tags() {
        assert_eq!(level_tag(Level::Warn, false), "WARN ");
        assert!(level_tag(Level::Error, true).contains("ERROR"));
        assert_ne!(level_tag(Level::Error, true), "ERROR");
    }
}
