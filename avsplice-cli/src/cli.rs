// avsplice-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use avsplice_core::config::{
    DEFAULT_AUDIO_CODEC, DEFAULT_FFMPEG_BINARY, DEFAULT_FFPROBE_BINARY, DEFAULT_OUTPUT_FILE,
    DEFAULT_VIDEO_CODEC,
};
use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{Args, Command, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "avsplice: crop a video and lay a time-shifted audio track under it",
    long_about = "Crops seconds off the start and end of a video, cuts an audio source to the \
                  cropped length starting at a chosen offset, and muxes both into one file. \
                  Values not given as flags are asked for interactively. Running without a \
                  subcommand is the same as `merge`."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Merge options used when no subcommand is given
    #[command(flatten)]
    pub merge: MergeArgs,

    /// Enable debug logging
    #[arg(long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Also write a timestamped log file into this directory
    #[arg(long, global = true, value_name = "DIR", env = "AVSPLICE_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true, default_value_t = false)]
    pub no_color: bool,
}

impl Cli {
    /// Parses the process arguments, exiting with clap's usage error on failure.
    pub fn parse_checked() -> Self {
        Self::try_parse_checked(std::env::args_os()).unwrap_or_else(|e| e.exit())
    }

    /// Like `try_parse_from`, but merge options typed before a subcommand are
    /// an argument conflict instead of being silently ignored.
    pub fn try_parse_checked<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut cmd = Self::command();
        let matches = cmd.try_get_matches_from_mut(args)?;

        if let Some(subcommand) = matches.subcommand_name() {
            let misplaced: Vec<String> = MergeArgs::augment_args(Command::new("merge"))
                .get_arguments()
                .filter(|arg| {
                    matches.value_source(arg.get_id().as_str()) == Some(ValueSource::CommandLine)
                })
                .map(|arg| format!("--{}", arg.get_long().unwrap_or(arg.get_id().as_str())))
                .collect();
            if !misplaced.is_empty() {
                return Err(cmd.error(
                    ErrorKind::ArgumentConflict,
                    format!(
                        "{} must be given after the '{subcommand}' subcommand",
                        misplaced.join(", ")
                    ),
                ));
            }
        }

        Self::from_arg_matches(&matches).map_err(|e| e.format(&mut cmd))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crop a video and merge it with a time-shifted audio track (default)
    Merge(MergeArgs),

    /// Show the format, duration and streams of a media file
    Info(InfoArgs),
}

#[derive(Args, Debug, Clone)]
pub struct MergeArgs {
    /// Video source (prompted for when omitted)
    #[arg(long, value_name = "VIDEO_FILE")]
    pub video: Option<PathBuf>,

    /// Audio source (prompted for when omitted)
    #[arg(long, value_name = "AUDIO_FILE")]
    pub audio: Option<PathBuf>,

    /// Seconds to remove from the start of the video, as seconds or [HH:]MM:SS
    #[arg(long, value_name = "TIME", value_parser = parse_offset)]
    pub crop_start: Option<f64>,

    /// Seconds to remove from the end of the video
    #[arg(long, value_name = "TIME", value_parser = parse_offset)]
    pub crop_end: Option<f64>,

    /// Position in the audio source where the output's audio begins
    #[arg(long, value_name = "TIME", value_parser = parse_offset)]
    pub audio_start: Option<f64>,

    /// Output file, overwritten if it exists
    #[arg(short = 'o', long, value_name = "FILE", env = "AVSPLICE_OUTPUT", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Parent directory for the temporary working directory
    #[arg(long, value_name = "DIR", env = "AVSPLICE_TEMP_DIR")]
    pub temp_dir: Option<PathBuf>,

    /// ffmpeg encoder for the cropped video track
    #[arg(long, value_name = "CODEC", env = "AVSPLICE_VIDEO_CODEC", default_value = DEFAULT_VIDEO_CODEC)]
    pub video_codec: String,

    /// ffmpeg encoder for the cut audio track
    #[arg(long, value_name = "CODEC", env = "AVSPLICE_AUDIO_CODEC", default_value = DEFAULT_AUDIO_CODEC)]
    pub audio_codec: String,

    /// ffmpeg executable
    #[arg(long, value_name = "PATH", env = "AVSPLICE_FFMPEG", default_value = DEFAULT_FFMPEG_BINARY)]
    pub ffmpeg: PathBuf,

    /// ffprobe executable
    #[arg(long, value_name = "PATH", env = "AVSPLICE_FFPROBE", default_value = DEFAULT_FFPROBE_BINARY)]
    pub ffprobe: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct InfoArgs {
    /// Media file to inspect
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Print the parsed metadata as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// ffprobe executable
    #[arg(long, value_name = "PATH", env = "AVSPLICE_FFPROBE", default_value = DEFAULT_FFPROBE_BINARY)]
    pub ffprobe: PathBuf,
}

/// Parses a time flag value: seconds ("12.5") or [HH:]MM:SS.
pub fn parse_offset(value: &str) -> Result<f64, String> {
    avsplice_core::parse_seconds(value).ok_or_else(|| {
        format!("'{value}' is not a valid time; use seconds (e.g. 12.5) or [HH:]MM:SS")
    })
}
