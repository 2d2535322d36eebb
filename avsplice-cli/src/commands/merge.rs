// ============================================================================
// avsplice-cli/src/commands/merge.rs
// ============================================================================
//
// MERGE COMMAND: Interactive crop-and-merge
//
// Collects the two source paths and the three time offsets, from flags or by
// asking on the terminal, shows the source duration and the duration left
// after cropping, then runs the core merge pipeline behind a stage spinner.
//
// Prompt order: video path, audio path, crop start, crop end, audio start.

use crate::cli::MergeArgs;
use crate::error::{CliResult, input_error};
use crate::terminal::{StageSpinner, print_section, print_status, print_success, print_warning};

use avsplice_core::external::{CommandFfprobeExecutor, FfmpegSpawner, FfprobeExecutor, SidecarSpawner};
use avsplice_core::{
    CoreConfig, CoreConfigBuilder, CoreError, CropPlan, InputRole, MergeReport, MergeRequest,
    check_dependency, format_bytes, format_duration, inspect, merge_tracks, parse_seconds,
};
use console::Term;
use log::{debug, info};

use std::path::{Path, PathBuf};

/// Attempts allowed for a time value before giving up.
const MAX_ATTEMPTS: usize = 3;

// ============================================================================
// PROMPTING
// ============================================================================

/// Source of interactive answers.
pub trait Prompter {
    /// Shows `question` and returns the trimmed answer.
    fn ask(&mut self, question: &str) -> CliResult<String>;
}

/// Reads answers from the controlling terminal (or stdin when piped).
pub struct TermPrompter {
    term: Term,
}

impl TermPrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for TermPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TermPrompter {
    fn ask(&mut self, question: &str) -> CliResult<String> {
        self.term.write_str(question)?;
        self.term.flush()?;
        // console only reads from a real terminal; piped answers come from stdin.
        let line = if self.term.is_term() {
            self.term.read_line()?
        } else {
            let mut buf = String::new();
            std::io::stdin().read_line(&mut buf)?;
            buf
        };
        Ok(line.trim().to_string())
    }
}

fn ask_path<Q: Prompter>(
    prompter: &mut Q,
    given: Option<&PathBuf>,
    question: &str,
) -> CliResult<PathBuf> {
    if let Some(path) = given {
        return Ok(path.clone());
    }
    let answer = prompter.ask(question)?;
    // Paths dragged into a terminal arrive quoted.
    let cleaned = answer.trim().trim_matches(|c| c == '"' || c == '\'');
    if cleaned.is_empty() {
        return Err(input_error("no file path given"));
    }
    Ok(PathBuf::from(cleaned))
}

fn ask_seconds<Q: Prompter>(
    prompter: &mut Q,
    given: Option<f64>,
    question: &str,
    label: &str,
) -> CliResult<f64> {
    if let Some(value) = given {
        return Ok(value);
    }
    for _ in 0..MAX_ATTEMPTS {
        let answer = prompter.ask(question)?;
        if answer.is_empty() {
            return Err(input_error(format!("no value given for {label}")));
        }
        match parse_seconds(&answer) {
            Some(value) => return Ok(value),
            None => print_warning(&format!(
                "'{answer}' is not a valid time; enter seconds (e.g. 12.5) or [HH:]MM:SS"
            )),
        }
    }
    Err(input_error(format!("no valid value given for {label}")))
}

// ============================================================================
// REQUEST RESOLUTION
// ============================================================================

fn require_file(role: InputRole, path: &Path) -> CliResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(CoreError::InputNotFound {
            role,
            path: path.to_path_buf(),
        })
    }
}

/// Resolves both source paths and checks that they exist.
pub fn resolve_inputs<Q: Prompter>(args: &MergeArgs, prompter: &mut Q) -> CliResult<(PathBuf, PathBuf)> {
    let video = ask_path(prompter, args.video.as_ref(), "Enter the path to the video file: ")?;
    let audio = ask_path(prompter, args.audio.as_ref(), "Enter the path to the audio file: ")?;
    require_file(InputRole::Video, &video)?;
    require_file(InputRole::Audio, &audio)?;
    Ok((video, audio))
}

/// Shows the source duration, resolves the offsets and previews the crop.
pub fn resolve_request<P, Q>(
    args: &MergeArgs,
    video: PathBuf,
    audio: PathBuf,
    prober: &P,
    prompter: &mut Q,
) -> CliResult<MergeRequest>
where
    P: FfprobeExecutor,
    Q: Prompter,
{
    let source = inspect(prober, &video)?;
    print_status("Original duration", &format_duration(source.duration_secs));

    let crop_start = ask_seconds(
        prompter,
        args.crop_start,
        "Seconds to crop from the start of the video: ",
        "crop start",
    )?;
    let crop_end = ask_seconds(
        prompter,
        args.crop_end,
        "Seconds to crop from the end of the video: ",
        "crop end",
    )?;

    let plan = CropPlan::new(source.duration_secs, crop_start, crop_end)?;
    print_status("New duration", &format_duration(plan.target_duration));

    let audio_start = ask_seconds(
        prompter,
        args.audio_start,
        "Start time in the audio file (seconds): ",
        "audio start",
    )?;

    Ok(MergeRequest {
        video_path: video,
        audio_path: audio,
        crop_start,
        crop_end,
        audio_start,
    })
}

/// Builds the core configuration from the merge flags.
pub fn build_config(args: &MergeArgs) -> CoreConfig {
    let mut builder = CoreConfigBuilder::new()
        .output_path(args.output.clone())
        .video_codec(args.video_codec.clone())
        .audio_codec(args.audio_codec.clone())
        .ffmpeg_path(args.ffmpeg.clone())
        .ffprobe_path(args.ffprobe.clone());
    if let Some(dir) = &args.temp_dir {
        builder = builder.temp_dir(dir.clone());
    }
    builder.build()
}

// ============================================================================
// EXECUTION
// ============================================================================

/// Runs the merge behind a stage spinner and prints the summary.
pub fn execute<S, P>(
    spawner: &S,
    prober: &P,
    config: &CoreConfig,
    request: &MergeRequest,
) -> CliResult<MergeReport>
where
    S: FfmpegSpawner,
    P: FfprobeExecutor,
{
    debug!("Merge request: {:?}", request);
    let spinner = StageSpinner::new();
    let result = merge_tracks(spawner, prober, config, request, |stage| {
        spinner.set_stage(stage)
    });
    spinner.finish();
    let report = result?;

    print_success(&format!("Successfully created: {}", report.output_path.display()));
    print_section("Summary");
    print_status("Original duration", &format_duration(report.original_duration));
    print_status("Cropped duration", &format_duration(report.processed_duration));
    print_status("Audio starts at", &format_duration(request.audio_start));
    print_status("Output size", &format_bytes(report.output_size));
    print_status("Time taken", &format_duration(report.elapsed.as_secs_f64()));
    Ok(report)
}

/// Entry point for `avsplice merge` (and `avsplice` with no subcommand).
pub fn run_merge(args: MergeArgs) -> CliResult<()> {
    let mut prompter = TermPrompter::new();
    let (video, audio) = resolve_inputs(&args, &mut prompter)?;

    check_dependency(&args.ffprobe)?;
    check_dependency(&args.ffmpeg)?;
    info!("External dependency check passed.");

    let prober = CommandFfprobeExecutor::with_binary(&args.ffprobe);
    let request = resolve_request(&args, video, audio, &prober, &mut prompter)?;
    let config = build_config(&args);

    execute(&SidecarSpawner, &prober, &config, &request)?;
    Ok(())
}
