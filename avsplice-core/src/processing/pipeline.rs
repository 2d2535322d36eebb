// ============================================================================
// avsplice-core/src/processing/pipeline.rs
// ============================================================================
//
// MERGE PIPELINE: Crop, Shift and Mux Orchestration
//
// Sequences the external-tool steps of one merge:
//
//   ValidatingInputs -> Inspecting -> ProcessingVideo -> ReInspecting
//     -> ProcessingAudio -> Muxing -> Done
//
// with Failed reachable from every stage. Each step's input is the previous
// step's output, so the steps run strictly one after another.
//
// The processed video is probed again before the audio is cut: its real
// duration can differ slightly from the arithmetic estimate because of
// encoder rounding, and the audio must match the real one.
//
// Intermediate tracks live in a scoped TempDir that is removed when this
// function returns, whatever the outcome.

use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult, InputRole, TrackKind};
use crate::external::{FfmpegSpawner, FfprobeExecutor};
use crate::media::inspect;
use crate::processing::mux::combine;
use crate::processing::track::extract_track;
use crate::processing::window::{CropPlan, audio_window, check_crop_values};
use crate::temp_files::{WORK_DIR_PREFIX, create_temp_dir};

use log::{debug, error, info, warn};

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

// ============================================================================
// TYPES
// ============================================================================

/// Stages of one merge, reported to the caller as they are entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    ValidatingInputs,
    Inspecting,
    ProcessingVideo,
    ReInspecting,
    ProcessingAudio,
    Muxing,
    Done,
    Failed,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PipelineStage::ValidatingInputs => "Validating inputs",
            PipelineStage::Inspecting => "Inspecting source video",
            PipelineStage::ProcessingVideo => "Cropping video track",
            PipelineStage::ReInspecting => "Measuring cropped video",
            PipelineStage::ProcessingAudio => "Cutting audio track",
            PipelineStage::Muxing => "Muxing tracks",
            PipelineStage::Done => "Done",
            PipelineStage::Failed => "Failed",
        };
        f.write_str(label)
    }
}

/// What to merge and how to cut it.
#[derive(Debug, Clone)]
pub struct MergeRequest {
    pub video_path: PathBuf,
    pub audio_path: PathBuf,
    /// Seconds removed from the start of the video
    pub crop_start: f64,
    /// Seconds removed from the end of the video
    pub crop_end: f64,
    /// Position in the audio source where the output's audio begins
    pub audio_start: f64,
}

/// Statistics about a completed merge.
#[derive(Debug, Clone)]
pub struct MergeReport {
    pub output_path: PathBuf,
    pub original_duration: f64,
    /// Duration expected from the crop arithmetic
    pub target_duration: f64,
    /// Duration of the cropped video as measured after encoding
    pub processed_duration: f64,
    pub output_size: u64,
    pub elapsed: Duration,
}

// ============================================================================
// INPUT VALIDATION
// ============================================================================

/// Checks that both sources exist and the requested offsets are usable.
///
/// Runs before any external tool is invoked.
pub fn validate_inputs(request: &MergeRequest) -> CoreResult<()> {
    check_exists(InputRole::Video, &request.video_path)?;
    check_exists(InputRole::Audio, &request.audio_path)?;
    check_crop_values(request.crop_start, request.crop_end)?;
    if !request.audio_start.is_finite() || request.audio_start < 0.0 {
        return Err(CoreError::InvalidInput(format!(
            "audio start must be a non-negative number of seconds, got {}",
            request.audio_start
        )));
    }
    Ok(())
}

fn check_exists(role: InputRole, path: &Path) -> CoreResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(CoreError::InputNotFound {
            role,
            path: path.to_path_buf(),
        })
    }
}

// ============================================================================
// MAIN PIPELINE
// ============================================================================

/// Merges the cropped video of `request` with its shifted audio.
///
/// `on_stage` is called every time the pipeline enters a new stage, ending
/// with either [`PipelineStage::Done`] or [`PipelineStage::Failed`].
///
/// # Examples
///
/// ```rust,no_run
/// use avsplice_core::{CoreConfig, MergeRequest, merge_tracks};
/// use avsplice_core::external::{CommandFfprobeExecutor, SidecarSpawner};
/// use std::path::PathBuf;
///
/// let request = MergeRequest {
///     video_path: PathBuf::from("clip.mkv"),
///     audio_path: PathBuf::from("track.mp3"),
///     crop_start: 10.0,
///     crop_end: 20.0,
///     audio_start: 5.0,
/// };
/// let report = merge_tracks(
///     &SidecarSpawner,
///     &CommandFfprobeExecutor::new(),
///     &CoreConfig::default(),
///     &request,
///     |stage| println!("{stage}"),
/// )
/// .unwrap();
/// println!("Successfully created: {}", report.output_path.display());
/// ```
pub fn merge_tracks<S, P, F>(
    spawner: &S,
    prober: &P,
    config: &CoreConfig,
    request: &MergeRequest,
    mut on_stage: F,
) -> CoreResult<MergeReport>
where
    S: FfmpegSpawner,
    P: FfprobeExecutor,
    F: FnMut(PipelineStage),
{
    let started = Instant::now();
    let result = run_stages(spawner, prober, config, request, &mut on_stage, started);

    match &result {
        Ok(report) => {
            info!(
                "Merge finished in {:.1}s: {}",
                report.elapsed.as_secs_f64(),
                report.output_path.display()
            );
            on_stage(PipelineStage::Done);
        }
        Err(e) => {
            error!("Merge failed ({}): {}", e.classification(), e);
            on_stage(PipelineStage::Failed);
        }
    }
    result
}

fn enter<F: FnMut(PipelineStage)>(on_stage: &mut F, stage: PipelineStage) {
    info!("{}", stage);
    on_stage(stage);
}

fn run_stages<S, P, F>(
    spawner: &S,
    prober: &P,
    config: &CoreConfig,
    request: &MergeRequest,
    on_stage: &mut F,
    started: Instant,
) -> CoreResult<MergeReport>
where
    S: FfmpegSpawner,
    P: FfprobeExecutor,
    F: FnMut(PipelineStage),
{
    // ========================================================================
    // VALIDATING INPUTS
    // ========================================================================
    enter(on_stage, PipelineStage::ValidatingInputs);
    config.validate()?;
    validate_inputs(request)?;

    // ========================================================================
    // INSPECTING
    // ========================================================================
    enter(on_stage, PipelineStage::Inspecting);
    let source_info = inspect(prober, &request.video_path)?;
    if !source_info.has_video() {
        warn!(
            "ffprobe reports no video stream in {}",
            request.video_path.display()
        );
    }

    let plan = CropPlan::new(source_info.duration_secs, request.crop_start, request.crop_end)?;
    info!(
        "Original video duration: {:.2}s, after cropping: {:.2}s",
        plan.original_duration, plan.target_duration
    );

    // ========================================================================
    // PROCESSING VIDEO
    // ========================================================================
    enter(on_stage, PipelineStage::ProcessingVideo);
    let work_dir = create_temp_dir(config, WORK_DIR_PREFIX)?;
    let processed_video = extract_track(
        spawner,
        config,
        &request.video_path,
        &plan.video_window,
        TrackKind::Video,
        work_dir.path(),
    )?;

    // ========================================================================
    // RE-INSPECTING
    // ========================================================================
    enter(on_stage, PipelineStage::ReInspecting);
    let processed_duration = inspect(prober, &processed_video)?.duration_secs;
    debug!(
        "Cropped video measures {:.3}s (expected {:.3}s)",
        processed_duration, plan.target_duration
    );

    // ========================================================================
    // PROCESSING AUDIO
    // ========================================================================
    enter(on_stage, PipelineStage::ProcessingAudio);
    let window = audio_window(request.audio_start, processed_duration)?;
    let processed_audio = extract_track(
        spawner,
        config,
        &request.audio_path,
        &window,
        TrackKind::Audio,
        work_dir.path(),
    )?;

    // ========================================================================
    // MUXING
    // ========================================================================
    enter(on_stage, PipelineStage::Muxing);
    combine(
        spawner,
        config,
        &processed_video,
        &processed_audio,
        &config.output_path,
    )?;

    let work_path = work_dir.path().to_path_buf();
    if let Err(e) = work_dir.close() {
        warn!("Failed to remove working directory {}: {}", work_path.display(), e);
    }

    let output_size = fs::metadata(&config.output_path)?.len();
    Ok(MergeReport {
        output_path: config.output_path.clone(),
        original_duration: plan.original_duration,
        target_duration: plan.target_duration,
        processed_duration,
        output_size,
        elapsed: started.elapsed(),
    })
}

// ============================================================================
// TESTS
// ============================================================================
