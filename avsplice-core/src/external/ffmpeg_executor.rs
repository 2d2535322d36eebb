// ============================================================================
// avsplice-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: FFmpeg Process Management and Abstraction
//
// Traits for spawning ffmpeg and consuming its events, the ffmpeg-sidecar
// implementation, and `run_ffmpeg`, which drives one invocation to completion
// while keeping the tail of ffmpeg's log output for error reports.

use crate::error::{CoreError, CoreResult, command_start_error};
use ffmpeg_sidecar::child::FfmpegChild as SidecarChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use std::collections::VecDeque;
use std::io;
use std::process::ExitStatus;

/// Number of trailing ffmpeg log lines kept as diagnostics.
pub const DIAGNOSTIC_TAIL_LINES: usize = 40;

// --- FFmpeg Execution Abstraction ---

/// Trait representing an active ffmpeg process instance.
pub trait FfmpegProcess {
    /// Processes events from the running command using a provided handler closure.
    fn handle_events<F>(&mut self, handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>;

    /// Waits for the command to complete and returns its exit status.
    fn wait(&mut self) -> CoreResult<ExitStatus>;
}

/// Trait representing something that can spawn an FfmpegProcess.
pub trait FfmpegSpawner {
    type Process: FfmpegProcess;
    /// Spawns the ffmpeg command, consuming the command object.
    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process>;
}

// --- Concrete Implementation using ffmpeg-sidecar ---

/// Wrapper around `ffmpeg_sidecar::child::FfmpegChild` implementing `FfmpegProcess`.
pub struct SidecarProcess(SidecarChild);

impl FfmpegProcess for SidecarProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        let iterator = self.0.iter().map_err(|e| {
            log::error!("Failed to get ffmpeg event iterator: {}", e);
            CoreError::Io(io::Error::other(format!(
                "failed to read ffmpeg output: {e}"
            )))
        })?;
        for event in iterator {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        Ok(self.0.wait()?)
    }
}

/// Concrete implementation of `FfmpegSpawner` using `ffmpeg-sidecar`.
#[derive(Debug, Clone, Default)]
pub struct SidecarSpawner;

impl FfmpegSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        cmd.spawn()
            .map(SidecarProcess)
            .map_err(|e| command_start_error("ffmpeg", e))
    }
}

/// Exit status and trailing log output of a finished ffmpeg run.
#[derive(Debug)]
pub struct FfmpegOutcome {
    pub status: ExitStatus,
    pub diagnostics: String,
}

impl FfmpegOutcome {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Spawns `cmd`, drains its events and waits for it to exit.
///
/// Log and error lines are forwarded to `log::debug!` and the last
/// [`DIAGNOSTIC_TAIL_LINES`] of them are returned with the exit status. A
/// non-zero exit is not an error here; callers map it to the error variant
/// of the step they were running.
pub fn run_ffmpeg<S: FfmpegSpawner>(
    spawner: &S,
    cmd: FfmpegCommand,
    context: &str,
) -> CoreResult<FfmpegOutcome> {
    let args: Vec<String> = cmd
        .get_args()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    log::debug!("Running ffmpeg ({}): ffmpeg {}", context, args.join(" "));

    let mut process = spawner.spawn(cmd)?;
    let mut tail: VecDeque<String> = VecDeque::with_capacity(DIAGNOSTIC_TAIL_LINES);

    process.handle_events(|event| {
        let line = match event {
            FfmpegEvent::Log(_, line) => line,
            FfmpegEvent::Error(line) => line,
            _ => return Ok(()),
        };
        log::debug!("ffmpeg ({context}): {line}");
        if tail.len() == DIAGNOSTIC_TAIL_LINES {
            tail.pop_front();
        }
        tail.push_back(line);
        Ok(())
    })?;

    let status = process.wait()?;
    if !status.success() {
        log::error!("ffmpeg ({}) exited with {}", context, status);
    }

    Ok(FfmpegOutcome {
        status,
        diagnostics: Vec::from(tail).join("\n"),
    })
}
