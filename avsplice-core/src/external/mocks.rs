// avsplice-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

// Compiled for this crate's own tests, or for dependents with the "test-mocks" feature.
#![cfg(any(test, feature = "test-mocks"))]

use super::*;
use crate::error::{CoreError, CoreResult, probe_error};
use crate::media::info::{MediaInfo, StreamInfo, StreamType};
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::rc::Rc;

/// Mock implementation of FfmpegProcess.
#[derive(Clone)]
pub struct MockFfmpegProcess {
    /// Events to emit when handle_events is called.
    pub events_to_emit: Rc<RefCell<Vec<FfmpegEvent>>>,
    /// Exit status to return when wait is called.
    pub exit_status: ExitStatus,
}

impl MockFfmpegProcess {
    /// A process emitting no events that exits with `exit_code`.
    pub fn exiting_with(exit_code: i32) -> Self {
        // Raw wait status: the exit code lives in the second byte.
        Self {
            events_to_emit: Rc::new(RefCell::new(Vec::new())),
            exit_status: ExitStatus::from_raw(exit_code << 8),
        }
    }
}

impl FfmpegProcess for MockFfmpegProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        let events = self.events_to_emit.borrow().clone();
        for event in events {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        Ok(self.exit_status)
    }
}

/// Represents an expected ffmpeg command call and its mock result.
pub struct MockFfmpegExpectation {
    pub arg_pattern: String,
    pub result: CoreResult<MockFfmpegProcess>,
    pub create_dummy_output: bool,
}

/// Mock implementation of FfmpegSpawner supporting multiple expectations.
///
/// Each spawned command is matched against the first expectation whose
/// pattern is contained in one of its arguments; that expectation is consumed.
#[derive(Clone, Default)]
pub struct MockFfmpegSpawner {
    expectations: Rc<RefCell<Vec<MockFfmpegExpectation>>>,
    received_calls: Rc<RefCell<Vec<Vec<String>>>>,
}

impl MockFfmpegSpawner {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add_expectation(
        &self,
        arg_pattern: &str,
        result: CoreResult<MockFfmpegProcess>,
        create_dummy_output: bool,
    ) {
        self.expectations.borrow_mut().push(MockFfmpegExpectation {
            arg_pattern: arg_pattern.to_string(),
            result,
            create_dummy_output,
        });
    }

    pub fn add_success_expectation(
        &self,
        arg_pattern: &str,
        events: Vec<FfmpegEvent>,
        create_dummy_output: bool,
    ) {
        let process = MockFfmpegProcess {
            events_to_emit: Rc::new(RefCell::new(events)),
            exit_status: ExitStatus::from_raw(0),
        };
        self.add_expectation(arg_pattern, Ok(process), create_dummy_output);
    }

    pub fn add_spawn_error_expectation(&self, arg_pattern: &str, error: CoreError) {
        self.add_expectation(arg_pattern, Err(error), false);
    }

    /// Expects a command that runs and exits with `exit_code`.
    pub fn add_exit_error_expectation(
        &self,
        arg_pattern: &str,
        events: Vec<FfmpegEvent>,
        exit_code: i32,
    ) {
        let process = MockFfmpegProcess::exiting_with(exit_code);
        process.events_to_emit.replace(events);
        self.add_expectation(arg_pattern, Ok(process), false);
    }

    pub fn get_received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls.borrow().clone()
    }

    /// Number of expectations not yet matched by a spawned command.
    pub fn pending_expectations(&self) -> usize {
        self.expectations.borrow().len()
    }
}

impl FfmpegSpawner for MockFfmpegSpawner {
    type Process = MockFfmpegProcess;

    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let args: Vec<String> = cmd
            .get_args()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        self.received_calls.borrow_mut().push(args.clone());

        let mut expectations = self.expectations.borrow_mut();

        let found_index = expectations
            .iter()
            .position(|exp| args.iter().any(|arg| arg.contains(&exp.arg_pattern)));

        let Some(index) = found_index else {
            log::error!("MockFfmpegSpawner: No expectation found for command args: {:?}", args);
            panic!("MockFfmpegSpawner: No expectation found for command args: {:?}", args);
        };

        let expectation = expectations.remove(index);
        log::info!(
            "MockFfmpegSpawner: Matched expectation with pattern '{}'",
            expectation.arg_pattern
        );

        match expectation.result {
            Ok(process) => {
                if expectation.create_dummy_output {
                    write_dummy_output(&args);
                }
                Ok(process)
            }
            Err(err) => {
                log::warn!(
                    "MockFfmpegSpawner simulating spawn error for pattern '{}': {:?}",
                    expectation.arg_pattern,
                    err
                );
                Err(err)
            }
        }
    }
}

fn write_dummy_output(args: &[String]) {
    let Some(output_path_str) = args.last() else {
        log::warn!("MockFfmpegSpawner couldn't find output path in args to create dummy file.");
        return;
    };
    let output_path = PathBuf::from(output_path_str);
    if let Some(parent) = output_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            log::error!("MockFfmpegSpawner failed to create parent dir {:?}: {}", parent, e);
        }
    }
    match std::fs::write(&output_path, b"mock media") {
        Ok(()) => log::info!("MockFfmpegSpawner created dummy output file: {:?}", output_path),
        Err(e) => log::error!(
            "MockFfmpegSpawner failed to create dummy output file {:?}: {}",
            output_path,
            e
        ),
    }
}

/// Mock implementation of FfprobeExecutor.
///
/// Results are keyed by path. A key that is a bare file name also matches any
/// probed path ending in that name, which covers files created inside a
/// randomly named temp directory.
#[derive(Clone, Default)]
pub struct MockFfprobeExecutor {
    results: Rc<RefCell<HashMap<PathBuf, Result<MediaInfo, String>>>>,
    probed_paths: Rc<RefCell<Vec<PathBuf>>>,
}

impl MockFfprobeExecutor {
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns `info` when `path` is probed.
    pub fn expect_media_info(&self, path: impl Into<PathBuf>, info: MediaInfo) {
        self.results.borrow_mut().insert(path.into(), Ok(info));
    }

    /// Fails with a probe error carrying `reason` when `path` is probed.
    pub fn expect_probe_failure(&self, path: impl Into<PathBuf>, reason: &str) {
        self.results
            .borrow_mut()
            .insert(path.into(), Err(reason.to_string()));
    }

    pub fn get_probed_paths(&self) -> Vec<PathBuf> {
        self.probed_paths.borrow().clone()
    }

    fn lookup(&self, input_path: &Path) -> Option<Result<MediaInfo, String>> {
        let results = self.results.borrow();
        if let Some(result) = results.get(input_path) {
            return Some(result.clone());
        }
        results
            .iter()
            .find(|(key, _)| key.components().count() == 1 && input_path.ends_with(key))
            .map(|(_, result)| result.clone())
    }
}

impl FfprobeExecutor for MockFfprobeExecutor {
    fn probe(&self, input_path: &Path) -> CoreResult<MediaInfo> {
        log::info!("MockFfprobeExecutor::probe called for: {}", input_path.display());
        self.probed_paths.borrow_mut().push(input_path.to_path_buf());
        match self.lookup(input_path) {
            Some(Ok(info)) => Ok(info),
            Some(Err(reason)) => Err(probe_error(input_path, reason)),
            None => {
                log::error!(
                    "MockFfprobeExecutor: No expectation set for path: {}",
                    input_path.display()
                );
                Err(probe_error(
                    input_path,
                    format!("MockFfprobeExecutor: No expectation set for path {}", input_path.display()),
                ))
            }
        }
    }
}

/// Builds a MediaInfo with one video and one audio stream and the given duration.
pub fn media_info_with_duration(duration_secs: f64) -> MediaInfo {
    let mut format = BTreeMap::new();
    format.insert("format_name".to_string(), "matroska,webm".to_string());
    format.insert("duration".to_string(), format!("{duration_secs:.6}"));
    MediaInfo {
        format,
        format_tags: BTreeMap::new(),
        duration_secs,
        streams: vec![
            StreamInfo {
                index: 0,
                codec_type: StreamType::Video,
                codec_name: Some("h264".to_string()),
                duration_secs: Some(duration_secs),
                width: Some(1920),
                height: Some(1080),
                channels: None,
                sample_rate: None,
            },
            StreamInfo {
                index: 1,
                codec_type: StreamType::Audio,
                codec_name: Some("aac".to_string()),
                duration_secs: Some(duration_secs),
                width: None,
                height: None,
                channels: Some(2),
                sample_rate: Some(48000),
            },
        ],
    }
}
