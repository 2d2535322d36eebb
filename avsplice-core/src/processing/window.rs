//! Time windows and crop arithmetic.
//!
//! A [`TimeWindow`] describes the slice of a source that a track-processing
//! step keeps. [`CropPlan`] turns the user's crop values and the probed
//! source duration into the video window, and [`audio_window`] derives the
//! audio window from the processed video's real duration.

use crate::error::{CoreError, CoreResult};

/// End of a [`TimeWindow`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEnd {
    /// Absolute position in the source, in seconds
    At(f64),
    /// Keep everything up to the end of the source
    ToEnd,
}

/// A validated slice of a source file.
///
/// `start_secs` is never negative and, when the end is known, the span is
/// strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    start_secs: f64,
    end: WindowEnd,
}

impl TimeWindow {
    /// Window `[start, end]` in source seconds.
    pub fn new(start_secs: f64, end_secs: f64) -> CoreResult<Self> {
        check_start(start_secs)?;
        if !end_secs.is_finite() {
            return Err(CoreError::InvalidWindow(format!(
                "end {end_secs} is not a finite number"
            )));
        }
        if end_secs - start_secs <= 0.0 {
            return Err(CoreError::InvalidWindow(format!(
                "window [{start_secs:.3}, {end_secs:.3}] has no duration"
            )));
        }
        Ok(Self {
            start_secs,
            end: WindowEnd::At(end_secs),
        })
    }

    /// Window starting at `start` and lasting `span` seconds.
    pub fn with_span(start_secs: f64, span_secs: f64) -> CoreResult<Self> {
        Self::new(start_secs, start_secs + span_secs)
    }

    /// Window from `start` to the end of the source.
    pub fn to_end(start_secs: f64) -> CoreResult<Self> {
        check_start(start_secs)?;
        Ok(Self {
            start_secs,
            end: WindowEnd::ToEnd,
        })
    }

    pub fn start_secs(&self) -> f64 {
        self.start_secs
    }

    pub fn end(&self) -> WindowEnd {
        self.end
    }

    /// Absolute end, or `None` for an open window.
    pub fn end_secs(&self) -> Option<f64> {
        match self.end {
            WindowEnd::At(end) => Some(end),
            WindowEnd::ToEnd => None,
        }
    }

    /// Length of the window, or `None` for an open window.
    pub fn span_secs(&self) -> Option<f64> {
        self.end_secs().map(|end| end - self.start_secs)
    }
}

fn check_start(start_secs: f64) -> CoreResult<()> {
    if !start_secs.is_finite() || start_secs < 0.0 {
        return Err(CoreError::InvalidWindow(format!(
            "start {start_secs} must be a non-negative number of seconds"
        )));
    }
    Ok(())
}

/// Crop values resolved against the source video's duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropPlan {
    pub original_duration: f64,
    pub crop_start: f64,
    pub crop_end: f64,
    /// `original_duration - crop_start - crop_end`
    pub target_duration: f64,
    /// `[crop_start, original_duration - crop_end]`
    pub video_window: TimeWindow,
}

impl CropPlan {
    /// Resolves the crop values against `original_duration`.
    ///
    /// A crop of 0 leaves that side untouched. Fails with
    /// [`CoreError::InvalidInput`] for a negative crop value and with
    /// [`CoreError::InvalidCropRange`] when the remaining duration is not
    /// positive.
    pub fn new(original_duration: f64, crop_start: f64, crop_end: f64) -> CoreResult<Self> {
        check_crop_values(crop_start, crop_end)?;

        let target_duration = original_duration - crop_start - crop_end;
        if !target_duration.is_finite() || target_duration <= 0.0 {
            return Err(CoreError::InvalidCropRange {
                original_duration,
                crop_start,
                crop_end,
                remaining: target_duration,
            });
        }

        let video_window = TimeWindow::new(crop_start, original_duration - crop_end)?;
        Ok(Self {
            original_duration,
            crop_start,
            crop_end,
            target_duration,
            video_window,
        })
    }
}

/// Checks crop values before any duration is known.
pub fn check_crop_values(crop_start: f64, crop_end: f64) -> CoreResult<()> {
    for (label, value) in [("start", crop_start), ("end", crop_end)] {
        if !value.is_finite() || value < 0.0 {
            return Err(CoreError::InvalidInput(format!(
                "crop {label} must be a non-negative number of seconds, got {value}"
            )));
        }
    }
    Ok(())
}

/// Audio window `[audio_start, audio_start + processed_video_duration]`.
pub fn audio_window(audio_start: f64, processed_video_duration: f64) -> CoreResult<TimeWindow> {
    TimeWindow::with_span(audio_start, processed_video_duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_crop_plan_basic() {
        let plan = CropPlan::new(100.0, 10.0, 20.0).unwrap();
        assert!(approx(plan.target_duration, 70.0));
        assert!(approx(plan.video_window.start_secs(), 10.0));
        assert_eq!(plan.video_window.end_secs(), Some(80.0));
    }

    #[test]
    fn test_zero_crop_keeps_everything() {
        let plan = CropPlan::new(42.0, 0.0, 0.0).unwrap();
        assert_eq!(plan.video_window.start_secs(), 0.0);
        assert_eq!(plan.video_window.end_secs(), Some(42.0));
        assert_eq!(plan.target_duration, 42.0);
    }

    #[test]
    fn test_crop_consuming_whole_video_is_rejected() {
        let err = CropPlan::new(30.0, 10.0, 20.0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidCropRange { remaining, .. } if remaining == 0.0));

        let err = CropPlan::new(30.0, 25.0, 20.0).unwrap_err();
        assert_eq!(err.classification(), "InvalidCropRange");
    }

    #[test]
    fn test_negative_crop_is_rejected() {
        assert!(CropPlan::new(30.0, -1.0, 0.0).is_err());
        assert!(CropPlan::new(30.0, 0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_audio_window_uses_processed_duration() {
        let window = audio_window(5.0, 69.98).unwrap();
        assert_eq!(window.start_secs(), 5.0);
        assert!((window.end_secs().unwrap() - 74.98).abs() < 1e-9);
        assert!((window.span_secs().unwrap() - 69.98).abs() < 1e-9);
    }

    #[test]
    fn test_window_validation() {
        assert!(TimeWindow::new(-0.5, 10.0).is_err());
        assert!(TimeWindow::new(10.0, 10.0).is_err());
        assert!(TimeWindow::new(10.0, 9.0).is_err());
        assert!(TimeWindow::with_span(0.0, 0.0).is_err());
        assert!(TimeWindow::to_end(-1.0).is_err());

        let open = TimeWindow::to_end(3.0).unwrap();
        assert_eq!(open.end(), WindowEnd::ToEnd);
        assert_eq!(open.span_secs(), None);
    }
}
