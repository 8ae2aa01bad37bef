use ndarray::Array2;
use tracing::{debug, info};

use crate::builder::{build_curves, RowOutcome, SliceWarning};
use crate::coords::PixelCurve;
use crate::distance::DistanceAxis;
use crate::error::{Result, SliceError};
use crate::frame::ImageSequence;
use crate::path::SlicePath;
use crate::pipeline::{NoOpReporter, ProgressReporter, SliceStage};
use crate::process::{self, Smoothed, SmoothingWindow};
use crate::sample::{DistanceReference, PathSampler};

/// A time-distance diagram: intensity sampled along a path in every frame
/// of a sequence.
///
/// Built once by [`TimeDistanceSlice::compute`] and immutable afterwards.
/// Derived products (smoothing, running difference) are returned as new
/// values.
#[derive(Clone, Debug)]
pub struct TimeDistanceSlice {
    intensity: Array2<f64>,
    distance: DistanceAxis,
    curves: Vec<PixelCurve>,
    outcomes: Vec<RowOutcome>,
    warnings: Vec<SliceWarning>,
    times: Vec<u64>,
    colormap: Option<String>,
}

impl TimeDistanceSlice {
    pub fn compute(
        sequence: &ImageSequence,
        path: &SlicePath,
        sampler: &dyn PathSampler,
    ) -> Result<Self> {
        Self::compute_reported(sequence, path, sampler, &NoOpReporter)
    }

    pub fn compute_reported(
        sequence: &ImageSequence,
        path: &SlicePath,
        sampler: &dyn PathSampler,
        reporter: &dyn ProgressReporter,
    ) -> Result<Self> {
        info!(
            frames = sequence.len(),
            anchors = path.len(),
            sampler = %sampler.name(),
            "Computing time-distance slice"
        );

        let build = build_curves(sequence, path, sampler, reporter)?;

        reporter.begin_stage(SliceStage::DistanceAxis, None);
        let distance = match sampler.distance_reference() {
            DistanceReference::Anchors => DistanceAxis::from_world(path.anchors()),
            DistanceReference::ReferenceCurve => {
                DistanceAxis::from_pixel_curve(&build.curves[0], &sequence.frames()[0])
            }
        };
        reporter.finish_stage();

        if distance.len() != build.canonical_len() {
            return Err(SliceError::InvalidConfig(format!(
                "{} yields {} distance entries for a curve of {} pixels",
                sampler.name(),
                distance.len(),
                build.canonical_len()
            )));
        }
        debug!(
            length_arcsec = distance.total(),
            warnings = build.warnings.len(),
            "Distance axis built"
        );

        info!(
            frames = sequence.len(),
            curve_len = build.canonical_len(),
            "Slice complete"
        );

        Ok(Self {
            intensity: build.intensity,
            distance,
            curves: build.curves,
            outcomes: build.outcomes,
            warnings: build.warnings,
            times: sequence.timestamps(),
            colormap: sequence.colormap().map(str::to_string),
        })
    }

    pub fn frame_count(&self) -> usize {
        self.intensity.nrows()
    }

    pub fn curve_len(&self) -> usize {
        self.intensity.ncols()
    }

    /// Shape `(frame_count, curve_len)`. Cells past a short frame's curve are NaN.
    pub fn intensity(&self) -> &Array2<f64> {
        &self.intensity
    }

    pub fn distance(&self) -> &DistanceAxis {
        &self.distance
    }

    /// Per-frame pixel curves as used for extraction.
    pub fn curves(&self) -> &[PixelCurve] {
        &self.curves
    }

    pub fn outcomes(&self) -> &[RowOutcome] {
        &self.outcomes
    }

    pub fn warnings(&self) -> &[SliceWarning] {
        &self.warnings
    }

    /// Frame timestamps, microseconds.
    pub fn times(&self) -> &[u64] {
        &self.times
    }

    pub fn colormap(&self) -> Option<&str> {
        self.colormap.as_deref()
    }

    /// `(frame_count - 1, curve_len)` frame-to-frame difference.
    pub fn running_difference(&self) -> Array2<f64> {
        process::running_difference(&self.intensity)
    }

    /// Timestamps matching the rows of [`Self::running_difference`].
    pub fn difference_times(&self) -> &[u64] {
        self.times.get(1..).unwrap_or(&[])
    }

    pub fn smoothed(&self, window: &SmoothingWindow) -> Result<Smoothed> {
        process::smooth(&self.intensity, &self.distance, window)
    }
}
