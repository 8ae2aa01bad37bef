use std::sync::Arc;

use crate::coords::{PixelCoord, PixelCurve};
use crate::error::{Result, SliceError};
use crate::frame::Frame;
use crate::path::SlicePath;
use crate::pipeline::config::SamplingMethod;

use super::raster::LineAlgorithm;

/// User-supplied sampling function for [`SamplingStrategy::Custom`].
pub type SampleFn = Arc<dyn Fn(&Frame, &SlicePath) -> PixelCurve + Send + Sync>;

/// What the distance axis of a slice is measured along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistanceReference {
    /// The path's world-coordinate anchors, independent of any frame.
    Anchors,
    /// The first frame's pixel curve, mapped back through that frame's projection.
    ReferenceCurve,
}

/// Turns a path into the ordered pixel curve for one frame.
pub trait PathSampler: Send + Sync {
    fn sample(&self, frame: &Frame, path: &SlicePath) -> Result<PixelCurve>;

    fn distance_reference(&self) -> DistanceReference {
        DistanceReference::ReferenceCurve
    }

    /// Fewest anchors this sampler can work with.
    fn min_anchors(&self) -> usize {
        1
    }

    fn name(&self) -> String;
}

/// The built-in sampling strategies.
#[derive(Clone)]
pub enum SamplingStrategy {
    /// One pixel per anchor, at the anchor's rounded projection.
    ExactPoint,
    /// Anchors joined by rasterized lines.
    LineRasterized(LineAlgorithm),
    /// Externally supplied sampling function.
    Custom(SampleFn),
}

impl std::fmt::Debug for SamplingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExactPoint => write!(f, "ExactPoint"),
            Self::LineRasterized(algo) => write!(f, "LineRasterized({algo:?})"),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl SamplingStrategy {
    pub fn custom<F>(sample_fn: F) -> Self
    where
        F: Fn(&Frame, &SlicePath) -> PixelCurve + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(sample_fn))
    }

    /// Resolve a configured method. `Custom` needs `custom` to be supplied.
    pub fn from_method(method: &SamplingMethod, custom: Option<SampleFn>) -> Result<Self> {
        match method {
            SamplingMethod::ExactPoint => Ok(Self::ExactPoint),
            SamplingMethod::Bresenham => Ok(Self::LineRasterized(LineAlgorithm::Bresenham)),
            SamplingMethod::Dda => Ok(Self::LineRasterized(LineAlgorithm::Dda)),
            SamplingMethod::Custom => custom
                .map(Self::Custom)
                .ok_or(SliceError::MissingCustomSampler),
        }
    }
}

/// Project every anchor into `frame` and round to the nearest pixel.
///
/// Projected positions are used as-is; a negative coordinate stays negative
/// and is later reported as out of bounds. A non-finite position is an
/// `UnprojectableAnchor` error.
pub fn project_anchors(frame: &Frame, path: &SlicePath) -> Result<Vec<PixelCoord>> {
    path.anchors()
        .iter()
        .enumerate()
        .map(|(anchor_index, anchor)| {
            let position = frame.world_to_pixel(anchor, path.observer());
            position.round().ok_or(SliceError::UnprojectableAnchor {
                frame_index: frame.metadata.frame_index,
                anchor_index,
                x: position.x,
                y: position.y,
            })
        })
        .collect()
}

impl PathSampler for SamplingStrategy {
    fn sample(&self, frame: &Frame, path: &SlicePath) -> Result<PixelCurve> {
        match self {
            Self::ExactPoint => project_anchors(frame, path),
            Self::LineRasterized(algo) => {
                let vertices = project_anchors(frame, path)?;
                // The raster is convex: in-bounds vertices give in-bounds lines.
                for &vertex in &vertices {
                    frame.index_of(vertex)?;
                }
                Ok(algo.rasterize_polyline(&vertices))
            }
            Self::Custom(sample_fn) => Ok(sample_fn(frame, path)),
        }
    }

    fn distance_reference(&self) -> DistanceReference {
        match self {
            Self::ExactPoint => DistanceReference::Anchors,
            _ => DistanceReference::ReferenceCurve,
        }
    }

    fn min_anchors(&self) -> usize {
        match self {
            Self::LineRasterized(_) => 2,
            _ => 1,
        }
    }

    fn name(&self) -> String {
        match self {
            Self::ExactPoint => "exact-point sampling".into(),
            Self::LineRasterized(algo) => format!("{algo} line sampling"),
            Self::Custom(_) => "custom sampling".into(),
        }
    }
}
