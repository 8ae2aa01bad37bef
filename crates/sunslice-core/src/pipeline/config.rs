use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_COLORMAP;
use crate::coords::Observer;
use crate::error::{Result, SliceError};
use crate::process::SmoothingWindow;
use crate::projection::LinearProjection;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SliceConfig {
    #[serde(default)]
    pub sampling: SamplingMethod,
    #[serde(default = "default_colormap")]
    pub colormap: String,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Optional boxcar smoothing applied after the slice is built.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smoothing: Option<SmoothingWindow>,
    /// Projection for frames that do not carry their own.
    #[serde(default)]
    pub projection: LinearProjection,
    pub path: PathConfig,
    pub frames: Vec<FrameSource>,
}

fn default_colormap() -> String {
    DEFAULT_COLORMAP.to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("slice.png")
}

impl Default for SliceConfig {
    fn default() -> Self {
        Self {
            sampling: SamplingMethod::default(),
            colormap: default_colormap(),
            output: default_output(),
            smoothing: None,
            projection: LinearProjection::default(),
            path: PathConfig::default(),
            frames: Vec::new(),
        }
    }
}

impl SliceConfig {
    /// Check everything that can be checked without touching the frames.
    pub fn validate(&self) -> Result<()> {
        if self.frames.is_empty() {
            return Err(SliceError::EmptySequence);
        }
        if self.path.anchors.is_empty() {
            return Err(SliceError::InvalidConfig("path has no anchors".into()));
        }
        if let Some(bad) = self
            .path
            .anchors
            .iter()
            .find(|a| !a[0].is_finite() || !a[1].is_finite())
        {
            return Err(SliceError::InvalidConfig(format!(
                "anchor {bad:?} is not finite"
            )));
        }
        validate_projection(&self.projection)?;
        for source in &self.frames {
            if let Some(ref projection) = source.projection {
                validate_projection(projection)?;
            }
        }
        Ok(())
    }

    /// Resolve relative frame paths against `base` (usually the config file's directory).
    pub fn with_base_dir(mut self, base: &Path) -> Self {
        for source in &mut self.frames {
            if source.path.is_relative() {
                source.path = base.join(&source.path);
            }
        }
        self
    }
}

fn validate_projection(projection: &LinearProjection) -> Result<()> {
    let non_finite = projection
        .reference_pixel
        .iter()
        .chain(&projection.reference_world)
        .chain(std::iter::once(&projection.rotation_deg))
        .any(|v| !v.is_finite());
    if non_finite {
        return Err(SliceError::InvalidConfig(format!(
            "projection has a non-finite field: {projection:?}"
        )));
    }
    let [sx, sy] = projection.scale;
    if !(sx.is_finite() && sy.is_finite()) || sx == 0.0 || sy == 0.0 {
        return Err(SliceError::InvalidConfig(format!(
            "projection scale must be finite and non-zero, got [{sx}, {sy}]"
        )));
    }
    Ok(())
}

/// One frame on disk.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FrameSource {
    pub path: PathBuf,
    /// Observation time, microseconds.
    pub timestamp_us: u64,
    /// Overrides the config-wide projection for this frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection: Option<LinearProjection>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PathConfig {
    /// `[tx, ty]` anchors in arcsec.
    pub anchors: Vec<[f64; 2]>,
    #[serde(default)]
    pub observer: Observer,
}

/// How a path is turned into per-frame pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SamplingMethod {
    /// One pixel per anchor.
    ExactPoint,
    /// Anchors joined by Bresenham lines.
    #[default]
    Bresenham,
    /// Anchors joined by DDA lines.
    Dda,
    /// Caller-supplied sampling function.
    Custom,
}

impl std::fmt::Display for SamplingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExactPoint => write!(f, "Exact Point"),
            Self::Bresenham => write!(f, "Line (Bresenham)"),
            Self::Dda => write!(f, "Line (DDA)"),
            Self::Custom => write!(f, "Custom"),
        }
    }
}
