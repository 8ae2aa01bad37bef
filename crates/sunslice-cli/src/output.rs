use std::path::Path;

use anyhow::{Context, Result};
use ndarray::Array2;
use serde::Serialize;
use sunslice_core::builder::SliceWarning;
use sunslice_core::io::image_io::save_raster;

/// How matrix values are mapped to [0, 1] before writing.
#[derive(Clone, Copy, Debug)]
pub enum Scaling {
    /// Finite minimum to 0, finite maximum to 1.
    MinMax,
    /// `-m..m` to `0..1` with `m` the largest finite magnitude; zero sits at mid-grey.
    Symmetric,
}

/// Axes sidecar written next to the diagram.
#[derive(Serialize)]
pub struct AxesFile<'a> {
    pub times_us: &'a [u64],
    pub distance_arcsec: &'a [f64],
    pub colormap: Option<&'a str>,
    pub warnings: &'a [SliceWarning],
}

/// Write a `(time, distance)` matrix as an image with time along x and
/// distance along y. NaN cells are written as black.
pub fn write_diagram(matrix: &Array2<f64>, scaling: Scaling, path: &Path) -> Result<()> {
    let finite = || matrix.iter().copied().filter(|v| v.is_finite());
    let (offset, span) = match scaling {
        Scaling::MinMax => {
            let lo = finite().fold(f64::INFINITY, f64::min);
            let hi = finite().fold(f64::NEG_INFINITY, f64::max);
            (lo, hi - lo)
        }
        Scaling::Symmetric => {
            let m = finite().fold(0.0, |acc: f64, v| acc.max(v.abs()));
            (-m, 2.0 * m)
        }
    };
    let span = if span.is_finite() && span > 0.0 { span } else { 1.0 };
    let offset = if offset.is_finite() { offset } else { 0.0 };

    let image = matrix.t().mapv(|v| ((v - offset) / span) as f32);
    save_raster(&image, path)
        .with_context(|| format!("Failed to write diagram {}", path.display()))
}

pub fn write_axes(axes: &AxesFile<'_>, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(axes)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write axes {}", path.display()))
}
