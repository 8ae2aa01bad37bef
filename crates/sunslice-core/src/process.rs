use ndarray::{s, Array2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::consts::PARALLEL_CELL_THRESHOLD;
use crate::distance::DistanceAxis;
use crate::error::{Result, SliceError};

/// Boxcar window, in frames (`time`) and curve samples (`space`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmoothingWindow {
    #[serde(default)]
    pub time: Option<usize>,
    #[serde(default)]
    pub space: Option<usize>,
}

impl SmoothingWindow {
    pub fn space(width: usize) -> Self {
        Self {
            time: None,
            space: Some(width),
        }
    }

    pub fn spacetime(time: usize, space: usize) -> Self {
        Self {
            time: Some(time),
            space: Some(space),
        }
    }
}

impl std::fmt::Display for SmoothingWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.time, self.space) {
            (None, None) => write!(f, "None"),
            (None, Some(x)) => write!(f, "Space (w={x})"),
            (Some(t), Some(x)) => write!(f, "Space-time (t={t}, x={x})"),
            (Some(t), None) => write!(f, "Time only (t={t})"),
        }
    }
}

/// A smoothed intensity matrix with the distance axis that matches its columns.
#[derive(Clone, Debug)]
pub struct Smoothed {
    pub intensity: Array2<f64>,
    pub distance: DistanceAxis,
}

/// Smooth according to `window`.
///
/// - space only: [`boxcar_space`], axis trimmed.
/// - time and space: [`boxcar_spacetime`], axis unchanged.
/// - time only: not supported.
/// - neither: a copy of the input.
pub fn smooth(
    intensity: &Array2<f64>,
    distance: &DistanceAxis,
    window: &SmoothingWindow,
) -> Result<Smoothed> {
    match (window.time, window.space) {
        (None, None) => Ok(Smoothed {
            intensity: intensity.clone(),
            distance: distance.clone(),
        }),
        (None, Some(width)) => boxcar_space(intensity, distance, width),
        (Some(time), Some(space)) => Ok(Smoothed {
            intensity: boxcar_spacetime(intensity, time, space)?,
            distance: distance.clone(),
        }),
        (Some(_), None) => Err(SliceError::Unsupported(
            "temporal-only smoothing; give a spatial window as well".into(),
        )),
    }
}

/// Moving average of width `width` along each frame's row, "valid" mode.
///
/// Output has `curve_len - width + 1` columns and the distance axis loses
/// `(width - 1) / 2` entries from each end. `width` must be odd and > 1.
pub fn boxcar_space(
    intensity: &Array2<f64>,
    distance: &DistanceAxis,
    width: usize,
) -> Result<Smoothed> {
    if width <= 1 || width % 2 == 0 {
        return Err(SliceError::InvalidWindow(format!(
            "spatial width must be odd and greater than 1, got {width}"
        )));
    }
    let (frames, curve_len) = intensity.dim();
    if width > curve_len {
        return Err(SliceError::InvalidWindow(format!(
            "spatial width {width} exceeds curve length {curve_len}"
        )));
    }

    let out_len = curve_len - width + 1;
    let weight = 1.0 / width as f64;
    let mut out = Array2::<f64>::zeros((frames, out_len));

    for (src, mut dst) in intensity.rows().into_iter().zip(out.rows_mut()) {
        for (j, cell) in dst.iter_mut().enumerate() {
            *cell = src
                .slice(s![j..j + width])
                .iter()
                .map(|v| v * weight)
                .sum::<f64>();
        }
    }

    Ok(Smoothed {
        intensity: out,
        distance: distance.trimmed((width - 1) / 2),
    })
}

/// Uniform `time x space` moving average over the whole matrix, same shape
/// as the input.
///
/// Both widths must be odd and greater than 1, like the spatial-only mode,
/// so every window is centred. Cells outside the matrix count as zero, so
/// averages near the edges are biased toward zero.
pub fn boxcar_spacetime(intensity: &Array2<f64>, time: usize, space: usize) -> Result<Array2<f64>> {
    if time <= 1 || space <= 1 || time % 2 == 0 || space % 2 == 0 {
        return Err(SliceError::InvalidWindow(format!(
            "space-time widths must be odd and greater than 1, got {time}x{space}"
        )));
    }

    let (frames, curve_len) = intensity.dim();
    let weight = 1.0 / (time * space) as f64;
    let (t_half, x_half) = (time / 2, space / 2);

    let smooth_row = |t: usize| -> Vec<f64> {
        let t_lo = t.saturating_sub(t_half);
        let t_hi = (t + t_half + 1).min(frames);
        (0..curve_len)
            .map(|i| {
                let i_lo = i.saturating_sub(x_half);
                let i_hi = (i + x_half + 1).min(curve_len);
                intensity
                    .slice(s![t_lo..t_hi, i_lo..i_hi])
                    .iter()
                    .map(|v| v * weight)
                    .sum::<f64>()
            })
            .collect()
    };

    let rows: Vec<Vec<f64>> = if frames * curve_len >= PARALLEL_CELL_THRESHOLD {
        (0..frames).into_par_iter().map(&smooth_row).collect()
    } else {
        (0..frames).map(&smooth_row).collect()
    };

    let mut out = Array2::<f64>::zeros((frames, curve_len));
    for (t, row) in rows.into_iter().enumerate() {
        for (i, val) in row.into_iter().enumerate() {
            out[[t, i]] = val;
        }
    }
    Ok(out)
}

/// Frame-to-frame difference: `out[t][i] = in[t + 1][i] - in[t][i]`.
///
/// A single-frame input gives an empty `0 x curve_len` matrix.
pub fn running_difference(intensity: &Array2<f64>) -> Array2<f64> {
    let frames = intensity.nrows();
    if frames < 2 {
        return Array2::zeros((0, intensity.ncols()));
    }
    &intensity.slice(s![1.., ..]) - &intensity.slice(s![..frames - 1, ..])
}
