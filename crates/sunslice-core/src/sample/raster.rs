use serde::{Deserialize, Serialize};

use crate::coords::{PixelCoord, PixelCurve};

/// Line rasterization algorithm used to join consecutive path anchors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineAlgorithm {
    /// Integer error-accumulator (Bresenham) line. No floating point.
    #[default]
    Bresenham,
    /// Incremental floating step (DDA) line, rounded per sample.
    Dda,
}

impl std::fmt::Display for LineAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bresenham => write!(f, "Bresenham"),
            Self::Dda => write!(f, "DDA"),
        }
    }
}

impl LineAlgorithm {
    /// Rasterize the segment `from -> to` into pixels, both ends included once.
    pub fn rasterize(self, from: PixelCoord, to: PixelCoord) -> PixelCurve {
        let points = match self {
            Self::Bresenham => bresenham_line(from.col, from.row, to.col, to.row),
            Self::Dda => dda_line(from.col, from.row, to.col, to.row),
        };
        points
            .into_iter()
            .map(|(x, y)| PixelCoord::new(y, x))
            .collect()
    }

    /// Rasterize every consecutive pair of `vertices` and concatenate the results.
    ///
    /// Junction pixels are kept on both sides: a vertex shared by two
    /// segments appears twice. A single vertex yields a one-pixel curve.
    pub fn rasterize_polyline(self, vertices: &[PixelCoord]) -> PixelCurve {
        match vertices {
            [] => Vec::new(),
            [only] => vec![*only],
            _ => vertices
                .windows(2)
                .flat_map(|pair| self.rasterize(pair[0], pair[1]))
                .collect(),
        }
    }
}

/// Integer-only line from `(x0, y0)` to `(x1, y1)`, in that order.
///
/// Works in all eight octants by swapping axes for steep lines and stepping
/// with the sign of each delta. The result is 8-connected with
/// `max(|dx|, |dy|) + 1` points, so callers bound the endpoints.
pub fn bresenham_line(x0: i64, y0: i64, x1: i64, y1: i64) -> Vec<(i64, i64)> {
    let steep = y0.abs_diff(y1) > x0.abs_diff(x1);
    // Walk the major axis as "a", the minor as "b".
    let (a0, b0, a1, b1) = if steep {
        (y0, x0, y1, x1)
    } else {
        (x0, y0, x1, y1)
    };

    let da = a0.abs_diff(a1);
    let db = b0.abs_diff(b1);
    let step_a = if a1 >= a0 { 1 } else { -1 };
    let step_b = if b1 >= b0 { 1 } else { -1 };

    let mut points = Vec::new();
    let mut err = i128::from(da / 2);
    let (mut a, mut b) = (a0, b0);
    points.push(if steep { (b, a) } else { (a, b) });

    for _ in 0..da {
        err -= i128::from(db);
        if err < 0 {
            b += step_b;
            err += i128::from(da);
        }
        a += step_a;
        points.push(if steep { (b, a) } else { (a, b) });
    }

    points
}

/// Floating-step line from `(x0, y0)` to `(x1, y1)`.
///
/// Takes `max(|dx|, |dy|)` equal steps and rounds each sample to the nearest
/// pixel (halves to even). Same length and endpoints as [`bresenham_line`];
/// intermediate pixels can differ when `|dx| != |dy|`.
pub fn dda_line(x0: i64, y0: i64, x1: i64, y1: i64) -> Vec<(i64, i64)> {
    let steps = x0.abs_diff(x1).max(y0.abs_diff(y1));
    if steps == 0 {
        return vec![(x0, y0)];
    }

    let x_inc = (i128::from(x1) - i128::from(x0)) as f64 / steps as f64;
    let y_inc = (i128::from(y1) - i128::from(y0)) as f64 / steps as f64;

    let mut points = Vec::new();
    for i in 0..steps {
        points.push((
            x0 + round_offset(x0, x_inc * i as f64),
            y0 + round_offset(y0, y_inc * i as f64),
        ));
    }
    points.push((x1, y1));
    points
}

/// Integer `r` nearest to `offset` such that `base + r` is what rounding
/// `base + offset` half-to-even would give. Working on the offset keeps
/// precision when `base` is too large for an exact `f64`.
fn round_offset(base: i64, offset: f64) -> i64 {
    let floor = offset.floor();
    let frac = offset - floor;
    let floor = floor as i64;
    if frac > 0.5 {
        floor + 1
    } else if frac < 0.5 {
        floor
    } else if (base.rem_euclid(2) + floor.rem_euclid(2)) % 2 == 0 {
        floor
    } else {
        floor + 1
    }
}
