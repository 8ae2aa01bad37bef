use serde::{Deserialize, Serialize};

use crate::consts::{ARCSEC_PER_RADIAN, DEFAULT_OBSERVER_DISTANCE_AU};

/// A position on the sky in helioprojective coordinates, both in arcseconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldCoord {
    /// Longitude-like axis (Tx), arcsec.
    pub tx: f64,
    /// Latitude-like axis (Ty), arcsec.
    pub ty: f64,
}

impl WorldCoord {
    pub fn new(tx: f64, ty: f64) -> Self {
        Self { tx, ty }
    }

    /// Angular separation to `other`, in arcsec.
    ///
    /// Uses the Vincenty formula, which stays accurate for both tiny and
    /// near-antipodal separations.
    pub fn separation(&self, other: &WorldCoord) -> f64 {
        let (lon1, lat1) = (self.tx / ARCSEC_PER_RADIAN, self.ty / ARCSEC_PER_RADIAN);
        let (lon2, lat2) = (other.tx / ARCSEC_PER_RADIAN, other.ty / ARCSEC_PER_RADIAN);
        let dlon = lon2 - lon1;

        let (sin_lat1, cos_lat1) = lat1.sin_cos();
        let (sin_lat2, cos_lat2) = lat2.sin_cos();
        let (sin_dlon, cos_dlon) = dlon.sin_cos();

        let num1 = cos_lat2 * sin_dlon;
        let num2 = cos_lat1 * sin_lat2 - sin_lat1 * cos_lat2 * cos_dlon;
        let denominator = sin_lat1 * sin_lat2 + cos_lat1 * cos_lat2 * cos_dlon;

        num1.hypot(num2).atan2(denominator) * ARCSEC_PER_RADIAN
    }
}

/// The observer a path is defined relative to.
///
/// Carried along with the path so projections that treat off-disk points
/// specially can place them correctly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    /// Distance from Sun centre in AU.
    pub distance_au: f64,
    /// Heliographic Stonyhurst longitude, degrees.
    pub lon_deg: f64,
    /// Heliographic Stonyhurst latitude, degrees.
    pub lat_deg: f64,
}

impl Default for Observer {
    fn default() -> Self {
        Self {
            distance_au: DEFAULT_OBSERVER_DISTANCE_AU,
            lon_deg: 0.0,
            lat_deg: 0.0,
        }
    }
}

/// Sub-pixel position, `x` along columns and `y` along rows.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PixelPosition {
    pub x: f64,
    pub y: f64,
}

impl PixelPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Nearest integer pixel. Exact halves round to even.
    ///
    /// `None` when either axis is non-finite or does not fit in an `i64`.
    pub fn round(&self) -> Option<PixelCoord> {
        Some(PixelCoord {
            row: round_axis(self.y)?,
            col: round_axis(self.x)?,
        })
    }
}

fn round_axis(v: f64) -> Option<i64> {
    let r = v.round_ties_even();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    (r.is_finite() && r >= i64::MIN as f64 && r < i64::MAX as f64).then_some(r as i64)
}

/// Integer pixel index in (row, col) order, matching `Array2` indexing.
///
/// Signed so that a faulty projection landing left of or above the raster is
/// still representable and can be reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelCoord {
    pub row: i64,
    pub col: i64,
}

impl PixelCoord {
    pub fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    /// Centre of this pixel as a sub-pixel position.
    pub fn to_position(self) -> PixelPosition {
        PixelPosition {
            x: self.col as f64,
            y: self.row as f64,
        }
    }

    /// `(row, col)` as array indices, or `None` when outside a `height x width` grid.
    pub fn checked_index(&self, height: usize, width: usize) -> Option<(usize, usize)> {
        let row = usize::try_from(self.row).ok()?;
        let col = usize::try_from(self.col).ok()?;
        (row < height && col < width).then_some((row, col))
    }
}

/// Ordered pixel coordinates sampled along a path in one frame.
pub type PixelCurve = Vec<PixelCoord>;
