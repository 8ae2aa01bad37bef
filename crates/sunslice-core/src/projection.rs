use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::coords::{Observer, PixelPosition, WorldCoord};

/// Per-frame mapping between world coordinates and pixel positions.
///
/// Implementations must be consistent: `pixel_to_world(world_to_pixel(w))`
/// should return `w` up to floating-point error for any on-image `w`.
pub trait Projection: Send + Sync + Debug {
    /// Map a world coordinate to a (sub-pixel) position in this frame.
    ///
    /// `observer` is the reference observer of the path being sampled. It is
    /// only needed by projections that treat off-disk points specially.
    fn world_to_pixel(&self, coord: &WorldCoord, observer: &Observer) -> PixelPosition;

    /// Map a pixel position in this frame back to a world coordinate.
    fn pixel_to_world(&self, position: PixelPosition) -> WorldCoord;
}

/// Affine plate solution: reference pixel, reference value, plate scale and
/// rotation.
///
/// Flat-sky approximation, accurate for the small fields of view of
/// solar imagers. The observer is ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearProjection {
    /// Reference pixel `[x, y]` (0-based, x along columns).
    pub reference_pixel: [f64; 2],
    /// World coordinate `[tx, ty]` of the reference pixel, arcsec.
    pub reference_world: [f64; 2],
    /// Plate scale `[x, y]`, arcsec per pixel.
    pub scale: [f64; 2],
    /// Rotation of the pixel grid relative to world axes, degrees.
    #[serde(default)]
    pub rotation_deg: f64,
}

impl Default for LinearProjection {
    fn default() -> Self {
        Self {
            reference_pixel: [0.0, 0.0],
            reference_world: [0.0, 0.0],
            scale: [1.0, 1.0],
            rotation_deg: 0.0,
        }
    }
}

impl LinearProjection {
    pub fn new(reference_pixel: [f64; 2], reference_world: [f64; 2], scale: [f64; 2]) -> Self {
        Self {
            reference_pixel,
            reference_world,
            scale,
            rotation_deg: 0.0,
        }
    }

    pub fn with_rotation(mut self, rotation_deg: f64) -> Self {
        self.rotation_deg = rotation_deg;
        self
    }

    /// This projection shifted by `(dx, dy)` pixels, as if the pointing drifted.
    pub fn shifted(&self, dx: f64, dy: f64) -> Self {
        let mut out = self.clone();
        out.reference_pixel[0] += dx;
        out.reference_pixel[1] += dy;
        out
    }
}

impl Projection for LinearProjection {
    fn world_to_pixel(&self, coord: &WorldCoord, _observer: &Observer) -> PixelPosition {
        let (sin_r, cos_r) = self.rotation_deg.to_radians().sin_cos();
        let u = coord.tx - self.reference_world[0];
        let v = coord.ty - self.reference_world[1];
        // Inverse rotation back onto the pixel grid.
        let gu = cos_r * u + sin_r * v;
        let gv = -sin_r * u + cos_r * v;
        PixelPosition {
            x: self.reference_pixel[0] + gu / self.scale[0],
            y: self.reference_pixel[1] + gv / self.scale[1],
        }
    }

    fn pixel_to_world(&self, position: PixelPosition) -> WorldCoord {
        let (sin_r, cos_r) = self.rotation_deg.to_radians().sin_cos();
        let gu = (position.x - self.reference_pixel[0]) * self.scale[0];
        let gv = (position.y - self.reference_pixel[1]) * self.scale[1];
        WorldCoord {
            tx: self.reference_world[0] + cos_r * gu - sin_r * gv,
            ty: self.reference_world[1] + sin_r * gu + cos_r * gv,
        }
    }
}
