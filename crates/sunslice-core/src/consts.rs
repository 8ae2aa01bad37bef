/// Minimum frame count to use frame-level Rayon parallelism.
pub const PARALLEL_FRAME_THRESHOLD: usize = 4;

/// Minimum cell count (frames * curve length) to smooth rows in parallel.
pub const PARALLEL_CELL_THRESHOLD: usize = 65_536;

/// Arcseconds per radian.
pub const ARCSEC_PER_RADIAN: f64 = 206_264.806_247_096_36;

/// Default observer distance from Sun centre, in astronomical units.
pub const DEFAULT_OBSERVER_DISTANCE_AU: f64 = 1.0;

/// Default colormap identifier attached to frames that do not name one.
pub const DEFAULT_COLORMAP: &str = "gray";
