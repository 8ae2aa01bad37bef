use std::path::Path;

use image::{GrayImage, ImageFormat, Luma};
use ndarray::Array2;

use crate::error::{Result, SliceError};

/// Load an image file as a grayscale raster scaled to [0, 1].
///
/// Color images are reduced to luma. Shape is `(height, width)`.
pub fn load_raster(path: &Path) -> Result<Array2<f32>> {
    let img = image::open(path)?;
    let gray = img.to_luma16();
    let (w, h) = gray.dimensions();
    if w == 0 || h == 0 {
        return Err(SliceError::InvalidConfig(format!(
            "{} has an empty raster",
            path.display()
        )));
    }

    let mut data = Array2::<f32>::zeros((h as usize, w as usize));
    for (col, row, pixel) in gray.enumerate_pixels() {
        data[[row as usize, col as usize]] = pixel.0[0] as f32 / 65535.0;
    }
    Ok(data)
}

/// Save a raster as 16-bit grayscale TIFF. Values are clamped to [0, 1];
/// NaN is written as 0.
pub fn save_raster_tiff(data: &Array2<f32>, path: &Path) -> Result<()> {
    let (h, w) = data.dim();
    let pixels: Vec<u16> = data
        .iter()
        .map(|&v| (to_unit(v) * 65535.0).round() as u16)
        .collect();

    let img = image::ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(w as u32, h as u32, pixels)
        .ok_or_else(|| SliceError::InvalidConfig(format!("cannot encode {h}x{w} raster")))?;
    img.save_with_format(path, ImageFormat::Tiff)?;
    Ok(())
}

/// Save a raster as 8-bit grayscale PNG. Values are clamped to [0, 1];
/// NaN is written as 0.
pub fn save_raster_png(data: &Array2<f32>, path: &Path) -> Result<()> {
    let (h, w) = data.dim();
    let mut img = GrayImage::new(w as u32, h as u32);
    for ((row, col), &v) in data.indexed_iter() {
        img.put_pixel(col as u32, row as u32, Luma([(to_unit(v) * 255.0).round() as u8]));
    }
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save a raster, choosing format from file extension (TIFF by default).
pub fn save_raster(data: &Array2<f32>, path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("png") => save_raster_png(data, path),
        _ => save_raster_tiff(data, path),
    }
}

fn to_unit(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}
