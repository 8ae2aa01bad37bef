use ndarray::Array2;

use sunslice_core::io::image_io::{load_raster, save_raster, save_raster_png, save_raster_tiff};

#[test]
fn test_save_load_roundtrip_tiff() {
    let mut data = Array2::<f32>::zeros((4, 5));
    data[[0, 1]] = 0.5;
    data[[1, 0]] = 1.0;
    data[[3, 4]] = 0.25;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("raster.tif");
    save_raster_tiff(&data, &path).unwrap();
    let loaded = load_raster(&path).unwrap();

    assert_eq!(loaded.dim(), (4, 5));
    assert!(loaded[[0, 0]].abs() < 1e-4);
    assert!((loaded[[0, 1]] - 0.5).abs() < 1e-4);
    assert!((loaded[[1, 0]] - 1.0).abs() < 1e-4);
    assert!((loaded[[3, 4]] - 0.25).abs() < 1e-4);
}

#[test]
fn test_png_clamps_and_zeroes_nan() {
    let mut data = Array2::<f32>::from_elem((3, 3), 0.5);
    data[[0, 0]] = f32::NAN;
    data[[1, 1]] = 7.0;
    data[[2, 2]] = -3.0;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("raster.png");
    save_raster_png(&data, &path).unwrap();
    let loaded = load_raster(&path).unwrap();

    assert_eq!(loaded[[0, 0]], 0.0);
    assert!((loaded[[1, 1]] - 1.0).abs() < 1e-4);
    assert_eq!(loaded[[2, 2]], 0.0);
    assert!((loaded[[0, 1]] - 0.5).abs() < 0.01);
}

#[test]
fn test_save_raster_picks_format_from_extension() {
    let data = Array2::<f32>::from_elem((2, 2), 0.25);
    let dir = tempfile::tempdir().unwrap();

    let png = dir.path().join("out.png");
    save_raster(&data, &png).unwrap();
    assert_eq!(image::ImageFormat::from_path(&png).unwrap(), image::ImageFormat::Png);
    assert!(png.exists());

    let other = dir.path().join("out.tiff");
    save_raster(&data, &other).unwrap();
    let reader = image::ImageReader::open(&other)
        .unwrap()
        .with_guessed_format()
        .unwrap();
    assert_eq!(reader.format(), Some(image::ImageFormat::Tiff));
}

#[test]
fn test_load_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_raster(&dir.path().join("nope.tif")).is_err());
}
