use std::path::Path;

use image::imageops::FilterType;
use image::RgbImage;
use log::debug;

use crate::error::{ExtractError, Result};

/// Decode an image file into an 8-bit RGB grid.
///
/// Alpha is discarded and grayscale or palette images are expanded, so every
/// supported format ends up as plain `(r, g, b)` pixels.
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|err| {
        let reason = if !path.exists() {
            "file not found".to_string()
        } else {
            format!(
                "unsupported or corrupt image ({err}). Supported formats: PNG, JPEG, WebP, BMP, TIFF, GIF"
            )
        };
        ExtractError::ImageLoad {
            path: path.to_path_buf(),
            reason,
            source: Some(err),
        }
    })?;

    debug!(
        "decoded {} ({}x{}, {:?})",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );
    Ok(img.to_rgb8())
}

/// Shrink an image to the `size`x`size` working resolution used for
/// frequency counting.
///
/// Images that already fit inside the working resolution are returned
/// unchanged. Larger ones are resampled to exactly `size`x`size` with a
/// bicubic filter, ignoring aspect ratio.
pub fn downsample(img: &RgbImage, size: u32) -> RgbImage {
    if img.width() <= size && img.height() <= size {
        return img.clone();
    }
    debug!(
        "resampling {}x{} to {size}x{size}",
        img.width(),
        img.height()
    );
    image::imageops::resize(img, size, size, FilterType::CatmullRom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
        RgbImage::from_fn(width, height, |_, _| image::Rgb(rgb))
    }

    #[test]
    fn load_png_keeps_dimensions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("4x3.png");
        solid(4, 3, [10, 20, 30]).save(&path).unwrap();

        let img = load_rgb(&path).unwrap();
        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(img.get_pixel(2, 1).0, [10, 20, 30]);
    }

    #[test]
    fn load_bmp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("solid.bmp");
        solid(5, 5, [200, 100, 0]).save(&path).unwrap();

        let img = load_rgb(&path).unwrap();
        assert_eq!(img.get_pixel(0, 0).0, [200, 100, 0]);
    }

    #[test]
    fn load_rgba_drops_alpha() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("alpha.png");
        image::RgbaImage::from_fn(2, 2, |_, _| image::Rgba([1, 2, 3, 0]))
            .save(&path)
            .unwrap();

        let img = load_rgb(&path).unwrap();
        assert_eq!(img.get_pixel(1, 1).0, [1, 2, 3]);
    }

    #[test]
    fn load_file_not_found() {
        let err = load_rgb(Path::new("/nonexistent/image.png")).unwrap_err();
        assert!(matches!(err, ExtractError::ImageLoad { .. }));
        let msg = err.to_string();
        assert!(msg.contains("file not found"), "got: {msg}");
    }

    #[test]
    fn load_unsupported_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("not_an_image.txt");
        std::fs::write(&path, "this is not an image").unwrap();

        let err = load_rgb(&path).unwrap_err();
        assert!(matches!(err, ExtractError::ImageLoad { .. }));
        assert!(err.to_string().contains("unsupported"), "got: {err}");
    }

    #[test]
    fn downsample_leaves_small_images_alone() {
        let img = solid(10, 10, [255, 0, 0]);
        let out = downsample(&img, 100);
        assert_eq!(out.dimensions(), (10, 10));
    }

    #[test]
    fn downsample_forces_square_working_resolution() {
        let img = solid(400, 120, [40, 80, 120]);
        let out = downsample(&img, 100);
        assert_eq!(out.dimensions(), (100, 100));
        assert!(out.pixels().all(|p| p.0 == [40, 80, 120]));
    }
}
