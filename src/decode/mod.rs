//! Image file decoding
//!
//! TIFF files go through the `tiff` decoder so that 32-bit integer and float
//! samples survive; PNG and JPEG go through `image`. Both produce a
//! `PixelBuffer` in the file's native sample type and channel layout.

mod raster;
mod tiff_file;

use crate::error::DecodeError;
use crate::pixels::PixelBuffer;
use std::path::Path;

/// Extensions the decoder accepts (lowercase, without the dot)
pub const SUPPORTED_EXTENSIONS: &[&str] = &["tif", "tiff", "png", "jpg", "jpeg"];

/// Lowercased extension of `path`, if any
#[must_use]
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
}

/// Whether `path` has one of the supported image extensions
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    extension_of(path).is_some_and(|e| SUPPORTED_EXTENSIONS.contains(&e.as_str()))
}

/// Decode an image file into a pixel buffer
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded, or if its sample
/// type has no `PixelData` representation
pub fn open_image(path: &Path) -> Result<PixelBuffer, DecodeError> {
    match extension_of(path).as_deref() {
        Some("tif" | "tiff") => tiff_file::read_tiff(path),
        _ => raster::read_raster(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixels::PixelData;
    use crate::types::{SampleType, Shape};
    use assert_matches::assert_matches;
    use image::{ImageBuffer, Luma, Rgb, Rgba};

    #[test]
    fn test_is_supported_image() {
        assert!(is_supported_image(Path::new("a.tif")));
        assert!(is_supported_image(Path::new("a.TIFF")));
        assert!(is_supported_image(Path::new("dir/a.Png")));
        assert!(is_supported_image(Path::new("a.jpg")));
        assert!(is_supported_image(Path::new("a.JPEG")));
        assert!(!is_supported_image(Path::new("a.bmp")));
        assert!(!is_supported_image(Path::new("a")));
    }

    #[test]
    fn test_open_16bit_tiff_gray() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray16.tif");
        let img: ImageBuffer<Luma<u16>, Vec<u16>> =
            ImageBuffer::from_raw(3, 2, vec![0, 1000, 2000, 30000, 40000, 65535]).unwrap();
        img.save(&path).unwrap();

        let buffer = open_image(&path).unwrap();
        assert_eq!(buffer.shape(), Shape::gray(2, 3));
        assert_eq!(
            buffer.data(),
            &PixelData::U16(vec![0, 1000, 2000, 30000, 40000, 65535])
        );
    }

    #[test]
    fn test_open_16bit_tiff_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb16.tiff");
        let img: ImageBuffer<Rgb<u16>, Vec<u16>> =
            ImageBuffer::from_raw(2, 1, vec![1, 2, 3, 4, 5, 6]).unwrap();
        img.save(&path).unwrap();

        let buffer = open_image(&path).unwrap();
        assert_eq!(buffer.shape(), Shape::with_channels(1, 2, 3));
        assert_eq!(buffer.sample_type(), SampleType::U16);
    }

    #[test]
    fn test_open_png_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgba.png");
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_raw(1, 2, vec![10, 20, 30, 255, 40, 50, 60, 128]).unwrap();
        img.save(&path).unwrap();

        let buffer = open_image(&path).unwrap();
        assert_eq!(buffer.shape(), Shape::with_channels(2, 1, 4));
        assert_eq!(
            buffer.data(),
            &PixelData::U8(vec![10, 20, 30, 255, 40, 50, 60, 128])
        );
    }

    #[test]
    fn test_open_16bit_png_gray() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray16.png");
        let img: ImageBuffer<Luma<u16>, Vec<u16>> =
            ImageBuffer::from_raw(2, 1, vec![300, 60000]).unwrap();
        img.save(&path).unwrap();

        let buffer = open_image(&path).unwrap();
        assert_eq!(buffer.shape(), Shape::gray(1, 2));
        assert_eq!(buffer.data(), &PixelData::U16(vec![300, 60000]));
    }

    #[test]
    fn test_open_garbage_fails() {
        let dir = tempfile::tempdir().unwrap();
        let tif = dir.path().join("broken.tif");
        std::fs::write(&tif, b"not a tiff").unwrap();
        assert!(open_image(&tif).is_err());

        let png = dir.path().join("broken.png");
        std::fs::write(&png, b"not a png").unwrap();
        assert_matches!(open_image(&png), Err(DecodeError::Image(_)));
    }

    #[test]
    fn test_open_missing_file() {
        let result = open_image(Path::new("does/not/exist.tif"));
        assert_matches!(result, Err(DecodeError::Io(_)));
    }
}
