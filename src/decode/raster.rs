//! PNG and JPEG decoding via `image`

use crate::error::DecodeError;
use crate::pixels::{PixelBuffer, PixelData};
use crate::types::Shape;
use image::DynamicImage;
use std::path::Path;

/// Decode a PNG or JPEG file without collapsing its bit depth
pub fn read_raster(path: &Path) -> Result<PixelBuffer, DecodeError> {
    let image = image::open(path)?;
    let (rows, cols) = (image.height(), image.width());

    let (channels, data) = match image {
        DynamicImage::ImageLuma8(i) => (1, PixelData::U8(i.into_raw())),
        DynamicImage::ImageLumaA8(i) => (2, PixelData::U8(i.into_raw())),
        DynamicImage::ImageRgb8(i) => (3, PixelData::U8(i.into_raw())),
        DynamicImage::ImageRgba8(i) => (4, PixelData::U8(i.into_raw())),
        DynamicImage::ImageLuma16(i) => (1, PixelData::U16(i.into_raw())),
        DynamicImage::ImageLumaA16(i) => (2, PixelData::U16(i.into_raw())),
        DynamicImage::ImageRgb16(i) => (3, PixelData::U16(i.into_raw())),
        DynamicImage::ImageRgba16(i) => (4, PixelData::U16(i.into_raw())),
        DynamicImage::ImageRgb32F(i) => (3, PixelData::F32(i.into_raw())),
        DynamicImage::ImageRgba32F(i) => (4, PixelData::F32(i.into_raw())),
        other => {
            return Err(DecodeError::UnsupportedSampleType(format!(
                "{:?}",
                other.color()
            )));
        }
    };

    let shape = if channels == 1 {
        Shape::gray(rows, cols)
    } else {
        Shape::with_channels(rows, cols, channels)
    };
    PixelBuffer::new(shape, data)
}
