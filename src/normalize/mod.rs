//! Channel-layout policy on top of the percentile normalizer
//!
//! Every supported input leaves here as a canonical 3-channel 8-bit buffer.
//! Layouts without a policy (multi-channel wide integer images, odd channel
//! counts) come back as `Unsupported`, which is an ordinary outcome.

mod float;
mod grayscale;
mod percentile;
mod rgb;

pub use float::range_map;
pub use grayscale::{first_channel, replicate_gray};
pub use percentile::{
    ClipWindow, DegeneratePolicy, NormalizationConfig, normalize_percentile, percentile,
};
pub use rgb::drop_alpha;

use crate::error::Unsupported;
use crate::pixels::{PixelBuffer, PixelData};
use crate::types::Shape;
use anyhow::{Context, Result};
use image::{ImageBuffer, RgbImage};

/// How an input reached the canonical layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// Already 8-bit; only the channel layout changed
    Passthrough,
    /// Wide integer samples went through percentile normalization
    Percentile,
    /// Floating point samples were min/max range mapped
    RangeMapped,
}

/// A canonical (H, W, 3) u8 buffer and how it was produced
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub buffer: PixelBuffer,
    pub conversion: Conversion,
}

impl Normalized {
    fn rgb(shape: Shape, rgb: Vec<u8>, conversion: Conversion) -> Self {
        let shape = Shape::with_channels(shape.rows(), shape.cols(), 3);
        Self {
            buffer: PixelBuffer::from_parts(shape, PixelData::U8(rgb)),
            conversion,
        }
    }

    /// Whether percentile normalization actually ran
    #[inline]
    #[must_use]
    pub fn was_normalized(&self) -> bool {
        self.conversion == Conversion::Percentile
    }

    /// Whether the bit depth changed, so the result is worth saving
    #[inline]
    #[must_use]
    pub fn changed_depth(&self) -> bool {
        self.conversion != Conversion::Passthrough
    }

    /// Copy the samples into an `RgbImage` for encoding
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is not interleaved 8-bit RGB
    pub fn to_rgb_image(&self) -> Result<RgbImage> {
        let PixelData::U8(samples) = self.buffer.data() else {
            anyhow::bail!("Expected 8-bit samples, got {}", self.buffer.sample_type());
        };
        let dims = self.buffer.dimensions();
        ImageBuffer::from_raw(dims.cols, dims.rows, samples.clone())
            .context("Failed to create RGB image buffer")
    }
}

/// Bring a decoded buffer to the canonical 3-channel 8-bit layout
///
/// | channels | samples | result |
/// |---|---|---|
/// | 1, 2 (gray+alpha) | u8 | replicated gray |
/// | 1, 2 (gray+alpha) | u16, u32 | percentile normalized, replicated |
/// | 3 | u8 | unchanged |
/// | 4 | u8 | alpha dropped |
/// | 1 to 4 | f32 | range mapped, alpha dropped |
///
/// # Errors
///
/// Returns `Unsupported` for 3 or 4 channel wide integer buffers and for
/// any other channel count
pub fn convert_to_rgb8(
    buffer: &PixelBuffer,
    config: &NormalizationConfig,
) -> Result<Normalized, Unsupported> {
    let shape = buffer.shape();
    let unsupported = Unsupported {
        shape,
        sample_type: buffer.sample_type(),
    };

    match (buffer.data(), shape.channel_count()) {
        (PixelData::U8(samples), 1) => Ok(Normalized::rgb(
            shape,
            replicate_gray(samples),
            Conversion::Passthrough,
        )),
        (PixelData::U8(_), 2) => {
            let gray = first_channel(buffer);
            let PixelData::U8(plane) = gray.data() else {
                return Err(unsupported);
            };
            Ok(Normalized::rgb(shape, replicate_gray(plane), Conversion::Passthrough))
        }
        (PixelData::U8(samples), 3) => Ok(Normalized::rgb(
            shape,
            samples.clone(),
            Conversion::Passthrough,
        )),
        (PixelData::U8(samples), 4) => Ok(Normalized::rgb(
            shape,
            drop_alpha(samples),
            Conversion::Passthrough,
        )),
        (PixelData::U16(_) | PixelData::U32(_), channels @ (1 | 2)) => {
            let gray = if channels == 2 {
                first_channel(buffer)
            } else {
                buffer.clone()
            };
            let reduced = normalize_percentile(&gray, config)?;
            let PixelData::U8(plane) = reduced.data() else {
                return Err(unsupported);
            };
            Ok(Normalized::rgb(shape, replicate_gray(plane), Conversion::Percentile))
        }
        (PixelData::F32(values), channels @ 1..=4) => {
            let rgb = match channels {
                1 => replicate_gray(&range_map(values)),
                2 => {
                    let PixelData::F32(plane) = first_channel(buffer).into_data() else {
                        return Err(unsupported);
                    };
                    replicate_gray(&range_map(&plane))
                }
                3 => range_map(values),
                _ => range_map(&drop_alpha(values)),
            };
            Ok(Normalized::rgb(shape, rgb, Conversion::RangeMapped))
        }
        _ => Err(unsupported),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SampleType;
    use assert_matches::assert_matches;

    fn rgb_samples(normalized: &Normalized) -> &[u8] {
        assert_eq!(normalized.buffer.channel_count(), 3);
        match normalized.buffer.data() {
            PixelData::U8(v) => v,
            other => panic!("expected u8 output, got {:?}", other.sample_type()),
        }
    }

    #[test]
    fn test_gray_u8_is_replicated_unchanged() {
        let buffer = PixelBuffer::new(Shape::gray(2, 2), PixelData::U8(vec![0, 64, 128, 255])).unwrap();
        let normalized = convert_to_rgb8(&buffer, &NormalizationConfig::default()).unwrap();

        assert_eq!(normalized.conversion, Conversion::Passthrough);
        assert!(!normalized.was_normalized());
        assert!(!normalized.changed_depth());
        assert_eq!(normalized.buffer.shape(), Shape::with_channels(2, 2, 3));
        for (pixel, &gray) in rgb_samples(&normalized).chunks_exact(3).zip(&[0u8, 64, 128, 255]) {
            assert_eq!(pixel, [gray, gray, gray]);
        }
    }

    #[test]
    fn test_single_channel_3d_is_gray() {
        let buffer =
            PixelBuffer::new(Shape::with_channels(1, 2, 1), PixelData::U8(vec![9, 10])).unwrap();
        let normalized = convert_to_rgb8(&buffer, &NormalizationConfig::default()).unwrap();
        assert_eq!(rgb_samples(&normalized), &[9, 9, 9, 10, 10, 10]);
    }

    #[test]
    fn test_rgb_u8_passes_through() {
        let samples = vec![1, 2, 3, 4, 5, 6];
        let buffer =
            PixelBuffer::new(Shape::with_channels(1, 2, 3), PixelData::U8(samples.clone())).unwrap();
        let normalized = convert_to_rgb8(&buffer, &NormalizationConfig::default()).unwrap();
        assert_eq!(normalized.conversion, Conversion::Passthrough);
        assert_eq!(normalized.buffer, buffer);
    }

    #[test]
    fn test_rgba_u8_drops_alpha() {
        let buffer = PixelBuffer::new(
            Shape::with_channels(1, 2, 4),
            PixelData::U8(vec![10, 20, 30, 255, 40, 50, 60, 0]),
        )
        .unwrap();
        let normalized = convert_to_rgb8(&buffer, &NormalizationConfig::default()).unwrap();
        assert!(!normalized.was_normalized());
        assert_eq!(rgb_samples(&normalized), &[10, 20, 30, 40, 50, 60]);
    }

    #[test]
    fn test_gray_alpha_u8_drops_alpha() {
        let buffer = PixelBuffer::new(
            Shape::with_channels(1, 2, 2),
            PixelData::U8(vec![7, 255, 8, 0]),
        )
        .unwrap();
        let normalized = convert_to_rgb8(&buffer, &NormalizationConfig::default()).unwrap();
        assert_eq!(normalized.conversion, Conversion::Passthrough);
        assert_eq!(rgb_samples(&normalized), &[7, 7, 7, 8, 8, 8]);
    }

    #[test]
    fn test_gray_u16_is_normalized() {
        let data: Vec<u16> = (0..100).map(|i| 1000 + i * 590).collect();
        let buffer = PixelBuffer::new(Shape::gray(10, 10), PixelData::U16(data)).unwrap();
        let normalized = convert_to_rgb8(&buffer, &NormalizationConfig::default()).unwrap();

        assert!(normalized.was_normalized());
        assert!(normalized.changed_depth());
        let samples = rgb_samples(&normalized);
        assert_eq!(samples.len(), 300);
        assert_eq!(*samples.iter().min().unwrap(), 0);
        assert_eq!(*samples.iter().max().unwrap(), 255);
        for pixel in samples.chunks_exact(3) {
            assert_eq!(pixel[0], pixel[1]);
            assert_eq!(pixel[1], pixel[2]);
        }
    }

    #[test]
    fn test_constant_u16_is_all_zero() {
        let buffer = PixelBuffer::new(Shape::gray(3, 3), PixelData::U16(vec![5000; 9])).unwrap();
        let normalized = convert_to_rgb8(&buffer, &NormalizationConfig::default()).unwrap();
        assert!(normalized.was_normalized());
        assert!(rgb_samples(&normalized).iter().all(|&v| v == 0));
    }

    #[test]
    fn test_gray_alpha_u16_ignores_alpha() {
        let buffer = PixelBuffer::new(
            Shape::with_channels(1, 3, 2),
            PixelData::U16(vec![0, 65535, 500, 65535, 1000, 65535]),
        )
        .unwrap();
        let config = NormalizationConfig {
            low_percentile: 0.0,
            high_percentile: 100.0,
            ..NormalizationConfig::default()
        };
        let normalized = convert_to_rgb8(&buffer, &config).unwrap();
        assert_eq!(rgb_samples(&normalized), &[0, 0, 0, 127, 127, 127, 255, 255, 255]);
    }

    #[test]
    fn test_rgb_u16_is_unsupported() {
        let buffer = PixelBuffer::new(Shape::with_channels(2, 2, 3), PixelData::U16(vec![1; 12])).unwrap();
        let result = convert_to_rgb8(&buffer, &NormalizationConfig::default());
        assert_matches!(
            result,
            Err(Unsupported { sample_type: SampleType::U16, shape }) if shape.channel_count() == 3
        );
    }

    #[test]
    fn test_rgba_u32_is_unsupported() {
        let buffer = PixelBuffer::new(Shape::with_channels(1, 1, 4), PixelData::U32(vec![1; 4])).unwrap();
        assert!(convert_to_rgb8(&buffer, &NormalizationConfig::default()).is_err());
    }

    #[test]
    fn test_five_channels_unsupported() {
        let buffer = PixelBuffer::new(Shape::with_channels(1, 1, 5), PixelData::U8(vec![1; 5])).unwrap();
        assert!(convert_to_rgb8(&buffer, &NormalizationConfig::default()).is_err());
    }

    #[test]
    fn test_float_is_range_mapped() {
        let buffer = PixelBuffer::new(
            Shape::with_channels(1, 2, 4),
            PixelData::F32(vec![0.0, 0.5, 1.0, 1.0, 0.25, 0.75, 1.0, 0.0]),
        )
        .unwrap();
        let normalized = convert_to_rgb8(&buffer, &NormalizationConfig::default()).unwrap();
        assert_eq!(normalized.conversion, Conversion::RangeMapped);
        assert!(!normalized.was_normalized());
        assert!(normalized.changed_depth());
        assert_eq!(rgb_samples(&normalized), &[0, 127, 255, 63, 191, 255]);
    }

    #[test]
    fn test_float_gray_is_replicated() {
        let buffer = PixelBuffer::new(Shape::gray(1, 2), PixelData::F32(vec![-4.0, 4.0])).unwrap();
        let normalized = convert_to_rgb8(&buffer, &NormalizationConfig::default()).unwrap();
        assert_eq!(rgb_samples(&normalized), &[0, 0, 0, 255, 255, 255]);
    }

    #[test]
    fn test_to_rgb_image() {
        let buffer = PixelBuffer::new(Shape::gray(1, 2), PixelData::U8(vec![5, 6])).unwrap();
        let image = convert_to_rgb8(&buffer, &NormalizationConfig::default())
            .unwrap()
            .to_rgb_image()
            .unwrap();
        assert_eq!(image.width(), 2);
        assert_eq!(image.height(), 1);
        assert_eq!(image.get_pixel(1, 0).0, [6, 6, 6]);
    }
}
