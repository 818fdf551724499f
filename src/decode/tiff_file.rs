//! TIFF decoding via the `tiff` crate

use crate::error::DecodeError;
use crate::pixels::{PixelBuffer, PixelData};
use crate::types::Shape;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tiff::decoder::{Decoder, DecodingResult};
use tracing::debug;

/// Read the first image of a TIFF file in its native sample type
pub fn read_tiff(path: &Path) -> Result<PixelBuffer, DecodeError> {
    let file = File::open(path)?;
    let mut decoder = Decoder::new(BufReader::new(file))?;
    let (width, height) = decoder.dimensions()?;
    let color_type = decoder.colortype()?;

    debug!(?color_type, width, height, "decoding TIFF {}", path.display());

    let data = match decoder.read_image()? {
        DecodingResult::U8(v) => PixelData::U8(v),
        DecodingResult::U16(v) => PixelData::U16(v),
        DecodingResult::U32(v) => PixelData::U32(v),
        DecodingResult::F32(v) => PixelData::F32(v),
        // f32 keeps more precision than the 8-bit output can show
        DecodingResult::F64(v) => PixelData::F32(v.into_iter().map(|s| s as f32).collect()),
        _ => {
            return Err(DecodeError::UnsupportedSampleType(
                "signed or 64-bit integer samples".to_string(),
            ));
        }
    };

    let shape = shape_from_samples(height, width, data.len());
    PixelBuffer::new(shape, data)
}

/// Derive the channel layout from the decoded sample count
///
/// One sample per pixel gives a 2-D shape. A count that is not a whole
/// multiple of the pixel count is left for `PixelBuffer::new` to reject.
fn shape_from_samples(rows: u32, cols: u32, samples: usize) -> Shape {
    let pixels = rows as usize * cols as usize;
    if pixels == 0 || samples == pixels {
        return Shape::gray(rows, cols);
    }
    Shape::with_channels(rows, cols, samples.div_ceil(pixels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SampleType;
    use tiff::encoder::{TiffEncoder, colortype};

    #[test]
    fn test_shape_from_samples() {
        assert_eq!(shape_from_samples(2, 3, 6), Shape::gray(2, 3));
        assert_eq!(shape_from_samples(2, 3, 18), Shape::with_channels(2, 3, 3));
        assert_eq!(shape_from_samples(2, 3, 24), Shape::with_channels(2, 3, 4));
        // 7 samples for 6 pixels rounds up and fails the length check later
        assert_eq!(shape_from_samples(2, 3, 7), Shape::with_channels(2, 3, 2));
    }

    #[test]
    fn test_read_32bit_gray() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray32.tif");
        let data: Vec<u32> = vec![0, 70_000, 1 << 31, u32::MAX];
        {
            let file = File::create(&path).unwrap();
            let mut encoder = TiffEncoder::new(file).unwrap();
            encoder
                .write_image::<colortype::Gray32>(2, 2, &data)
                .unwrap();
        }

        let buffer = read_tiff(&path).unwrap();
        assert_eq!(buffer.shape(), Shape::gray(2, 2));
        assert_eq!(buffer.sample_type(), SampleType::U32);
        assert_eq!(buffer.data(), &PixelData::U32(data));
    }

    #[test]
    fn test_read_float_gray() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray32f.tif");
        let data: Vec<f32> = vec![-1.5, 0.0, 0.25, 8.0];
        {
            let file = File::create(&path).unwrap();
            let mut encoder = TiffEncoder::new(file).unwrap();
            encoder
                .write_image::<colortype::Gray32Float>(4, 1, &data)
                .unwrap();
        }

        let buffer = read_tiff(&path).unwrap();
        assert_eq!(buffer.shape(), Shape::gray(1, 4));
        assert_eq!(buffer.data(), &PixelData::F32(data));
    }
}
