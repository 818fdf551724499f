//! Typed pixel buffers
//!
//! A `PixelBuffer` is the decoded, immutable form of an image file: a shape
//! plus a dense, row-major, channel-interleaved sample vector.

use crate::error::DecodeError;
use crate::types::{Dimensions, SampleType, Shape};

#[derive(Debug, Clone, PartialEq)]
pub enum PixelData {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    F32(Vec<f32>),
}

impl PixelData {
    #[must_use]
    pub fn sample_type(&self) -> SampleType {
        match self {
            Self::U8(_) => SampleType::U8,
            Self::U16(_) => SampleType::U16,
            Self::U32(_) => SampleType::U32,
            Self::F32(_) => SampleType::F32,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::U8(v) => v.len(),
            Self::U16(v) => v.len(),
            Self::U32(v) => v.len(),
            Self::F32(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every sample widened to f64
    pub fn iter_f64(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        match self {
            Self::U8(v) => Box::new(v.iter().map(|&s| f64::from(s))),
            Self::U16(v) => Box::new(v.iter().map(|&s| f64::from(s))),
            Self::U32(v) => Box::new(v.iter().map(|&s| f64::from(s))),
            Self::F32(v) => Box::new(v.iter().map(|&s| f64::from(s))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    shape: Shape,
    data: PixelData,
}

impl PixelBuffer {
    /// Build a buffer, checking the sample count against the shape
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::ShapeMismatch` if `data` does not hold exactly
    /// `rows * cols * channels` samples
    pub fn new(shape: Shape, data: PixelData) -> Result<Self, DecodeError> {
        let expected = shape.sample_count();
        if data.len() != expected {
            return Err(DecodeError::ShapeMismatch {
                shape,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Build a buffer whose sample count is known to match the shape
    pub(crate) fn from_parts(shape: Shape, data: PixelData) -> Self {
        debug_assert_eq!(shape.sample_count(), data.len());
        Self { shape, data }
    }

    #[inline]
    #[must_use]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.shape.dimensions
    }

    #[inline]
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.shape.channel_count()
    }

    #[inline]
    #[must_use]
    pub fn data(&self) -> &PixelData {
        &self.data
    }

    #[inline]
    #[must_use]
    pub fn sample_type(&self) -> SampleType {
        self.data.sample_type()
    }

    #[must_use]
    pub fn into_data(self) -> PixelData {
        self.data
    }

    /// Smallest and largest sample, `None` for an empty buffer
    #[must_use]
    pub fn min_max(&self) -> Option<(f64, f64)> {
        if self.data.is_empty() {
            return None;
        }
        Some(
            self.data
                .iter_f64()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
                    (min.min(v), max.max(v))
                }),
        )
    }
}
