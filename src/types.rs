//! Domain types describing pixel buffers

use std::fmt;

/// Element type of a pixel buffer (the buffer's dtype)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleType {
    U8,
    U16,
    U32,
    F32,
}

impl SampleType {
    #[inline]
    #[must_use]
    pub fn bits(self) -> u32 {
        match self {
            Self::U8 => 8,
            Self::U16 => 16,
            Self::U32 | Self::F32 => 32,
        }
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U8 => write!(f, "uint8"),
            Self::U16 => write!(f, "uint16"),
            Self::U32 => write!(f, "uint32"),
            Self::F32 => write!(f, "float32"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub rows: u32,
    pub cols: u32,
}

impl Dimensions {
    #[must_use]
    pub fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    #[inline]
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{cols}x{rows}", cols = self.cols, rows = self.rows)
    }
}

/// Buffer layout: (H, W) when `channels` is `None`, (H, W, C) otherwise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub dimensions: Dimensions,
    pub channels: Option<usize>,
}

impl Shape {
    #[must_use]
    pub fn gray(rows: u32, cols: u32) -> Self {
        Self {
            dimensions: Dimensions::new(rows, cols),
            channels: None,
        }
    }

    #[must_use]
    pub fn with_channels(rows: u32, cols: u32, channels: usize) -> Self {
        Self {
            dimensions: Dimensions::new(rows, cols),
            channels: Some(channels),
        }
    }

    /// Number of samples per pixel; a 2-D shape counts as one
    #[inline]
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.channels.unwrap_or(1)
    }

    #[inline]
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.dimensions.pixel_count() * self.channel_count()
    }

    #[inline]
    #[must_use]
    pub fn rows(&self) -> u32 {
        self.dimensions.rows
    }

    #[inline]
    #[must_use]
    pub fn cols(&self) -> u32 {
        self.dimensions.cols
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.channels {
            Some(c) => write!(f, "({}, {}, {c})", self.rows(), self.cols()),
            None => write!(f, "({}, {})", self.rows(), self.cols()),
        }
    }
}
