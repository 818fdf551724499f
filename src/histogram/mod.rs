//! Histogram reporter
//!
//! Produces the frequency distribution of a buffer over a range picked from
//! its dtype. Rasterizing it is left to a `HistogramRenderer`.

mod render;

pub use render::{HistogramRenderer, PlottersRenderer};

use crate::pixels::PixelBuffer;
use crate::types::SampleType;

/// Bins per series, matching the 8-bit value count
pub const BIN_COUNT: usize = 256;

/// Half-open value range `[start, end)` covered by the bins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramRange {
    pub start: f64,
    pub end: f64,
}

impl HistogramRange {
    /// Range implied by the buffer's dtype
    ///
    /// Integer types cover their whole value space; anything else covers
    /// `[min, max + 1)`, which is width 1 for a constant buffer.
    #[must_use]
    pub fn for_buffer(buffer: &PixelBuffer) -> Self {
        match buffer.sample_type() {
            SampleType::U8 => Self { start: 0.0, end: 256.0 },
            SampleType::U16 => Self { start: 0.0, end: 65_536.0 },
            SampleType::U32 => Self { start: 0.0, end: 4_294_967_296.0 },
            SampleType::F32 => {
                let (min, max) = buffer.min_max().unwrap_or((0.0, 0.0));
                if min.is_finite() && max.is_finite() && max > min {
                    Self { start: min, end: max + 1.0 }
                } else if min.is_finite() {
                    Self { start: min, end: min + 1.0 }
                } else {
                    Self { start: 0.0, end: 1.0 }
                }
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// Bin holding `value`, `None` when outside the range
    #[inline]
    #[must_use]
    pub fn bin_of(&self, value: f64) -> Option<usize> {
        if !(value >= self.start && value < self.end) {
            return None;
        }
        let bin = ((value - self.start) / self.width() * BIN_COUNT as f64) as usize;
        Some(bin.min(BIN_COUNT - 1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesColor {
    Red,
    Green,
    Blue,
    Black,
}

/// Fixed color order for per-channel series
const CHANNEL_COLORS: [SeriesColor; 3] = [SeriesColor::Red, SeriesColor::Green, SeriesColor::Blue];

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub color: SeriesColor,
    pub counts: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub title: String,
    pub x_label: String,
    pub range: HistogramRange,
    pub series: Vec<Series>,
}

impl Histogram {
    #[inline]
    #[must_use]
    pub fn bin_width(&self) -> f64 {
        self.range.width() / BIN_COUNT as f64
    }

    /// Lower edge of bin `index`; `bin_start(BIN_COUNT)` is the range end
    #[inline]
    #[must_use]
    pub fn bin_start(&self, index: usize) -> f64 {
        (index as f64).mul_add(self.bin_width(), self.range.start)
    }

    /// One curve per color channel rather than a single distribution
    #[inline]
    #[must_use]
    pub fn is_per_channel(&self) -> bool {
        self.series.len() > 1
    }

    #[must_use]
    pub fn max_count(&self) -> u64 {
        self.series
            .iter()
            .flat_map(|s| s.counts.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

fn x_label(sample_type: SampleType) -> String {
    match sample_type {
        SampleType::U8 | SampleType::U16 | SampleType::U32 => {
            format!("Pixel Value ({}-bit)", sample_type.bits())
        }
        SampleType::F32 => format!("Pixel Value ({sample_type})"),
    }
}

fn count_bins(values: impl Iterator<Item = f64>, range: &HistogramRange) -> Vec<u64> {
    let mut counts = vec![0u64; BIN_COUNT];
    for bin in values.filter_map(|v| range.bin_of(v)) {
        counts[bin] += 1;
    }
    counts
}

/// Frequency distribution of `buffer`
///
/// Buffers with 3 or 4 channels get one series per color channel (alpha is
/// ignored); everything else gets one series over all samples.
#[must_use]
pub fn compute_histogram(buffer: &PixelBuffer, title: &str) -> Histogram {
    let range = HistogramRange::for_buffer(buffer);
    let channels = buffer.channel_count();

    let series = if matches!(buffer.shape().channels, Some(3 | 4)) {
        CHANNEL_COLORS
            .iter()
            .enumerate()
            .map(|(channel, &color)| Series {
                label: format!("Channel {channel}"),
                color,
                counts: count_bins(
                    buffer.data().iter_f64().skip(channel).step_by(channels),
                    &range,
                ),
            })
            .collect()
    } else {
        vec![Series {
            label: "All".to_string(),
            color: SeriesColor::Black,
            counts: count_bins(buffer.data().iter_f64(), &range),
        }]
    };

    Histogram {
        title: title.to_string(),
        x_label: x_label(buffer.sample_type()),
        range,
        series,
    }
}
