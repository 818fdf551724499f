//! Percentile-based bit depth reduction
//!
//! Wide integer samples are clipped to the `[p_low, p_high]` window given by
//! two percentiles of the whole buffer and mapped affinely onto `[0, 255]`.

use crate::error::Unsupported;
use crate::pixels::{PixelBuffer, PixelData};
use serde::Deserialize;

/// Output for buffers whose percentile window is empty or inverted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Every output sample is 0
    #[default]
    Zero,
    /// Every output sample is 255 when the window's low value is nonzero,
    /// 0 otherwise
    #[serde(rename = "saturate_nonzero")]
    SaturateNonZero,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizationConfig {
    pub low_percentile: f64,
    pub high_percentile: f64,
    pub degenerate: DegeneratePolicy,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            low_percentile: 1.0,
            high_percentile: 99.0,
            degenerate: DegeneratePolicy::Zero,
        }
    }
}

/// The `[low, high]` clip window computed from a buffer's samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipWindow {
    pub low: f64,
    pub high: f64,
}

impl ClipWindow {
    /// Window spanning the configured percentiles of `samples`
    #[must_use]
    pub fn from_samples(samples: &[u32], config: &NormalizationConfig) -> Self {
        let mut sorted = samples.to_vec();
        sorted.sort_unstable();
        Self {
            low: percentile(&sorted, config.low_percentile),
            high: percentile(&sorted, config.high_percentile),
        }
    }

    /// `high <= low`: a constant image or a pathological percentile pair
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.high <= self.low
    }

    /// Clip and rescale one sample; only meaningful for a non-degenerate window
    #[inline]
    #[must_use]
    pub fn map(&self, value: f64) -> u8 {
        let clipped = value.max(self.low).min(self.high);
        // Truncating cast, saturating at the u8 bounds
        ((clipped - self.low) * 255.0 / (self.high - self.low)) as u8
    }

    #[inline]
    #[must_use]
    pub fn degenerate_fill(&self, policy: DegeneratePolicy) -> u8 {
        match policy {
            DegeneratePolicy::Zero => 0,
            DegeneratePolicy::SaturateNonZero if self.low > 0.0 => 255,
            DegeneratePolicy::SaturateNonZero => 0,
        }
    }
}

/// The `q`-th percentile of ascending `sorted`, interpolating linearly
/// between neighbouring order statistics
///
/// `q` is clamped to `[0, 100]`. An empty slice yields 0.
#[must_use]
pub fn percentile(sorted: &[u32], q: f64) -> f64 {
    let Some(last) = sorted.len().checked_sub(1) else {
        return 0.0;
    };
    let rank = q.clamp(0.0, 100.0) / 100.0 * last as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;

    let a = f64::from(sorted[lower]);
    let b = f64::from(sorted[upper]);
    (b - a).mul_add(fraction, a)
}

/// Reduce a wide integer buffer to 8 bits, keeping its shape
///
/// 8-bit buffers come back unchanged without computing any percentiles.
///
/// # Errors
///
/// Returns `Unsupported` for floating point buffers, which have no
/// percentile normalization
pub fn normalize_percentile(
    buffer: &PixelBuffer,
    config: &NormalizationConfig,
) -> Result<PixelBuffer, Unsupported> {
    let samples: Vec<u32> = match buffer.data() {
        PixelData::U8(_) => return Ok(buffer.clone()),
        PixelData::U16(v) => v.iter().map(|&s| u32::from(s)).collect(),
        PixelData::U32(v) => v.clone(),
        PixelData::F32(_) => {
            return Err(Unsupported {
                shape: buffer.shape(),
                sample_type: buffer.sample_type(),
            });
        }
    };

    let window = ClipWindow::from_samples(&samples, config);
    let output = if window.is_degenerate() {
        vec![window.degenerate_fill(config.degenerate); samples.len()]
    } else {
        samples.iter().map(|&v| window.map(f64::from(v))).collect()
    };

    Ok(PixelBuffer::from_parts(buffer.shape(), PixelData::U8(output)))
}
