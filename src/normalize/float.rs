//! Floating point samples: plain min/max range mapping, no percentiles

#[inline]
#[must_use]
pub fn find_min_max(values: &[f32]) -> (f32, f32) {
    values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), &val| {
            (min.min(val), max.max(val))
        })
}

#[inline]
#[must_use]
pub fn normalize_f32_to_u8(value: f32, min: f32, range: f32) -> u8 {
    let normalized = (value - min) / range;
    // Saturating cast: NaN becomes 0, out-of-range values clamp to 0 or 255
    (normalized * 255.0_f32) as u8
}

/// Map `[min, max]` of `values` linearly onto `[0, 255]`
///
/// A constant buffer maps to 0 everywhere.
#[must_use]
pub fn range_map(values: &[f32]) -> Vec<u8> {
    let (min, max) = find_min_max(values);
    let range = if max > min { max - min } else { 1.0_f32 };
    let min = if min.is_finite() { min } else { 0.0_f32 };

    values
        .iter()
        .map(|&v| normalize_f32_to_u8(v, min, range))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_map_spans_output() {
        assert_eq!(range_map(&[-1.0, 0.0, 1.0]), vec![0, 127, 255]);
        assert_eq!(range_map(&[0.0, 0.5, 1.0]), vec![0, 127, 255]);
    }

    #[test]
    fn test_range_map_constant() {
        assert_eq!(range_map(&[3.5; 4]), vec![0; 4]);
    }

    #[test]
    fn test_non_finite_values_ignored_for_range() {
        let mapped = range_map(&[0.0, f32::NAN, 2.0, f32::INFINITY]);
        assert_eq!(mapped, vec![0, 0, 255, 255]);
    }
}
