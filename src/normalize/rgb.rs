//! Multi-channel helpers

/// Drop the fourth sample of every interleaved RGBA pixel
#[must_use]
pub fn drop_alpha<T: Copy>(samples: &[T]) -> Vec<T> {
    let mut rgb = Vec::with_capacity(samples.len() / 4 * 3);
    for pixel in samples.chunks_exact(4) {
        rgb.extend_from_slice(&pixel[..3]);
    }
    rgb
}
