//! Single-channel helpers

use crate::pixels::{PixelBuffer, PixelData};
use crate::types::Shape;

/// Replicate an 8-bit plane into interleaved RGB
#[must_use]
pub fn replicate_gray(plane: &[u8]) -> Vec<u8> {
    plane.iter().flat_map(|&gray| [gray, gray, gray]).collect()
}

fn every_nth<T: Copy>(samples: &[T], channels: usize) -> Vec<T> {
    samples.iter().step_by(channels.max(1)).copied().collect()
}

/// The first channel of `buffer` as a 2-D buffer
///
/// Used to strip the alpha plane of gray+alpha images.
#[must_use]
pub fn first_channel(buffer: &PixelBuffer) -> PixelBuffer {
    let channels = buffer.channel_count();
    let data = match buffer.data() {
        PixelData::U8(v) => PixelData::U8(every_nth(v, channels)),
        PixelData::U16(v) => PixelData::U16(every_nth(v, channels)),
        PixelData::U32(v) => PixelData::U32(every_nth(v, channels)),
        PixelData::F32(v) => PixelData::F32(every_nth(v, channels)),
    };
    let shape = Shape::gray(buffer.shape().rows(), buffer.shape().cols());
    PixelBuffer::from_parts(shape, data)
}
