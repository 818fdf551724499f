use criterion::{Criterion, criterion_group, criterion_main};
use depthnorm::histogram::compute_histogram;
use depthnorm::normalize::{self, NormalizationConfig};
use depthnorm::pixels::{PixelBuffer, PixelData};
use depthnorm::types::Shape;
use std::hint::black_box;

const SIDE: u32 = 1024;

/// Synthetic 16-bit gray frame with a smooth gradient and some structure
fn gray16_frame() -> PixelBuffer {
    let data = (0..SIDE * SIDE)
        .map(|i| {
            let (x, y) = (i % SIDE, i / SIDE);
            (1000 + (x * 40 + y * 17 + (x ^ y) % 977) % 58_000) as u16
        })
        .collect();
    PixelBuffer::new(Shape::gray(SIDE, SIDE), PixelData::U16(data)).unwrap()
}

// ============================================================================
// PIPELINE STAGES
// ============================================================================

/// Percentile window selection plus per-sample mapping
fn bench_percentile(c: &mut Criterion) {
    let mut group = c.benchmark_group("percentile");
    let frame = gray16_frame();
    let config = NormalizationConfig::default();

    group.bench_function("gray16_1024", |b| {
        b.iter(|| {
            let result = normalize::normalize_percentile(black_box(&frame), &config).unwrap();
            black_box(result);
        });
    });

    group.finish();
}

/// Full channel policy: normalization and gray replication
fn bench_convert_to_rgb8(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_to_rgb8");
    let frame = gray16_frame();
    let config = NormalizationConfig::default();

    group.bench_function("gray16_1024", |b| {
        b.iter(|| {
            let result = normalize::convert_to_rgb8(black_box(&frame), &config).unwrap();
            black_box(result);
        });
    });

    group.finish();
}

/// Binning only; drawing is not measured
fn bench_histogram(c: &mut Criterion) {
    let mut group = c.benchmark_group("histogram");
    let frame = gray16_frame();
    let normalized = normalize::convert_to_rgb8(&frame, &NormalizationConfig::default()).unwrap();

    group.bench_function("input_gray16", |b| {
        b.iter(|| black_box(compute_histogram(black_box(&frame), "input")));
    });

    group.bench_function("output_rgb8", |b| {
        b.iter(|| black_box(compute_histogram(black_box(&normalized.buffer), "output")));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_percentile,
    bench_convert_to_rgb8,
    bench_histogram,
);

criterion_main!(benches);
