// SPDX-License-Identifier: MPL-2.0

//! Benchmarks for the spectrum pipeline.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{GrayImage, Luma};
use spectra2d::{forward_transform, magnitude_spectrum, pad, reconstruct};

fn test_image(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| Luma([((x ^ y) & 0xff) as u8]))
}

fn bench_forward(c: &mut Criterion) {
    // 500 is 2^2 * 5^3, 487 is prime and pads to 500.
    let optimal = test_image(500, 500);
    let prime = test_image(487, 487);

    c.bench_function("forward_500x500", |b| {
        b.iter(|| black_box(forward_transform(black_box(&optimal))));
    });

    c.bench_function("forward_487x487_unpadded", |b| {
        b.iter(|| black_box(forward_transform(black_box(&prime))));
    });

    c.bench_function("pad_and_forward_487x487", |b| {
        b.iter(|| {
            let padded = pad(black_box(&prime)).unwrap();
            black_box(forward_transform(&padded))
        });
    });
}

fn bench_display(c: &mut Criterion) {
    let spectrum = forward_transform(&test_image(512, 512));

    c.bench_function("magnitude_spectrum_512x512", |b| {
        b.iter(|| black_box(magnitude_spectrum(black_box(&spectrum))));
    });

    c.bench_function("reconstruct_512x512", |b| {
        b.iter(|| {
            let mut complex = spectrum.clone();
            black_box(reconstruct(&mut complex))
        });
    });
}

criterion_group!(benches, bench_forward, bench_display);
criterion_main!(benches);
