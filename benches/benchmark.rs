use criterion::{black_box, criterion_group, criterion_main, Criterion};
use leaf_index::io::ImagePair;
use leaf_index::processing::extractor::mask_pixels;
use leaf_index::processing::indices::leaf::BELOW_ZERO;
use leaf_index::processing::indices::{IndexCalculator, LeafIndex};
use leaf_index::{RasterImage, VegetationIndexExtractor};
use std::path::Path;

/// Synthetic 640x480 capture, roughly the size of a cropped field image
fn synthetic_capture() -> RasterImage {
    let (width, height) = (640, 480);
    let mut data = Vec::with_capacity(width * height * 3);

    for i in 0..width * height {
        data.push((i % 200) as u8);
        data.push((60 + i % 150) as u8);
        data.push((i % 90) as u8);
    }

    RasterImage::from_raw(width, height, 3, data).unwrap()
}

/// Benchmark the core index calculation in isolation
fn benchmark_leaf_index(c: &mut Criterion) {
    let input = synthetic_capture();
    let leaf = LeafIndex::default();

    c.bench_function("leaf_index_calculation", |b| {
        b.iter(|| leaf.calculate(black_box(&input)).unwrap())
    });

    let index = leaf.calculate(&input).unwrap();
    c.bench_function("leaf_index_masking", |b| {
        b.iter(|| mask_pixels(black_box(&input), black_box(&index), BELOW_ZERO))
    });
}

/// Benchmark full processing with file I/O
/// Note: This requires a capture directory to exist at the specified path
fn benchmark_capture_processing(c: &mut Criterion) {
    let capture_dir = "data/IMG_0001";

    if !Path::new(capture_dir).is_dir() {
        println!("Skipping file I/O benchmark - capture not found at {capture_dir}");
        return;
    }

    let pair = match ImagePair::from_directory(capture_dir) {
        Ok(pair) => pair,
        Err(e) => {
            println!("Skipping file I/O benchmark - {e}");
            return;
        }
    };

    c.bench_function("leaf_index_capture", |b| {
        b.iter(|| {
            let mut extractor = VegetationIndexExtractor::new(false);
            extractor.load_pair(black_box(&pair)).unwrap();
            extractor.calculate_vegetation_index().unwrap()
        })
    });
}

criterion_group!(benches, benchmark_leaf_index, benchmark_capture_processing);
criterion_main!(benches);
