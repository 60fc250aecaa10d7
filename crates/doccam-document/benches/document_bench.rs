// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the doccam-document scan pipeline.
// Covers edge preprocessing on its own and the full detect-and-rectify run on
// a synthetic photo of a skewed page.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use doccam_core::config::PreprocessConfig;
use doccam_document::scan::preprocess;
use doccam_document::{DocumentScanner, detect_and_rectify};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// 640x480 dark frame with a bright, perspective-skewed page.
fn skewed_page() -> RgbImage {
    let mut img = RgbImage::from_pixel(640, 480, Rgb([30, 30, 30]));
    let page = [
        Point::new(90, 60),
        Point::new(560, 95),
        Point::new(530, 430),
        Point::new(70, 400),
    ];
    draw_polygon_mut(&mut img, &page, Rgb([240, 240, 240]));
    img
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_preprocess(c: &mut Criterion) {
    let photo = skewed_page();
    let config = PreprocessConfig::default();

    c.bench_function("preprocess (640x480)", |b| {
        b.iter(|| black_box(preprocess(black_box(&photo), &config)));
    });
}

fn bench_detect(c: &mut Criterion) {
    let photo = skewed_page();
    let scanner = DocumentScanner::default();

    c.bench_function("detect (640x480)", |b| {
        b.iter(|| black_box(scanner.detect(black_box(&photo))));
    });
}

/// Full pipeline including the warp to a 1000px wide output.
fn bench_detect_and_rectify(c: &mut Criterion) {
    let photo = skewed_page();

    c.bench_function("detect_and_rectify (640x480 -> 1000w)", |b| {
        b.iter(|| black_box(detect_and_rectify(black_box(&photo), 1000)));
    });
}

criterion_group!(benches, bench_preprocess, bench_detect, bench_detect_and_rectify);
criterion_main!(benches);
