// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the docuscan-detect crate. Benchmarks the
// contrast gate and the edge-scan estimator on a synthetic camera frame.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{Rgba, RgbaImage};

use docuscan_core::config::{ContrastConfig, EdgeScanConfig};
use docuscan_detect::{ContrastGate, EdgeScanEstimator};

/// A 1280x720 frame with a bright document rectangle on a dark background —
/// the same pattern used in the unit tests, at a realistic webcam resolution.
fn synthetic_frame() -> RgbaImage {
    RgbaImage::from_fn(1280, 720, |x, y| {
        if (320..960).contains(&x) && (180..540).contains(&y) {
            Rgba([245, 245, 245, 255])
        } else {
            Rgba([25, 25, 25, 255])
        }
    })
}

fn bench_contrast_gate(c: &mut Criterion) {
    let frame = synthetic_frame();
    let gate = ContrastGate::new(ContrastConfig::default());

    c.bench_function("contrast_gate (1280x720)", |b| {
        b.iter(|| black_box(gate.has_sufficient_contrast(black_box(&frame))));
    });
}

fn bench_edge_scan(c: &mut Criterion) {
    let frame = synthetic_frame();
    let estimator = EdgeScanEstimator::new(EdgeScanConfig::default());

    c.bench_function("edge_scan (1280x720)", |b| {
        b.iter(|| black_box(estimator.estimate(black_box(&frame))));
    });
}

criterion_group!(benches, bench_contrast_gate, bench_edge_scan);
criterion_main!(benches);
