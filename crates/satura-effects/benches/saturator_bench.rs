//! Criterion benchmarks for the oversampled saturator
//!
//! Run with: cargo bench -p satura-effects
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use satura_effects::{OversampledSaturator, ProcessSpec};

const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / 48_000.0;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.8
        })
        .collect()
}

fn bench_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("OversampledSaturator");

    for &block_size in BLOCK_SIZES {
        let left = generate_test_signal(block_size);
        let right = generate_test_signal(block_size);

        group.bench_with_input(
            BenchmarkId::new("process_stereo_48k", block_size),
            &block_size,
            |b, _| {
                let mut saturator = OversampledSaturator::new();
                saturator
                    .configure(ProcessSpec {
                        sample_rate: 48_000.0,
                        max_block_size: block_size,
                        channels: 2,
                    })
                    .unwrap();
                saturator.set_gain(4.0);

                let mut out_l = vec![0.0_f32; block_size];
                let mut out_r = vec![0.0_f32; block_size];
                let in_refs: [&[f32]; 2] = [&left, &right];

                b.iter(|| {
                    saturator
                        .process(
                            black_box(&in_refs),
                            &mut [&mut out_l, &mut out_r],
                            false,
                        )
                        .unwrap();
                    black_box(out_l[0]);
                });
            },
        );
    }

    group.bench_function("configure_stereo_48k", |b| {
        b.iter(|| {
            let mut saturator = OversampledSaturator::new();
            saturator
                .configure(ProcessSpec {
                    sample_rate: 48_000.0,
                    max_block_size: 512,
                    channels: 2,
                })
                .unwrap();
            black_box(saturator.latency());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_process);
criterion_main!(benches);
