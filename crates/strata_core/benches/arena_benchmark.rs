//! # Arena Benchmark
//!
//! Measures the bump path, region growth, and reset-and-reuse cycles.
//!
//! Run with: `cargo bench --package strata_core`

// Benchmarks don't need docs
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use strata_core::Arena;

/// Allocations per iteration.
const ALLOCS_PER_FRAME: usize = 10_000;

/// Benchmark: small allocations that all land in one warm region.
fn bench_bump_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("bump_path");

    for size in [8usize, 64, 256] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut arena = Arena::create(size * ALLOCS_PER_FRAME);
            b.iter(|| {
                for _ in 0..ALLOCS_PER_FRAME {
                    black_box(arena.alloc(size).unwrap());
                }
                arena.reset();
            });
        });
    }

    group.finish();
}

/// Benchmark: a cold arena growing its chain from scratch every iteration.
fn bench_cold_growth(c: &mut Criterion) {
    c.bench_function("cold_growth_10k_x64", |b| {
        b.iter(|| {
            let mut arena = Arena::create(4096);
            for _ in 0..ALLOCS_PER_FRAME {
                black_box(arena.alloc(64).unwrap());
            }
            arena.region_count()
        });
    });
}

/// Benchmark: per-frame pattern with mixed sizes, reset between frames.
fn bench_frame_reuse(c: &mut Criterion) {
    let mut arena = Arena::default();

    c.bench_function("frame_reuse_mixed", |b| {
        b.iter(|| {
            for i in 0..ALLOCS_PER_FRAME {
                let size = 16 + (i % 7) * 48;
                black_box(arena.alloc(size).unwrap());
            }
            arena.reset();
        });
    });
}

criterion_group!(benches, bench_bump_path, bench_cold_growth, bench_frame_reuse);
criterion_main!(benches);
