//! Benchmark: boundary search and drag tracking.
//!
//! Run with: `cargo bench -p roto-core --bench snap_bench`
//!
//! The boundary search is a linear scan, so its cost grows with the item
//! count. The tracking benchmark measures one pointer-move, which runs on
//! every input event while dragging.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use roto_core::{
    Direction, MotionConfig, MotionController, Point, SnapResolver, StripLayout,
    TransitionAnimator,
};
use web_time::{Duration, Instant};

// ===========================================================================
// Boundary search
// ===========================================================================

fn bench_boundary_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("boundary_search");
    let resolver = SnapResolver::new();

    for count in [10usize, 100, 1_000] {
        // Mixed extents with a stacked zero-width item every 7th slot.
        let extents = (0..count).map(|i| if i % 7 == 3 { 0.0 } else { 80.0 + (i % 5) as f64 * 10.0 });
        let layout = StripLayout::new(extents, 320.0);
        let middle = -(count as f64) * 45.0;

        group.bench_with_input(BenchmarkId::new("nearest_next", count), &layout, |b, l| {
            b.iter(|| resolver.nearest_boundary(l, black_box(middle), Direction::Next));
        });
        group.bench_with_input(BenchmarkId::new("nearest_prev", count), &layout, |b, l| {
            b.iter(|| resolver.nearest_boundary(l, black_box(middle), Direction::Prev));
        });
        group.bench_with_input(BenchmarkId::new("next_next", count), &layout, |b, l| {
            b.iter(|| resolver.next_boundary(l, black_box(middle), Direction::Next));
        });
    }
    group.finish();
}

// ===========================================================================
// Drag tracking
// ===========================================================================

fn bench_pointer_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("tracking");
    let t = Instant::now();
    let mut controller = MotionController::new(
        MotionConfig::default(),
        StripLayout::uniform(200, 90.0, 360.0),
        TransitionAnimator::new(0.0),
    )
    .expect("default config is valid");
    controller.pointer_down(Point::new(0.0, 0.0), t);

    let mut x = 0.0;
    let mut now = t;
    group.bench_function("pointer_move", |b| {
        b.iter(|| {
            x -= 1.0;
            now += Duration::from_millis(1);
            controller.pointer_move(black_box(Point::new(x, 0.0)), now);
        });
    });
    group.finish();
}

criterion_group!(benches, bench_boundary_search, bench_pointer_move);
criterion_main!(benches);
