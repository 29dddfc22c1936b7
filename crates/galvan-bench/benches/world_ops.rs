//! CA stepping and viewport extraction on a match-sized arena.

use criterion::{criterion_group, criterion_main, Criterion};
use galvan_bench::standard_world;
use galvan_core::Facing;
use galvan_obs::Viewport;

fn ca_step(c: &mut Criterion) {
    let mut world = standard_world(42);
    c.bench_function("world_step_320x320", |b| {
        b.iter(|| {
            world.step();
            world.drain_losses()
        })
    });
}

fn viewport_extract(c: &mut Criterion) {
    let world = standard_world(42);
    let viewport = Viewport::default();
    c.bench_function("viewport_13_extract", |b| {
        let mut cells = Vec::new();
        let mut damage = Vec::new();
        b.iter(|| {
            cells.clear();
            damage.clear();
            viewport.extract(&world, 160, 160, Facing::East, &mut cells, &mut damage);
            cells.len()
        })
    });
}

criterion_group!(benches, ca_step, viewport_extract);
criterion_main!(benches);
