// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_quadtree::{ObjectKind, QuadTree, QuadTreeConfig, SplitPolicy};

const DOMAIN: Rect = Rect::new(0.0, 0.0, 1000.0, 1000.0);

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_uniform_points(count: usize, seed: u64) -> Vec<Point> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| Point::new(rng.next_f64() * DOMAIN.x1, rng.next_f64() * DOMAIN.y1))
        .collect()
}

/// Points packed into a handful of small blobs, the shape a refined mesh has.
fn gen_clustered_points(count: usize, clusters: usize, seed: u64) -> Vec<Point> {
    let mut rng = Rng::new(seed);
    let centers: Vec<Point> = (0..clusters)
        .map(|_| Point::new(rng.next_f64() * DOMAIN.x1, rng.next_f64() * DOMAIN.y1))
        .collect();
    (0..count)
        .map(|i| {
            let c = centers[i % clusters];
            let x = (c.x + (rng.next_f64() - 0.5) * 20.0).clamp(DOMAIN.x0, DOMAIN.x1);
            let y = (c.y + (rng.next_f64() - 0.5) * 20.0).clamp(DOMAIN.y0, DOMAIN.y1);
            Point::new(x, y)
        })
        .collect()
}

fn build(points: &[Point], capacity: usize, policy: SplitPolicy) -> QuadTree<'_, Point> {
    let cfg = QuadTreeConfig::with_capacity(capacity).split_policy(policy);
    let mut tree = QuadTree::with_config(ObjectKind::Point, DOMAIN, cfg);
    for p in points {
        tree.insert(p);
    }
    tree
}

fn linear_circle(points: &[Point], center: Point, radius: f64) -> usize {
    let r2 = radius * radius;
    points
        .iter()
        .filter(|p| (**p - center).hypot2() <= r2)
        .count()
}

fn linear_rect(points: &[Point], rect: Rect) -> usize {
    points
        .iter()
        .filter(|p| rect.x0 <= p.x && p.x <= rect.x1 && rect.y0 <= p.y && p.y <= rect.y1)
        .count()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_build");
    for &n in &[1_000usize, 10_000] {
        let points = gen_uniform_points(n, 0xA5A5_5A5A_DEAD_BEEF);
        group.throughput(Throughput::Elements(n as u64));
        for &capacity in &[4usize, 16] {
            group.bench_function(format!("cascade_cap{capacity}_n{n}"), |b| {
                b.iter(|| black_box(build(&points, capacity, SplitPolicy::Cascade).len()));
            });
        }
        group.bench_function(format!("lazy_cap16_n{n}"), |b| {
            b.iter(|| black_box(build(&points, 16, SplitPolicy::Lazy).len()));
        });
    }
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_vs_linear_query");
    for (label, points) in [
        ("uniform", gen_uniform_points(20_000, 0x1234_5678_9ABC_DEF0)),
        ("clustered", gen_clustered_points(20_000, 16, 0x0F0F_F0F0_1357_2468)),
    ] {
        let tree = build(&points, 10, SplitPolicy::Cascade);
        let center = points[points.len() / 2];
        let radius = 15.0;
        let rect = Rect::from_center_size(center, (40.0, 40.0));

        group.bench_function(format!("circle_quadtree_{label}"), |b| {
            b.iter(|| black_box(tree.query_circle(black_box(center), radius).len()));
        });
        group.bench_function(format!("circle_linear_{label}"), |b| {
            b.iter(|| black_box(linear_circle(&points, black_box(center), radius)));
        });
        group.bench_function(format!("rect_quadtree_{label}"), |b| {
            b.iter(|| black_box(tree.query_rect(black_box(rect)).len()));
        });
        group.bench_function(format!("rect_linear_{label}"), |b| {
            b.iter(|| black_box(linear_rect(&points, black_box(rect))));
        });

        // Reuse one output buffer across queries, as a mesh front does.
        group.bench_function(format!("circle_quadtree_into_{label}"), |b| {
            let mut out = Vec::new();
            b.iter(|| {
                out.clear();
                tree.query_circle_into(black_box(center), radius, &mut out);
                black_box(out.len())
            });
        });
    }
    group.finish();
}

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_churn");
    let points = gen_uniform_points(10_000, 0xFEED_FACE_CAFE_BEEF);
    let half = points.len() / 2;
    group.throughput(Throughput::Elements(half as u64));
    // Remove the first half and put it back, exercising merges and re-splits.
    group.bench_function("remove_reinsert_half_n10000", |b| {
        b.iter_batched(
            || build(&points, 10, SplitPolicy::Cascade),
            |mut tree| {
                for p in &points[..half] {
                    tree.remove(p);
                }
                for p in &points[..half] {
                    tree.insert(p);
                }
                black_box(tree.len())
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_queries, bench_churn);
criterion_main!(benches);
