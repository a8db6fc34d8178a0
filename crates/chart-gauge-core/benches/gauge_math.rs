//! Benchmarks for the per-frame math on the animation path.

use chart_gauge_core::{AngleScale, Point, Scene, Timing, Tween};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_scale_angle(c: &mut Criterion) {
    let scale = AngleScale::new(0.0, 100.0);

    c.bench_function("scale_angle", |b| b.iter(|| scale.angle(black_box(75.0))));
}

fn bench_tween_sample(c: &mut Criterion) {
    let tween = Tween::new(-1.5, 0.8, 0.0, Timing::NEEDLE);

    c.bench_function("tween_sample_elastic", |b| {
        b.iter(|| tween.sample(black_box(1_750.0)))
    });
}

fn bench_needle_points(c: &mut Criterion) {
    c.bench_function("needle_points", |b| {
        b.iter(|| {
            let angle = black_box(0.4);
            let tip = Point::polar(75.0, angle);
            let left = Point::polar(10.0, angle - std::f64::consts::FRAC_PI_2);
            let right = Point::polar(10.0, angle + std::f64::consts::FRAC_PI_2);
            (tip, left, right)
        })
    });
}

fn bench_svg_serialize(c: &mut Criterion) {
    let scene = Scene::new(400.0, 300.0);

    c.bench_function("svg_serialize_empty", |b| b.iter(|| black_box(&scene).to_svg()));
}

criterion_group!(
    benches,
    bench_scale_angle,
    bench_tween_sample,
    bench_needle_points,
    bench_svg_serialize,
);
criterion_main!(benches);
