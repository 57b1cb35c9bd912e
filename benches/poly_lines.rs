use criterion::{black_box, criterion_group, criterion_main, Criterion};
use polyline_rects::basics::{CoordMode, PointI};
use polyline_rects::color::Rgba8;
use polyline_rects::line_context::LineContext;
use polyline_rects::poly_lines::{decompose_polyline, poly_lines, LineTarget};
use polyline_rects::surface::Surface;

/// A closed star with shallow, steep and axis-aligned edges.
fn star(cx: i32, cy: i32, r: f64, spikes: usize) -> Vec<PointI> {
    let n = spikes * 2;
    let mut points: Vec<_> = (0..=n)
        .map(|i| {
            let a = i as f64 * std::f64::consts::PI / spikes as f64;
            let len = if i % 2 == 0 { r } else { r * 0.4 };
            PointI::new(cx + (a.cos() * len) as i32, cy + (a.sin() * len) as i32)
        })
        .collect();
    points.push(PointI::new(cx - r as i32, cy));
    points
}

fn criterion_benchmark(c: &mut Criterion) {
    let points = star(256, 256, 240.0, 24);
    let ctx = LineContext::new(Rgba8::black());

    c.bench_function("decompose star", |b| {
        b.iter(|| {
            black_box(decompose_polyline(CoordMode::Origin, black_box(&points)))
        })
    });

    let mut surface = Surface::new(512, 512);
    c.bench_function("fill star via rectangles", |b| {
        b.iter(|| {
            poly_lines(&mut surface, &ctx, CoordMode::Origin, black_box(&points))
        })
    });

    c.bench_function("fill star per pixel", |b| {
        b.iter(|| {
            surface.poly_line_fallback(&ctx, CoordMode::Origin, black_box(&points))
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
