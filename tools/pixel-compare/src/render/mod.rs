// Polyline scenes rendered through either drawing path.
//
// Each scene is a list of polylines. The accelerated path sends them
// through the rectangle decomposer; the reference path rasterizes them
// pixel by pixel. For thin solid lines the two must agree exactly.

use polyline_rects::basics::{CoordMode, PointI};
use polyline_rects::color::Rgba8;
use polyline_rects::line_context::LineContext;
use polyline_rects::poly_lines::{LineTarget, PolyLineOptions, PolyLineOutcome, PolyLines};
use polyline_rects::surface::Surface;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::PixelBuffer;

pub const BACKGROUND: Rgba8 = Rgba8::white();
const INK: Rgba8 = Rgba8::black();

/// Which drawing path to render with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawPath {
    /// Rectangle decomposition, falling back only when it must.
    Rectangles,
    /// The per-pixel reference rasterizer for every polyline.
    Reference,
}

/// Counters gathered while rendering through [`DrawPath::Rectangles`].
#[derive(Debug, Default, Clone, Copy)]
pub struct RenderStats {
    pub polylines: usize,
    pub rectangles: usize,
    pub fallbacks: usize,
}

/// List all available scene names.
pub fn available_scenes() -> &'static [&'static str] {
    &["star", "fan", "spiral", "grid", "random"]
}

/// Build the polylines of a named scene, or `None` for an unknown name.
pub fn scene_polylines(name: &str, width: u32, height: u32, seed: u64) -> Option<Vec<Vec<PointI>>> {
    let w = width as i32;
    let h = height as i32;
    let lines = match name {
        "star" => vec![star(w / 2, h / 2, (w.min(h) / 2 - 4) as f64, 17)],
        "fan" => fan(w, h),
        "spiral" => vec![spiral(w / 2, h / 2, (w.min(h) / 2 - 2) as f64)],
        "grid" => grid(w, h),
        "random" => random(w, h, seed),
        _ => return None,
    };
    Some(lines)
}

/// Render a named scene. Returns `None` if the scene name is not recognized.
pub fn render_scene(
    name: &str,
    width: u32,
    height: u32,
    seed: u64,
    path: DrawPath,
    options: PolyLineOptions,
) -> Option<(PixelBuffer, RenderStats)> {
    let polylines = scene_polylines(name, width, height, seed)?;
    let mut surface = Surface::new(width, height);
    surface.clear(BACKGROUND);
    let ctx = LineContext::new(INK);
    let driver = PolyLines::with_options(options);
    let mut stats = RenderStats::default();

    for points in &polylines {
        stats.polylines += 1;
        match path {
            DrawPath::Rectangles => {
                match driver.decompose_and_fill(&mut surface, &ctx, CoordMode::Origin, points) {
                    PolyLineOutcome::Filled { rectangles } => stats.rectangles += rectangles,
                    PolyLineOutcome::FellBack(reason) | PolyLineOutcome::Deferred(reason) => {
                        log::info!("polyline {} fell back: {reason:?}", stats.polylines);
                        stats.fallbacks += 1;
                    }
                }
            }
            DrawPath::Reference => surface.poly_line_fallback(&ctx, CoordMode::Origin, points),
        }
    }
    Some((PixelBuffer::from(&surface), stats))
}

// ============================================================================
// Scenes
// ============================================================================

fn polar(cx: i32, cy: i32, a: f64, r: f64) -> PointI {
    PointI::new(
        cx + (a.cos() * r).round() as i32,
        cy + (a.sin() * r).round() as i32,
    )
}

/// A closed star: every slope class appears on its edges.
fn star(cx: i32, cy: i32, r: f64, spikes: usize) -> Vec<PointI> {
    let n = spikes * 2;
    (0..=n)
        .map(|i| {
            let a = i as f64 * std::f64::consts::PI / spikes as f64;
            polar(cx, cy, a, if i % 2 == 0 { r } else { r * 0.38 })
        })
        .collect()
}

/// Two-point lines from each corner to points along the opposite edges.
fn fan(w: i32, h: i32) -> Vec<Vec<PointI>> {
    let mut lines = Vec::new();
    for i in (0..w).step_by(7) {
        lines.push(vec![PointI::new(0, 0), PointI::new(i, h - 1)]);
        lines.push(vec![PointI::new(w - 1, 0), PointI::new(w - 1 - i, h - 1)]);
    }
    for j in (0..h).step_by(7) {
        lines.push(vec![PointI::new(0, h - 1), PointI::new(w - 1, j)]);
    }
    lines
}

/// One long polyline winding outward, with many short diagonal segments.
fn spiral(cx: i32, cy: i32, r: f64) -> Vec<PointI> {
    let turns = 6.0;
    let steps = 400;
    (0..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            polar(cx, cy, t * turns * std::f64::consts::TAU, t * r)
        })
        .collect()
}

/// Axis-aligned staircases: no diagonal segments at all.
fn grid(w: i32, h: i32) -> Vec<Vec<PointI>> {
    (0..h)
        .step_by(16)
        .map(|y0| {
            let mut points = vec![PointI::new(0, y0)];
            let mut x = 0;
            let mut y = y0;
            while x < w {
                x += 9;
                points.push(PointI::new(x, y));
                y += 5;
                points.push(PointI::new(x, y));
            }
            points
        })
        .collect()
}

/// Seeded random polylines, some points off the surface.
fn random(w: i32, h: i32, seed: u64) -> Vec<Vec<PointI>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..64)
        .map(|_| {
            let n = rng.gen_range(2..12);
            (0..n)
                .map(|_| {
                    let x = rng.gen_range(-16..w + 16);
                    let y = rng.gen_range(-16..h + 16);
                    PointI::new(x, y)
                })
                .collect()
        })
        .collect()
}
