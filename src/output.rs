//! # Output Module
//!
//! Rasterizes a traced scene into an 8-bit RGB image and writes it as PNG.
//!
//! Drawing order follows what an interactive view would show:
//! - prism outlines (white, the selected prism yellow)
//! - the light source as a grey disc with a short direction hint
//! - every traced path, the source-to-first-hit leg in white and the rest in
//!   the ray's spectral color

use std::path::Path;

use glam::{DVec2, Vec2};
use image::{ImageResult, Rgb, RgbImage};
use log::info;

use crate::scene::{Scene, Selection};
use crate::tracer::TracedRay;

/// Radius of the source marker in pixels.
pub const SOURCE_RADIUS: f32 = 8.0;
/// Length of the source direction hint.
pub const DIRECTION_HINT_LENGTH: f32 = 50.0;

const BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);
const OUTLINE: Rgb<u8> = Rgb([255, 255, 255]);
const HIGHLIGHT: Rgb<u8> = Rgb([255, 255, 0]);
const SOURCE_FILL: Rgb<u8> = Rgb([200, 200, 200]);
const DIRECTION_HINT: Rgb<u8> = Rgb([100, 100, 100]);
const FIRST_LEG: Rgb<u8> = Rgb([255, 255, 255]);

/// Draw `scene` and its traced `rays` into a `width`×`height` image.
///
/// Scene units map one-to-one onto pixels; anything outside is clipped.
pub fn render_scene(
    scene: &Scene,
    rays: &[TracedRay],
    selection: Selection,
    width: u32,
    height: u32,
) -> RgbImage {
    let mut image = RgbImage::from_pixel(width, height, BACKGROUND);

    for (i, prism) in scene.prisms.iter().enumerate() {
        let color = if selection == Selection::Prism(i) {
            HIGHLIGHT
        } else {
            OUTLINE
        };
        let vertices = prism.vertices();
        for (k, &p1) in vertices.iter().enumerate() {
            let p2 = vertices[(k + 1) % vertices.len()];
            draw_line(&mut image, p1, p2, color);
        }
    }

    let source_color = if selection == Selection::Light {
        HIGHLIGHT
    } else {
        SOURCE_FILL
    };
    fill_circle(&mut image, scene.source.pos, SOURCE_RADIUS, source_color);
    let hint_end = scene.source.pos + scene.source.direction() * DIRECTION_HINT_LENGTH;
    draw_line(&mut image, scene.source.pos, hint_end, DIRECTION_HINT);

    for ray in rays {
        for (i, leg) in ray.points.windows(2).enumerate() {
            let color = if i == 0 { FIRST_LEG } else { ray.color };
            draw_line(&mut image, leg[0], leg[1], color);
        }
    }

    image
}

/// Save an 8-bit RGB image as PNG.
pub fn save_image_as_png(image: &RgbImage, output_path: impl AsRef<Path>) -> ImageResult<()> {
    let output_path = output_path.as_ref();
    image.save(output_path)?;
    info!("Image saved as {}", output_path.display());
    Ok(())
}

/// Draws a line between two points using Bresenham's algorithm, clipped to the image.
///
/// The segment is cut to the canvas first, so the work is bounded by the
/// image size however far the endpoints lie outside it.
pub fn draw_line(image: &mut RgbImage, from: Vec2, to: Vec2, color: Rgb<u8>) {
    let canvas_min = DVec2::splat(-1.0);
    let canvas_max = DVec2::new(image.width() as f64, image.height() as f64);
    let Some((from, to)) = clip_segment(from.as_dvec2(), to.as_dvec2(), canvas_min, canvas_max)
    else {
        return;
    };
    let (mut x0, mut y0, x1, y1) = (
        from.x.round() as i64,
        from.y.round() as i64,
        to.x.round() as i64,
        to.y.round() as i64,
    );
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        put_pixel(image, x0, y0, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Liang-Barsky clip of the segment `from`-`to` against the box `min`..`max`.
///
/// Returns `None` when the segment misses the box entirely.
fn clip_segment(from: DVec2, to: DVec2, min: DVec2, max: DVec2) -> Option<(DVec2, DVec2)> {
    let d = to - from;
    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    let boundaries = [
        (-d.x, from.x - min.x),
        (d.x, max.x - from.x),
        (-d.y, from.y - min.y),
        (d.y, max.y - from.y),
    ];
    for (p, q) in boundaries {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((from + d * t0, from + d * t1))
}

fn fill_circle(image: &mut RgbImage, center: Vec2, radius: f32, color: Rgb<u8>) {
    let r = radius.ceil() as i64;
    let (cx, cy) = (center.x.round() as i64, center.y.round() as i64);
    for y in -r..=r {
        for x in -r..=r {
            if ((x * x + y * y) as f32) <= radius * radius {
                put_pixel(image, cx + x, cy + y, color);
            }
        }
    }
}

fn put_pixel(image: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && x < image.width() as i64 && y < image.height() as i64 {
        image.put_pixel(x as u32, y as u32, color);
    }
}
