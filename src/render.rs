//! Artboard rasterization
//!
//! Fills closed polygons into an RGBA canvas covering a page region. Shapes
//! use the even-odd rule and are painted in order with source-over blending.
//! Anti-aliasing is a fixed 4x4 supersample per pixel.

use image::{Rgba, RgbaImage};

use crate::geometry::{Bounds, Point};
use crate::host::{HostError, PngExportOptions};

/// Samples per pixel axis when anti-aliasing is on.
const AA_SAMPLES: u32 = 4;

/// Largest canvas rendered, in pixels (1 GiB of RGBA).
pub const MAX_CANVAS_PIXELS: u64 = 1 << 28;

/// A filled polygon to paint.
#[derive(Debug, Clone, Copy)]
pub struct Shape<'a> {
    pub points: &'a [Point],
    pub color: Rgba<u8>,
}

/// Pixel dimensions of `region` at the export scale.
///
/// Partial pixels round up; every canvas is at least 1x1. Canvases over
/// [`MAX_CANVAS_PIXELS`] are refused.
pub fn canvas_size(region: &Bounds, options: &PngExportOptions) -> Result<(u32, u32), HostError> {
    let w = (region.width() * options.horizontal_scale / 100.0).ceil().max(1.0);
    let h = (region.height() * options.vertical_scale / 100.0).ceil().max(1.0);

    if !(w.is_finite() && h.is_finite()) || w * h > MAX_CANVAS_PIXELS as f64 {
        return Err(HostError::CanvasTooLarge { width: w, height: h });
    }
    Ok((w as u32, h as u32))
}

/// Even-odd point-in-polygon test.
fn contains(points: &[Point], x: f64, y: f64) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (pi, pj) = (points[i], points[j]);
        if (pi.y > y) != (pj.y > y) {
            let cross_x = pi.x + (y - pi.y) * (pj.x - pi.x) / (pj.y - pi.y);
            if x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Blend `src` at `coverage` over `dst` (straight alpha).
fn blend_over(dst: &mut Rgba<u8>, src: Rgba<u8>, coverage: f32) {
    let sa = src[3] as f32 / 255.0 * coverage;
    if sa <= 0.0 {
        return;
    }
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    for c in 0..3 {
        let sc = src[c] as f32;
        let dc = dst[c] as f32;
        let value = (sc * sa + dc * da * (1.0 - sa)) / out_a;
        dst[c] = value.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}

/// Rasterize `shapes` over the page `region`.
///
/// The canvas origin is the region's top-left corner; pixel rows grow
/// downward while page y grows upward.
pub fn rasterize(
    region: &Bounds,
    shapes: &[Shape<'_>],
    options: &PngExportOptions,
) -> Result<RgbaImage, HostError> {
    let (width, height) = canvas_size(region, options)?;
    let background = if options.transparency { Rgba([0, 0, 0, 0]) } else { Rgba([255, 255, 255, 255]) };
    let mut canvas = RgbaImage::from_pixel(width, height, background);

    let sx = options.horizontal_scale / 100.0;
    let sy = options.vertical_scale / 100.0;
    let samples = if options.anti_aliasing { AA_SAMPLES } else { 1 };
    let total_samples = (samples * samples) as f32;

    for shape in shapes {
        if shape.points.len() < 3 {
            continue;
        }
        let Some(bounds) = Bounds::from_points(shape.points) else {
            continue;
        };

        // Pixel window touched by this shape, clipped to the canvas.
        let x0 = (((bounds.left - region.left) * sx).floor().max(0.0)) as u32;
        let x1 = (((bounds.right - region.left) * sx).ceil().min(width as f64)).max(0.0) as u32;
        let y0 = (((region.top - bounds.top) * sy).floor().max(0.0)) as u32;
        let y1 = (((region.top - bounds.bottom) * sy).ceil().min(height as f64)).max(0.0) as u32;

        for py in y0..y1 {
            for px in x0..x1 {
                let mut hits = 0u32;
                for j in 0..samples {
                    let y = region.top - (py as f64 + (j as f64 + 0.5) / samples as f64) / sy;
                    for i in 0..samples {
                        let x = region.left + (px as f64 + (i as f64 + 0.5) / samples as f64) / sx;
                        if contains(shape.points, x, y) {
                            hits += 1;
                        }
                    }
                }
                if hits > 0 {
                    blend_over(canvas.get_pixel_mut(px, py), shape.color, hits as f32 / total_samples);
                }
            }
        }
    }

    Ok(canvas)
}
