//! Brush state and rasterization primitives
//!
//! The primitives here are deliberately simple: a hard-edged disc stamp and a
//! line made of evenly spaced stamps. No anti-aliasing, no blending; a stamp
//! overwrites every pixel it covers, so overdraw along slow strokes is
//! harmless.

use glam::{IVec2, Vec2};

use crate::constants::{DEFAULT_BRUSH_SIZE, MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};
use crate::types::Rgba8;

/// Current brush settings for a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brush {
    /// Paint color for future stamps
    pub color: Rgba8,
    /// Radius in pixels, always within [MIN_BRUSH_SIZE, MAX_BRUSH_SIZE]
    size: i32,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            color: Rgba8::BLACK,
            size: DEFAULT_BRUSH_SIZE,
        }
    }
}

impl Brush {
    /// Create a brush, clamping the radius into range
    pub fn new(color: Rgba8, size: i32) -> Self {
        Self {
            color,
            size: clamp_brush_size(size),
        }
    }

    /// Brush radius in pixels
    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Set the brush radius. Out-of-range values are clamped, never rejected.
    pub fn set_size(&mut self, size: i32) {
        self.size = clamp_brush_size(size);
    }
}

/// Clamp a requested brush radius into [MIN_BRUSH_SIZE, MAX_BRUSH_SIZE]
#[inline]
pub fn clamp_brush_size(size: i32) -> i32 {
    size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE)
}

/// Round half to even, the rounding existing saved drawings were produced with
#[inline]
fn round_to_int(value: f32) -> i32 {
    value.round_ties_even() as i32
}

/// Map a normalized coordinate onto a pixel of a `width` x `height` grid
///
/// `px = round(u * (width - 1))`, clamped to the grid; same for v. Inputs
/// outside [0, 1] land on the nearest edge.
pub fn uv_to_px(uv: Vec2, width: u32, height: u32) -> IVec2 {
    let max_x = width.saturating_sub(1) as i32;
    let max_y = height.saturating_sub(1) as i32;
    IVec2::new(
        round_to_int(uv.x * max_x as f32).clamp(0, max_x),
        round_to_int(uv.y * max_y as f32).clamp(0, max_y),
    )
}

/// Points stamped along a line from `start` to `end`
///
/// Yields `ceil(distance) + 1` evenly spaced points including both ends, so
/// consecutive points are never more than one pixel apart.
pub fn line_points(start: IVec2, end: IVec2) -> impl Iterator<Item = IVec2> {
    let a = start.as_vec2();
    let b = end.as_vec2();
    let steps = a.distance(b).ceil() as i32;

    (0..=steps).map(move |i| {
        let t = if steps == 0 {
            0.0
        } else {
            i as f32 / steps as f32
        };
        let p = a.lerp(b, t);
        IVec2::new(round_to_int(p.x), round_to_int(p.y))
    })
}

/// Stamp a filled disc into a row-major pixel grid
///
/// A pixel is covered when `dx*dx + dy*dy <= radius*radius`. The loop bounds
/// are clipped to the grid so centers near or past an edge are fine.
pub fn stamp_disc(
    pixels: &mut [Rgba8],
    width: u32,
    height: u32,
    center: IVec2,
    radius: i32,
    color: Rgba8,
) {
    if width == 0 || height == 0 {
        return;
    }
    debug_assert_eq!(pixels.len(), width as usize * height as usize);

    let r2 = radius * radius;
    let x0 = (center.x - radius).max(0);
    let x1 = (center.x + radius).min(width as i32 - 1);
    let y0 = (center.y - radius).max(0);
    let y1 = (center.y + radius).min(height as i32 - 1);

    for y in y0..=y1 {
        let dy = y - center.y;
        let row = y as usize * width as usize;
        for x in x0..=x1 {
            let dx = x - center.x;
            if dx * dx + dy * dy <= r2 {
                pixels[row + x as usize] = color;
            }
        }
    }
}
