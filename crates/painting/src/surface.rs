//! CPU raster surface - 8-bit RGBA pixels with a cached background fill

use glam::{IVec2, Vec2};
use thiserror::Error;
use tracing::debug;

use crate::brush::{line_points, stamp_disc, uv_to_px, Brush};
use crate::codec::TextureData;
use crate::stroke::{StrokeSession, StrokeStep};
use crate::types::Rgba8;

/// Background used when a surface is drawn on before one was set
pub const DEFAULT_BACKGROUND: Rgba8 = Rgba8::WHITE;

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Surface dimensions must be positive, got {width}x{height}")]
    ZeroSize { width: u32, height: u32 },
}

/// A fixed-size paintable raster
///
/// The pixel buffer is materialized lazily: [`RasterSurface::set_background`]
/// allocates it, and any draw, clear or restore before that fills it with
/// [`DEFAULT_BACKGROUND`] first. Row 0 of the buffer is v = 0.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    /// Row-major pixels, `None` until first initialized
    pixels: Option<Vec<Rgba8>>,
    /// Clear template, rebuilt on every background change
    background_fill: Option<Vec<Rgba8>>,
    background: Rgba8,
    brush: Brush,
    stroke: StrokeSession,
}

impl RasterSurface {
    /// Create a surface of the given size. No buffer is allocated yet.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::ZeroSize { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: None,
            background_fill: None,
            background: DEFAULT_BACKGROUND,
            brush: Brush::default(),
            stroke: StrokeSession::new(),
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels the buffer holds once materialized
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn background(&self) -> Rgba8 {
        self.background
    }

    /// Fill the whole surface with `color` and remember it as the clear state
    ///
    /// Allocates the buffer on first use. An in-progress stroke keeps its
    /// position tracking; only what it already painted is wiped.
    pub fn set_background(&mut self, color: Rgba8) -> &[Rgba8] {
        self.background = color;
        let fill = vec![color; self.pixel_count()];

        match self.pixels.as_mut() {
            Some(pixels) => pixels.copy_from_slice(&fill),
            None => self.pixels = Some(fill.clone()),
        }
        self.background_fill = Some(fill);

        debug!(
            "RasterSurface::set_background({:?}) on {}x{}",
            color, self.width, self.height
        );
        self.pixels.as_deref().unwrap_or_default()
    }

    /// Restore every pixel to the last background fill
    pub fn clear(&mut self) {
        let Some(fill) = self.background_fill.as_deref() else {
            self.set_background(self.background);
            return;
        };
        if let Some(pixels) = self.pixels.as_mut() {
            pixels.copy_from_slice(fill);
        }
    }

    /// The live pixel buffer, `None` before the surface was initialized
    pub fn buffer(&self) -> Option<&[Rgba8]> {
        self.pixels.as_deref()
    }

    /// The live pixel buffer as raw RGBA8 bytes, for texture upload
    pub fn as_bytes(&self) -> Option<&[u8]> {
        self.pixels.as_deref().map(bytemuck::cast_slice)
    }

    /// Read a single pixel. `None` when out of bounds or uninitialized.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y as usize * self.width as usize + x as usize;
        self.pixels.as_ref().map(|p| p[index])
    }

    /// Overwrite the buffer from a decoded payload
    ///
    /// Returns `false` and leaves the buffer untouched when the payload's
    /// dimensions differ from the surface's. Alpha comes back fully opaque.
    pub fn set_buffer(&mut self, data: &TextureData) -> bool {
        if data.width() != self.width || data.height() != self.height {
            debug!(
                "RasterSurface::set_buffer: ignoring {}x{} payload for {}x{} surface",
                data.width(),
                data.height(),
                self.width,
                self.height
            );
            return false;
        }

        let restored = data.to_pixels();
        self.pixels_mut().copy_from_slice(&restored);
        true
    }

    pub fn brush(&self) -> Brush {
        self.brush
    }

    pub fn brush_color(&self) -> Rgba8 {
        self.brush.color
    }

    pub fn set_brush_color(&mut self, color: Rgba8) {
        self.brush.color = color;
    }

    pub fn brush_size(&self) -> i32 {
        self.brush.size()
    }

    /// Set the brush radius; clamped to [1, 128]
    pub fn set_brush_size(&mut self, size: i32) {
        self.brush.set_size(size);
    }

    /// Whether a stroke is in progress
    pub fn is_drawing(&self) -> bool {
        self.stroke.is_active()
    }

    /// UV of the active stroke's last point
    pub fn last_stroke_position(&self) -> Option<Vec2> {
        self.stroke.last_position()
    }

    /// Begin a stroke with a single dot at `uv`
    pub fn start_stroke(&mut self, uv: Vec2) {
        debug!("RasterSurface::start_stroke at ({:.3}, {:.3})", uv.x, uv.y);
        let step = self.stroke.start(uv);
        self.apply_step(step);
    }

    /// Extend the stroke to `uv`, or start one if idle
    pub fn continue_stroke(&mut self, uv: Vec2) {
        let step = self.stroke.advance(uv);
        self.apply_step(step);
    }

    /// Stamp again at the last stroke position
    ///
    /// Used while contact persists without movement. Does nothing when no
    /// stroke is active.
    pub fn try_draw_at_last_position(&mut self) {
        if let Some(uv) = self.stroke.last_position() {
            self.draw_dot(self.uv_to_px(uv));
        }
    }

    /// Finish the current stroke. Safe to call when idle.
    pub fn end_stroke(&mut self) {
        if self.stroke.is_active() {
            debug!("RasterSurface::end_stroke");
        }
        self.stroke.end();
    }

    /// Map a normalized coordinate to a clamped pixel position
    #[inline]
    pub fn uv_to_px(&self, uv: Vec2) -> IVec2 {
        uv_to_px(uv, self.width, self.height)
    }

    /// Stamp a brush disc centered on a pixel
    pub fn draw_dot(&mut self, center: IVec2) {
        let (width, height) = (self.width, self.height);
        let Brush { color, .. } = self.brush;
        let radius = self.brush.size();
        stamp_disc(self.pixels_mut(), width, height, center, radius, color);
    }

    /// Stamp brush discs along a line between two pixels
    pub fn draw_line(&mut self, start: IVec2, end: IVec2) {
        for point in line_points(start, end) {
            self.draw_dot(point);
        }
    }

    fn apply_step(&mut self, step: StrokeStep) {
        match step {
            StrokeStep::Dot(uv) => self.draw_dot(self.uv_to_px(uv)),
            StrokeStep::Line { from, to } => {
                self.draw_line(self.uv_to_px(from), self.uv_to_px(to));
            }
        }
    }

    /// Mutable buffer, initializing with the current background if needed
    fn pixels_mut(&mut self) -> &mut [Rgba8] {
        if self.pixels.is_none() {
            self.set_background(self.background);
        }
        self.pixels.get_or_insert_with(Vec::new)
    }
}
