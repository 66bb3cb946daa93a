//! Complete painting pipeline
//!
//! This module connects:
//! - Host input (pointer down / move / up, or one tracked sample per tick)
//! - A projection strategy (pointer -> surface UV)
//! - The raster surface (stroke state and pixels)
//!
//! The host owns the input loop and display; it calls into the pipeline once
//! per relevant input event and reads the surface whenever it redraws.

use glam::Vec2;
use tracing::debug;

use crate::projection::{Projection, ProjectionStrategy};
use crate::surface::RasterSurface;

/// A surface paired with the strategy that aims at it
pub struct PaintingPipeline {
    surface: RasterSurface,
    projection: Box<dyn ProjectionStrategy>,
}

impl PaintingPipeline {
    pub fn new(surface: RasterSurface, projection: impl ProjectionStrategy + 'static) -> Self {
        Self {
            surface,
            projection: Box::new(projection),
        }
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut RasterSurface {
        &mut self.surface
    }

    pub fn into_surface(self) -> RasterSurface {
        self.surface
    }

    /// Swap the projection, e.g. once hand tracking becomes available
    ///
    /// Any stroke in progress is ended.
    pub fn set_projection(&mut self, projection: impl ProjectionStrategy + 'static) {
        self.surface.end_stroke();
        self.projection = Box::new(projection);
    }

    /// Project a pointer sample without drawing
    pub fn project(&self, pointer: Vec2) -> Projection {
        self.projection.project(pointer)
    }

    /// Pointer went down
    pub fn start_draw(&mut self, pointer: Vec2) {
        match self.projection.project(pointer) {
            Projection::Hit(uv) => self.surface.start_stroke(uv),
            Projection::Miss => {}
            Projection::ContactLost => self.surface.end_stroke(),
        }
    }

    /// Pointer moved while down
    ///
    /// Starts a stroke if none is active, so hosts that only report "pressed"
    /// samples still draw.
    pub fn continue_draw(&mut self, pointer: Vec2) {
        if !self.surface.is_drawing() {
            self.start_draw(pointer);
            return;
        }

        match self.projection.project(pointer) {
            Projection::Hit(uv) => self.surface.continue_stroke(uv),
            Projection::Miss => {}
            Projection::ContactLost => {
                debug!("PaintingPipeline: contact lost, ending stroke");
                self.surface.end_stroke();
            }
        }
    }

    /// One sample from a strategy that tracks its own pointer
    ///
    /// Intended for fingertip tracking, called once per tick while tracking is
    /// live.
    pub fn try_draw(&mut self) {
        self.continue_draw(Vec2::ZERO);
    }

    /// Pointer released
    pub fn end_draw(&mut self) {
        self.surface.end_stroke();
    }

    pub fn is_drawing(&self) -> bool {
        self.surface.is_drawing()
    }
}
