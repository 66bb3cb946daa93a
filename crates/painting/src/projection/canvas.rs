//! Projection onto a flat UI region

use glam::Vec2;

use super::{inverse_lerp, Projection, ProjectionStrategy};
use crate::types::TargetId;

/// Axis-aligned rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl ScreenRect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin, origin + size)
    }

    /// Inclusive containment test
    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Normalized position of `point` within the rect, clamped to [0, 1]
    pub fn normalize(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            inverse_lerp(self.min.x, self.max.x, point.x),
            inverse_lerp(self.min.y, self.max.y, point.y),
        )
    }
}

/// Where screen y = 0 is
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ScreenOrigin {
    /// y grows upward from the bottom edge
    #[default]
    BottomLeft,
    /// y grows downward from the top edge of a viewport this tall
    TopLeft { viewport_height: f32 },
}

impl ScreenOrigin {
    /// Convert a pointer position to bottom-left screen coordinates
    fn to_bottom_left(self, point: Vec2) -> Vec2 {
        match self {
            Self::BottomLeft => point,
            Self::TopLeft { viewport_height } => Vec2::new(point.x, viewport_height - point.y),
        }
    }
}

/// A UI element under the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiHit {
    pub target: TargetId,
    /// Element bounds in bottom-left screen coordinates
    pub rect: ScreenRect,
}

/// Reports every UI element under a screen point
///
/// Hosts with a UI toolkit implement this over the toolkit's own hit testing.
pub trait UiHitTester {
    /// All elements containing `point` (bottom-left screen coordinates), topmost first
    fn hit_all(&self, point: Vec2) -> Vec<UiHit>;
}

impl<T: UiHitTester + ?Sized> UiHitTester for &T {
    fn hit_all(&self, point: Vec2) -> Vec<UiHit> {
        (**self).hit_all(point)
    }
}

/// A rectangular UI element that can receive pointer hits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiRegion {
    pub id: TargetId,
    pub rect: ScreenRect,
}

/// Flat list of regions; later regions draw on top of earlier ones
#[derive(Debug, Clone, Default)]
pub struct UiLayout {
    regions: Vec<UiRegion>,
}

impl UiLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: TargetId, rect: ScreenRect) {
        self.regions.push(UiRegion { id, rect });
    }

    /// Builder-style [`UiLayout::push`]
    pub fn with(mut self, id: TargetId, rect: ScreenRect) -> Self {
        self.push(id, rect);
        self
    }

    /// Move or resize a region. Unknown ids are ignored.
    pub fn set_rect(&mut self, id: TargetId, rect: ScreenRect) {
        for region in self.regions.iter_mut().filter(|r| r.id == id) {
            region.rect = rect;
        }
    }

    pub fn regions(&self) -> &[UiRegion] {
        &self.regions
    }
}

impl UiHitTester for UiLayout {
    fn hit_all(&self, point: Vec2) -> Vec<UiHit> {
        self.regions
            .iter()
            .rev()
            .filter(|r| r.rect.contains(point))
            .map(|r| UiHit {
                target: r.id,
                rect: r.rect,
            })
            .collect()
    }
}

/// Paints on a UI region showing the surface
///
/// The region may be partly covered by other elements; as long as the pointer
/// is over the target at all, it counts. UV (0, 0) is the bottom-left corner
/// of the region.
pub struct CanvasProjection<U> {
    target: TargetId,
    ui: U,
    origin: ScreenOrigin,
}

impl<U: UiHitTester> CanvasProjection<U> {
    pub fn new(target: TargetId, ui: U) -> Self {
        Self {
            target,
            ui,
            origin: ScreenOrigin::default(),
        }
    }

    /// Interpret pointer positions with a different screen origin
    pub fn with_origin(mut self, origin: ScreenOrigin) -> Self {
        self.origin = origin;
        self
    }

    pub fn target(&self) -> TargetId {
        self.target
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }
}

impl<U: UiHitTester> ProjectionStrategy for CanvasProjection<U> {
    fn project(&self, pointer: Vec2) -> Projection {
        let point = self.origin.to_bottom_left(pointer);
        self.ui
            .hit_all(point)
            .into_iter()
            .find(|hit| hit.target == self.target)
            .map_or(Projection::Miss, |hit| Projection::Hit(hit.rect.normalize(point)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: TargetId = TargetId(7);
    const BUTTON: TargetId = TargetId(8);

    fn layout() -> UiLayout {
        UiLayout::new()
            .with(
                CANVAS,
                ScreenRect::from_origin_size(Vec2::new(100.0, 50.0), Vec2::new(200.0, 100.0)),
            )
            // A button overlapping the canvas' top-right corner
            .with(
                BUTTON,
                ScreenRect::from_origin_size(Vec2::new(280.0, 130.0), Vec2::new(40.0, 40.0)),
            )
    }

    #[test]
    fn test_rect_normalize() {
        let rect = ScreenRect::new(Vec2::new(10.0, 10.0), Vec2::new(30.0, 50.0));
        assert_eq!(rect.normalize(Vec2::new(20.0, 20.0)), Vec2::new(0.5, 0.25));
        assert_eq!(rect.normalize(Vec2::new(0.0, 90.0)), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_rect_new_orders_corners() {
        let rect = ScreenRect::new(Vec2::new(5.0, 9.0), Vec2::new(1.0, 2.0));
        assert_eq!(rect.min, Vec2::new(1.0, 2.0));
        assert_eq!(rect.max, Vec2::new(5.0, 9.0));
    }

    #[test]
    fn test_hit_inside_target() {
        let projection = CanvasProjection::new(CANVAS, layout());
        assert_eq!(
            projection.project(Vec2::new(150.0, 75.0)),
            Projection::Hit(Vec2::new(0.25, 0.25))
        );
        assert_eq!(
            projection.project(Vec2::new(100.0, 50.0)),
            Projection::Hit(Vec2::ZERO)
        );
    }

    #[test]
    fn test_miss_outside_target() {
        let projection = CanvasProjection::new(CANVAS, layout());
        assert_eq!(projection.project(Vec2::new(10.0, 10.0)), Projection::Miss);
        // Over the button only
        assert_eq!(projection.project(Vec2::new(310.0, 160.0)), Projection::Miss);
    }

    #[test]
    fn test_overlapped_target_still_hits() {
        let projection = CanvasProjection::new(CANVAS, layout());
        let hits = projection.ui().hit_all(Vec2::new(290.0, 140.0));
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].target, BUTTON);

        let uv = projection.project(Vec2::new(290.0, 140.0)).uv().unwrap();
        assert!((uv - Vec2::new(0.95, 0.9)).length() < 1e-5);
    }

    #[test]
    fn test_top_left_origin_flips_y() {
        let projection = CanvasProjection::new(CANVAS, layout())
            .with_origin(ScreenOrigin::TopLeft { viewport_height: 600.0 });
        // y = 525 from the top is y = 75 from the bottom
        assert_eq!(
            projection.project(Vec2::new(150.0, 525.0)),
            Projection::Hit(Vec2::new(0.25, 0.25))
        );
    }

    #[test]
    fn test_moving_the_region() {
        let mut projection = CanvasProjection::new(CANVAS, layout());
        projection.ui_mut().set_rect(
            CANVAS,
            ScreenRect::from_origin_size(Vec2::ZERO, Vec2::new(10.0, 10.0)),
        );
        assert_eq!(
            projection.project(Vec2::new(5.0, 5.0)),
            Projection::Hit(Vec2::new(0.5, 0.5))
        );
        assert_eq!(projection.project(Vec2::new(150.0, 75.0)), Projection::Miss);
    }
}
