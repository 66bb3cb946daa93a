//! Pointer-to-surface projection strategies
//!
//! A strategy maps a pointer position to a normalized texture coordinate on
//! the paint target:
//! - [`CanvasProjection`] - flat UI region, pointer in screen pixels
//! - [`MeshProjection`] - camera ray into a 3D scene, pointer in screen pixels
//! - [`FingertipProjection`] - ray along a tracked pose, pointer ignored
//!
//! Any `Fn(Vec2) -> Projection` closure is a strategy too, which keeps test
//! doubles and one-off hosts cheap.

mod canvas;
mod fingertip;
mod mesh;

pub use canvas::{CanvasProjection, ScreenOrigin, ScreenRect, UiHit, UiHitTester, UiLayout, UiRegion};
pub use fingertip::{FingertipProjection, Pose, PoseHandle};
pub use mesh::MeshProjection;

use glam::Vec2;

/// Outcome of projecting one pointer sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// The pointer is over the target at this UV
    Hit(Vec2),
    /// The pointer is not over the target; the caller decides what that means
    Miss,
    /// The pointer left the target and the stroke must end
    ///
    /// Emitted by strategies whose input has no release event, where leaving
    /// the target is the only way a stroke can finish.
    ContactLost,
}

impl Projection {
    /// UV of a hit
    pub fn uv(&self) -> Option<Vec2> {
        match self {
            Self::Hit(uv) => Some(*uv),
            Self::Miss | Self::ContactLost => None,
        }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Hit(_))
    }

    #[inline]
    pub fn should_end_stroke(&self) -> bool {
        matches!(self, Self::ContactLost)
    }
}

/// Maps a pointer position to a surface coordinate
pub trait ProjectionStrategy {
    fn project(&self, pointer: Vec2) -> Projection;
}

impl<F> ProjectionStrategy for F
where
    F: Fn(Vec2) -> Projection,
{
    fn project(&self, pointer: Vec2) -> Projection {
        self(pointer)
    }
}

/// Inverse linear interpolation clamped to [0, 1]; 0 for an empty range
pub(crate) fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}
