//! Drawing-in-progress state machine

use glam::Vec2;

/// What a stroke transition wants rasterized
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeStep {
    /// A single stamp at a UV position (stroke start)
    Dot(Vec2),
    /// An interpolated run of stamps between two UV positions
    Line { from: Vec2, to: Vec2 },
}

/// Tracks whether a stroke is in progress and where it last was
///
/// The session never touches pixels itself; each transition returns the
/// [`StrokeStep`] the owning surface should draw.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrokeSession {
    active: bool,
    last_uv: Vec2,
}

impl StrokeSession {
    /// Create an idle session
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a stroke is in progress
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Last UV position of the active stroke
    pub fn last_position(&self) -> Option<Vec2> {
        self.active.then_some(self.last_uv)
    }

    /// Begin a stroke at `uv`, discarding any stroke in progress
    pub fn start(&mut self, uv: Vec2) -> StrokeStep {
        self.active = true;
        self.last_uv = uv;
        StrokeStep::Dot(uv)
    }

    /// Extend the stroke to `uv`
    ///
    /// An idle session treats this as [`StrokeSession::start`].
    pub fn advance(&mut self, uv: Vec2) -> StrokeStep {
        if !self.active {
            return self.start(uv);
        }
        let from = self.last_uv;
        self.last_uv = uv;
        StrokeStep::Line { from, to: uv }
    }

    /// Finish the stroke. Safe to call when idle.
    pub fn end(&mut self) {
        self.active = false;
    }
}
