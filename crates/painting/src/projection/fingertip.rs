//! Projection along a tracked fingertip

use std::cell::Cell;
use std::rc::Rc;

use glam::{Vec2, Vec3};
use tracing::debug;

use super::{Projection, ProjectionStrategy};
use crate::raycast::{Ray, SceneRaycaster};
use crate::types::TargetId;

/// Position and pointing direction of a tracked body part
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    /// Unit forward direction
    pub forward: Vec3,
}

impl Pose {
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self {
            position,
            forward: forward.normalize_or_zero(),
        }
    }
}

/// Shared, updatable pose slot
///
/// The host keeps one clone and writes the latest tracked pose every tick; the
/// projection reads it when asked. Empty until tracking is acquired.
#[derive(Debug, Clone, Default)]
pub struct PoseHandle(Rc<Cell<Option<Pose>>>);

impl PoseHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, pose: Pose) {
        self.0.set(Some(pose));
    }

    /// Mark tracking as lost
    pub fn clear(&self) {
        self.0.set(None);
    }

    pub fn get(&self) -> Option<Pose> {
        self.0.get()
    }
}

/// Paints where a tracked fingertip touches a mesh
///
/// The ray starts `offset` behind the fingertip (a negative offset moves it
/// ahead) and runs `max_distance` along the pose's forward direction. Every
/// hit along that segment is considered, so other geometry in front of the
/// target does not block it. Tracking has no "button up", so leaving the
/// target reports [`Projection::ContactLost`] and ends the stroke.
///
/// The pointer argument of [`ProjectionStrategy::project`] is ignored.
pub struct FingertipProjection<S> {
    pose: PoseHandle,
    scene: S,
    target: TargetId,
    max_distance: f32,
    offset: f32,
}

impl<S: SceneRaycaster> FingertipProjection<S> {
    pub fn new(pose: PoseHandle, scene: S, target: TargetId, max_distance: f32, offset: f32) -> Self {
        Self {
            pose,
            scene,
            target,
            max_distance,
            offset,
        }
    }

    pub fn pose(&self) -> &PoseHandle {
        &self.pose
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn target(&self) -> TargetId {
        self.target
    }

    /// Ray cast for a pose
    pub fn ray_for(&self, pose: Pose) -> Ray {
        Ray::new(pose.position - pose.forward * self.offset, pose.forward)
    }
}

impl<S: SceneRaycaster> ProjectionStrategy for FingertipProjection<S> {
    fn project(&self, _pointer: Vec2) -> Projection {
        let Some(pose) = self.pose.get() else {
            return Projection::ContactLost;
        };

        let hit = self
            .scene
            .raycast_all(self.ray_for(pose), self.max_distance)
            .into_iter()
            .find(|hit| hit.target == self.target);

        match hit.and_then(|h| h.uv) {
            Some(uv) => Projection::Hit(uv),
            None => {
                debug!("FingertipProjection: target {:?} not touched", self.target);
                Projection::ContactLost
            }
        }
    }
}
