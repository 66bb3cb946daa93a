//! Projection through a camera onto a 3D mesh

use glam::Vec2;
use tracing::debug;

use super::{Projection, ProjectionStrategy};
use crate::camera::Camera;
use crate::raycast::SceneRaycaster;
use crate::types::TargetId;

/// Paints on a mesh seen through a camera
///
/// Casts a ray from the camera through the pointer's screen position. Only the
/// first surface the ray meets counts: if something else sits in front of the
/// target, the result is a [`Projection::Miss`]. UVs are the mesh's own.
pub struct MeshProjection<S> {
    camera: Camera,
    scene: S,
    target: TargetId,
    max_distance: f32,
}

impl<S: SceneRaycaster> MeshProjection<S> {
    /// Project onto `target` with an unbounded ray
    pub fn new(camera: Camera, scene: S, target: TargetId) -> Self {
        Self {
            camera,
            scene,
            target,
            max_distance: f32::INFINITY,
        }
    }

    pub fn with_max_distance(mut self, max_distance: f32) -> Self {
        self.max_distance = max_distance;
        self
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Update the viewpoint, e.g. after the host's camera moved
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
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
}

impl<S: SceneRaycaster> ProjectionStrategy for MeshProjection<S> {
    fn project(&self, pointer: Vec2) -> Projection {
        let ray = self.camera.screen_point_to_ray(pointer);
        match self.scene.raycast(ray, self.max_distance) {
            Some(hit) if hit.target == self.target => match hit.uv {
                Some(uv) => Projection::Hit(uv),
                None => {
                    debug!("MeshProjection: target {:?} has no UVs", self.target);
                    Projection::Miss
                }
            },
            _ => Projection::Miss,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raycast::{MeshCollider, MeshScene};
    use glam::Vec3;

    const BOARD: TargetId = TargetId(1);
    const BLOCKER: TargetId = TargetId(2);

    fn camera() -> Camera {
        Camera::look_at(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::ZERO,
            Vec3::Y,
            Vec2::new(640.0, 480.0),
        )
    }

    fn board() -> MeshCollider {
        MeshCollider::quad(BOARD, Vec3::ZERO, Vec3::X * 2.0, Vec3::Y * 2.0)
    }

    #[test]
    fn test_hit_returns_mesh_uv() {
        let camera = camera();
        let projection = MeshProjection::new(camera, MeshScene::new().with(board()), BOARD);

        let screen = camera.world_to_screen_point(Vec3::new(0.5, -0.5, 0.0)).unwrap();
        let uv = projection.project(screen).uv().unwrap();
        assert!((uv - Vec2::new(0.75, 0.25)).length() < 1e-3);
    }

    #[test]
    fn test_miss_off_mesh() {
        let projection =
            MeshProjection::new(camera(), MeshScene::new().with(board()), BOARD);
        assert_eq!(projection.project(Vec2::new(2.0, 2.0)), Projection::Miss);
    }

    #[test]
    fn test_occluded_target_is_a_miss() {
        let camera = camera();
        let blocker = MeshCollider::quad(BLOCKER, Vec3::new(0.0, 0.0, 1.0), Vec3::X, Vec3::Y);
        let scene = MeshScene::new().with(board()).with(blocker);
        let projection = MeshProjection::new(camera, &scene, BOARD);

        let covered = camera.world_to_screen_point(Vec3::new(0.1, 0.1, 0.0)).unwrap();
        assert_eq!(projection.project(covered), Projection::Miss);

        let uncovered = camera.world_to_screen_point(Vec3::new(0.9, 0.9, 0.0)).unwrap();
        assert!(projection.project(uncovered).is_found());
    }

    #[test]
    fn test_miss_never_ends_stroke() {
        let projection =
            MeshProjection::new(camera(), MeshScene::new().with(board()), BOARD);
        assert!(!projection.project(Vec2::ZERO).should_end_stroke());
    }

    #[test]
    fn test_max_distance() {
        let camera = camera();
        let projection = MeshProjection::new(camera, MeshScene::new().with(board()), BOARD)
            .with_max_distance(3.0);
        let screen = camera.world_to_screen_point(Vec3::new(0.3, 0.2, 0.0)).unwrap();
        assert_eq!(projection.project(screen), Projection::Miss);
    }
}
