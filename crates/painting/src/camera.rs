//! Perspective viewpoint used to turn screen positions into world rays

use glam::{Mat3, Quat, Vec2, Vec3};

use crate::raycast::Ray;

/// Default vertical field of view (60 degrees)
pub const DEFAULT_FOV_Y: f32 = std::f32::consts::FRAC_PI_3;

/// A pinhole camera looking down its local -Z axis
///
/// Screen positions are in pixels with the origin at the bottom-left corner of
/// the viewport and y pointing up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Quat,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Viewport size in pixels
    pub viewport: Vec2,
}

impl Camera {
    pub fn new(position: Vec3, rotation: Quat, fov_y: f32, viewport: Vec2) -> Self {
        Self {
            position,
            rotation,
            fov_y,
            viewport,
        }
    }

    /// Camera at `eye` facing `target`
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3, viewport: Vec2) -> Self {
        let forward = (target - eye).normalize_or(Vec3::NEG_Z);
        let right = forward.cross(up).normalize_or(Vec3::X);
        let up = right.cross(forward);
        let rotation = Quat::from_mat3(&Mat3::from_cols(right, up, -forward));
        Self::new(eye, rotation, DEFAULT_FOV_Y, viewport)
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    #[inline]
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    fn aspect(&self) -> f32 {
        if self.viewport.y > 0.0 {
            self.viewport.x / self.viewport.y
        } else {
            1.0
        }
    }

    /// Ray from the camera through a screen position
    pub fn screen_point_to_ray(&self, screen: Vec2) -> Ray {
        let ndc = screen / self.viewport.max(Vec2::ONE) * 2.0 - Vec2::ONE;
        let half_height = (self.fov_y * 0.5).tan();
        let half_width = half_height * self.aspect();

        let direction = self.forward()
            + self.right() * (ndc.x * half_width)
            + self.up() * (ndc.y * half_height);
        Ray::new(self.position, direction)
    }

    /// Screen position of a world point, `None` if it is behind the camera
    pub fn world_to_screen_point(&self, world: Vec3) -> Option<Vec2> {
        let local = self.rotation.inverse() * (world - self.position);
        let depth = -local.z;
        if depth <= f32::EPSILON {
            return None;
        }

        let half_height = (self.fov_y * 0.5).tan();
        let half_width = half_height * self.aspect();
        let ndc = Vec2::new(
            local.x / (depth * half_width),
            local.y / (depth * half_height),
        );
        Some((ndc + Vec2::ONE) * 0.5 * self.viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::look_at(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::ZERO,
            Vec3::Y,
            Vec2::new(800.0, 600.0),
        )
    }

    #[test]
    fn test_center_ray_points_forward() {
        let camera = camera();
        let ray = camera.screen_point_to_ray(Vec2::new(400.0, 300.0));
        assert!((ray.origin - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_screen_y_points_up() {
        let camera = camera();
        let top = camera.screen_point_to_ray(Vec2::new(400.0, 600.0));
        let right = camera.screen_point_to_ray(Vec2::new(800.0, 300.0));
        assert!(top.direction.y > 0.0);
        assert!(right.direction.x > 0.0);
    }

    #[test]
    fn test_world_to_screen_roundtrip() {
        let camera = camera();
        let world = Vec3::new(0.7, -0.4, 0.0);
        let screen = camera.world_to_screen_point(world).unwrap();

        let ray = camera.screen_point_to_ray(screen);
        // Intersect with z = 0
        let t = -ray.origin.z / ray.direction.z;
        assert!((ray.at(t) - world).length() < 1e-3);
    }

    #[test]
    fn test_point_behind_camera() {
        let camera = camera();
        assert!(camera.world_to_screen_point(Vec3::new(0.0, 0.0, 10.0)).is_none());
    }
}
