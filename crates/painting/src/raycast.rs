//! Ray-mesh intersection for pointer projection.
//!
//! This module provides ray-triangle intersection using the Moller-Trumbore algorithm,
//! triangle-mesh colliders that carry texture coordinates, and a small scene type the
//! mesh projections cast against.

use glam::{Vec2, Vec3};

use crate::types::TargetId;

/// Epsilon for floating point comparisons in ray intersection
const EPSILON: f32 = 1e-6;

/// A half-line in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing `direction`
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Result of a ray-triangle intersection test
#[derive(Debug, Clone, Copy)]
pub struct TriangleHit {
    /// Distance along the ray to the intersection point
    pub t: f32,
    /// Barycentric coordinate u (weight for vertex 1)
    pub u: f32,
    /// Barycentric coordinate v (weight for vertex 2)
    pub v: f32,
}

/// Moller-Trumbore ray-triangle intersection algorithm.
///
/// Returns the hit distance and barycentric coordinates if the ray intersects
/// the triangle. Both faces count as hits.
///
/// # Arguments
/// * `ray_origin` - Origin point of the ray
/// * `ray_dir` - Direction of the ray (should be normalized for consistent t values)
/// * `v0`, `v1`, `v2` - Triangle vertices
pub fn ray_triangle_intersection(
    ray_origin: Vec3,
    ray_dir: Vec3,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
) -> Option<TriangleHit> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let pvec = ray_dir.cross(edge2);
    let det = edge1.dot(pvec);

    // Ray lies in the triangle's plane or misses
    if det.abs() < EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let tvec = ray_origin - v0;

    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(edge1);

    let v = ray_dir.dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(qvec) * inv_det;

    // Only accept hits in front of the ray
    if t < EPSILON {
        return None;
    }

    Some(TriangleHit { t, u, v })
}

/// Interpolate a Vec2 attribute (like UVs) using barycentric coordinates.
pub fn interpolate_vec2(v0: Vec2, v1: Vec2, v2: Vec2, u: f32, v: f32) -> Vec2 {
    let w = 1.0 - u - v;
    v0 * w + v1 * u + v2 * v
}

/// A hit against one collider of a scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneHit {
    /// Which collider was hit
    pub target: TargetId,
    /// Distance along the ray
    pub distance: f32,
    /// World-space hit position
    pub point: Vec3,
    /// Interpolated texture coordinate, `None` if the mesh has no UVs
    pub uv: Option<Vec2>,
}

/// Something the mesh projections can cast rays into
///
/// A host with its own physics engine implements this over that engine's
/// raycasts; [`MeshScene`] is the built-in brute-force implementation.
pub trait SceneRaycaster {
    /// Every collider the ray hits within `max_distance`, nearest first,
    /// one hit per collider
    fn raycast_all(&self, ray: Ray, max_distance: f32) -> Vec<SceneHit>;

    /// The nearest hit within `max_distance`
    fn raycast(&self, ray: Ray, max_distance: f32) -> Option<SceneHit> {
        self.raycast_all(ray, max_distance).into_iter().next()
    }
}

impl<T: SceneRaycaster + ?Sized> SceneRaycaster for &T {
    fn raycast_all(&self, ray: Ray, max_distance: f32) -> Vec<SceneHit> {
        (**self).raycast_all(ray, max_distance)
    }

    fn raycast(&self, ray: Ray, max_distance: f32) -> Option<SceneHit> {
        (**self).raycast(ray, max_distance)
    }
}

/// World-space triangle mesh with optional per-vertex UVs
#[derive(Debug, Clone)]
pub struct MeshCollider {
    pub id: TargetId,
    /// Vertex positions
    pub positions: Vec<Vec3>,
    /// Triangle indices (3 per triangle)
    pub indices: Vec<u32>,
    /// Vertex UVs (same length as positions, or empty if no UVs)
    pub uvs: Vec<Vec2>,
}

impl MeshCollider {
    pub fn new(id: TargetId, positions: Vec<Vec3>, indices: Vec<u32>, uvs: Vec<Vec2>) -> Self {
        Self {
            id,
            positions,
            indices,
            uvs,
        }
    }

    /// A rectangle centered on `center`, spanned by the full-length `right`
    /// and `up` edge vectors
    ///
    /// UV (0, 0) sits at the `-right -up` corner and (1, 1) at `+right +up`.
    pub fn quad(id: TargetId, center: Vec3, right: Vec3, up: Vec3) -> Self {
        let (hr, hu) = (right * 0.5, up * 0.5);
        let positions = vec![
            center - hr - hu,
            center + hr - hu,
            center + hr + hu,
            center - hr + hu,
        ];
        let uvs = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        Self::new(id, positions, vec![0, 1, 2, 0, 2, 3], uvs)
    }

    /// Get the number of triangles in the mesh
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the vertex indices for a triangle
    pub fn triangle_indices(&self, tri_index: usize) -> (usize, usize, usize) {
        let base = tri_index * 3;
        (
            self.indices[base] as usize,
            self.indices[base + 1] as usize,
            self.indices[base + 2] as usize,
        )
    }

    /// Cast a ray against the mesh and return the closest hit.
    ///
    /// Triangles referencing out-of-range vertices are skipped.
    pub fn raycast(&self, ray: Ray, max_distance: f32) -> Option<SceneHit> {
        let mut closest: Option<(TriangleHit, usize)> = None;

        // Brute force over all triangles
        for tri_idx in 0..self.triangle_count() {
            let (i0, i1, i2) = self.triangle_indices(tri_idx);
            let (Some(&v0), Some(&v1), Some(&v2)) = (
                self.positions.get(i0),
                self.positions.get(i1),
                self.positions.get(i2),
            ) else {
                continue;
            };

            if let Some(hit) = ray_triangle_intersection(ray.origin, ray.direction, v0, v1, v2) {
                if hit.t > max_distance {
                    continue;
                }
                let dominated = matches!(&closest, Some((prev, _)) if hit.t >= prev.t);
                if !dominated {
                    closest = Some((hit, tri_idx));
                }
            }
        }

        closest.map(|(hit, tri_idx)| {
            let (i0, i1, i2) = self.triangle_indices(tri_idx);
            let uv = match (self.uvs.get(i0), self.uvs.get(i1), self.uvs.get(i2)) {
                (Some(&uv0), Some(&uv1), Some(&uv2)) => {
                    Some(interpolate_vec2(uv0, uv1, uv2, hit.u, hit.v))
                }
                _ => None,
            };
            SceneHit {
                target: self.id,
                distance: hit.t,
                point: ray.at(hit.t),
                uv,
            }
        })
    }
}

/// A collection of colliders, tested brute force
#[derive(Debug, Clone, Default)]
pub struct MeshScene {
    colliders: Vec<MeshCollider>,
}

impl MeshScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, collider: MeshCollider) {
        self.colliders.push(collider);
    }

    /// Builder-style [`MeshScene::add`]
    pub fn with(mut self, collider: MeshCollider) -> Self {
        self.add(collider);
        self
    }

    /// Remove every collider with the given id
    pub fn remove(&mut self, id: TargetId) {
        self.colliders.retain(|c| c.id != id);
    }

    pub fn colliders(&self) -> &[MeshCollider] {
        &self.colliders
    }
}

impl SceneRaycaster for MeshScene {
    fn raycast_all(&self, ray: Ray, max_distance: f32) -> Vec<SceneHit> {
        let mut hits: Vec<SceneHit> = self
            .colliders
            .iter()
            .filter_map(|c| c.raycast(ray, max_distance))
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}
