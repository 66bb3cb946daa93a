//! Demo rigs: one painting target per projection mode, plus a scripted stroke

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use texpaint_config::PaintConfig;
use texpaint_painting::{
    Camera, CanvasProjection, FingertipProjection, MeshCollider, MeshProjection, MeshScene,
    PaintingPipeline, Pose, PoseHandle, RasterSurface, Rgba8, ScreenOrigin, ScreenRect, TargetId,
    UiLayout,
};
use tracing::{debug, warn};

use crate::config::ProjectionMode;

/// The surface's on-screen canvas or in-world board
pub const PAINT_TARGET: TargetId = TargetId(1);
/// A toolbar overlapping the canvas
pub const TOOLBAR: TargetId = TargetId(2);

/// Margin around the canvas region in the demo window
const CANVAS_MARGIN: f32 = 40.0;
const MESH_VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

/// Drives a pipeline with samples expressed as target UVs
pub enum Rig {
    Canvas { rect: ScreenRect, viewport_height: f32 },
    Mesh { camera: Camera },
    Fingertip { pose: PoseHandle, hover: f32, offset: f32 },
}

/// Surface configured from settings, background applied
pub fn build_surface(config: &PaintConfig) -> anyhow::Result<RasterSurface> {
    let mut surface = RasterSurface::new(config.width, config.height)?;
    surface.set_background(Rgba8::from(config.background));
    surface.set_brush_color(Rgba8::from(config.brush_color));
    surface.set_brush_size(config.brush_size);
    Ok(surface)
}

/// Board quad of unit size centered at the origin, facing +Z
fn board() -> MeshScene {
    MeshScene::new().with(MeshCollider::quad(PAINT_TARGET, Vec3::ZERO, Vec3::X, Vec3::Y))
}

/// World position of a UV on the board
fn board_point(uv: Vec2) -> Vec3 {
    Vec3::new(uv.x - 0.5, uv.y - 0.5, 0.0)
}

pub fn build(mode: ProjectionMode, config: &PaintConfig) -> anyhow::Result<(PaintingPipeline, Rig)> {
    let surface = build_surface(config)?;

    let built = match mode {
        ProjectionMode::Canvas => {
            let size = Vec2::new(config.width as f32, config.height as f32);
            let rect = ScreenRect::from_origin_size(Vec2::splat(CANVAS_MARGIN), size);
            let viewport_height = size.y + CANVAS_MARGIN * 2.0;
            let layout = UiLayout::new().with(PAINT_TARGET, rect).with(
                TOOLBAR,
                ScreenRect::from_origin_size(Vec2::new(0.0, size.y), Vec2::new(size.x, 60.0)),
            );
            let projection = CanvasProjection::new(PAINT_TARGET, layout)
                .with_origin(ScreenOrigin::TopLeft { viewport_height });
            (
                PaintingPipeline::new(surface, projection),
                Rig::Canvas { rect, viewport_height },
            )
        }
        ProjectionMode::Mesh => {
            let camera = Camera::look_at(Vec3::new(0.0, 0.0, 1.5), Vec3::ZERO, Vec3::Y, MESH_VIEWPORT);
            let projection = MeshProjection::new(camera, board(), PAINT_TARGET);
            (PaintingPipeline::new(surface, projection), Rig::Mesh { camera })
        }
        ProjectionMode::Fingertip => {
            let pose = PoseHandle::new();
            let fingertip = config.fingertip;
            let projection = FingertipProjection::new(
                pose.clone(),
                board(),
                PAINT_TARGET,
                fingertip.ray_distance,
                fingertip.ray_offset,
            );
            (
                PaintingPipeline::new(surface, projection),
                Rig::Fingertip {
                    pose,
                    hover: fingertip.ray_distance * 0.5,
                    offset: fingertip.ray_offset,
                },
            )
        }
    };

    debug!("Built {:?} pipeline", mode);
    Ok(built)
}

/// A wave across the middle of the surface
pub fn scripted_stroke(samples: usize) -> Vec<Vec2> {
    let last = samples.max(2) - 1;
    (0..=last)
        .map(|i| {
            let t = i as f32 / last as f32;
            Vec2::new(0.1 + 0.8 * t, 0.5 + 0.25 * (t * TAU).sin())
        })
        .collect()
}

impl Rig {
    /// Pointer position that lands on `uv`
    fn pointer(&self, uv: Vec2) -> Option<Vec2> {
        match self {
            Self::Canvas { rect, viewport_height } => {
                let bottom_left = rect.min + uv * (rect.max - rect.min);
                Some(Vec2::new(bottom_left.x, viewport_height - bottom_left.y))
            }
            Self::Mesh { camera } => camera.world_to_screen_point(board_point(uv)),
            Self::Fingertip { .. } => Some(Vec2::ZERO),
        }
    }

    /// Fingertip pose whose ray starts `hover` in front of the board at `uv`
    fn pose_for(&self, uv: Vec2) -> Option<Pose> {
        match self {
            Self::Fingertip { hover, offset, .. } => {
                let position = board_point(uv) + Vec3::Z * (hover - offset);
                Some(Pose::new(position, Vec3::NEG_Z))
            }
            _ => None,
        }
    }

    /// Feed one stroke through the pipeline
    pub fn replay(&self, pipeline: &mut PaintingPipeline, uvs: &[Vec2]) {
        match self {
            Self::Fingertip { pose, .. } => {
                for uv in uvs {
                    if let Some(p) = self.pose_for(*uv) {
                        pose.set(p);
                    }
                    pipeline.try_draw();
                }
                // Tracking lost ends the stroke without a release
                pose.clear();
                pipeline.try_draw();
            }
            _ => {
                let mut pointers = uvs.iter().filter_map(|uv| {
                    let pointer = self.pointer(*uv);
                    if pointer.is_none() {
                        warn!("No screen position for uv {:?}", uv);
                    }
                    pointer
                });
                if let Some(first) = pointers.next() {
                    pipeline.start_draw(first);
                }
                for pointer in pointers {
                    pipeline.continue_draw(pointer);
                }
                pipeline.end_draw();
            }
        }
    }
}
