//! CPU-side tessellation of scene primitives.
//!
//! Primitives are projected through the variant's camera and emitted as
//! billboarded NDC quads (thick segment quads for line paths). The fragment
//! shader carves the silhouette out of each quad via a shape mask, so the
//! vertex stream stays small and uniform across primitive kinds.

use glam::{EulerRot, Mat4, Vec3, Vec4};

use crate::engine::{PrimitiveKind, StageGroup};
use crate::scenes::CameraPose;

/// Vertex data for rendering.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub local_pos: [f32; 2],
    pub color: [f32; 4],
    /// Shape mask selector: 0 = disc, 1 = square, 2 = ring.
    pub shape: f32,
    pub _padding: f32,
}

/// Mask selector values understood by the fragment shader.
const SHAPE_DISC: f32 = 0.0;
const SHAPE_SQUARE: f32 = 1.0;
const SHAPE_RING: f32 = 2.0;

/// Upper bound on the vertex count `tessellate` can produce for a group.
/// Used to size the renderer's vertex buffer once per mount.
pub fn vertex_capacity(group: &StageGroup) -> usize {
    group
        .primitives
        .iter()
        .map(|prim| match &prim.kind {
            PrimitiveKind::LinePath(points) => points.len().saturating_sub(1) * 6,
            _ => 6,
        })
        .sum()
}

/// Project every primitive in the group into NDC vertices.
pub fn tessellate(group: &StageGroup, camera: &CameraPose, aspect: f32) -> Vec<Vertex> {
    let projector = Projector::new(group, camera, aspect);
    let mut vertices = Vec::with_capacity(vertex_capacity(group));

    for prim in &group.primitives {
        let color = [prim.color[0], prim.color[1], prim.color[2], prim.opacity];
        match &prim.kind {
            PrimitiveKind::LinePath(points) => {
                let half_width = prim.size.x.max(0.01);
                let projected: Vec<_> =
                    points.iter().filter_map(|p| projector.project(*p)).collect();
                for pair in projected.windows(2) {
                    push_segment(&mut vertices, pair[0], pair[1], half_width, color);
                }
            }
            kind => {
                if let Some(projected) = projector.project(prim.position) {
                    let shape = match kind {
                        PrimitiveKind::Sphere => SHAPE_DISC,
                        PrimitiveKind::Torus | PrimitiveKind::TorusKnot => SHAPE_RING,
                        _ => SHAPE_SQUARE,
                    };
                    push_quad(&mut vertices, projected, prim.size, shape, color);
                }
            }
        }
    }

    vertices
}

/// A primitive center after projection: NDC position plus the NDC footprint
/// of one world unit at its depth.
#[derive(Debug, Clone, Copy)]
struct Projected {
    ndc: [f32; 2],
    unit_x: f32,
    unit_y: f32,
}

struct Projector {
    view_proj: Mat4,
    proj_scale: (f32, f32),
    group_model: Mat4,
}

impl Projector {
    fn new(group: &StageGroup, camera: &CameraPose, aspect: f32) -> Self {
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
        let projection = Mat4::perspective_rh(
            camera.fov_degrees.to_radians(),
            aspect,
            camera.near,
            camera.far,
        );
        let view = Mat4::look_at_rh(camera.position, Vec3::ZERO, Vec3::Y);
        let rot = group.rotation;
        Self {
            view_proj: projection * view,
            proj_scale: (projection.x_axis.x, projection.y_axis.y),
            group_model: Mat4::from_euler(EulerRot::XYZ, rot.x, rot.y, rot.z),
        }
    }

    /// Project a world point; `None` when it lands behind the camera.
    fn project(&self, point: Vec3) -> Option<Projected> {
        let world = self.group_model * Vec4::from((point, 1.0));
        let clip = self.view_proj * world;
        if clip.w <= f32::EPSILON {
            return None;
        }
        let inv_w = 1.0 / clip.w;
        Some(Projected {
            ndc: [clip.x * inv_w, clip.y * inv_w],
            unit_x: self.proj_scale.0 * inv_w,
            unit_y: self.proj_scale.1 * inv_w,
        })
    }
}

fn push_quad(
    vertices: &mut Vec<Vertex>,
    center: Projected,
    size: Vec3,
    shape: f32,
    color: [f32; 4],
) {
    let half_x = size.x * 0.5 * center.unit_x;
    let half_y = size.y * 0.5 * center.unit_y;

    let positions = [
        [center.ndc[0] - half_x, center.ndc[1] + half_y], // top-left
        [center.ndc[0] + half_x, center.ndc[1] + half_y], // top-right
        [center.ndc[0] - half_x, center.ndc[1] - half_y], // bottom-left
        [center.ndc[0] + half_x, center.ndc[1] - half_y], // bottom-right
    ];
    let local_positions = [[-1.0, -1.0], [1.0, -1.0], [-1.0, 1.0], [1.0, 1.0]];
    let indices = [0, 2, 1, 1, 2, 3]; // Two triangles

    for &idx in &indices {
        vertices.push(Vertex {
            position: positions[idx],
            local_pos: local_positions[idx],
            color,
            shape,
            _padding: 0.0,
        });
    }
}

/// Push a projected line segment as a thick quad.
fn push_segment(
    vertices: &mut Vec<Vertex>,
    a: Projected,
    b: Projected,
    half_width: f32,
    color: [f32; 4],
) {
    let dx = b.ndc[0] - a.ndc[0];
    let dy = b.ndc[1] - a.ndc[1];
    let len = (dx * dx + dy * dy).sqrt().max(1e-4);

    // Perpendicular in NDC, thickness scaled by the nearer endpoint.
    let unit = a.unit_y.max(b.unit_y);
    let nx = -dy / len * half_width * unit;
    let ny = dx / len * half_width * unit;

    let positions = [
        [a.ndc[0] + nx, a.ndc[1] + ny],
        [a.ndc[0] - nx, a.ndc[1] - ny],
        [b.ndc[0] + nx, b.ndc[1] + ny],
        [b.ndc[0] - nx, b.ndc[1] - ny],
    ];
    let local_positions = [[-1.0, -1.0], [-1.0, 1.0], [1.0, -1.0], [1.0, 1.0]];
    let indices = [0, 1, 2, 2, 1, 3];

    for &idx in &indices {
        vertices.push(Vertex {
            position: positions[idx],
            local_pos: local_positions[idx],
            color,
            shape: SHAPE_SQUARE,
            _padding: 0.0,
        });
    }
}
