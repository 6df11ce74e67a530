//! WGSL sources and the uniform/instance layouts they expect.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

pub const POINTS_SOURCE: &str = include_str!("shaders/points.wgsl");
pub const QUADS_SOURCE: &str = include_str!("shaders/quads.wgsl");

/// Uniforms for the galaxy point sprite pipeline.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct PointUniforms {
    pub view_proj: [[f32; 4]; 4],
    /// `(height / width, 1.0)`, keeps sprites square on screen.
    pub aspect_scale: [f32; 2],
    pub point_size: f32,
    pub _padding: f32,
}

impl PointUniforms {
    pub fn new(view_proj: Mat4, width: u32, height: u32, point_size: f32) -> Self {
        let aspect = height.max(1) as f32 / width.max(1) as f32;
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            aspect_scale: [aspect, 1.0],
            point_size,
            _padding: 0.0,
        }
    }
}

/// Uniforms for the flat quad pipeline.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct QuadUniforms {
    pub view_proj: [[f32; 4]; 4],
}

/// One axis-aligned rectangle in the XY plane.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct QuadInstance {
    pub center: [f32; 3],
    pub half_extent: [f32; 2],
    pub color: [f32; 4],
}

impl QuadInstance {
    /// A `width` × `height` rectangle centered on `center`.
    pub fn new(center: Vec3, width: f32, height: f32, color: [f32; 4]) -> Self {
        Self {
            center: center.to_array(),
            half_extent: [width * 0.5, height * 0.5],
            color,
        }
    }

    pub const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2, 2 => Float32x4];
}
