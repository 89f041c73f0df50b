//! CPU mirrors of the shader's uniform blocks and vertex layout.

use asset::mesh::MeshVertex;
use bytemuck::{Pod, Zeroable};
use corelib::light::PointLight;
use glam::Mat4;
use wgpu::{VertexBufferLayout, VertexStepMode};

/// Vertex as laid out in the GPU buffer: position, normal, uv.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl GpuVertex {
    // Shader locations: 0 = position, 1 = uv, 2 = normal.
    pub const LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
        array_stride: std::mem::size_of::<GpuVertex>() as u64,
        step_mode: VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![0 => Float32x3, 2 => Float32x3, 1 => Float32x2],
    };
}

impl From<&MeshVertex> for GpuVertex {
    fn from(v: &MeshVertex) -> Self {
        Self {
            position: v.position,
            normal: v.normal,
            uv: v.uv,
        }
    }
}

/// Per-frame block (group 0).
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct FrameUniform {
    pub view: [[f32; 4]; 4],
    /// xyz = world position, w = power.
    pub light_position: [f32; 4],
    /// rgb = colour, w = 1.0 when lighting is enabled.
    pub light_color: [f32; 4],
}

impl FrameUniform {
    pub fn new(view: Mat4, light: &PointLight) -> Self {
        let p = light.position;
        let c = light.color;
        Self {
            view: view.to_cols_array_2d(),
            light_position: [p.x, p.y, p.z, light.power],
            light_color: [c.x, c.y, c.z, if light.enabled { 1.0 } else { 0.0 }],
        }
    }
}

/// Per-object block (group 1).
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ObjectUniform {
    pub mvp: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
}

impl ObjectUniform {
    pub fn new(proj_view: Mat4, model: Mat4) -> Self {
        Self {
            mvp: (proj_view * model).to_cols_array_2d(),
            model: model.to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};

    #[test]
    fn uniform_blocks_are_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<FrameUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 128);
        assert_eq!(std::mem::size_of::<GpuVertex>(), 32);
    }

    #[test]
    fn mvp_applies_model_first() {
        let pv = Mat4::from_scale(Vec3::splat(2.0));
        let model = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let u = ObjectUniform::new(pv, model);
        let mvp = Mat4::from_cols_array_2d(&u.mvp);
        let p = mvp * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(p, Vec4::new(2.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn disabled_light_is_flagged() {
        let mut light = PointLight::default();
        light.enabled = false;
        let u = FrameUniform::new(Mat4::IDENTITY, &light);
        assert_eq!(u.light_color[3], 0.0);
        assert_eq!(u.light_position, [0.0, 25.0, 0.0, PointLight::DEFAULT_POWER]);
    }
}
