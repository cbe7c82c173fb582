//! Per-draw data for GPU rendering.
//!
//! Every flattened draw becomes one [`Instance`]: its world transform plus the
//! resolved appearance. Instances are packed as [`InstanceRaw`] into a single
//! per-frame buffer so draws of the same mesh share one instanced call.

use cgmath::{Matrix, Matrix3, Matrix4, SquareMatrix};

use crate::data_structures::{
    display_list::{DrawCall, DrawGeometry},
    material::Appearance,
    model,
};

#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    pub model: Matrix4<f32>,
    pub appearance: Appearance,
    /// Textured draws take their colour from the atlas instead of the lighting.
    pub textured: bool,
}

impl Instance {
    pub fn new(model: Matrix4<f32>, appearance: Appearance, textured: bool) -> Self {
        Self {
            model,
            appearance,
            textured,
        }
    }

    /// Inverse transpose of the upper 3x3, so normals survive non-uniform scale.
    pub fn normal_matrix(&self) -> Matrix3<f32> {
        let m = self.model;
        let linear = Matrix3::from_cols(m.x.truncate(), m.y.truncate(), m.z.truncate());
        linear
            .invert()
            .map(|inverse| inverse.transpose())
            .unwrap_or_else(Matrix3::identity)
    }

    /// Opaque draws go to the basic pipeline, everything else is blended.
    pub fn is_translucent(&self) -> bool {
        !self.textured && self.appearance.is_translucent()
    }

    pub fn to_raw(&self) -> InstanceRaw {
        let material = self.appearance.material;
        InstanceRaw {
            model: self.model.into(),
            normal: self.normal_matrix().into(),
            colour: self.appearance.colour,
            material: [
                material.specular,
                material.shininess,
                material.emission,
                if self.textured { 1.0 } else { 0.0 },
            ],
        }
    }
}

impl From<&DrawCall<'_>> for Instance {
    fn from(draw: &DrawCall<'_>) -> Self {
        let textured = match draw.geometry {
            DrawGeometry::Mesh(_) => false,
            DrawGeometry::Immediate(primitive) => primitive.is_textured(),
        };
        Instance::new(draw.transform, draw.appearance, textured)
    }
}

/**
 * The raw instance is the actual data stored on the GPU
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 3]; 3],
    pub colour: [f32; 4],
    /// specular, shininess, emission, textured flag
    pub material: [f32; 4],
}

/**
 * Stride layout: model matrix as four vec4s, normal matrix as three vec3s,
 * then the colour and the packed material terms.
 */
impl model::Vertex for InstanceRaw {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
            // Advance once per instance instead of once per vertex
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 5,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 6,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 7,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 12]>() as wgpu::BufferAddress,
                    shader_location: 8,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 16]>() as wgpu::BufferAddress,
                    shader_location: 9,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 19]>() as wgpu::BufferAddress,
                    shader_location: 10,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 22]>() as wgpu::BufferAddress,
                    shader_location: 11,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 25]>() as wgpu::BufferAddress,
                    shader_location: 12,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 29]>() as wgpu::BufferAddress,
                    shader_location: 13,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}
