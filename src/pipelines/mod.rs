//! Render pipelines for the scene.
//!
//! Both pipelines share `scene.wgsl`, which emulates a fixed-function lighting
//! model: three spotlights at the eye, colour-as-material, exponential squared
//! fog and replace-mode texturing.

pub mod basic;
pub mod light;
pub mod transparent;

#[derive(Debug)]
pub struct Pipelines {
    pub basic: wgpu::RenderPipeline,
    pub transparent: wgpu::RenderPipeline,
}

impl Pipelines {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        atlas_bind_group_layout: &wgpu::BindGroupLayout,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        light_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let layout = basic::mk_pipeline_layout(
            device,
            atlas_bind_group_layout,
            camera_bind_group_layout,
            light_bind_group_layout,
        );
        Self {
            basic: basic::mk_basic_pipeline(device, format, &layout),
            transparent: transparent::mk_transparent_pipeline(device, format, &layout),
        }
    }
}
