use wgpu::util::DeviceExt;

use crate::{camera::Camera, config::Fog};

/// Red, green and blue spotlight colours, used for all three light terms.
pub const SPOT_COLOURS: [[f32; 3]; 3] = [[1.0, 0.4, 0.4], [0.2, 1.0, 0.2], [0.2, 0.2, 1.0]];
pub const SPOT_CUTOFF_DEGREES: f32 = 90.0;
pub const SPOT_EXPONENT: f32 = 1.0;

#[derive(Debug)]
pub struct LightResources {
    pub uniform: LightUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl LightResources {
    pub fn new(uniform: LightUniform, device: &wgpu::Device) -> Self {
        let buffer = mk_buffer(device, uniform);
        let bind_group_layout = mk_bind_group_layout(device);
        let bind_group = mk_bind_group(device, &bind_group_layout, &buffer);
        Self {
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    pub fn update(&mut self, queue: &wgpu::Queue, uniform: LightUniform) {
        self.uniform = uniform;
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}

/// Three spotlights mounted at the viewer, plus fog and global ambient.
///
/// The `w` component of each colour is 1.0 when that light is switched on.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub position: [f32; 3],
    pub spot_exponent: f32,
    pub direction: [f32; 3],
    pub spot_cos_cutoff: f32,
    pub colours: [[f32; 4]; 3],
    pub fog_colour: [f32; 3],
    pub fog_density: f32,
    pub ambient: [f32; 3],
    // Uniforms are sized in multiples of 16 bytes
    pub _padding: u32,
}

impl LightUniform {
    pub fn new(camera: &Camera, enabled: [bool; 3], fog: &Fog, ambient: f32) -> Self {
        let mut colours = [[0.0; 4]; 3];
        for (i, colour) in colours.iter_mut().enumerate() {
            let [r, g, b] = SPOT_COLOURS[i];
            *colour = [r, g, b, if enabled[i] { 1.0 } else { 0.0 }];
        }
        Self {
            position: camera.viewer().into(),
            spot_exponent: SPOT_EXPONENT,
            direction: camera.direction().into(),
            spot_cos_cutoff: SPOT_CUTOFF_DEGREES.to_radians().cos(),
            colours,
            fog_colour: fog.colour,
            fog_density: fog.density,
            ambient: [ambient; 3],
            _padding: 0,
        }
    }

    pub fn is_enabled(&self, light: usize) -> bool {
        self.colours[light][3] > 0.5
    }
}

pub fn mk_buffer(device: &wgpu::Device, light_uniform: LightUniform) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Light Buffer"),
        contents: bytemuck::cast_slice(&[light_uniform]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("light_bind_group_layout"),
    })
}

pub fn mk_bind_group(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    light_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout: bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: light_buffer.as_entire_binding(),
        }],
        label: Some("light_bind_group"),
    })
}
