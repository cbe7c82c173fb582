//! Window and GPU context: surface, device, uniforms, pipelines and the
//! meshes uploaded at startup.

use std::sync::Arc;

use anyhow::Context as _;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::{
    camera::{CameraResources, CameraUniform, Projection},
    config::SceneConfig,
    data_structures::{model::Model, texture},
    pipelines::{
        Pipelines,
        light::{LightResources, LightUniform},
    },
    resources::{self, MeshCache},
    state::SceneState,
};

#[derive(Debug)]
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub(crate) depth_texture: texture::Texture,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    /// Format of the view the frame is drawn into. Never sRGB.
    pub render_format: wgpu::TextureFormat,
    pub clear_colour: wgpu::Color,
    pub camera: CameraResources,
    pub projection: Projection,
    pub light: LightResources,
    pub atlas: texture::Texture,
    pub atlas_bind_group: wgpu::BindGroup,
    pub pipelines: Pipelines,
    /// One uploaded model per cached mesh, indexed by mesh handle.
    pub models: Vec<Model>,
}

impl Context {
    pub async fn new(
        window: Arc<Window>,
        scene_config: &SceneConfig,
        state: &SceneState,
        meshes: &MeshCache,
    ) -> anyhow::Result<Self> {
        let size = window.inner_size();

        log::info!("WGPU setup");
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..wgpu::InstanceDescriptor::new_without_display_handle()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("Cannot create a surface for the window")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("No graphics adapter is compatible with the window surface")?;
        log::info!("Using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
                ..Default::default()
            })
            .await
            .context("Cannot open the graphics device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let (surface_format, render_format) = choose_surface_format(&surface_caps.formats)
            .context("The surface reports no texture formats")?;
        log::info!("Surface format {:?}, rendering as {:?}", surface_format, render_format);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: if render_format == surface_format {
                vec![]
            } else {
                vec![render_format]
            },
            desired_maximum_frame_latency: 2,
        };

        let projection = Projection::new(
            config.width,
            config.height,
            scene_config.znear,
            scene_config.zfar,
        );

        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update_view_proj(&state.camera, &projection);

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group_layout =
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
                label: Some("camera_bind_group_layout"),
            });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        let camera = CameraResources {
            uniform: camera_uniform,
            buffer: camera_buffer,
            bind_group: camera_bind_group,
            bind_group_layout: camera_bind_group_layout,
        };

        let depth_texture = texture::Texture::create_depth_texture(
            &device,
            [config.width, config.height],
            "depth_texture",
        );

        let light = LightResources::new(
            LightUniform::new(
                &state.camera,
                state.lights,
                &scene_config.fog,
                scene_config.ambient,
            ),
            &device,
        );

        let atlas_layout = resources::texture::atlas_layout(&device);
        let atlas =
            resources::texture::load_atlas(&scene_config.texture_file, &device, &queue).await;
        let atlas_sampler = texture::create_default_sampler(&device);
        let atlas_bind_group = atlas.bind_group(&device, &atlas_layout, &atlas_sampler);

        let pipelines = Pipelines::new(
            &device,
            render_format,
            &atlas_layout,
            &camera.bind_group_layout,
            &light.bind_group_layout,
        );

        let models: Vec<Model> = meshes
            .iter()
            .map(|(_, mesh)| resources::mesh::load_mesh(mesh, &device))
            .collect();
        log::info!("Uploaded {} meshes", models.len());

        Ok(Self {
            window,
            depth_texture,
            surface,
            device,
            queue,
            config,
            render_format,
            clear_colour: scene_config.clear_colour,
            camera,
            projection,
            light,
            atlas,
            atlas_bind_group,
            pipelines,
            models,
        })
    }
}

/// Pick the surface format and the format frames are rendered in.
///
/// Colours reach the framebuffer exactly as the shader writes them, so the
/// render format never applies an sRGB encoding. A surface that only offers
/// sRGB formats is configured as such and viewed through its linear twin.
pub fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
) -> Option<(wgpu::TextureFormat, wgpu::TextureFormat)> {
    let surface = formats
        .iter()
        .copied()
        .find(|f| !f.is_srgb())
        .or_else(|| formats.first().copied())?;
    Some((surface, surface.remove_srgb_suffix()))
}
