//! Application event loop.
//!
//! The scene is static: nothing animates, so a frame is only drawn when the
//! window asks for one or an input handler reports a visible change.
//!
//! # Lifecycle
//!
//! 1. `resumed` opens the window and builds the [`Context`] and [`Scene`]
//! 2. keyboard and mouse events mutate the [`SceneState`]
//! 3. a redraw composes the frame, uploads it and draws the opaque batches
//!    before the blended ones
//! 4. the frame is presented

use std::{iter, sync::Arc};

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use crate::{
    config::SceneConfig,
    context::Context,
    data_structures::{model::DrawModel, texture::Texture},
    pipelines::light::LightUniform,
    render::{FrameBuffers, Instanced, Source},
    scene::Scene,
    state::{Key, MouseButtonState, SceneState},
};

pub struct AppState {
    pub(crate) ctx: Context,
    scene: Scene,
    state: SceneState,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(window: Arc<Window>, config: &SceneConfig) -> anyhow::Result<Self> {
        let scene = Scene::new();
        let state = SceneState::new(config);
        let ctx = Context::new(window, config, &state, &scene.meshes).await?;
        Ok(Self {
            ctx,
            scene,
            state,
            is_surface_configured: false,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.ctx.config.width = width;
            self.ctx.config.height = height;
            self.is_surface_configured = true;
            self.ctx.projection.resize(width, height);
            self.ctx
                .surface
                .configure(&self.ctx.device, &self.ctx.config);
            self.ctx.depth_texture = Texture::create_depth_texture(
                &self.ctx.device,
                [self.ctx.config.width, self.ctx.config.height],
                "depth_texture",
            );
        }
    }

    fn update_uniforms(&mut self, config: &SceneConfig) {
        self.ctx
            .camera
            .update(&self.ctx.queue, &self.state.camera, &self.ctx.projection);
        self.ctx.light.update(
            &self.ctx.queue,
            LightUniform::new(&self.state.camera, self.state.lights, &config.fog, config.ambient),
        );
    }

    fn render(&mut self, config: &SceneConfig) -> Result<(), wgpu::CurrentSurfaceTexture> {
        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        self.update_uniforms(config);
        let frame = self.scene.frame(&self.state);

        let output = match self.ctx.surface.get_current_texture() {
            wgpu::CurrentSurfaceTexture::Success(texture)
            | wgpu::CurrentSurfaceTexture::Suboptimal(texture) => texture,
            other => return Err(other),
        };
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.ctx.render_format),
            ..Default::default()
        });

        // The water surface is rebuilt every frame; GPU validation errors from
        // its upload and draw are reported instead of aborting.
        let scope = self
            .ctx
            .device
            .push_error_scope(wgpu::ErrorFilter::Validation);
        let buffers = frame.upload(&self.ctx.device);

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });

            let mut basics: Vec<Instanced> = Vec::new();
            let mut trans: Vec<Instanced> = Vec::new();
            frame.render.set_pipelines(&mut basics, &mut trans);

            render_pass.set_pipeline(&self.ctx.pipelines.basic);
            self.draw_batch(&mut render_pass, &buffers, basics);

            render_pass.set_pipeline(&self.ctx.pipelines.transparent);
            self.draw_batch(&mut render_pass, &buffers, trans);
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        if let Some(error) = futures::executor::block_on(scope.pop()) {
            log::error!("GPU error while drawing the scene: {}", error);
        }

        output.present();
        Ok(())
    }

    fn draw_batch<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        buffers: &'a FrameBuffers,
        batch: Vec<Instanced>,
    ) {
        let Some(instance_buffer) = &buffers.instance else {
            return;
        };
        render_pass.set_vertex_buffer(1, instance_buffer.slice(..));
        for instanced in batch {
            if instanced.instances.is_empty() {
                log::warn!("you attempted to render something with zero instances");
                continue;
            }
            match instanced.source {
                Source::Mesh(handle) => match self.ctx.models.get(handle.index()) {
                    Some(model) => render_pass.draw_model_instanced(
                        model,
                        instanced.instances,
                        &self.ctx.atlas_bind_group,
                        &self.ctx.camera.bind_group,
                        &self.ctx.light.bind_group,
                    ),
                    None => log::error!("No model uploaded for mesh {:?}", handle),
                },
                Source::Immediate { indices } => {
                    if let Some((vertex, index)) = &buffers.immediate {
                        render_pass.draw_range_instanced(
                            vertex,
                            index,
                            indices,
                            instanced.instances,
                            &self.ctx.atlas_bind_group,
                            &self.ctx.camera.bind_group,
                            &self.ctx.light.bind_group,
                        );
                    }
                }
            }
        }
    }

    fn handle_key(&mut self, code: KeyCode) -> bool {
        let key = match code {
            KeyCode::ArrowUp => Key::Up,
            KeyCode::ArrowDown => Key::Down,
            KeyCode::F1 => Key::F1,
            KeyCode::F2 => Key::F2,
            KeyCode::F3 => Key::F3,
            KeyCode::F4 => Key::F4,
            KeyCode::F5 => Key::F5,
            _ => return false,
        };
        self.state.on_key(key)
    }
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    config: SceneConfig,
    state: Option<AppState>,
    // Set when startup fails inside the event loop, returned from `run`.
    init_error: Option<anyhow::Error>,
}

impl App {
    fn new(config: SceneConfig) -> anyhow::Result<Self> {
        Ok(Self {
            async_runtime: tokio::runtime::Runtime::new()?,
            config,
            state: None,
            init_error: None,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("App initialization failed: {:#}", error);
        self.init_error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        match self
            .async_runtime
            .block_on(AppState::new(window, &self.config))
        {
            Ok(app_state) => {
                app_state.ctx.window.request_redraw();
                self.state = Some(app_state);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        let changed = match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
                false
            }
            WindowEvent::Resized(size) => {
                state.resize(size.width, size.height);
                true
            }
            WindowEvent::RedrawRequested => {
                match state.render(&self.config) {
                    Ok(_) => {}
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::CurrentSurfaceTexture::Lost | wgpu::CurrentSurfaceTexture::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                        state.ctx.window.request_redraw();
                    }
                    Err(e) => {
                        log::error!("Unable to render {:?}", e);
                    }
                }
                false
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => state.handle_key(code),
            WindowEvent::MouseInput {
                state: button_state,
                button,
                ..
            } => {
                let button = match button {
                    MouseButton::Left => Some(MouseButtonState::Left),
                    MouseButton::Right => Some(MouseButtonState::Right),
                    MouseButton::Middle => Some(MouseButtonState::Middle),
                    _ => None,
                };
                if let Some(button) = button {
                    state
                        .state
                        .on_mouse_button(button, button_state.is_pressed());
                }
                false
            }
            WindowEvent::CursorMoved { position, .. } => {
                state.state.on_cursor_moved(position.x, position.y)
            }
            _ => false,
        };

        if changed {
            state.ctx.window.request_redraw();
        }
    }
}

/// Open the window with the environment's configuration and run until it is
/// closed.
pub fn run() -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };
    run_with(SceneConfig::from_env())
}

pub fn run_with(config: SceneConfig) -> anyhow::Result<()> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(config)?;

    event_loop.run_app(&mut app)?;

    match app.init_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
