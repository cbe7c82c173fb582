//! Startup configuration.
//!
//! [`SceneConfig::default`] reproduces the scene as designed; the only value
//! that can be overridden at runtime is the texture atlas file, through the
//! `POOL_SCENE_TEXTURE` environment variable.

use cgmath::Point3;

/// Environment variable naming an alternative atlas bitmap under `assets/`.
pub const TEXTURE_ENV: &str = "POOL_SCENE_TEXTURE";

/// Exponential squared fog: `f = exp(-(density * distance)^2)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fog {
    pub colour: [f32; 3],
    pub density: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Atlas bitmap, resolved relative to `./assets/`.
    pub texture_file: String,
    pub clear_colour: wgpu::Color,
    pub fog: Fog,
    /// Global ambient light intensity.
    pub ambient: f32,
    /// Pixels of mouse drag per radian of camera rotation.
    pub mouse_sensitivity: f32,
    pub viewer: Point3<f32>,
    pub look_at: Point3<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            title: "Pool Scene".to_string(),
            width: 750,
            height: 750,
            texture_file: "combined-texture.bmp".to_string(),
            clear_colour: wgpu::Color {
                r: 0.2,
                g: 0.5,
                b: 0.2,
                a: 1.0,
            },
            fog: Fog {
                colour: [0.6, 0.6, 0.9],
                density: 0.005,
            },
            ambient: 0.1,
            mouse_sensitivity: 20.0,
            viewer: Point3::new(50.0, 50.0, 150.0),
            look_at: Point3::new(0.0, 0.0, 0.0),
            znear: 1.5,
            zfar: 1000.0,
        }
    }
}

impl SceneConfig {
    /// Defaults with any environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_texture_override(std::env::var(TEXTURE_ENV).ok())
    }

    /// Replace the atlas file when `file` names a non-empty path.
    pub fn with_texture_override(mut self, file: Option<String>) -> Self {
        if let Some(file) = file.filter(|f| !f.trim().is_empty()) {
            log::info!("Using texture atlas {file} from {TEXTURE_ENV}");
            self.texture_file = file;
        }
        self
    }
}
