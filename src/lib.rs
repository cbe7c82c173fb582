//! pool-scene
//!
//! An interactive, static 3D pool hall rendered with wgpu. Every object is
//! built from a handful of procedurally generated meshes, composed into
//! display lists with a scoped transform stack, and drawn with a shader that
//! mimics a classic fixed-function pipeline: spotlights, fog and replace-mode
//! textures.
//!
//! High-level modules
//! - `camera`: viewer/look-at camera, projection and its uniform
//! - `config`: startup configuration and environment overrides
//! - `context`: window and GPU context that owns device/queue/pipelines
//! - `data_structures`: meshes, display lists, instances, materials, textures
//! - `flow`: the event loop
//! - `pipelines`: the opaque and blended render pipelines and the light uniform
//! - `render`: frame batching for the pipelines
//! - `resources`: primitive mesh generation, mesh cache and GPU uploads
//! - `scene`: compound objects, the hall layout and the water surface
//! - `state`: interactive state and input handlers

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;
pub mod state;
