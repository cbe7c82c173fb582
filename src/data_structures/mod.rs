//! Scene data structures: geometry, display lists, materials and GPU data.
//!
//! - `mesh` holds CPU-side geometry: primitives with a topology and meshes built from them
//! - `display_list` records transform/geometry/paint steps and flattens them into draws
//! - `material` describes colours, materials and their inheritance through lists
//! - `instance` packs a flattened draw into per-instance GPU data
//! - `model` contains the GPU vertex format and uploaded mesh buffers
//! - `texture` contains the GPU texture wrapper and creation utilities

pub mod display_list;
pub mod instance;
pub mod material;
pub mod mesh;
pub mod model;
pub mod texture;
