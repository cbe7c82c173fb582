#![allow(dead_code)]

use cgmath::{EuclideanSpace, Matrix4, Point3, Transform, Vector3};
use pool_scene::{
    config::SceneConfig,
    data_structures::{
        display_list::{DrawCall, DrawGeometry},
        mesh::Mesh,
    },
    resources::{MeshCache, MeshHandle, MeshKey},
    state::SceneState,
};

/// Smallest box containing every vertex of `mesh`.
pub fn bounds(mesh: &Mesh) -> (Vector3<f32>, Vector3<f32>) {
    let mut min = Vector3::new(f32::MAX, f32::MAX, f32::MAX);
    let mut max = Vector3::new(f32::MIN, f32::MIN, f32::MIN);
    for p in mesh.positions() {
        min = Vector3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
        max = Vector3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
    }
    (min, max)
}

/// Where a draw's transform puts the local origin.
pub fn origin_of(transform: Matrix4<f32>) -> Point3<f32> {
    transform.transform_point(Point3::origin())
}

pub fn mesh_draws<'a>(draws: &'a [DrawCall<'a>]) -> Vec<&'a DrawCall<'a>> {
    draws
        .iter()
        .filter(|d| matches!(d.geometry, DrawGeometry::Mesh(_)))
        .collect()
}

pub fn immediate_draws<'a>(draws: &'a [DrawCall<'a>]) -> Vec<&'a DrawCall<'a>> {
    draws
        .iter()
        .filter(|d| matches!(d.geometry, DrawGeometry::Immediate(_)))
        .collect()
}

/// A cache holding a single cube and its handle.
pub fn cube_cache() -> (MeshCache, MeshHandle) {
    let mut meshes = MeshCache::new();
    let cube = meshes.get_or_create(MeshKey::Cube);
    (meshes, cube)
}

pub fn default_state() -> SceneState {
    SceneState::new(&SceneConfig::default())
}
