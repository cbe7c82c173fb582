use std::collections::HashMap;

use crate::data_structures::mesh::Mesh;

/**
 * This module contains everything that produces scene resources: procedural
 * meshes, their GPU vertex data and the texture atlas loaded from disk.
 */
pub mod mesh;
pub mod primitives;
pub mod texture;

/// Index of a mesh inside a [`MeshCache`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshHandle(usize);

impl MeshHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Identifies a generated mesh by primitive kind and resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshKey {
    Cube,
    Circle { points: u32 },
    Cylinder { points: u32, length: u32 },
    Sphere { points: u32, stacks: u32 },
    Dome { points: u32, stacks: u32 },
    TriPyramid,
    SquarePyramid,
    TriPrism,
}

impl MeshKey {
    pub fn generate(self) -> Mesh {
        match self {
            MeshKey::Cube => primitives::cube(),
            MeshKey::Circle { points } => primitives::circle(points),
            MeshKey::Cylinder { points, length } => primitives::cylinder(points, length),
            MeshKey::Sphere { points, stacks } => primitives::sphere(points, stacks),
            MeshKey::Dome { points, stacks } => primitives::dome(points, stacks),
            MeshKey::TriPyramid => primitives::tri_pyramid(),
            MeshKey::SquarePyramid => primitives::square_pyramid(),
            MeshKey::TriPrism => primitives::tri_prism(),
        }
    }
}

/// Generates every distinct mesh once and hands out shared handles.
#[derive(Debug, Default)]
pub struct MeshCache {
    meshes: Vec<Mesh>,
    handles: HashMap<MeshKey, MeshHandle>,
}

impl MeshCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&mut self, key: MeshKey) -> MeshHandle {
        if let Some(handle) = self.handles.get(&key) {
            return *handle;
        }
        let mesh = key.generate();
        log::debug!("Generated {} with {} vertices", mesh.name, mesh.vertex_count());
        self.meshes.push(mesh);
        let handle = MeshHandle(self.meshes.len() - 1);
        self.handles.insert(key, handle);
        handle
    }

    pub fn get(&self, handle: MeshHandle) -> &Mesh {
        &self.meshes[handle.0]
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Meshes in handle order.
    pub fn iter(&self) -> impl Iterator<Item = (MeshHandle, &Mesh)> {
        self.meshes
            .iter()
            .enumerate()
            .map(|(i, mesh)| (MeshHandle(i), mesh))
    }
}
