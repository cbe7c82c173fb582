use cgmath::{InnerSpace, Vector3, Zero};
use wgpu::util::DeviceExt;

use crate::data_structures::{
    mesh::{Mesh, Primitive},
    model,
};

/**
 * The generated primitives carry positions only, so normals are derived from the
 * faces: every triangle adds its face normal to its three corners and the sums
 * are normalised afterwards. Degenerate triangles (the strip closures) add nothing.
 *
 * Vertices and indices are appended so several primitives can share one buffer;
 * returned indices are relative to the start of `vertices`.
 */
pub fn append_primitive(
    primitive: &Primitive,
    vertices: &mut Vec<model::ModelVertex>,
    indices: &mut Vec<u32>,
) {
    let base = vertices.len() as u32;
    let local = primitive.triangle_indices();

    let mut normals = vec![Vector3::<f32>::zero(); primitive.vertex_count()];
    for c in local.chunks(3) {
        let pos0 = primitive.positions[c[0] as usize];
        let pos1 = primitive.positions[c[1] as usize];
        let pos2 = primitive.positions[c[2] as usize];

        let face = (pos1 - pos0).cross(pos2 - pos0);
        if face.magnitude2() <= f32::EPSILON * f32::EPSILON {
            continue;
        }
        let face = face.normalize();
        normals[c[0] as usize] += face;
        normals[c[1] as usize] += face;
        normals[c[2] as usize] += face;
    }

    vertices.extend(primitive.positions.iter().enumerate().map(|(i, position)| {
        let normal = if normals[i].magnitude2() > 0.0 {
            normals[i].normalize()
        } else {
            Vector3::unit_z()
        };
        model::ModelVertex {
            position: (*position).into(),
            tex_coords: primitive
                .tex_coords
                .as_ref()
                .map_or([0.0, 0.0], |coords| coords[i]),
            normal: normal.into(),
        }
    }));
    indices.extend(local.into_iter().map(|i| base + i));
}

/// Vertex and index data for a whole mesh.
pub fn mesh_vertices(mesh: &Mesh) -> (Vec<model::ModelVertex>, Vec<u32>) {
    let mut vertices = Vec::with_capacity(mesh.vertex_count());
    let mut indices = Vec::new();
    for primitive in &mesh.primitives {
        append_primitive(primitive, &mut vertices, &mut indices);
    }
    (vertices, indices)
}

pub fn load_mesh(mesh: &Mesh, device: &wgpu::Device) -> model::Model {
    let (vertices, indices) = mesh_vertices(mesh);

    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{} Vertex Buffer", mesh.name)),
        contents: bytemuck::cast_slice(&vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{} Index Buffer", mesh.name)),
        contents: bytemuck::cast_slice(&indices),
        usage: wgpu::BufferUsages::INDEX,
    });

    model::Model {
        name: mesh.name.clone(),
        vertex_buffer,
        index_buffer,
        num_elements: indices.len() as u32,
    }
}
