//! CPU-side mesh geometry.
//!
//! A [`Mesh`] is an ordered list of [`Primitive`]s, each of which is a run of
//! vertex positions interpreted through a [`Topology`]. Meshes are generated
//! once by [`crate::resources::primitives`] and never mutated afterwards; per
//! frame geometry (tiles, water) is recorded as immediate primitives instead.

use cgmath::Vector3;

/// How a primitive's vertex run is assembled into faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    /// Independent quads, four vertices each.
    Quads,
    /// Independent triangles, three vertices each.
    Triangles,
    /// A triangle strip: every vertex after the second closes a triangle.
    TriangleStrip,
    /// A convex polygon, drawn as a fan around its first vertex.
    Polygon,
}

impl Topology {
    /// Whether `count` vertices form a valid run for this topology.
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Topology::Quads => count > 0 && count % 4 == 0,
            Topology::Triangles => count > 0 && count % 3 == 0,
            Topology::TriangleStrip | Topology::Polygon => count >= 3,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    pub topology: Topology,
    pub positions: Vec<Vector3<f32>>,
    pub tex_coords: Option<Vec<[f32; 2]>>,
}

impl Primitive {
    pub fn new(topology: Topology, positions: Vec<Vector3<f32>>) -> Self {
        assert!(
            topology.accepts(positions.len()),
            "{:?} cannot be built from {} vertices",
            topology,
            positions.len()
        );
        Self {
            topology,
            positions,
            tex_coords: None,
        }
    }

    /// Attach one texture coordinate per vertex.
    pub fn with_tex_coords(mut self, tex_coords: Vec<[f32; 2]>) -> Self {
        assert_eq!(
            tex_coords.len(),
            self.positions.len(),
            "every vertex needs exactly one texture coordinate"
        );
        self.tex_coords = Some(tex_coords);
        self
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_textured(&self) -> bool {
        self.tex_coords.is_some()
    }

    /// Triangle list indices (local to this primitive) with the winding each
    /// face had in its original topology.
    ///
    /// Strips swap the first two vertices of every odd triangle so that all
    /// faces keep the orientation of the first one.
    pub fn triangle_indices(&self) -> Vec<u32> {
        let n = self.positions.len() as u32;
        match self.topology {
            Topology::Triangles => (0..n).collect(),
            Topology::Quads => (0..n)
                .step_by(4)
                .flat_map(|q| [q, q + 1, q + 2, q, q + 2, q + 3])
                .collect(),
            Topology::TriangleStrip => (0..n.saturating_sub(2))
                .flat_map(|i| {
                    if i % 2 == 0 {
                        [i, i + 1, i + 2]
                    } else {
                        [i + 1, i, i + 2]
                    }
                })
                .collect(),
            Topology::Polygon => (1..n.saturating_sub(1)).flat_map(|i| [0, i, i + 1]).collect(),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.triangle_indices().len() / 3
    }
}

/// A named, immutable collection of primitives.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    pub name: String,
    pub primitives: Vec<Primitive>,
}

impl Mesh {
    pub fn new(name: impl Into<String>, primitives: Vec<Primitive>) -> Self {
        Self {
            name: name.into(),
            primitives,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.primitives.iter().map(Primitive::vertex_count).sum()
    }

    /// All vertex positions of all primitives, in emission order.
    pub fn positions(&self) -> impl Iterator<Item = &Vector3<f32>> {
        self.primitives.iter().flat_map(|p| p.positions.iter())
    }
}
