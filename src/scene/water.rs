//! The water surface: a bicubic Bezier patch re-tessellated every frame.

use cgmath::{Vector2, Vector3};

use crate::data_structures::mesh::{Primitive, Topology};

/// Quads along each parameter direction.
pub const WATER_DIVISIONS: u32 = 20;

/// Atlas coordinates of the water quadrant at the patch corners, indexed
/// `[u][v]`. `s` follows `v` and `t` follows `u`.
pub const WATER_TEX_CORNERS: [[[f32; 2]; 2]; 2] = [[[0.0, 0.0], [0.5, 0.0]], [[0.0, 0.5], [0.5, 0.5]]];

#[rustfmt::skip]
const POOL_CONTROL_POINTS: [[[f32; 3]; 4]; 4] = [
    [[-50.0, -10.0, 100.0], [-25.0, -5.0, 100.0], [20.0, -8.0, 100.0], [50.0, -15.0, 100.0]],
    [[-50.0, -20.0, 66.0], [-20.0, -20.0, 66.0], [20.0, -30.0, 66.0], [50.0, -10.0, 66.0]],
    [[-50.0, -9.0, -66.0], [-30.0, -20.0, -66.0], [0.0, -10.0, -66.0], [50.0, -15.0, -66.0]],
    [[-50.0, -15.0, -100.0], [-22.0, -20.0, -100.0], [15.0, -30.0, -100.0], [50.0, -20.0, -100.0]],
];

/// Cubic Bernstein basis at `t`.
pub fn bernstein(t: f32) -> [f32; 4] {
    let s = 1.0 - t;
    [s * s * s, 3.0 * t * s * s, 3.0 * t * t * s, t * t * t]
}

#[derive(Clone, Debug, PartialEq)]
pub struct BezierPatch {
    /// Control points indexed `[u][v]`.
    pub control: [[Vector3<f32>; 4]; 4],
}

impl BezierPatch {
    pub fn new(control: [[Vector3<f32>; 4]; 4]) -> Self {
        Self { control }
    }

    /// The patch spanning the pool basin.
    pub fn pool() -> Self {
        Self::new(POOL_CONTROL_POINTS.map(|row| row.map(Vector3::from)))
    }

    pub fn evaluate(&self, u: f32, v: f32) -> Vector3<f32> {
        let bu = bernstein(u);
        let bv = bernstein(v);
        let mut point = Vector3::new(0.0, 0.0, 0.0);
        for (i, row) in self.control.iter().enumerate() {
            for (j, control) in row.iter().enumerate() {
                point += *control * (bu[i] * bv[j]);
            }
        }
        point
    }

    /// Quads over a `divisions` x `divisions` grid of the unit parameter square.
    ///
    /// Each cell is emitted as (u, v), (u, v+1), (u+1, v+1), (u+1, v), which
    /// faces up for the pool patch. With `textured` set every vertex also gets
    /// its bilinear position inside the water quadrant of the atlas.
    pub fn tessellate(&self, divisions: u32, textured: bool) -> Primitive {
        assert!(divisions > 0, "a patch needs at least one division");
        let step = 1.0 / divisions as f32;
        let samples: Vec<Vec<(Vector3<f32>, [f32; 2])>> = (0..=divisions)
            .map(|i| {
                let u = i as f32 * step;
                (0..=divisions)
                    .map(|j| {
                        let v = j as f32 * step;
                        (self.evaluate(u, v), water_tex_coords(u, v))
                    })
                    .collect()
            })
            .collect();

        let cells = (divisions * divisions * 4) as usize;
        let mut positions = Vec::with_capacity(cells);
        let mut tex_coords = Vec::with_capacity(cells);
        for i in 0..divisions as usize {
            for j in 0..divisions as usize {
                for (a, b) in [(i, j), (i, j + 1), (i + 1, j + 1), (i + 1, j)] {
                    let (position, coords) = samples[a][b];
                    positions.push(position);
                    tex_coords.push(coords);
                }
            }
        }

        let surface = Primitive::new(Topology::Quads, positions);
        if textured {
            surface.with_tex_coords(tex_coords)
        } else {
            surface
        }
    }
}

/// Bilinear interpolation of [`WATER_TEX_CORNERS`].
pub fn water_tex_coords(u: f32, v: f32) -> [f32; 2] {
    let corner = |i: usize, j: usize| Vector2::from(WATER_TEX_CORNERS[i][j]);
    let near = corner(0, 0) * (1.0 - v) + corner(0, 1) * v;
    let far = corner(1, 0) * (1.0 - v) + corner(1, 1) * v;
    (near * (1.0 - u) + far * u).into()
}
