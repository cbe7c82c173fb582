//! Procedural generators for the solid primitives every scene object is built from.
//!
//! All generators work in a canonical frame: unit sized, centred on (or resting
//! at) the origin. Callers place and stretch them through display list
//! transforms. Resolution arguments count points around a circumference and
//! stacks from pole to pole. Zero stacks or lengths panic, and so does any
//! circumference too small to form a polygon.

use std::f64::consts::PI;

use cgmath::Vector3;

use crate::data_structures::mesh::{Mesh, Primitive, Topology};

fn v(x: f64, y: f64, z: f64) -> Vector3<f32> {
    Vector3::new(x as f32, y as f32, z as f32)
}

/// `(cos, sin)` of `points` angles evenly spaced around the unit circle.
fn unit_circle(points: u32) -> Vec<(f64, f64)> {
    (0..points)
        .map(|i| {
            let angle = i as f64 * (2.0 * PI / points as f64);
            (angle.cos(), angle.sin())
        })
        .collect()
}

/// A unit cube centred on the origin: six quads, 24 vertices.
pub fn cube() -> Mesh {
    let a = v(-0.5, -0.5, 0.5);
    let b = v(0.5, -0.5, 0.5);
    let c = v(0.5, 0.5, 0.5);
    let d = v(-0.5, 0.5, 0.5);
    let e = v(0.5, -0.5, -0.5);
    let f = v(0.5, 0.5, -0.5);
    let g = v(-0.5, 0.5, -0.5);
    let h = v(-0.5, -0.5, -0.5);

    let faces = vec![
        b, e, f, c, // right
        h, a, d, g, // left
        a, b, c, d, // front
        e, h, g, f, // back
        c, f, g, d, // top
        e, b, a, h, // bottom
    ];
    Mesh::new("cube", vec![Primitive::new(Topology::Quads, faces)])
}

fn circle_polygon(points: u32) -> Primitive {
    let positions = unit_circle(points)
        .into_iter()
        .map(|(x, y)| v(x, y, 0.0))
        .collect();
    Primitive::new(Topology::Polygon, positions)
}

/// A unit circle in the XY plane approximated by `points` points.
pub fn circle(points: u32) -> Mesh {
    assert!(points >= 3, "a circle needs at least three points");
    Mesh::new("circle", vec![circle_polygon(points)])
}

/// A unit radius cylinder running from z=0 to z=-`length`.
///
/// The side is a single zig-zag strip: even points sit on the near cap, odd
/// points on the far one, and the strip is closed by repeating points 0 and 1.
pub fn cylinder(points: u32, length: u32) -> Mesh {
    assert!(points >= 3, "a cylinder needs at least three points per cap");
    assert!(length > 0, "a cylinder needs a positive length");
    let ring = unit_circle(points);
    let far = -(length as f64);

    let near_cap = ring.iter().map(|&(x, y)| v(x, y, 0.0)).collect();
    let far_cap = ring.iter().rev().map(|&(x, y)| v(x, y, far)).collect();

    let mut side: Vec<_> = ring
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| if i % 2 == 0 { v(x, y, 0.0) } else { v(x, y, far) })
        .collect();
    let (x0, y0) = ring[0];
    let (x1, y1) = ring[1 % ring.len()];
    side.push(v(x0, y0, 0.0));
    side.push(v(x1, y1, far));

    Mesh::new(
        "cylinder",
        vec![
            Primitive::new(Topology::Polygon, near_cap),
            Primitive::new(Topology::Polygon, far_cap),
            Primitive::new(Topology::TriangleStrip, side),
        ],
    )
}

/// One band between two latitudes. `sign` mirrors it below the equator.
fn band(ring: &[(f64, f64)], outer: f64, inner: f64, sign: f64) -> Primitive {
    let (outer_coef, inner_coef) = (outer.cos(), inner.cos());
    let (outer_y, inner_y) = (sign * outer.sin(), sign * inner.sin());

    let mut strip = Vec::with_capacity(ring.len() * 2 + 2);
    for &(x, z) in ring {
        strip.push(v(outer_coef * x, outer_y, outer_coef * z));
        strip.push(v(inner_coef * x, inner_y, inner_coef * z));
    }
    // The closing pair pairs outer[0] with inner[1], which leaves a thin seam.
    let (x0, z0) = ring[0];
    let (x1, z1) = ring[1 % ring.len()];
    strip.push(v(outer_coef * x0, outer_y, outer_coef * z0));
    strip.push(v(inner_coef * x1, inner_y, inner_coef * z1));
    Primitive::new(Topology::TriangleStrip, strip)
}

/// The unit circle laid flat in the XZ plane, covering the equator seam.
fn equator_disk(ring: &[(f64, f64)]) -> Primitive {
    let positions = ring.iter().map(|&(x, z)| v(x, 0.0, z)).collect();
    Primitive::new(Topology::Polygon, positions)
}

fn hemispheres(points: u32, stacks: u32, lower: bool) -> Vec<Primitive> {
    assert!(points >= 3 && stacks > 0, "spheres need three points and one stack");
    let stacks = stacks + stacks % 2;
    let ring = unit_circle(points);
    let chord = PI / stacks as f64;

    let mut primitives = Vec::new();
    for pair in 0..stacks / 2 {
        let outer = pair as f64 * chord;
        let inner = (pair + 1) as f64 * chord;
        primitives.push(band(&ring, outer, inner, 1.0));
        if lower {
            primitives.push(band(&ring, outer, inner, -1.0));
        }
    }
    primitives.push(equator_disk(&ring));
    primitives
}

/// A unit sphere built as stacked bands. Odd stack counts are rounded up.
pub fn sphere(points: u32, stacks: u32) -> Mesh {
    Mesh::new("sphere", hemispheres(points, stacks, true))
}

/// The upper half of [`sphere`] with a flat base on y=0.
pub fn dome(points: u32, stacks: u32) -> Mesh {
    Mesh::new("dome", hemispheres(points, stacks, false))
}

/// A regular tetrahedron with unit edges, base on y=0.
pub fn tri_pyramid() -> Mesh {
    let a = v(-0.288675, 0.0, -0.5);
    let b = v(-0.288675, 0.0, 0.5);
    let c = v(0.433013, 0.0, 0.0);
    let d = v(0.0, 0.866025, 0.0);
    Mesh::new(
        "tri_pyramid",
        vec![Primitive::new(
            Topology::Triangles,
            vec![a, c, b, b, c, d, c, a, d, a, b, d],
        )],
    )
}

/// A unit square base pyramid, base on y=0.
pub fn square_pyramid() -> Mesh {
    let a = v(0.5, 0.0, 0.5);
    let b = v(-0.5, 0.0, 0.5);
    let c = v(-0.5, 0.0, -0.5);
    let d = v(0.5, 0.0, -0.5);
    let e = v(0.0, 0.707107, 0.0);
    Mesh::new(
        "square_pyramid",
        vec![Primitive::new(
            Topology::Triangles,
            vec![a, b, c, c, d, a, a, d, e, d, c, e, c, b, e, b, a, e],
        )],
    )
}

/// A prism with equilateral end faces lying along the X axis.
pub fn tri_prism() -> Mesh {
    let a = v(-0.5, 0.0, -0.5);
    let b = v(-0.5, 0.0, 0.5);
    let c = v(0.5, 0.0, 0.5);
    let d = v(0.5, 0.0, -0.5);
    let e = v(0.5, 0.866025, 0.0);
    let f = v(-0.5, 0.866025, 0.0);
    Mesh::new(
        "tri_prism",
        vec![
            Primitive::new(Topology::Triangles, vec![c, d, e, a, b, f]),
            Primitive::new(Topology::TriangleStrip, vec![b, c, f, e, a, d, b, c]),
        ],
    )
}
