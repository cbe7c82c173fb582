use approx::assert_relative_eq;
use cgmath::Vector3;
use pool_scene::{
    data_structures::mesh::{Primitive, Topology},
    resources::mesh::append_primitive,
    scene::{
        tiles::{BLUE_TILE, TileTexture, WHITE_TILE, tile_rect},
        water::{BezierPatch, WATER_DIVISIONS, bernstein, water_tex_coords},
    },
};

#[test]
fn flat_rectangles_keep_x_on_the_second_edge() {
    let rect = tile_rect([-50.0, 0.0, 150.0], [0.0, 0.0, 100.0], false, TileTexture::Blue);
    assert_eq!(rect.topology, Topology::Quads);
    assert_eq!(
        rect.positions,
        vec![
            Vector3::new(-50.0, 0.0, 150.0),
            Vector3::new(0.0, 0.0, 150.0),
            Vector3::new(0.0, 0.0, 100.0),
            Vector3::new(-50.0, 0.0, 100.0),
        ]
    );
    assert_eq!(rect.tex_coords, Some(BLUE_TILE.to_vec()));
}

#[test]
fn yz_rectangles_run_along_z_first() {
    let rect = tile_rect([50.0, -100.0, -100.0], [50.0, 0.0, 100.0], true, TileTexture::White);
    assert_eq!(
        rect.positions,
        vec![
            Vector3::new(50.0, -100.0, -100.0),
            Vector3::new(50.0, -100.0, 100.0),
            Vector3::new(50.0, 0.0, 100.0),
            Vector3::new(50.0, 0.0, -100.0),
        ]
    );
    assert_eq!(rect.tex_coords, Some(WHITE_TILE.to_vec()));
}

#[test]
fn untextured_rectangles_have_no_coordinates() {
    let rect = tile_rect([0.0, 0.1, 0.0], [1.0, 0.1, 1.0], false, TileTexture::None);
    assert!(!rect.is_textured());
    assert!(tile_rect([0.0; 3], [1.0; 3], false, TileTexture::Green).is_textured());
}

#[test]
#[should_panic]
fn water_is_not_a_tile() {
    tile_rect([0.0; 3], [1.0; 3], false, TileTexture::Water);
}

#[test]
fn bernstein_weights_sum_to_one() {
    for t in [0.0, 0.25, 0.5, 0.8, 1.0] {
        let sum: f32 = bernstein(t).iter().sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-6);
    }
    assert_eq!(bernstein(0.0), [1.0, 0.0, 0.0, 0.0]);
    assert_eq!(bernstein(1.0), [0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn patch_corners_match_the_control_net() {
    let patch = BezierPatch::pool();
    for (u, v, i, j) in [(0.0, 0.0, 0, 0), (0.0, 1.0, 0, 3), (1.0, 0.0, 3, 0), (1.0, 1.0, 3, 3)] {
        assert_relative_eq!(patch.evaluate(u, v), patch.control[i][j], epsilon = 1e-4);
    }
    assert_relative_eq!(patch.evaluate(0.0, 0.0), Vector3::new(-50.0, -10.0, 100.0), epsilon = 1e-4);
    assert_relative_eq!(patch.evaluate(1.0, 1.0), Vector3::new(50.0, -20.0, -100.0), epsilon = 1e-4);
}

#[test]
fn water_stays_inside_the_basin() {
    let surface = BezierPatch::pool().tessellate(WATER_DIVISIONS, false);
    for p in &surface.positions {
        assert!(p.x.abs() <= 50.0 + 1e-3);
        assert!(p.z.abs() <= 100.0 + 1e-3);
        assert!(p.y < 0.0 && p.y > -100.0);
    }
}

#[test]
fn tessellation_emits_a_quad_per_cell() {
    let patch = BezierPatch::pool();
    let plain = patch.tessellate(WATER_DIVISIONS, false);
    assert_eq!(plain.topology, Topology::Quads);
    assert_eq!(plain.vertex_count(), 20 * 20 * 4);
    assert!(!plain.is_textured());

    let textured = patch.tessellate(WATER_DIVISIONS, true);
    assert_eq!(textured.positions, plain.positions);
    let coords = textured.tex_coords.as_ref().expect("textured water has coordinates");
    assert_eq!(coords.len(), 1600);
    assert_eq!(coords[0], [0.0, 0.0]);
    let in_quadrant = |c: f32| (-1e-5..=0.5 + 1e-5).contains(&c);
    assert!(coords.iter().all(|&[s, t]| in_quadrant(s) && in_quadrant(t)));

    // First cell: (u, v), (u, v+1), (u+1, v+1), (u+1, v)
    let step = 1.0 / WATER_DIVISIONS as f32;
    assert_relative_eq!(plain.positions[1], patch.evaluate(0.0, step), epsilon = 1e-4);
    assert_relative_eq!(plain.positions[3], patch.evaluate(step, 0.0), epsilon = 1e-4);
}

#[test]
fn water_faces_up() {
    let surface = BezierPatch::pool().tessellate(WATER_DIVISIONS, false);
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    append_primitive(&surface, &mut vertices, &mut indices);
    assert_eq!(indices.len(), 20 * 20 * 6);
    assert!(vertices[0].normal[1] > 0.0);
}

#[test]
fn water_texture_spans_one_quadrant() {
    assert_eq!(water_tex_coords(0.0, 0.0), [0.0, 0.0]);
    assert_eq!(water_tex_coords(0.0, 1.0), [0.5, 0.0]);
    assert_eq!(water_tex_coords(1.0, 0.0), [0.0, 0.5]);
    assert_eq!(water_tex_coords(1.0, 1.0), [0.5, 0.5]);
    let [s, t] = water_tex_coords(0.5, 0.5);
    assert_relative_eq!(s, 0.25);
    assert_relative_eq!(t, 0.25);
}

#[test]
fn a_single_division_is_one_quad() {
    let quad: Primitive = BezierPatch::pool().tessellate(1, true);
    assert_eq!(quad.vertex_count(), 4);
    assert_eq!(
        quad.tex_coords,
        Some(vec![[0.0, 0.0], [0.5, 0.0], [0.5, 0.5], [0.0, 0.5]])
    );
}
