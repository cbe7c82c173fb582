use approx::assert_relative_eq;
use cgmath::{Matrix4, Point3, SquareMatrix, Transform, Vector3};
use pool_scene::data_structures::{
    display_list::{DisplayList, DisplayLists, DrawGeometry, Geometry},
    material::{Material, WHITE},
    mesh::{Primitive, Topology},
};

use crate::common::test_utils::{cube_cache, origin_of};

mod common;

const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

#[test]
fn scopes_restore_the_transform() {
    let (_, cube) = cube_cache();
    let mut rec = DisplayList::record("scopes");
    rec.push().translate(1.0, 2.0, 3.0).draw(cube);
    assert_eq!(rec.depth(), 0);
    assert_eq!(rec.transform(), Matrix4::identity());

    {
        let mut outer = rec.push();
        outer.translate(1.0, 0.0, 0.0);
        {
            let mut inner = outer.push();
            inner.scale(2.0, 2.0, 2.0).draw(cube);
            assert_eq!(inner.depth(), 2);
        }
        assert_eq!(outer.depth(), 1);
        assert_eq!(outer.transform(), Matrix4::from_translation(Vector3::unit_x()));
        outer.draw(cube);
    }
    rec.draw(cube);

    let list = rec.finish();
    assert_eq!(list.steps.len(), 3);
    assert_eq!(
        list.steps[0].transform,
        Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0))
    );
    assert_eq!(list.steps[2].transform, Matrix4::identity());
}

#[test]
#[should_panic]
fn unbalanced_recording_is_rejected() {
    let mut rec = DisplayList::record("leaky");
    std::mem::forget(rec.push());
    rec.finish();
}

#[test]
fn transforms_post_multiply() {
    let (_, cube) = cube_cache();
    let mut rec = DisplayList::record("order");
    rec.push()
        .translate(10.0, 0.0, 0.0)
        .rotate(90.0, Vector3::unit_y())
        .scale(2.0, 2.0, 2.0)
        .draw(cube);
    let list = rec.finish();

    // Local +x is scaled, then turned to -z, then moved
    let point = list.steps[0]
        .transform
        .transform_point(Point3::new(1.0, 0.0, 0.0));
    assert_relative_eq!(point, Point3::new(10.0, 0.0, -2.0), epsilon = 1e-5);
}

#[test]
fn paint_sticks_until_changed() {
    let (_, cube) = cube_cache();
    let mut rec = DisplayList::record("paint");
    rec.draw(cube);
    rec.colour(RED).draw(cube);
    rec.push().translate(1.0, 0.0, 0.0).draw(cube);
    rec.material(Material::SHINY).draw(cube);
    let list = rec.finish();

    assert_eq!(list.steps[0].paint.colour, None);
    assert_eq!(list.steps[1].paint.colour, Some(RED));
    assert_eq!(list.steps[2].paint.colour, Some(RED));
    assert_eq!(list.steps[3].paint.material, Some(Material::SHINY));
}

#[test]
fn called_lists_inherit_unset_paint() {
    let (_, cube) = cube_cache();
    let mut lists = DisplayLists::new();

    let mut plain = DisplayList::record("plain");
    plain.draw(cube);
    let plain = lists.insert(plain.finish());

    let mut green = DisplayList::record("green");
    green.colour(GREEN).draw(cube);
    let green = lists.insert(green.finish());

    let mut root = DisplayList::record("root");
    root.colour(RED).material(Material::SHINY);
    root.call(plain).call(green);
    let root = root.finish();

    let draws = lists.flatten(&root);
    assert_eq!(draws.len(), 2);
    assert_eq!(draws[0].appearance.colour, RED);
    assert_eq!(draws[0].appearance.material, Material::SHINY);
    assert_eq!(draws[1].appearance.colour, GREEN);
    assert_eq!(draws[1].appearance.material, Material::SHINY);
}

#[test]
fn unpainted_draws_are_white_and_default() {
    let (_, cube) = cube_cache();
    let lists = DisplayLists::new();
    let mut root = DisplayList::record("root");
    root.draw(cube);
    let root = root.finish();

    let draws = lists.flatten(&root);
    assert_eq!(draws[0].appearance.colour, WHITE);
    assert_eq!(draws[0].appearance.material, Material::DEFAULT);
}

#[test]
fn flatten_composes_nested_transforms() {
    let (_, cube) = cube_cache();
    let mut lists = DisplayLists::new();

    let mut leaf = DisplayList::record("leaf");
    leaf.push().translate(0.0, 5.0, 0.0).draw(cube);
    let leaf = lists.insert(leaf.finish());

    let mut middle = DisplayList::record("middle");
    middle.push().translate(10.0, 0.0, 0.0).call(leaf);
    middle.push().translate(-10.0, 0.0, 0.0).call(leaf);
    let middle = lists.insert(middle.finish());

    let mut root = DisplayList::record("root");
    root.push().translate(0.0, 0.0, 1.0).call(middle);
    let root = root.finish();

    let draws = lists.flatten(&root);
    assert_eq!(draws.len(), 2);
    assert_relative_eq!(origin_of(draws[0].transform), Point3::new(10.0, 5.0, 1.0));
    assert_relative_eq!(origin_of(draws[1].transform), Point3::new(-10.0, 5.0, 1.0));
    assert!(draws.iter().all(|d| d.geometry == DrawGeometry::Mesh(cube)));
}

#[test]
fn immediate_geometry_is_kept_by_reference() {
    let lists = DisplayLists::new();
    let quad = Primitive::new(
        Topology::Quads,
        vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        ],
    );
    let mut root = DisplayList::record("root");
    root.immediate(quad.clone());
    let root = root.finish();
    assert_eq!(root.steps[0].geometry, Geometry::Immediate(quad.clone()));

    let draws = lists.flatten(&root);
    match draws[0].geometry {
        DrawGeometry::Immediate(primitive) => assert_eq!(primitive, &quad),
        DrawGeometry::Mesh(_) => panic!("expected immediate geometry"),
    }
}
