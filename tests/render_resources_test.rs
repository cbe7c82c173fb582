use std::io::Cursor;

use approx::assert_relative_eq;
use cgmath::{Matrix3, Matrix4, Point3, SquareMatrix, Vector3};
use image::{ImageFormat, Rgba, RgbaImage};
use pool_scene::{
    camera::Camera,
    config::{Fog, SceneConfig},
    context::choose_surface_format,
    data_structures::{
        display_list::{DisplayList, DisplayLists},
        instance::{Instance, InstanceRaw},
        material::{Appearance, Material, WHITE},
        texture::Texture,
    },
    pipelines::{
        basic::{CULL_MODE, FRONT_FACE},
        light::LightUniform,
    },
    render::{Frame, Instanced, Render, Source},
    resources::texture::{FALLBACK_TEXEL, decode_atlas, fallback_atlas, load_atlas_image},
    scene::tiles::{TileTexture, tile_rect},
};

use crate::common::test_utils::cube_cache;

mod common;

const HALF_RED: [f32; 4] = [1.0, 0.0, 0.0, 0.5];

#[test]
fn opaque_meshes_share_one_batch() {
    let (mut meshes, cube) = cube_cache();
    let circle = meshes.get_or_create(pool_scene::resources::MeshKey::Circle { points: 8 });
    let lists = DisplayLists::new();

    let mut root = DisplayList::record("root");
    root.draw(circle);
    root.push().translate(1.0, 0.0, 0.0).draw(cube);
    root.immediate(tile_rect([0.0; 3], [1.0, 0.0, 1.0], false, TileTexture::Blue));
    root.colour(HALF_RED).draw(cube);
    root.colour(WHITE).draw(cube);
    root.colour(HALF_RED)
        .immediate(tile_rect([0.0; 3], [1.0, 0.0, 1.0], false, TileTexture::None));
    let root = root.finish();

    let draws = lists.flatten(&root);
    let frame = Frame::build(&draws);
    assert_eq!(frame.instances.len(), 6);
    assert_eq!(frame.vertices.len(), 8);
    assert_eq!(frame.indices.len(), 12);

    let mut basics: Vec<Instanced> = Vec::new();
    let mut trans: Vec<Instanced> = Vec::new();
    frame.render.set_pipelines(&mut basics, &mut trans);

    assert_eq!(
        basics,
        vec![
            Instanced {
                source: Source::Immediate { indices: 0..6 },
                instances: 0..1,
            },
            Instanced {
                source: Source::Mesh(cube),
                instances: 1..3,
            },
            Instanced {
                source: Source::Mesh(circle),
                instances: 3..4,
            },
        ]
    );
    // Blended draws keep their recording order
    assert_eq!(
        trans,
        vec![
            Instanced {
                source: Source::Mesh(cube),
                instances: 4..5,
            },
            Instanced {
                source: Source::Immediate { indices: 6..12 },
                instances: 5..6,
            },
        ]
    );
}

#[test]
fn empty_frames_render_nothing() {
    let frame = Frame::build(&[]);
    assert!(frame.instances.is_empty());
    let mut basics = Vec::new();
    let mut trans = Vec::new();
    frame.render.set_pipelines(&mut basics, &mut trans);
    assert!(basics.is_empty() && trans.is_empty());

    let mut basics = Vec::new();
    Render::None.set_pipelines(&mut basics, &mut trans);
    assert!(basics.is_empty());
}

#[test]
fn textured_geometry_is_never_blended() {
    let translucent = Appearance {
        colour: HALF_RED,
        material: Material::DEFAULT,
    };
    assert!(Instance::new(Matrix4::identity(), translucent, false).is_translucent());
    assert!(!Instance::new(Matrix4::identity(), translucent, true).is_translucent());
    assert!(!Instance::new(Matrix4::identity(), Appearance::default(), false).is_translucent());
}

#[test]
fn instances_pack_material_terms() {
    let appearance = Appearance {
        colour: [0.1, 0.2, 0.3, 1.0],
        material: Material::GLOWING,
    };
    let raw = Instance::new(Matrix4::from_scale(2.0), appearance, true).to_raw();
    assert_eq!(raw.colour, [0.1, 0.2, 0.3, 1.0]);
    assert_eq!(raw.material, [0.2, 1.0, 1.0, 1.0]);
    assert_eq!(std::mem::size_of::<InstanceRaw>(), 33 * 4);

    let normal = Matrix3::from(raw.normal);
    assert_relative_eq!(normal, Matrix3::from_scale(0.5), epsilon = 1e-6);
}

#[test]
fn degenerate_transforms_keep_an_identity_normal_matrix() {
    let instance = Instance::new(
        Matrix4::from_nonuniform_scale(1.0, 0.0, 1.0),
        Appearance::default(),
        false,
    );
    assert_eq!(instance.normal_matrix(), Matrix3::identity());
}

#[test]
fn lights_follow_the_camera() {
    let camera = Camera::new(Point3::new(0.0, 10.0, 10.0), Point3::new(0.0, 10.0, 0.0));
    let fog = Fog {
        colour: [0.6, 0.6, 0.9],
        density: 0.005,
    };
    let uniform = LightUniform::new(&camera, [true, false, true], &fog, 0.1);

    assert_eq!(std::mem::size_of::<LightUniform>(), 112);
    assert_eq!(uniform.position, [0.0, 10.0, 10.0]);
    assert_relative_eq!(Vector3::from(uniform.direction), -Vector3::unit_z());
    assert!(uniform.spot_cos_cutoff.abs() < 1e-6);
    assert!(uniform.is_enabled(0));
    assert!(!uniform.is_enabled(1));
    assert!(uniform.is_enabled(2));
    assert_eq!(uniform.fog_density, 0.005);
    assert_eq!(uniform.ambient, [0.1; 3]);
}

#[test]
fn frames_are_rendered_without_srgb_encoding() {
    use wgpu::TextureFormat::*;

    assert_eq!(
        choose_surface_format(&[Bgra8UnormSrgb, Bgra8Unorm]),
        Some((Bgra8Unorm, Bgra8Unorm))
    );
    // An sRGB-only surface is drawn through its linear view
    assert_eq!(
        choose_surface_format(&[Rgba8UnormSrgb]),
        Some((Rgba8UnormSrgb, Rgba8Unorm))
    );
    assert_eq!(choose_surface_format(&[]), None);
    assert!(!Texture::COLOUR_FORMAT.is_srgb());
}

#[test]
fn colours_reach_the_gpu_unconverted() {
    let config = SceneConfig::default();
    let clear = config.clear_colour;
    assert_eq!((clear.r, clear.g, clear.b, clear.a), (0.2, 0.5, 0.2, 1.0));

    let uniform = LightUniform::new(
        &Camera::new(config.viewer, config.look_at),
        [true; 3],
        &config.fog,
        config.ambient,
    );
    assert_eq!(uniform.fog_colour, [0.6, 0.6, 0.9]);
    assert_eq!(uniform.ambient, [0.1; 3]);

    let grey = Appearance {
        colour: [0.5, 0.5, 0.5, 1.0],
        material: Material::DEFAULT,
    };
    let raw = Instance::new(Matrix4::identity(), grey, false).to_raw();
    assert_eq!(raw.colour, [0.5, 0.5, 0.5, 1.0]);
}

#[test]
fn back_faces_are_culled() {
    assert_eq!(CULL_MODE, Some(wgpu::Face::Back));
    assert_eq!(FRONT_FACE, wgpu::FrontFace::Ccw);
}

#[test]
fn texture_override_ignores_blank_values() {
    let default = SceneConfig::default();
    assert_eq!(default.texture_file, "combined-texture.bmp");
    assert_eq!(default.title, "Pool Scene");
    assert_eq!((default.width, default.height), (750, 750));

    let custom = SceneConfig::default().with_texture_override(Some("tiles.bmp".to_string()));
    assert_eq!(custom.texture_file, "tiles.bmp");

    let blank = SceneConfig::default().with_texture_override(Some("  ".to_string()));
    assert_eq!(blank.texture_file, default.texture_file);

    let unset = SceneConfig::default().with_texture_override(None);
    assert_eq!(unset, default);
}

fn bitmap(img: &RgbaImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Bmp)
        .expect("bitmap encodes");
    bytes
}

#[test]
fn atlas_rows_start_at_the_bottom() {
    let mut img = RgbaImage::new(1, 2);
    img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
    img.put_pixel(0, 1, Rgba([0, 0, 255, 255]));

    let atlas = decode_atlas(&bitmap(&img)).expect("bitmap decodes");
    assert_eq!(atlas.dimensions(), (1, 2));
    assert_eq!(atlas.get_pixel(0, 0), &Rgba([0, 0, 255, 0]));
    assert_eq!(atlas.get_pixel(0, 1), &Rgba([255, 0, 0, 0]));
}

#[test]
fn garbage_is_not_an_atlas() {
    assert!(decode_atlas(b"definitely not a bitmap").is_err());
    assert!(decode_atlas(&[]).is_err());
}

#[test]
fn fallback_atlas_is_flat() {
    let atlas = fallback_atlas();
    assert_eq!(atlas.dimensions(), (2, 2));
    assert!(atlas.pixels().all(|p| p.0 == FALLBACK_TEXEL));
}

#[tokio::test]
async fn missing_atlas_falls_back() {
    let atlas = load_atlas_image("no-such-texture.bmp").await;
    assert_eq!(atlas, fallback_atlas());
}
