//! Axis-aligned rectangles textured from the tile atlas.
//!
//! The atlas holds four quadrants. Texture coordinates use a bottom-left
//! origin: the white tile is top left, the blue tile top right, the water
//! bottom left and an unused green filler bottom right.

use cgmath::Vector3;

use crate::data_structures::mesh::{Primitive, Topology};

pub const WHITE_TILE: [[f32; 2]; 4] = [[0.0, 0.5], [0.5, 0.5], [0.5, 1.0], [0.0, 1.0]];
pub const BLUE_TILE: [[f32; 2]; 4] = [[0.5, 0.5], [1.0, 0.5], [1.0, 1.0], [0.5, 1.0]];
pub const GREEN_TILE: [[f32; 2]; 4] = [[0.5, 0.0], [1.0, 0.0], [1.0, 0.5], [0.5, 0.5]];

/// Texture selector for [`tile_rect`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileTexture {
    White,
    Blue,
    /// Only valid for the water surface, which maps the quadrant itself.
    Water,
    Green,
    None,
}

/// A rectangle between two opposite corners.
///
/// With `yz` unset the second edge keeps `x` fixed, which covers rectangles in
/// the XZ and XY planes: (x1,y1,z1) (x2,y1,z1) (x2,y2,z2) (x1,y2,z2). With `yz`
/// set the edges run along z first: (x1,y1,z1) (x2,y1,z2) (x2,y2,z2) (x1,y2,z1).
///
/// # Panics
///
/// [`TileTexture::Water`] is not a tile; passing it is a programming error.
pub fn tile_rect(c1: [f32; 3], c2: [f32; 3], yz: bool, texture: TileTexture) -> Primitive {
    let coords = match texture {
        TileTexture::White => Some(WHITE_TILE),
        TileTexture::Blue => Some(BLUE_TILE),
        TileTexture::Green => Some(GREEN_TILE),
        TileTexture::None => None,
        TileTexture::Water => {
            log::error!(
                "Invalid argument to tile_rect: {:?}. Expected one of White, Blue, Green or None.",
                texture
            );
            panic!("tile_rect cannot draw a {:?} tile", texture);
        }
    };

    let [x1, y1, z1] = c1;
    let [x2, y2, z2] = c2;
    let positions = if yz {
        vec![
            Vector3::new(x1, y1, z1),
            Vector3::new(x2, y1, z2),
            Vector3::new(x2, y2, z2),
            Vector3::new(x1, y2, z1),
        ]
    } else {
        vec![
            Vector3::new(x1, y1, z1),
            Vector3::new(x2, y1, z1),
            Vector3::new(x2, y2, z2),
            Vector3::new(x1, y2, z2),
        ]
    };

    let rect = Primitive::new(Topology::Quads, positions);
    match coords {
        Some(coords) => rect.with_tex_coords(coords.to_vec()),
        None => rect,
    }
}
