//! The pool hall: floor, basin, walls, furniture and the water surface.
//!
//! [`Scene::new`] generates the primitive meshes and records the compound
//! objects once. [`Scene::compose`] records the per-frame list, whose immediate
//! geometry depends on the toggles in [`SceneState`].

pub mod objects;
pub mod tiles;
pub mod water;

use cgmath::Vector3;

use crate::{
    data_structures::{
        display_list::{DisplayList, DisplayLists},
        material::WHITE,
        mesh::{Primitive, Topology},
    },
    render::Frame,
    resources::MeshCache,
    state::SceneState,
};

use objects::{Objects, Primitives};
use tiles::{TileTexture, tile_rect};
use water::{BezierPatch, WATER_DIVISIONS};

/// Blue floor tiles around the basin as opposite corners at y = 0.
#[rustfmt::skip]
pub const FLOOR_TILES: [([f32; 2], [f32; 2]); 16] = [
    ([-50.0, 150.0], [0.0, 100.0]),
    ([0.0, 150.0], [50.0, 100.0]),
    ([50.0, 150.0], [100.0, 100.0]),
    ([50.0, 100.0], [100.0, 50.0]),
    ([50.0, 50.0], [100.0, 0.0]),
    ([50.0, 0.0], [100.0, -50.0]),
    ([50.0, -50.0], [100.0, -100.0]),
    ([50.0, -100.0], [100.0, -150.0]),
    ([0.0, -100.0], [50.0, -150.0]),
    ([-50.0, -100.0], [0.0, -150.0]),
    ([-100.0, -100.0], [-50.0, -150.0]),
    ([-100.0, -50.0], [-50.0, -100.0]),
    ([-100.0, 0.0], [-50.0, -50.0]),
    ([-100.0, 50.0], [-50.0, 0.0]),
    ([-100.0, 100.0], [-50.0, 50.0]),
    ([-100.0, 150.0], [-50.0, 100.0]),
];

/// Height of the translucent sheen above the floor tiles.
const FLOOR_OVERLAY_HEIGHT: f32 = 0.1;
/// Inset of the translucent sheen in front of each wall.
const WALL_OVERLAY_INSET: f32 = 0.5;

const FLOOR_OVERLAY: [f32; 4] = [1.0, 1.0, 1.0, 0.5];
const WALL_OVERLAY: [f32; 4] = [1.0, 1.0, 1.0, 0.7];
const CEILING: [f32; 4] = [0.1, 0.1, 0.1, 1.0];
pub const WATER_COLOUR: [f32; 4] = [0.0, 0.0, 1.0, 0.7];

/// Pool basin sides and bottom.
#[rustfmt::skip]
const BASIN: [([f32; 3], [f32; 3], bool); 5] = [
    ([50.0, -100.0, 100.0], [-50.0, 0.0, 100.0], false),
    ([50.0, -100.0, -100.0], [50.0, 0.0, 100.0], true),
    ([-50.0, -100.0, -100.0], [50.0, 0.0, -100.0], false),
    ([-50.0, -100.0, 100.0], [-50.0, 0.0, -100.0], true),
    ([-50.0, -100.0, 100.0], [50.0, -100.0, -100.0], false),
];

/// Hall walls, clockwise from the front.
#[rustfmt::skip]
const WALLS: [([f32; 3], [f32; 3], bool); 4] = [
    ([100.0, 0.0, 150.0], [-100.0, 100.0, 150.0], false),
    ([100.0, 0.0, -150.0], [100.0, 100.0, 150.0], true),
    ([-100.0, 0.0, -150.0], [100.0, 100.0, -150.0], false),
    ([-100.0, 0.0, 150.0], [-100.0, 100.0, -150.0], true),
];

/// Lounge chairs: position and rotation around y.
const CHAIRS: [([f32; 3], f32); 6] = [
    ([-80.0, 3.0, 0.0], 90.0),
    ([-80.0, 3.0, 70.0], 90.0),
    ([-80.0, 3.0, -70.0], 90.0),
    ([80.0, 3.0, 0.0], 270.0),
    ([80.0, 3.0, 70.0], 270.0),
    ([80.0, 3.0, -70.0], 270.0),
];

const HANGING_LIGHTS: [[f32; 3]; 3] = [[-55.0, 55.0, 50.0], [0.0, 55.0, 0.0], [55.0, 55.0, -50.0]];
const HANGING_LIGHT_SCALE: f32 = 4.0;

pub struct Scene {
    pub meshes: MeshCache,
    pub primitives: Primitives,
    pub lists: DisplayLists,
    pub objects: Objects,
    pub water: BezierPatch,
}

impl Scene {
    pub fn new() -> Self {
        let mut meshes = MeshCache::new();
        let primitives = Primitives::new(&mut meshes);
        let mut lists = DisplayLists::new();
        let objects = Objects::new(&primitives, &mut lists);
        log::info!(
            "Scene ready: {} meshes, {} display lists",
            meshes.len(),
            lists.len()
        );
        Self {
            meshes,
            primitives,
            lists,
            objects,
            water: BezierPatch::pool(),
        }
    }

    /// Record everything drawn this frame.
    ///
    /// Translucent surfaces are recorded after everything opaque they may cover,
    /// and the water is always last.
    pub fn compose(&self, state: &SceneState) -> DisplayList {
        let mut frame = DisplayList::record("frame");
        frame.colour(WHITE);

        for ([x1, z1], [x2, z2]) in FLOOR_TILES {
            frame.immediate(tile_rect([x1, 0.0, z1], [x2, 0.0, z2], false, TileTexture::Blue));
        }
        frame.colour(FLOOR_OVERLAY);
        for ([x1, z1], [x2, z2]) in FLOOR_TILES {
            let y = FLOOR_OVERLAY_HEIGHT;
            frame.immediate(tile_rect([x1, y, z1], [x2, y, z2], false, TileTexture::None));
        }

        frame.colour(WHITE);
        for (c1, c2, yz) in BASIN {
            frame.immediate(tile_rect(c1, c2, yz, TileTexture::White));
        }

        let wall_texture = if state.plain_walls {
            TileTexture::None
        } else {
            TileTexture::White
        };
        for (c1, c2, yz) in WALLS {
            frame.immediate(tile_rect(c1, c2, yz, wall_texture));
        }

        let d = WALL_OVERLAY_INSET;
        frame.colour(WALL_OVERLAY);
        frame.immediate(tile_rect([100.0, 0.0, 150.0 - d], [-100.0, 100.0, 150.0 - d], false, TileTexture::None));
        frame.immediate(tile_rect([100.0 - d, 0.0, -150.0], [100.0 - d, 100.0, 150.0], true, TileTexture::None));
        frame.immediate(tile_rect([-100.0, 0.0, -150.0 + d], [100.0, 100.0, -150.0 + d], false, TileTexture::None));
        frame.immediate(tile_rect([-100.0 + d, 0.0, 150.0], [-100.0 + d, 100.0, -150.0], true, TileTexture::None));

        frame.colour(CEILING);
        frame.immediate(Primitive::new(
            Topology::Quads,
            vec![
                Vector3::new(100.0, 100.0, 150.0),
                Vector3::new(-100.0, 100.0, 150.0),
                Vector3::new(-100.0, 100.0, -150.0),
                Vector3::new(100.0, 100.0, -150.0),
            ],
        ));

        frame
            .push()
            .translate(-48.0, -20.0, -90.0)
            .rotate(90.0, Vector3::unit_y())
            .call(self.objects.ladder);

        for ([x, y, z], angle) in CHAIRS {
            frame
                .push()
                .translate(x, y, z)
                .rotate(angle, Vector3::unit_y())
                .call(self.objects.pool_chair);
        }

        frame
            .push()
            .translate(0.0, 8.0, 115.0)
            .call(self.objects.diving_board);

        for [x, y, z] in HANGING_LIGHTS {
            let s = HANGING_LIGHT_SCALE;
            frame
                .push()
                .translate(x, y, z)
                .scale(s, s, s)
                .call(self.objects.hanging_light);
        }

        frame
            .push()
            .translate(70.0, 2.0, -135.0)
            .rotate(90.0, Vector3::unit_y())
            .call(self.objects.pool_noodles);

        frame
            .colour(WATER_COLOUR)
            .immediate(self.water.tessellate(WATER_DIVISIONS, state.textured_water));

        frame.finish()
    }

    /// Compose, flatten and batch the current frame.
    pub fn frame(&self, state: &SceneState) -> Frame {
        let list = self.compose(state);
        let draws = self.lists.flatten(&list);
        Frame::build(&draws)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
