//! Compound scene objects recorded once from the shared primitives.
//!
//! Every builder records its sub-parts into the [`DisplayLists`] arena and
//! returns the handle of its top-level list. Colours and materials set inside
//! a list only apply to that list's steps and anything it calls.

use cgmath::Vector3;

use crate::{
    data_structures::{
        display_list::{DisplayList, DisplayLists, ListHandle, ListRecorder},
        material::{Colour, Material, WHITE},
    },
    resources::{MeshCache, MeshHandle, MeshKey},
};

pub const CIRCLE_POINTS: u32 = 100;
pub const CYLINDER_POINTS: u32 = 100;
pub const CYLINDER_LENGTH: u32 = 10;
pub const SPHERE_POINTS: u32 = 100;
pub const SPHERE_STACKS: u32 = 50;

const GREY: Colour = [0.5, 0.5, 0.5, 1.0];

fn x_axis() -> Vector3<f32> {
    Vector3::unit_x()
}

fn y_axis() -> Vector3<f32> {
    Vector3::unit_y()
}

/// Handles to the generated primitive meshes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Primitives {
    pub cube: MeshHandle,
    pub circle: MeshHandle,
    pub cylinder: MeshHandle,
    pub sphere: MeshHandle,
    pub dome: MeshHandle,
    pub tri_pyramid: MeshHandle,
    pub square_pyramid: MeshHandle,
    pub tri_prism: MeshHandle,
}

impl Primitives {
    pub fn new(meshes: &mut MeshCache) -> Self {
        Self {
            cube: meshes.get_or_create(MeshKey::Cube),
            circle: meshes.get_or_create(MeshKey::Circle {
                points: CIRCLE_POINTS,
            }),
            cylinder: meshes.get_or_create(MeshKey::Cylinder {
                points: CYLINDER_POINTS,
                length: CYLINDER_LENGTH,
            }),
            sphere: meshes.get_or_create(MeshKey::Sphere {
                points: SPHERE_POINTS,
                stacks: SPHERE_STACKS,
            }),
            dome: meshes.get_or_create(MeshKey::Dome {
                points: SPHERE_POINTS,
                stacks: SPHERE_STACKS,
            }),
            tri_pyramid: meshes.get_or_create(MeshKey::TriPyramid),
            square_pyramid: meshes.get_or_create(MeshKey::SquarePyramid),
            tri_prism: meshes.get_or_create(MeshKey::TriPrism),
        }
    }
}

/// Handles to the compound objects placed in the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Objects {
    pub pool_chair: ListHandle,
    pub diving_board: ListHandle,
    pub hanging_light: ListHandle,
    pub ladder: ListHandle,
    pub pool_noodles: ListHandle,
}

impl Objects {
    pub fn new(p: &Primitives, lists: &mut DisplayLists) -> Self {
        Self {
            pool_chair: pool_chair(p, lists),
            diving_board: diving_board(p, lists),
            hanging_light: hanging_light(p, lists),
            ladder: ladder(p, lists),
            pool_noodles: pool_noodles(p, lists),
        }
    }
}

/// A white lounge chair: seat and backrest slabs on two tubular frames.
pub fn pool_chair(p: &Primitives, lists: &mut DisplayLists) -> ListHandle {
    let mut frame = DisplayList::record("pool_chair_frame");
    frame.push().scale(0.5, 0.5, 2.0).draw(p.cylinder);
    frame
        .push()
        .translate(0.0, -3.0, -17.0)
        .rotate(45.0, x_axis())
        .scale(0.5, 0.5, 0.4)
        .draw(p.cylinder);
    frame
        .push()
        .translate(0.0, -0.2, 0.0)
        .rotate(-45.0, x_axis())
        .scale(0.5, 0.5, 0.4)
        .draw(p.cylinder);
    frame
        .push()
        .translate(0.0, -3.0, -5.0)
        .rotate(45.0, x_axis())
        .scale(0.5, 0.5, 0.4)
        .draw(p.cylinder);
    frame
        .push()
        .translate(0.0, -0.2, -10.0)
        .rotate(-45.0, x_axis())
        .scale(0.5, 0.5, 0.4)
        .draw(p.cylinder);
    frame
        .push()
        .translate(0.0, -2.9, -2.5)
        .scale(0.5, 0.5, 0.27)
        .draw(p.cylinder);
    frame
        .push()
        .translate(0.0, -2.9, -12.5)
        .scale(0.5, 0.5, 0.47)
        .draw(p.cylinder);
    frame
        .push()
        .translate(0.0, -0.05, 0.05)
        .scale(0.525, 0.525, 0.525)
        .draw(p.sphere);
    frame
        .push()
        .translate(0.0, -0.05, -20.05)
        .scale(0.525, 0.525, 0.525)
        .draw(p.sphere);
    let frame = lists.insert(frame.finish());

    let mut chair = DisplayList::record("pool_chair");
    chair.colour(WHITE);
    chair
        .push()
        .rotate(90.0, x_axis())
        .scale(10.0, 20.0, 1.0)
        .draw(p.cube);
    chair
        .push()
        .translate(0.0, 5.0, -14.0)
        .rotate(-45.0, x_axis())
        .scale(10.0, 10.0, 1.0)
        .draw(p.cube);
    chair.push().translate(5.5, 0.0, 9.5).call(frame);
    chair.push().translate(-5.5, 0.0, 9.5).call(frame);
    lists.insert(chair.finish())
}

/// A stepped platform with a long springboard and shiny hand rails.
pub fn diving_board(p: &Primitives, lists: &mut DisplayLists) -> ListHandle {
    let mut railing = DisplayList::record("diving_board_railing");
    railing.colour(GREY).material(Material::SHINY);
    railing.push().scale(0.5, 0.5, 3.0).draw(p.cylinder);
    railing
        .push()
        .translate(0.0, -12.5, -15.0)
        .rotate(45.0, x_axis())
        .scale(0.5, 0.5, 1.75)
        .draw(p.cylinder);
    railing
        .push()
        .translate(0.0, 0.0, -1.0)
        .rotate(-60.0, x_axis())
        .scale(0.5, 0.5, 1.5)
        .draw(p.cylinder);
    let railing = lists.insert(railing.finish());

    let mut board = DisplayList::record("diving_board");
    board.colour([0.8, 0.8, 1.0, 1.0]);
    board.push().scale(10.0, 15.0, 15.0).draw(p.cube);

    board.colour([0.8, 1.0, 0.8, 1.0]);
    board
        .push()
        .translate(0.0, 8.0, 0.0)
        .scale(15.0, 1.0, 25.0)
        .draw(p.cube);
    board
        .push()
        .translate(0.0, 3.0, 10.0)
        .rotate(-30.0, x_axis())
        .scale(10.0, 12.0, 1.0)
        .draw(p.cube);

    // Steps up the front of the platform
    board.colour([0.7, 1.0, 0.7, 1.0]);
    for (y, z) in [(-1.75, 13.8), (0.5, 12.8), (2.75, 11.5)] {
        board
            .push()
            .translate(0.0, y, z)
            .rotate(-60.0, x_axis())
            .scale(9.5, 2.0, 2.0)
            .draw(p.tri_prism);
    }

    board.colour(WHITE);
    board
        .push()
        .translate(0.0, 9.0, -22.4)
        .scale(10.0, 1.0, 70.0)
        .draw(p.cube);
    board.push().translate(-5.5, 20.0, 14.0).call(railing);
    board.push().translate(5.5, 20.0, 14.0).call(railing);
    lists.insert(board.finish())
}

/// A glowing globe under a dark shade, hanging from a short stem.
pub fn hanging_light(p: &Primitives, lists: &mut DisplayLists) -> ListHandle {
    let mut light = DisplayList::record("hanging_light");
    light.colour(WHITE).material(Material::GLOWING);
    light.push().draw(p.sphere);

    light.material(Material::DEFAULT).colour([0.1, 0.1, 0.1, 1.0]);
    light
        .push()
        .translate(0.0, 1.0, 0.0)
        .rotate(90.0, x_axis())
        .scale(0.2, 0.2, 1.0)
        .draw(p.cylinder);
    light
        .push()
        .translate(0.0, 0.15, 0.0)
        .scale(1.5, 1.5, 1.5)
        .draw(p.dome);
    lists.insert(light.finish())
}

/// A pool ladder: four studded rungs between two bent railings.
pub fn ladder(p: &Primitives, lists: &mut DisplayLists) -> ListHandle {
    let mut rung = DisplayList::record("ladder_rung");
    rung.colour(GREY);
    rung.push().scale(8.0, 1.0, 3.0).draw(p.cube);
    {
        let mut studs = rung.push();
        studs.colour([0.4, 0.4, 0.4, 1.0]).draw(p.dome);
        studs.translate(-3.0, 0.0, 0.0).draw(p.dome);
        studs.translate(6.0, 0.0, 0.0).draw(p.dome);
    }
    let rung = lists.insert(rung.finish());

    let mut railing = DisplayList::record("ladder_railing");
    railing.material(Material::SHINY).colour(GREY);
    railing
        .push()
        .rotate(90.0, x_axis())
        .scale(0.5, 0.5, 4.0)
        .draw(p.cylinder);
    railing
        .push()
        .translate(0.0, 40.0, 0.0)
        .scale(0.5, 0.5, 1.0)
        .draw(p.cylinder);
    railing
        .push()
        .translate(0.0, 40.0, 0.0)
        .scale(0.5, 0.5, 0.5)
        .draw(p.sphere);
    railing
        .push()
        .translate(0.0, 25.0, -10.0)
        .rotate(90.0, x_axis())
        .scale(0.5, 0.5, 1.5)
        .draw(p.cylinder);
    railing
        .push()
        .translate(0.0, 40.0, -10.0)
        .scale(0.5, 0.5, 0.5)
        .draw(p.sphere);
    let railing = lists.insert(railing.finish());

    let mut ladder = DisplayList::record("ladder");
    ladder.material(Material::SHINY);
    {
        let mut rungs = ladder.push();
        rungs.translate(0.0, -5.0, 0.0).call(rung);
        for _ in 0..3 {
            rungs.translate(0.0, 5.0, 0.0).call(rung);
        }
    }
    ladder.push().translate(4.0, -10.0, 0.0).call(railing);
    ladder.push().translate(-4.0, -10.0, 0.0).call(railing);
    lists.insert(ladder.finish())
}

pub const NOODLE_RED: [f32; 3] = [1.0, 0.0, 0.0];
pub const NOODLE_GREEN: [f32; 3] = [0.0, 1.0, 0.0];
pub const NOODLE_BLUE: [f32; 3] = [0.0, 0.0, 1.0];
pub const NOODLE_PINK: [f32; 3] = [1.0, 0.5, 0.5];
pub const NOODLE_PURPLE: [f32; 3] = [1.0, 0.0, 1.0];
pub const NOODLE_YELLOW: [f32; 3] = [1.0, 1.0, 0.0];

/// Offsets (x, y) and body colours of the stacked noodles, bottom row first.
pub const NOODLE_STACK: [(f32, f32, [f32; 3]); 18] = [
    (0.0, 0.0, NOODLE_RED),
    (2.0, 0.0, NOODLE_GREEN),
    (4.0, 0.0, NOODLE_BLUE),
    (6.0, 0.0, NOODLE_PINK),
    (8.0, 0.0, NOODLE_PURPLE),
    (10.0, 0.0, NOODLE_YELLOW),
    (1.0, 2.0, NOODLE_PINK),
    (3.0, 2.0, NOODLE_YELLOW),
    (5.0, 2.0, NOODLE_RED),
    (7.0, 2.0, NOODLE_BLUE),
    (9.0, 2.0, NOODLE_GREEN),
    (2.0, 4.0, NOODLE_PURPLE),
    (4.0, 4.0, NOODLE_PINK),
    (6.0, 4.0, NOODLE_GREEN),
    (8.0, 4.0, NOODLE_RED),
    (3.0, 6.0, NOODLE_BLUE),
    (5.0, 6.0, NOODLE_YELLOW),
    (7.0, 6.0, NOODLE_PURPLE),
];

/// Colour of a noodle's end caps: each channel darkened by 0.2 and clamped at
/// zero, except blue, which is dropped entirely unless it stays at or above one.
pub fn noodle_end_colour([r, g, b]: [f32; 3]) -> Colour {
    let darken = |c: f32| if c - 0.2 < 0.0 { 0.0 } else { c - 0.2 };
    let blue = if b - 0.2 < 1.0 { 0.0 } else { b - 0.2 };
    [darken(r), darken(g), blue, 1.0]
}

fn pool_noodle(rec: &mut ListRecorder, p: &Primitives, [r, g, b]: [f32; 3]) {
    rec.colour(noodle_end_colour([r, g, b]));
    rec.push()
        .translate(0.0, 0.0, 0.2)
        .scale(0.2, 0.2, 0.2)
        .draw(p.circle);
    rec.push()
        .translate(0.0, 0.0, -25.2)
        .rotate(180.0, y_axis())
        .scale(0.2, 0.2, 0.2)
        .draw(p.circle);

    rec.colour([r, g, b, 1.0]);
    rec.push().scale(1.0, 1.0, 2.5).draw(p.cylinder);
}

/// A pyramid of 18 foam noodles lying along -z.
pub fn pool_noodles(p: &Primitives, lists: &mut DisplayLists) -> ListHandle {
    let mut noodles = DisplayList::record("pool_noodles");
    for (x, y, colour) in NOODLE_STACK {
        let mut placed = noodles.push();
        placed.translate(x, y, 0.0);
        pool_noodle(&mut placed, p, colour);
    }
    lists.insert(noodles.finish())
}
