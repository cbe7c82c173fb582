//! Recorded draw sequences with a scoped transform stack.
//!
//! A [`DisplayList`] is a flat list of [`Step`]s, each pairing a transform and
//! a [`Paint`] with the geometry to draw: a cached mesh, another display list,
//! or immediate geometry recorded for a single frame. Lists are recorded with
//! a [`ListRecorder`] whose [`push`](ListRecorder::push) returns a
//! [`TransformScope`] guard; dropping the guard restores the transform that
//! was current when it was taken, so scopes always balance.
//!
//! Built lists live in a [`DisplayLists`] arena and are referenced by
//! [`ListHandle`]. [`DisplayLists::flatten`] resolves a list tree into world
//! space [`DrawCall`]s for the renderer.

use std::ops::{Deref, DerefMut};

use cgmath::{Deg, InnerSpace, Matrix4, SquareMatrix, Vector3};

use crate::{
    data_structures::{
        material::{Appearance, Colour, Material, Paint},
        mesh::Primitive,
    },
    resources::MeshHandle,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListHandle(usize);

#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Mesh(MeshHandle),
    List(ListHandle),
    Immediate(Primitive),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub transform: Matrix4<f32>,
    pub paint: Paint,
    pub geometry: Geometry,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DisplayList {
    pub name: String,
    pub steps: Vec<Step>,
}

impl DisplayList {
    pub fn record(name: impl Into<String>) -> ListRecorder {
        ListRecorder::new(name)
    }
}

/// Builds a [`DisplayList`] the way a fixed-function pipeline would be driven:
/// transforms compose onto the current matrix and colour or material changes
/// stick until changed again.
#[derive(Debug)]
pub struct ListRecorder {
    name: String,
    steps: Vec<Step>,
    current: Matrix4<f32>,
    saved: Vec<Matrix4<f32>>,
    paint: Paint,
}

impl ListRecorder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
            current: Matrix4::identity(),
            saved: Vec::new(),
            paint: Paint::default(),
        }
    }

    /// Save the current transform until the returned scope is dropped.
    pub fn push(&mut self) -> TransformScope<'_> {
        self.saved.push(self.current);
        TransformScope { recorder: self }
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn transform(&self) -> Matrix4<f32> {
        self.current
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.current = self.current * Matrix4::from_translation(Vector3::new(x, y, z));
        self
    }

    /// Rotate by `degrees` around `axis`, counter-clockwise looking down the axis.
    pub fn rotate(&mut self, degrees: f32, axis: Vector3<f32>) -> &mut Self {
        self.current = self.current * Matrix4::from_axis_angle(axis.normalize(), Deg(degrees));
        self
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.current = self.current * Matrix4::from_nonuniform_scale(x, y, z);
        self
    }

    pub fn colour(&mut self, colour: Colour) -> &mut Self {
        self.paint.colour = Some(colour);
        self
    }

    pub fn material(&mut self, material: Material) -> &mut Self {
        self.paint.material = Some(material);
        self
    }

    pub fn draw(&mut self, mesh: MeshHandle) -> &mut Self {
        self.emit(Geometry::Mesh(mesh))
    }

    pub fn call(&mut self, list: ListHandle) -> &mut Self {
        self.emit(Geometry::List(list))
    }

    pub fn immediate(&mut self, primitive: Primitive) -> &mut Self {
        self.emit(Geometry::Immediate(primitive))
    }

    fn emit(&mut self, geometry: Geometry) -> &mut Self {
        self.steps.push(Step {
            transform: self.current,
            paint: self.paint,
            geometry,
        });
        self
    }

    fn pop(&mut self) {
        match self.saved.pop() {
            Some(saved) => self.current = saved,
            None => log::error!("Transform stack of '{}' popped while empty", self.name),
        }
    }

    pub fn finish(self) -> DisplayList {
        assert!(
            self.saved.is_empty(),
            "display list '{}' finished with {} unbalanced transform scopes",
            self.name,
            self.saved.len()
        );
        DisplayList {
            name: self.name,
            steps: self.steps,
        }
    }
}

/// Guard returned by [`ListRecorder::push`].
///
/// Dereferences to the recorder so a whole push/transform/draw/pop sequence
/// can be written as one chained statement.
#[derive(Debug)]
pub struct TransformScope<'r> {
    recorder: &'r mut ListRecorder,
}

impl Deref for TransformScope<'_> {
    type Target = ListRecorder;

    fn deref(&self) -> &Self::Target {
        self.recorder
    }
}

impl DerefMut for TransformScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.recorder
    }
}

impl Drop for TransformScope<'_> {
    fn drop(&mut self) {
        self.recorder.pop();
    }
}

/// A single world space draw produced by [`DisplayLists::flatten`].
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCall<'a> {
    pub transform: Matrix4<f32>,
    pub appearance: Appearance,
    pub geometry: DrawGeometry<'a>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawGeometry<'a> {
    Mesh(MeshHandle),
    Immediate(&'a Primitive),
}

/// Arena of built display lists.
#[derive(Debug, Default)]
pub struct DisplayLists {
    lists: Vec<DisplayList>,
}

impl DisplayLists {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, list: DisplayList) -> ListHandle {
        self.lists.push(list);
        ListHandle(self.lists.len() - 1)
    }

    pub fn get(&self, handle: ListHandle) -> &DisplayList {
        &self.lists[handle.0]
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Resolve `root` and every list it references into world space draws,
    /// in recording order.
    pub fn flatten<'a>(&'a self, root: &'a DisplayList) -> Vec<DrawCall<'a>> {
        let mut draws = Vec::new();
        self.walk(root, Matrix4::identity(), &Appearance::default(), &mut draws);
        draws
    }

    fn walk<'a>(
        &'a self,
        list: &'a DisplayList,
        parent: Matrix4<f32>,
        inherited: &Appearance,
        draws: &mut Vec<DrawCall<'a>>,
    ) {
        for step in &list.steps {
            let transform = parent * step.transform;
            let appearance = step.paint.resolve(inherited);
            match &step.geometry {
                Geometry::Mesh(mesh) => draws.push(DrawCall {
                    transform,
                    appearance,
                    geometry: DrawGeometry::Mesh(*mesh),
                }),
                Geometry::Immediate(primitive) => draws.push(DrawCall {
                    transform,
                    appearance,
                    geometry: DrawGeometry::Immediate(primitive),
                }),
                Geometry::List(handle) => {
                    self.walk(self.get(*handle), transform, &appearance, draws)
                }
            }
        }
    }
}
