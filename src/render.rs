//! Frame assembly and pipeline batching.
//!
//! A flattened display list is turned into a [`Frame`]: one vertex/index
//! buffer for the frame's immediate geometry, one instance buffer for every
//! draw, and a [`Render`] tree saying which pipeline draws which range.
//!
//! # Key types
//!
//! - [`Render`] composes draws for the basic and transparent pipelines
//! - [`Instanced`] is one instanced draw call: a geometry source plus a range
//!   of instances
//! - [`FrameBuffers`] holds the GPU side of a [`Frame`]
//!
//! Opaque draws of the same cached mesh are grouped into a single instanced
//! call. Translucent draws keep their recording order.

use std::{collections::BTreeMap, ops::Range};

use wgpu::util::DeviceExt;

use crate::{
    data_structures::{
        display_list::{DrawCall, DrawGeometry},
        instance::{Instance, InstanceRaw},
        model::ModelVertex,
    },
    resources::{MeshHandle, mesh::append_primitive},
};

/// Where an instanced draw takes its vertices from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    /// A mesh uploaded once at startup.
    Mesh(MeshHandle),
    /// A range of the frame's own index buffer.
    Immediate { indices: Range<u32> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instanced {
    pub source: Source,
    pub instances: Range<u32>,
}

/// Specifies how a part of the frame is rendered.
///
/// - `None` renders nothing
/// - `Default(Instanced)` renders a single opaque draw
/// - `Defaults(Vec<Instanced>)` renders a batch of opaque draws
/// - `Transparent(Instanced)` renders a single blended draw
/// - `Transparents(Vec<Instanced>)` renders a batch of blended draws in order
/// - `Composed(Vec<Render>)` recursively renders a composition of renders
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Render {
    None,
    Default(Instanced),
    Defaults(Vec<Instanced>),
    Transparent(Instanced),
    Transparents(Vec<Instanced>),
    Composed(Vec<Render>),
}

impl Render {
    pub fn set_pipelines(self, basics: &mut Vec<Instanced>, trans: &mut Vec<Instanced>) {
        match self {
            Render::Default(instanced) => basics.push(instanced),
            Render::Defaults(mut vec) => basics.append(&mut vec),
            Render::Transparent(instanced) => trans.push(instanced),
            Render::Transparents(mut vec) => trans.append(&mut vec),
            Render::Composed(renders) => renders
                .into_iter()
                .for_each(|render| render.set_pipelines(basics, trans)),
            Render::None => (),
        }
    }
}

/// CPU side of one frame.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
    pub instances: Vec<InstanceRaw>,
    pub render: Render,
}

impl Default for Render {
    fn default() -> Self {
        Render::None
    }
}

impl Frame {
    /// Batch `draws` for the pipelines.
    ///
    /// Opaque immediate geometry comes first, then opaque cached meshes grouped
    /// by mesh, then every translucent draw in recording order.
    pub fn build(draws: &[DrawCall<'_>]) -> Self {
        let mut frame = Frame::default();
        let mut immediates = Vec::new();
        let mut meshes: BTreeMap<MeshHandle, Vec<InstanceRaw>> = BTreeMap::new();
        let mut translucent = Vec::new();

        for draw in draws {
            let instance = Instance::from(draw);
            if instance.is_translucent() {
                translucent.push((draw.geometry, instance.to_raw()));
                continue;
            }
            match draw.geometry {
                DrawGeometry::Mesh(handle) => {
                    meshes.entry(handle).or_default().push(instance.to_raw())
                }
                DrawGeometry::Immediate(_) => immediates.push((draw.geometry, instance.to_raw())),
            }
        }

        let opaque_immediates: Vec<Instanced> = immediates
            .into_iter()
            .map(|(geometry, raw)| frame.push_single(geometry, raw))
            .collect();

        let opaque_meshes: Vec<Instanced> = meshes
            .into_iter()
            .map(|(handle, raws)| {
                let start = frame.instances.len() as u32;
                frame.instances.extend(raws);
                Instanced {
                    source: Source::Mesh(handle),
                    instances: start..frame.instances.len() as u32,
                }
            })
            .collect();

        let blended: Vec<Instanced> = translucent
            .into_iter()
            .map(|(geometry, raw)| frame.push_single(geometry, raw))
            .collect();

        log::trace!(
            "Frame: {} draws, {} immediate vertices, {} opaque batches, {} blended",
            draws.len(),
            frame.vertices.len(),
            opaque_immediates.len() + opaque_meshes.len(),
            blended.len()
        );

        frame.render = Render::Composed(vec![
            Render::Defaults(opaque_immediates),
            Render::Defaults(opaque_meshes),
            Render::Transparents(blended),
        ]);
        frame
    }

    fn push_single(&mut self, geometry: DrawGeometry<'_>, raw: InstanceRaw) -> Instanced {
        let instance = self.instances.len() as u32;
        self.instances.push(raw);
        let source = match geometry {
            DrawGeometry::Mesh(handle) => Source::Mesh(handle),
            DrawGeometry::Immediate(primitive) => {
                let start = self.indices.len() as u32;
                append_primitive(primitive, &mut self.vertices, &mut self.indices);
                Source::Immediate {
                    indices: start..self.indices.len() as u32,
                }
            }
        };
        Instanced {
            source,
            instances: instance..instance + 1,
        }
    }

    /// Upload the frame. Immediate buffers are only created when the frame has
    /// immediate geometry.
    pub fn upload(&self, device: &wgpu::Device) -> FrameBuffers {
        let immediate = (!self.indices.is_empty()).then(|| {
            let vertex = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Frame Vertex Buffer"),
                contents: bytemuck::cast_slice(&self.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let index = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Frame Index Buffer"),
                contents: bytemuck::cast_slice(&self.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
            (vertex, index)
        });
        let instance = (!self.instances.is_empty()).then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Frame Instance Buffer"),
                contents: bytemuck::cast_slice(&self.instances),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });
        FrameBuffers {
            immediate,
            instance,
        }
    }
}

pub struct FrameBuffers {
    /// Vertex and index buffer of the frame's immediate geometry.
    pub immediate: Option<(wgpu::Buffer, wgpu::Buffer)>,
    pub instance: Option<wgpu::Buffer>,
}
