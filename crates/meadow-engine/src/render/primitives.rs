use std::borrow::Cow;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DisplayMode, DrawCmd, DrawList, PrimitiveKind};

use super::mesh::{Mesh, MeshVertex, SpriteVertex};
use super::topology::{topology, Topology};

/// Renderer for every `DrawCmd` in a `DrawList`.
///
/// One pipeline per `Topology`; the display mode picks which pipeline and which index
/// buffer each primitive uses. Commands are drawn strictly in recording order, with
/// consecutive commands of the same kind batched into one instanced call.
///
/// Point mode draws each point as a `POINT_SIZE` pixel quad, sized against the viewport
/// uniform.
///
/// Colors are expected to be premultiplied RGBA (`paint::Color`).
#[derive(Default)]
pub struct PrimitiveRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipelines: Option<[wgpu::RenderPipeline; 3]>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    meshes: Vec<GpuMesh>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,

    instances: Vec<PrimitiveInstance>,
}

/// Static buffers for one primitive kind: mesh and sprite vertices, one index buffer per
/// topology. The points index buffer addresses `sprite_vbo`.
struct GpuMesh {
    vbo: wgpu::Buffer,
    sprite_vbo: wgpu::Buffer,
    ibos: [wgpu::Buffer; 3],
    index_counts: [u32; 3],
}

impl GpuMesh {
    fn vertices_for(&self, topo: Topology) -> &wgpu::Buffer {
        match topo {
            Topology::Points => &self.sprite_vbo,
            Topology::Triangles | Topology::Lines => &self.vbo,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ViewportUniform {
    viewport: [f32; 2],
    _pad: [f32; 2], // 16-byte alignment
}

impl ViewportUniform {
    fn new(viewport: [f32; 2]) -> Self {
        Self {
            viewport: [viewport[0].max(1.0), viewport[1].max(1.0)],
            _pad: [0.0; 2],
        }
    }
}

impl PrimitiveRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `draw_list` into `target` using `mode`'s topologies.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &DrawList,
        mode: DisplayMode,
    ) {
        if draw_list.is_empty() {
            return;
        }

        self.ensure_pipelines(ctx);
        self.ensure_bindings(ctx);
        self.ensure_static_buffers(ctx);
        self.write_viewport_uniform(ctx);

        self.instances.clear();
        self.instances
            .extend(draw_list.items().iter().map(PrimitiveInstance::from_cmd));

        self.ensure_instance_capacity(ctx, self.instances.len());

        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };
        ctx.queue
            .write_buffer(instance_vbo, 0, bytemuck::cast_slice(&self.instances));

        let Some(pipelines) = self.pipelines.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("meadow primitive pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));

        let items = draw_list.items();
        let mut bound: Option<Topology> = None;
        let mut i = 0usize;
        while i < items.len() {
            let kind = items[i].kind;
            let mut j = i + 1;
            while j < items.len() && items[j].kind == kind {
                j += 1;
            }

            let topo = topology(kind, mode);
            if bound != Some(topo) {
                rpass.set_pipeline(&pipelines[topo.index()]);
                bound = Some(topo);
            }

            let mesh = &self.meshes[kind.index()];
            let t = topo.index();
            rpass.set_vertex_buffer(0, mesh.vertices_for(topo).slice(..));
            rpass.set_index_buffer(mesh.ibos[t].slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..mesh.index_counts[t], 0, i as u32..j as u32);

            i = j;
        }
    }

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipelines.is_some() {
            return;
        }

        let shader_src = include_str!("shaders/primitive.wgsl");
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("meadow primitive shader"),
            source: wgpu::ShaderSource::Wgsl(shader_src.into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("meadow primitive bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: wgpu::BufferSize::new(
                                std::mem::size_of::<ViewportUniform>() as u64,
                            ),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("meadow primitive pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let mesh_buffers = [MeshVertex::layout(), PrimitiveInstance::layout()];
        let sprite_buffers = [SpriteVertex::layout(), PrimitiveInstance::layout()];

        let build = |topo: Topology| {
            ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(match topo {
                    Topology::Triangles => "meadow primitive pipeline (triangles)",
                    Topology::Lines => "meadow primitive pipeline (lines)",
                    Topology::Points => "meadow primitive pipeline (points)",
                }),
                layout: Some(&pipeline_layout),

                vertex: match topo {
                    Topology::Points => wgpu::VertexState {
                        module: &shader,
                        entry_point: Some("vs_point"),
                        compilation_options: Default::default(),
                        buffers: &sprite_buffers,
                    },
                    Topology::Triangles | Topology::Lines => wgpu::VertexState {
                        module: &shader,
                        entry_point: Some("vs_main"),
                        compilation_options: Default::default(),
                        buffers: &mesh_buffers,
                    },
                },

                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: topo.to_wgpu(),
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        };

        self.pipelines = Some([
            build(Topology::Triangles),
            build(Topology::Lines),
            build(Topology::Points),
        ]);
        self.pipeline_format = Some(ctx.surface_format);
        self.bind_group_layout = Some(bind_group_layout);

        self.bind_group = None;
        self.viewport_ubo = None;

        log::debug!("primitive pipelines built for {:?}", ctx.surface_format);
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let viewport_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("meadow primitive viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("meadow primitive bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }

    fn write_viewport_uniform(&self, ctx: &RenderCtx<'_>) {
        let Some(ubo) = self.viewport_ubo.as_ref() else { return };
        let u = ViewportUniform::new(ctx.viewport);
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if !self.meshes.is_empty() {
            return;
        }

        self.meshes = PrimitiveKind::ALL
            .iter()
            .map(|&kind| {
                let mesh = Mesh::for_kind(kind);

                let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("meadow primitive vbo"),
                    contents: bytemuck::cast_slice(&mesh.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });

                let sprites = mesh.point_sprites();
                let sprite_vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("meadow point sprite vbo"),
                    contents: bytemuck::cast_slice(&sprites.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });

                let mut index_counts = [0u32; 3];
                let ibos = Topology::ALL.map(|topo| {
                    let indices = match topo {
                        Topology::Points => Cow::Borrowed(sprites.indices.as_slice()),
                        Topology::Triangles | Topology::Lines => mesh.indices_for(topo),
                    };
                    index_counts[topo.index()] = indices.len() as u32;
                    ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("meadow primitive ibo"),
                        contents: bytemuck::cast_slice(&indices),
                        usage: wgpu::BufferUsages::INDEX,
                    })
                });

                GpuMesh { vbo, sprite_vbo, ibos, index_counts }
            })
            .collect();
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required_instances: usize) {
        if required_instances <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }

        let new_cap = required_instances.next_power_of_two().max(128);
        let new_size = (new_cap * std::mem::size_of::<PrimitiveInstance>()) as u64;

        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("meadow primitive instance vbo"),
            size: new_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct PrimitiveInstance {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

impl PrimitiveInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x4, // model col 0
        2 => Float32x4, // model col 1
        3 => Float32x4, // model col 2
        4 => Float32x4, // model col 3
        5 => Float32x4  // color
    ];

    fn from_cmd(cmd: &DrawCmd) -> Self {
        Self {
            model: cmd.transform.to_cols_array_2d(),
            color: cmd.color.to_array(),
        }
    }

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PrimitiveInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_layout_matches_struct_size() {
        assert_eq!(std::mem::size_of::<PrimitiveInstance>(), 80);
        assert_eq!(PrimitiveInstance::layout().array_stride, 80);
    }

    #[test]
    fn sprite_layout_does_not_collide_with_instance_locations() {
        let instance: Vec<u32> =
            PrimitiveInstance::ATTRS.iter().map(|a| a.shader_location).collect();
        for attr in SpriteVertex::layout().attributes {
            assert!(!instance.contains(&attr.shader_location), "{}", attr.shader_location);
        }
        assert_eq!(SpriteVertex::layout().array_stride, 16);
    }

    #[test]
    fn viewport_uniform_is_16_bytes_and_never_zero() {
        assert_eq!(std::mem::size_of::<ViewportUniform>(), 16);
        let u = ViewportUniform::new([0.0, 600.0]);
        assert_eq!(u.viewport, [1.0, 600.0]);
    }
}
