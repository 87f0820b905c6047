use super::helpers;
use drift_core::Cluster;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PointGlobals {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) model: [[f32; 4]; 4],
    /// Projection diagonal (x, y) for view-space sprite offsets.
    pub(crate) proj_scale: [f32; 2],
    pub(crate) point_size: f32,
    pub(crate) intensity: f32,
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ClusterStyle {
    color: [f32; 4],
}

/// GPU copy of one cluster's position buffer plus its color.
struct ClusterGpu {
    positions: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    count: u32,
}

pub(crate) struct PointsResources {
    pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bg: wgpu::BindGroup,
    clusters: Vec<ClusterGpu>,
}

impl PointsResources {
    pub(crate) fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        hdr_format: wgpu::TextureFormat,
        clusters: &[Cluster],
    ) -> Self {
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("points_globals_bgl"),
            entries: &[helpers::uniform_entry(
                0,
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            )],
        });
        let style_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("points_style_bgl"),
            entries: &[helpers::uniform_entry(0, wgpu::ShaderStages::FRAGMENT)],
        });
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("points_pl"),
            bind_group_layouts: &[&globals_bgl, &style_bgl],
            push_constant_ranges: &[],
        });
        let additive = wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        };
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("points_pipeline"),
            layout: Some(&pl),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_points"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<glam::Vec3>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_points"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: hdr_format,
                    blend: Some(wgpu::BlendState {
                        color: additive,
                        alpha: additive,
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("points_globals"),
            size: std::mem::size_of::<PointGlobals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("points_globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let clusters = clusters
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let positions = device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some(&format!("cluster_{i}_positions")),
                    size: c.position_bytes().len().max(16) as u64,
                    usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });
                let style = ClusterStyle {
                    color: [c.color[0], c.color[1], c.color[2], 1.0],
                };
                let style_buffer = device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some(&format!("cluster_{i}_style")),
                    size: std::mem::size_of::<ClusterStyle>() as u64,
                    usage: wgpu::BufferUsages::UNIFORM,
                    mapped_at_creation: true,
                });
                style_buffer
                    .slice(..)
                    .get_mapped_range_mut()
                    .copy_from_slice(bytemuck::bytes_of(&style));
                style_buffer.unmap();
                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some(&format!("cluster_{i}_bg")),
                    layout: &style_bgl,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: style_buffer.as_entire_binding(),
                    }],
                });
                ClusterGpu {
                    positions,
                    bind_group,
                    count: c.len() as u32,
                }
            })
            .collect();

        Self {
            pipeline,
            globals_buffer,
            globals_bg,
            clusters,
        }
    }

    pub(crate) fn write_globals(&self, queue: &wgpu::Queue, globals: &PointGlobals) {
        queue.write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(globals));
    }

    /// Re-uploads the positions of clusters the simulation touched since the
    /// last upload. Returns how many were written.
    pub(crate) fn upload_dirty(&self, queue: &wgpu::Queue, clusters: &mut [Cluster]) -> usize {
        let mut written = 0;
        for (gpu, cluster) in self.clusters.iter().zip(clusters.iter_mut()) {
            if cluster.take_dirty() {
                queue.write_buffer(&gpu.positions, 0, cluster.position_bytes());
                written += 1;
            }
        }
        written
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.globals_bg, &[]);
        for c in &self.clusters {
            rpass.set_bind_group(1, &c.bind_group, &[]);
            rpass.set_vertex_buffer(0, c.positions.slice(..));
            rpass.draw(0..6, 0..c.count);
        }
    }
}
