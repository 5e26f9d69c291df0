use crate::geometry::{MeshData, Vertex};
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use lightlab_kernel::{LightShape, SceneRegistry, Shape, Tint};
use lightlab_render::CameraView;
use std::collections::BTreeMap;
use wgpu::util::DeviceExt;

/// Lights beyond this count are not drawn.
pub const MAX_LIGHTS: usize = 8;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const MAX_LINE_VERTICES: usize = 4096;
const CLEAR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Pod, Zeroable)]
struct GpuLight {
    position: [f32; 4],
    color: [f32; 4],
    direction: [f32; 4],
    params: [f32; 4],
    ground: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct MeshUniforms {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    light_count: [u32; 4],
    lights: [GpuLight; MAX_LIGHTS],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct LineUniforms {
    view_proj: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct InstanceData {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
    material: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct LineVertex {
    position: [f32; 3],
    color: [f32; 4],
}

/// Pack the scene's lights into the shader layout, in registration order.
fn pack_lights(scene: &SceneRegistry) -> (u32, [GpuLight; MAX_LIGHTS]) {
    let mut out = [GpuLight::default(); MAX_LIGHTS];
    let mut count = 0;
    for light in scene.lights().take(MAX_LIGHTS) {
        let c = light.color;
        let mut g = GpuLight {
            color: [c.r, c.g, c.b, light.intensity],
            ..GpuLight::default()
        };
        let kind = light.kind() as u32 as f32;
        let at = |p: glam::Vec3| [p.x, p.y, p.z, kind];
        match light.shape {
            LightShape::Ambient => g.position = [0.0, 0.0, 0.0, kind],
            LightShape::Directional { position, target } => {
                g.position = at(position);
                let d = (target - position).normalize_or_zero();
                g.direction = [d.x, d.y, d.z, 0.0];
            }
            LightShape::Hemisphere {
                position,
                ground_color,
            } => {
                g.position = at(position);
                g.ground = [ground_color.r, ground_color.g, ground_color.b, 0.0];
            }
            LightShape::Point {
                position,
                distance,
                decay,
            } => {
                g.position = at(position);
                g.direction[3] = distance;
                g.params[0] = decay;
            }
            LightShape::RectArea {
                position,
                width,
                height,
                facing,
            } => {
                g.position = at(position);
                let d = facing.normalize_or_zero();
                g.direction = [d.x, d.y, d.z, 0.0];
                g.ground[3] = width * height;
            }
            LightShape::Spot {
                position,
                target,
                distance,
                angle,
                penumbra,
                decay,
            } => {
                g.position = at(position);
                let d = (target - position).normalize_or_zero();
                g.direction = [d.x, d.y, d.z, distance];
                g.params = [
                    decay,
                    angle.cos(),
                    (angle * (1.0 - penumbra)).cos(),
                    0.0,
                ];
            }
        }
        out[count] = g;
        count += 1;
    }
    (count as u32, out)
}

/// Helper segments as a line list, tinted with their light's colors.
fn helper_lines(scene: &SceneRegistry) -> Vec<LineVertex> {
    let mut verts = Vec::new();
    for helper in scene.helpers() {
        let Ok(light) = scene.light(&helper.light) else {
            continue;
        };
        let ground = match light.shape {
            LightShape::Hemisphere { ground_color, .. } => ground_color,
            _ => light.color,
        };
        for s in &helper.segments {
            let c = match s.tint {
                Tint::Primary => light.color,
                Tint::Ground => ground,
            };
            let color = [c.r, c.g, c.b, 1.0];
            verts.push(LineVertex {
                position: s.a.to_array(),
                color,
            });
            verts.push(LineVertex {
                position: s.b.to_array(),
                color,
            });
        }
    }
    verts.truncate(MAX_LINE_VERTICES);
    verts
}

struct GpuMesh {
    shape: Shape,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn new(device: &wgpu::Device, name: &str, shape: Shape) -> Self {
        let data = MeshData::for_shape(&shape);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name}_vertices")),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{name}_indices")),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            shape,
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
        }
    }
}

/// Offscreen color and depth targets at render resolution.
struct SceneTargets {
    size: (u32, u32),
    color: wgpu::TextureView,
    depth: wgpu::TextureView,
    blit_bind_group: wgpu::BindGroup,
}

impl SceneTargets {
    fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        width: u32,
        height: u32,
    ) -> Self {
        let size = (width.max(1), height.max(1));
        let texture = |label, format, usage| {
            device
                .create_texture(&wgpu::TextureDescriptor {
                    label: Some(label),
                    size: wgpu::Extent3d {
                        width: size.0,
                        height: size.1,
                        depth_or_array_layers: 1,
                    },
                    mip_level_count: 1,
                    sample_count: 1,
                    dimension: wgpu::TextureDimension::D2,
                    format,
                    usage,
                    view_formats: &[],
                })
                .create_view(&Default::default())
        };
        let color = texture(
            "scene_color",
            format,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        );
        let depth = texture(
            "scene_depth",
            DEPTH_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        let blit_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("blit_bind_group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&color),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });
        Self {
            size,
            color,
            depth,
            blit_bind_group,
        }
    }
}

fn uniform_layout(
    device: &wgpu::Device,
    label: &str,
    visibility: wgpu::ShaderStages,
) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

fn depth_state() -> Option<wgpu::DepthStencilState> {
    Some(wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: Default::default(),
        bias: Default::default(),
    })
}

/// wgpu scene renderer: lit meshes plus helper lines, drawn offscreen at
/// render resolution and scaled onto the output view.
pub struct SceneRenderer {
    mesh_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    blit_pipeline: wgpu::RenderPipeline,
    mesh_uniforms: wgpu::Buffer,
    mesh_bind_group: wgpu::BindGroup,
    line_uniforms: wgpu::Buffer,
    line_bind_group: wgpu::BindGroup,
    line_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    max_instances: u32,
    blit_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    meshes: BTreeMap<String, GpuMesh>,
    targets: SceneTargets,
    format: wgpu::TextureFormat,
}

impl SceneRenderer {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, width: u32, height: u32) -> Self {
        let mesh_uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("mesh_uniforms"),
            size: std::mem::size_of::<MeshUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let mesh_layout = uniform_layout(
            device,
            "mesh_uniform_layout",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );
        let mesh_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("mesh_bind_group"),
            layout: &mesh_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: mesh_uniforms.as_entire_binding(),
            }],
        });

        let line_uniforms = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("line_uniforms"),
            contents: bytemuck::bytes_of(&LineUniforms {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let line_layout = uniform_layout(device, "line_uniform_layout", wgpu::ShaderStages::VERTEX);
        let line_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("line_bind_group"),
            layout: &line_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: line_uniforms.as_entire_binding(),
            }],
        });

        let mesh_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::MESH_SHADER.into()),
        });
        let mesh_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_pipeline_layout"),
            bind_group_layouts: &[&mesh_layout],
            push_constant_ranges: &[],
        });
        let mesh_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh_pipeline"),
            layout: Some(&mesh_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &mesh_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<Vertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![
                            0 => Float32x3,
                            1 => Float32x3,
                        ],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<InstanceData>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![
                            2 => Float32x4,
                            3 => Float32x4,
                            4 => Float32x4,
                            5 => Float32x4,
                            6 => Float32x4,
                        ],
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &mesh_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // the ground plane is seen from both sides
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: depth_state(),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let line_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("line_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::LINE_SHADER.into()),
        });
        let line_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("line_pipeline_layout"),
            bind_group_layouts: &[&line_layout],
            push_constant_ranges: &[],
        });
        let line_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("line_pipeline"),
            layout: Some(&line_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &line_shader,
                entry_point: Some("vs_line"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<LineVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x4,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &line_shader,
                entry_point: Some("fs_line"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: depth_state(),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let blit_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("blit_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let blit_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("blit_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::BLIT_SHADER.into()),
        });
        let blit_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("blit_pipeline_layout"),
            bind_group_layouts: &[&blit_layout],
            push_constant_ranges: &[],
        });
        let blit_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("blit_pipeline"),
            layout: Some(&blit_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &blit_shader,
                entry_point: Some("vs_blit"),
                compilation_options: Default::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &blit_shader,
                entry_point: Some("fs_blit"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: Default::default(),
            depth_stencil: None,
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("blit_sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let max_instances = 64u32;
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_buffer"),
            size: max_instances as u64 * std::mem::size_of::<InstanceData>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let line_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("helper_lines"),
            size: (MAX_LINE_VERTICES * std::mem::size_of::<LineVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let targets = SceneTargets::new(device, format, &blit_layout, &sampler, width, height);

        Self {
            mesh_pipeline,
            line_pipeline,
            blit_pipeline,
            mesh_uniforms,
            mesh_bind_group,
            line_uniforms,
            line_bind_group,
            line_buffer,
            instance_buffer,
            max_instances,
            blit_layout,
            sampler,
            meshes: BTreeMap::new(),
            targets,
            format,
        }
    }

    /// Set the offscreen render resolution.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if self.targets.size == (width.max(1), height.max(1)) {
            return;
        }
        self.targets = SceneTargets::new(
            device,
            self.format,
            &self.blit_layout,
            &self.sampler,
            width,
            height,
        );
        tracing::debug!(width, height, "render resolution changed");
    }

    pub fn render_size(&self) -> (u32, u32) {
        self.targets.size
    }

    /// Upload geometry for meshes not seen before and rebuild any whose
    /// shape changed.
    fn sync_meshes(&mut self, device: &wgpu::Device, scene: &SceneRegistry) {
        for mesh in scene.meshes() {
            let stale = self
                .meshes
                .get(&mesh.name)
                .is_none_or(|gpu| gpu.shape != mesh.shape);
            if stale {
                self.meshes
                    .insert(mesh.name.clone(), GpuMesh::new(device, &mesh.name, mesh.shape));
            }
        }
    }

    /// Draw the scene into `output`.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        output: &wgpu::TextureView,
        scene: &SceneRegistry,
        camera: &CameraView,
    ) {
        self.sync_meshes(device, scene);

        let vp = camera.view_projection().to_cols_array_2d();
        let (light_count, lights) = pack_lights(scene);
        queue.write_buffer(
            &self.mesh_uniforms,
            0,
            bytemuck::bytes_of(&MeshUniforms {
                view_proj: vp,
                camera_pos: camera.eye.extend(1.0).to_array(),
                light_count: [light_count, 0, 0, 0],
                lights,
            }),
        );
        queue.write_buffer(
            &self.line_uniforms,
            0,
            bytemuck::bytes_of(&LineUniforms { view_proj: vp }),
        );

        let mut draws = Vec::new();
        let mut instances = Vec::new();
        for mesh in scene.meshes().take(self.max_instances as usize) {
            let Some(gpu) = self.meshes.get(&mesh.name) else {
                continue;
            };
            let material = scene
                .material(&mesh.material)
                .map(|m| [m.color.r, m.color.g, m.color.b, m.roughness])
                .unwrap_or([1.0, 1.0, 1.0, 1.0]);
            let cols = mesh.transform.matrix().to_cols_array_2d();
            draws.push((gpu, instances.len() as u32));
            instances.push(InstanceData {
                model_0: cols[0],
                model_1: cols[1],
                model_2: cols[2],
                model_3: cols[3],
                material,
            });
        }
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }

        let lines = helper_lines(scene);
        if !lines.is_empty() {
            queue.write_buffer(&self.line_buffer, 0, bytemuck::cast_slice(&lines));
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("scene_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.color,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_pipeline(&self.mesh_pipeline);
            pass.set_bind_group(0, &self.mesh_bind_group, &[]);
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            for (gpu, instance) in &draws {
                pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
                pass.set_index_buffer(gpu.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..gpu.index_count, 0, *instance..*instance + 1);
            }

            if !lines.is_empty() {
                pass.set_pipeline(&self.line_pipeline);
                pass.set_bind_group(0, &self.line_bind_group, &[]);
                pass.set_vertex_buffer(0, self.line_buffer.slice(..));
                pass.draw(0..lines.len() as u32, 0..1);
            }
        }

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("blit_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: output,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });
            pass.set_pipeline(&self.blit_pipeline);
            pass.set_bind_group(0, &self.targets.blit_bind_group, &[]);
            pass.draw(0..3, 0..1);
        }

        queue.submit(std::iter::once(encoder.finish()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightlab_kernel::preset::showcase;

    #[test]
    fn uniform_layout_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<GpuLight>(), 80);
        assert_eq!(std::mem::size_of::<MeshUniforms>() % 16, 0);
    }

    #[test]
    fn showcase_lights_pack_in_order() {
        let (scene, _) = showcase().unwrap();
        let (count, lights) = pack_lights(&scene);
        assert_eq!(count, 6);
        let kinds: Vec<f32> = lights[..6].iter().map(|l| l.position[3]).collect();
        assert_eq!(kinds, [0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        // spot: inner cone is wider than outer in cosine terms
        let spot = lights[5];
        assert!(spot.params[2] > spot.params[1]);
        assert_eq!(spot.direction[3], 10.0);
    }

    #[test]
    fn helper_lines_use_light_colors() {
        let (scene, _) = showcase().unwrap();
        let lines = helper_lines(&scene);
        let segments: usize = scene.helpers().map(|h| h.segments.len()).sum();
        assert_eq!(lines.len(), segments * 2);
        let point = scene.light("point").unwrap().color;
        assert!(
            lines
                .iter()
                .any(|v| v.color == [point.r, point.g, point.b, 1.0])
        );
    }
}
