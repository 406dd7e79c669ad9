use crate::geometry::SceneArtifacts;
use crate::geometry::mesh::TriangleMesh;
use crate::geometry::presentation::{Colorscale, LAYOUT};
use crate::renderer::camera::{Camera, CameraUniform};

const MAX_SURFACE_VERTICES: usize = 4096;
const MAX_SURFACE_INDICES: usize = 16384;
const MAX_OUTLINE_VERTICES: usize = 256;
const MAX_AXES_VERTICES: usize = 256;

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SurfaceParams {
    pub color_start: [f32; 4],
    pub color_end: [f32; 4],
    pub opacity: f32,
    pub height_min: f32,
    pub height_max: f32,
    pub _pad: f32,
}

impl SurfaceParams {
    fn new(scale: Colorscale, opacity: f32, height_range: (f32, f32)) -> Self {
        Self {
            color_start: [scale.start[0], scale.start[1], scale.start[2], 1.0],
            color_end: [scale.end[0], scale.end[1], scale.end[2], 1.0],
            opacity,
            height_min: height_range.0,
            height_max: height_range.1,
            _pad: 0.0,
        }
    }
}

/// GPU-side storage for one textured surface (shell or liquid).
pub struct SurfaceBuffers {
    pub vertex_buffer: wgpu::Buffer,
    pub normal_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub param_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub opacity: f32,
}

impl SurfaceBuffers {
    fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
        label: &str,
    ) -> Self {
        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            size: (MAX_SURFACE_VERTICES * 3 * 4) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let normal_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label} Normal Buffer")),
            size: (MAX_SURFACE_VERTICES * 3 * 4) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            size: (MAX_SURFACE_INDICES * 4) as u64,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let param_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label} Param Buffer")),
            size: std::mem::size_of::<SurfaceParams>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} Bind Group")),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: param_buffer.as_entire_binding(),
                },
            ],
        });

        Self {
            vertex_buffer,
            normal_buffer,
            index_buffer,
            index_count: 0,
            param_buffer,
            bind_group,
            opacity: 1.0,
        }
    }

    fn upload(&mut self, queue: &wgpu::Queue, mesh: &TriangleMesh, params: SurfaceParams) {
        let vertex_count = mesh.vertices.len().min(MAX_SURFACE_VERTICES * 3);
        let index_count = mesh.indices.len().min(MAX_SURFACE_INDICES);

        queue.write_buffer(
            &self.vertex_buffer,
            0,
            bytemuck::cast_slice(&mesh.vertices[..vertex_count]),
        );
        queue.write_buffer(
            &self.normal_buffer,
            0,
            bytemuck::cast_slice(&mesh.normals[..vertex_count]),
        );
        queue.write_buffer(
            &self.index_buffer,
            0,
            bytemuck::cast_slice(&mesh.indices[..index_count]),
        );
        queue.write_buffer(&self.param_buffer, 0, bytemuck::cast_slice(&[params]));

        self.index_count = index_count as u32;
        self.opacity = params.opacity;
    }
}

/// All per-scene GPU storage: the two surfaces, the outline ring, the axes.
pub struct SceneBuffers {
    pub cone: SurfaceBuffers,
    pub liquid: SurfaceBuffers,

    pub outline_vertex_buffer: wgpu::Buffer,
    pub outline_vertex_count: u32,

    pub axes_vertex_buffer: wgpu::Buffer,
    pub axes_vertex_count: u32,
}

impl SceneBuffers {
    fn new(
        device: &wgpu::Device,
        surface_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
    ) -> Self {
        let cone = SurfaceBuffers::new(device, surface_layout, camera_buffer, "Cone");
        let liquid = SurfaceBuffers::new(device, surface_layout, camera_buffer, "Liquid");

        let outline_vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Outline Vertex Buffer"),
            size: (MAX_OUTLINE_VERTICES * 3 * 4) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let axes_vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Axes Vertex Buffer"),
            size: (MAX_AXES_VERTICES * 3 * 4) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            cone,
            liquid,
            outline_vertex_buffer,
            outline_vertex_count: 0,
            axes_vertex_buffer,
            axes_vertex_count: 0,
        }
    }
}

pub struct GpuState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: winit::dpi::PhysicalSize<u32>,

    pub pipeline_surface: wgpu::RenderPipeline,
    pub pipeline_outline: wgpu::RenderPipeline,
    pub pipeline_axes: wgpu::RenderPipeline,

    pub camera_buffer: wgpu::Buffer,
    pub camera_bind_group: wgpu::BindGroup,

    pub scene: SceneBuffers,

    pub depth_texture: wgpu::TextureView,
}

fn position_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: 12,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        }],
    }
}

fn normal_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: 12,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x3,
        }],
    }
}

impl GpuState {
    pub async fn new(window: std::sync::Arc<winit::window::Window>) -> Self {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window).unwrap();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .unwrap();

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                },
                None,
            )
            .await
            .unwrap();

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders.wgsl").into()),
        });

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Camera Buffer"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let surface_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Surface Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                ],
            });

        let pipeline_layout_camera = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Camera Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline_layout_surface =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Surface Pipeline Layout"),
                bind_group_layouts: &[&surface_bind_group_layout],
                push_constant_ranges: &[],
            });

        let pipeline_surface = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Surface Render Pipeline"),
            layout: Some(&pipeline_layout_surface),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_surface_main"),
                buffers: &[position_layout(), normal_layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_surface_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let pipeline_outline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Outline Render Pipeline"),
            layout: Some(&pipeline_layout_camera),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_outline_main"),
                buffers: &[position_layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_outline_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineStrip,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let pipeline_axes = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Axes Render Pipeline"),
            layout: Some(&pipeline_layout_camera),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_axes_main"),
                buffers: &[position_layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_axes_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let mut scene = SceneBuffers::new(&device, &surface_bind_group_layout, &camera_buffer);

        let axes = generate_axes_vertices(1.0, 8);
        queue.write_buffer(&scene.axes_vertex_buffer, 0, bytemuck::cast_slice(&axes));
        scene.axes_vertex_count = (axes.len() / 3) as u32;

        let depth_texture = Self::create_depth_texture(&device, &config);

        Self {
            surface,
            device,
            queue,
            config,
            size,
            pipeline_surface,
            pipeline_outline,
            pipeline_axes,
            camera_buffer,
            camera_bind_group,
            scene,
            depth_texture,
        }
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
    ) -> wgpu::TextureView {
        let size = wgpu::Extent3d {
            width: config.width.max(1),
            height: config.height.max(1),
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture = Self::create_depth_texture(&self.device, &self.config);
        }
    }

    pub fn update_camera(&self, camera: &Camera) {
        let uniform = CameraUniform::from_camera(camera);
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    pub fn set_vsync(&mut self, enabled: bool) {
        self.config.present_mode = if enabled {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };
        self.surface.configure(&self.device, &self.config);
    }

    /// Tessellates and uploads the artifacts of one engine recompute.
    pub fn upload_scene(&mut self, artifacts: &SceneArtifacts) {
        let shell = artifacts.geometry.shell.tessellate();
        let liquid = artifacts.geometry.liquid.tessellate();
        let p = &artifacts.presentation;

        self.scene.cone.upload(
            &self.queue,
            &shell,
            SurfaceParams::new(p.cone_colorscale, p.cone_opacity, height_range(&shell)),
        );
        self.scene.liquid.upload(
            &self.queue,
            &liquid,
            SurfaceParams::new(p.liquid_colorscale, p.liquid_opacity, height_range(&liquid)),
        );

        let outline = artifacts.geometry.surface_outline.vertices();
        let count = outline.len().min(MAX_OUTLINE_VERTICES * 3);
        self.queue.write_buffer(
            &self.scene.outline_vertex_buffer,
            0,
            bytemuck::cast_slice(&outline[..count]),
        );
        self.scene.outline_vertex_count = (count / 3) as u32;
    }

    /// Draws the whole scene in one pass: axes, then the surfaces ordered
    /// most-opaque first so the translucent one blends over everything.
    pub fn render_scene(
        &self,
        view: &wgpu::TextureView,
        encoder: &mut wgpu::CommandEncoder,
        show_axes: bool,
    ) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if show_axes && self.scene.axes_vertex_count > 0 {
            render_pass.set_pipeline(&self.pipeline_axes);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.scene.axes_vertex_buffer.slice(..));
            render_pass.draw(0..self.scene.axes_vertex_count, 0..1);
        }

        let (front, back) = if self.scene.cone.opacity >= self.scene.liquid.opacity {
            (&self.scene.cone, &self.scene.liquid)
        } else {
            (&self.scene.liquid, &self.scene.cone)
        };

        render_pass.set_pipeline(&self.pipeline_surface);
        render_pass.set_bind_group(0, &front.bind_group, &[]);
        render_pass.set_vertex_buffer(0, front.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, front.normal_buffer.slice(..));
        render_pass.set_index_buffer(front.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..front.index_count, 0, 0..1);

        if self.scene.outline_vertex_count > 0 {
            render_pass.set_pipeline(&self.pipeline_outline);
            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.scene.outline_vertex_buffer.slice(..));
            render_pass.draw(0..self.scene.outline_vertex_count, 0..1);
        }

        render_pass.set_pipeline(&self.pipeline_surface);
        render_pass.set_bind_group(0, &back.bind_group, &[]);
        render_pass.set_vertex_buffer(0, back.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, back.normal_buffer.slice(..));
        render_pass.set_index_buffer(back.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..back.index_count, 0, 0..1);
    }
}

fn height_range(mesh: &TriangleMesh) -> (f32, f32) {
    let mut min = f32::MAX;
    let mut max = f32::MIN;
    for chunk in mesh.vertices.chunks(3) {
        min = min.min(chunk[1]);
        max = max.max(chunk[1]);
    }
    if min > max {
        (0.0, 1.0)
    } else {
        (min, max)
    }
}

/// Floor grid on the horizontal plane plus the three axis lines; the
/// vertical axis spans the fixed layout height range.
pub fn generate_axes_vertices(size: f32, divisions: u32) -> Vec<f32> {
    let mut vertices = Vec::new();
    let step = size * 2.0 / divisions as f32;
    let half = size;

    for i in 0..=divisions {
        let pos = -half + i as f32 * step;
        vertices.extend_from_slice(&[pos, 0.0, -half, pos, 0.0, half]);
        vertices.extend_from_slice(&[-half, 0.0, pos, half, 0.0, pos]);
    }

    let (h_min, h_max) = LAYOUT.height_range;
    vertices.extend_from_slice(&[-half, 0.0, 0.0, half, 0.0, 0.0]);
    vertices.extend_from_slice(&[0.0, 0.0, -half, 0.0, 0.0, half]);
    vertices.extend_from_slice(&[0.0, h_min, 0.0, 0.0, h_max, 0.0]);

    vertices
}
