use std::sync::Arc;

use glam::Vec2;
use glyph_swarm::{
    time::FrameClock, AppError, GpuError, MorphConfig, MorphScene, Particle, ParticleHandle,
    ReconcileReport, SceneGraph,
};
use image::RgbaImage;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use wgpu::util::DeviceExt;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::camera::Camera;
use crate::shader::{shard_mesh, Instance, ShardVertex, Uniforms, SHADER_SOURCE};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const INITIAL_INSTANCES: usize = 1024;
const TITLE: &str = "glyph-swarm";

/// Counts particles the core has handed over for drawing.
///
/// Only the first `len` pool slots are ever uploaded, so a particle is
/// invisible until it has been added here.
#[derive(Debug, Default)]
pub struct DrawList {
    len: usize,
}

impl DrawList {
    pub fn len(&self) -> usize {
        self.len
    }
}

impl SceneGraph for DrawList {
    fn add(&mut self, handle: ParticleHandle, _particle: &Particle) {
        debug_assert_eq!(handle.index(), self.len, "particles are added in slot order");
        self.len = self.len.max(handle.index() + 1);
    }
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    instance_count: u32,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    depth_texture: wgpu::TextureView,
    pub camera: Camera,
}

impl GpuState {
    pub async fn new(window: Arc<Window>, seed: Option<u64>) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        log::info!("using adapter {}", adapter.get_info().name);

        // Palette colours are authored for direct display
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
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

        let depth_texture = create_depth_texture(&device, &config);

        let mut rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let (vertices, indices) = shard_mesh(&mut rng);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Shard Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Shard Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let instance_buffer = create_instance_buffer(&device, INITIAL_INSTANCES);

        let camera = Camera::new();
        let aspect = config.width as f32 / config.height as f32;
        let uniforms = Uniforms {
            view_proj: camera.view_proj(aspect).to_cols_array_2d(),
        };

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shard Shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER_SOURCE.into()),
        });

        let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Render Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<ShardVertex>() as wgpu::BufferAddress,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![0 => Float32x3],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<Instance>() as wgpu::BufferAddress,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![
                            1 => Float32x3,
                            2 => Float32x2,
                            3 => Float32x3,
                        ],
                    },
                ],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            render_pipeline,
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            instance_buffer,
            instance_capacity: INITIAL_INSTANCES,
            instance_count: 0,
            uniform_buffer,
            uniform_bind_group,
            depth_texture,
            camera,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture = create_depth_texture(&self.device, &self.config);
        }
    }

    /// Copy the drawable particles into the instance buffer, growing it first
    /// if the pool outgrew it.
    pub fn upload(&mut self, particles: &[Particle]) {
        if particles.len() > self.instance_capacity {
            self.instance_capacity = particles.len().next_power_of_two();
            self.instance_buffer = create_instance_buffer(&self.device, self.instance_capacity);
            log::debug!("instance buffer grown to {}", self.instance_capacity);
        }

        let instances: Vec<Instance> = particles.iter().map(Instance::from).collect();
        if !instances.is_empty() {
            self.queue
                .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }
        self.instance_count = instances.len() as u32;
    }

    fn update_uniforms(&mut self) {
        self.camera.update();

        let aspect = self.config.width as f32 / self.config.height as f32;
        let uniforms = Uniforms {
            view_proj: self.camera.view_proj(aspect).to_cols_array_2d(),
        };

        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.update_uniforms();

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
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

            if self.instance_count > 0 {
                render_pass.set_pipeline(&self.render_pipeline);
                render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
                render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                render_pass.draw_indexed(0..self.index_count, 0, 0..self.instance_count);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Instance Buffer"),
        size: (capacity * std::mem::size_of::<Instance>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_depth_texture(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// Tick the clock and run one scene frame. Nothing moves while the clock is paused.
fn advance(
    scene: &mut MorphScene,
    clock: &mut FrameClock,
    draw_list: &mut DrawList,
) -> Option<ReconcileReport> {
    let (interval, elapsed) = clock.tick();
    if clock.is_paused() {
        return None;
    }
    scene.update_scene(interval, elapsed, draw_list)
}

/// Scene inputs held until the window exists.
struct Startup {
    config: MorphConfig,
    images: Vec<RgbaImage>,
}

pub struct App {
    startup: Option<Startup>,
    window_size: (u32, u32),
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    scene: Option<MorphScene>,
    draw_list: DrawList,
    clock: FrameClock,
    last_title_frame: u64,
    error: Option<AppError>,
}

impl App {
    pub fn new(config: MorphConfig, images: Vec<RgbaImage>, window_size: (u32, u32)) -> Self {
        Self {
            startup: Some(Startup { config, images }),
            window_size,
            window: None,
            gpu_state: None,
            scene: None,
            draw_list: DrawList::default(),
            clock: FrameClock::new(),
            last_title_frame: 0,
            error: None,
        }
    }

    /// The error that stopped the event loop, if any.
    pub fn take_error(&mut self) -> Option<AppError> {
        self.error.take()
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let Some(Startup { config, images }) = self.startup.take() else {
            return Ok(());
        };

        let (width, height) = self.window_size;
        let window_attrs = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu_state = pollster::block_on(GpuState::new(window.clone(), config.seed))?;

        let logical = window.inner_size().to_logical::<f32>(window.scale_factor());
        let mut scene = MorphScene::new(config, images, logical.width)?;
        let targets = scene.init_scene(&mut self.draw_list);
        log::info!("first image has {} target points", targets);

        self.clock = FrameClock::new();
        window.request_redraw();

        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        self.scene = Some(scene);
        Ok(())
    }

    fn next_image(&mut self) {
        if let Some(scene) = &mut self.scene {
            let targets = scene.next_image();
            log::info!(
                "switched to image {} ({} target points)",
                scene.controller().current_index(),
                targets
            );
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        match event.physical_key {
            PhysicalKey::Code(KeyCode::Space | KeyCode::ArrowRight | KeyCode::KeyN) => {
                self.next_image()
            }
            PhysicalKey::Code(KeyCode::KeyP) => self.clock.toggle_pause(),
            PhysicalKey::Code(KeyCode::Escape) => event_loop.exit(),
            _ => {}
        }
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        if let (Some(scene), Some(gpu_state)) = (&mut self.scene, &mut self.gpu_state) {
            if let Some(report) = advance(scene, &mut self.clock, &mut self.draw_list) {
                log::debug!(
                    "reconciled: {} retargeted, {} created, {} exiled",
                    report.retargeted,
                    report.created,
                    report.exiled
                );
            }

            let drawable = self.draw_list.len().min(scene.particles().len());
            gpu_state.upload(&scene.particles()[..drawable]);

            match gpu_state.render() {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let size = winit::dpi::PhysicalSize {
                        width: gpu_state.config.width,
                        height: gpu_state.config.height,
                    };
                    gpu_state.resize(size);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("GPU out of memory");
                    event_loop.exit();
                }
                Err(e) => log::warn!("render error: {:?}", e),
            }
        }

        if let Some(window) = &self.window {
            if self.clock.frame() >= self.last_title_frame + 30 {
                self.last_title_frame = self.clock.frame();
                window.set_title(&format!(
                    "{TITLE} | {} particles | {:.0} fps",
                    self.draw_list.len(),
                    self.clock.fps()
                ));
            }
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.start(event_loop) {
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
                if let (Some(scene), Some(window)) = (&mut self.scene, &self.window) {
                    let logical = physical_size.to_logical::<f32>(window.scale_factor());
                    scene.set_viewport_width(logical.width);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, event),
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.next_image(),
            WindowEvent::CursorMoved { position, .. } => {
                if let (Some(gpu_state), Some(window)) = (&mut self.gpu_state, &self.window) {
                    let scale = window.scale_factor();
                    let cursor = position.to_logical::<f32>(scale);
                    let size = window.inner_size().to_logical::<f32>(scale);
                    gpu_state.camera.pan_to(
                        Vec2::new(cursor.x, cursor.y),
                        Vec2::new(size.width, size.height),
                    );
                }
            }
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => {}
        }
    }
}
