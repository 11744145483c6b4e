//! WebGPU render pipeline setup
//!
//! Draw calls are batched into a [`FrameBatch`] on the CPU and uploaded as a
//! single triangle list on `present`.

use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::window::Window;

use super::vertex::{Vertex, rect_vertices};
use super::{Canvas, Color, Rect};
use crate::platform::InitError;

/// CPU-side recording of one frame's draw calls
#[derive(Debug, Clone)]
pub struct FrameBatch {
    draw_color: Color,
    clear_color: Color,
    vertices: Vec<Vertex>,
    /// Logical size the rect coordinates are expressed in
    viewport: (f32, f32),
    /// Convert colors to linear space for an sRGB target
    linear: bool,
}

impl FrameBatch {
    pub fn new(viewport: (u32, u32), clear_color: Color, linear: bool) -> Self {
        Self {
            draw_color: Color::WHITE,
            clear_color,
            vertices: Vec::with_capacity(5 * 6),
            viewport: (viewport.0 as f32, viewport.1 as f32),
            linear,
        }
    }

    fn gpu_color(&self, color: Color) -> [f32; 4] {
        if self.linear {
            color.to_linear()
        } else {
            color.to_f32()
        }
    }

    pub fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
    }

    /// Everything drawn so far is covered by the clear
    pub fn clear(&mut self) {
        self.clear_color = self.draw_color;
        self.vertices.clear();
    }

    pub fn fill_rect(&mut self, rect: Rect) {
        let color = self.gpu_color(self.draw_color);
        self.vertices
            .extend_from_slice(&rect_vertices(rect, color, self.viewport));
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Load color for the render pass
    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b, a] = self.gpu_color(self.clear_color);
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        }
    }
}

/// wgpu-backed [`Canvas`] drawing into a window surface
pub struct WgpuCanvas {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    batch: FrameBatch,
}

impl WgpuCanvas {
    /// Create the surface, device and pipeline for `window`
    ///
    /// `viewport` is the logical arena size that rect coordinates refer to;
    /// the surface itself follows the window's physical size.
    pub async fn new(
        window: Arc<Window>,
        viewport: (u32, u32),
        clear_color: Color,
    ) -> Result<Self, InitError> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| InitError::Renderer(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| InitError::Renderer(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("bounce-pong-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await
            .map_err(|e| InitError::Renderer(e.to_string()))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| InitError::Renderer("surface reports no formats".to_string()))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let size = window.inner_size();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("rect_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("rect.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("render_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
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
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let batch = FrameBatch::new(viewport, clear_color, surface_format.is_srgb());

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            batch,
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Upload the batch and draw it into the next surface texture
    fn render(&self) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let vertices = self.batch.vertices();
        let vertex_buffer = (!vertices.is_empty()).then(|| {
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("vertex_buffer"),
                    contents: bytemuck::cast_slice(vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                })
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.batch.clear_color()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if let Some(buffer) = &vertex_buffer {
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_vertex_buffer(0, buffer.slice(..));
                render_pass.draw(0..vertices.len() as u32, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

impl Canvas for WgpuCanvas {
    fn set_draw_color(&mut self, color: Color) {
        self.batch.set_draw_color(color);
    }

    fn clear(&mut self) {
        self.batch.clear();
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.batch.fill_rect(rect);
    }

    fn present(&mut self) {
        match self.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.resize(self.config.width, self.config.height);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(wgpu::SurfaceError::Timeout) => log::debug!("Surface timeout, frame skipped"),
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}
