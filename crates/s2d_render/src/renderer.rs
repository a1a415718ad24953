//! `RenderBackend` on top of wgpu.
//!
//! Draw calls between `clear` and `present` are recorded into a `DrawBatch`; `present`
//! streams the batch into GPU buffers and replays it in one render pass.

use std::collections::HashMap;
use std::sync::Arc;

use s2d_core::{
    compute_viewport, Color, FilterMode, PixelFormat, Placement, RenderBackend, RenderError,
    TextureId, Vertex, ViewSpec, Viewport,
};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::batch::{Binding, DrawBatch};
use crate::camera::PixelCamera;
use crate::gpu_context::GpuContext;
use crate::pipeline::DrawPipeline;
use crate::texture::GpuTexture;
use crate::vertex::GpuVertex;

struct BoundTexture {
    _texture: GpuTexture,
    bind_group: wgpu::BindGroup,
}

pub struct WgpuRenderer {
    window: Arc<Window>,
    gpu: GpuContext,
    pipeline: DrawPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    white: BoundTexture,
    textures: HashMap<TextureId, BoundTexture>,
    next_texture: u32,
    batch: DrawBatch,
    clear_color: Color,
    viewport: Viewport,

    // Buffers grow (power-of-two) but never shrink.
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    index_capacity: usize,
}

impl WgpuRenderer {
    pub fn new(window: Arc<Window>, vsync: bool) -> Result<Self, RenderError> {
        let gpu = GpuContext::new(window.clone(), vsync)?;
        let pipeline = DrawPipeline::new(&gpu.device, gpu.surface_format);

        let (width, height) = gpu.size;
        let viewport = compute_viewport(&ViewSpec {
            orig_width: width,
            orig_height: height,
            width,
            height,
            mode: Default::default(),
        });
        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("camera uniform buffer"),
                contents: bytemuck::cast_slice(&[
                    PixelCamera::for_viewport(&viewport).build_uniform()
                ]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let camera_bind_group = pipeline.create_camera_bind_group(&gpu.device, &camera_buffer);

        let white_texture = GpuTexture::white(&gpu.device, &gpu.queue)?;
        let white = BoundTexture {
            bind_group: pipeline.create_texture_bind_group(&gpu.device, &white_texture),
            _texture: white_texture,
        };

        let vertex_buffer = create_vertex_buffer(&gpu.device, 1);
        let index_buffer = create_index_buffer(&gpu.device, 1);

        Ok(Self {
            window,
            gpu,
            pipeline,
            camera_buffer,
            camera_bind_group,
            white,
            textures: HashMap::new(),
            next_texture: 0,
            batch: DrawBatch::default(),
            clear_color: Color::BLACK,
            viewport,
            vertex_buffer,
            index_buffer,
            vertex_capacity: 1,
            index_capacity: 1,
        })
    }

    fn apply_view(&mut self, view: &ViewSpec) {
        self.gpu.resize(view.width, view.height);
        self.viewport = compute_viewport(view);
        let uniform = PixelCamera::for_viewport(&self.viewport).build_uniform();
        self.gpu
            .queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    fn ensure_capacity(&mut self, vertex_count: usize, index_count: usize) {
        if vertex_count > self.vertex_capacity {
            self.vertex_capacity = vertex_count.next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&self.gpu.device, self.vertex_capacity);
        }
        if index_count > self.index_capacity {
            self.index_capacity = index_count.next_power_of_two();
            self.index_buffer = create_index_buffer(&self.gpu.device, self.index_capacity);
        }
    }

    fn queue_quad(&mut self, texture: TextureId, placement: Placement, tint: Color) {
        if self.textures.contains_key(&texture) {
            self.batch.push_textured_quad(texture, placement, tint);
        } else {
            log::warn!("Draw with unknown texture {texture:?} skipped");
        }
    }
}

impl RenderBackend for WgpuRenderer {
    fn initialize(&mut self, view: &ViewSpec) -> Result<(), RenderError> {
        self.apply_view(view);
        log::info!(
            "Renderer ready: {}x{} logical in {}x{} drawable ({:?})",
            view.orig_width,
            view.orig_height,
            view.width,
            view.height,
            view.mode
        );
        Ok(())
    }

    fn clear(&mut self, color: Color) {
        self.batch.clear();
        self.clear_color = color;
    }

    fn draw_triangle(&mut self, vertices: [Vertex; 3]) {
        self.batch.push_triangle(vertices);
    }

    fn upload_texture(
        &mut self,
        format: PixelFormat,
        width: u32,
        height: u32,
        pixels: &[u8],
        filter: FilterMode,
    ) -> Result<TextureId, RenderError> {
        let label = format!("texture {}", self.next_texture + 1);
        let texture = GpuTexture::from_pixels(
            &self.gpu.device,
            &self.gpu.queue,
            format,
            width,
            height,
            pixels,
            filter,
            &label,
        )?;
        let bind_group = self
            .pipeline
            .create_texture_bind_group(&self.gpu.device, &texture);

        self.next_texture += 1;
        let id = TextureId(self.next_texture);
        self.textures.insert(
            id,
            BoundTexture {
                _texture: texture,
                bind_group,
            },
        );
        Ok(id)
    }

    fn draw_image(&mut self, texture: TextureId, placement: Placement, tint: Color) {
        self.queue_quad(texture, placement, tint);
    }

    fn draw_text(&mut self, texture: TextureId, placement: Placement, tint: Color) {
        self.queue_quad(texture, placement, tint);
    }

    fn free_texture(&mut self, texture: TextureId) {
        if self.textures.remove(&texture).is_none() {
            log::warn!("Free of unknown texture {texture:?} ignored");
        }
    }

    fn set_viewport(&mut self, view: &ViewSpec) {
        self.apply_view(view);
    }

    fn present(&mut self) {
        let Some((output, view)) = self.gpu.begin_frame() else {
            return;
        };

        if !self.batch.is_empty() {
            self.ensure_capacity(self.batch.vertices.len(), self.batch.indices.len());
            self.gpu.queue.write_buffer(
                &self.vertex_buffer,
                0,
                bytemuck::cast_slice(&self.batch.vertices),
            );
            self.gpu.queue.write_buffer(
                &self.index_buffer,
                0,
                bytemuck::cast_slice(&self.batch.indices),
            );
        }

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("s2d encoder"),
            });

        {
            let c = self.clear_color;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("s2d render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: c.r as f64,
                            g: c.g as f64,
                            b: c.b as f64,
                            a: c.a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            if !self.batch.is_empty() {
                let (surface_w, surface_h) = self.gpu.size;
                let vp = clamp_viewport(&self.viewport, surface_w, surface_h);
                render_pass.set_viewport(vp.x, vp.y, vp.width, vp.height, 0.0, 1.0);
                render_pass.set_pipeline(&self.pipeline.render_pipeline);
                render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass
                    .set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

                for draw in &self.batch.draw_calls {
                    let bind_group = match draw.binding {
                        Binding::Solid => &self.white.bind_group,
                        Binding::Texture(id) => match self.textures.get(&id) {
                            Some(bound) => &bound.bind_group,
                            // Freed between draw and present.
                            None => continue,
                        },
                    };
                    render_pass.set_bind_group(1, bind_group, &[]);
                    render_pass.draw_indexed(
                        draw.index_start..(draw.index_start + draw.index_count),
                        0,
                        0..1,
                    );
                }
            }
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        self.window.pre_present_notify();
        output.present();
    }
}

/// wgpu rejects viewports that leave the render target.
fn clamp_viewport(viewport: &Viewport, surface_w: u32, surface_h: u32) -> Viewport {
    let max_w = surface_w.max(1) as f32;
    let max_h = surface_h.max(1) as f32;
    let x = viewport.x.clamp(0.0, max_w - 1.0);
    let y = viewport.y.clamp(0.0, max_h - 1.0);
    Viewport {
        x,
        y,
        width: viewport.width.clamp(1.0, max_w - x),
        height: viewport.height.clamp(1.0, max_h - y),
        ..*viewport
    }
}

fn create_vertex_buffer(device: &wgpu::Device, vertex_capacity: usize) -> wgpu::Buffer {
    let byte_len = (vertex_capacity * std::mem::size_of::<GpuVertex>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("s2d vertex buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_index_buffer(device: &wgpu::Device, index_capacity: usize) -> wgpu::Buffer {
    let byte_len = (index_capacity * std::mem::size_of::<u32>()).max(1) as u64;
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("s2d index buffer"),
        size: byte_len,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
