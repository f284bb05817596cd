//! Offscreen renderer for backdrop scenes.
//!
//! Draws tessellated vertex batches into an RGBA texture and reads the
//! pixels back. Per-frame failures are reported to the caller instead of
//! panicking; the session treats them as fallback triggers.

use super::context::{GpuContext, GpuError};
use super::tessellate::Vertex;
use crate::scenes::{LightingRig, ThemeMode};
use wgpu::{BindGroup, Buffer, RenderPipeline, Texture, TextureView};

/// Uniform data for the scene shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniforms {
    background: [f32; 4],
    fill_tint: [f32; 4],
    ambient: f32,
    key_intensity: f32,
    _padding: [f32; 2],
}

/// Renderer construction settings.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub theme: ThemeMode,
    /// Clear color override; the theme background applies when absent.
    pub background: Option<[f32; 3]>,
    pub lighting: LightingRig,
}

impl RenderSettings {
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    fn background(&self) -> [f32; 3] {
        self.background.unwrap_or_else(|| self.theme.background())
    }
}

/// Offscreen scene renderer.
pub struct SceneRenderer {
    ctx: GpuContext,
    pipeline: RenderPipeline,
    bind_group: BindGroup,
    uniform_buffer: Buffer,
    vertex_buffer: Buffer,
    render_texture: Texture,
    render_view: TextureView,
    settings: RenderSettings,
    max_vertices: usize,
}

impl SceneRenderer {
    /// Create a renderer sized for at most `max_vertices` per frame.
    pub async fn new(settings: RenderSettings, max_vertices: usize) -> Result<Self, GpuError> {
        let ctx = GpuContext::new().await?;
        let format = wgpu::TextureFormat::Rgba8Unorm;

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/scene.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("scene_bind_group_layout"),
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

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("scene_pipeline_layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scene_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 0,
                            format: wgpu::VertexFormat::Float32x2,
                        },
                        wgpu::VertexAttribute {
                            offset: 8,
                            shader_location: 1,
                            format: wgpu::VertexFormat::Float32x2,
                        },
                        wgpu::VertexAttribute {
                            offset: 16,
                            shader_location: 2,
                            format: wgpu::VertexFormat::Float32x4,
                        },
                        wgpu::VertexAttribute {
                            offset: 32,
                            shader_location: 3,
                            format: wgpu::VertexFormat::Float32,
                        },
                    ],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
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

        let uniform_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let max_vertices = max_vertices.max(6);
        let vertex_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_vertices"),
            size: (std::mem::size_of::<Vertex>() * max_vertices) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let render_texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("scene_render_target"),
            size: wgpu::Extent3d {
                width: settings.width,
                height: settings.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let render_view = render_texture.create_view(&wgpu::TextureViewDescriptor::default());

        Ok(Self {
            ctx,
            pipeline,
            bind_group,
            uniform_buffer,
            vertex_buffer,
            render_texture,
            render_view,
            settings,
            max_vertices,
        })
    }

    /// Render one frame from a tessellated vertex batch, returning RGBA8
    /// pixels (row-major, no padding).
    pub fn render_frame(&self, vertices: &[Vertex]) -> Result<Vec<u8>, GpuError> {
        let vertex_count = vertices.len().min(self.max_vertices);
        let background = self.settings.background();

        let uniforms = SceneUniforms {
            background: [background[0], background[1], background[2], 1.0],
            fill_tint: {
                let tint = self.settings.lighting.fill_tint(self.settings.theme);
                [tint[0], tint[1], tint[2], 1.0]
            },
            ambient: self.settings.lighting.ambient,
            key_intensity: self.settings.lighting.key.intensity,
            _padding: [0.0; 2],
        };
        self.ctx
            .queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        if vertex_count > 0 {
            self.ctx.queue.write_buffer(
                &self.vertex_buffer,
                0,
                bytemuck::cast_slice(&vertices[..vertex_count]),
            );
        }

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("scene_render_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.render_view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: background[0] as f64,
                            g: background[1] as f64,
                            b: background[2] as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.draw(0..vertex_count as u32, 0..1);
        }

        // Copy texture to buffer for readback
        let bytes_per_pixel = 4u32;
        let unpadded_row_bytes = self.settings.width * bytes_per_pixel;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_row_bytes = unpadded_row_bytes.div_ceil(align) * align;
        let buffer_size = (padded_row_bytes * self.settings.height) as u64;

        let readback_buffer = self.ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_readback_buffer"),
            size: buffer_size,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.render_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &readback_buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row_bytes),
                    rows_per_image: Some(self.settings.height),
                },
            },
            wgpu::Extent3d {
                width: self.settings.width,
                height: self.settings.height,
                depth_or_array_layers: 1,
            },
        );

        self.ctx.queue.submit(std::iter::once(encoder.finish()));

        let buffer_slice = readback_buffer.slice(..);
        let (sender, receiver) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        self.ctx
            .device
            .poll(wgpu::PollType::wait_indefinitely())
            .map_err(|e| GpuError::Readback(e.to_string()))?;
        receiver
            .recv()
            .map_err(|e| GpuError::Readback(e.to_string()))?
            .map_err(|e| GpuError::Readback(e.to_string()))?;

        let data = buffer_slice.get_mapped_range();

        // Remove row padding if present
        let mut pixels =
            Vec::with_capacity((self.settings.width * self.settings.height * 4) as usize);
        for row in 0..self.settings.height {
            let start = (row * padded_row_bytes) as usize;
            let end = start + unpadded_row_bytes as usize;
            pixels.extend_from_slice(&data[start..end]);
        }

        Ok(pixels)
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.ctx.adapter_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{generate, StageGroup, XorShiftRng};
    use crate::gpu::tessellate::{tessellate, vertex_capacity};
    use crate::scenes::{default_params, scene_config, SceneKind};

    fn test_settings(kind: SceneKind, width: u32, height: u32) -> RenderSettings {
        RenderSettings {
            width,
            height,
            theme: ThemeMode::Dark,
            background: None,
            lighting: scene_config(kind).lighting,
        }
    }

    async fn with_renderer<F>(kind: SceneKind, test_fn: F)
    where
        F: FnOnce(&SceneRenderer, &StageGroup, &crate::scenes::SceneConfig),
    {
        let config = scene_config(kind);
        let params = default_params(kind);
        let mut rng = XorShiftRng::new(21);
        let group = StageGroup::new(generate(
            &config,
            &params,
            ThemeMode::Dark,
            1.0,
            &mut rng,
        ));
        let settings = test_settings(kind, 256, 256);
        match SceneRenderer::new(settings, vertex_capacity(&group)).await {
            Ok(renderer) => test_fn(&renderer, &group, &config),
            Err(e) => eprintln!("Skipping test - GPU not available: {}", e),
        }
    }

    #[tokio::test]
    async fn test_all_scene_kinds_render_correct_size() {
        for kind in SceneKind::all() {
            with_renderer(*kind, |renderer, group, config| {
                let vertices = tessellate(group, &config.camera, renderer.settings().aspect());
                let pixels = renderer.render_frame(&vertices).expect("render failed");
                assert_eq!(pixels.len(), 256 * 256 * 4);
                assert!(pixels.iter().any(|&p| p > 0), "{kind:?} rendered nothing");
            })
            .await;
        }
    }

    #[tokio::test]
    async fn test_empty_batch_renders_background() {
        with_renderer(SceneKind::SphereField, |renderer, _, _| {
            let pixels = renderer.render_frame(&[]).expect("render failed");
            assert_eq!(pixels.len(), 256 * 256 * 4);
            // Dark slate background, not pure black.
            assert!(pixels[2] > pixels[0]);
        })
        .await;
    }

    #[tokio::test]
    async fn test_group_motion_changes_output() {
        with_renderer(SceneKind::SphereField, |renderer, group, config| {
            let still = tessellate(group, &config.camera, renderer.settings().aspect());
            let mut rotated = group.clone();
            rotated.rotation.y += 0.8;
            let moved = tessellate(&rotated, &config.camera, renderer.settings().aspect());
            let a = renderer.render_frame(&still).expect("render failed");
            let b = renderer.render_frame(&moved).expect("render failed");
            assert_ne!(a, b);
        })
        .await;
    }
}
