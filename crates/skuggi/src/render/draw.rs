//! # Draw — Flushing Submissions to the Screen
//!
//! [`FrameRenderer`] is the wgpu implementation of [`Renderer`]. The batch
//! passes call [`submit`](Renderer::submit) any number of times; nothing
//! touches the GPU until [`flush`](FrameRenderer::flush), which uploads one
//! vertex buffer, opens one render pass, and replays the submissions in
//! order. Consecutive submissions that share texture, blend, and space
//! collapse into a single draw call.
//!
//! Surface errors bubble up as `Result<(), wgpu::SurfaceError>`; the window
//! loop decides which ones mean "reconfigure and retry" versus "give up".

use std::ops::Range;

use wgpu::util::DeviceExt;

use crate::camera::Camera;

use super::gpu::GpuContext;
use super::pipeline::QuadPipelines;
use super::texture::{TextureHandle, TextureStore};
use super::vertex::QuadVertex;
use super::{BlendMode, Color, DrawSpace, Renderer};

struct Submission {
    texture: TextureHandle,
    blend: BlendMode,
    space: DrawSpace,
    vertices: Range<u32>,
}

/// Collects one frame's quad submissions and draws them all at once.
pub struct FrameRenderer {
    pipelines: QuadPipelines,
    vertices: Vec<QuadVertex>,
    submissions: Vec<Submission>,
    pub clear_color: Color,
}

impl FrameRenderer {
    pub fn new(gpu: &GpuContext) -> Self {
        Self {
            pipelines: QuadPipelines::new(gpu),
            vertices: Vec::new(),
            submissions: Vec::new(),
            clear_color: Color::BLACK,
        }
    }

    /// The pipeline state shared with the [`TextureStore`].
    pub fn pipelines(&self) -> &QuadPipelines {
        &self.pipelines
    }

    /// Draw everything submitted since the last flush and present the frame.
    ///
    /// Clears the submission queue whether or not presentation succeeds, so a
    /// lost frame never replays stale geometry.
    pub fn flush(
        &mut self,
        gpu: &GpuContext,
        textures: &TextureStore,
        camera: &Camera,
    ) -> Result<(), wgpu::SurfaceError> {
        let submissions = std::mem::take(&mut self.submissions);
        let vertices = std::mem::take(&mut self.vertices);

        let (output, view) = gpu.acquire_frame()?;

        self.pipelines
            .write_cameras(gpu, camera.view_proj(), camera.screen_proj());

        let vertex_buffer = (!vertices.is_empty()).then(|| {
            gpu.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("quad vertex buffer"),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                })
        });

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("frame pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: self.clear_color.r as f64,
                            g: self.clear_color.g as f64,
                            b: self.clear_color.b as f64,
                            a: self.clear_color.a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some(buffer) = &vertex_buffer {
                pass.set_vertex_buffer(0, buffer.slice(..));
                for submission in &submissions {
                    pass.set_pipeline(match submission.blend {
                        BlendMode::Alpha => &self.pipelines.alpha,
                        BlendMode::Additive => &self.pipelines.additive,
                    });
                    pass.set_bind_group(
                        0,
                        match submission.space {
                            DrawSpace::World => &self.pipelines.camera_bind_group,
                            DrawSpace::Screen => &self.pipelines.screen_bind_group,
                        },
                        &[],
                    );
                    pass.set_bind_group(1, textures.bind_group(submission.texture), &[]);
                    pass.draw(submission.vertices.clone(), 0..1);
                }
            }
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

impl Renderer for FrameRenderer {
    fn submit(
        &mut self,
        texture: TextureHandle,
        blend: BlendMode,
        space: DrawSpace,
        vertices: &[QuadVertex],
    ) {
        if vertices.is_empty() {
            return;
        }
        let start = self.vertices.len() as u32;
        self.vertices.extend_from_slice(vertices);
        let end = self.vertices.len() as u32;

        // Merge with the previous submission when nothing else changed.
        if let Some(last) = self.submissions.last_mut()
            && last.texture == texture
            && last.blend == blend
            && last.space == space
        {
            last.vertices.end = end;
            return;
        }
        self.submissions.push(Submission {
            texture,
            blend,
            space,
            vertices: start..end,
        });
    }
}
