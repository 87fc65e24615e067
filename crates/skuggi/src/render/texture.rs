//! # Texture — Image Data on the GPU
//!
//! Callers never hold a `wgpu::Texture`. [`TextureStore::load`] returns a
//! [`TextureHandle`], a copyable index into the store:
//!
//! ```text
//! TextureStore
//! ┌───────────────────────────────────────────────┐
//! │ entries: Vec<TextureEntry>                    │
//! │   [0] 1x1 white (always)                      │
//! │   [1] "atlas/objects.png"                     │
//! │   [2] "atlas/tiles.png"                       │
//! │                                               │
//! │ path_cache: HashMap<PathBuf, TextureHandle>   │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! Entry 0 is a single white pixel. Untextured quads (shadows rendered as
//! flat color, text highlight bars) bind it and let the fragment shader's
//! `texture × tint` do the rest — no separate untextured code path. Loads are
//! cached by path, so loading the same atlas twice returns the same handle
//! without a second GPU upload.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use wgpu::util::DeviceExt;

use super::gpu::GpuContext;
use super::pipeline::QuadPipelines;

/// Handle to a loaded texture in the [`TextureStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub(crate) usize);

impl TextureHandle {
    /// The 1x1 white default texture, present in every store.
    pub const WHITE: TextureHandle = TextureHandle(0);
}

/// Errors raised when loading a texture from disk.
#[derive(Debug)]
pub enum TextureError {
    Image(PathBuf, image::ImageError),
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::Image(path, e) => {
                write!(f, "failed to load texture '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for TextureError {}

pub(crate) struct TextureEntry {
    pub bind_group: wgpu::BindGroup,
    pub width: u32,
    pub height: u32,
}

/// Stores all loaded GPU textures and their bind groups.
pub struct TextureStore {
    entries: Vec<TextureEntry>,
    path_cache: HashMap<PathBuf, TextureHandle>,
}

impl TextureStore {
    /// Create a new store with the 1x1 white texture at index 0.
    pub fn new(gpu: &GpuContext, pipelines: &QuadPipelines) -> Self {
        let mut store = Self {
            entries: Vec::new(),
            path_cache: HashMap::new(),
        };
        store.upload(gpu, pipelines, "white 1x1", 1, 1, &[255, 255, 255, 255]);
        store
    }

    /// Load a PNG/JPEG from disk. Cached by path: loading the same file twice
    /// returns the same handle without touching the GPU again.
    pub fn load(
        &mut self,
        gpu: &GpuContext,
        pipelines: &QuadPipelines,
        path: impl AsRef<Path>,
    ) -> Result<TextureHandle, TextureError> {
        let path = path.as_ref();
        if let Some(&handle) = self.path_cache.get(path) {
            return Ok(handle);
        }

        let img = image::open(path)
            .map_err(|e| TextureError::Image(path.to_owned(), e))?
            .to_rgba8();
        let (width, height) = img.dimensions();
        let label = path.to_string_lossy();
        let handle = self.upload(gpu, pipelines, &label, width, height, &img.into_raw());

        log::debug!("loaded texture '{}' ({width}x{height}) as {handle:?}", path.display());
        self.path_cache.insert(path.to_owned(), handle);
        Ok(handle)
    }

    /// Upload raw RGBA8 pixels and return a handle (glyph atlases, generated
    /// images).
    pub fn from_rgba(
        &mut self,
        gpu: &GpuContext,
        pipelines: &QuadPipelines,
        label: &str,
        width: u32,
        height: u32,
        data: &[u8],
    ) -> TextureHandle {
        self.upload(gpu, pipelines, label, width, height, data)
    }

    /// Pixel dimensions of a texture, for deriving atlas grids.
    pub fn size(&self, handle: TextureHandle) -> (u32, u32) {
        let entry = &self.entries[handle.0];
        (entry.width, entry.height)
    }

    pub(crate) fn bind_group(&self, handle: TextureHandle) -> &wgpu::BindGroup {
        &self.entries[handle.0].bind_group
    }

    fn upload(
        &mut self,
        gpu: &GpuContext,
        pipelines: &QuadPipelines,
        label: &str,
        width: u32,
        height: u32,
        data: &[u8],
    ) -> TextureHandle {
        let texture = gpu.device.create_texture_with_data(
            &gpu.queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            data,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &pipelines.texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&pipelines.sampler),
                },
            ],
        });

        let handle = TextureHandle(self.entries.len());
        self.entries.push(TextureEntry {
            bind_group,
            width,
            height,
        });
        handle
    }
}
