//! GPU context — the crate's one window into wgpu.
//!
//! [`GpuContext`] owns the device, queue, and swapchain surface. The surface
//! and its configuration are private: everything that touches the swapchain
//! (frame acquisition, resize, format queries) goes through methods here, so
//! the rest of the renderer can't leave the configuration stale. The device
//! and queue are public — texture uploads and buffer writes happen all over
//! the render modules.
//!
//! Construction blocks on adapter and device selection via pollster; wgpu's
//! async init has nowhere useful to suspend in a plain winit loop.

use std::sync::Arc;

pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
}

impl GpuContext {
    /// Bring up wgpu for the given window and configure its surface.
    pub fn new(window: Arc<winit::window::Window>) -> Self {
        let size = window.inner_size();
        let (width, height) = (size.width.max(1), size.height.max(1));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window).unwrap();

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("Failed to find a suitable GPU adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("skuggi device".into()),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                ..Default::default()
            },
        ))
        .expect("Failed to create GPU device");

        let caps = surface.get_capabilities(&adapter);
        // Prefer an sRGB swapchain so the atlas textures (Rgba8UnormSrgb)
        // and the framebuffer agree on color space.
        let format = caps
            .formats
            .iter()
            .copied()
            .find(wgpu::TextureFormat::is_srgb)
            .unwrap_or(caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        log::debug!("surface configured {width}x{height} as {format:?}");

        Self {
            device,
            queue,
            surface,
            config,
        }
    }

    /// Acquire the next swapchain frame plus a render-target view onto it.
    ///
    /// Errors are the caller's to interpret; the window loop reconfigures on
    /// `Lost`/`Outdated` and bails on `OutOfMemory`.
    pub(crate) fn acquire_frame(
        &self,
    ) -> Result<(wgpu::SurfaceTexture, wgpu::TextureView), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        Ok((frame, view))
    }

    /// Reconfigure the surface; call on window resize (zero sizes are
    /// ignored, minimized windows send them).
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Current surface size in pixels.
    pub fn surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }
}
