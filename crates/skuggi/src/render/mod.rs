//! # Render — From Composite Objects to Draw Calls
//!
//! Every frame follows the same four-stage pipeline:
//!
//! ```text
//!  Scene (objects → components)          Camera
//!         │                                │
//!         ▼                                │
//!   ┌────────────────────────────┐         │
//!   │ projector: one quad per    │         │
//!   │ component — spin, camera   │         │
//!   │ normalization, flatten     │         │
//!   └──────────────┬─────────────┘         │
//!                  ▼                       │
//!   ┌────────────────────────────┐         │
//!   │ batch: painter-sorted      │         │
//!   │ passes (tiles, objects,    │         │
//!   │ shadows, lighting)         │         │
//!   └──────────────┬─────────────┘         │
//!                  ▼                       ▼
//!   ┌──────────────────────────────────────────┐
//!   │ Renderer: one flat triangle list per     │
//!   │ (pass, atlas texture), one draw each     │
//!   └──────────────────────────────────────────┘
//! ```
//!
//! The passes never talk to the GPU directly — they hand flat vertex slices
//! to a [`Renderer`]. [`FrameRenderer`](draw::FrameRenderer) is the wgpu
//! implementation; tests substitute a recording stub. Occlusion is pure
//! painter's algorithm: no depth buffer, back-to-front submission order.

pub mod batch;
pub mod draw;
pub mod gpu;
pub mod pipeline;
pub mod projector;
pub mod texture;
pub(crate) mod vertex;

pub use batch::{
    RenderContext, render_bright_lighting, render_lighting, render_objects, render_scene,
    render_shadows, render_tiles,
};
pub use draw::FrameRenderer;
pub use gpu::GpuContext;
pub use projector::{CAMERA_NORMALIZATION, SHADOW_NORMALIZATION, project_component};
pub use texture::{TextureHandle, TextureStore};
pub use vertex::QuadVertex;

/// How a pass's vertices are composited over what's already drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Standard `src × a + dst × (1 - a)` — objects, tiles, shadows.
    Alpha,
    /// `src + dst` — light accumulation.
    Additive,
}

/// Which coordinate space a submission's vertices are in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawSpace {
    /// World units; multiplied by the camera's orthographic view-projection.
    World,
    /// Screen pixels, origin top-left; UI and text.
    Screen,
}

/// The draw-submission seam between the batch passes and the graphics device.
///
/// One call is one draw: a texture atlas plus a flat, already-ordered
/// triangle list (every 3 vertices = 1 triangle). Implementations must
/// preserve submission order — the painter's algorithm depends on it.
pub trait Renderer {
    fn submit(
        &mut self,
        texture: TextureHandle,
        blend: BlendMode,
        space: DrawSpace,
        vertices: &[QuadVertex],
    );
}

/// An RGBA color with floating-point components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };

    /// Create a color from RGB (alpha = 1).
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGBA.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub(crate) fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
