//! Camera — the visible world rectangle and the world↔pixel transforms.
//!
//! The camera is an axis-aligned window onto the world: `left`/`right` bound
//! the visible X range and `bottom`/`top` the visible Y range, in world units.
//! World Y points up; pixel Y points down, so [`Camera::world_to_pixel`]
//! flips the vertical axis. It also folds a point's Z (height off the ground
//! plane) into pixel Y, so elevated things draw higher on screen — that fold
//! is one-directional, and [`Camera::pixel_to_world`] always comes back with
//! Z = 0.
//!
//! The same rectangle feeds the GPU path: [`Camera::view_proj`] builds the
//! orthographic matrix the quad shader multiplies every world-space vertex by.

use crate::math::{Mat4, Vec2, Vec3};

/// The camera's visible world rectangle plus the screen resolution in pixels.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    /// Screen resolution in pixels (width, height).
    pub screen: Vec2,
}

impl Camera {
    /// A camera centered on `center` showing `width` × `height` world units.
    pub fn centered(center: Vec2, width: f32, height: f32, screen: Vec2) -> Self {
        Self {
            left: center.x - width / 2.0,
            right: center.x + width / 2.0,
            bottom: center.y - height / 2.0,
            top: center.y + height / 2.0,
            screen,
        }
    }

    /// Visible world width.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Visible world height.
    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    /// Pixels per world unit on each axis.
    pub fn pixels_per_unit(&self) -> Vec2 {
        Vec2::new(self.screen.x / self.width(), self.screen.y / self.height())
    }

    /// Map a world position to pixel coordinates.
    ///
    /// Pixel Y grows downward, so the vertical axis flips, and the point's
    /// elevation (`pos.z`) lifts it up the screen by the same world-unit
    /// scale as Y.
    pub fn world_to_pixel(&self, pos: Vec3) -> Vec2 {
        let scale = self.pixels_per_unit();
        Vec2::new(
            (pos.x - self.left) * scale.x,
            (self.top - pos.y - pos.z) * scale.y,
        )
    }

    /// Map a pixel coordinate back to the world ground plane.
    ///
    /// Inverse of [`world_to_pixel`](Self::world_to_pixel) on X/Y only — the
    /// elevation fold cannot be undone, so Z is always 0.
    pub fn pixel_to_world(&self, px: Vec2) -> Vec3 {
        let scale = self.pixels_per_unit();
        Vec3::new(
            px.x / scale.x + self.left,
            self.top - px.y / scale.y,
            0.0,
        )
    }

    /// Orthographic view-projection over the visible rectangle.
    ///
    /// Vertices reaching the GPU are already flattened world-space points
    /// (elevation folded into Y, Z zeroed), so this is the whole camera
    /// transform for the quad shader.
    pub fn view_proj(&self) -> Mat4 {
        Mat4::orthographic_rh(self.left, self.right, self.bottom, self.top, -1.0, 1.0)
    }

    /// Pixel-space projection for screen-anchored drawing (UI, text).
    /// (0, 0) is the top-left pixel.
    pub fn screen_proj(&self) -> Mat4 {
        Mat4::orthographic_rh(0.0, self.screen.x, self.screen.y, 0.0, -1.0, 1.0)
    }
}
