//! # Skuggi — 2.5D Composite-Object Renderer
//!
//! A rendering layer for games whose world is three-dimensional but whose
//! screen is not: game objects are stacks of independently rotatable textured
//! panels, projected to flat screen-space quads and painted back-to-front.
//! Elevation becomes a vertical screen offset, shadows are the same quads
//! half-folded onto the ground, and lights are additive overlay passes.
//!
//! Start with `use skuggi::prelude::*` and build an [`App`](app::App).

pub mod animation;
pub mod app;
pub mod atlas;
pub mod camera;
pub mod math;
pub mod prelude;
pub mod render;
pub mod time;
pub mod window;
pub mod world;

#[cfg(feature = "text")]
pub mod text;
